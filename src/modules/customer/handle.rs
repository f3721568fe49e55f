use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::modules::customer::{model, service::CustomerService};
use crate::utils::read_upload_form;

const IMAGE_FIELD: &str = "profile_image";

#[get("")]
pub async fn list_customers(
    customer_service: web::Data<CustomerService>,
) -> Result<success::Success<Vec<model::CustomerResponse>>, error::Error> {
    let customers = customer_service.list().await?;
    Ok(success::Success::ok(Some(customers)).message("Customers retrieved successfully"))
}

#[get("/user/{user_id:[0-9a-fA-F-]{36}}")]
pub async fn list_user_customers(
    customer_service: web::Data<CustomerService>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<Vec<model::CustomerResponse>>, error::Error> {
    let customers = customer_service.list_by_user(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(customers)).message("Customers retrieved successfully"))
}

#[get("/filtre-name")]
pub async fn find_customer_by_username(
    customer_service: web::Data<CustomerService>,
    query: web::Query<model::UserNameQuery>,
) -> Result<success::Success<model::CustomerResponse>, error::Error> {
    let customer = customer_service.get_by_username(&query.user_name).await?;
    Ok(success::Success::ok(Some(customer)).message("Customer retrieved successfully"))
}

#[get("/count")]
pub async fn count_customers(
    customer_service: web::Data<CustomerService>,
) -> Result<success::Success<i64>, error::Error> {
    let count = customer_service.count().await?;
    Ok(success::Success::ok(Some(count)).message("Customers counted successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_customer(
    customer_service: web::Data<CustomerService>,
    customer_id: web::Path<Uuid>,
) -> Result<success::Success<model::CustomerResponse>, error::Error> {
    let customer = customer_service.get_by_id(customer_id.into_inner()).await?;
    Ok(success::Success::ok(Some(customer)).message("Customer retrieved successfully"))
}

#[post("")]
pub async fn create_customer(
    customer_service: web::Data<CustomerService>,
    payload: Multipart,
) -> Result<success::Success<model::CustomerResponse>, error::Error> {
    let form = read_upload_form(payload, IMAGE_FIELD, customer_service.max_upload_size()).await?;
    let customer_data: model::CreateCustomerModel = form.parse()?;
    let customer = customer_service.create(customer_data, form.file).await?;
    Ok(success::Success::created(Some(customer)).message("Customer created successfully"))
}

#[put("/{id:[0-9a-fA-F-]{36}}")]
pub async fn update_customer(
    customer_service: web::Data<CustomerService>,
    customer_id: web::Path<Uuid>,
    payload: Multipart,
) -> Result<success::Success<model::CustomerResponse>, error::Error> {
    let form = read_upload_form(payload, IMAGE_FIELD, customer_service.max_upload_size()).await?;
    let customer_data: model::UpdateCustomerModel = form.parse()?;
    let customer =
        customer_service.update(customer_id.into_inner(), customer_data, form.file).await?;
    Ok(success::Success::ok(Some(customer)).message("Customer updated successfully"))
}

#[delete("/{id:[0-9a-fA-F-]{36}}")]
pub async fn delete_customer(
    customer_service: web::Data<CustomerService>,
    customer_id: web::Path<Uuid>,
) -> Result<success::Success<()>, error::Error> {
    customer_service.delete(customer_id.into_inner()).await?;
    Ok(success::Success::ok(None).message("Customer and associated image deleted successfully"))
}
