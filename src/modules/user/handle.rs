use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::modules::user::{model, service::UserService};
use crate::utils::read_upload_form;

const IMAGE_FIELD: &str = "profile_image";

#[get("")]
pub async fn list_users(
    user_service: web::Data<UserService>,
) -> Result<success::Success<Vec<model::UserResponse>>, error::Error> {
    let users = user_service.list().await?;
    Ok(success::Success::ok(Some(users)).message("Users retrieved successfully"))
}

#[get("/by-role")]
pub async fn list_users_by_role(
    user_service: web::Data<UserService>,
    query: web::Query<model::RoleQuery>,
) -> Result<success::Success<Vec<model::UserResponse>>, error::Error> {
    let users = user_service.list_by_role(query.role_name).await?;
    Ok(success::Success::ok(Some(users)).message("Users retrieved successfully"))
}

#[get("/filtre")]
pub async fn find_user_by_username(
    user_service: web::Data<UserService>,
    query: web::Query<model::UserNameQuery>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_by_username(&query.user_name).await?;
    Ok(success::Success::ok(Some(user)).message("User retrieved successfully"))
}

#[get("/count")]
pub async fn count_users(
    user_service: web::Data<UserService>,
) -> Result<success::Success<i64>, error::Error> {
    let count = user_service.count().await?;
    Ok(success::Success::ok(Some(count)).message("Users counted successfully"))
}

#[get("/count-coach")]
pub async fn count_users_by_role(
    user_service: web::Data<UserService>,
    query: web::Query<model::RoleQuery>,
) -> Result<success::Success<i64>, error::Error> {
    let count = user_service.count_by_role(query.role_name).await?;
    Ok(success::Success::ok(Some(count)).message("Users counted successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_by_id(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(user)).message("User retrieved successfully"))
}

#[post("")]
pub async fn create_user(
    user_service: web::Data<UserService>,
    payload: Multipart,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let form = read_upload_form(payload, IMAGE_FIELD, user_service.max_upload_size()).await?;
    let user_data: model::CreateUserModel = form.parse()?;
    let user = user_service.create(user_data, form.file).await?;
    Ok(success::Success::created(Some(user)).message("User created successfully"))
}

#[put("/{id:[0-9a-fA-F-]{36}}")]
pub async fn update_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<Uuid>,
    payload: Multipart,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let form = read_upload_form(payload, IMAGE_FIELD, user_service.max_upload_size()).await?;
    let user_data: model::UpdateUserModel = form.parse()?;
    let user = user_service.update(user_id.into_inner(), user_data, form.file).await?;
    Ok(success::Success::ok(Some(user)).message("User updated successfully"))
}

#[delete("/{id:[0-9a-fA-F-]{36}}")]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<()>, error::Error> {
    user_service.delete(user_id.into_inner()).await?;
    Ok(success::Success::ok(None).message("User and associated image deleted successfully"))
}
