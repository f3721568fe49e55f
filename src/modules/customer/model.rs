use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::customer::schema::CustomerEntity;
use crate::utils::image_url;

pub const IMAGE_ROUTE: &str = "/api/customers/images";

#[derive(Deserialize)]
pub struct UserNameQuery {
    pub user_name: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateCustomerModel {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub user_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Telephone must be at least 6 digits long"))]
    pub telephone: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[validate(length(min = 1, message = "Pack cannot be empty"))]
    pub pack: String,
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "Amount paid cannot be empty"))]
    pub amount_paid: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateCustomerModel {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub user_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Telephone must be at least 6 digits long"))]
    pub telephone: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    #[validate(length(min = 1, message = "Pack cannot be empty"))]
    pub pack: Option<String>,
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Amount paid cannot be empty"))]
    pub amount_paid: Option<String>,
}

impl UpdateCustomerModel {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none()
            && self.email.is_none()
            && self.telephone.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.pack.is_none()
            && self.user_id.is_none()
            && self.amount_paid.is_none()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub telephone: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub pack: String,
    pub amount_paid: String,
    pub user_id: Uuid,
    pub profile_image: Option<String>,
    pub image_url: Option<String>,
}

impl From<CustomerEntity> for CustomerResponse {
    fn from(entity: CustomerEntity) -> Self {
        CustomerResponse {
            id: entity.id,
            user_name: entity.user_name,
            email: entity.email,
            telephone: entity.telephone,
            start_date: entity.start_date,
            end_date: entity.end_date,
            pack: entity.pack,
            amount_paid: entity.amount_paid,
            user_id: entity.user_id,
            image_url: image_url(IMAGE_ROUTE, entity.profile_image.as_deref()),
            profile_image: entity.profile_image,
        }
    }
}
