use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::user::schema::{UserEntity, UserRole};
use crate::utils::image_url;

pub const IMAGE_ROUTE: &str = "/api/users/images";

#[derive(Deserialize, Validate)]
pub struct CreateUserModel {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub user_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Telephone must be at least 6 digits long"))]
    pub telephone: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateUserModel {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub user_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Telephone must be at least 6 digits long"))]
    pub telephone: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub description: Option<String>,
}

impl UpdateUserModel {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none()
            && self.email.is_none()
            && self.telephone.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.description.is_none()
    }
}

#[derive(Deserialize)]
pub struct RoleQuery {
    pub role_name: UserRole,
}

#[derive(Deserialize)]
pub struct UserNameQuery {
    pub user_name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub telephone: String,
    pub role: UserRole,
    pub description: String,
    pub profile_image: Option<String>,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse {
            id: entity.id,
            user_name: entity.user_name,
            email: entity.email,
            telephone: entity.telephone,
            role: entity.role,
            description: entity.description,
            image_url: image_url(IMAGE_ROUTE, entity.profile_image.as_deref()),
            profile_image: entity.profile_image,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
