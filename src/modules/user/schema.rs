use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

use crate::modules::media::AssetOwner;

#[derive(Debug, PartialEq, Clone, Copy, Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[sqlx(rename = "ADMIN")]
    Admin,
    #[sqlx(rename = "COACH")]
    Coach,
    #[sqlx(rename = "USER")]
    User,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub telephone: String,
    pub hash_password: String,
    pub role: UserRole,
    pub description: String,
    pub profile_image: Option<String>,
    pub version: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl AssetOwner for UserEntity {
    type Id = Uuid;
    const KIND: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }

    fn asset(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }

    fn set_asset(&mut self, name: Option<String>) {
        self.profile_image = name;
    }
}
