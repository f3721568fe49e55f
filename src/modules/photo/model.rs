use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::photo::schema::PhotoEntity;
use crate::utils::image_url;

pub const IMAGE_ROUTE: &str = "/api/photos/images";

#[derive(Deserialize, Validate)]
pub struct CreatePhotoModel {
    #[validate(length(min = 1, message = "Photo name cannot be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub album_id: Uuid,
}

#[derive(Deserialize, Validate)]
pub struct UpdatePhotoModel {
    #[validate(length(min = 1, message = "Photo name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub album_id: Option<Uuid>,
}

impl UpdatePhotoModel {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.album_id.is_none()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub upload_date: chrono::NaiveDate,
    pub album_id: Uuid,
    pub image_name: Option<String>,
    pub image_url: Option<String>,
}

impl From<PhotoEntity> for PhotoResponse {
    fn from(entity: PhotoEntity) -> Self {
        PhotoResponse {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            upload_date: entity.upload_date,
            album_id: entity.album_id,
            image_url: image_url(IMAGE_ROUTE, entity.image_name.as_deref()),
            image_name: entity.image_name,
        }
    }
}
