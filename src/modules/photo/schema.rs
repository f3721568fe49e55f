use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::modules::media::AssetOwner;

#[derive(Debug, Clone, FromRow)]
pub struct PhotoEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub upload_date: chrono::NaiveDate,
    pub album_id: Uuid,
    pub image_name: Option<String>,
    pub version: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl AssetOwner for PhotoEntity {
    type Id = Uuid;
    const KIND: &'static str = "Photo";

    fn id(&self) -> Uuid {
        self.id
    }

    fn asset(&self) -> Option<&str> {
        self.image_name.as_deref()
    }

    fn set_asset(&mut self, name: Option<String>) {
        self.image_name = name;
    }
}
