use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::modules::media::AssetOwner;

#[derive(Debug, Clone, FromRow)]
pub struct CustomerEntity {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub telephone: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub pack: String,
    pub amount_paid: String,
    /// Coach responsible for this customer.
    pub user_id: Uuid,
    pub profile_image: Option<String>,
    pub version: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl AssetOwner for CustomerEntity {
    type Id = Uuid;
    const KIND: &'static str = "Customer";

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
