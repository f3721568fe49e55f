use uuid::Uuid;

use crate::{
    api::error,
    modules::{customer::schema::CustomerEntity, media::AssetOwnerRepository},
};

#[async_trait::async_trait]
pub trait CustomerRepository: AssetOwnerRepository<CustomerEntity> {
    async fn find_all(&self) -> Result<Vec<CustomerEntity>, error::SystemError>;
    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<CustomerEntity>, error::SystemError>;
    async fn find_by_username(
        &self,
        user_name: &str,
    ) -> Result<Option<CustomerEntity>, error::SystemError>;
    async fn count(&self) -> Result<i64, error::SystemError>;
}
