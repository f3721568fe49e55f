use uuid::Uuid;

use crate::{
    api::error,
    modules::{media::AssetOwnerRepository, photo::schema::PhotoEntity},
};

#[async_trait::async_trait]
pub trait PhotoRepository: AssetOwnerRepository<PhotoEntity> {
    async fn find_all(&self) -> Result<Vec<PhotoEntity>, error::SystemError>;
    async fn find_by_album(&self, album_id: &Uuid) -> Result<Vec<PhotoEntity>, error::SystemError>;
}
