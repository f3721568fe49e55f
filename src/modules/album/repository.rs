use uuid::Uuid;

use crate::{
    api::error,
    modules::album::{model::InsertAlbum, schema::AlbumEntity},
};

#[async_trait::async_trait]
pub trait AlbumRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AlbumEntity>, error::SystemError>;
    async fn find_all(&self) -> Result<Vec<AlbumEntity>, error::SystemError>;
    async fn create(&self, album: &InsertAlbum) -> Result<AlbumEntity, error::SystemError>;
}
