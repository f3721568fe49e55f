use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::album::{
    model::{CreateAlbumModel, InsertAlbum},
    repository::AlbumRepository,
    schema::AlbumEntity,
};

#[derive(Clone)]
pub struct AlbumService {
    repo: Arc<dyn AlbumRepository + Send + Sync>,
}

impl AlbumService {
    pub fn with_dependencies(repo: Arc<dyn AlbumRepository + Send + Sync>) -> Self {
        info!("AlbumService initialized with dependencies");
        AlbumService { repo }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<AlbumEntity, error::SystemError> {
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Album not found"))
    }

    pub async fn list(&self) -> Result<Vec<AlbumEntity>, error::SystemError> {
        self.repo.find_all().await
    }

    pub async fn create(&self, album: CreateAlbumModel) -> Result<AlbumEntity, error::SystemError> {
        let album = self
            .repo
            .create(&InsertAlbum { name: album.name, description: album.description })
            .await?;
        info!("Created album {}", album.id);
        Ok(album)
    }
}
