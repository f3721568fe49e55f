use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::album::repository::AlbumRepository;
use crate::modules::media::{AssetCoordinator, Upload};
use crate::modules::photo::model::{CreatePhotoModel, PhotoResponse, UpdatePhotoModel};
use crate::modules::photo::{repository::PhotoRepository, schema::PhotoEntity};

#[derive(Clone)]
pub struct PhotoService {
    repo: Arc<dyn PhotoRepository + Send + Sync>,
    albums: Arc<dyn AlbumRepository + Send + Sync>,
    assets: Arc<AssetCoordinator>,
}

impl PhotoService {
    pub fn with_dependencies(
        repo: Arc<dyn PhotoRepository + Send + Sync>,
        albums: Arc<dyn AlbumRepository + Send + Sync>,
        assets: Arc<AssetCoordinator>,
    ) -> Self {
        info!("PhotoService initialized with dependencies");
        PhotoService { repo, albums, assets }
    }

    pub fn max_upload_size(&self) -> usize {
        self.assets.config().max_file_size
    }

    async fn ensure_album(&self, album_id: &Uuid) -> Result<(), error::SystemError> {
        match self.albums.find_by_id(album_id).await? {
            Some(_) => Ok(()),
            None => Err(error::SystemError::not_found(format!("Album not found: {}", album_id))),
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PhotoResponse, error::SystemError> {
        self.repo
            .load(&id)
            .await?
            .map(PhotoResponse::from)
            .ok_or_else(|| error::SystemError::not_found("Photo not found"))
    }

    pub async fn list(&self) -> Result<Vec<PhotoResponse>, error::SystemError> {
        let photos = self.repo.find_all().await?;
        Ok(photos.into_iter().map(PhotoResponse::from).collect())
    }

    pub async fn list_by_album(
        &self,
        album_id: Uuid,
    ) -> Result<Vec<PhotoResponse>, error::SystemError> {
        self.ensure_album(&album_id).await?;
        let photos = self.repo.find_by_album(&album_id).await?;
        Ok(photos.into_iter().map(PhotoResponse::from).collect())
    }

    pub async fn create(
        &self,
        photo: CreatePhotoModel,
        photo_image: Option<Upload>,
    ) -> Result<PhotoResponse, error::SystemError> {
        self.ensure_album(&photo.album_id).await?;
        let now = chrono::Utc::now();

        let draft = PhotoEntity {
            id: Uuid::now_v7(),
            name: photo.name,
            description: photo.description,
            upload_date: now.date_naive(),
            album_id: photo.album_id,
            image_name: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let saved = self.assets.create_with_asset(self.repo.as_ref(), draft, photo_image).await?;
        Ok(PhotoResponse::from(saved))
    }

    pub async fn update(
        &self,
        id: Uuid,
        photo: UpdatePhotoModel,
        photo_image: Option<Upload>,
    ) -> Result<PhotoResponse, error::SystemError> {
        if photo.is_empty() && photo_image.is_none() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }
        if let Some(album_id) = &photo.album_id {
            self.ensure_album(album_id).await?;
        }

        let apply = move |entity: &mut PhotoEntity| {
            if let Some(name) = photo.name {
                entity.name = name;
            }
            if let Some(description) = photo.description {
                entity.description = description;
            }
            if let Some(album_id) = photo.album_id {
                entity.album_id = album_id;
            }
        };

        let saved = self.assets.replace_asset(self.repo.as_ref(), &id, apply, photo_image).await?;
        Ok(PhotoResponse::from(saved))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), error::SystemError> {
        self.assets.delete_with_asset::<PhotoEntity, _>(self.repo.as_ref(), &id).await
    }
}
