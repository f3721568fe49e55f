use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        media::AssetOwnerRepository,
        photo::{repository::PhotoRepository, schema::PhotoEntity},
    },
};

#[derive(Clone)]
pub struct PhotoRepositoryPg {
    pool: sqlx::PgPool,
}

impl PhotoRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AssetOwnerRepository<PhotoEntity> for PhotoRepositoryPg {
    async fn load(&self, id: &Uuid) -> Result<Option<PhotoEntity>, error::SystemError> {
        let photo = sqlx::query_as::<_, PhotoEntity>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(photo)
    }

    async fn save(&self, photo: &PhotoEntity) -> Result<PhotoEntity, error::SystemError> {
        sqlx::query_as::<_, PhotoEntity>(
            r#"
        INSERT INTO photos
            (id, name, description, upload_date, album_id, image_name, version, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        ON CONFLICT (id) DO UPDATE
        SET
            name        = EXCLUDED.name,
            description = EXCLUDED.description,
            album_id    = EXCLUDED.album_id,
            image_name  = EXCLUDED.image_name,
            version     = photos.version + 1,
            updated_at  = NOW()
        WHERE photos.version = EXCLUDED.version
        RETURNING *
        "#,
        )
        .bind(photo.id)
        .bind(&photo.name)
        .bind(&photo.description)
        .bind(photo.upload_date)
        .bind(photo.album_id)
        .bind(&photo.image_name)
        .bind(photo.version)
        .bind(photo.created_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(error::SystemError::stale_version)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        let rows = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(error::SystemError::not_found("Photo not found"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PhotoRepository for PhotoRepositoryPg {
    async fn find_all(&self) -> Result<Vec<PhotoEntity>, error::SystemError> {
        let photos = sqlx::query_as::<_, PhotoEntity>(
            "SELECT * FROM photos ORDER BY upload_date DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(photos)
    }

    async fn find_by_album(&self, album_id: &Uuid) -> Result<Vec<PhotoEntity>, error::SystemError> {
        let photos = sqlx::query_as::<_, PhotoEntity>(
            "SELECT * FROM photos WHERE album_id = $1 ORDER BY upload_date DESC, created_at DESC",
        )
        .bind(album_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(photos)
    }
}
