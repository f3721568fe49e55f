use uuid::Uuid;

use crate::{
    api::error,
    modules::album::{model::InsertAlbum, repository::AlbumRepository, schema::AlbumEntity},
};

#[derive(Clone)]
pub struct AlbumRepositoryPg {
    pool: sqlx::PgPool,
}

impl AlbumRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AlbumRepository for AlbumRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AlbumEntity>, error::SystemError> {
        let album = sqlx::query_as::<_, AlbumEntity>("SELECT * FROM albums WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(album)
    }

    async fn find_all(&self) -> Result<Vec<AlbumEntity>, error::SystemError> {
        let albums = sqlx::query_as::<_, AlbumEntity>("SELECT * FROM albums ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(albums)
    }

    async fn create(&self, album: &InsertAlbum) -> Result<AlbumEntity, error::SystemError> {
        let id = Uuid::now_v7();
        let album = sqlx::query_as::<_, AlbumEntity>(
            r#"
            INSERT INTO albums (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&album.name)
        .bind(&album.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(album)
    }
}
