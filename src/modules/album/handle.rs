use actix_web::{get, post, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::modules::album::{model, schema::AlbumEntity, service::AlbumService};
use crate::utils::ValidatedJson;

#[get("")]
pub async fn list_albums(
    album_service: web::Data<AlbumService>,
) -> Result<success::Success<Vec<AlbumEntity>>, error::Error> {
    let albums = album_service.list().await?;
    Ok(success::Success::ok(Some(albums)).message("Albums retrieved successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_album(
    album_service: web::Data<AlbumService>,
    album_id: web::Path<Uuid>,
) -> Result<success::Success<AlbumEntity>, error::Error> {
    let album = album_service.get_by_id(album_id.into_inner()).await?;
    Ok(success::Success::ok(Some(album)).message("Album retrieved successfully"))
}

#[post("")]
pub async fn create_album(
    album_service: web::Data<AlbumService>,
    album_data: ValidatedJson<model::CreateAlbumModel>,
) -> Result<success::Success<AlbumEntity>, error::Error> {
    let album = album_service.create(album_data.0).await?;
    Ok(success::Success::created(Some(album)).message("Album created successfully"))
}
