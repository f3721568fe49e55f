use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::modules::photo::{model, service::PhotoService};
use crate::utils::read_upload_form;

const IMAGE_FIELD: &str = "photo_image";

#[get("")]
pub async fn list_photos(
    photo_service: web::Data<PhotoService>,
) -> Result<success::Success<Vec<model::PhotoResponse>>, error::Error> {
    let photos = photo_service.list().await?;
    Ok(success::Success::ok(Some(photos)).message("Photos retrieved successfully"))
}

#[get("/album/{album_id:[0-9a-fA-F-]{36}}")]
pub async fn list_album_photos(
    photo_service: web::Data<PhotoService>,
    album_id: web::Path<Uuid>,
) -> Result<success::Success<Vec<model::PhotoResponse>>, error::Error> {
    let photos = photo_service.list_by_album(album_id.into_inner()).await?;
    Ok(success::Success::ok(Some(photos)).message("Photos retrieved successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_photo(
    photo_service: web::Data<PhotoService>,
    photo_id: web::Path<Uuid>,
) -> Result<success::Success<model::PhotoResponse>, error::Error> {
    let photo = photo_service.get_by_id(photo_id.into_inner()).await?;
    Ok(success::Success::ok(Some(photo)).message("Photo retrieved successfully"))
}

#[post("")]
pub async fn create_photo(
    photo_service: web::Data<PhotoService>,
    payload: Multipart,
) -> Result<success::Success<model::PhotoResponse>, error::Error> {
    let form = read_upload_form(payload, IMAGE_FIELD, photo_service.max_upload_size()).await?;
    let photo_data: model::CreatePhotoModel = form.parse()?;
    let photo = photo_service.create(photo_data, form.file).await?;
    Ok(success::Success::created(Some(photo)).message("Photo created successfully"))
}

#[put("/{id:[0-9a-fA-F-]{36}}")]
pub async fn update_photo(
    photo_service: web::Data<PhotoService>,
    photo_id: web::Path<Uuid>,
    payload: Multipart,
) -> Result<success::Success<model::PhotoResponse>, error::Error> {
    let form = read_upload_form(payload, IMAGE_FIELD, photo_service.max_upload_size()).await?;
    let photo_data: model::UpdatePhotoModel = form.parse()?;
    let photo = photo_service.update(photo_id.into_inner(), photo_data, form.file).await?;
    Ok(success::Success::ok(Some(photo)).message("Photo updated successfully"))
}

#[delete("/{id:[0-9a-fA-F-]{36}}")]
pub async fn delete_photo(
    photo_service: web::Data<PhotoService>,
    photo_id: web::Path<Uuid>,
) -> Result<success::Success<()>, error::Error> {
    photo_service.delete(photo_id.into_inner()).await?;
    Ok(success::Success::ok(None).message("Photo and associated image deleted successfully"))
}
