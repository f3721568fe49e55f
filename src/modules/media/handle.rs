use actix_web::{get, http::header, web, HttpResponse};

use crate::api::error;
use crate::modules::media::coordinator::AssetCoordinator;

/// Serves a stored image by name. Mounted under each entity scope.
#[get("/images/{name:.+}")]
pub async fn get_image(
    assets: web::Data<AssetCoordinator>,
    name: web::Path<String>,
) -> Result<HttpResponse, error::Error> {
    let asset = assets.serve_asset(&name.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, asset.content_type))
        .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
        .body(asset.bytes))
}
