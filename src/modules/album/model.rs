use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct CreateAlbumModel {
    #[validate(length(min = 1, message = "Album name cannot be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub struct InsertAlbum {
    pub name: String,
    pub description: String,
}
