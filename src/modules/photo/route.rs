use crate::modules::{media::handle::get_image, photo::handle::*};
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/photos")
            .service(get_image)
            .service(list_photos)
            .service(create_photo)
            .service(list_album_photos)
            .service(get_photo)
            .service(update_photo)
            .service(delete_photo),
    );
}
