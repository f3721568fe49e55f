use crate::modules::album::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/albums").service(list_albums).service(create_album).service(get_album));
}
