use crate::modules::{media::handle::get_image, user::handle::*};
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/users")
            .service(get_image)
            .service(list_users)
            .service(list_users_by_role)
            .service(find_user_by_username)
            .service(count_users)
            .service(count_users_by_role)
            .service(create_user)
            .service(get_user)
            .service(update_user)
            .service(delete_user),
    );
}
