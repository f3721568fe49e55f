use crate::modules::{customer::handle::*, media::handle::get_image};
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/customers")
            .service(get_image)
            .service(list_customers)
            .service(create_customer)
            .service(list_user_customers)
            .service(find_customer_by_username)
            .service(count_customers)
            .service(get_customer)
            .service(update_customer)
            .service(delete_customer),
    );
}
