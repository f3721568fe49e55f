use actix_cors::Cors;
use actix_web::{self, http::header, middleware::Logger, web, App, HttpServer};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, run_migrations},
    modules::{
        album::{repository_pg::AlbumRepositoryPg, service::AlbumService},
        customer::{repository_pg::CustomerRepositoryPg, service::CustomerService},
        media::{AssetCoordinator, LocalAssetStore},
        photo::{repository_pg::PhotoRepositoryPg, service::PhotoService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

fn cors() -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if ENV.frontend_url == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(&ENV.frontend_url)
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;
    run_migrations(&db_pool)
        .await
        .map_err(|e| std::io::Error::other(format!("Database migration error: {}", e)))?;

    let asset_config = ENV.asset_config();
    let store = LocalAssetStore::open(asset_config.upload_dir.clone()).await.map_err(|e| {
        std::io::Error::other(format!(
            "Upload directory {} is not usable: {}",
            asset_config.upload_dir.display(),
            e
        ))
    })?;
    log::info!("Storing uploads in {}", store.root().display());
    let assets = Arc::new(AssetCoordinator::new(Arc::new(store), asset_config));

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let customer_repo = Arc::new(CustomerRepositoryPg::new(db_pool.clone()));
    let album_repo = Arc::new(AlbumRepositoryPg::new(db_pool.clone()));
    let photo_repo = Arc::new(PhotoRepositoryPg::new(db_pool.clone()));

    let user_service = UserService::with_dependencies(user_repo.clone(), assets.clone());
    let customer_service =
        CustomerService::with_dependencies(customer_repo, user_repo, assets.clone());
    let album_service = AlbumService::with_dependencies(album_repo.clone());
    let photo_service = PhotoService::with_dependencies(photo_repo, album_repo, assets.clone());

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(album_service.clone()))
            .app_data(web::Data::new(photo_service.clone()))
            .app_data(web::Data::from(assets.clone()))
            .service(health_check)
            .service(
                web::scope("/api")
                    .configure(modules::user::route::configure)
                    .configure(modules::customer::route::configure)
                    .configure(modules::album::route::configure)
                    .configure(modules::photo::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(ENV.workers)
    .run()
    .await
}
