use std::path::PathBuf;

use crate::modules::media::{AssetConfig, NamingPolicy};

pub struct Env {
    pub database_url: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
    pub workers: usize,
    pub upload_dir: PathBuf,
    pub max_upload_size: usize,
    pub allowed_image_types: Vec<String>,
    pub asset_naming: NamingPolicy,
}

impl Env {
    fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        let workers = std::env::var("WORKERS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<usize>()
            .expect("WORKERS must be a valid usize integer");

        let defaults = AssetConfig::default();
        let upload_dir =
            std::env::var("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.upload_dir);
        let max_upload_size = std::env::var("MAX_UPLOAD_SIZE")
            .map(|v| v.parse::<usize>().expect("MAX_UPLOAD_SIZE must be a valid usize integer"))
            .unwrap_or(defaults.max_file_size);
        let allowed_image_types = std::env::var("ALLOWED_IMAGE_TYPES")
            .map(|v| {
                v.split(',')
                    .map(|t| t.trim().to_ascii_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_mime_types);
        let asset_naming = std::env::var("ASSET_NAMING")
            .map(|v| {
                v.parse::<NamingPolicy>()
                    .expect("ASSET_NAMING must be overwrite or disambiguate")
            })
            .unwrap_or(defaults.naming);

        Env {
            database_url,
            frontend_url,
            ip,
            port,
            workers,
            upload_dir,
            max_upload_size,
            allowed_image_types,
            asset_naming,
        }
    }

    pub fn asset_config(&self) -> AssetConfig {
        AssetConfig {
            upload_dir: self.upload_dir.clone(),
            max_file_size: self.max_upload_size,
            allowed_mime_types: self.allowed_image_types.clone(),
            naming: self.asset_naming,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
