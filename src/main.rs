// src/main.rs
mod config;
mod dtos;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;
mod storage;
mod utils;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use reqwest::Client;

use crate::config::{get_pg_pool, mask_key, AppConfig};
use crate::handlers::{admin_handlers, auth_handlers, makanan_handlers, user_handlers};
use crate::repositories::Stores;
use crate::services::{AdminService, AuthService, Authenticator, MakananService, UserService};
use crate::storage::{PhotoStore, SupabaseStorage};
use crate::utils::jwt::TokenCodec;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Supabase URL: {}", cfg.supabase_url);
    info!("Supabase Key: {}", mask_key(&cfg.supabase_key));
    info!("Storage bucket: {}", cfg.storage_bucket);

    let pg_pool = match get_pg_pool(&cfg) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {:#}", e);
            std::process::exit(1);
        }
    };

    let http_client = match Client::builder().user_agent("kalorize-be/0.1").build() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build http client: {}", e);
            std::process::exit(1);
        }
    };

    let stores = Stores::postgres(pg_pool);
    let codec = TokenCodec::new(cfg.jwt_secret.clone());
    let photos: Arc<dyn PhotoStore> = Arc::new(SupabaseStorage::new(
        http_client,
        &cfg.supabase_url,
        &cfg.supabase_key,
        &cfg.storage_bucket,
    ));
    let authenticator = Authenticator::new(codec.clone(), stores.users.clone());

    let auth_data = web::Data::new(AuthService::new(codec, stores.clone()));
    let admin_data = web::Data::new(AdminService::new(
        authenticator.clone(),
        stores.clone(),
        photos.clone(),
    ));
    let user_data = web::Data::new(UserService::new(authenticator, stores.clone(), photos));
    let makanan_data = web::Data::new(MakananService::new(stores));

    let allowed_origins = cfg.allowed_origins.clone();
    let bind_address = format!("0.0.0.0:{}", cfg.port);
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept", "x-requested-with"])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(auth_data.clone())
            .app_data(admin_data.clone())
            .app_data(user_data.clone())
            .app_data(makanan_data.clone())
            .configure(auth_handlers::routes)
            .configure(makanan_handlers::routes)
            .configure(admin_handlers::routes)
            .configure(user_handlers::routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
