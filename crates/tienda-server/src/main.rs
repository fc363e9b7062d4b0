//! Storefront server binary.
//!
//! Loads the config (optional path as the first argument, or
//! `TIENDA_CONFIG`), opens the storage engine, and serves the API with
//! permissive CORS for the mobile client.

use std::path::Path;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;

use tienda_core::StoreConfig;
use tienda_server::{handlers, json_config};
use tienda_storage::StoreEngine;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tienda_core::tracing::init();

    let config = load_config()?;
    let engine = StoreEngine::from_config(&config)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let bind_addr = config.effective_bind_addr().to_string();
    info!("listening on {bind_addr}");

    let engine = web::Data::new(engine);
    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(engine.clone())
            .app_data(config_data.clone())
            .app_data(json_config())
            .configure(handlers::order_handlers::configure)
            .configure(handlers::product_handlers::configure)
            .configure(handlers::user_handlers::configure)
            .configure(handlers::admin_handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}

fn load_config() -> std::io::Result<StoreConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TIENDA_CONFIG").ok());

    match path {
        Some(path) => StoreConfig::from_toml_path(Path::new(&path))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())),
        None => Ok(StoreConfig::default()),
    }
}
