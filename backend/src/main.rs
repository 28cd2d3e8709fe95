mod config;
mod error;
mod services;
mod state;
mod stores;

use crate::config::AppConfig;
use crate::state::{AppContext, AppState};
use crate::stores::csv_rows::CsvRowStore;
use crate::stores::disk_blobs::DiskBlobStore;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();

    let rows = CsvRowStore::new(config.sheets_dir()).map_err(io::Error::other)?;
    let blobs = DiskBlobStore::open(config.drive_dir(), &config.public_url, &config.root_container)
        .map_err(io::Error::other)?;
    info!(
        "books in {}, attachments in {}",
        config.sheets_dir().display(),
        config.drive_dir().display()
    );

    let (host, port, max_payload) = (config.host.clone(), config.port, config.max_payload);
    let state = AppState::new(AppContext::new(config, Arc::new(rows), Arc::new(blobs)));

    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                middleware::Logger::new("%a \"%{method}xi %U\" %s %b %T")
                    .custom_request_replace("method", |req| req.method().to_string()),
            )
            .app_data(web::PayloadConfig::new(max_payload))
            .app_data(web::Data::new(state.clone()))
            .service(services::actions::configure_routes())
            .service(services::files::configure_routes())
    })
        .bind((host.as_str(), port))?
        .run()
        .await
}
