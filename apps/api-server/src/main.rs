//! # Inkwell API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer};
use tracing_actix_web::TracingLogger;

use api_server::config::AppConfig;
use api_server::configure_app;
use api_server::state::AppState;
use api_server::telemetry::init_telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_telemetry(&config.telemetry);

    tracing::info!(
        "Starting Inkwell API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(configure_app(state.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
