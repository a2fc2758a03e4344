//! # Inkwell API Server
//!
//! HTTP layer of the blog platform. The binary in `main.rs` wires the
//! configuration; tests mount the same application through [`configure_app`].

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

use actix_web::web;

use middleware::error::AppError;
use state::AppState;

/// Register shared state, extractor configuration and every route.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state.tokens.clone()))
            .app_data(web::Data::new(state.passwords.clone()))
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            // A malformed id can never name a stored resource.
            .app_data(web::PathConfig::default().error_handler(|_err, _req| {
                AppError::NotFound("Resource not found".to_string()).into()
            }))
            .configure(handlers::configure_routes);
    }
}
