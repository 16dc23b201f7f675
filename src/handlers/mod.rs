//! Handler module organization for the Saheli analyzer API.
//!
//! This module re-exports the analysis and health handlers for API routing.

pub mod analyze;
pub mod health;

use actix_web::web;

pub use self::{analyze::*, health::*};

/// Registers all public API endpoints.
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .route("/analyze-deepfake", web::post().to(analyze_deepfake)),
    );
}
