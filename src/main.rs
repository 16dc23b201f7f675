//! Main entry point for the saheli_server backend.
//!
//! Sets up the Actix Web server, configures the health and analysis routes,
//! and initializes shared application state (fal.ai credential and HTTP
//! client). Uses dotenv for config and launches the async runtime with
//! structured tracing.

use std::env;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use saheli_server::{AppState, get_subscriber, handlers, init_subscriber, tracing as app_tracing};
use tracing_actix_web::TracingLogger;

/// Main entry point. Configures and runs the Actix Web server.
///
/// - Loads environment variables from `.env`.
/// - Initializes structured tracing.
/// - Builds the shared application state; a missing fal.ai credential
///   degrades the service rather than aborting startup.
/// - Registers the API routes with permissive CORS and logging middleware.
/// - Launches the async server runtime with graceful shutdown.
#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let subscriber = get_subscriber("saheli".to_string(), "info".to_string(), std::io::stdout);
    init_subscriber(subscriber);

    // Initialize application state
    let app_state = AppState::new().expect("failed to init app_state");

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8001);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            // The API is consumed from browser frontends on arbitrary
            // origins; CORS is deliberately not a security boundary here.
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .wrap(Logger::default())
            .wrap(app_tracing::RequestLoggingMiddleware::new())
            .configure(handlers::configure_api_routes)
    })
    .bind((host.as_str(), port))?
    .run();

    let srv_handle = server.handle();

    let server_task = tokio::spawn(server);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Shutdown signal received");
            // Gracefully stop the server
            srv_handle.stop(true).await;
        }
        res = server_task => {
            if let Err(e) = res {
                tracing::error!("Server task failed: {}", e);
            }
        }
    }

    Ok(())
}
