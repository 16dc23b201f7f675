//! Health check endpoint for the Saheli analyzer API.
//!
//! Provides a simple endpoint to verify service liveness and AI availability
//! for monitoring and orchestration.

use actix_web::{HttpResponse, Responder, web};

use crate::models::AppState;

/// Returns a JSON response describing service health and model availability.
///
/// `ai_available` reflects whether a fal.ai credential is configured; when it
/// is `false` analysis requests are served by the degraded fallback path.
///
/// # Example
/// ```json
/// {
///   "status": "healthy",
///   "service": "Saheli Deepfake Analyzer",
///   "ai_available": true,
///   "model": "llava-next",
///   "provider": "fal.ai"
/// }
/// ```
#[tracing::instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    tracing::info!("Health check endpoint called");
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Saheli Deepfake Analyzer",
        "ai_available": state.ai_available(),
        "model": "llava-next",
        "provider": "fal.ai",
    }))
}
