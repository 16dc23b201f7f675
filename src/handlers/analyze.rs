//! Deepfake analysis endpoint.
//!
//! Accepts a base64-encoded image, forwards it to the hosted vision-language
//! model (or the degraded fallback when no credential is configured), and
//! returns the assembled analysis result.

use actix_web::{HttpResponse, Responder, web};
use validator::Validate;

use crate::models::{AnalysisRequest, AppState};
use crate::services::{self, InferenceError};

/// Analyzes an image for deepfake manipulation.
///
/// # HTTP Method
/// `POST /api/analyze-deepfake`
///
/// # Request Body (JSON)
/// ```json
/// {
///   "image_base64": "/9j/4AAQSkZJRg...",
///   "mime_type": "image/jpeg"
/// }
/// ```
///
/// # Success Response (200 OK)
/// Returns a [`DeepfakeAnalysisResult`](crate::models::DeepfakeAnalysisResult):
/// ```json
/// {
///   "verification_result": "🟢 Likely Real",
///   "confidence_score": 90.0,
///   "deepfake_probability": 10.0,
///   "face_consistency_score": 89.0,
///   "texture_anomaly_score": 11.0,
///   "metadata_integrity": 85.0,
///   "explanation": "This appears to be a real photograph...",
///   "detailed_findings": ["..."],
///   "recommendations": ["..."],
///   "analysis_timestamp": "2024-01-15T10:30:00+00:00"
/// }
/// ```
///
/// # Error Responses
/// - `400 Bad Request`: Empty `image_base64`
/// - `503 Service Unavailable`: AI path selected but no credential configured
/// - `500 Internal Server Error`: Model call failed or unexpected error
///
/// When no credential is configured at all, the request does not fail: the
/// degraded fallback analysis is returned with fixed scores and generic
/// findings.
#[tracing::instrument(skip(state, payload))]
pub async fn analyze_deepfake(
    state: web::Data<AppState>,
    payload: web::Json<AnalysisRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!(e));
    }

    tracing::info!(
        mime_type = %payload.mime_type,
        payload_len = payload.image_base64.len(),
        "Analyzing image"
    );

    let analysis = if state.ai_available() {
        match services::analyze_with_ai(&state, &payload.image_base64).await {
            Ok(analysis) => analysis,
            Err(e @ InferenceError::MissingCredential) => {
                return HttpResponse::ServiceUnavailable()
                    .json(serde_json::json!({ "detail": e.to_string() }));
            }
            Err(e) => {
                tracing::error!(error = %e, "AI analysis failed");
                return HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "detail": format!("AI analysis failed: {e}") }));
            }
        }
    } else {
        services::basic_analysis()
    };

    tracing::info!(
        verdict = analysis.scores.verdict.as_str(),
        confidence = analysis.scores.confidence,
        "Analysis complete"
    );
    HttpResponse::Ok().json(services::build_result(analysis))
}
