//! Data models for analysis requests, responses, and shared application state.
//!
//! This module defines all serializable structs used for the public API surface
//! and the process-wide configuration injected into handlers at startup.

use std::{env, time::Duration};

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default base URL for the fal.ai inference gateway.
const DEFAULT_FAL_BASE_URL: &str = "https://fal.run";

/// Timeout applied to every outbound inference call.
const INFERENCE_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body for the deepfake analysis endpoint.
///
/// # Request Body (JSON)
/// ```json
/// {
///   "image_base64": "/9j/4AAQSkZJRg...",  // String, base64-encoded image bytes
///   "mime_type": "image/jpeg"             // Optional, defaults to "image/jpeg"
/// }
/// ```
///
/// # Validation Rules
/// - `image_base64`: Required, must be non-empty
///
/// The declared MIME type is currently not honored downstream; the payload is
/// always forwarded to the model as a JPEG data URI.
#[derive(Debug, Deserialize, Validate)]
pub struct AnalysisRequest {
    /// Base64-encoded image bytes
    #[validate(length(min = 1))]
    pub image_base64: String,
    /// Declared MIME type of the image
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "image/jpeg".to_string()
}

/// Full analysis result returned by `POST /api/analyze-deepfake`.
///
/// All score fields are floats in the 0-100 range.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeepfakeAnalysisResult {
    /// Annotated verdict string (e.g. "🔴 High Probability Deepfake")
    pub verification_result: String,
    /// Overall confidence in the verdict
    pub confidence_score: f64,
    /// Estimated probability that the image is a deepfake
    pub deepfake_probability: f64,
    /// Face consistency score (higher means more consistent)
    pub face_consistency_score: f64,
    /// Texture anomaly score (higher means more anomalous)
    pub texture_anomaly_score: f64,
    /// Metadata integrity score
    pub metadata_integrity: f64,
    /// Truncated model explanation
    pub explanation: String,
    /// Key observations extracted from the model response
    pub detailed_findings: Vec<String>,
    /// Next-step recommendations matching the verdict
    pub recommendations: Vec<String>,
    /// UTC timestamp of the analysis, ISO-8601
    pub analysis_timestamp: String,
}

/// Shared application state for all handlers.
///
/// Holds the fal.ai credential (if configured), the inference gateway base URL,
/// and the shared HTTP client. Built once at startup and cloned into each
/// worker; no field is mutated after construction.
#[derive(Clone)]
pub struct AppState {
    /// fal.ai API key; `None` when the service runs in degraded mode
    pub fal_api_key: Option<String>,
    /// Base URL of the fal.ai gateway (overridable for tests)
    pub fal_base_url: String,
    /// Shared reqwest client with a bounded request timeout
    pub http: reqwest::Client,
}

impl AppState {
    /// Creates a new AppState instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FAL_API_KEY`: fal.ai credential. Optional; when unset or empty the
    ///   service starts in degraded mode and analysis requests take the
    ///   fallback path.
    /// - `FAL_API_URL`: Overrides the inference gateway base URL.
    ///
    /// # Errors
    ///
    /// Returns `anyhow::Error` if the HTTP client cannot be constructed.
    pub fn new() -> anyhow::Result<Self> {
        let fal_api_key = env::var("FAL_API_KEY").ok().filter(|k| !k.is_empty());
        let fal_base_url =
            env::var("FAL_API_URL").unwrap_or_else(|_| DEFAULT_FAL_BASE_URL.to_string());

        if fal_api_key.is_some() {
            tracing::info!("fal.ai LLAVA API initialized successfully");
        } else {
            tracing::warn!("FAL_API_KEY not found, deepfake detection will run in degraded mode");
        }

        let http = reqwest::Client::builder()
            .timeout(INFERENCE_TIMEOUT)
            .build()?;

        Ok(Self {
            fal_api_key,
            fal_base_url,
            http,
        })
    }

    /// Whether the external AI model can be reached with a configured credential.
    pub fn ai_available(&self) -> bool {
        self.fal_api_key.is_some()
    }
}
