//! fal.ai vision-language model integration client.
//!
//! Provides the async function and error types for submitting an image to the
//! hosted LLAVA model and retrieving its free-text analysis.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::models::AppState;

/// Route of the hosted model on the fal.ai gateway.
const MODEL_ROUTE: &str = "fal-ai/llava-next";

/// Prompt submitted alongside every image.
pub const ANALYSIS_PROMPT: &str = "Analyze this image carefully. Is it:
1) A real photograph
2) AI-generated/deepfake
3) Edited/manipulated

Look at: lighting, shadows, face geometry, skin texture, digital artifacts.

Give a 2-3 sentence analysis stating your conclusion and key observations.";

/// Errors that can occur when communicating with the fal.ai model service.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No API credential is configured for the service.
    #[error("fal.ai API key not configured")]
    MissingCredential,
    /// HTTP error from reqwest (connect failure, timeout, malformed URL).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The gateway answered with a non-success status.
    #[error("fal.ai returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    /// The model returned a body that could not be parsed.
    #[error("Invalid response from AI model")]
    InvalidResponse,
}

#[derive(Deserialize)]
struct ModelOutput {
    #[serde(default)]
    output: String,
}

/// Submits a base64-encoded image to the LLAVA model for analysis.
///
/// The image is embedded as a JPEG data URI; the model receives it together
/// with [`ANALYSIS_PROMPT`] and answers with free text. The call suspends on
/// the async runtime while the request is in flight, so other requests keep
/// being served.
///
/// # Errors
///
/// Returns [`InferenceError::MissingCredential`] when no API key is
/// configured, and the transport/upstream variants when the call itself fails.
/// No retries are performed.
pub async fn request_analysis(
    state: &AppState,
    image_base64: &str,
) -> Result<String, InferenceError> {
    let Some(api_key) = state.fal_api_key.as_deref() else {
        return Err(InferenceError::MissingCredential);
    };

    let image_url = format!("data:image/jpeg;base64,{image_base64}");
    let url = format!("{}/{MODEL_ROUTE}", state.fal_base_url.trim_end_matches('/'));
    tracing::info!(model = MODEL_ROUTE, "Submitting image to fal.ai");

    let resp = state
        .http
        .post(&url)
        .header("Authorization", format!("Key {api_key}"))
        .json(&serde_json::json!({
            "image_url": image_url,
            "prompt": ANALYSIS_PROMPT,
        }))
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(InferenceError::Upstream { status, body });
    }

    let parsed: ModelOutput = resp
        .json()
        .await
        .map_err(|_| InferenceError::InvalidResponse)?;
    Ok(parsed.output.trim().to_string())
}
