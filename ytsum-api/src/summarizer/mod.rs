//! Summarize / ask adapter
//!
//! Validates inbound input, builds the multi-part payload, makes the single
//! outbound call to the content generator and maps the outcome to a typed
//! result. No retries, no adapter-level timeout: whatever the generator's
//! HTTP client enforces is inherited as-is.
//!
//! Never touches the user store.

pub mod url;

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::generator::{extract_text, ContentGenerator, GenerateContentRequest, GenerationError, Part};

pub use url::is_supported_video_url;

/// Instruction used when the request carries no prompt
pub const DEFAULT_SUMMARY_PROMPT: &str =
    "Summarize this video in three bullet points. Keep each bullet to one or two sentences.";

/// MIME type declared for every video reference, whatever the real container
pub const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Appended to the upstream text when the quota is exhausted
pub const QUOTA_REMEDIATION: &str = "The Gemini API quota has been exceeded. \
     Check your plan and billing details at https://ai.google.dev/gemini-api/docs/rate-limits \
     or wait a minute before trying again.";

/// Substrings that mark an upstream failure as quota exhaustion
const QUOTA_MARKERS: [&str; 3] = ["RESOURCE_EXHAUSTED", "Quota exceeded", "429"];

/// Adapter failure kinds
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummarizeError {
    /// No generator was initialized at startup (missing credential)
    #[error("Gemini client is not initialized. Set GEMINI_API_KEY and restart the server.")]
    ServiceUnavailable,

    /// Missing/blank field or unsupported URL shape
    #[error("{0}")]
    InvalidInput(String),

    /// Payload construction failed (adapter defect)
    #[error("Failed to build generation request: {0}")]
    Internal(String),

    /// Upstream quota exhausted; raw text plus remediation
    #[error("{0}")]
    QuotaExceeded(String),

    /// Any other upstream failure; raw text verbatim
    #[error("{0}")]
    ExternalService(String),
}

/// Successful summarize result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub summary: String,
    pub url: String,
}

/// Whether an upstream failure is quota exhaustion
///
/// Prefers the structured HTTP status; falls back to sniffing the text for
/// transports that lose it.
pub fn is_quota_failure(err: &GenerationError) -> bool {
    err.status == Some(429) || QUOTA_MARKERS.iter().any(|marker| err.message.contains(marker))
}

/// Map an upstream failure to its adapter error kind
pub fn classify_failure(err: GenerationError) -> SummarizeError {
    if is_quota_failure(&err) {
        SummarizeError::QuotaExceeded(format!("{} {}", err.message, QUOTA_REMEDIATION))
    } else {
        SummarizeError::ExternalService(err.message)
    }
}

/// Model text, or the whole response object stringified when it has none
pub fn normalize_response(response: &Value) -> String {
    extract_text(response).unwrap_or_else(|| response.to_string())
}

/// Request adapter around an optional content generator
#[derive(Clone)]
pub struct Summarizer {
    generator: Option<Arc<dyn ContentGenerator>>,
    model: String,
}

impl Summarizer {
    pub fn new(generator: Option<Arc<dyn ContentGenerator>>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Adapter with no generator: every call fails with `ServiceUnavailable`
    pub fn unavailable(model: impl Into<String>) -> Self {
        Self::new(None, model)
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Summarize a YouTube video
    ///
    /// Order of checks: generator present, url present, prompt (after
    /// defaulting) present, url shape. Only then is the generator called.
    pub async fn summarize(
        &self,
        url: Option<&str>,
        prompt: Option<&str>,
    ) -> Result<SummaryOutcome, SummarizeError> {
        let generator = self.generator()?;

        let url = url.map(str::trim).unwrap_or_default();
        if url.is_empty() {
            return Err(SummarizeError::InvalidInput("YouTube URL is required".to_string()));
        }

        let prompt = prompt.unwrap_or(DEFAULT_SUMMARY_PROMPT);
        if prompt.trim().is_empty() {
            return Err(SummarizeError::InvalidInput("Prompt must not be empty".to_string()));
        }

        if !is_supported_video_url(url) {
            return Err(SummarizeError::InvalidInput(format!(
                "Invalid YouTube URL: {}",
                url
            )));
        }

        let request = GenerateContentRequest::user_turn(vec![
            Part::file(url, VIDEO_MIME_TYPE),
            Part::text(prompt),
        ]);

        info!(url = url, model = %self.model, "Summarizing video");

        let summary = self.invoke(generator.as_ref(), &request).await?;

        Ok(SummaryOutcome {
            summary,
            url: url.to_string(),
        })
    }

    /// Free-form prompt with no media attached
    pub async fn ask(&self, prompt: Option<&str>) -> Result<String, SummarizeError> {
        let generator = self.generator()?;

        let prompt = prompt.unwrap_or_default();
        if prompt.trim().is_empty() {
            return Err(SummarizeError::InvalidInput("Prompt is required".to_string()));
        }

        let request = GenerateContentRequest::user_turn(vec![Part::text(prompt)]);

        info!(model = %self.model, prompt_len = prompt.len(), "Forwarding prompt");

        self.invoke(generator.as_ref(), &request).await
    }

    fn generator(&self) -> Result<&Arc<dyn ContentGenerator>, SummarizeError> {
        self.generator.as_ref().ok_or_else(|| {
            warn!("Generation requested but no Gemini client is configured");
            SummarizeError::ServiceUnavailable
        })
    }

    async fn invoke(
        &self,
        generator: &dyn ContentGenerator,
        request: &GenerateContentRequest,
    ) -> Result<String, SummarizeError> {
        let payload = request
            .to_payload()
            .map_err(|e| SummarizeError::Internal(e.to_string()))?;

        match generator.generate_content(&self.model, &payload).await {
            Ok(response) => Ok(normalize_response(&response)),
            Err(err) => {
                let classified = classify_failure(err.clone());
                let kind = if matches!(classified, SummarizeError::QuotaExceeded(_)) {
                    "quota_exceeded"
                } else {
                    "external_service_error"
                };
                warn!(
                    backend = generator.name(),
                    upstream_status = ?err.status,
                    classification = kind,
                    "Content generation failed: {}",
                    err.message
                );
                Err(classified)
            }
        }
    }
}
