//! Gemini `generateContent` REST client
//!
//! One POST per call to `{base_url}/v1beta/models/{model}:generateContent`.
//! The API key travels in the `x-goog-api-key` header so it never appears in
//! URLs, reqwest error strings, or logs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use ytsum_common::config::GeneratorConfig;

use super::{ContentGenerator, GenerationError};

const USER_AGENT: &str = concat!("ytsum/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Gemini API client
///
/// Built once at startup and shared read-only by all requests.
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::transport(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

/// Render a non-success response as `"<code> <STATUS>. <body>"`
///
/// Keeps the upstream status name (e.g. `RESOURCE_EXHAUSTED`) in the text so
/// callers can still classify by content when no status code survives.
fn describe_http_failure(code: u16, body: &str) -> String {
    match serde_json::from_str::<GoogleErrorBody>(body) {
        Ok(parsed) => {
            let status = parsed.error.status.unwrap_or_default();
            let message = parsed.error.message.unwrap_or_else(|| body.to_string());
            format!("{} {}. {}", code, status, message)
        }
        Err(_) if body.trim().is_empty() => format!("{} (empty response body)", code),
        Err(_) => format!("{}. {}", code, body.trim()),
    }
}

/// Message for a non-success response whose body could not be read
fn describe_unreadable_body(code: u16, read_error: &str) -> String {
    format!("{} (unreadable response body: {})", code, read_error)
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_content(&self, model: &str, payload: &Value) -> Result<Value, GenerationError> {
        tracing::debug!(model = model, "Calling Gemini generateContent");

        let response = self
            .http_client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| GenerationError::transport(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let code = status.as_u16();
            let message = match response.text().await {
                Ok(body) => describe_http_failure(code, &body),
                Err(e) => {
                    tracing::warn!(status = code, "Failed to read Gemini error body: {}", e);
                    describe_unreadable_body(code, &e.to_string())
                }
            };
            return Err(GenerationError::http(code, message));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::transport(format!("Invalid response body: {}", e)))?;

        tracing::debug!(model = model, "Gemini generateContent succeeded");

        Ok(body)
    }
}
