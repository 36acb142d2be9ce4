//! External generative-content service
//!
//! [`ContentGenerator`] is the seam between the request adapters and the
//! third-party model API. The production implementation is
//! [`gemini::GeminiClient`]; tests substitute in-process fakes.
//!
//! Payloads and responses cross the seam as raw JSON. Payload construction
//! (typed parts -> JSON) happens on the caller's side so that a construction
//! defect is reported separately from a service failure.

pub mod gemini;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use gemini::GeminiClient;

/// Failure reported by a content generator
///
/// `status` is the upstream HTTP status when one was received; transport
/// failures (DNS, TLS, timeout) carry `None`. `message` is the raw,
/// unredacted error text.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GenerationError {
    pub status: Option<u16>,
    pub message: String,
}

impl GenerationError {
    /// Error with an upstream HTTP status
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Error without an upstream status (network, decode, client setup)
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

/// Generative-content backend
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Short backend name for logs and `/health`
    fn name(&self) -> &str;

    /// Run one `generateContent` call and return the raw response object
    async fn generate_content(&self, model: &str, payload: &Value) -> Result<Value, GenerationError>;
}

// ========================================
// Request payload
// ========================================

/// `generateContent` request body
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// One conversation turn
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// One payload part: a media reference or a text instruction
///
/// Serializes as `{"text": ...}` or `{"fileData": {...}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    FileData(FileData),
}

/// Reference to externally hosted media
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub file_uri: String,
    pub mime_type: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn file(file_uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Part::FileData(FileData {
            file_uri: file_uri.into(),
            mime_type: mime_type.into(),
        })
    }
}

impl GenerateContentRequest {
    /// Single user turn made of `parts`
    pub fn user_turn(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        }
    }

    /// Serialize to the JSON payload handed to a [`ContentGenerator`]
    pub fn to_payload(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

// ========================================
// Response handling
// ========================================

/// Concatenated text of the first candidate, if it has any text parts
pub fn extract_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}
