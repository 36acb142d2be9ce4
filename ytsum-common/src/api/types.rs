//! Shared API request/response types
//!
//! Request bodies keep every field optional so that a missing field is
//! reported as a validation error with a JSON body, not as a framework
//! deserialization rejection.

use serde::{Deserialize, Serialize};

// ========================================
// Request Types
// ========================================

/// Body of `POST /api/register` and `POST /api/login`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of `POST /api/summarize`
///
/// # Examples
///
/// ```
/// use ytsum_common::api::types::SummarizeRequest;
///
/// let req: SummarizeRequest =
///     serde_json::from_str(r#"{"url": "https://youtu.be/abc"}"#).unwrap();
/// assert_eq!(req.url.as_deref(), Some("https://youtu.be/abc"));
/// assert!(req.prompt.is_none());
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: Option<String>,
    /// Instruction text; a fixed default is used when absent
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Body of `POST /api/ask`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AskRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

// ========================================
// Response Types
// ========================================

/// Outcome marker carried in every response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// `{status, message}` body used for auth responses and every error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }
}

/// Successful `POST /api/summarize` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub status: ResponseStatus,
    pub summary: String,
    /// Echo of the submitted URL
    pub url: String,
}

/// Successful `POST /api/ask` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub status: ResponseStatus,
    pub response: String,
}
