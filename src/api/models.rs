//! API response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Standard error codes
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Outcome of one submission
///
/// External failures do not fail the request: the response text (or the
/// fixed fallback) is always present, and each failed leg is reported in its
/// own field so the page can render it as a non-fatal message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    /// Model response, or the fallback string if inference failed
    pub response: String,

    /// Whether the submission was written to the document store
    pub saved: bool,

    /// Server-assigned timestamp of the stored record, when saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,

    /// Stringified inference failure, when the model call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_error: Option<String>,

    /// Stringified persistence failure, when the write failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistence_error: Option<String>,
}
