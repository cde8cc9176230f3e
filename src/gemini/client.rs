//! Gemini `generateContent` client

use super::models::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::config::GeminiConfig;
use crate::prompt::TutorRequest;
use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::debug;

/// Gemini inference error types
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Upstream error: status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model returned no usable text")]
    EmptyResponse,
}

/// Gemini inference client
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> Result<Self, InferenceError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| InferenceError::RequestFailed(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Run one inference call for the submission and return the response text
    ///
    /// A single attempt: any failure is returned to the caller, never retried.
    pub async fn generate(&self, request: &TutorRequest) -> Result<String, InferenceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let body = GenerateContentRequest {
            contents: vec![Content::user(request.to_parts())],
        };

        debug!(
            "Calling Gemini generateContent: model={}, multimodal={}",
            self.config.model,
            matches!(request, TutorRequest::WithImage { .. })
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InferenceError::Timeout(e.to_string())
                } else {
                    InferenceError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(InferenceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(Part::as_text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }

        Ok(text)
    }

    /// Model name this client is configured for
    pub fn model(&self) -> &str {
        &self.config.model
    }
}
