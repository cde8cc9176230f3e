//! Solve flow handlers

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use std::sync::Arc;
use tracing::{error, info};

use super::models::{error_codes, ApiError, SolveResponse};
use super::page;
use crate::gemini::GeminiClient;
use crate::prompt::{ImageAttachment, TutorRequest, FALLBACK_RESPONSE};
use crate::store::{FirestoreClient, SubmissionRecord};

/// Shared application state
///
/// Both external clients are built once in `main` and injected here; handlers
/// hold no other state between submissions.
#[derive(Clone)]
pub struct AppState {
    pub gemini: Arc<GeminiClient>,
    pub store: Arc<FirestoreClient>,
}

/// Serve the form page
///
/// GET /
pub async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

/// Liveness check
///
/// GET /healthz
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Map an uploaded content type onto the accepted image formats
///
/// jpg, jpeg and png are accepted; `image/jpg` is normalized to the
/// registered jpeg type.
fn accepted_image_mime(content_type: &str) -> Option<&'static str> {
    match content_type.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("image/jpeg"),
        "image/png" => Some("image/png"),
        _ => None,
    }
}

fn validation_error(message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(error_codes::VALIDATION_ERROR, message)),
    )
}

/// Handle one submission
///
/// POST /api/v1/solve
///
/// Strictly sequential: parse the form, one inference call, one store write.
/// External failures are caught and reported in the response body; only
/// validation problems produce a non-200 status.
pub async fn solve(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SolveResponse>, (StatusCode, Json<ApiError>)> {
    let mut input: Option<String> = None;
    let mut image: Option<ImageAttachment> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| validation_error(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("input") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| validation_error(format!("Unreadable input field: {}", e)))?;
                input = Some(text);
            }
            Some("image") => {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| validation_error(format!("Unreadable image upload: {}", e)))?;

                // A file picker left empty still submits a zero-length part
                if data.is_empty() {
                    continue;
                }

                let mime = content_type
                    .as_deref()
                    .and_then(accepted_image_mime)
                    .ok_or_else(|| {
                        validation_error(format!(
                            "Unsupported image type {:?}: accepted types are jpg, jpeg, png",
                            content_type.as_deref().unwrap_or("unknown")
                        ))
                    })?;

                image = Some(ImageAttachment::new(mime, data));
            }
            _ => {}
        }
    }

    let input = input.unwrap_or_default();
    if input.trim().is_empty() {
        return Err(validation_error("Input prompt cannot be empty"));
    }

    let request = match image {
        Some(image) => TutorRequest::WithImage { input, image },
        None => TutorRequest::TextOnly { input },
    };

    info!(
        "Solve request: input_len={}, has_image={}",
        request.input().len(),
        matches!(request, TutorRequest::WithImage { .. })
    );

    // One inference attempt; on failure the fixed fallback stands in for the
    // response and the error rides along for the page to display.
    let (response_text, inference_error) = match state.gemini.generate(&request).await {
        Ok(text) => (text, None),
        Err(e) => {
            error!("Inference failed: {}", e);
            (FALLBACK_RESPONSE.to_string(), Some(e.to_string()))
        }
    };

    // Record whatever was displayed, fallback included. A write failure must
    // not take the response down with it.
    let record = SubmissionRecord {
        input_prompt: request.input().to_string(),
        response: response_text.clone(),
    };

    let (saved, recorded_at, persistence_error) = match state.store.record_submission(record).await
    {
        Ok(recorded) => (true, Some(recorded.commit_time), None),
        Err(e) => {
            error!("Persistence failed: {}", e);
            (false, None, Some(e.to_string()))
        }
    };

    Ok(Json(SolveResponse {
        response: response_text,
        saved,
        recorded_at,
        inference_error,
        persistence_error,
    }))
}
