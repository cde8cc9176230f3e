//! Firestore response recorder
//!
//! Appends one document per submission via the Firestore REST `commit`
//! endpoint, with the timestamp assigned server-side. Auth is a service
//! account JWT assertion exchanged for a bearer token ([`auth`]).

pub mod auth;
pub mod client;
pub mod models;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use client::FirestoreClient;
pub use models::{RecordedSubmission, SubmissionRecord};

/// Firestore recorder error types
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Token exchange failed: {0}")]
    Auth(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Upstream error: status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
