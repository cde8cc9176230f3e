//! Crate-level error type

use crate::gemini::InferenceError;
use crate::store::PersistenceError;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Internal error: {0}")]
    Internal(String),
}
