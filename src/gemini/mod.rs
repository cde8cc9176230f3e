//! Gemini inference client
//!
//! One `generateContent` call per submission, no retry. The wire types live
//! in [`models`]; the client in [`client`].

pub mod client;
pub mod models;

pub use client::{GeminiClient, InferenceError};
