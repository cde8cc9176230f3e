//! MathSolver: a small tutoring web app.
//!
//! Serves a single-page form, forwards the student's question (and optional
//! problem image) to the Gemini `generateContent` API, and appends every
//! exchange to a Firestore collection. One submission is one inference call
//! and one write; there is no conversation state between submissions.

pub mod api;
pub mod config;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod store;

pub use error::{Error, Result};
