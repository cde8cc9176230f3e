//! HTTP surface
//!
//! - `GET /` - the form page
//! - `GET /healthz` - liveness
//! - `POST /api/v1/solve` - one submission: multipart input + optional image

pub mod handlers;
pub mod models;
pub mod page;
pub mod routes;

pub use handlers::AppState;
pub use models::{ApiError, SolveResponse};
pub use routes::build_router;
