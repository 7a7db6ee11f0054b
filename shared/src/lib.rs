//! Shared types for the reward admin stack
//!
//! Wire models, the `{ success, message, data }` response envelope and the
//! service-side error type. Used by both `reward-client` and `reward-mock`.

pub mod error;
pub mod models;
pub mod response;
pub mod validation;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::ApiResponse;
