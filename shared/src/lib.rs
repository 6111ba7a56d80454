//! Shared types for the Tienda storefront
//!
//! Common types used by the API client and the storefront workflow:
//! wire models, error codes and money helpers.

pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
