//! Shared types for the Hemline storefront
//!
//! Common types used by the store server and its API consumers: the unified
//! error taxonomy, the response envelope, and the checkout wire types.

pub mod checkout;
pub mod error;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
