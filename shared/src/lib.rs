//! Shared types for the FixPoint repair-service framework
//!
//! Common types used across crates: domain models, error types,
//! response structures, and small utilities.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use models::{Actor, ActorRole, Engineer, RepairRequest, RequestStatus};
pub use response::{AppResponse, Pagination};
