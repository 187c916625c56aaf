//! Email Log API Module
//!
//! 通知审计日志（管理端）。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Email log router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/email-logs", get(handler::recent))
}
