//! Repair Booking API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/repair-bookings | POST | 客户提交预约 |
//! | /api/repair-bookings | GET | 列表（分页/过滤/搜索，管理端） |
//! | /api/repair-bookings | PUT | 管理员状态变更（确认等） |
//! | /api/repair-bookings/{id} | GET | 详情 |
//! | /api/cancel-request | POST | 管理员取消（带原因） |
//! | /api/assign-engineer | POST | 指派/重新指派工程师 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Booking router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/repair-bookings",
            post(handler::create)
                .get(handler::list)
                .put(handler::set_status),
        )
        .route("/api/repair-bookings/{id}", get(handler::get_by_id))
        .route("/api/cancel-request", post(handler::cancel))
        .route("/api/assign-engineer", post(handler::assign))
}
