//! Engineer API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/engineers | GET | 工程师列表（`?all=true` 含停用） |
//! | /api/engineers/{id} | GET | 详情 |
//! | /api/engineers | POST | 新建（管理员） |
//! | /api/engineers/{id} | PUT | 更新（管理员） |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Engineer router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/engineers",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/engineers/{id}",
            get(handler::get_by_id).put(handler::update),
        )
}
