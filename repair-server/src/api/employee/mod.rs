//! Employee (engineer) API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/employee/tasks | GET | 当前工程师的任务列表 |
//! | /api/employee/update-status | PUT | 接受/拒绝/开工/挂起/恢复/无法完成 |
//! | /api/employee/save-completion-report | POST | 完工报告（multipart，含凭证图片） |
//! | /api/employee/record-payment | POST | 收款并完成请求 |
//! | /api/uploads/{filename} | GET | 凭证图片下载 |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/employee/tasks", get(handler::tasks))
        .route("/api/employee/update-status", put(handler::update_status))
        .route(
            "/api/employee/save-completion-report",
            post(handler::save_completion_report),
        )
        .route("/api/employee/record-payment", post(handler::record_payment))
        .route("/api/uploads/{filename}", get(handler::serve_upload))
}
