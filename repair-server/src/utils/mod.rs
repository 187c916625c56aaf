//! 工具模块 - 通用工具函数和类型

pub mod logger;

// Unified error surface: the shared ApiError is the application error type
pub use shared::error::{ApiError as AppError, ApiResult as AppResult};
pub use shared::response::{AppResponse, Pagination};
