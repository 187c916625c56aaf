//! FixPoint Repair Server - 设备维修服务后端
//!
//! # 架构概述
//!
//! 本模块是维修服务后端的主入口，提供以下核心功能：
//!
//! - **工作流** (`workflow`): 维修请求状态机 (确认/指派/施工/完成)
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **通知** (`notify`): 邮件通知派发 (fire-and-forget + 重试)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! repair-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 数据库层 (repositories)
//! ├── workflow/      # 状态机引擎 (核心)
//! ├── notify/        # 通知派发
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod notify;
pub mod utils;
pub mod workflow;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use notify::{EmailDispatcher, NotifyService};
pub use workflow::{WorkflowEngine, WorkflowError};

// Re-export unified error types from shared
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
