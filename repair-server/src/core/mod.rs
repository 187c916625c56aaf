//! Core Module
//!
//! 核心模块：配置、服务器状态、HTTP 服务。

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, build_app};
pub use state::ServerState;
