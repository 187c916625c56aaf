//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`bookings`] - 维修请求：创建、查询、取消、指派
//! - [`employee`] - 工程师操作：状态更新、完工报告、收款
//! - [`engineers`] - 工程师档案管理
//! - [`email_logs`] - 通知发送审计日志

pub mod actor;

pub mod bookings;
pub mod email_logs;
pub mod employee;
pub mod engineers;
pub mod health;
