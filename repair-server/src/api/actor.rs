//! Caller identity extractor
//!
//! 调用方身份从请求头读取：
//!
//! | 头 | 含义 |
//! |----|------|
//! | `X-Actor-Role` | admin / engineer / customer |
//! | `X-Actor-Id`   | 角色对应的记录 id（工程师必填） |
//!
//! 没有认证层；调用方声明自己的身份，工作流引擎只做角色与
//! 归属（assigned engineer）检查。

use axum::extract::FromRequestParts;
use http::request::Parts;

use crate::utils::AppError;
use shared::models::{Actor, ActorRole};

pub const ROLE_HEADER: &str = "x-actor-role";
pub const ID_HEADER: &str = "x-actor-id";

/// 提取调用方身份。缺失或非法的角色头拒绝请求。
pub struct Caller(pub Actor);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::forbidden("Missing X-Actor-Role header"))?;

        let role: ActorRole = role
            .parse()
            .map_err(|_| AppError::forbidden(format!("Unknown actor role: {}", role)))?;

        let id = parts
            .headers
            .get(ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        Ok(Caller(Actor { role, id }))
    }
}
