//! Email Log API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::api::actor::Caller;
use crate::core::ServerState;
use crate::db::repository::EmailLogRepository;
use crate::utils::{AppError, AppResponse, AppResult};
use shared::models::{ActorRole, EmailLog};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 500;

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default)]
    limit: Option<u32>,
}

/// Most recent notification delivery records (admin)
pub async fn recent(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<AppResponse<Vec<EmailLog>>>> {
    if actor.role != ActorRole::Admin {
        return Err(AppError::forbidden("Email logs require admin actor"));
    }
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let repo = EmailLogRepository::new(state.db.clone());
    let logs = repo.recent(limit).await?;
    Ok(Json(AppResponse::success(logs)))
}
