//! Engineer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::actor::Caller;
use crate::core::ServerState;
use crate::db::repository::EngineerRepository;
use crate::utils::{AppError, AppResponse, AppResult};
use shared::models::{ActorRole, Availability, Engineer, EngineerCreate, EngineerUpdate};

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Include inactive engineers (admin screens)
    #[serde(default)]
    all: bool,
}

/// Engineer with workload info (assignment screens)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerView {
    #[serde(flatten)]
    engineer: Engineer,
    availability: Availability,
    /// Count of non-terminal requests currently assigned
    active_jobs: u64,
}

async fn with_workload(repo: &EngineerRepository, engineer: Engineer) -> EngineerView {
    let active_jobs = match &engineer.id {
        Some(id) => repo.active_job_count(id).await.unwrap_or(0),
        None => 0,
    };
    EngineerView {
        availability: engineer.availability(),
        engineer,
        active_jobs,
    }
}

/// List engineers with availability and workload
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<EngineerView>>>> {
    let repo = EngineerRepository::new(state.db.clone());
    let engineers = if query.all {
        repo.find_all_with_inactive().await?
    } else {
        repo.find_all().await?
    };

    let mut views = Vec::with_capacity(engineers.len());
    for engineer in engineers {
        views.push(with_workload(&repo, engineer).await);
    }
    Ok(Json(AppResponse::success(views)))
}

/// Get engineer by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<EngineerView>>> {
    let repo = EngineerRepository::new(state.db.clone());
    let engineer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Engineer {} not found", id)))?;
    Ok(Json(AppResponse::success(with_workload(&repo, engineer).await)))
}

/// Create a new engineer (admin)
pub async fn create(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    Json(payload): Json<EngineerCreate>,
) -> AppResult<Json<AppResponse<Engineer>>> {
    if actor.role != ActorRole::Admin {
        return Err(AppError::forbidden("Engineer management requires admin actor"));
    }
    let repo = EngineerRepository::new(state.db.clone());
    let engineer = repo.create(payload).await?;
    Ok(Json(AppResponse::success(engineer)))
}

/// Update an engineer (admin); deactivation goes through `isActive`
pub async fn update(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
    Json(payload): Json<EngineerUpdate>,
) -> AppResult<Json<AppResponse<Engineer>>> {
    if actor.role != ActorRole::Admin {
        return Err(AppError::forbidden("Engineer management requires admin actor"));
    }
    let repo = EngineerRepository::new(state.db.clone());
    let engineer = repo.update(&id, payload).await?;
    Ok(Json(AppResponse::success(engineer)))
}
