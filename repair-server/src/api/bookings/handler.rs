//! Repair Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::actor::Caller;
use crate::core::ServerState;
use crate::db::repository::repair_request::ListFilter;
use crate::db::repository::RepairRequestRepository;
use crate::utils::{AppError, AppResponse, AppResult, Pagination};
use crate::workflow::TransitionInput;
use shared::models::{
    repair_request::{AssignEngineer, CancelRequest, StatusSet},
    ActorRole, BookingCreate, RepairRequest, RequestStatus,
};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    limit: Option<u32>,
    /// Status filter; absent or "all" disables it
    #[serde(default)]
    status: Option<String>,
    /// Case-insensitive substring match on customer name/email/id
    #[serde(default)]
    search: Option<String>,
}

/// List response (admin dashboard shape)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListResponse {
    success: bool,
    bookings: Vec<RepairRequest>,
    pagination: Pagination,
}

/// Submit a new booking (customer form, no identity required)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<AppResponse<RepairRequest>>> {
    let request = state.engine.submit_booking(payload).await?;
    Ok(Json(AppResponse::success(request)))
}

/// Paginated booking list (admin dashboard)
pub async fn list(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<BookingListResponse>> {
    if actor.role != ActorRole::Admin {
        return Err(AppError::forbidden("Booking list requires admin actor"));
    }

    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<RequestStatus>()
                .map_err(|_| AppError::validation(format!("Unknown status: {}", raw)))?,
        ),
    };
    let filter = ListFilter {
        status,
        search: query.search,
    };
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let repo = RepairRequestRepository::new(state.db.clone());
    let (bookings, total) = repo.list(&filter, page, page_size).await?;

    Ok(Json(BookingListResponse {
        success: true,
        bookings,
        pagination: Pagination::new(page, page_size, total),
    }))
}

/// Get booking by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<RepairRequest>>> {
    let repo = RepairRequestRepository::new(state.db.clone());
    let request = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {} not found", id)))?;
    Ok(Json(AppResponse::success(request)))
}

/// Admin status change (e.g. pending -> confirmed)
pub async fn set_status(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    Json(payload): Json<StatusSet>,
) -> AppResult<Json<AppResponse<RepairRequest>>> {
    let input = TransitionInput::new(payload.id, payload.status);
    let request = state.engine.transition(&actor, input).await?;
    Ok(Json(AppResponse::success(request)))
}

/// Admin cancellation with mandatory reason
pub async fn cancel(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    Json(payload): Json<CancelRequest>,
) -> AppResult<Json<AppResponse<RepairRequest>>> {
    let mut input = TransitionInput::new(payload.request_id, RequestStatus::Cancelled);
    input.cancel_reason = Some(payload.reason);
    let request = state.engine.transition(&actor, input).await?;
    Ok(Json(AppResponse::success(request)))
}

/// Assign (or reassign) an engineer
pub async fn assign(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    Json(payload): Json<AssignEngineer>,
) -> AppResult<Json<AppResponse<RepairRequest>>> {
    let request = state
        .engine
        .assign(&actor, &payload.request_id, &payload.engineer_id)
        .await?;
    Ok(Json(AppResponse::success(request)))
}
