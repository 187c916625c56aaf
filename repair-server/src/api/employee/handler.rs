//! Employee API Handlers
//!
//! Engineer-facing operations. Identity comes from the caller headers;
//! the workflow engine enforces that an engineer only touches requests
//! assigned to them.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Cursor;
use surrealdb::RecordId;

use crate::api::actor::Caller;
use crate::core::ServerState;
use crate::db::repository::RepairRequestRepository;
use crate::utils::{AppError, AppResponse, AppResult};
use crate::workflow::{CompletionInput, PaymentInput, TransitionInput};
use shared::models::{
    repair_request::{EmployeeStatusUpdate, RecordPayment},
    ActorRole, RepairRequest,
};
use shared::util::non_blank;

/// Supported proof-image formats (re-encoded to JPG on save)
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for proof images
const JPEG_QUALITY: u8 = 85;

/// List the caller's assigned requests
pub async fn tasks(
    State(state): State<ServerState>,
    Caller(actor): Caller,
) -> AppResult<Json<AppResponse<Vec<RepairRequest>>>> {
    if actor.role != ActorRole::Engineer {
        return Err(AppError::forbidden("Task list requires engineer actor"));
    }
    let engineer_id: RecordId = actor
        .id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid engineer id: {}", actor.id)))?;

    let repo = RepairRequestRepository::new(state.db.clone());
    let requests = repo.list_for_engineer(&engineer_id).await?;
    Ok(Json(AppResponse::success(requests)))
}

/// Engineer status update (accept/reject/start/hold/resume/unable)
pub async fn update_status(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    Json(payload): Json<EmployeeStatusUpdate>,
) -> AppResult<Json<AppResponse<RepairRequest>>> {
    let mut input = TransitionInput::new(payload.booking_id, payload.new_status);
    input.hold_reason = payload.hold_reason;
    input.unable_reason = payload.unable_reason;
    let request = state.engine.transition(&actor, input).await?;
    Ok(Json(AppResponse::success(request)))
}

/// Completion report submission (multipart: text fields + proof images)
///
/// Fields: `bookingId`, `problem`, `solution`, `partsUsed` (optional),
/// `proofImages` (one or more image files). The request stays
/// `in_progress` until the payment is recorded.
pub async fn save_completion_report(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<RepairRequest>>> {
    let uploads_dir = state.config.uploads_dir();
    fs::create_dir_all(&uploads_dir)
        .map_err(|e| AppError::internal(format!("Failed to create uploads directory: {}", e)))?;

    let mut booking_id = String::new();
    let mut problem = String::new();
    let mut solution = String::new();
    let mut parts_used: Option<String> = None;
    let mut proof_images: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "bookingId" => {
                booking_id = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
            }
            "problem" => {
                problem = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
            }
            "solution" => {
                solution = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
            }
            "partsUsed" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
                parts_used = non_blank(&text).map(String::from);
            }
            "proofImages" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
                    .to_vec();
                let stored = store_proof_image(&state, &filename, data)?;
                proof_images.push(stored);
            }
            _ => {}
        }
    }

    let input = CompletionInput {
        booking_id,
        problem,
        solution,
        parts_used,
        proof_images,
    };
    let request = state.engine.save_completion_report(&actor, input).await?;
    Ok(Json(AppResponse::success(request)))
}

/// Record the payment and finalize the request
pub async fn record_payment(
    State(state): State<ServerState>,
    Caller(actor): Caller,
    Json(payload): Json<RecordPayment>,
) -> AppResult<Json<AppResponse<RepairRequest>>> {
    let input = PaymentInput {
        booking_id: payload.booking_id,
        method: payload.payment_method,
        amount: payload.amount,
        upi_transaction_id: payload.upi_transaction_id,
    };
    let request = state.engine.record_payment(&actor, input).await?;
    Ok(Json(AppResponse::success(request)))
}

/// Validate, re-encode to JPG, and store a proof image.
/// Returns the public URL path. Filename is the SHA256 of the encoded
/// bytes, so duplicate uploads collapse to a single file.
fn store_proof_image(state: &ServerState, filename: &str, data: Vec<u8>) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::validation("Empty proof image".to_string()));
    }
    if data.len() > state.config.upload_max_bytes {
        return Err(AppError::validation(format!(
            "Proof image too large. Maximum size is {} bytes",
            state.config.upload_max_bytes
        )));
    }

    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {}", filename)))?;
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported image format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    let img = image::load_from_memory(&data)
        .map_err(|e| AppError::validation(format!("Invalid image file ({}): {}", ext, e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }

    let mut hasher = Sha256::new();
    hasher.update(&buffer);
    let hash = hex::encode(hasher.finalize());

    let stored_name = format!("{}.jpg", hash);
    let path = state.config.uploads_dir().join(&stored_name);
    if !path.exists() {
        fs::write(&path, &buffer)
            .map_err(|e| AppError::internal(format!("Failed to store proof image: {}", e)))?;
    }

    Ok(format!("/api/uploads/{}", stored_name))
}

/// Serve a stored proof image
pub async fn serve_upload(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    // Stored names are hash.jpg; anything with a path separator is hostile
    if filename.contains('/') || filename.contains("..") {
        return Err(AppError::validation("Invalid filename".to_string()));
    }

    let path = state.config.uploads_dir().join(&filename);
    let data = fs::read(&path)
        .map_err(|_| AppError::not_found(format!("Upload {} not found", filename)))?;

    let mime = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    Ok(([(http::header::CONTENT_TYPE, mime)], data))
}
