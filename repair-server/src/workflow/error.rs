//! Workflow errors

use crate::db::repository::RepoError;
use shared::models::RequestStatus;
use shared::error::ApiError;
use thiserror::Error;

/// Workflow engine errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Repair request not found: {0}")]
    RequestNotFound(String),

    #[error("Engineer not found: {0}")]
    EngineerNotFound(String),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),

    #[error("Engineer is not active: {0}")]
    InactiveEngineer(String),

    #[error("Not permitted: {0}")]
    Forbidden(String),

    #[error("Request was modified concurrently, retry")]
    Conflict,

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match &err {
            WorkflowError::RequestNotFound(id) => {
                ApiError::not_found(format!("Repair request {}", id))
            }
            WorkflowError::EngineerNotFound(id) => ApiError::not_found(format!("Engineer {}", id)),
            WorkflowError::InvalidTransition { .. } => ApiError::business_rule(err.to_string()),
            WorkflowError::MissingField(_) => ApiError::validation(err.to_string()),
            WorkflowError::InvalidAmount(_) => ApiError::validation(err.to_string()),
            WorkflowError::InactiveEngineer(_) => ApiError::business_rule(err.to_string()),
            WorkflowError::Forbidden(msg) => ApiError::forbidden(msg.clone()),
            WorkflowError::Conflict => ApiError::conflict(err.to_string()),
            WorkflowError::Storage(RepoError::Validation(msg)) => ApiError::invalid(msg.clone()),
            WorkflowError::Storage(RepoError::NotFound(msg)) => ApiError::not_found(msg.clone()),
            WorkflowError::Storage(e) => ApiError::database(e.to_string()),
        }
    }
}
