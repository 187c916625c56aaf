//! Repository Module
//!
//! Provides CRUD operations over SurrealDB tables.

pub mod email_log;
pub mod engineer;
pub mod repair_request;

// Re-exports
pub use email_log::EmailLogRepository;
pub use engineer::EngineerRepository;
pub use repair_request::RepairRequestRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

// Handlers bubble repository errors straight to the wire; malformed
// ids and missing records stay 4xx, everything else is a 500.
impl From<RepoError> for shared::error::ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(msg) => Self::invalid(msg),
            RepoError::NotFound(msg) => Self::not_found(msg),
            RepoError::Database(msg) => Self::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "repair_request:abc".parse()?;
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Row shape for `SELECT count() ... GROUP ALL` queries
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub count: u64,
}
