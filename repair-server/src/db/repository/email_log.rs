//! Email Log Repository
//!
//! Audit trail of notification attempts. Best-effort: a failed insert is
//! logged and swallowed by the notify worker, never surfaced to callers.

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::EmailLog;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "email_log";

#[derive(Clone)]
pub struct EmailLogRepository {
    base: BaseRepository,
}

impl EmailLogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a delivery record
    pub async fn insert(&self, log: EmailLog) -> RepoResult<EmailLog> {
        let created: Option<EmailLog> = self
            .base
            .db()
            .create(TABLE)
            .content(log)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to insert email log".to_string()))
    }

    /// Most recent delivery records, newest first
    pub async fn recent(&self, limit: u32) -> RepoResult<Vec<EmailLog>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM email_log ORDER BY created_at DESC LIMIT $limit")
            .bind(("limit", limit as i64))
            .await?;
        let logs: Vec<EmailLog> = result.take(0)?;
        Ok(logs)
    }
}
