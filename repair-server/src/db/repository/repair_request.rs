//! Repair Request Repository (the Request Store)
//!
//! Requests are never physically deleted; cancellation is a terminal
//! status. All status mutations flow through the workflow engine, which
//! uses the guarded (compare-and-swap) update here.

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use shared::models::repair_request::{CustomerInfo, DeviceInfo, RepairRequest, RequestId};
use shared::models::RequestStatus;
use shared::util::now_rfc3339;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "repair_request";

/// List filter: `status = "all"` disables the status filter,
/// `search` matches case-insensitively on customer name/email/id.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<RequestStatus>,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct RepairRequestRepository {
    base: BaseRepository,
}

impl RepairRequestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new request in `pending` state
    pub async fn create(
        &self,
        customer: CustomerInfo,
        device: DeviceInfo,
        issue_description: String,
    ) -> RepoResult<RepairRequest> {
        let now = now_rfc3339();
        let request = RepairRequest {
            id: None,
            customer,
            device,
            issue_description,
            status: RequestStatus::Pending,
            assigned_engineer: None,
            hold_reason: None,
            unable_reason: None,
            cancel_reason: None,
            completion_report: None,
            payment: None,
            version: 0,
            created_at: now.clone(),
            updated_at: now,
        };

        let created: Option<RepairRequest> = self
            .base
            .db()
            .create(TABLE)
            .content(request)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create repair request".to_string()))
    }

    /// Find request by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RepairRequest>> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let request: Option<RepairRequest> = self.base.db().select(record_id).await?;
        Ok(request)
    }

    /// Paginated list with optional status filter and case-insensitive
    /// substring search on customer name/email/id. Returns (items, total).
    pub async fn list(
        &self,
        filter: &ListFilter,
        page: u32,
        page_size: u32,
    ) -> RepoResult<(Vec<RepairRequest>, u64)> {
        let status = filter
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "all".to_string());
        let search = filter
            .search
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        let page = page.max(1);
        // Multiply in i64: u32 page * page_size overflows for large pages
        let start = (page as i64 - 1) * page_size as i64;

        const MATCH: &str = r#"
            ($status = 'all' OR status = $status)
            AND ($search = ''
                OR string::contains(string::lowercase(customer.name), $search)
                OR string::contains(string::lowercase(customer.email), $search)
                OR string::contains(string::lowercase(<string>id), $search))
        "#;

        let query = format!(
            "SELECT * FROM {TABLE} WHERE {MATCH} ORDER BY created_at DESC LIMIT $limit START $start;
             SELECT count() FROM {TABLE} WHERE {MATCH} GROUP ALL;"
        );

        let mut result = self
            .base
            .db()
            .query(query)
            .bind(("status", status))
            .bind(("search", search))
            .bind(("limit", page_size as i64))
            .bind(("start", start))
            .await?;

        let items: Vec<RepairRequest> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        Ok((items, total))
    }

    /// All requests assigned to an engineer (employee task screen).
    /// `assigned_engineer` is stored as a "table:id" string, so the
    /// comparison binds the string form.
    pub async fn list_for_engineer(&self, engineer_id: &RecordId) -> RepoResult<Vec<RepairRequest>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM {TABLE} WHERE assigned_engineer = $engineer ORDER BY created_at DESC"
            ))
            .bind(("engineer", engineer_id.to_string()))
            .await?;
        let requests: Vec<RepairRequest> = result.take(0)?;
        Ok(requests)
    }

    /// Guarded partial-record replacement: writes `updated` only if the
    /// stored version still equals `expected_version` (compare-and-swap).
    /// Returns None when another writer got there first.
    ///
    /// The stored version becomes `expected_version + 1` and `updated_at`
    /// is stamped here, so callers never fabricate either.
    pub async fn update_guarded(
        &self,
        id: &RequestId,
        expected_version: u64,
        updated: &RepairRequest,
    ) -> RepoResult<Option<RepairRequest>> {
        let mut content = serde_json::to_value(updated)
            .map_err(|e| RepoError::Database(format!("Serialize failed: {e}")))?;
        if let Some(obj) = content.as_object_mut() {
            // Record id is addressed by the UPDATE target, not the content
            obj.remove("id");
            obj.insert("version".into(), serde_json::json!(expected_version + 1));
            obj.insert("updated_at".into(), serde_json::json!(now_rfc3339()));
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE $id CONTENT $content WHERE version = $expected RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("content", content))
            .bind(("expected", expected_version))
            .await?;

        let rows: Vec<RepairRequest> = result.take(0)?;
        Ok(rows.into_iter().next())
    }
}
