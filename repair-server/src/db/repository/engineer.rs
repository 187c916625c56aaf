//! Engineer Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use shared::models::{Engineer, EngineerCreate, EngineerUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "engineer";

#[derive(Clone)]
pub struct EngineerRepository {
    base: BaseRepository,
}

impl EngineerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active engineers
    pub async fn find_all(&self) -> RepoResult<Vec<Engineer>> {
        let engineers: Vec<Engineer> = self
            .base
            .db()
            .query("SELECT * FROM engineer WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(engineers)
    }

    /// Find all engineers including inactive
    pub async fn find_all_with_inactive(&self) -> RepoResult<Vec<Engineer>> {
        let engineers: Vec<Engineer> = self
            .base
            .db()
            .query("SELECT * FROM engineer ORDER BY name")
            .await?
            .take(0)?;
        Ok(engineers)
    }

    /// Find engineer by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Engineer>> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let engineer: Option<Engineer> = self.base.db().select(record_id).await?;
        Ok(engineer)
    }

    /// Create a new engineer
    pub async fn create(&self, data: EngineerCreate) -> RepoResult<Engineer> {
        let engineer = Engineer {
            id: None,
            name: data.name.trim().to_string(),
            email: data.email.trim().to_string(),
            phone: data.phone.trim().to_string(),
            specialization: data.specialization.trim().to_string(),
            is_active: true,
        };

        let created: Option<Engineer> = self
            .base
            .db()
            .create(TABLE)
            .content(engineer)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create engineer".to_string()))
    }

    /// Update an engineer
    pub async fn update(&self, id: &str, data: EngineerUpdate) -> RepoResult<Engineer> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut engineer = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Engineer {} not found", id)))?;

        if let Some(name) = data.name {
            engineer.name = name.trim().to_string();
        }
        if let Some(email) = data.email {
            engineer.email = email.trim().to_string();
        }
        if let Some(phone) = data.phone {
            engineer.phone = phone.trim().to_string();
        }
        if let Some(specialization) = data.specialization {
            engineer.specialization = specialization.trim().to_string();
        }
        if let Some(is_active) = data.is_active {
            engineer.is_active = is_active;
        }
        engineer.id = None;

        let updated: Option<Engineer> = self
            .base
            .db()
            .update(record_id)
            .content(engineer)
            .await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update engineer".to_string()))
    }

    /// Live workload: count of non-terminal requests currently assigned
    /// to this engineer. Derived, never persisted.
    pub async fn active_job_count(&self, engineer_id: &RecordId) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT count() FROM repair_request
                   WHERE assigned_engineer = $engineer
                     AND status != 'completed' AND status != 'cancelled'
                   GROUP ALL"#,
            )
            .bind(("engineer", engineer_id.to_string()))
            .await?;
        let counts: Vec<CountRow> = result.take(0)?;
        Ok(counts.first().map(|c| c.count).unwrap_or(0))
    }
}
