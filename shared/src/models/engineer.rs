//! Engineer Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Engineer ID type
pub type EngineerId = RecordId;

/// Derived availability: there is no persisted busy/idle tracking,
/// only the active flag. Live workload comes from the request store
/// (count of non-terminal assigned requests).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Offline,
}

/// Engineer roster entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engineer {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<EngineerId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Engineer {
    /// active -> available, else offline
    pub fn availability(&self) -> Availability {
        if self.is_active {
            Availability::Available
        } else {
            Availability::Offline
        }
    }

    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

/// Create engineer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
}

/// Update engineer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
