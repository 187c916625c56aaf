//! Workflow actor
//!
//! Every workflow call carries an explicit actor instead of reading
//! ambient session state. The engine uses it only to authorize which
//! transitions that actor may trigger.

use serde::{Deserialize, Serialize};

/// Role of the party triggering a workflow operation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Admin,
    Engineer,
    Customer,
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Admin => "admin",
            Self::Engineer => "engineer",
            Self::Customer => "customer",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "engineer" => Ok(Self::Engineer),
            "customer" => Ok(Self::Customer),
            other => Err(format!("unknown actor role: {}", other)),
        }
    }
}

/// The party triggering a workflow operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub role: ActorRole,
    /// Engineer record ID for engineers; free-form operator ID otherwise
    pub id: String,
}

impl Actor {
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            role: ActorRole::Admin,
            id: id.into(),
        }
    }

    pub fn engineer(id: impl Into<String>) -> Self {
        Self {
            role: ActorRole::Engineer,
            id: id.into(),
        }
    }

    pub fn customer(id: impl Into<String>) -> Self {
        Self {
            role: ActorRole::Customer,
            id: id.into(),
        }
    }
}
