//! Notification types
//!
//! The server never renders email HTML itself; it hands a template
//! identifier plus a structured payload to the external email sink.
//! Delivery is best-effort and every attempt is recorded in the
//! email_log table.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Email template identifiers understood by the notification sink
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    EngineerStarted,
    RepairCompleted,
    AdminNewBooking,
    EngineerAssignment,
    AdminWorkStarted,
    AdminWorkCompleted,
    AdminTaskRejected,
    AdminWorkOnHold,
    CustomerWorkOnHold,
    CustomerWorkResumed,
    EngineerWorkResumed,
    AdminUnableToComplete,
    RequestCancelled,
    StatusUpdate,
}

impl NotificationKind {
    /// Wire identifier (snake_case, matches serde)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EngineerStarted => "engineer_started",
            Self::RepairCompleted => "repair_completed",
            Self::AdminNewBooking => "admin_new_booking",
            Self::EngineerAssignment => "engineer_assignment",
            Self::AdminWorkStarted => "admin_work_started",
            Self::AdminWorkCompleted => "admin_work_completed",
            Self::AdminTaskRejected => "admin_task_rejected",
            Self::AdminWorkOnHold => "admin_work_on_hold",
            Self::CustomerWorkOnHold => "customer_work_on_hold",
            Self::CustomerWorkResumed => "customer_work_resumed",
            Self::EngineerWorkResumed => "engineer_work_resumed",
            Self::AdminUnableToComplete => "admin_unable_to_complete",
            Self::RequestCancelled => "request_cancelled",
            Self::StatusUpdate => "status_update",
        }
    }

    /// Subject line for the rendered email
    pub fn subject(&self) -> &'static str {
        match self {
            Self::EngineerStarted => "Work started on your repair",
            Self::RepairCompleted => "Your repair is complete",
            Self::AdminNewBooking => "New repair booking received",
            Self::EngineerAssignment => "New task assignment",
            Self::AdminWorkStarted => "Engineer started work",
            Self::AdminWorkCompleted => "Repair completed",
            Self::AdminTaskRejected => "Task rejected by engineer",
            Self::AdminWorkOnHold => "Work placed on hold",
            Self::CustomerWorkOnHold => "Your repair is on hold",
            Self::CustomerWorkResumed => "Your repair has resumed",
            Self::EngineerWorkResumed => "Task resumed",
            Self::AdminUnableToComplete => "Engineer unable to complete repair",
            Self::RequestCancelled => "Your repair request was cancelled",
            Self::StatusUpdate => "Repair request update",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification ready for dispatch to the email sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub to: String,
    pub subject: String,
    pub data: serde_json::Value,
}

/// Delivery outcome recorded for each dispatched notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SendStatus {
    Sent,
    Failed,
}

/// Audit record of a notification attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailLog {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub kind: NotificationKind,
    pub to: String,
    pub sent_status: SendStatus,
    /// Delivery attempts made (1..=max)
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_to_template_id() {
        let json = serde_json::to_string(&NotificationKind::AdminWorkOnHold).unwrap();
        assert_eq!(json, "\"admin_work_on_hold\"");
    }

    #[test]
    fn message_uses_type_field_on_the_wire() {
        let msg = EmailMessage {
            kind: NotificationKind::StatusUpdate,
            to: "a@b.c".into(),
            subject: NotificationKind::StatusUpdate.subject().into(),
            data: serde_json::json!({"requestId": "repair_request:1"}),
        };
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "status_update");
        assert_eq!(v["to"], "a@b.c");
    }
}
