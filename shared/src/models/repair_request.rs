//! Repair Request Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Repair request ID type
pub type RequestId = RecordId;

/// Engineer ID type (re-declared here to avoid a circular module import)
pub type EngineerId = RecordId;

/// Repair request lifecycle status
///
/// Initial state is `pending`; `completed` and `cancelled` are terminal.
/// Status is mutated only by the workflow engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Confirmed,
    Assigned,
    Accepted,
    Rejected,
    InProgress,
    HoldOnWork,
    UnableToComplete,
    Completed,
    Cancelled,
}

impl RequestStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Wire representation (snake_case, matches serde)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Assigned => "assigned",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::InProgress => "in_progress",
            Self::HoldOnWork => "hold_on_work",
            Self::UnableToComplete => "unable_to_complete",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// All states, in lifecycle order
    pub const ALL: [RequestStatus; 10] = [
        Self::Pending,
        Self::Confirmed,
        Self::Assigned,
        Self::Accepted,
        Self::Rejected,
        Self::InProgress,
        Self::HoldOnWork,
        Self::UnableToComplete,
        Self::Completed,
        Self::Cancelled,
    ];
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown status: {}", s))
    }
}

/// Customer contact details, captured at booking time and immutable after
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Device details, captured at booking time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub service_type: String,
    pub device_type: String,
    pub model_number: String,
}

/// Payment method accepted at completion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Upi,
}

/// Payment recorded when a repair completes
///
/// `company_share` + `engineer_share` always equals `amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub method: PaymentMethod,
    /// Amount in currency unit
    pub amount: f64,
    /// Required iff method = upi
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_transaction_id: Option<String>,
    pub company_share: f64,
    pub engineer_share: f64,
}

/// Completion report submitted by the engineer before payment
///
/// `problem` and `solution` are first-class fields; the legacy packed
/// string is derivable via [`CompletionReport::work_performed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionReport {
    pub problem: String,
    pub solution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts_used: Option<String>,
    /// File references for proof-of-work images (at least one)
    pub proof_images: Vec<String>,
    pub completed_at: String,
}

impl CompletionReport {
    /// Legacy display string: "Problem: ...\n\nSolution: ..."
    pub fn work_performed(&self) -> String {
        format!("Problem: {}\n\nSolution: {}", self.problem, self.solution)
    }
}

/// Repair request entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairRequest {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RequestId>,
    pub customer: CustomerInfo,
    pub device: DeviceInfo,
    pub issue_description: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub assigned_engineer: Option<EngineerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unable_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_report: Option<CompletionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentRecord>,
    /// Monotonic counter for optimistic concurrency (compare-and-swap updates)
    #[serde(default)]
    pub version: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl RepairRequest {
    /// Record ID as "table:id" string, empty if unsaved
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

// ========== Wire payloads (camelCase, matching the UI call sites) ==========

/// Customer booking form payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub service_type: String,
    pub device_type: String,
    pub model_number: String,
    pub issue_description: String,
}

impl BookingCreate {
    pub fn customer(&self) -> CustomerInfo {
        CustomerInfo {
            name: self.customer_name.trim().to_string(),
            email: self.customer_email.trim().to_string(),
            phone: self.customer_phone.trim().to_string(),
            address: self.customer_address.trim().to_string(),
        }
    }

    pub fn device(&self) -> DeviceInfo {
        DeviceInfo {
            service_type: self.service_type.trim().to_string(),
            device_type: self.device_type.trim().to_string(),
            model_number: self.model_number.trim().to_string(),
        }
    }
}

/// Generic admin status-set payload (PUT /api/repair-bookings)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSet {
    pub id: String,
    pub status: RequestStatus,
}

/// Admin cancellation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub request_id: String,
    pub reason: String,
}

/// Engineer assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignEngineer {
    pub request_id: String,
    pub engineer_id: String,
}

/// Engineer-side status update payload (PUT /api/employee/update-status)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStatusUpdate {
    pub booking_id: String,
    pub new_status: RequestStatus,
    #[serde(default)]
    pub hold_reason: Option<String>,
    #[serde(default)]
    pub unable_reason: Option<String>,
}

/// Payment submission payload (POST /api/employee/record-payment)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayment {
    pub booking_id: String,
    pub payment_method: PaymentMethod,
    pub amount: f64,
    #[serde(default)]
    pub upi_transaction_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_snake_case() {
        for st in RequestStatus::ALL {
            let json = serde_json::to_string(&st).unwrap();
            assert_eq!(json, format!("\"{}\"", st.as_str()));
            let back: RequestStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, st);
        }
    }

    #[test]
    fn terminal_states() {
        assert!(RequestStatus::Completed.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(!RequestStatus::HoldOnWork.is_terminal());
    }

    #[test]
    fn work_performed_packs_problem_and_solution() {
        let report = CompletionReport {
            problem: "Battery drains fast".into(),
            solution: "Replaced battery".into(),
            parts_used: None,
            proof_images: vec!["a.jpg".into()],
            completed_at: "2026-01-01T00:00:00Z".into(),
        };
        assert_eq!(
            report.work_performed(),
            "Problem: Battery drains fast\n\nSolution: Replaced battery"
        );
    }
}
