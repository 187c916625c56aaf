//! Template payload assembly
//!
//! Each notification kind maps to a recipient class and a structured
//! data payload the sink renders into the corresponding HTML template.

use serde_json::json;
use shared::models::{Engineer, EmailMessage, NotificationKind, RepairRequest};

use NotificationKind as N;

/// Who receives a given notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Customer,
    Admin,
    Engineer,
}

/// Recipient class for a template
pub fn recipient(kind: NotificationKind) -> Recipient {
    match kind {
        N::EngineerStarted
        | N::RepairCompleted
        | N::CustomerWorkOnHold
        | N::CustomerWorkResumed
        | N::RequestCancelled
        | N::StatusUpdate => Recipient::Customer,
        N::AdminNewBooking
        | N::AdminWorkStarted
        | N::AdminWorkCompleted
        | N::AdminTaskRejected
        | N::AdminWorkOnHold
        | N::AdminUnableToComplete => Recipient::Admin,
        N::EngineerAssignment | N::EngineerWorkResumed => Recipient::Engineer,
    }
}

/// Build the wire message for a notification kind.
///
/// Returns None when the recipient cannot be resolved (engineer template
/// on a request with no assigned engineer) — the caller logs and drops.
pub fn build_message(
    kind: NotificationKind,
    request: &RepairRequest,
    engineer: Option<&Engineer>,
    admin_email: &str,
) -> Option<EmailMessage> {
    let to = match recipient(kind) {
        Recipient::Customer => request.customer.email.clone(),
        Recipient::Admin => admin_email.to_string(),
        Recipient::Engineer => engineer?.email.clone(),
    };

    let mut data = json!({
        "requestId": request.id_string(),
        "customerName": request.customer.name,
        "serviceType": request.device.service_type,
        "deviceType": request.device.device_type,
        "modelNumber": request.device.model_number,
        "status": request.status,
    });
    let obj = data.as_object_mut().expect("data is an object");

    if let Some(engineer) = engineer {
        obj.insert("engineerName".into(), json!(engineer.name));
    }

    match kind {
        N::AdminNewBooking | N::StatusUpdate => {
            obj.insert("issueDescription".into(), json!(request.issue_description));
            obj.insert("customerPhone".into(), json!(request.customer.phone));
            obj.insert("customerAddress".into(), json!(request.customer.address));
        }
        N::EngineerAssignment => {
            obj.insert("issueDescription".into(), json!(request.issue_description));
            obj.insert("customerPhone".into(), json!(request.customer.phone));
            obj.insert("customerAddress".into(), json!(request.customer.address));
        }
        N::AdminWorkOnHold | N::CustomerWorkOnHold => {
            obj.insert("holdReason".into(), json!(request.hold_reason));
        }
        N::AdminUnableToComplete => {
            obj.insert("unableReason".into(), json!(request.unable_reason));
        }
        N::RequestCancelled => {
            obj.insert("cancelReason".into(), json!(request.cancel_reason));
        }
        N::RepairCompleted | N::AdminWorkCompleted => {
            if let Some(report) = &request.completion_report {
                obj.insert("workPerformed".into(), json!(report.work_performed()));
                obj.insert("partsUsed".into(), json!(report.parts_used));
            }
            if let Some(payment) = &request.payment {
                obj.insert("amount".into(), json!(payment.amount));
                obj.insert("paymentMethod".into(), json!(payment.method));
            }
        }
        _ => {}
    }

    Some(EmailMessage {
        kind,
        to,
        subject: kind.subject().to_string(),
        data,
    })
}
