use super::*;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc;

use crate::db::DbService;
use crate::db::repository::EngineerRepository;
use crate::notify::NotifyService;
use shared::models::repair_request::BookingCreate;
use shared::models::{
    Actor, EmailMessage, Engineer, EngineerCreate, NotificationKind, RepairRequest, RequestStatus,
};

// ========================================================================
// Helpers: in-memory engine, seed data, notification draining
// ========================================================================

async fn test_engine() -> (WorkflowEngine, Surreal<Db>, mpsc::Receiver<EmailMessage>) {
    let db = DbService::open_in_memory()
        .await
        .expect("in-memory db should open")
        .db;
    let (service, rx) = NotifyService::new(64);
    let engine = WorkflowEngine::new(db.clone(), service.notifier(), "admin@fixpoint.test");
    (engine, db, rx)
}

fn admin() -> Actor {
    Actor::admin("admin:root")
}

fn booking_payload() -> BookingCreate {
    BookingCreate {
        customer_name: "Asha Verma".to_string(),
        customer_email: "asha@example.com".to_string(),
        customer_phone: "+91 98765 43210".to_string(),
        customer_address: "12 MG Road, Pune".to_string(),
        service_type: "in_home".to_string(),
        device_type: "Washing Machine".to_string(),
        model_number: "WM-2040".to_string(),
        issue_description: "Drum does not spin".to_string(),
    }
}

async fn create_engineer(db: &Surreal<Db>) -> Engineer {
    let repo = EngineerRepository::new(db.clone());
    repo.create(EngineerCreate {
        name: "Ravi Kumar".to_string(),
        email: "ravi@fixpoint.test".to_string(),
        phone: "+91 90000 00001".to_string(),
        specialization: "Appliances".to_string(),
    })
    .await
    .expect("engineer create should succeed")
}

/// Create a booking and walk it to the given status. Returns
/// (request, engineer actor) — the engineer is assigned from
/// `assigned` onwards.
async fn request_at(
    engine: &WorkflowEngine,
    db: &Surreal<Db>,
    status: RequestStatus,
) -> (RepairRequest, Actor) {
    let request = engine
        .submit_booking(booking_payload())
        .await
        .expect("booking should succeed");
    let id = request.id_string();
    let engineer = create_engineer(db).await;
    let engineer_actor = Actor::engineer(engineer.id_string());

    let steps: &[RequestStatus] = match status {
        RequestStatus::Pending => &[],
        RequestStatus::Confirmed => &[RequestStatus::Confirmed],
        RequestStatus::Assigned => &[RequestStatus::Confirmed, RequestStatus::Assigned],
        RequestStatus::Accepted => &[
            RequestStatus::Confirmed,
            RequestStatus::Assigned,
            RequestStatus::Accepted,
        ],
        RequestStatus::InProgress => &[
            RequestStatus::Confirmed,
            RequestStatus::Assigned,
            RequestStatus::Accepted,
            RequestStatus::InProgress,
        ],
        other => panic!("request_at does not support seeding {}", other),
    };

    let mut current = request;
    for &step in steps {
        current = match step {
            RequestStatus::Assigned => engine
                .assign(&admin(), &id, &engineer.id_string())
                .await
                .expect("assign should succeed"),
            RequestStatus::Confirmed => engine
                .transition(&admin(), TransitionInput::new(&id, step))
                .await
                .expect("confirm should succeed"),
            _ => engine
                .transition(&engineer_actor, TransitionInput::new(&id, step))
                .await
                .unwrap_or_else(|e| panic!("step to {} failed: {}", step, e)),
        };
    }
    (current, engineer_actor)
}

/// Drain everything currently queued, returning the kinds in order
fn drain_kinds(rx: &mut mpsc::Receiver<EmailMessage>) -> Vec<NotificationKind> {
    let mut kinds = Vec::new();
    while let Ok(message) = rx.try_recv() {
        kinds.push(message.kind);
    }
    kinds
}

mod test_completion;
mod test_concurrency;
mod test_notifications;
