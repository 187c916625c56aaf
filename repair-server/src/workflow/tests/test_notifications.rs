use super::*;

use std::sync::Arc;

use crate::db::repository::EmailLogRepository;
use crate::notify::{build_message, MemoryDispatcher, NotifyService};
use shared::models::SendStatus;

fn drain_messages(rx: &mut mpsc::Receiver<EmailMessage>) -> Vec<EmailMessage> {
    let mut messages = Vec::new();
    while let Ok(message) = rx.try_recv() {
        messages.push(message);
    }
    messages
}

// ========================================================================
// 通知：触发点、收件人、worker 重试与审计日志
// ========================================================================

#[tokio::test]
async fn booking_queues_back_office_alert_and_customer_ack() {
    let (engine, _db, mut rx) = test_engine().await;

    engine.submit_booking(booking_payload()).await.unwrap();
    let kinds = drain_kinds(&mut rx);
    assert_eq!(
        kinds,
        vec![
            NotificationKind::AdminNewBooking,
            NotificationKind::StatusUpdate
        ]
    );
}

#[tokio::test]
async fn confirm_is_silent() {
    let (engine, _db, mut rx) = test_engine().await;

    let request = engine.submit_booking(booking_payload()).await.unwrap();
    drain_kinds(&mut rx);

    engine
        .transition(
            &admin(),
            TransitionInput::new(request.id_string(), RequestStatus::Confirmed),
        )
        .await
        .unwrap();
    assert!(drain_kinds(&mut rx).is_empty());
}

#[tokio::test]
async fn assignment_notifies_the_engineer() {
    let (engine, db, mut rx) = test_engine().await;

    request_at(&engine, &db, RequestStatus::Assigned).await;
    let messages = drain_messages(&mut rx);
    let assignment = messages
        .iter()
        .find(|m| m.kind == NotificationKind::EngineerAssignment)
        .expect("assignment notification should be queued");
    assert_eq!(assignment.to, "ravi@fixpoint.test");
    assert_eq!(assignment.data["customerName"], "Asha Verma");
}

#[tokio::test]
async fn rejection_notifies_the_back_office() {
    let (engine, db, mut rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::Assigned).await;
    drain_messages(&mut rx);

    engine
        .transition(
            &engineer,
            TransitionInput::new(request.id_string(), RequestStatus::Rejected),
        )
        .await
        .unwrap();
    let messages = drain_messages(&mut rx);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, NotificationKind::AdminTaskRejected);
    assert_eq!(messages[0].to, "admin@fixpoint.test");
}

#[tokio::test]
async fn work_start_notifies_admin_and_customer() {
    let (engine, db, mut rx) = test_engine().await;

    request_at(&engine, &db, RequestStatus::InProgress).await;
    let kinds = drain_kinds(&mut rx);
    let tail = &kinds[kinds.len() - 2..];
    assert_eq!(
        tail,
        &[
            NotificationKind::AdminWorkStarted,
            NotificationKind::EngineerStarted
        ]
    );
}

#[tokio::test]
async fn unresolvable_engineer_recipient_drops_message() {
    let (engine, _db, _rx) = test_engine().await;

    // EngineerAssignment without a loaded engineer cannot be addressed
    let request = engine.submit_booking(booking_payload()).await.unwrap();
    let message = build_message(
        NotificationKind::EngineerAssignment,
        &request,
        None,
        "admin@fixpoint.test",
    );
    assert!(message.is_none());
}

#[tokio::test(start_paused = true)]
async fn worker_logs_successful_delivery() {
    let (_engine, db, _unused_rx) = test_engine().await;

    let (service, rx) = NotifyService::new(8);
    let notifier = service.notifier();
    let request = booking_sample(&db).await;
    let message = build_message(
        NotificationKind::AdminNewBooking,
        &request,
        None,
        "admin@fixpoint.test",
    )
    .unwrap();
    notifier.queue(message);
    drop(service);
    drop(notifier);

    let dispatcher = Arc::new(MemoryDispatcher::new());
    let logs = EmailLogRepository::new(db.clone());
    NotifyService::run_worker(rx, dispatcher.clone(), logs.clone(), 3).await;

    assert_eq!(dispatcher.sent().len(), 1);
    let records = logs.recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sent_status, SendStatus::Sent);
    assert_eq!(records[0].attempts, 1);
    assert!(records[0].error.is_none());
}

#[tokio::test(start_paused = true)]
async fn worker_retries_then_succeeds() {
    let (_engine, db, _unused_rx) = test_engine().await;

    let (service, rx) = NotifyService::new(8);
    let notifier = service.notifier();
    let request = booking_sample(&db).await;
    let message = build_message(
        NotificationKind::StatusUpdate,
        &request,
        None,
        "admin@fixpoint.test",
    )
    .unwrap();
    notifier.queue(message);
    drop(service);
    drop(notifier);

    let dispatcher = Arc::new(MemoryDispatcher::new());
    dispatcher.fail_next(2);
    let logs = EmailLogRepository::new(db.clone());
    NotifyService::run_worker(rx, dispatcher.clone(), logs.clone(), 3).await;

    assert_eq!(dispatcher.sent().len(), 1);
    let records = logs.recent(10).await.unwrap();
    assert_eq!(records[0].sent_status, SendStatus::Sent);
    assert_eq!(records[0].attempts, 3);
}

#[tokio::test(start_paused = true)]
async fn worker_records_exhausted_failure() {
    let (_engine, db, _unused_rx) = test_engine().await;

    let (service, rx) = NotifyService::new(8);
    let notifier = service.notifier();
    let request = booking_sample(&db).await;
    let message = build_message(
        NotificationKind::StatusUpdate,
        &request,
        None,
        "admin@fixpoint.test",
    )
    .unwrap();
    notifier.queue(message);
    drop(service);
    drop(notifier);

    let dispatcher = Arc::new(MemoryDispatcher::new());
    dispatcher.fail_next(10);
    let logs = EmailLogRepository::new(db.clone());
    NotifyService::run_worker(rx, dispatcher.clone(), logs.clone(), 3).await;

    assert!(dispatcher.sent().is_empty());
    let records = logs.recent(10).await.unwrap();
    assert_eq!(records[0].sent_status, SendStatus::Failed);
    assert_eq!(records[0].attempts, 3);
    assert!(records[0].error.is_some());
}

async fn booking_sample(db: &Surreal<Db>) -> RepairRequest {
    let repo = crate::db::repository::RepairRequestRepository::new(db.clone());
    let payload = booking_payload();
    repo.create(
        payload.customer(),
        payload.device(),
        payload.issue_description.clone(),
    )
    .await
    .unwrap()
}
