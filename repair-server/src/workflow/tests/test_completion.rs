use super::*;

use shared::models::repair_request::PaymentMethod;

fn completion_input(id: &str) -> CompletionInput {
    CompletionInput {
        booking_id: id.to_string(),
        problem: "Worn drive belt".to_string(),
        solution: "Replaced belt and recalibrated drum".to_string(),
        parts_used: Some("Drive belt WM-2040".to_string()),
        proof_images: vec!["/api/uploads/abc123.jpg".to_string()],
    }
}

fn cash_payment(id: &str, amount: f64) -> PaymentInput {
    PaymentInput {
        booking_id: id.to_string(),
        method: PaymentMethod::Cash,
        amount,
        upi_transaction_id: None,
    }
}

// ========================================================================
// 完工两阶段：报告先行、收款收尾、70/30 分成
// ========================================================================

#[tokio::test]
async fn report_then_payment_completes_request() {
    let (engine, db, _rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::InProgress).await;
    let id = request.id_string();

    let reported = engine
        .save_completion_report(&engineer, completion_input(&id))
        .await
        .unwrap();
    // Phase 1 leaves the request recoverable
    assert_eq!(reported.status, RequestStatus::InProgress);
    let report = reported.completion_report.as_ref().unwrap();
    assert_eq!(report.problem, "Worn drive belt");
    assert_eq!(report.proof_images.len(), 1);

    let completed = engine
        .record_payment(&engineer, cash_payment(&id, 1000.0))
        .await
        .unwrap();
    assert_eq!(completed.status, RequestStatus::Completed);
    let payment = completed.payment.as_ref().unwrap();
    assert_eq!(payment.amount, 1000.0);
    assert_eq!(payment.company_share, 700.0);
    assert_eq!(payment.engineer_share, 300.0);
}

#[tokio::test]
async fn payment_before_report_is_rejected() {
    let (engine, db, _rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::InProgress).await;
    let err = engine
        .record_payment(&engineer, cash_payment(&request.id_string(), 500.0))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::MissingField("completion report")));
}

#[tokio::test]
async fn report_requires_problem_solution_and_proof() {
    let (engine, db, _rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::InProgress).await;
    let id = request.id_string();

    let mut input = completion_input(&id);
    input.problem = " ".to_string();
    let err = engine
        .save_completion_report(&engineer, input)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::MissingField("problem")));

    let mut input = completion_input(&id);
    input.proof_images.clear();
    let err = engine
        .save_completion_report(&engineer, input)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::MissingField("proofImages")));
}

#[tokio::test]
async fn report_outside_in_progress_is_rejected() {
    let (engine, db, _rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::Assigned).await;
    let err = engine
        .save_completion_report(&engineer, completion_input(&request.id_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
}

#[tokio::test]
async fn payment_amount_must_be_positive() {
    let (engine, db, _rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::InProgress).await;
    let id = request.id_string();
    engine
        .save_completion_report(&engineer, completion_input(&id))
        .await
        .unwrap();

    let err = engine
        .record_payment(&engineer, cash_payment(&id, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidAmount(_)));
}

#[tokio::test]
async fn payment_amount_outside_decimal_range_is_rejected() {
    let (engine, db, _rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::InProgress).await;
    let id = request.id_string();
    engine
        .save_completion_report(&engineer, completion_input(&id))
        .await
        .unwrap();

    // Amounts Decimal cannot represent must never slip through as a
    // zero/zero split on a completed request
    for amount in [1e30, f64::NAN, f64::INFINITY] {
        let err = engine
            .record_payment(&engineer, cash_payment(&id, amount))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidAmount(_)));
    }

    let stored = engine.requests.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::InProgress);
    assert!(stored.payment.is_none());
}

#[tokio::test]
async fn upi_payment_requires_transaction_id() {
    let (engine, db, _rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::InProgress).await;
    let id = request.id_string();
    engine
        .save_completion_report(&engineer, completion_input(&id))
        .await
        .unwrap();

    let missing = PaymentInput {
        booking_id: id.clone(),
        method: PaymentMethod::Upi,
        amount: 850.0,
        upi_transaction_id: None,
    };
    let err = engine.record_payment(&engineer, missing).await.unwrap_err();
    assert!(matches!(err, WorkflowError::MissingField("upiTransactionId")));

    let ok = PaymentInput {
        booking_id: id.clone(),
        method: PaymentMethod::Upi,
        amount: 850.0,
        upi_transaction_id: Some("UPI-2026-000123".to_string()),
    };
    let completed = engine.record_payment(&engineer, ok).await.unwrap();
    assert_eq!(completed.status, RequestStatus::Completed);
    assert_eq!(
        completed
            .payment
            .as_ref()
            .unwrap()
            .upi_transaction_id
            .as_deref(),
        Some("UPI-2026-000123")
    );
}

#[tokio::test]
async fn only_assigned_engineer_can_complete() {
    let (engine, db, _rx) = test_engine().await;

    let (request, _assigned) = request_at(&engine, &db, RequestStatus::InProgress).await;
    let intruder = Actor::engineer("engineer:intruder");
    let err = engine
        .save_completion_report(&intruder, completion_input(&request.id_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Forbidden(_)));
}

#[tokio::test]
async fn completed_request_is_terminal() {
    let (engine, db, _rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::InProgress).await;
    let id = request.id_string();
    engine
        .save_completion_report(&engineer, completion_input(&id))
        .await
        .unwrap();
    engine
        .record_payment(&engineer, cash_payment(&id, 1200.0))
        .await
        .unwrap();

    let mut hold = TransitionInput::new(&id, RequestStatus::HoldOnWork);
    hold.hold_reason = Some("too late".to_string());
    let err = engine.transition(&engineer, hold).await.unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
}

#[tokio::test]
async fn share_split_sums_to_amount_on_awkward_values() {
    let (engine, db, _rx) = test_engine().await;

    let (request, engineer) = request_at(&engine, &db, RequestStatus::InProgress).await;
    let id = request.id_string();
    engine
        .save_completion_report(&engineer, completion_input(&id))
        .await
        .unwrap();

    let completed = engine
        .record_payment(&engineer, cash_payment(&id, 999.99))
        .await
        .unwrap();
    let payment = completed.payment.as_ref().unwrap();
    assert_eq!(payment.company_share, 699.99);
    assert_eq!(payment.engineer_share, 300.0);
}
