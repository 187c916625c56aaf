use super::*;

use crate::db::repository::RepairRequestRepository;

// ========================================================================
// 并发：版本 CAS 与同请求串行化
// ========================================================================

#[tokio::test]
async fn stale_version_write_is_dropped() {
    let (engine, db, _rx) = test_engine().await;

    let (request, _) = request_at(&engine, &db, RequestStatus::Confirmed).await;
    let repo = RepairRequestRepository::new(db.clone());

    // Another writer advances the record first
    engine
        .transition(
            &admin(),
            TransitionInput::new(request.id_string(), RequestStatus::Cancelled),
        )
        .await
        .unwrap_err(); // missing reason, record untouched

    let mut cancel = TransitionInput::new(request.id_string(), RequestStatus::Cancelled);
    cancel.cancel_reason = Some("stale test".to_string());
    let advanced = engine.transition(&admin(), cancel).await.unwrap();
    assert_eq!(advanced.version, request.version + 1);

    // A write carrying the old version must miss the guard
    let mut stale = request.clone();
    stale.status = RequestStatus::Assigned;
    let result = repo
        .update_guarded(stale.id.as_ref().unwrap(), request.version, &stale)
        .await
        .unwrap();
    assert!(result.is_none());

    // And the stored record still reflects the winning write
    let stored = repo
        .find_by_id(&request.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RequestStatus::Cancelled);
}

#[tokio::test]
async fn concurrent_transitions_serialize_per_request() {
    let (engine, db, _rx) = test_engine().await;

    let (request, _) = request_at(&engine, &db, RequestStatus::Pending).await;
    let id = request.id_string();
    let engine = std::sync::Arc::new(engine);

    let a = {
        let engine = engine.clone();
        let id = id.clone();
        tokio::spawn(async move {
            engine
                .transition(&admin(), TransitionInput::new(id, RequestStatus::Confirmed))
                .await
        })
    };
    let b = {
        let engine = engine.clone();
        let id = id.clone();
        tokio::spawn(async move {
            engine
                .transition(&admin(), TransitionInput::new(id, RequestStatus::Confirmed))
                .await
        })
    };

    let (a, b) = (a.await.unwrap(), b.await.unwrap());
    // Exactly one confirm wins; the loser sees confirmed -> confirmed
    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(
        loser.unwrap_err(),
        WorkflowError::InvalidTransition {
            from: RequestStatus::Confirmed,
            to: RequestStatus::Confirmed,
        }
    ));

    let repo = RepairRequestRepository::new(db.clone());
    let stored = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Confirmed);
    assert_eq!(stored.version, 1);
}
