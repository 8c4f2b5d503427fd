use std::sync::Arc;

use assert_matches::assert_matches;

use ot_schedule_cell::models::{ScheduleCandidate, ScheduleError};
use ot_schedule_cell::services::{EditSession, SchedulingService, SessionState};
use shared_database::InMemoryRecordStore;
use shared_utils::test_utils::{monday, TestDoctor, TestSchedule};

async fn service() -> (Arc<InMemoryRecordStore>, SchedulingService) {
    let store = Arc::new(InMemoryRecordStore::with_doctors(vec![TestDoctor::surgeon(
        "DOC001",
        &["Monday"],
        &[("09:00", "13:00")],
    )]));
    store
        .insert_schedule(TestSchedule::new("s1", "DOC001", "OT-1", monday(), "10:00", "11:00"))
        .await;
    let service = SchedulingService::new(store.clone());
    (store, service)
}

#[tokio::test]
async fn test_edit_then_submit_updates_in_place() {
    let (store, service) = service().await;
    let mut session = EditSession::new(&service);

    let mut form = session.begin_edit("s1").await.unwrap();
    assert_eq!(session.state(), &SessionState::Editing { schedule_id: "s1".to_string() });
    assert_eq!(form.start_time.as_deref(), Some("10:00"));

    form.end_time = Some("11:30".to_string());
    let accepted = session.submit(&form).await.unwrap();

    assert!(accepted.updated);
    assert_eq!(session.state(), &SessionState::Committed { schedule_id: "s1".to_string() });
    assert_eq!(store.schedule_count().await, 1);
}

#[tokio::test]
async fn test_rejection_keeps_editing() {
    let (_, service) = service().await;
    let mut session = EditSession::new(&service);

    let mut form = session.begin_edit("s1").await.unwrap();
    form.start_time = Some("07:00".to_string());

    assert_matches!(session.submit(&form).await, Err(ScheduleError::Rejected(_)));
    assert_eq!(session.editing_id(), Some("s1"));
}

#[tokio::test]
async fn test_cancel_returns_to_new_booking() {
    let (store, service) = service().await;
    let mut session = EditSession::new(&service);

    session.begin_edit("s1").await.unwrap();
    session.cancel();
    assert_eq!(session.state(), &SessionState::Idle);

    let form = ScheduleCandidate::new("Biopsy", monday(), "11:00", "12:00", "OT-2", "DOC001");
    let accepted = session.submit(&form).await.unwrap();

    assert!(!accepted.updated);
    assert_ne!(accepted.id, "s1");
    assert_eq!(store.schedule_count().await, 2);
}

#[tokio::test]
async fn test_begin_edit_unknown_schedule() {
    let (_, service) = service().await;
    let mut session = EditSession::new(&service);

    assert_matches!(session.begin_edit("nope").await, Err(ScheduleError::NotFound(_)));
    assert_eq!(session.state(), &SessionState::Idle);
}
