use shared_database::InMemoryRecordStore;
use shared_models::DoctorRecord;
use shared_utils::test_utils::TestDoctor;

use doctor_cell::services::DoctorRoster;

fn roster() -> DoctorRoster {
    DoctorRoster::new(vec![
        TestDoctor::surgeon("DOC001", &["Monday"], &[("09:00", "13:00")]),
        TestDoctor::anesthesiologist("DOC002", &["Monday"], &[("08:00", "16:00")]),
        TestDoctor::new("DOC003", "Dr. Priya Nair", "Orthopedic Surgeon", &["Friday"], &[]),
    ])
}

#[test]
fn test_resolves_by_external_or_storage_id() {
    let roster = roster();

    assert_eq!(roster.get("DOC001").map(|d| d.id.as_str()), Some("doc-doc001"));
    assert_eq!(roster.get("doc-doc001").map(|d| d.booking_key()), Some("DOC001"));
    assert_eq!(roster.get(" DOC002 ").map(|d| d.booking_key()), Some("DOC002"));
    assert!(roster.get("DOC404").is_none());
    assert!(roster.get("").is_none());
}

#[test]
fn test_external_id_wins_over_colliding_storage_id() {
    let mut first = TestDoctor::surgeon("DOC001", &["Monday"], &[]);
    first.id = "DOC002".to_string();
    let second = TestDoctor::surgeon("DOC002", &["Tuesday"], &[]);

    let roster = DoctorRoster::new(vec![first, second]);

    assert_eq!(roster.get("DOC002").map(|d| d.booking_key()), Some("DOC002"));
}

#[test]
fn test_doctor_without_external_id_resolves_by_storage_id() {
    let doctor = DoctorRecord {
        id: "f3a9".to_string(),
        doctor_id: None,
        name: "Dr. Legacy".to_string(),
        specialization: "General Surgeon".to_string(),
        department: None,
        qualification: None,
        status: None,
        available_days: vec![],
        time_slots: vec![],
    };
    let roster = DoctorRoster::new(vec![doctor]);

    assert_eq!(roster.name_of("f3a9"), Some("Dr. Legacy"));
}

#[test]
fn test_same_doctor_across_key_kinds() {
    let roster = roster();

    assert!(roster.same_doctor("DOC001", "doc-doc001"));
    assert!(roster.same_doctor("DOC001", "DOC001"));
    assert!(!roster.same_doctor("DOC001", "DOC002"));
    assert!(roster.same_doctor("ghost", "ghost"));
    assert!(!roster.same_doctor("ghost", "DOC001"));
    assert!(!roster.same_doctor("", ""));
}

#[test]
fn test_role_classification() {
    let roster = roster();

    let surgeons: Vec<_> = roster.surgeons().map(|d| d.booking_key()).collect();
    let anesthesiologists: Vec<_> = roster.anesthesiologists().map(|d| d.booking_key()).collect();

    assert_eq!(surgeons, vec!["DOC001", "DOC003"]);
    assert_eq!(anesthesiologists, vec!["DOC002"]);
}

#[test]
fn test_refresh_replaces_snapshot() {
    let mut roster = roster();
    assert_eq!(roster.len(), 3);

    roster.refresh(vec![TestDoctor::surgeon("DOC010", &["Monday"], &[])]);

    assert_eq!(roster.len(), 1);
    assert!(roster.get("DOC001").is_none());
    assert!(roster.get("DOC010").is_some());
}

#[tokio::test]
async fn test_load_from_store() {
    let store = InMemoryRecordStore::with_doctors(vec![TestDoctor::surgeon("DOC001", &["Monday"], &[])]);

    let roster = DoctorRoster::load(&store).await.unwrap();

    assert!(!roster.is_empty());
    assert!(roster.get("DOC001").is_some());
}
