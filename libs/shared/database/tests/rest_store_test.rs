use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_database::rest::RestClient;
use shared_database::{RecordStore, RestRecordStore, ScheduleFilter, StoreError};
use shared_utils::test_utils::{monday, MockStoreResponses, TestConfig, TestSchedule};

async fn store_for(server: &MockServer) -> RestRecordStore {
    RestRecordStore::new(&TestConfig::with_url(server.uri()).to_app_config()).unwrap()
}

#[tokio::test]
async fn test_list_doctors_sends_api_key_and_parses_documents() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(header("apikey", "test-api-key"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::doctor_document("DOC001", "Dr. Meera Rao", "General Surgeon"),
            MockStoreResponses::doctor_document("DOC002", "Dr. Anil Kumar", "Anesthesiologist"),
        ])))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server).await;
    let doctors = store.list_doctors().await.unwrap();

    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0].booking_key(), "DOC001");
    assert!(doctors[1].is_anesthesiologist());
}

#[tokio::test]
async fn test_list_schedules_filters_by_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .and(query_param("date", "eq.2024-06-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::schedule_document("s-1", "DOC001", "2024-06-03", "10:00", "11:00"),
        ])))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server).await;
    let schedules = store.list_schedules(&ScheduleFilter::on(monday())).await.unwrap();

    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].id, "s-1");
    assert_eq!(schedules[0].time_range(), "10:00-11:00");
    assert!(schedules[0].created_at.is_some());
}

#[tokio::test]
async fn test_store_failure_is_an_error_not_an_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server).await;
    let result = store.list_schedules(&ScheduleFilter::on(monday())).await;

    assert_matches!(result, Err(StoreError::Backend(msg)) if msg.contains("503"));
}

#[tokio::test]
async fn test_legacy_schedule_documents_do_not_break_the_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .and(query_param("date", "eq.2024-06-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::schedule_document("s-1", "DOC001", "2024-06-03", "10:00", "11:00"),
            {
                "id": "legacy",
                "date": "2024-06-03",
                "start": "09:00",
                "end": "10:00",
                "ot": "OT-1",
                "surgeon": "DOC009"
            },
        ])))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server).await;
    let schedules = store.list_schedules(&ScheduleFilter::on(monday())).await.unwrap();

    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[1].id, "legacy");
    assert_eq!(schedules[1].start_time, "");
    assert_eq!(schedules[1].surgeon_id, "");
}

#[tokio::test]
async fn test_malformed_documents_are_decode_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "s-1", "date": "not-a-date" }])))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server).await;
    let result = store.list_schedules(&ScheduleFilter::default()).await;

    assert_matches!(result, Err(StoreError::Decode(_)));
}

#[tokio::test]
async fn test_create_schedule_returns_store_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/schedules"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(json!({
            "doctorId": "DOC001",
            "otName": "OT-1",
            "createdAt": "2024-06-01T09:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::schedule_document("new-42", "DOC001", "2024-06-03", "10:00", "11:00"),
        ])))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server).await;
    let mut draft = TestSchedule::new("ignored", "DOC001", "OT-1", monday(), "10:00", "11:00").to_draft();
    draft.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());

    let id = store.create_schedule(&draft).await.unwrap();
    assert_eq!(id, "new-42");
}

#[tokio::test]
async fn test_update_of_missing_schedule_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/schedules"))
        .and(query_param("id", "eq.gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server).await;
    let draft = TestSchedule::new("gone", "DOC001", "OT-1", monday(), "10:00", "11:00").to_draft();

    let result = store.update_schedule("gone", &draft).await;
    assert_matches!(result, Err(StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_schedule() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/schedules"))
        .and(query_param("id", "eq.s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::schedule_document("s-1", "DOC001", "2024-06-03", "10:00", "11:00"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server).await;
    store.delete_schedule("s-1").await.unwrap();
}

#[test]
fn test_rest_client_trims_trailing_slash() {
    let config = TestConfig::with_url("https://store.example.com/").to_app_config();
    let client = RestClient::new(&config).unwrap();
    assert_eq!(client.base_url(), "https://store.example.com");
}
