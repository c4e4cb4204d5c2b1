// libs/doctor-cell/tests/directory_test.rs
use assert_matches::assert_matches;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::models::DoctorError;
use doctor_cell::services::directory::DoctorDirectory;
use shared_config::AppConfig;

fn test_config(store_url: &str) -> AppConfig {
    AppConfig {
        database_url: store_url.to_string(),
        database_api_key: "test-key".to_string(),
        port: 0,
    }
}

fn doctor_fixture(id: Uuid) -> serde_json::Value {
    json!({
        "id": id,
        "name": { "first": "Asha", "last": "Verma" },
        "email": "asha.verma@example.com",
        "phone": "+1-555-0100",
        "specialization": ["Cardiology"],
        "hospital_id": Uuid::new_v4(),
        "created_at": Utc::now().to_rfc3339(),
        "updated_at": Utc::now().to_rfc3339()
    })
}

#[tokio::test]
async fn fetch_doctors_refreshes_the_snapshot() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("order", "created_at.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([doctor_fixture(doctor_id)])))
        .mount(&mock_server)
        .await;

    let directory = DoctorDirectory::new(&test_config(&mock_server.uri()));

    // Nothing cached before the first fetch
    assert!(directory.doctors().await.is_empty());

    let fetched = directory.fetch_doctors().await.unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, doctor_id);

    // The cached snapshot now matches what was fetched
    let snapshot = directory.doctors().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].full_name(), "Asha Verma");
}

#[tokio::test]
async fn snapshots_are_owned_copies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([doctor_fixture(Uuid::new_v4())])),
        )
        .mount(&mock_server)
        .await;

    let directory = DoctorDirectory::new(&test_config(&mock_server.uri()));
    directory.fetch_doctors().await.unwrap();

    let mut snapshot = directory.doctors().await;
    snapshot.clear();

    // Mutating the returned value must not affect the container's state
    assert_eq!(directory.doctors().await.len(), 1);
}

#[tokio::test]
async fn fetch_doctor_by_id_tracks_the_selection() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([doctor_fixture(doctor_id)])))
        .mount(&mock_server)
        .await;

    let directory = DoctorDirectory::new(&test_config(&mock_server.uri()));

    assert!(directory.selected_doctor().await.is_none());

    let doctor = directory.fetch_doctor_by_id(doctor_id).await.unwrap();
    assert_eq!(doctor.id, doctor_id);
    assert_eq!(
        directory.selected_doctor().await.map(|d| d.id),
        Some(doctor_id)
    );

    directory.clear_selected_doctor().await;
    assert!(directory.selected_doctor().await.is_none());

    // Clearing the selection leaves the doctor list untouched
    assert!(directory.doctors().await.is_empty());
}

#[tokio::test]
async fn unknown_doctor_id_is_not_found() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let directory = DoctorDirectory::new(&test_config(&mock_server.uri()));

    let result = directory.fetch_doctor_by_id(doctor_id).await;
    assert_matches!(result, Err(DoctorError::NotFound));
    assert!(directory.selected_doctor().await.is_none());
}
