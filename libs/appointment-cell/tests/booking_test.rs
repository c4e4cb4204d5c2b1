// libs/appointment-cell/tests/booking_test.rs
use assert_matches::assert_matches;
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::models::{
    AppointmentError, AppointmentMode, AppointmentStatus, BookAppointmentRequest,
};
use appointment_cell::services::booking::AppointmentBookingService;
use shared_config::AppConfig;

fn test_config(store_url: &str) -> AppConfig {
    AppConfig {
        database_url: store_url.to_string(),
        database_api_key: "test-key".to_string(),
        port: 0,
    }
}

// 2025-06-02 is a Monday
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

/// Doctor open Mondays 09:00-17:00 with 30-minute slots.
fn doctor_fixture(doctor_id: Uuid) -> Value {
    json!({
        "id": doctor_id,
        "name": { "first": "Asha", "last": "Verma" },
        "email": "asha.verma@example.com",
        "phone": "+1-555-0100",
        "specialization": ["Cardiology"],
        "hospital_id": Uuid::new_v4(),
        "availability": [
            { "day": "Monday", "is_available": true,
              "slots": [{ "start": "09:00", "end": "17:00" }] }
        ],
        "consultation": { "fee": 50.0, "slot_duration_minutes": 30, "modes": ["InPerson", "Telemedicine"] },
        "created_at": Utc::now().to_rfc3339(),
        "updated_at": Utc::now().to_rfc3339()
    })
}

fn stored_appointment(doctor_id: Uuid, time_slot: &str, status: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "patient_id": Uuid::new_v4(),
        "doctor_id": doctor_id,
        "patient_name": "Rohan Mehta",
        "date": monday(),
        "time_slot": time_slot,
        "consultation_mode": "in-person",
        "issue": "Chest pain during exercise",
        "status": status,
        "created_at": Utc::now().to_rfc3339(),
        "updated_at": Utc::now().to_rfc3339()
    })
}

fn booking_request(doctor_id: Uuid, time_slot: &str, issue: &str) -> BookAppointmentRequest {
    BookAppointmentRequest {
        doctor_id,
        patient_id: Uuid::new_v4(),
        patient_name: "Rohan Mehta".to_string(),
        date: monday(),
        time_slot: time_slot.to_string(),
        consultation_mode: AppointmentMode::InPerson,
        issue: issue.to_string(),
    }
}

async fn mock_doctor_lookup(server: &MockServer, doctor_id: Uuid) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([doctor_fixture(doctor_id)])))
        .mount(server)
        .await;
}

async fn mock_existing_appointments(server: &MockServer, doctor_id: Uuid, rows: Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("doctor_id", format!("eq.{}", doctor_id)))
        .and(query_param("date", format!("eq.{}", monday())))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

#[tokio::test]
async fn valid_booking_creates_one_scheduled_appointment() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    mock_doctor_lookup(&mock_server, doctor_id).await;
    mock_existing_appointments(&mock_server, doctor_id, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([stored_appointment(doctor_id, "9:00 AM", "scheduled")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&test_config(&mock_server.uri()));
    let appointment = service
        .book_appointment(booking_request(doctor_id, "9:00 AM", "Chest pain during exercise"))
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.consultation_mode, AppointmentMode::InPerson);
    assert_eq!(appointment.time_slot, "9:00 AM");
}

#[tokio::test]
async fn missing_issue_is_rejected_before_any_store_access() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    // The request must be rejected without touching the store at all
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&test_config(&mock_server.uri()));
    let result = service
        .book_appointment(booking_request(doctor_id, "9:00 AM", "   "))
        .await;

    assert_matches!(result, Err(AppointmentError::Validation(_)));
}

#[tokio::test]
async fn slot_outside_the_derived_list_is_rejected() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    mock_doctor_lookup(&mock_server, doctor_id).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&test_config(&mock_server.uri()));

    // 8:00 AM is before the doctor's 09:00 opening
    let result = service
        .book_appointment(booking_request(doctor_id, "8:00 AM", "Persistent cough"))
        .await;

    assert_matches!(result, Err(AppointmentError::SlotNotAvailable));
}

#[tokio::test]
async fn occupied_slot_is_rejected() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    mock_doctor_lookup(&mock_server, doctor_id).await;
    mock_existing_appointments(
        &mock_server,
        doctor_id,
        json!([stored_appointment(doctor_id, "9:00 AM", "scheduled")]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&test_config(&mock_server.uri()));
    let result = service
        .book_appointment(booking_request(doctor_id, "9:00 AM", "Routine follow up"))
        .await;

    assert_matches!(result, Err(AppointmentError::SlotTaken));
}

#[tokio::test]
async fn canceled_appointment_frees_its_slot() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    mock_doctor_lookup(&mock_server, doctor_id).await;
    mock_existing_appointments(
        &mock_server,
        doctor_id,
        json!([stored_appointment(doctor_id, "9:00 AM", "canceled")]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([stored_appointment(doctor_id, "9:00 AM", "scheduled")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&test_config(&mock_server.uri()));
    let appointment = service
        .book_appointment(booking_request(doctor_id, "9:00 AM", "Routine follow up"))
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
}

#[tokio::test]
async fn booking_on_a_closed_day_is_rejected() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    let mut doctor = doctor_fixture(doctor_id);
    doctor["availability"][0]["is_available"] = json!(false);

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([doctor])))
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&test_config(&mock_server.uri()));
    let result = service
        .book_appointment(booking_request(doctor_id, "9:00 AM", "Back pain"))
        .await;

    assert_matches!(result, Err(AppointmentError::SlotNotAvailable));
}

#[tokio::test]
async fn unknown_doctor_is_rejected() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&test_config(&mock_server.uri()));
    let result = service
        .book_appointment(booking_request(doctor_id, "9:00 AM", "Headaches"))
        .await;

    assert_matches!(result, Err(AppointmentError::DoctorNotFound));
}
