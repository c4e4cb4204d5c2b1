// libs/hospital-cell/tests/hospital_test.rs
use assert_matches::assert_matches;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hospital_cell::models::{GeoPoint, HospitalError};
use hospital_cell::services::hospital::{distance_meters, HospitalService};
use shared_config::AppConfig;

fn test_config(store_url: &str) -> AppConfig {
    AppConfig {
        database_url: store_url.to_string(),
        database_api_key: "test-key".to_string(),
        port: 0,
    }
}

fn hospital_fixture(name: &str, lng: f64, lat: f64) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "name": name,
        "address": "12 Ring Road",
        "phone": "+1-555-0199",
        "location": { "lng": lng, "lat": lat },
        "created_at": Utc::now().to_rfc3339(),
        "updated_at": Utc::now().to_rfc3339()
    })
}

#[test]
fn haversine_distance_is_zero_for_identical_points() {
    let point = GeoPoint {
        lng: 77.2090,
        lat: 28.6139,
    };
    assert!(distance_meters(point, point) < 1.0);
}

#[test]
fn haversine_distance_matches_known_scale() {
    // One hundredth of a degree of latitude is roughly 1.1 km
    let a = GeoPoint {
        lng: 77.2090,
        lat: 28.6139,
    };
    let b = GeoPoint {
        lng: 77.2090,
        lat: 28.6239,
    };
    let d = distance_meters(a, b);
    assert!((1_000.0..1_300.0).contains(&d), "distance was {}", d);
}

#[tokio::test]
async fn nearby_filters_by_distance_and_sorts_nearest_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/hospitals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            hospital_fixture("Far City Hospital", 78.2090, 28.6139),
            hospital_fixture("District Clinic", 77.2090, 28.6239),
            hospital_fixture("Central Hospital", 77.2090, 28.6139),
        ])))
        .mount(&mock_server)
        .await;

    let service = HospitalService::new(&test_config(&mock_server.uri()));
    let nearby = service
        .find_nearby(
            GeoPoint {
                lng: 77.2090,
                lat: 28.6139,
            },
            Some(5_000.0),
            None,
        )
        .await
        .unwrap();

    let names: Vec<&str> = nearby
        .iter()
        .map(|entry| entry.hospital.name.as_str())
        .collect();
    assert_eq!(names, vec!["Central Hospital", "District Clinic"]);
    assert!(nearby[0].distance_meters < nearby[1].distance_meters);
}

#[tokio::test]
async fn nearby_respects_the_result_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/hospitals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            hospital_fixture("A", 77.2090, 28.6139),
            hospital_fixture("B", 77.2091, 28.6139),
            hospital_fixture("C", 77.2092, 28.6139),
        ])))
        .mount(&mock_server)
        .await;

    let service = HospitalService::new(&test_config(&mock_server.uri()));
    let nearby = service
        .find_nearby(
            GeoPoint {
                lng: 77.2090,
                lat: 28.6139,
            },
            Some(5_000.0),
            Some(2),
        )
        .await
        .unwrap();

    assert_eq!(nearby.len(), 2);
}

#[tokio::test]
async fn unknown_hospital_is_not_found() {
    let mock_server = MockServer::start().await;
    let hospital_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/hospitals"))
        .and(query_param("id", format!("eq.{}", hospital_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = HospitalService::new(&test_config(&mock_server.uri()));
    let result = service.get_hospital(hospital_id).await;

    assert_matches!(result, Err(HospitalError::NotFound));
}

#[tokio::test]
async fn create_rejects_out_of_range_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/hospitals"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = HospitalService::new(&test_config(&mock_server.uri()));
    let request = serde_json::from_value(json!({
        "name": "Central Hospital",
        "address": "12 Ring Road",
        "phone": "+1-555-0199",
        "location": { "lng": 200.0, "lat": 28.6139 }
    }))
    .unwrap();

    let result = service.create_hospital(request).await;
    assert_matches!(result, Err(HospitalError::Validation(_)));
}
