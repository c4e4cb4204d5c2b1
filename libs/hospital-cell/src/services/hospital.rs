// libs/hospital-cell/src/services/hospital.rs
use chrono::Utc;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::RecordStoreClient;

use crate::models::{CreateHospitalRequest, GeoPoint, Hospital, HospitalError, NearbyHospital};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
const DEFAULT_MAX_DISTANCE_METERS: f64 = 5_000.0;
const DEFAULT_NEARBY_LIMIT: usize = 10;

pub struct HospitalService {
    store: RecordStoreClient,
}

impl HospitalService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: RecordStoreClient::new(config),
        }
    }

    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>, HospitalError> {
        debug!("Fetching all hospitals");

        self.store
            .find("hospitals", "order=created_at.asc")
            .await
            .map_err(|e| HospitalError::Database(e.to_string()))
    }

    pub async fn get_hospital(&self, hospital_id: Uuid) -> Result<Hospital, HospitalError> {
        debug!("Fetching hospital: {}", hospital_id);

        self.store
            .find_by_id("hospitals", &hospital_id.to_string())
            .await
            .map_err(|e| HospitalError::Database(e.to_string()))?
            .ok_or(HospitalError::NotFound)
    }

    pub async fn create_hospital(
        &self,
        request: CreateHospitalRequest,
    ) -> Result<Hospital, HospitalError> {
        debug!("Creating hospital {}", request.name);

        if request.name.trim().is_empty() {
            return Err(HospitalError::Validation(
                "Hospital name is required".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&request.location.lng)
            || !(-90.0..=90.0).contains(&request.location.lat)
        {
            return Err(HospitalError::Validation(
                "location must be valid lng/lat coordinates".to_string(),
            ));
        }

        let now = Utc::now();
        let hospital_data = json!({
            "id": Uuid::new_v4(),
            "name": request.name.trim(),
            "address": request.address,
            "phone": request.phone,
            "email": request.email,
            "image": request.image,
            "description": request.description,
            "services": request.services,
            "beds": request.beds,
            "rating": request.rating,
            "open_hours": request.open_hours,
            "emergency": request.emergency,
            "contact_person": request.contact_person,
            "location": request.location,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        self.store
            .insert("hospitals", hospital_data)
            .await
            .map_err(|e| HospitalError::Database(e.to_string()))
    }

    /// Hospitals within `max_distance` meters of a point, nearest first.
    pub async fn find_nearby(
        &self,
        point: GeoPoint,
        max_distance: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Vec<NearbyHospital>, HospitalError> {
        let max_distance = max_distance.unwrap_or(DEFAULT_MAX_DISTANCE_METERS);
        let limit = limit.unwrap_or(DEFAULT_NEARBY_LIMIT);

        let hospitals = self.list_hospitals().await?;

        let mut nearby: Vec<NearbyHospital> = hospitals
            .into_iter()
            .map(|hospital| {
                let distance_meters = distance_meters(point, hospital.location);
                NearbyHospital {
                    hospital,
                    distance_meters,
                }
            })
            .filter(|entry| entry.distance_meters <= max_distance)
            .collect();

        nearby.sort_by(|a, b| {
            a.distance_meters
                .partial_cmp(&b.distance_meters)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        nearby.truncate(limit);

        debug!("Found {} hospitals within {}m", nearby.len(), max_distance);
        Ok(nearby)
    }
}

/// Great-circle distance between two points (haversine).
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}
