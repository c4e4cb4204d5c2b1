// libs/hospital-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateHospitalRequest, GeoPoint, HospitalError};
use crate::services::hospital::HospitalService;

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lng: f64,
    pub lat: f64,
    pub max_distance: Option<f64>,
    pub limit: Option<usize>,
}

fn map_hospital_error(e: HospitalError) -> AppError {
    match e {
        HospitalError::NotFound => AppError::NotFound("Hospital not found".to_string()),
        HospitalError::Validation(msg) => AppError::Validation(msg),
        HospitalError::Database(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn list_hospitals(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let hospital_service = HospitalService::new(&state);

    let hospitals = hospital_service
        .list_hospitals()
        .await
        .map_err(map_hospital_error)?;

    if hospitals.is_empty() {
        return Err(AppError::NotFound("No hospitals found".to_string()));
    }

    Ok(Json(json!(hospitals)))
}

#[axum::debug_handler]
pub async fn get_hospital(
    State(state): State<Arc<AppConfig>>,
    Path(hospital_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let hospital_service = HospitalService::new(&state);

    let hospital = hospital_service
        .get_hospital(hospital_id)
        .await
        .map_err(map_hospital_error)?;

    Ok(Json(json!(hospital)))
}

#[axum::debug_handler]
pub async fn create_hospital(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateHospitalRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let hospital_service = HospitalService::new(&state);

    let hospital = hospital_service
        .create_hospital(request)
        .await
        .map_err(map_hospital_error)?;

    Ok((StatusCode::CREATED, Json(json!(hospital))))
}

#[axum::debug_handler]
pub async fn find_nearby_hospitals(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Value>, AppError> {
    let hospital_service = HospitalService::new(&state);

    let point = GeoPoint {
        lng: query.lng,
        lat: query.lat,
    };
    let nearby = hospital_service
        .find_nearby(point, query.max_distance, query.limit)
        .await
        .map_err(map_hospital_error)?;

    Ok(Json(json!(nearby)))
}
