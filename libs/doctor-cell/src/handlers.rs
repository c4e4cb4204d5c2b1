// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, DoctorError};
use crate::services::availability::{slots_for_date, upcoming_days};
use crate::services::directory::DoctorDirectory;
use crate::services::doctor::DoctorService;

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct BookingWindowQuery {
    /// Reference date for the rolling window; defaults to the current UTC date.
    pub today: Option<NaiveDate>,
}

fn map_doctor_error(e: DoctorError) -> AppError {
    match e {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::Validation(msg) => AppError::Validation(msg),
        DoctorError::Database(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn list_doctors(
    Extension(directory): Extension<Arc<DoctorDirectory>>,
) -> Result<Json<Value>, AppError> {
    let doctors = directory.fetch_doctors().await.map_err(map_doctor_error)?;

    if doctors.is_empty() {
        return Err(AppError::NotFound("No doctors found".to_string()));
    }

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    Path(doctor_id): Path<Uuid>,
    Extension(directory): Extension<Arc<DoctorDirectory>>,
) -> Result<Json<Value>, AppError> {
    let doctor = directory
        .fetch_doctor_by_id(doctor_id)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .create_doctor(request)
        .await
        .map_err(map_doctor_error)?;

    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

/// Bookable start times for one calendar date, derived from the doctor's
/// weekly template and configured slot duration.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .get_doctor(doctor_id)
        .await
        .map_err(map_doctor_error)?;

    let slots = slots_for_date(
        &doctor.availability,
        query.date,
        doctor.consultation.slot_duration_minutes,
    );
    let total_slots = slots.len();

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": query.date,
        "available_slots": slots,
        "total_slots": total_slots
    })))
}

/// Rolling 7-day booking window. The reference date can be pinned via the
/// `today` query parameter; otherwise the current UTC date is used.
#[axum::debug_handler]
pub async fn get_booking_window(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<BookingWindowQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .get_doctor(doctor_id)
        .await
        .map_err(map_doctor_error)?;

    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let window = upcoming_days(
        &doctor.availability,
        today,
        doctor.consultation.slot_duration_minutes,
    );

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "days": window
    })))
}
