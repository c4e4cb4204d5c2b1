use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use doctor_cell::DoctorDirectory;
use hospital_cell::router::hospital_routes;
use patient_cell::router::patient_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>, directory: Arc<DoctorDirectory>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hospital Management API is running!" }))
        .nest("/api/hospitals", hospital_routes(state.clone()))
        .nest("/api/doctors", doctor_routes(state.clone()))
        .nest("/api/patients", patient_routes(state.clone()))
        .nest("/api/appointments", appointment_routes(state.clone()))
        .layer(Extension(directory))
}
