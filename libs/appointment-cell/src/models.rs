// libs/appointment-cell/src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use doctor_cell::models::ConsultationMode;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    /// Calendar date of the visit, no time component.
    pub date: NaiveDate,
    /// Display label of the booked slot, e.g. "9:00 AM".
    pub time_slot: String,
    pub consultation_mode: AppointmentMode,
    pub issue: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Canceled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Canceled => write!(f, "canceled"),
        }
    }
}

/// Stored delivery channel of an appointment. Deserialization also accepts
/// the caller-facing template tokens and normalizes them: "InPerson" maps to
/// in-person, anything else (telemedicine or a home visit) to telemedicine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentMode {
    #[serde(rename = "in-person", alias = "InPerson")]
    InPerson,
    #[serde(rename = "telemedicine", alias = "Telemedicine", alias = "HomeVisit")]
    Telemedicine,
}

impl fmt::Display for AppointmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentMode::InPerson => write!(f, "in-person"),
            AppointmentMode::Telemedicine => write!(f, "telemedicine"),
        }
    }
}

impl From<ConsultationMode> for AppointmentMode {
    fn from(mode: ConsultationMode) -> Self {
        match mode {
            ConsultationMode::InPerson => AppointmentMode::InPerson,
            ConsultationMode::Telemedicine | ConsultationMode::HomeVisit => {
                AppointmentMode::Telemedicine
            }
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub consultation_mode: AppointmentMode,
    pub issue: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub status: Option<AppointmentStatus>,
    pub issue: Option<String>,
    pub time_slot: Option<String>,
    pub date: Option<NaiveDate>,
    pub consultation_mode: Option<AppointmentMode>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Time slot is not available for this doctor on the selected date")]
    SlotNotAvailable,

    #[error("Time slot is already booked")]
    SlotTaken,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}
