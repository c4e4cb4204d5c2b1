// libs/doctor-cell/src/services/doctor.rs
use chrono::Utc;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::RecordStoreClient;

use crate::models::{
    AvailabilityDay, ConsultationConfig, CreateDoctorRequest, Doctor, DoctorError,
};

pub struct DoctorService {
    store: RecordStoreClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: RecordStoreClient::new(config),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        debug!("Fetching all doctors");

        self.store
            .find("doctors", "order=created_at.asc")
            .await
            .map_err(|e| DoctorError::Database(e.to_string()))
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor: {}", doctor_id);

        self.store
            .find_by_id("doctors", &doctor_id.to_string())
            .await
            .map_err(|e| DoctorError::Database(e.to_string()))?
            .ok_or(DoctorError::NotFound)
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        debug!("Creating doctor {}", request.name.full_name());

        if request.specialization.is_empty() {
            return Err(DoctorError::Validation(
                "At least one specialization is required".to_string(),
            ));
        }

        let availability = request.availability.unwrap_or_else(crate::models::default_week);
        validate_availability(&availability)?;

        let consultation = request.consultation.unwrap_or_default();
        validate_consultation(&consultation)?;

        let now = Utc::now();
        let doctor_data = json!({
            "id": Uuid::new_v4(),
            "name": request.name,
            "email": request.email,
            "phone": request.phone,
            "specialization": request.specialization,
            "qualifications": request.qualifications,
            "registration_number": request.registration_number,
            "years_of_experience": request.years_of_experience,
            "department": request.department,
            "hospital_id": request.hospital_id,
            "profile_picture": request.profile_picture,
            "bio": request.bio,
            "languages": request.languages,
            "availability": availability,
            "consultation": consultation,
            "is_active": true,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        let doctor: Doctor = self
            .store
            .insert("doctors", doctor_data)
            .await
            .map_err(|e| DoctorError::Database(e.to_string()))?;

        debug!("Doctor created with ID: {}", doctor.id);
        Ok(doctor)
    }

}

/// A template must cover each weekday exactly once, and every configured
/// interval must be a well-formed "HH:mm" range with start before end.
/// Overlap between intervals of the same day is deliberately not rejected.
fn validate_availability(days: &[AvailabilityDay]) -> Result<(), DoctorError> {
    if days.len() != 7 {
        return Err(DoctorError::Validation(
            "Availability must cover all 7 days of the week".to_string(),
        ));
    }

    for (index, entry) in days.iter().enumerate() {
        if days[..index].iter().any(|other| other.day == entry.day) {
            return Err(DoctorError::Validation(format!(
                "Duplicate availability entry for {}",
                entry.day
            )));
        }
        for interval in &entry.slots {
            if !interval.is_valid() {
                return Err(DoctorError::Validation(format!(
                    "Invalid interval {}-{} on {}",
                    interval.start, interval.end, entry.day
                )));
            }
        }
    }

    Ok(())
}

fn validate_consultation(config: &ConsultationConfig) -> Result<(), DoctorError> {
    if config.fee < 0.0 {
        return Err(DoctorError::Validation(
            "Consultation fee cannot be negative".to_string(),
        ));
    }
    if config.slot_duration_minutes < 5 {
        return Err(DoctorError::Validation(
            "Slot duration must be at least 5 minutes".to_string(),
        ));
    }
    if config.modes.is_empty() {
        return Err(DoctorError::Validation(
            "At least one consultation mode is required".to_string(),
        ));
    }
    Ok(())
}
