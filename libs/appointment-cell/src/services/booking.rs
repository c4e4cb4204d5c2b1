// libs/appointment-cell/src/services/booking.rs
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::RecordStoreClient;

use doctor_cell::models::Doctor;
use doctor_cell::services::availability::slots_for_date;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, BookAppointmentRequest,
    UpdateAppointmentRequest,
};

pub struct AppointmentBookingService {
    store: RecordStoreClient,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: RecordStoreClient::new(config),
        }
    }

    /// Validate a booking request against the doctor's derived slot list and
    /// existing appointments, then persist it as a scheduled appointment.
    ///
    /// The slot-membership and double-booking checks run before the insert
    /// but not atomically with it; two concurrent requests for the same slot
    /// can both pass. Closing that race is delegated to a store uniqueness
    /// constraint on (doctor_id, date, time_slot) excluding canceled rows.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "Booking appointment for patient {} with doctor {}",
            request.patient_id, request.doctor_id
        );

        // Step 1: required-field validation, before any store access
        self.validate_booking_request(&request)?;

        // Step 2: the doctor must resolve
        let doctor = self.get_doctor(request.doctor_id).await?;

        // Step 3: the requested slot must be one the template actually derives
        let slots = slots_for_date(
            &doctor.availability,
            request.date,
            doctor.consultation.slot_duration_minutes,
        );
        if !slots.iter().any(|slot| slot == &request.time_slot) {
            warn!(
                "Rejected slot {:?} for doctor {} on {}: not in derived slot list",
                request.time_slot, request.doctor_id, request.date
            );
            return Err(AppointmentError::SlotNotAvailable);
        }

        // Step 4: the slot must not be held by another non-canceled appointment
        let existing = self
            .appointments_for_doctor_on(request.doctor_id, request.date)
            .await?;
        let taken = existing.iter().any(|appointment| {
            appointment.time_slot == request.time_slot
                && appointment.status != AppointmentStatus::Canceled
        });
        if taken {
            warn!(
                "Rejected slot {:?} for doctor {} on {}: already booked",
                request.time_slot, request.doctor_id, request.date
            );
            return Err(AppointmentError::SlotTaken);
        }

        // Step 5: single-document create, status defaults to scheduled
        let now = Utc::now();
        let appointment_data = json!({
            "id": Uuid::new_v4(),
            "patient_id": request.patient_id,
            "doctor_id": request.doctor_id,
            "patient_name": request.patient_name.trim(),
            "date": request.date,
            "time_slot": request.time_slot,
            "consultation_mode": request.consultation_mode,
            "issue": request.issue.trim(),
            "status": AppointmentStatus::Scheduled,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        let appointment: Appointment = self
            .store
            .insert("appointments", appointment_data)
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        info!(
            "Appointment {} booked for {} at {}",
            appointment.id, appointment.date, appointment.time_slot
        );
        Ok(appointment)
    }

    pub async fn get_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment: {}", appointment_id);

        self.store
            .find_by_id("appointments", &appointment_id.to_string())
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Fetching all appointments");

        self.store
            .find("appointments", "order=date.asc")
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))
    }

    pub async fn list_patient_appointments(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Fetching appointments for patient: {}", patient_id);

        self.store
            .find(
                "appointments",
                &format!("patient_id=eq.{}&order=date.asc", patient_id),
            )
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))
    }

    pub async fn list_doctor_appointments(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Fetching appointments for doctor: {}", doctor_id);

        self.store
            .find(
                "appointments",
                &format!("doctor_id=eq.{}&order=date.asc", doctor_id),
            )
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))
    }

    /// Partial update; status transitions are plain field writes with no
    /// state machine, matching the record contract.
    pub async fn update_appointment(
        &self,
        appointment_id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment: {}", appointment_id);

        let mut patch = serde_json::Map::new();
        if let Some(status) = request.status {
            patch.insert("status".to_string(), json!(status));
        }
        if let Some(issue) = request.issue {
            if issue.trim().is_empty() {
                return Err(AppointmentError::Validation(
                    "Issue description cannot be empty".to_string(),
                ));
            }
            patch.insert("issue".to_string(), json!(issue.trim()));
        }
        if let Some(time_slot) = request.time_slot {
            patch.insert("time_slot".to_string(), json!(time_slot));
        }
        if let Some(date) = request.date {
            patch.insert("date".to_string(), json!(date));
        }
        if let Some(mode) = request.consultation_mode {
            patch.insert("consultation_mode".to_string(), json!(mode));
        }
        patch.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        self.store
            .update_by_id("appointments", &appointment_id.to_string(), json!(patch))
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn delete_appointment(&self, appointment_id: Uuid) -> Result<(), AppointmentError> {
        debug!("Deleting appointment: {}", appointment_id);

        let deleted = self
            .store
            .delete_by_id("appointments", &appointment_id.to_string())
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        if !deleted {
            return Err(AppointmentError::NotFound);
        }
        Ok(())
    }

    // Private helpers

    fn validate_booking_request(
        &self,
        request: &BookAppointmentRequest,
    ) -> Result<(), AppointmentError> {
        if request.time_slot.trim().is_empty() {
            return Err(AppointmentError::Validation(
                "A time slot is required".to_string(),
            ));
        }
        if request.issue.trim().is_empty() {
            return Err(AppointmentError::Validation(
                "An issue description is required".to_string(),
            ));
        }
        if request.patient_name.trim().is_empty() {
            return Err(AppointmentError::Validation(
                "Patient name is required".to_string(),
            ));
        }
        Ok(())
    }

    async fn get_doctor(&self, doctor_id: Uuid) -> Result<Doctor, AppointmentError> {
        self.store
            .find_by_id("doctors", &doctor_id.to_string())
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?
            .ok_or(AppointmentError::DoctorNotFound)
    }

    async fn appointments_for_doctor_on(
        &self,
        doctor_id: Uuid,
        date: chrono::NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.store
            .find(
                "appointments",
                &format!("doctor_id=eq.{}&date=eq.{}", doctor_id, date),
            )
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))
    }
}
