// libs/patient-cell/src/services/patient.rs
use chrono::Utc;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::RecordStoreClient;

use crate::models::{CreatePatientRequest, Patient, PatientError};

pub struct PatientService {
    store: RecordStoreClient,
}

impl PatientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: RecordStoreClient::new(config),
        }
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        debug!("Fetching all patients");

        self.store
            .find("patients", "order=last_name.asc,first_name.asc")
            .await
            .map_err(|e| PatientError::Database(e.to_string()))
    }

    pub async fn get_patient(&self, patient_id: Uuid) -> Result<Patient, PatientError> {
        debug!("Fetching patient: {}", patient_id);

        self.store
            .find_by_id("patients", &patient_id.to_string())
            .await
            .map_err(|e| PatientError::Database(e.to_string()))?
            .ok_or(PatientError::NotFound)
    }

    pub async fn create_patient(
        &self,
        request: CreatePatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!(
            "Creating patient {} {}",
            request.first_name, request.last_name
        );

        if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
            return Err(PatientError::Validation(
                "First and last name are required".to_string(),
            ));
        }

        let now = Utc::now();
        let patient_data = json!({
            "id": Uuid::new_v4(),
            "first_name": request.first_name.trim(),
            "middle_name": request.middle_name,
            "last_name": request.last_name.trim(),
            "dob": request.dob,
            "gender": request.gender,
            "blood_type": request.blood_type,
            "contact": request.contact,
            "address": request.address,
            "allergies": request.allergies,
            "chronic_conditions": request.chronic_conditions,
            "medications": request.medications,
            "immunizations": request.immunizations,
            "height_cm": request.height_cm,
            "weight_kg": request.weight_kg,
            "emergency_contact": request.emergency_contact,
            "is_active": true,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        self.store
            .insert("patients", patient_data)
            .await
            .map_err(|e| PatientError::Database(e.to_string()))
    }
}
