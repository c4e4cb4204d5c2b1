// libs/doctor-cell/src/services/directory.rs
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;

use crate::models::{Doctor, DoctorError};
use crate::services::doctor::DoctorService;

/// Explicit state container for the doctor listing shared across request
/// handlers. Accessors hand out owned snapshots, never references into the
/// cached state, so callers cannot observe or cause partial mutation.
pub struct DoctorDirectory {
    service: DoctorService,
    state: RwLock<DirectoryState>,
}

#[derive(Default)]
struct DirectoryState {
    doctors: Vec<Doctor>,
    selected: Option<Doctor>,
}

impl DoctorDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            service: DoctorService::new(config),
            state: RwLock::new(DirectoryState::default()),
        }
    }

    /// Snapshot of the last fetched doctor list without touching the store.
    pub async fn doctors(&self) -> Vec<Doctor> {
        self.state.read().await.doctors.clone()
    }

    /// Snapshot of the most recently fetched single doctor, if any.
    pub async fn selected_doctor(&self) -> Option<Doctor> {
        self.state.read().await.selected.clone()
    }

    /// Refresh the cached doctor list from the store and return a snapshot.
    pub async fn fetch_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        let doctors = self.service.list_doctors().await?;
        debug!("Directory refreshed with {} doctors", doctors.len());

        let mut state = self.state.write().await;
        state.doctors = doctors.clone();
        Ok(doctors)
    }

    /// Fetch one doctor from the store, remember it as the selection, and
    /// return an owned copy.
    pub async fn fetch_doctor_by_id(&self, doctor_id: Uuid) -> Result<Doctor, DoctorError> {
        let doctor = self.service.get_doctor(doctor_id).await?;

        let mut state = self.state.write().await;
        state.selected = Some(doctor.clone());
        Ok(doctor)
    }

    pub async fn clear_selected_doctor(&self) {
        self.state.write().await.selected = None;
    }
}
