pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export the types other cells work with
pub use models::{
    AvailabilityDay, ConsultationConfig, ConsultationMode, DayOfWeek, Doctor, DoctorError,
    SlotInterval,
};
pub use services::availability::{slots_for_date, upcoming_days, BookableDay};
pub use services::directory::DoctorDirectory;
