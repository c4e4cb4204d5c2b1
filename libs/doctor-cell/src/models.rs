// libs/doctor-cell/src/models.rs
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// AVAILABILITY TEMPLATE
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One open interval within a day. Times are zero-padded 24-hour "HH:mm"
/// strings, so lexicographic order equals chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInterval {
    pub start: String,
    pub end: String,
}

impl SlotInterval {
    pub fn is_valid(&self) -> bool {
        matches!(
            (parse_hhmm(&self.start), parse_hhmm(&self.end)),
            (Some(start), Some(end)) if start < end
        )
    }
}

/// Parse an "HH:mm" time string into minutes since midnight.
pub fn parse_hhmm(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityDay {
    pub day: DayOfWeek,
    #[serde(default = "default_is_available")]
    pub is_available: bool,
    #[serde(default)]
    pub slots: Vec<SlotInterval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_is_available() -> bool {
    true
}

/// Default weekly template: Monday through Friday open with no intervals
/// configured yet, weekend closed.
pub fn default_week() -> Vec<AvailabilityDay> {
    use DayOfWeek::*;
    [Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday]
        .into_iter()
        .map(|day| AvailabilityDay {
            day,
            is_available: !matches!(day, Sunday | Saturday),
            slots: Vec::new(),
            notes: None,
        })
        .collect()
}

// ==============================================================================
// CONSULTATION CONFIG
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsultationMode {
    InPerson,
    Telemedicine,
    HomeVisit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationConfig {
    #[serde(default)]
    pub fee: f64,
    #[serde(default = "default_slot_duration")]
    pub slot_duration_minutes: i32,
    #[serde(default = "default_modes")]
    pub modes: Vec<ConsultationMode>,
}

fn default_slot_duration() -> i32 {
    15
}

fn default_modes() -> Vec<ConsultationMode> {
    vec![ConsultationMode::InPerson]
}

impl Default for ConsultationConfig {
    fn default() -> Self {
        Self {
            fee: 0.0,
            slot_duration_minutes: default_slot_duration(),
            modes: default_modes(),
        }
    }
}

// ==============================================================================
// DOCTOR RECORD
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    pub last: String,
}

impl PersonName {
    pub fn full_name(&self) -> String {
        match &self.middle {
            Some(middle) => format!("{} {} {}", self.first, middle, self.last),
            None => format!("{} {}", self.first, self.last),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: PersonName,
    pub email: String,
    pub phone: String,
    pub specialization: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub years_of_experience: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub hospital_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default = "default_week")]
    pub availability: Vec<AvailabilityDay>,
    #[serde(default)]
    pub consultation: ConsultationConfig,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_is_active() -> bool {
    true
}

impl Doctor {
    pub fn full_name(&self) -> String {
        self.name.full_name()
    }

    /// Whether the doctor has an open interval covering the given "HH:mm"
    /// time on the given weekday.
    pub fn is_available_at(&self, day: DayOfWeek, time_hhmm: &str) -> bool {
        if parse_hhmm(time_hhmm).is_none() {
            return false;
        }
        let Some(entry) = self.availability.iter().find(|d| d.day == day) else {
            return false;
        };
        if !entry.is_available {
            return false;
        }
        entry
            .slots
            .iter()
            .any(|s| s.start.as_str() <= time_hhmm && time_hhmm < s.end.as_str())
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: PersonName,
    pub email: String,
    pub phone: String,
    pub specialization: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    pub registration_number: Option<String>,
    #[serde(default)]
    pub years_of_experience: i32,
    pub department: Option<String>,
    pub hospital_id: Uuid,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub availability: Option<Vec<AvailabilityDay>>,
    pub consultation: Option<ConsultationConfig>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}
