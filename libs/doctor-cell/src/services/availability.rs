// libs/doctor-cell/src/services/availability.rs
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{parse_hhmm, AvailabilityDay, DayOfWeek};

/// Length of the rolling booking window offered to patients, in days.
pub const BOOKING_WINDOW_DAYS: i64 = 7;

/// One calendar day of the booking window, with the slots a patient can pick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookableDay {
    pub date: NaiveDate,
    pub day: DayOfWeek,
    pub is_available: bool,
    pub slots: Vec<String>,
}

/// Derive the bookable start times for one calendar date from a doctor's
/// weekly availability template.
///
/// The date is mapped to its weekday; a day whose template entry is missing
/// or has `is_available == false` yields no slots regardless of its interval
/// contents. Intervals are walked in listed order and divided into
/// `slot_duration_minutes` chunks; a chunk is emitted only when it fits
/// entirely inside the interval. Pure and deterministic: identical inputs
/// produce identical output.
pub fn slots_for_date(
    availability: &[AvailabilityDay],
    date: NaiveDate,
    slot_duration_minutes: i32,
) -> Vec<String> {
    let day = DayOfWeek::of(date);
    match availability
        .iter()
        .find(|entry| entry.day == day && entry.is_available)
    {
        Some(entry) => slots_for_day(entry, slot_duration_minutes),
        None => Vec::new(),
    }
}

/// Derive the bookable start times for a single template day.
pub fn slots_for_day(day: &AvailabilityDay, slot_duration_minutes: i32) -> Vec<String> {
    if !day.is_available || slot_duration_minutes <= 0 {
        return Vec::new();
    }

    let duration = slot_duration_minutes as u32;
    let mut slots = Vec::new();

    for interval in &day.slots {
        let (start, end) = match (parse_hhmm(&interval.start), parse_hhmm(&interval.end)) {
            (Some(start), Some(end)) => (start, end),
            // Malformed endpoints yield no slots for that interval
            _ => continue,
        };

        let mut current = start;
        while current + duration <= end {
            slots.push(format_slot_label(current));
            current += duration;
        }
    }

    slots
}

/// Render minutes-since-midnight as a 12-hour clock label, e.g. "9:00 AM".
/// Hours 0 and 12 both display as "12"; minutes are zero-padded.
pub fn format_slot_label(minutes_since_midnight: u32) -> String {
    let hours = minutes_since_midnight / 60;
    let minutes = minutes_since_midnight % 60;
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if hours >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", display_hours, minutes, meridiem)
}

/// Build the rolling booking window starting at an explicit reference date.
///
/// `today` is an input rather than a wall-clock read so callers control the
/// time zone and tests are reproducible.
pub fn upcoming_days(
    availability: &[AvailabilityDay],
    today: NaiveDate,
    slot_duration_minutes: i32,
) -> Vec<BookableDay> {
    (0..BOOKING_WINDOW_DAYS)
        .map(|offset| {
            let date = today + Duration::days(offset);
            let day = DayOfWeek::of(date);
            let entry = availability
                .iter()
                .find(|entry| entry.day == day && entry.is_available);
            BookableDay {
                date,
                day,
                is_available: entry.is_some(),
                slots: entry
                    .map(|entry| slots_for_day(entry, slot_duration_minutes))
                    .unwrap_or_default(),
            }
        })
        .collect()
}
