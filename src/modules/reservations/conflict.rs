//! Booking-window rules: field formats, window ordering and the overlap test
//! run against the other reservations of the same room and day.

use lazy_static::lazy_static;
use regex::Regex;

use super::model::Reservation;

lazy_static! {
    static ref DATE_FORMAT: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref TIME_FORMAT: Regex = Regex::new(r"^\d{2}:\d{2}:\d{2}$").unwrap();
}

pub fn is_valid_date(value: &str) -> bool {
    DATE_FORMAT.is_match(value)
}

pub fn is_valid_time(value: &str) -> bool {
    TIME_FORMAT.is_match(value)
}

/// The window must start strictly before it ends.
pub fn window_is_ordered(start_time: &str, end_time: &str) -> bool {
    start_time < end_time
}

/// Half-open intervals [s1, e1) and [s2, e2) collide iff s1 < e2 and e1 > s2.
/// Back-to-back windows sharing an endpoint do not collide.
pub fn overlaps(s1: &str, e1: &str, s2: &str, e2: &str) -> bool {
    s1 < e2 && e1 > s2
}

/// Reduce a candidate set to the rows colliding with the given window.
pub fn conflicting<'a>(
    candidates: &'a [Reservation],
    start_time: &str,
    end_time: &str,
) -> Vec<&'a Reservation> {
    candidates
        .iter()
        .filter(|r| overlaps(start_time, end_time, &r.start_time, &r.end_time))
        .collect()
}

/// Occupied windows for the conflict message: "09:00:00 - 10:00:00, ...".
pub fn occupied_ranges(conflicts: &[&Reservation]) -> String {
    conflicts
        .iter()
        .map(|r| format!("{} - {}", r.start_time, r.end_time))
        .collect::<Vec<_>>()
        .join(", ")
}
