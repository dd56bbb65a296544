//! Per-patient date-shift offset derivation and date shifting
//!
//! The offset is a pure function of the patient id: a stable hash reduced
//! modulo the offset range and re-centered to be signed. Identical input
//! always yields identical output with no dependency on call order, prior
//! state, or process lifetime, which is what makes date-shift consistency
//! possible without a persisted offset table.

use crate::domain::ids::PatientId;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat};
use sha2::{Digest, Sha256};

/// Default half-width of the symmetric offset range, in days
pub const DEFAULT_OFFSET_RANGE_DAYS: i64 = 365;

/// Largest accepted half-width (ten years). Keeps shifted dates
/// clinically plausible and `2 * range + 1` far from overflow.
pub const MAX_OFFSET_RANGE_DAYS: i64 = 3650;

/// Derive the day offset for a patient within `[-range_days, +range_days]`
///
/// Stateless and lock-free; safe to call from any number of concurrent
/// callers. Idempotent across process restarts by construction.
pub fn offset_days_in(patient_id: &PatientId, range_days: i64) -> i64 {
    debug_assert!(range_days > 0);
    let digest = Sha256::digest(patient_id.as_str().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let hash = u64::from_be_bytes(prefix);

    let span = (2 * range_days + 1) as u64;
    (hash % span) as i64 - range_days
}

/// Derive the day offset for a patient within the default +/-365 day range
pub fn offset_days(patient_id: &PatientId) -> i64 {
    offset_days_in(patient_id, DEFAULT_OFFSET_RANGE_DAYS)
}

/// Shift a FHIR date or dateTime string by a number of days
///
/// The output format mirrors the input format exactly: date-only values
/// stay date-only, time-of-day and timezone are preserved, and a trailing
/// `Z` stays a `Z` rather than becoming `+00:00`. Values the engine cannot
/// shift faithfully - unparsable strings, and year or year-month precision
/// dates where a day shift has no meaning - return `None` so the caller
/// can leave the original in place and record a warning.
pub fn shift_temporal(value: &str, days: i64) -> Option<String> {
    // Date-only: YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let shifted = date + Duration::days(days);
        return Some(shifted.format("%Y-%m-%d").to_string());
    }

    // Full dateTime with timezone (RFC 3339)
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        let shifted = datetime + Duration::days(days);
        let seconds = if value.contains('.') {
            SecondsFormat::Millis
        } else {
            SecondsFormat::Secs
        };
        let use_z = value.ends_with('Z') || value.ends_with('z');
        return Some(shifted.to_rfc3339_opts(seconds, use_z));
    }

    // Local dateTime without timezone
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        let shifted = naive + Duration::days(days);
        return Some(shifted.format("%Y-%m-%dT%H:%M:%S").to_string());
    }

    None
}
