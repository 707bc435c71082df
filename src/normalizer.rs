// 🧹 Field Normalizer
// Warehouse text → typed ShelterRecord, plus IntakeMonth and DaysInShelter
//
// Nothing here fails: a value that doesn't parse becomes None and is counted
// in the NormalizationReport so the loader can log it.

use crate::record::{RawRecord, ShelterRecord};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// TIMESTAMP PARSING
// ============================================================================

/// Timestamp formats tried in order (after RFC 3339)
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Timestamp formats carrying a UTC offset
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Date-only formats (midnight is assumed)
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Spellings of "no value" that are not parse failures
const NULL_MARKERS: &[&str] = &["nat", "nan", "null", "none"];

/// Outcome of parsing one optional field
#[derive(Debug, Clone, Copy, PartialEq)]
enum Parsed<T> {
    Value(T),
    Missing,
    Invalid,
}

impl<T> Parsed<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Parsed::Value(v) => Some(v),
            Parsed::Missing | Parsed::Invalid => None,
        }
    }
}

/// Parse a warehouse timestamp. Offsets are converted to UTC wall time.
///
/// Returns None for blanks, null markers and anything unparseable.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    parse_timestamp_field(Some(value)).into_option()
}

fn parse_timestamp_field(value: Option<&str>) -> Parsed<NaiveDateTime> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() && !is_null_marker(v) => v,
        _ => return Parsed::Missing,
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Parsed::Value(dt.naive_utc());
    }

    // BigQuery CSV exports write "2023-01-05 10:00:00 UTC"
    let value = value.strip_suffix(" UTC").unwrap_or(value);

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Parsed::Value(dt.naive_utc());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Parsed::Value(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Parsed::Value(date.and_time(NaiveTime::MIN));
        }
    }

    Parsed::Invalid
}

fn parse_coordinate_field(value: Option<&str>) -> Parsed<f64> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() && !is_null_marker(v) => v,
        _ => return Parsed::Missing,
    };

    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Parsed::Value(v),
        _ => Parsed::Invalid,
    }
}

fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS.iter().any(|m| value.eq_ignore_ascii_case(m))
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// DERIVED FIELDS
// ============================================================================

/// First day of the month containing `timestamp`
pub fn month_bucket(timestamp: NaiveDateTime) -> Option<NaiveDate> {
    timestamp.date().with_day(1)
}

/// Whole calendar days between intake and outcome
///
/// None when either side is missing. Negative when the outcome precedes the
/// intake; the quality pass reports those.
pub fn days_between(intake: Option<NaiveDateTime>, outcome: Option<NaiveDateTime>) -> Option<i64> {
    let (intake, outcome) = (intake?, outcome?);
    Some((outcome.date() - intake.date()).num_days())
}

// ============================================================================
// NORMALIZATION REPORT
// ============================================================================

/// Per-field count of values that were present but could not be parsed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub records: usize,
    pub parse_failures: BTreeMap<String, usize>,
}

impl NormalizationReport {
    pub fn total_failures(&self) -> usize {
        self.parse_failures.values().sum()
    }

    pub fn failures_for(&self, field: &str) -> usize {
        self.parse_failures.get(field).copied().unwrap_or(0)
    }

    fn record_failure(&mut self, field: &str) {
        *self.parse_failures.entry(field.to_string()).or_insert(0) += 1;
    }

    fn track<T>(&mut self, field: &str, parsed: Parsed<T>) -> Option<T> {
        if let Parsed::Invalid = parsed {
            self.record_failure(field);
        }
        parsed.into_option()
    }
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// Normalize one row. `ingest_index` is its position in the warehouse result.
pub fn normalize_record(
    ingest_index: usize,
    raw: RawRecord,
    report: &mut NormalizationReport,
) -> ShelterRecord {
    report.records += 1;

    let intake_date = report.track("IntakeDate", parse_timestamp_field(raw.intake_date.as_deref()));
    let outcome_date = report.track("OutcomeDate", parse_timestamp_field(raw.outcome_date.as_deref()));
    let last_update = report.track("LastUpdate", parse_timestamp_field(raw.last_update.as_deref()));
    let dob = report.track("DOB", parse_timestamp_field(raw.dob.as_deref()));
    let latitude = report.track("Latitude", parse_coordinate_field(raw.latitude.as_deref()));
    let longitude = report.track("Longitude", parse_coordinate_field(raw.longitude.as_deref()));

    ShelterRecord {
        ingest_index,
        animal_id: clean_text(raw.animal_id),
        animal_type: clean_text(raw.animal_type),
        sex: clean_text(raw.sex),
        intake_condition: clean_text(raw.intake_condition),
        intake_date,
        outcome_date,
        last_update,
        dob,
        zip_code: clean_text(raw.zip_code),
        latitude,
        longitude,
        intake_month: intake_date.and_then(month_bucket),
        days_in_shelter: days_between(intake_date, outcome_date),
    }
}

/// Normalize a whole result set, keeping warehouse order
pub fn normalize_records(raw: Vec<RawRecord>) -> (Vec<ShelterRecord>, NormalizationReport) {
    let mut report = NormalizationReport::default();
    let records = raw
        .into_iter()
        .enumerate()
        .map(|(index, row)| normalize_record(index, row, &mut report))
        .collect();

    (records, report)
}
