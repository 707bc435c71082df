// ✅ Data Quality Engine
// Per-record checks on normalized shelter records + a batch summary.
// Findings are reported, never fixed: the pipeline shows the data as loaded.

use crate::record::ShelterRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub rule_name: String,
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationResult {
    pub fn pass(rule_name: &str, field: &str) -> Self {
        ValidationResult {
            passed: true,
            rule_name: rule_name.to_string(),
            field: field.to_string(),
            message: String::new(),
            severity: Severity::Info,
        }
    }

    pub fn fail(rule_name: &str, field: &str, message: &str, severity: Severity) -> Self {
        ValidationResult {
            passed: false,
            rule_name: rule_name.to_string(),
            field: field.to_string(),
            message: message.to_string(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,     // Missing nice-to-have data
    Warning,  // Questionable data, still shown
    Critical, // Record drops out of most views
}

// ============================================================================
// QUALITY REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub ingest_index: usize,
    pub animal_id: Option<String>,
    pub validations: Vec<ValidationResult>,
}

impl QualityReport {
    pub fn issues(&self) -> impl Iterator<Item = &ValidationResult> {
        self.validations.iter().filter(|v| !v.passed)
    }

    /// Worst severity among failed checks
    pub fn worst_severity(&self) -> Option<Severity> {
        self.issues().map(|v| v.severity).max()
    }

    pub fn is_clean(&self) -> bool {
        self.issues().next().is_none()
    }

    pub fn has_critical_issues(&self) -> bool {
        self.worst_severity() == Some(Severity::Critical)
    }

    pub fn summary(&self) -> String {
        let issues: Vec<String> = self
            .issues()
            .map(|v| format!("{} ({:?})", v.message, v.severity))
            .collect();
        format!(
            "Record {}: {}",
            self.animal_id.as_deref().unwrap_or("?"),
            if issues.is_empty() {
                "clean".to_string()
            } else {
                issues.join("; ")
            }
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_records: usize,
    pub clean_count: usize,
    pub warning_count: usize,
    pub critical_count: usize,
    /// Failed checks per field
    pub issues_by_field: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} records: {} clean, {} with warnings, {} critical",
            self.total_records, self.clean_count, self.warning_count, self.critical_count
        )
    }
}

// ============================================================================
// DATA QUALITY ENGINE
// ============================================================================

pub struct DataQualityEngine {
    /// Valid latitude/longitude bounds
    max_latitude: f64,
    max_longitude: f64,
}

impl Default for DataQualityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DataQualityEngine {
    pub fn new() -> Self {
        DataQualityEngine {
            max_latitude: 90.0,
            max_longitude: 180.0,
        }
    }

    /// Validate a record and generate quality report
    pub fn validate(&self, record: &ShelterRecord) -> QualityReport {
        let validations = vec![
            // Rule 1: Intake date present
            self.validate_intake_date(record),
            // Rule 2: Animal type present
            self.validate_animal_type(record),
            // Rule 3: Outcome not before intake
            self.validate_duration(record),
            // Rule 4: Born before intake
            self.validate_dob(record),
            // Rule 5: Coordinates present and in range
            self.validate_coordinates(record),
            // Rule 6: Zip code present
            self.validate_zip_code(record),
        ];

        QualityReport {
            ingest_index: record.ingest_index,
            animal_id: record.animal_id.clone(),
            validations,
        }
    }

    /// Batch validate multiple records
    pub fn validate_batch(&self, records: &[ShelterRecord]) -> Vec<QualityReport> {
        records.iter().map(|r| self.validate(r)).collect()
    }

    /// Generate summary statistics for batch validation
    pub fn batch_summary(&self, reports: &[QualityReport]) -> BatchSummary {
        let mut summary = BatchSummary {
            total_records: reports.len(),
            ..BatchSummary::default()
        };

        for report in reports {
            match report.worst_severity() {
                None | Some(Severity::Info) => summary.clean_count += 1,
                Some(Severity::Warning) => summary.warning_count += 1,
                Some(Severity::Critical) => summary.critical_count += 1,
            }
            for issue in report.issues() {
                *summary.issues_by_field.entry(issue.field.clone()).or_insert(0) += 1;
            }
        }

        summary
    }

    // ========================================================================
    // VALIDATION RULES
    // ========================================================================

    fn validate_intake_date(&self, record: &ShelterRecord) -> ValidationResult {
        if record.intake_date.is_some() {
            return ValidationResult::pass("intake_date_present", "IntakeDate");
        }

        ValidationResult::fail(
            "intake_date_missing",
            "IntakeDate",
            "Intake date missing or unparseable",
            Severity::Critical,
        )
    }

    fn validate_animal_type(&self, record: &ShelterRecord) -> ValidationResult {
        if record.animal_type.is_some() {
            return ValidationResult::pass("animal_type_present", "AnimalType");
        }

        ValidationResult::fail(
            "animal_type_missing",
            "AnimalType",
            "Animal type missing",
            Severity::Warning,
        )
    }

    fn validate_duration(&self, record: &ShelterRecord) -> ValidationResult {
        match record.days_in_shelter {
            Some(days) if days < 0 => ValidationResult::fail(
                "outcome_before_intake",
                "OutcomeDate",
                &format!("Outcome is {} day(s) before intake", -days),
                Severity::Warning,
            ),
            _ => ValidationResult::pass("outcome_after_intake", "OutcomeDate"),
        }
    }

    fn validate_dob(&self, record: &ShelterRecord) -> ValidationResult {
        match (record.dob, record.intake_date) {
            (Some(dob), Some(intake)) if dob.date() > intake.date() => ValidationResult::fail(
                "born_after_intake",
                "DOB",
                "Date of birth is after intake",
                Severity::Warning,
            ),
            _ => ValidationResult::pass("dob_consistent", "DOB"),
        }
    }

    fn validate_coordinates(&self, record: &ShelterRecord) -> ValidationResult {
        let Some((lat, lon)) = record.coordinates() else {
            return ValidationResult::fail(
                "coordinates_missing",
                "Location",
                "No coordinates; record is not shown on the map",
                Severity::Info,
            );
        };

        if lat.abs() > self.max_latitude || lon.abs() > self.max_longitude {
            return ValidationResult::fail(
                "coordinates_out_of_range",
                "Location",
                &format!("Coordinates out of range: ({}, {})", lat, lon),
                Severity::Warning,
            );
        }

        ValidationResult::pass("coordinates_valid", "Location")
    }

    fn validate_zip_code(&self, record: &ShelterRecord) -> ValidationResult {
        if record.zip_code.is_some() {
            return ValidationResult::pass("zip_code_present", "ZipCode");
        }

        ValidationResult::fail(
            "zip_code_missing",
            "ZipCode",
            "Zip code missing; open case is not assigned to a zone",
            Severity::Info,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_records;
    use crate::record::RawRecord;

    fn create_valid_raw() -> RawRecord {
        RawRecord::new("A1")
            .with_animal_type("Dog")
            .with_intake_date("2023-01-10")
            .with_outcome_date("2023-01-20")
            .with_dob("2021-05-01")
            .with_zip_code("95112")
            .with_location(37.3, -121.8)
    }

    fn validate_one(raw: RawRecord) -> QualityReport {
        let records = normalize_records(vec![raw]).0;
        DataQualityEngine::new().validate(&records[0])
    }

    #[test]
    fn test_validate_clean_record() {
        let report = validate_one(create_valid_raw());

        assert!(report.is_clean());
        assert!(!report.has_critical_issues());
        assert_eq!(report.summary(), "Record A1: clean");
    }

    #[test]
    fn test_validate_missing_intake_date_is_critical() {
        let mut raw = create_valid_raw();
        raw.intake_date = Some("bogus".to_string());

        let report = validate_one(raw);

        assert!(report.has_critical_issues());
        assert!(report.issues().any(|i| i.field == "IntakeDate"));
    }

    #[test]
    fn test_validate_outcome_before_intake() {
        let raw = create_valid_raw().with_outcome_date("2023-01-05");

        let report = validate_one(raw);

        assert_eq!(report.worst_severity(), Some(Severity::Warning));
        assert!(report.issues().any(|i| i.rule_name == "outcome_before_intake"));
    }

    #[test]
    fn test_validate_dob_after_intake() {
        let raw = create_valid_raw().with_dob("2023-06-01");

        let report = validate_one(raw);

        assert!(report.issues().any(|i| i.field == "DOB"));
    }

    #[test]
    fn test_validate_coordinates() {
        let missing = validate_one(RawRecord {
            latitude: None,
            ..create_valid_raw()
        });
        assert_eq!(missing.worst_severity(), Some(Severity::Info));

        let out_of_range = validate_one(create_valid_raw().with_location(137.3, -121.8));
        assert!(out_of_range.issues().any(|i| i.rule_name == "coordinates_out_of_range"));
    }

    #[test]
    fn test_batch_summary() {
        let rows = vec![
            create_valid_raw(),
            RawRecord {
                zip_code: None,
                ..create_valid_raw()
            },
            create_valid_raw().with_outcome_date("2022-12-31"),
            RawRecord::new("A4"),
        ];
        let records = normalize_records(rows).0;
        let engine = DataQualityEngine::new();

        let reports = engine.validate_batch(&records);
        let summary = engine.batch_summary(&reports);

        assert_eq!(summary.total_records, 4);
        // Info-only findings still count as clean
        assert_eq!(summary.clean_count, 2);
        assert_eq!(summary.warning_count, 1);
        assert_eq!(summary.critical_count, 1);
        assert_eq!(summary.issues_by_field.get("ZipCode"), Some(&2));
        assert!(summary.summary().starts_with("4 records"));
    }
}
