// 🗄️ Record Store
// Loaded once per session, read-only afterwards

use crate::filter::FilterOptions;
use crate::normalizer::{normalize_records, NormalizationReport};
use crate::record::{RawRecord, ShelterRecord};
use crate::warehouse::RecordSource;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RecordStore {
    source_name: String,
    records: Vec<ShelterRecord>,
    report: NormalizationReport,
}

impl RecordStore {
    /// Normalize rows that were already fetched
    pub fn from_raw(source_name: &str, rows: Vec<RawRecord>) -> Self {
        let (records, report) = normalize_records(rows);
        RecordStore {
            source_name: source_name.to_string(),
            records,
            report,
        }
    }

    /// Fetch from the session's source and normalize
    pub fn load(source: &mut dyn RecordSource, limit: usize) -> Result<Self> {
        let name = source.name().to_string();
        let rows = source
            .fetch(limit)
            .with_context(|| format!("Failed to load records from {}", name))?;

        let store = Self::from_raw(&name, rows);
        info!("Loaded {} records from {}", store.len(), name);

        for (field, count) in &store.report.parse_failures {
            warn!("{} value(s) in {} could not be parsed and were treated as missing", count, field);
        }

        Ok(store)
    }

    pub fn records(&self) -> &[ShelterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn normalization_report(&self) -> &NormalizationReport {
        &self.report
    }

    /// Records with no outcome yet
    pub fn open_cases(&self) -> usize {
        self.records.iter().filter(|r| r.is_open_case()).count()
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.filter_options_as_of(Local::now().date_naive())
    }

    pub fn filter_options_as_of(&self, today: NaiveDate) -> FilterOptions {
        FilterOptions::from_records(&self.records, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource {
        rows: Vec<RawRecord>,
    }

    impl RecordSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&mut self, limit: usize) -> Result<Vec<RawRecord>> {
            Ok(self.rows.iter().take(limit).cloned().collect())
        }
    }

    struct BrokenSource;

    impl RecordSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        fn fetch(&mut self, _limit: usize) -> Result<Vec<RawRecord>> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    #[test]
    fn test_load_normalizes_and_counts() {
        let mut source = FixedSource {
            rows: vec![
                RawRecord::new("A1").with_intake_date("2023-01-01"),
                RawRecord::new("A2").with_intake_date("garbage").with_outcome_date("2023-01-02"),
                RawRecord::new("A3"),
            ],
        };

        let store = RecordStore::load(&mut source, 1000).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.source_name(), "fixed");
        assert_eq!(store.normalization_report().failures_for("IntakeDate"), 1);
        assert_eq!(store.open_cases(), 2);
    }

    #[test]
    fn test_load_respects_limit() {
        let mut source = FixedSource {
            rows: (0..5).map(|i| RawRecord::new(&i.to_string())).collect(),
        };

        let store = RecordStore::load(&mut source, 2).unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_error_names_the_source() {
        let err = RecordStore::load(&mut BrokenSource, 10).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::from_raw("empty", vec![]);
        assert!(store.is_empty());
        assert_eq!(store.open_cases(), 0);
    }
}
