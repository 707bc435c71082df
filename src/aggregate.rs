// 📊 Aggregators
// Monthly intake trend, animal-type frequency, days-in-shelter values.
// Stateless; each takes the working subset and returns a chart-ready payload.

use crate::record::ShelterRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// MONTHLY INTAKE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// First day of the month
    pub month: NaiveDate,
    pub count: usize,
}

/// Intakes per month, ascending. Records without an intake month are
/// not plotted; they are counted in `undated`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub points: Vec<MonthlyCount>,
    pub undated: usize,
}

impl MonthlyTrend {
    /// Plotted + undated = input size
    pub fn total(&self) -> usize {
        self.points.iter().map(|p| p.count).sum::<usize>() + self.undated
    }
}

pub fn monthly_intake<'a, I>(records: I) -> MonthlyTrend
where
    I: IntoIterator<Item = &'a ShelterRecord>,
{
    let mut by_month: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut undated = 0;

    for record in records {
        match record.intake_month {
            Some(month) => *by_month.entry(month).or_insert(0) += 1,
            None => undated += 1,
        }
    }

    MonthlyTrend {
        points: by_month
            .into_iter()
            .map(|(month, count)| MonthlyCount { month, count })
            .collect(),
        undated,
    }
}

// ============================================================================
// CATEGORY FREQUENCY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub animal_type: String,
    pub count: usize,
}

/// Counts per animal type, most frequent first; ties keep the order in which
/// the types were first seen. Records without a type go to `unlabeled`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFrequency {
    pub counts: Vec<CategoryCount>,
    pub unlabeled: usize,
}

pub fn category_frequency<'a, I>(records: I) -> CategoryFrequency
where
    I: IntoIterator<Item = &'a ShelterRecord>,
{
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut unlabeled = 0;

    for record in records {
        let Some(animal_type) = record.animal_type.as_deref() else {
            unlabeled += 1;
            continue;
        };

        match position.get(animal_type) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(animal_type, counts.len());
                counts.push(CategoryCount {
                    animal_type: animal_type.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    CategoryFrequency { counts, unlabeled }
}

// ============================================================================
// DURATION DISTRIBUTION
// ============================================================================

/// Days-in-shelter values for the histogram, or an explicit "nothing to plot"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "values", rename_all = "snake_case")]
pub enum DurationDistribution {
    NoData,
    Values(Vec<i64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationSummary {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
}

impl DurationDistribution {
    pub fn values(&self) -> &[i64] {
        match self {
            DurationDistribution::NoData => &[],
            DurationDistribution::Values(values) => values,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DurationDistribution::NoData)
    }

    /// Descriptive statistics; None for NoData
    pub fn summary(&self) -> Option<DurationSummary> {
        let values = self.values();
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let count = sorted.len();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
        } else {
            sorted[mid] as f64
        };

        Some(DurationSummary {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sorted.iter().sum::<i64>() as f64 / count as f64,
            median,
        })
    }
}

/// Non-null DaysInShelter values in input order
pub fn duration_distribution<'a, I>(records: I) -> DurationDistribution
where
    I: IntoIterator<Item = &'a ShelterRecord>,
{
    let values: Vec<i64> = records.into_iter().filter_map(|r| r.days_in_shelter).collect();

    if values.is_empty() {
        DurationDistribution::NoData
    } else {
        DurationDistribution::Values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_records;
    use crate::record::RawRecord;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records_with_types(types: &[Option<&str>]) -> Vec<ShelterRecord> {
        let rows = types
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let row = RawRecord::new(&format!("A{}", i));
                match t {
                    Some(t) => row.with_animal_type(t),
                    None => row,
                }
            })
            .collect();
        normalize_records(rows).0
    }

    #[test]
    fn test_category_frequency_example() {
        let records = records_with_types(&[
            Some("Dog"),
            Some("Cat"),
            Some("Dog"),
            Some("Dog"),
            Some("Bird"),
        ]);

        let freq = category_frequency(&records);

        let pairs: Vec<(&str, usize)> = freq
            .counts
            .iter()
            .map(|c| (c.animal_type.as_str(), c.count))
            .collect();
        assert_eq!(pairs, vec![("Dog", 3), ("Cat", 1), ("Bird", 1)]);
        assert_eq!(freq.unlabeled, 0);
    }

    #[test]
    fn test_category_ties_follow_first_seen_order() {
        let records = records_with_types(&[Some("Rabbit"), Some("Cat"), Some("Cat"), Some("Rabbit"), None]);

        let freq = category_frequency(&records);

        assert_eq!(freq.counts[0].animal_type, "Rabbit");
        assert_eq!(freq.counts[1].animal_type, "Cat");
        assert_eq!(freq.unlabeled, 1);
    }

    #[test]
    fn test_monthly_intake_groups_and_orders() {
        let rows = vec![
            RawRecord::new("A1").with_intake_date("2023-03-02"),
            RawRecord::new("A2").with_intake_date("2023-01-15"),
            RawRecord::new("A3").with_intake_date("2023-03-30 08:00:00"),
            RawRecord::new("A4"),
            RawRecord::new("A5").with_intake_date("2022-12-31"),
        ];
        let records = normalize_records(rows).0;

        let trend = monthly_intake(&records);

        assert_eq!(
            trend.points,
            vec![
                MonthlyCount { month: ymd(2022, 12, 1), count: 1 },
                MonthlyCount { month: ymd(2023, 1, 1), count: 1 },
                MonthlyCount { month: ymd(2023, 3, 1), count: 2 },
            ]
        );
        assert_eq!(trend.undated, 1);
        assert_eq!(trend.total(), records.len());
        assert!(trend.points.windows(2).all(|w| w[0].month < w[1].month));
    }

    #[test]
    fn test_monthly_intake_empty_input() {
        let trend = monthly_intake(std::iter::empty::<&ShelterRecord>());
        assert!(trend.points.is_empty());
        assert_eq!(trend.total(), 0);
    }

    #[test]
    fn test_duration_distribution_drops_nulls() {
        let rows = vec![
            RawRecord::new("A1").with_intake_date("2023-01-01").with_outcome_date("2023-01-04"),
            RawRecord::new("A2").with_intake_date("2023-01-01"),
            RawRecord::new("A3").with_intake_date("2023-01-01").with_outcome_date("2023-01-02"),
        ];
        let records = normalize_records(rows).0;

        let dist = duration_distribution(&records);

        assert_eq!(dist, DurationDistribution::Values(vec![3, 1]));
        assert!(!dist.is_empty());
    }

    #[test]
    fn test_duration_distribution_no_data() {
        let records = normalize_records(vec![RawRecord::new("A1").with_intake_date("2023-01-01")]).0;

        let dist = duration_distribution(&records);

        assert_eq!(dist, DurationDistribution::NoData);
        assert!(dist.summary().is_none());
        assert!(dist.values().is_empty());
    }

    #[test]
    fn test_duration_summary() {
        let dist = DurationDistribution::Values(vec![10, 2, 4, 8]);
        let summary = dist.summary().unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.min, 2);
        assert_eq!(summary.max, 10);
        assert_eq!(summary.mean, 6.0);
        assert_eq!(summary.median, 6.0);
    }

    #[test]
    fn test_duration_serializes_with_status_tag() {
        let json = serde_json::to_value(DurationDistribution::NoData).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "no_data" }));

        let json = serde_json::to_value(DurationDistribution::Values(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "values", "values": [1, 2] }));
    }
}
