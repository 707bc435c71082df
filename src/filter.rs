// 🔎 Filter Engine
// Conjunction of the user's selections over the record set, with the
// "show everything instead" fallback when nothing matches.

use crate::error::QueryError;
use crate::record::ShelterRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Warning shown when a selection matches nothing and all data is displayed
pub const EMPTY_SELECTION_WARNING: &str =
    "No results found for these filter selections. Displaying default (all data) instead.";

// ============================================================================
// CRITERIA
// ============================================================================

/// Inclusive range of intake days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Categorical dimensions the user can select values in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterDimension {
    AnimalType,
    Sex,
    IntakeCondition,
}

impl FilterDimension {
    pub fn label(&self) -> &str {
        match self {
            FilterDimension::AnimalType => "Animal Type",
            FilterDimension::Sex => "Sex",
            FilterDimension::IntakeCondition => "Intake Condition",
        }
    }

    fn value_of<'r>(&self, record: &'r ShelterRecord) -> Option<&'r str> {
        match self {
            FilterDimension::AnimalType => record.animal_type.as_deref(),
            FilterDimension::Sex => record.sex.as_deref(),
            FilterDimension::IntakeCondition => record.intake_condition.as_deref(),
        }
    }
}

/// FilterCriteria - what the user currently has selected
///
/// An empty set or a missing range puts no restriction on that dimension.
/// A record whose field is null never passes an active restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub animal_types: BTreeSet<String>,
    pub sexes: BTreeSet<String>,
    pub intake_conditions: BTreeSet<String>,
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    /// No restriction at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Every option selected, full date range: the dashboard's initial state
    pub fn select_all(options: &FilterOptions) -> Self {
        FilterCriteria {
            animal_types: options.animal_types.iter().cloned().collect(),
            sexes: options.sexes.iter().cloned().collect(),
            intake_conditions: options.intake_conditions.iter().cloned().collect(),
            date_range: Some(options.date_range),
        }
    }

    pub fn with_animal_types<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.animal_types = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sexes<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sexes = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_intake_conditions<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intake_conditions = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    pub fn selected(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::AnimalType => &self.animal_types,
            FilterDimension::Sex => &self.sexes,
            FilterDimension::IntakeCondition => &self.intake_conditions,
        }
    }

    fn selected_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::AnimalType => &mut self.animal_types,
            FilterDimension::Sex => &mut self.sexes,
            FilterDimension::IntakeCondition => &mut self.intake_conditions,
        }
    }

    pub fn is_selected(&self, dimension: FilterDimension, value: &str) -> bool {
        self.selected(dimension).contains(value)
    }

    /// Add or remove one value from a dimension's selection
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) {
        let selected = self.selected_mut(dimension);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// True when no predicate is active
    pub fn is_unrestricted(&self) -> bool {
        self.animal_types.is_empty()
            && self.sexes.is_empty()
            && self.intake_conditions.is_empty()
            && self.date_range.is_none()
    }

    /// Does a record pass every active predicate?
    pub fn matches(&self, record: &ShelterRecord) -> bool {
        let categorical = [
            FilterDimension::AnimalType,
            FilterDimension::Sex,
            FilterDimension::IntakeCondition,
        ];

        let categories_match = categorical.iter().all(|dimension| {
            let accepted = self.selected(*dimension);
            accepted.is_empty() || dimension.value_of(record).is_some_and(|v| accepted.contains(v))
        });

        let date_matches = match self.date_range {
            Some(range) => record.intake_day().is_some_and(|day| range.contains(day)),
            None => true,
        };

        categories_match && date_matches
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// FilterOptions - the values the user can choose from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub animal_types: Vec<String>,
    pub sexes: Vec<String>,
    pub intake_conditions: Vec<String>,
    /// [earliest intake day, latest intake day]
    pub date_range: DateRange,
}

impl FilterOptions {
    /// Sorted distinct non-null values per dimension.
    /// `today` bounds the date range when no record has an intake date.
    pub fn from_records(records: &[ShelterRecord], today: NaiveDate) -> Self {
        let distinct = |dimension: FilterDimension| -> Vec<String> {
            records
                .iter()
                .filter_map(|r| dimension.value_of(r))
                .map(String::from)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        let days = records.iter().filter_map(ShelterRecord::intake_day);
        let start = days.clone().min().unwrap_or(today);
        let end = days.max().unwrap_or(today);

        FilterOptions {
            animal_types: distinct(FilterDimension::AnimalType),
            sexes: distinct(FilterDimension::Sex),
            intake_conditions: distinct(FilterDimension::IntakeCondition),
            date_range: DateRange::new(start, end),
        }
    }

    pub fn values(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::AnimalType => &self.animal_types,
            FilterDimension::Sex => &self.sexes,
            FilterDimension::IntakeCondition => &self.intake_conditions,
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Selection - the working subset handed to the aggregators
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub records: Vec<&'a ShelterRecord>,
    /// The criteria matched nothing; `records` is the whole input
    pub fallback_applied: bool,
}

impl<'a> Selection<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ShelterRecord> + '_ {
        self.records.iter().copied()
    }

    /// User-facing warning, if the fallback kicked in
    pub fn warning(&self) -> Option<&'static str> {
        self.fallback_applied.then_some(EMPTY_SELECTION_WARNING)
    }
}

/// Apply the criteria to `records`, keeping input order
///
/// When nothing passes, the whole input comes back with `fallback_applied`
/// set, so applying the same criteria to the output is a no-op.
pub fn apply_filters<'a, I>(records: I, criteria: &FilterCriteria) -> Selection<'a>
where
    I: IntoIterator<Item = &'a ShelterRecord>,
{
    let all: Vec<&'a ShelterRecord> = records.into_iter().collect();
    let matched: Vec<&'a ShelterRecord> = all.iter().copied().filter(|r| criteria.matches(r)).collect();

    if matched.is_empty() {
        Selection {
            records: all,
            fallback_applied: true,
        }
    } else {
        Selection {
            records: matched,
            fallback_applied: false,
        }
    }
}

// ============================================================================
// QUERY PARAMETERS
// ============================================================================

/// FilterQuery - criteria as they arrive from the outside (HTTP query, CLI flags)
///
/// Each selected value is its own list entry, so values may contain commas.
/// A list that is absent keeps the default (everything selected); a list that
/// is present but empty clears that dimension, which means no restriction.
/// Dates are `YYYY-MM-DD`; an empty string clears the date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub animal_types: Option<Vec<String>>,
    pub sexes: Option<Vec<String>>,
    pub intake_conditions: Option<Vec<String>>,
    pub start: Option<String>,
    pub end: Option<String>,
}

fn to_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

fn parse_day(field: &'static str, value: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| QueryError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

impl FilterQuery {
    /// Collect decoded `key=value` pairs, e.g. from a URL query string.
    ///
    /// List keys may repeat (`sexes=Male&sexes=Female`); a single empty value
    /// (`sexes=`) marks the list as present but empty. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = FilterQuery::default();

        for (key, value) in pairs {
            let value: String = value.into();
            let list = match key.as_ref() {
                "animal_types" => &mut query.animal_types,
                "sexes" => &mut query.sexes,
                "intake_conditions" => &mut query.intake_conditions,
                "start" => {
                    query.start = Some(value);
                    continue;
                }
                "end" => {
                    query.end = Some(value);
                    continue;
                }
                _ => continue,
            };

            let list = list.get_or_insert_with(Vec::new);
            if !value.trim().is_empty() {
                list.push(value);
            }
        }

        query
    }

    pub fn into_criteria(self, options: &FilterOptions) -> Result<FilterCriteria, QueryError> {
        let mut criteria = FilterCriteria::select_all(options);

        if let Some(list) = &self.animal_types {
            criteria.animal_types = to_set(list);
        }
        if let Some(list) = &self.sexes {
            criteria.sexes = to_set(list);
        }
        if let Some(list) = &self.intake_conditions {
            criteria.intake_conditions = to_set(list);
        }

        let start = match self.start.as_deref().map(str::trim) {
            Some("") => None,
            Some(value) => Some(Some(parse_day("start", value)?)),
            None => Some(None),
        };
        let end = match self.end.as_deref().map(str::trim) {
            Some("") => None,
            Some(value) => Some(Some(parse_day("end", value)?)),
            None => Some(None),
        };

        // Either bound given as empty clears the range; otherwise missing
        // bounds fall back to the full range
        criteria.date_range = match (start, end) {
            (Some(start), Some(end)) => Some(DateRange::new(
                start.unwrap_or(options.date_range.start),
                end.unwrap_or(options.date_range.end),
            )),
            _ => None,
        };

        Ok(criteria)
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

    fn create_test_records() -> Vec<ShelterRecord> {
        let rows = vec![
            RawRecord::new("A1")
                .with_animal_type("Dog")
                .with_sex("Male")
                .with_intake_condition("Healthy")
                .with_intake_date("2023-01-05"),
            RawRecord::new("A2")
                .with_animal_type("Cat")
                .with_sex("Female")
                .with_intake_condition("Injured")
                .with_intake_date("2023-02-10"),
            RawRecord::new("A3")
                .with_animal_type("Dog")
                .with_sex("Female")
                .with_intake_condition("Healthy")
                .with_intake_date("2023-03-15"),
            RawRecord::new("A4")
                .with_animal_type("Dog")
                .with_sex("Male")
                .with_intake_condition("Sick")
                .with_intake_date("2023-03-31 23:59:00"),
            RawRecord::new("A5").with_animal_type("Bird"),
        ];
        normalize_records(rows).0
    }

    fn ids(selection: &Selection) -> Vec<String> {
        selection
            .iter()
            .map(|r| r.animal_id.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_unrestricted_criteria_keep_everything() {
        let records = create_test_records();
        let selection = apply_filters(&records, &FilterCriteria::new());

        assert_eq!(selection.len(), records.len());
        assert!(!selection.fallback_applied);
        assert_eq!(selection.warning(), None);
    }

    #[test]
    fn test_dog_only_restriction() {
        let records = create_test_records();
        let criteria = FilterCriteria::new()
            .with_animal_types(["Dog"])
            .with_sexes(["Male"]);

        let selection = apply_filters(&records, &criteria);

        assert!(selection.iter().all(|r| r.animal_type.as_deref() == Some("Dog")));
        let expected = records
            .iter()
            .filter(|r| r.animal_type.as_deref() == Some("Dog") && r.sex.as_deref() == Some("Male"))
            .count();
        assert_eq!(selection.len(), expected);
        assert_eq!(ids(&selection), vec!["A1", "A4"]);
    }

    #[test]
    fn test_date_range_is_inclusive_on_the_day() {
        let records = create_test_records();
        let criteria = FilterCriteria::new().with_date_range(ymd(2023, 2, 10), ymd(2023, 3, 31));

        let selection = apply_filters(&records, &criteria);

        // A4 was taken in late on the 31st; only the day counts
        assert_eq!(ids(&selection), vec!["A2", "A3", "A4"]);
    }

    #[test]
    fn test_null_fields_fail_active_predicates() {
        let records = create_test_records();

        let by_sex = apply_filters(&records, &FilterCriteria::new().with_sexes(["Male", "Female"]));
        assert!(!ids(&by_sex).contains(&"A5".to_string()));

        let by_date = apply_filters(
            &records,
            &FilterCriteria::new().with_date_range(ymd(2000, 1, 1), ymd(2100, 1, 1)),
        );
        assert!(!ids(&by_date).contains(&"A5".to_string()));
    }

    #[test]
    fn test_empty_conjunction_falls_back_to_all_records() {
        let records = create_test_records();
        let criteria = FilterCriteria::new()
            .with_animal_types(["Cat"])
            .with_intake_conditions(["Healthy"]);

        let selection = apply_filters(&records, &criteria);

        assert!(selection.fallback_applied);
        assert_eq!(selection.len(), records.len());
        assert_eq!(selection.warning(), Some(EMPTY_SELECTION_WARNING));
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let records = create_test_records();
        let all_criteria = [
            FilterCriteria::new(),
            FilterCriteria::new().with_animal_types(["Dog"]),
            FilterCriteria::new().with_animal_types(["Fish"]),
            FilterCriteria::new()
                .with_sexes(["Female"])
                .with_date_range(ymd(2023, 3, 1), ymd(2023, 3, 31)),
        ];

        for criteria in &all_criteria {
            let once = apply_filters(&records, criteria);
            let twice = apply_filters(once.iter(), criteria);
            assert_eq!(once.records, twice.records, "criteria: {:?}", criteria);
        }
    }

    #[test]
    fn test_select_all_matches_default_dashboard_state() {
        let records = create_test_records();
        let options = FilterOptions::from_records(&records, ymd(2024, 1, 1));

        assert_eq!(options.animal_types, vec!["Bird", "Cat", "Dog"]);
        assert_eq!(options.sexes, vec!["Female", "Male"]);
        assert_eq!(options.intake_conditions, vec!["Healthy", "Injured", "Sick"]);
        assert_eq!(options.date_range, DateRange::new(ymd(2023, 1, 5), ymd(2023, 3, 31)));

        // Everything selected still drops rows with null fields
        let selection = apply_filters(&records, &FilterCriteria::select_all(&options));
        assert_eq!(ids(&selection), vec!["A1", "A2", "A3", "A4"]);
    }

    #[test]
    fn test_options_without_intake_dates_use_today() {
        let records = normalize_records(vec![RawRecord::new("A1")]).0;
        let today = ymd(2024, 6, 1);

        let options = FilterOptions::from_records(&records, today);

        assert_eq!(options.date_range, DateRange::new(today, today));
        assert!(options.animal_types.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut criteria = FilterCriteria::new().with_animal_types(["Dog", "Cat"]);

        criteria.toggle(FilterDimension::AnimalType, "Dog");
        assert!(!criteria.is_selected(FilterDimension::AnimalType, "Dog"));

        criteria.toggle(FilterDimension::AnimalType, "Dog");
        assert!(criteria.is_selected(FilterDimension::AnimalType, "Dog"));
    }

    #[test]
    fn test_query_absent_params_keep_defaults() {
        let records = create_test_records();
        let options = FilterOptions::from_records(&records, ymd(2024, 1, 1));

        let criteria = FilterQuery::default().into_criteria(&options).unwrap();

        assert_eq!(criteria, FilterCriteria::select_all(&options));
    }

    #[test]
    fn test_query_lists_and_dates() {
        let records = create_test_records();
        let options = FilterOptions::from_records(&records, ymd(2024, 1, 1));
        let query = FilterQuery {
            animal_types: Some(vec!["Dog".to_string(), " Cat".to_string()]),
            sexes: Some(Vec::new()),
            start: Some("2023-02-01".to_string()),
            ..FilterQuery::default()
        };

        let criteria = query.into_criteria(&options).unwrap();

        assert_eq!(criteria.animal_types.len(), 2);
        assert!(criteria.sexes.is_empty());
        assert_eq!(criteria.intake_conditions.len(), 3);
        assert_eq!(
            criteria.date_range,
            Some(DateRange::new(ymd(2023, 2, 1), ymd(2023, 3, 31)))
        );
    }

    #[test]
    fn test_query_values_may_contain_commas() {
        let rows = vec![
            RawRecord::new("A1")
                .with_intake_condition("SICK, TREATABLE")
                .with_intake_date("2023-01-01"),
            RawRecord::new("A2")
                .with_intake_condition("HEALTHY")
                .with_intake_date("2023-01-02"),
        ];
        let records = normalize_records(rows).0;
        let options = FilterOptions::from_records(&records, ymd(2024, 1, 1));
        let query = FilterQuery::from_pairs([("intake_conditions", "SICK, TREATABLE")]);

        let criteria = query.into_criteria(&options).unwrap();
        let selection = apply_filters(&records, &criteria);

        assert_eq!(
            criteria.intake_conditions,
            BTreeSet::from(["SICK, TREATABLE".to_string()])
        );
        assert!(!selection.fallback_applied);
        assert_eq!(ids(&selection), vec!["A1"]);
    }

    #[test]
    fn test_query_from_pairs() {
        let query = FilterQuery::from_pairs([
            ("sexes", "Male"),
            ("sexes", "Female"),
            ("animal_types", ""),
            ("start", "2023-01-01"),
            ("page", "2"),
        ]);

        assert_eq!(query.sexes, Some(vec!["Male".to_string(), "Female".to_string()]));
        // Present but empty: no restriction
        assert_eq!(query.animal_types, Some(Vec::new()));
        assert_eq!(query.intake_conditions, None);
        assert_eq!(query.start.as_deref(), Some("2023-01-01"));
        assert_eq!(query.end, None);
    }

    #[test]
    fn test_query_empty_date_clears_range() {
        let records = create_test_records();
        let options = FilterOptions::from_records(&records, ymd(2024, 1, 1));
        let query = FilterQuery {
            end: Some(String::new()),
            ..FilterQuery::default()
        };

        assert_eq!(query.into_criteria(&options).unwrap().date_range, None);
    }

    #[test]
    fn test_query_rejects_bad_date() {
        let records = create_test_records();
        let options = FilterOptions::from_records(&records, ymd(2024, 1, 1));
        let query = FilterQuery {
            start: Some("05/01/2023".to_string()),
            ..FilterQuery::default()
        };

        let err = query.into_criteria(&options).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidDate {
                field: "start",
                value: "05/01/2023".to_string()
            }
        );
    }
}
