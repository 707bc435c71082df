// 📈 Dashboard pipeline
// One user interaction = filter the store, run every aggregator, package the
// result. Nothing is cached between interactions.

use crate::aggregate::{
    category_frequency, duration_distribution, monthly_intake, CategoryFrequency,
    DurationDistribution, MonthlyTrend,
};
use crate::config::MapConfig;
use crate::filter::{apply_filters, FilterCriteria};
use crate::geo::{geo_summary, GeoPoint, GeoSummary, DEFAULT_CENTER};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Knobs the pipeline needs from configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub fallback_center: GeoPoint,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            fallback_center: DEFAULT_CENTER,
        }
    }
}

impl From<&MapConfig> for DashboardSettings {
    fn from(map: &MapConfig) -> Self {
        DashboardSettings {
            fallback_center: map.fallback_center(),
        }
    }
}

/// Headline numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub total_records: usize,
    pub shown_records: usize,
    /// Animals still in custody, whole store
    pub open_cases_total: usize,
    /// Animals still in custody, current selection
    pub open_cases_shown: usize,
    pub fallback_applied: bool,
}

/// Everything the presentation layer draws for one interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub overview: Overview,
    pub warning: Option<String>,
    pub monthly_intake: MonthlyTrend,
    pub animal_types: CategoryFrequency,
    pub days_in_shelter: DurationDistribution,
    pub geo: GeoSummary,
}

impl DashboardView {
    pub fn build(store: &RecordStore, criteria: &FilterCriteria, settings: &DashboardSettings) -> Self {
        let selection = apply_filters(store.records(), criteria);

        let overview = Overview {
            total_records: store.len(),
            shown_records: selection.len(),
            open_cases_total: store.open_cases(),
            open_cases_shown: selection.iter().filter(|r| r.is_open_case()).count(),
            fallback_applied: selection.fallback_applied,
        };

        debug!(
            "Dashboard rebuilt: {}/{} records shown (fallback: {})",
            overview.shown_records, overview.total_records, overview.fallback_applied
        );

        DashboardView {
            overview,
            warning: selection.warning().map(String::from),
            monthly_intake: monthly_intake(selection.iter()),
            animal_types: category_frequency(selection.iter()),
            days_in_shelter: duration_distribution(selection.iter()),
            geo: geo_summary(selection.iter(), settings.fallback_center),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::EMPTY_SELECTION_WARNING;
    use crate::record::RawRecord;

    fn create_test_store() -> RecordStore {
        RecordStore::from_raw(
            "test",
            vec![
                RawRecord::new("A1")
                    .with_animal_type("Dog")
                    .with_sex("Male")
                    .with_intake_date("2023-01-05")
                    .with_outcome_date("2023-01-15")
                    .with_zip_code("95112")
                    .with_location(37.3, -121.8),
                RawRecord::new("A2")
                    .with_animal_type("Cat")
                    .with_sex("Female")
                    .with_intake_date("2023-02-01")
                    .with_zip_code("95112")
                    .with_location(37.31, -121.81),
                RawRecord::new("A3")
                    .with_animal_type("Dog")
                    .with_sex("Female")
                    .with_intake_date("2023-02-20")
                    .with_zip_code("95116"),
            ],
        )
    }

    #[test]
    fn test_build_full_view() {
        let store = create_test_store();
        let view = DashboardView::build(&store, &FilterCriteria::new(), &DashboardSettings::default());

        assert_eq!(view.overview.total_records, 3);
        assert_eq!(view.overview.shown_records, 3);
        assert_eq!(view.overview.open_cases_total, 2);
        assert_eq!(view.overview.open_cases_shown, 2);
        assert_eq!(view.warning, None);
        assert_eq!(view.monthly_intake.total(), 3);
        assert_eq!(view.animal_types.counts[0].animal_type, "Dog");
        assert_eq!(view.days_in_shelter, DurationDistribution::Values(vec![10]));
        assert_eq!(view.geo.points.len(), 2);
        assert_eq!(view.geo.open_zones.len(), 2);
    }

    #[test]
    fn test_build_with_restriction() {
        let store = create_test_store();
        let criteria = FilterCriteria::new().with_animal_types(["Cat"]);

        let view = DashboardView::build(&store, &criteria, &DashboardSettings::default());

        assert_eq!(view.overview.shown_records, 1);
        assert_eq!(view.overview.open_cases_shown, 1);
        assert_eq!(view.days_in_shelter, DurationDistribution::NoData);
        assert_eq!(view.geo.open_zones[0].zip_code, "95112");
        assert_eq!(view.geo.open_zones[0].open_cases, 1);
    }

    #[test]
    fn test_build_with_vacuous_selection_warns() {
        let store = create_test_store();
        let criteria = FilterCriteria::new().with_animal_types(["Ferret"]);

        let view = DashboardView::build(&store, &criteria, &DashboardSettings::default());

        assert!(view.overview.fallback_applied);
        assert_eq!(view.overview.shown_records, 3);
        assert_eq!(view.warning.as_deref(), Some(EMPTY_SELECTION_WARNING));
    }

    #[test]
    fn test_fallback_center_comes_from_settings() {
        let store = RecordStore::from_raw("test", vec![RawRecord::new("A1")]);
        let settings = DashboardSettings::from(&MapConfig {
            fallback_latitude: 10.0,
            fallback_longitude: 20.0,
        });

        let view = DashboardView::build(&store, &FilterCriteria::new(), &settings);

        assert!(view.geo.center_is_fallback);
        assert_eq!(view.geo.center, GeoPoint { latitude: 10.0, longitude: 20.0 });
    }

    #[test]
    fn test_view_serializes_to_json() {
        let store = create_test_store();
        let view = DashboardView::build(&store, &FilterCriteria::new(), &DashboardSettings::default());

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["overview"]["total_records"], 3);
        assert_eq!(json["monthly_intake"]["points"][0]["month"], "2023-01-01");
        assert_eq!(json["days_in_shelter"]["status"], "values");
    }
}
