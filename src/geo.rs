// 🗺️ Geo Clusterer
// Point markers for located records and per-zip summaries of open cases

use crate::record::ShelterRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map center used when nothing in the selection has coordinates (San Jose)
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    latitude: 37.3382,
    longitude: -121.8863,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One located record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub animal_type: Option<String>,
    pub label: String,
}

/// Open cases sharing a zip code
///
/// Coordinates are the first non-null values in ingest order and may be
/// missing when no record in the zone has them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub zip_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub open_cases: usize,
}

impl ZoneSummary {
    pub fn label(&self) -> String {
        format!("ZipCode: {} - Remaining animals: {}", self.zip_code, self.open_cases)
    }

    pub fn location(&self) -> Option<GeoPoint> {
        Some(GeoPoint {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoSummary {
    /// Per-axis mean over the selection's non-null latitudes and longitudes
    pub center: GeoPoint,
    /// At least one axis had no values and took the configured fallback
    pub center_is_fallback: bool,
    pub points: Vec<PointMarker>,
    /// Ordered by zip code
    pub open_zones: Vec<ZoneSummary>,
    /// Open cases without a zip code (not part of any zone)
    pub unzoned_open_cases: usize,
}

pub fn marker_label(animal_type: Option<&str>) -> String {
    format!("Animal Type: {}", animal_type.unwrap_or("Unknown"))
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn geo_summary<'a, I>(records: I, fallback_center: GeoPoint) -> GeoSummary
where
    I: IntoIterator<Item = &'a ShelterRecord>,
{
    // "First" in a zone means first by ingest order, whatever order we got
    let mut ordered: Vec<&ShelterRecord> = records.into_iter().collect();
    ordered.sort_by_key(|r| r.ingest_index);

    let points: Vec<PointMarker> = ordered
        .iter()
        .filter_map(|r| {
            let (latitude, longitude) = r.coordinates()?;
            Some(PointMarker {
                latitude,
                longitude,
                animal_type: r.animal_type.clone(),
                label: marker_label(r.animal_type.as_deref()),
            })
        })
        .collect();

    let mut zones: BTreeMap<&str, ZoneSummary> = BTreeMap::new();
    let mut unzoned_open_cases = 0;

    for record in ordered.iter().filter(|r| r.is_open_case()) {
        let Some(zip_code) = record.zip_code.as_deref() else {
            unzoned_open_cases += 1;
            continue;
        };

        let zone = zones.entry(zip_code).or_insert_with(|| ZoneSummary {
            zip_code: zip_code.to_string(),
            latitude: None,
            longitude: None,
            open_cases: 0,
        });
        zone.open_cases += 1;
        zone.latitude = zone.latitude.or(record.latitude);
        zone.longitude = zone.longitude.or(record.longitude);
    }

    // Each axis on its own: a record with only a latitude still counts
    let latitude = mean(ordered.iter().filter_map(|r| r.latitude));
    let longitude = mean(ordered.iter().filter_map(|r| r.longitude));
    let center = GeoPoint {
        latitude: latitude.unwrap_or(fallback_center.latitude),
        longitude: longitude.unwrap_or(fallback_center.longitude),
    };
    let center_is_fallback = latitude.is_none() || longitude.is_none();

    GeoSummary {
        center,
        center_is_fallback,
        points,
        open_zones: zones.into_values().collect(),
        unzoned_open_cases,
    }
}
