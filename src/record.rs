// 🐾 Shelter records
// RawRecord = one warehouse row as text, ShelterRecord = typed + derived fields

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// RAW RECORD (warehouse row, before normalization)
// ============================================================================

/// RawRecord - a warehouse row with every column kept as optional text
///
/// Column names follow the warehouse table. Columns we don't use are ignored
/// by the loaders, missing ones come through as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "AnimalID", default)]
    pub animal_id: Option<String>,

    #[serde(rename = "AnimalType", default)]
    pub animal_type: Option<String>,

    #[serde(rename = "Sex", default)]
    pub sex: Option<String>,

    #[serde(rename = "IntakeCondition", default)]
    pub intake_condition: Option<String>,

    #[serde(rename = "IntakeDate", default)]
    pub intake_date: Option<String>,

    #[serde(rename = "OutcomeDate", default)]
    pub outcome_date: Option<String>,

    #[serde(rename = "LastUpdate", default)]
    pub last_update: Option<String>,

    #[serde(rename = "DOB", default)]
    pub dob: Option<String>,

    #[serde(rename = "ZipCode", default)]
    pub zip_code: Option<String>,

    #[serde(rename = "Latitude", default)]
    pub latitude: Option<String>,

    #[serde(rename = "Longitude", default)]
    pub longitude: Option<String>,
}

impl RawRecord {
    /// Create a row with just an identifier
    pub fn new(animal_id: &str) -> Self {
        RawRecord {
            animal_id: Some(animal_id.to_string()),
            ..Default::default()
        }
    }

    /// Builder pattern: set animal type
    pub fn with_animal_type(mut self, animal_type: &str) -> Self {
        self.animal_type = Some(animal_type.to_string());
        self
    }

    /// Builder pattern: set sex
    pub fn with_sex(mut self, sex: &str) -> Self {
        self.sex = Some(sex.to_string());
        self
    }

    /// Builder pattern: set intake condition
    pub fn with_intake_condition(mut self, condition: &str) -> Self {
        self.intake_condition = Some(condition.to_string());
        self
    }

    /// Builder pattern: set intake date (any supported timestamp format)
    pub fn with_intake_date(mut self, date: &str) -> Self {
        self.intake_date = Some(date.to_string());
        self
    }

    /// Builder pattern: set outcome date
    pub fn with_outcome_date(mut self, date: &str) -> Self {
        self.outcome_date = Some(date.to_string());
        self
    }

    /// Builder pattern: set date of birth
    pub fn with_dob(mut self, date: &str) -> Self {
        self.dob = Some(date.to_string());
        self
    }

    /// Builder pattern: set zip code
    pub fn with_zip_code(mut self, zip_code: &str) -> Self {
        self.zip_code = Some(zip_code.to_string());
        self
    }

    /// Builder pattern: set coordinates
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude.to_string());
        self.longitude = Some(longitude.to_string());
        self
    }
}

// ============================================================================
// SHELTER RECORD (typed, immutable after normalization)
// ============================================================================

/// ShelterRecord - one shelter case with typed and derived fields
///
/// Built only by the normalizer. `ingest_index` is the row position in the
/// warehouse result and is the ordering key for anything order-dependent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterRecord {
    pub ingest_index: usize,
    pub animal_id: Option<String>,
    pub animal_type: Option<String>,
    pub sex: Option<String>,
    pub intake_condition: Option<String>,

    // Timestamps (unparseable values are None)
    pub intake_date: Option<NaiveDateTime>,
    pub outcome_date: Option<NaiveDateTime>,
    pub last_update: Option<NaiveDateTime>,
    pub dob: Option<NaiveDateTime>,

    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // Derived
    /// First day of the intake month
    pub intake_month: Option<NaiveDate>,
    /// Outcome date minus intake date, in calendar days
    pub days_in_shelter: Option<i64>,
}

impl ShelterRecord {
    /// Open case = animal still in custody
    pub fn is_open_case(&self) -> bool {
        self.outcome_date.is_none()
    }

    /// Both coordinates, or nothing
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Calendar day of intake
    pub fn intake_day(&self) -> Option<NaiveDate> {
        self.intake_date.map(|dt| dt.date())
    }
}
