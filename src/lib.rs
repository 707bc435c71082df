// Shelter Dashboard - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod record;      // Raw warehouse rows + typed shelter records
pub mod normalizer;  // Timestamp parsing + derived fields
pub mod config;
pub mod warehouse;   // CSV / SQLite record sources
pub mod store;
pub mod filter;      // Filter engine + empty-selection fallback
pub mod aggregate;   // Monthly trend, category frequency, durations
pub mod geo;         // Point markers + open-case zones
pub mod dashboard;   // One interaction = filter + all aggregators
pub mod quality;     // Data Quality Engine
pub mod logging;

// Re-export commonly used types
pub use error::{QueryError, SourceError};
pub use record::{RawRecord, ShelterRecord};
pub use normalizer::{normalize_records, parse_timestamp, NormalizationReport};
pub use config::{Config, MapConfig, ServerConfig, SourceConfig, SourceKind, DEFAULT_CONFIG_FILE};
pub use warehouse::{open_source, CsvSource, RecordSource, SqliteWarehouse};
pub use store::RecordStore;
pub use filter::{
    apply_filters, DateRange, FilterCriteria, FilterDimension, FilterOptions, FilterQuery,
    Selection, EMPTY_SELECTION_WARNING,
};
pub use aggregate::{
    category_frequency, duration_distribution, monthly_intake, CategoryCount,
    CategoryFrequency, DurationDistribution, DurationSummary, MonthlyCount, MonthlyTrend,
};
pub use geo::{geo_summary, GeoPoint, GeoSummary, PointMarker, ZoneSummary, DEFAULT_CENTER};
pub use dashboard::{DashboardSettings, DashboardView, Overview};
pub use quality::{
    BatchSummary, DataQualityEngine, QualityReport, Severity,
    ValidationResult as QualityValidationResult,
};
pub use logging::init_logging;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
