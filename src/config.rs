//! Configuration file handling.
//!
//! Settings come from an optional `shelter-dashboard.toml`; every field has a
//! default so the file can be partial or absent. CLI flags are applied on top
//! by the binaries.

use crate::geo::GeoPoint;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "shelter-dashboard.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where records are loaded from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Map rendering settings.
    #[serde(default)]
    pub map: MapConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Kind of record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// CSV export with a header row.
    Csv,
    /// Table in a SQLite database, opened read-only.
    Sqlite,
}

/// Record source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_kind")]
    pub kind: SourceKind,

    /// CSV file or SQLite database path.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Table to query (SQLite only).
    #[serde(default = "default_table")]
    pub table: String,

    /// Maximum number of rows fetched per session.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            path: default_path(),
            table: default_table(),
            limit: default_limit(),
        }
    }
}

fn default_kind() -> SourceKind {
    SourceKind::Csv
}

fn default_path() -> PathBuf {
    PathBuf::from("data/processed_animal_shelter.csv")
}

fn default_table() -> String {
    "processed_animal_shelter".to_string()
}

fn default_limit() -> usize {
    1000
}

/// Map settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Map center used when no record has coordinates.
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,

    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
        }
    }
}

impl MapConfig {
    pub fn fallback_center(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.fallback_latitude,
            longitude: self.fallback_longitude,
        }
    }
}

// San Jose city hall
fn default_fallback_latitude() -> f64 {
    37.3382
}

fn default_fallback_longitude() -> f64 {
    -121.8863
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

fn default_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from an explicit path, else from the default file if it exists,
    /// else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")
    }

    /// Write the default configuration to `path`, refusing to overwrite.
    pub fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            bail!(
                "{} already exists. Remove it first or edit it manually.",
                path.display()
            );
        }

        std::fs::write(path, Self::default_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.kind, SourceKind::Csv);
        assert_eq!(config.source.limit, 1000);
        assert_eq!(config.source.table, "processed_animal_shelter");
        assert_eq!(config.map.fallback_center().latitude, 37.3382);
        assert_eq!(config.map.fallback_center().longitude, -121.8863);
        assert_eq!(config.server.addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[source]
kind = "sqlite"
path = "warehouse.db"
limit = 250

[map]
fallback_latitude = 40.0
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.source.kind, SourceKind::Sqlite);
        assert_eq!(config.source.path, PathBuf::from("warehouse.db"));
        assert_eq!(config.source.limit, 250);
        assert_eq!(config.source.table, "processed_animal_shelter");
        assert_eq!(config.map.fallback_latitude, 40.0);
        assert_eq!(config.map.fallback_longitude, -121.8863);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_default_toml_round_trips() {
        let toml_str = Config::default_toml().unwrap();
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[map]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\naddr = \"127.0.0.1:8080\"").unwrap();

        let config = Config::resolve(Some(file.path())).unwrap();
        assert_eq!(config.server.addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_write_default_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        Config::write_default(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());

        std::fs::write(&path, "[server]\naddr = \"127.0.0.1:9000\"\n").unwrap();
        let err = Config::write_default(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // Existing file untouched
        assert_eq!(Config::load(&path).unwrap().server.addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_load_rejects_bad_kind() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[source]\nkind = \"bigquery\"").unwrap();

        assert!(Config::load(file.path()).is_err());
    }
}
