// 🏛️ Warehouse sessions
// Record sources are opened at session start, fetched once, then closed.
// No process-wide client: the binary owns the session and passes it in.

use crate::config::{SourceConfig, SourceKind};
use crate::error::SourceError;
use crate::record::RawRecord;
use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// RecordSource - anything that can hand over a batch of raw shelter rows
pub trait RecordSource {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Fetch up to `limit` rows, in the source's natural order
    fn fetch(&mut self, limit: usize) -> Result<Vec<RawRecord>>;

    /// End the session. Sources holding a connection release it here.
    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

/// Open the source described by the config
///
/// Factory pattern: Returns Box<dyn RecordSource> for polymorphism
pub fn open_source(config: &SourceConfig) -> Result<Box<dyn RecordSource>> {
    match config.kind {
        SourceKind::Csv => Ok(Box::new(CsvSource::open(&config.path)?)),
        SourceKind::Sqlite => Ok(Box::new(SqliteWarehouse::open(&config.path, &config.table)?)),
    }
}

// ============================================================================
// CSV SOURCE
// ============================================================================

/// CSV export of the warehouse table (header row, columns by name)
pub struct CsvSource {
    path: PathBuf,
    name: String,
}

impl CsvSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()).into());
        }

        Ok(CsvSource {
            path: path.to_path_buf(),
            name: format!("csv:{}", path.display()),
        })
    }
}

impl RecordSource for CsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&mut self, limit: usize) -> Result<Vec<RawRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open CSV file: {}", self.path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header in {}", self.path.display()))?
            .iter()
            .map(String::from)
            .collect();
        let index = ColumnIndex::new(&headers);

        let mut rows = Vec::new();
        for (line_num, result) in reader.records().take(limit).enumerate() {
            let record = result.with_context(|| {
                format!(
                    "Failed to parse CSV line {} in {}",
                    line_num + 2, // 1-indexed + header row
                    self.path.display()
                )
            })?;
            rows.push(index.build(|i| Ok::<_, anyhow::Error>(csv_text(&record, i)))?);
        }

        debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

// ============================================================================
// SQLITE WAREHOUSE
// ============================================================================

/// Read-only SQLite stand-in for the cloud warehouse
pub struct SqliteWarehouse {
    conn: Connection,
    table: String,
    name: String,
}

/// Column positions in a header row, looked up by name ignoring ASCII case
///
/// Shared by the CSV and SQLite readers so both accept the same column names.
struct ColumnIndex {
    animal_id: Option<usize>,
    animal_type: Option<usize>,
    sex: Option<usize>,
    intake_condition: Option<usize>,
    intake_date: Option<usize>,
    outcome_date: Option<usize>,
    last_update: Option<usize>,
    dob: Option<usize>,
    zip_code: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl ColumnIndex {
    fn new(columns: &[String]) -> Self {
        let find = |name: &str| columns.iter().position(|c| c.eq_ignore_ascii_case(name));
        ColumnIndex {
            animal_id: find("AnimalID"),
            animal_type: find("AnimalType"),
            sex: find("Sex"),
            intake_condition: find("IntakeCondition"),
            intake_date: find("IntakeDate"),
            outcome_date: find("OutcomeDate"),
            last_update: find("LastUpdate"),
            dob: find("DOB"),
            zip_code: find("ZipCode"),
            latitude: find("Latitude"),
            longitude: find("Longitude"),
        }
    }

    /// Assemble a row, asking `field` for the text at each column position
    fn build<E>(
        &self,
        mut field: impl FnMut(Option<usize>) -> Result<Option<String>, E>,
    ) -> Result<RawRecord, E> {
        Ok(RawRecord {
            animal_id: field(self.animal_id)?,
            animal_type: field(self.animal_type)?,
            sex: field(self.sex)?,
            intake_condition: field(self.intake_condition)?,
            intake_date: field(self.intake_date)?,
            outcome_date: field(self.outcome_date)?,
            last_update: field(self.last_update)?,
            dob: field(self.dob)?,
            zip_code: field(self.zip_code)?,
            latitude: field(self.latitude)?,
            longitude: field(self.longitude)?,
        })
    }

    fn read(&self, row: &Row) -> rusqlite::Result<RawRecord> {
        self.build(|index| text_at(row, index))
    }
}

/// Empty CSV cells are missing values, like SQL NULL
fn csv_text(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    let value = record.get(index?)?;
    (!value.is_empty()).then(|| value.to_string())
}

/// Read any SQLite value as text; the normalizer does the typing
fn text_at(row: &Row, index: Option<usize>) -> rusqlite::Result<Option<String>> {
    let Some(index) = index else {
        return Ok(None);
    };

    let value: Value = row.get(index)?;
    Ok(match value {
        Value::Null => None,
        Value::Integer(n) => Some(n.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(bytes) => String::from_utf8(bytes).ok(),
    })
}

/// Table names are interpolated into SQL, so only plain identifiers pass
pub fn validate_table_name(table: &str) -> Result<(), SourceError> {
    let valid = !table.is_empty()
        && table
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));

    if valid {
        Ok(())
    } else {
        Err(SourceError::InvalidTableName(table.to_string()))
    }
}

fn quote_table_name(table: &str) -> String {
    table
        .split('.')
        .map(|part| format!("\"{}\"", part))
        .collect::<Vec<_>>()
        .join(".")
}

impl SqliteWarehouse {
    /// Open a database file read-only
    pub fn open(path: &Path, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()).into());
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open warehouse database: {}", path.display()))?;

        info!("Opened warehouse {} (table {})", path.display(), table);
        Ok(SqliteWarehouse {
            conn,
            table: table.to_string(),
            name: format!("sqlite:{}#{}", path.display(), table),
        })
    }

    /// Wrap an existing connection (in-memory databases, tests)
    pub fn from_connection(conn: Connection, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        Ok(SqliteWarehouse {
            conn,
            table: table.to_string(),
            name: format!("sqlite:{}", table),
        })
    }
}

impl RecordSource for SqliteWarehouse {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&mut self, limit: usize) -> Result<Vec<RawRecord>> {
        let sql = format!("SELECT * FROM {} LIMIT ?1", quote_table_name(&self.table));
        let mut stmt = self
            .conn
            .prepare(&sql)
            .with_context(|| format!("Failed to query table {}", self.table))?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let index = ColumnIndex::new(&columns);

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![limit], |row| index.read(row))?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read rows from {}", self.table))?;

        debug!("Fetched {} rows from {}", rows.len(), self.table);
        Ok(rows)
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| err)
            .context("Failed to close warehouse connection")
    }
}
