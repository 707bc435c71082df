// Typed errors for the places callers need to match on
// Everything else flows through anyhow with context, like the loaders in warehouse.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures opening a record source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid table name {0:?}: use letters, digits, '_' and '.' only")]
    InvalidTableName(String),

    #[error("source file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Failures turning user-supplied filter parameters into criteria
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid {field} date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
}
