use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input file not found: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("malformed coordinates '{value}': {reason}")]
    MalformedCoordinate { value: String, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid UTF-8 in {} at line {line}", path.display())]
    Encoding { path: PathBuf, line: u64 },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("column contract mismatch for {table}: expected {expected:?}, record has {found:?}")]
    SchemaMismatch {
        table: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    pub(crate) fn malformed(value: &str, reason: impl Into<String>) -> Self {
        Self::MalformedCoordinate {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
