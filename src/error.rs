use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaffingError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported input format '{extension}' (expected csv, xlsx, xlsm, xlsb, xls or ods)")]
    UnsupportedFormat { extension: String },

    #[error("input has no sheets or rows")]
    EmptyInput,

    #[error("input must contain columns {expected}; missing '{column}'")]
    MissingColumn { column: String, expected: String },

    #[error("invalid integer in {field} for {scenario}: '{value}'")]
    InvalidInteger {
        field: String,
        scenario: String,
        value: String,
    },

    #[error("all input lists must be the same length (got {lengths:?})")]
    LengthMismatch { lengths: Vec<usize> },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl StaffingError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StaffingResult<T> = Result<T, StaffingError>;
