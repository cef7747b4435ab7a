//! Error types for the surf forecast service.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using SurfError.
pub type SurfResult<T> = Result<T, SurfError>;

/// Primary error type for registry, table and artifact operations.
#[derive(Debug, Error)]
pub enum SurfError {
    // === Request Errors ===
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Invalid location key: {0:?}")]
    InvalidLocationKey(String),

    #[error("Unknown forecast model: {0}")]
    UnknownModel(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // === Upstream Data Errors ===
    #[error("Forecast table missing: {}", path.display())]
    UpstreamDataMissing { path: PathBuf },

    #[error("Forecast table {} is malformed: {message}", path.display())]
    UpstreamDataInvalid { path: PathBuf, message: String },

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl SurfError {
    /// Build the error for a forecast table that could not be opened.
    pub fn from_table_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            SurfError::UpstreamDataMissing {
                path: path.to_path_buf(),
            }
        } else {
            SurfError::Io(format!("{}: {}", path.display(), err))
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            SurfError::UnknownLocation(_)
            | SurfError::InvalidLocationKey(_)
            | SurfError::UnknownModel(_)
            | SurfError::NotFound(_) => 404,

            SurfError::UpstreamDataMissing { .. }
            | SurfError::UpstreamDataInvalid { .. }
            | SurfError::Config(_)
            | SurfError::Io(_) => 500,
        }
    }

    /// Whether the error is caused by missing or malformed upstream forecast data.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SurfError::UpstreamDataMissing { .. } | SurfError::UpstreamDataInvalid { .. }
        )
    }
}

impl From<std::io::Error> for SurfError {
    fn from(err: std::io::Error) -> Self {
        SurfError::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for SurfError {
    fn from(err: serde_yaml::Error) -> Self {
        SurfError::Config(format!("YAML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SurfError::UnknownLocation("x".into()).http_status_code(), 404);
        assert_eq!(SurfError::UnknownModel("x".into()).http_status_code(), 404);
        assert_eq!(
            SurfError::UpstreamDataMissing {
                path: PathBuf::from("a.csv")
            }
            .http_status_code(),
            500
        );
    }

    #[test]
    fn test_table_io_not_found_is_upstream() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let surf = SurfError::from_table_io(Path::new("static/forecast_dfs/gfs/jbay.csv"), err);
        assert!(surf.is_upstream());
        assert!(surf.to_string().contains("jbay.csv"));
    }

    #[test]
    fn test_table_io_other_is_io() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let surf = SurfError::from_table_io(Path::new("x.csv"), err);
        assert!(!surf.is_upstream());
        assert_eq!(surf.http_status_code(), 500);
    }
}
