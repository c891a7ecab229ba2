use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be decoded.
    #[error("Malformed CSV data in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A column every city file must carry is absent from the header.
    #[error("Required column \"{column}\" missing from {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A timestamp cell did not match any recognised format.
    #[error("Invalid timestamp \"{value}\" in {path} at row {row}")]
    TimestampParse {
        path: PathBuf,
        row: usize,
        value: String,
    },

    /// A city, month or day selector is not part of its enumeration.
    #[error("Invalid {kind}: {value}")]
    InvalidFilter { kind: &'static str, value: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = BikeshareError::FileRead {
            path: PathBuf::from("/data/chicago.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/chicago.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = BikeshareError::MissingColumn {
            path: PathBuf::from("washington.csv"),
            column: "Trip Duration".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Required column \"Trip Duration\" missing from washington.csv"
        );
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = BikeshareError::TimestampParse {
            path: PathBuf::from("chicago.csv"),
            row: 7,
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid timestamp \"yesterday\" in chicago.csv at row 7"
        );
    }

    #[test]
    fn test_error_display_invalid_filter() {
        let err = BikeshareError::InvalidFilter {
            kind: "city",
            value: "chigaco".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid city: chigaco");
    }

    #[test]
    fn test_error_display_config() {
        let err = BikeshareError::Config("empty data directory".to_string());
        assert_eq!(err.to_string(), "Configuration error: empty data directory");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BikeshareError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
