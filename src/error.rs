//! Error handling for bpmcalc
//!
//! Every error carries a stable code and, where it makes sense, a corrective
//! message that the front end can show to the user as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bpmcalc operations
pub type Result<T> = std::result::Result<T, BpmError>;

/// Main error type for bpmcalc operations
#[derive(Error, Debug)]
pub enum BpmError {
    // Validation Errors
    #[error("BPM out of range: {value} (expected 0 < bpm <= {max})")]
    BpmOutOfRange { value: f64, max: f64 },

    #[error("Milliseconds must be positive, got {value}")]
    MsOutOfRange { value: f64 },

    // Parse Errors
    #[error("Not a number: '{input}'")]
    NotANumber { input: String },

    #[error("Malformed reverse calculation: '{input}'")]
    MsFormat { input: String },

    #[error("Unknown note kind: '{token}'")]
    UnknownNoteKind { token: String },

    #[error("Malformed callback payload: '{payload}'")]
    MalformedPayload { payload: String },

    // Persistence Errors
    #[error("Failed to read favorites store: {path}: {source}")]
    StoreReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write favorites store: {path}: {source}")]
    StoreWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Favorites store is corrupt: {path}: {source}")]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Favorites store lock poisoned")]
    StoreLockPoisoned,

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Broad category of a [`BpmError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Numeric input outside its required range
    Validation,
    /// Input that does not match any accepted command shape
    Parse,
    /// Backing store unreadable or unwritable
    Persistence,
}

impl BpmError {
    /// Get the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BpmError::BpmOutOfRange { .. } | BpmError::MsOutOfRange { .. } => {
                ErrorKind::Validation
            }
            BpmError::NotANumber { .. }
            | BpmError::MsFormat { .. }
            | BpmError::UnknownNoteKind { .. }
            | BpmError::MalformedPayload { .. } => ErrorKind::Parse,
            BpmError::StoreReadError { .. }
            | BpmError::StoreWriteError { .. }
            | BpmError::StoreCorrupt { .. }
            | BpmError::StoreLockPoisoned
            | BpmError::Serialization(_) => ErrorKind::Persistence,
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            BpmError::BpmOutOfRange { .. } => "BPM_OUT_OF_RANGE",
            BpmError::MsOutOfRange { .. } => "MS_OUT_OF_RANGE",
            BpmError::NotANumber { .. } => "NOT_A_NUMBER",
            BpmError::MsFormat { .. } => "MS_FORMAT",
            BpmError::UnknownNoteKind { .. } => "UNKNOWN_NOTE_KIND",
            BpmError::MalformedPayload { .. } => "MALFORMED_PAYLOAD",
            BpmError::StoreReadError { .. } => "STORE_READ_ERROR",
            BpmError::StoreWriteError { .. } => "STORE_WRITE_ERROR",
            BpmError::StoreCorrupt { .. } => "STORE_CORRUPT",
            BpmError::StoreLockPoisoned => "STORE_LOCK_POISONED",
            BpmError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    ///
    /// Persistence failures are recoverable too: favorites are a convenience
    /// feature, so the caller keeps serving conversions without them.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BpmError::StoreLockPoisoned)
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            BpmError::BpmOutOfRange { .. } => vec!["Send a BPM between 1 and 9999"],
            BpmError::MsOutOfRange { .. } => vec!["Milliseconds must be a positive number"],
            BpmError::NotANumber { .. } => vec![
                "Send a BPM number, for example: 140",
                "Or 'ms 500' for a reverse calculation",
            ],
            BpmError::MsFormat { .. } => vec!["Format: 'ms 500' or 'ms 500 1/8'"],
            BpmError::UnknownNoteKind { .. } => vec![
                "Available note values: 1/1, 1/2, 1/4, 1/8, 1/16",
                "Example: 'ms 250 1/8'",
            ],
            BpmError::StoreReadError { .. } | BpmError::StoreCorrupt { .. } => {
                vec!["Favorites were reset; the store is recreated on the next save"]
            }
            BpmError::StoreWriteError { .. } => vec![
                "Check that the favorites file location is writable",
                "Conversions keep working without favorites",
            ],
            _ => vec![],
        }
    }

    /// Get a user-friendly message for this error
    pub fn friendly_message(&self) -> String {
        match self {
            BpmError::BpmOutOfRange { .. } => "BPM must be between 1 and 9999".to_string(),
            BpmError::MsOutOfRange { .. } => {
                "Milliseconds must be a positive number".to_string()
            }
            BpmError::NotANumber { .. } => {
                "Send a BPM number (for example: 140)\nOr 'ms 500' for a reverse calculation"
                    .to_string()
            }
            BpmError::MsFormat { .. } => "Format: 'ms 500' or 'ms 500 1/8'".to_string(),
            BpmError::UnknownNoteKind { .. } => {
                "Available note values: 1/1, 1/2, 1/4, 1/8, 1/16\nExample: 'ms 250 1/8'"
                    .to_string()
            }
            BpmError::MalformedPayload { .. } => "That button is no longer valid".to_string(),
            BpmError::StoreWriteError { .. } | BpmError::StoreLockPoisoned => {
                "Favorites are unavailable right now. Please try again.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = BpmError::UnknownNoteKind {
            token: "1/3".to_string(),
        };
        assert_eq!(err.error_code(), "UNKNOWN_NOTE_KIND");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_validation_kind() {
        let err = BpmError::BpmOutOfRange {
            value: 0.0,
            max: 9999.0,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.friendly_message().contains("9999"));
    }

    #[test]
    fn test_persistence_is_recoverable() {
        let err = BpmError::StoreWriteError {
            path: PathBuf::from("favorites.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert!(err.is_recoverable());
        assert!(!err.recovery_suggestions().is_empty());
    }
}
