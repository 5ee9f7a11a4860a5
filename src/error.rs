//! Error taxonomy for roster operations.
//!
//! "No match" is not an error: searches return `Ok(None)` and the form renders
//! "No results found".

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppealError>;

#[derive(Error, Debug)]
pub enum AppealError {
    /// Credential file missing or rejected by the token endpoint
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network, quota or permission failure on a spreadsheet call
    #[error("Remote store request failed: {0}")]
    RemoteStore(String),

    /// The roster does not have the shape the form relies on
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for AppealError {
    fn from(err: reqwest::Error) -> Self {
        AppealError::RemoteStore(err.to_string())
    }
}

impl AppealError {
    /// Whether the error should abort the program rather than a single step
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppealError::Authentication(_) | AppealError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppealError::RemoteStore("HTTP 429: quota exceeded".to_string());
        assert_eq!(err.to_string(), "Remote store request failed: HTTP 429: quota exceeded");

        let err = AppealError::InvariantViolation("No header found in spreadsheet".to_string());
        assert!(err.to_string().contains("No header found"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(AppealError::Authentication("bad key".into()).is_fatal());
        assert!(AppealError::Config("SPREADSHEET_ID".into()).is_fatal());
        assert!(!AppealError::RemoteStore("timeout".into()).is_fatal());
        assert!(!AppealError::InvariantViolation("header".into()).is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppealError = io.into();
        assert!(matches!(err, AppealError::Io(_)));
    }
}
