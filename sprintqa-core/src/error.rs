/// Failure taxonomy shared by every pipeline stage.
///
/// Variants carry a human-readable detail string; the orchestrator decides
/// per kind whether the failure skips the current item or ends the pass.
#[derive(Debug, thiserror::Error)]
pub enum QaError {
    #[error("No configuration found for tenant host '{0}'")]
    ConfigNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document fetch error: {0}")]
    Fetch(String),

    #[error("Tracker error: {0}")]
    Tracker(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Attach error: {0}")]
    Attach(String),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl QaError {
    /// Short stable label used in logs and chat notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            QaError::ConfigNotFound(_) => "ConfigNotFound",
            QaError::InvalidUrl(_) => "InvalidURL",
            QaError::Config(_) => "ConfigError",
            QaError::Fetch(_) => "FetchError",
            QaError::Tracker(_) => "TrackerError",
            QaError::Synthesis(_) => "SynthesisError",
            QaError::Parse(_) => "ParseError",
            QaError::Attach(_) => "AttachError",
            QaError::Notify(_) => "NotifyError",
            QaError::Ledger(_) => "LedgerError",
            QaError::Spreadsheet(_) => "SpreadsheetError",
            QaError::Io(_) => "IoError",
            QaError::Serde(_) => "SerializationError",
        }
    }

    /// Whether this failure ends the whole pass instead of just the current item.
    ///
    /// Only ledger persistence qualifies: continuing after a failed save would
    /// let later items run against a ledger that no longer matches disk.
    pub fn is_pass_fatal(&self) -> bool {
        matches!(self, QaError::Ledger(_))
    }
}

pub type Result<T> = std::result::Result<T, QaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QaError::ConfigNotFound("acme.atlassian.net".to_string());
        assert_eq!(err.to_string(), "No configuration found for tenant host 'acme.atlassian.net'");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: QaError = io_err.into();
        assert!(matches!(err, QaError::Io(_)));
        assert_eq!(err.kind(), "IoError");
    }

    #[test]
    fn test_only_ledger_is_pass_fatal() {
        assert!(QaError::Ledger("disk full".into()).is_pass_fatal());
        assert!(!QaError::Attach("403".into()).is_pass_fatal());
        assert!(!QaError::Parse("bad json".into()).is_pass_fatal());
        assert!(!QaError::Fetch("404".into()).is_pass_fatal());
    }
}
