//! Error types module
//!
//! All fatal conditions in the replicator and validator flow through the
//! `AppError` enum. Each variant knows its HTTP status class, a
//! machine-readable code, and the level it should be logged at, so the api
//! crate can convert any of them into a structured response without the
//! host process ever terminating on one.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed client input
    Debug,
    /// Warning level - for enforcement decisions and recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Listing failed: {0}")]
    Listing(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Event parse error: {0}")]
    EventParse(String),

    #[error("Incomplete event: {0}")]
    IncompleteEvent(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code class for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::EventParse(_) | AppError::IncompleteEvent(_) => 400,
            AppError::Config(_)
            | AppError::Listing(_)
            | AppError::Download(_)
            | AppError::Upload(_)
            | AppError::Delete(_)
            | AppError::Internal(_) => 500,
        }
    }

    /// Machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIGURATION_ERROR",
            AppError::Listing(_) => "LISTING_ERROR",
            AppError::Download(_) => "DOWNLOAD_ERROR",
            AppError::Upload(_) => "UPLOAD_ERROR",
            AppError::Delete(_) => "DELETE_ERROR",
            AppError::EventParse(_) => "EVENT_PARSE_ERROR",
            AppError::IncompleteEvent(_) => "INCOMPLETE_EVENT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::EventParse(_) | AppError::IncompleteEvent(_) => LogLevel::Debug,
            AppError::Delete(_) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::EventParse(format!("JSON parsing error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_class_variants_map_to_400() {
        assert_eq!(AppError::EventParse("bad".into()).http_status_code(), 400);
        assert_eq!(
            AppError::IncompleteEvent("no triple".into()).http_status_code(),
            400
        );
    }

    #[test]
    fn test_fatal_variants_map_to_500() {
        for err in [
            AppError::Config("missing bucket_name".into()),
            AppError::Listing("timeout".into()),
            AppError::Download("reset".into()),
            AppError::Upload("403".into()),
            AppError::Delete("409".into()),
            AppError::Internal("bug".into()),
        ] {
            assert_eq!(err.http_status_code(), 500);
        }
    }

    #[test]
    fn test_json_error_becomes_event_parse() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.error_code(), "EVENT_PARSE_ERROR");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }
}
