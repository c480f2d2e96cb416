//! Error types module
//!
//! Scan errors come in two families. `ValidationError` is raised while building a
//! payload from user input and is recovered inside the session. `TransportError`
//! is raised by the transport adapter and always fails the scan. `ScanError`
//! unifies both for storage on the session and for presentation.

/// Generic message shown whenever a scan fails; the cause is appended to it.
pub const RETRY_MESSAGE: &str =
    "Something went wrong while analyzing. Check the backend connection and try again.";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like an unreachable backend
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "EMPTY_INPUT")
    fn error_code(&self) -> &'static str;

    /// Whether a fresh attempt may succeed without changing the input
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Input rejected by the payload builder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Unsupported content type: {mime_type}")]
    UnsupportedType { mime_type: String },

    #[error("Text too long: {len} characters (max: {max})")]
    TooLong { len: usize, max: usize },
}

/// Failure of the network exchange with the verification backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Verification service unreachable: {0}")]
    NetworkUnavailable(String),

    #[error("Verification service returned status {code}: {message}")]
    HttpStatus { code: u16, message: String },

    #[error("Failed to parse verification response: {0}")]
    BodyParseError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ScanError {
    /// Retry message plus the underlying cause, for display in the failed state.
    pub fn user_message(&self) -> String {
        format!("{} Cause: {}", RETRY_MESSAGE, self)
    }
}

/// Static metadata per variant: (error_code, recoverable, suggested_action, log_level).
fn validation_static_metadata(
    err: &ValidationError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        ValidationError::EmptyInput => (
            "EMPTY_INPUT",
            false,
            Some("Enter some content before scanning"),
            LogLevel::Debug,
        ),
        ValidationError::UnsupportedType { .. } => (
            "UNSUPPORTED_TYPE",
            false,
            Some("Choose a file of the supported type"),
            LogLevel::Debug,
        ),
        ValidationError::TooLong { .. } => (
            "TEXT_TOO_LONG",
            false,
            Some("Shorten the text and try again"),
            LogLevel::Debug,
        ),
    }
}

fn transport_static_metadata(
    err: &TransportError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        TransportError::NetworkUnavailable(_) => (
            "NETWORK_UNAVAILABLE",
            true,
            Some("Check that the verification service is running"),
            LogLevel::Warn,
        ),
        TransportError::HttpStatus { code, .. } if *code >= 500 => (
            "HTTP_STATUS",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        TransportError::HttpStatus { .. } => (
            "HTTP_STATUS",
            false,
            Some("Check the submitted content"),
            LogLevel::Warn,
        ),
        TransportError::BodyParseError(_) => (
            "BODY_PARSE_ERROR",
            true,
            Some("Contact support if this error persists"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for ValidationError {
    fn error_code(&self) -> &'static str {
        validation_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        validation_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        validation_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            ValidationError::EmptyInput => "Please provide some content to scan".to_string(),
            ValidationError::UnsupportedType { mime_type } => {
                format!("Files of type '{}' cannot be scanned here", mime_type)
            }
            ValidationError::TooLong { len, max } => {
                format!("Text is {} characters long; the limit is {}", len, max)
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        validation_static_metadata(self).3
    }
}

impl ErrorMetadata for TransportError {
    fn error_code(&self) -> &'static str {
        transport_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        transport_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        transport_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        transport_static_metadata(self).3
    }
}

impl ErrorMetadata for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            ScanError::Validation(err) => err.error_code(),
            ScanError::Transport(err) => err.error_code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            ScanError::Validation(err) => err.is_recoverable(),
            ScanError::Transport(err) => err.is_recoverable(),
        }
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            ScanError::Validation(err) => err.suggested_action(),
            ScanError::Transport(err) => err.suggested_action(),
        }
    }

    fn client_message(&self) -> String {
        match self {
            ScanError::Validation(err) => err.client_message(),
            ScanError::Transport(err) => err.client_message(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ScanError::Validation(err) => err.log_level(),
            ScanError::Transport(err) => err.log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_empty_input() {
        let err = ValidationError::EmptyInput;
        assert_eq!(err.error_code(), "EMPTY_INPUT");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_unsupported_type() {
        let err = ValidationError::UnsupportedType {
            mime_type: "text/plain".to_string(),
        };
        assert_eq!(err.error_code(), "UNSUPPORTED_TYPE");
        assert!(err.client_message().contains("text/plain"));
    }

    #[test]
    fn test_error_metadata_server_error_is_recoverable() {
        let err = TransportError::HttpStatus {
            code: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.error_code(), "HTTP_STATUS");
        assert!(err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_client_error_is_not_recoverable() {
        let err = TransportError::HttpStatus {
            code: 400,
            message: "No input provided".to_string(),
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_scan_error_delegates_metadata() {
        let err: ScanError = TransportError::NetworkUnavailable("connection refused".into()).into();
        assert_eq!(err.error_code(), "NETWORK_UNAVAILABLE");
        assert_eq!(
            err.suggested_action(),
            Some("Check that the verification service is running")
        );
    }

    #[test]
    fn test_user_message_includes_retry_text_and_cause() {
        let err: ScanError = TransportError::HttpStatus {
            code: 500,
            message: "Audio extraction failed".to_string(),
        }
        .into();
        let message = err.user_message();
        assert!(message.starts_with(RETRY_MESSAGE));
        assert!(message.contains("500"));
        assert!(message.contains("Audio extraction failed"));
    }
}
