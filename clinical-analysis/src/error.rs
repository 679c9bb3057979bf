use serde::Serialize;
use thiserror::Error;

pub const TIMEOUT_MESSAGE: &str = "Request timed out. The server took too long to respond.";
pub const NETWORK_MESSAGE: &str =
    "Network error. Unable to reach the server. Please check your connection.";
pub const UNKNOWN_MESSAGE: &str = "Failed to analyze medical record. Please try again.";

/// Category of a failed analysis call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Timeout,
    ServerError,
    NetworkUnreachable,
    Unknown,
}

/// User-facing description of a failed analysis call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status for `ServerError`, absent otherwise
    pub status: Option<u16>,
}

impl ClassifiedError {
    pub fn timeout() -> Self {
        Self {
            kind: ErrorKind::Timeout,
            message: TIMEOUT_MESSAGE.to_string(),
            status: None,
        }
    }

    /// `detail` is the server-supplied message, or the status reason phrase
    pub fn server(status: u16, detail: &str) -> Self {
        Self {
            kind: ErrorKind::ServerError,
            message: format!("Server error: {} - {}", status, detail),
            status: Some(status),
        }
    }

    pub fn network_unreachable() -> Self {
        Self {
            kind: ErrorKind::NetworkUnreachable,
            message: NETWORK_MESSAGE.to_string(),
            status: None,
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: ErrorKind::Unknown,
            message: UNKNOWN_MESSAGE.to_string(),
            status: None,
        }
    }
}

/// Rejection raised before any call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Clinical note is empty")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{0}': expected an http:// or https:// URL")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout '{0}': expected a positive number of milliseconds")]
    InvalidTimeout(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SubmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_message_carries_status_and_detail() {
        let err = ClassifiedError::server(500, "db down");
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert_eq!(err.status, Some(500));
        assert_eq!(err.to_string(), "Server error: 500 - db down");
    }

    #[test]
    fn display_is_the_user_message() {
        assert_eq!(ClassifiedError::timeout().to_string(), TIMEOUT_MESSAGE);
        assert_eq!(
            ClassifiedError::network_unreachable().to_string(),
            NETWORK_MESSAGE
        );
        assert_eq!(ClassifiedError::unknown().to_string(), UNKNOWN_MESSAGE);
    }
}
