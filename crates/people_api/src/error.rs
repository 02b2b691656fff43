//! Error model used by People API client operations.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PeopleError>;

/// Represents the failure modes of a People API call: rejected arguments, responses that do not match the expected shape, and transport-level problems (HTTP status, authentication, timeouts, connectivity).
#[derive(Debug, Error)]
pub enum PeopleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unexpected response: {0}")]
    Protocol(String),
    #[error("http {status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("authentication error: {0}")]
    Authentication(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected error: {0}")]
    Other(String),
}

impl PeopleError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PeopleError::InvalidArgument(message.into())
    }

    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        PeopleError::Http {
            status,
            message: message.into(),
        }
    }

    /// True when the failure happened before or while talking to the remote service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PeopleError::Http { .. }
                | PeopleError::Authentication(_)
                | PeopleError::Timeout(_)
                | PeopleError::Network(_)
        )
    }
}

impl From<reqwest::Error> for PeopleError {
    /// Converts reqwest errors into semantic PeopleError variants.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PeopleError::Timeout(err.to_string())
        } else if err.is_status() {
            let status = err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            PeopleError::http(status, err.to_string())
        } else if err.is_connect() || err.is_request() {
            PeopleError::Network(err.to_string())
        } else if err.is_decode() {
            PeopleError::Protocol(err.to_string())
        } else {
            PeopleError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PeopleError {
    /// A body that is not the JSON we expect is a protocol violation.
    fn from(err: serde_json::Error) -> Self {
        PeopleError::Protocol(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::PeopleError;
    use reqwest::StatusCode;

    #[test]
    fn http_errors_count_as_transport_failures() {
        let err = PeopleError::http(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "http 502 Bad Gateway: upstream down");
    }

    #[test]
    fn argument_and_protocol_errors_are_not_transport_failures() {
        assert!(!PeopleError::invalid_argument("user email is empty").is_transport());
        assert!(!PeopleError::Protocol("missing result".into()).is_transport());
    }

    #[test]
    fn serde_errors_become_protocol_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(PeopleError::from(err), PeopleError::Protocol(_)));
    }
}
