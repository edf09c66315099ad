//! Client error types.
//!
//! Every failure a backend call can produce, in three groups: the
//! request never completed, the backend answered with a non-2xx status,
//! or the body did not match the expected envelope. The screen layer
//! turns all of them into static user-facing messages; nothing retries.

use thiserror::Error;

/// Errors from backend API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request failed in transit (connection refused, DNS, timeout
    /// imposed by the OS). Wraps the reqwest error.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Unexpected status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    /// The response body did not decode into the expected shape.
    #[error("Unexpected response shape from {endpoint}: {reason}")]
    UnexpectedShape { endpoint: String, reason: String },
}

impl ClientError {
    /// HTTP status when the failure was a status-level rejection.
    /// Used by the login screen to distinguish 400/401/404.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for backend API calls.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ClientError::UnexpectedStatus {
            endpoint: "/api/verify-user".to_string(),
            status: 401,
        };
        assert_eq!(err.status(), Some(401));

        let err = ClientError::UnexpectedShape {
            endpoint: "/api/sales".to_string(),
            reason: "missing data".to_string(),
        };
        assert_eq!(err.status(), None);
    }
}
