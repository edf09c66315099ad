//! # Screen Error Type
//!
//! Unified error type for screen operations, plus the notice struct
//! screens surface to the user.
//!
//! ## Error Handling Strategy
//! ```text
//! validation failure ──► inline notice, user edits and retries
//! network / HTTP     ──► static message, form state preserved
//! bad response shape ──► same as network
//! ```
//! Nothing here is fatal; every failure path leaves the screen
//! interactive.

use serde::Serialize;
use thiserror::Error;

use kasir_client::ClientError;
use kasir_core::{CoreError, ValidationError};

// =============================================================================
// Screen Error
// =============================================================================

/// Failures a screen operation can produce.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Domain rule violation from kasir-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Backend call failure from kasir-client.
    #[error(transparent)]
    Api(#[from] ClientError),

    /// A submission is already in flight; the second attempt is refused
    /// instead of racing the first.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// The screen is not in the phase the operation requires.
    #[error("Cannot {action} in the current phase")]
    WrongPhase { action: &'static str },
}

impl From<ValidationError> for ScreenError {
    fn from(err: ValidationError) -> Self {
        ScreenError::Core(CoreError::Validation(err))
    }
}

impl ScreenError {
    /// HTTP status when the underlying failure was a status rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ScreenError::Api(err) => err.status(),
            _ => None,
        }
    }

    /// Whether this was a pre-network validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, ScreenError::Core(_))
    }
}

/// Result type for screen operations.
pub type ScreenResult<T> = Result<T, ScreenError>;

// =============================================================================
// Notices
// =============================================================================

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A static message the screen shows above or inside the form. The
/// texts are the dashboard's own locale-mixed strings, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}
