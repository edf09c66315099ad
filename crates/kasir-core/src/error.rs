//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, no manual impls
//! 2. Context in error messages (item id, location, index)
//! 3. Errors are enum variants, never bare strings
//! 4. Each variant maps to a user-facing message in the screen layer

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations and domain logic failures.
///
/// Caught by the screen layer and translated into user-facing messages;
/// nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Ledger row index does not exist.
    #[error("No ledger row at index {0}")]
    RowNotFound(usize),

    /// Removing the last remaining row is not allowed; the entry form
    /// always keeps at least one editable row.
    #[error("Ledger must keep at least one row")]
    LastRow,

    /// Ledger has exceeded the maximum allowed rows.
    #[error("Ledger cannot have more than {max} rows")]
    LedgerTooLarge { max: usize },

    /// Transfer source and destination are the same location.
    #[error("Transfer source and destination are both {location}")]
    SameLocation { location: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before business logic runs; always recoverable by re-editing
/// the offending field.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (unparseable id, unknown payment method, etc).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
