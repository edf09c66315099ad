//! # Validation Module
//!
//! Field validation shared by the entry forms. Everything here runs
//! before any network call; failures surface inline and the user edits
//! and retries.
//!
//! ## Usage
//! ```rust
//! use kasir_core::validation::{validate_item_id, validate_quantity};
//!
//! validate_item_id("BRG-001").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::Location;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item id.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Maximum 50 characters
pub fn validate_item_id(item_id: &str) -> ValidationResult<()> {
    let item_id = item_id.trim();

    if item_id.is_empty() {
        return Err(ValidationError::Required {
            field: "item_id".to_string(),
        });
    }

    if item_id.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "item_id".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a customer name before payment details are accepted.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 100 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer_name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "customer_name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a free-text description on transfer/receive/return forms.
/// All three forms treat it as required.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity entered on a form.
///
/// ## Rules
/// - Must be positive (> 0); the stock clamp in the ledger handles the
///   upper bound separately
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a corrected price. Zero is rejected; a correction to a free
/// item has never been a real case and is always a typo.
pub fn validate_price(price: crate::money::Money) -> ValidationResult<()> {
    if price.amount() <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage (0 to 100).
pub fn validate_discount_percent(percent: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Transfer Validators
// =============================================================================

/// Validates the transfer form as a whole: every field present and the
/// endpoints distinct. Runs before the confirm dialog, so a bad form
/// never reaches the network.
pub fn validate_transfer(
    source: Option<Location>,
    destination: Option<Location>,
    item_id: &str,
    quantity: i64,
    description: &str,
) -> Result<(Location, Location), crate::error::CoreError> {
    let source = source.ok_or(ValidationError::Required {
        field: "source".to_string(),
    })?;
    let destination = destination.ok_or(ValidationError::Required {
        field: "destination".to_string(),
    })?;

    if source == destination {
        return Err(crate::error::CoreError::SameLocation {
            location: source.to_string(),
        });
    }

    validate_item_id(item_id)?;
    validate_quantity(quantity)?;
    validate_description(description)?;

    Ok((source, destination))
}

// =============================================================================
// Unit Tests
// =============================================================================
