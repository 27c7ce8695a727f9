//! # Validation Module
//!
//! Input checks for denominations before they are stored.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Denomination::new()         no checks, always succeeds                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  DenominationRepository::insert()                                      │
//! │  └── THIS MODULE: validate_new_denomination()                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  SQLite: NOT NULL, CHECK (kind IN ('bill','coin'))                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashbox_core::validation::{validate_description, validate_image_url};
//!
//! assert!(validate_description("25 centavos").is_ok());
//! assert!(validate_image_url("https://cdn.example.com/25c.png").is_ok());
//! assert!(validate_image_url("not a url").is_err());
//! ```

use crate::denomination::Denomination;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::QuantityPolicy;
use crate::{MAX_DESCRIPTION_LEN, MAX_IMAGE_URL_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a denomination description.
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_DESCRIPTION_LEN` (100) characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates an image URL.
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_IMAGE_URL_LEN` (500) characters
/// - No whitespace inside the URL
///
/// Relative paths (`/img/1real.png`) are fine; the UI resolves them.
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::Required {
            field: "image_url".to_string(),
        });
    }

    if url.len() > MAX_IMAGE_URL_LEN {
        return Err(ValidationError::TooLong {
            field: "image_url".to_string(),
            max: MAX_IMAGE_URL_LEN,
        });
    }

    if url.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "image_url".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a face value. Must be positive.
pub fn validate_face_value(value: Money) -> ValidationResult<()> {
    if !value.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "face_value".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity under a policy.
///
/// ## Example
/// ```rust
/// use cashbox_core::QuantityPolicy;
/// use cashbox_core::validation::validate_quantity;
///
/// assert!(validate_quantity(0, QuantityPolicy::Reject).is_ok());
/// assert!(validate_quantity(-1, QuantityPolicy::Reject).is_err());
/// assert!(validate_quantity(-1, QuantityPolicy::AllowDeficit).is_ok());
/// ```
pub fn validate_quantity(quantity: i64, policy: QuantityPolicy) -> ValidationResult<()> {
    if !policy.permits(quantity) {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: format!("{} is negative and the policy is {}", quantity, policy),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Runs every check on a denomination about to be inserted.
///
/// The quantity is judged by `policy` (the storing side's), not by whatever
/// policy the entity was built with. Stops at the first failure.
pub fn validate_new_denomination(
    denomination: &Denomination,
    policy: QuantityPolicy,
) -> ValidationResult<()> {
    validate_face_value(denomination.face_value())?;
    validate_quantity(denomination.quantity(), policy)?;
    validate_description(denomination.description())?;
    validate_image_url(denomination.image_url())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DenominationKind;

    #[test]
    fn test_validate_description() {
        assert!(validate_description("1 real").is_ok());
        assert!(validate_description("25 centavos").is_ok());

        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("/img/1real.png").is_ok());
        assert!(validate_image_url("https://cdn.example.com/notes/200.png").is_ok());

        assert!(validate_image_url("").is_err());
        assert!(validate_image_url("/img/one real.png").is_err());
        assert!(validate_image_url(&format!("/{}", "a".repeat(500))).is_err());
    }

    #[test]
    fn test_validate_face_value() {
        assert!(validate_face_value(Money::from_cents(5)).is_ok());
        assert!(validate_face_value(Money::zero()).is_err());
        assert!(validate_face_value(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_new_denomination() {
        let good = Denomination::new(
            Money::from_cents(100),
            50,
            DenominationKind::Coin,
            "/img/1real.png",
            "1 real",
        );
        assert!(validate_new_denomination(&good, QuantityPolicy::Reject).is_ok());

        let no_label = Denomination::new(
            Money::from_cents(100),
            50,
            DenominationKind::Coin,
            "/img/1real.png",
            " ",
        );
        assert!(matches!(
            validate_new_denomination(&no_label, QuantityPolicy::Reject),
            Err(ValidationError::Required { .. })
        ));

        let negative = Denomination::new(
            Money::from_cents(100),
            -1,
            DenominationKind::Coin,
            "/img/1real.png",
            "1 real",
        );
        assert!(validate_new_denomination(&negative, QuantityPolicy::Reject).is_err());
        assert!(validate_new_denomination(&negative, QuantityPolicy::AllowDeficit).is_ok());
    }
}
