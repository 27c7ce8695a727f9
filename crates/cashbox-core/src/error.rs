//! # Error Types
//!
//! Domain-specific error types for cashbox-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cashbox-core errors (this file)                                       │
//! │  ├── CoreError        - Denomination rule violations                   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cashbox-db errors (separate crate)                                    │
//! │  └── DbError          - Database failures, wraps CoreError             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Denomination rule violations.
///
/// Every variant corresponds to a state the entity refuses to enter. When an
/// operation returns one of these, the denomination is left unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The denomination already has a surrogate identity.
    ///
    /// ## When This Occurs
    /// - A seed script assigns ids to entities that were already inserted
    /// - `insert` is called twice with the same entity
    #[error("Denomination already has id {current}, cannot assign {attempted}")]
    IdentityAlreadyAssigned { current: i64, attempted: i64 },

    /// The operation needs an identity but none was assigned yet.
    #[error("Denomination has no id assigned")]
    IdentityNotAssigned,

    /// Withdrawal would take the quantity below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Dispense change: 1 × "50 centavos"
    ///      │
    ///      ▼
    /// Check quantity: available = 0
    ///      │
    ///      ▼
    /// InsufficientQuantity { description: "50 centavos", available: 0 }
    ///      │
    ///      ▼
    /// Operator restocks or picks another denomination
    /// ```
    #[error("Insufficient quantity of {description}: available {available}")]
    InsufficientQuantity { description: String, available: i64 },

    /// A negative quantity was supplied where the policy forbids it.
    #[error("Quantity cannot be negative: {quantity}")]
    NegativeQuantity { quantity: i64 },

    /// A deficit so deep that one more unit cannot be represented.
    #[error("Quantity {quantity} cannot go any lower")]
    QuantityOutOfRange { quantity: i64 },

    /// The denomination is out of circulation.
    #[error("Denomination {description} is inactive")]
    DenominationInactive { description: String },

    /// No denomination exists with the given id.
    #[error("Denomination not found: {0}")]
    DenominationNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
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

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientQuantity {
            description: "50 centavos".to_string(),
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient quantity of 50 centavos: available 0"
        );

        let err = CoreError::IdentityAlreadyAssigned {
            current: 3,
            attempted: 7,
        };
        assert_eq!(
            err.to_string(),
            "Denomination already has id 3, cannot assign 7"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "description".to_string(),
        };
        assert_eq!(err.to_string(), "description is required");

        let err = ValidationError::NotAllowed {
            field: "kind".to_string(),
            allowed: vec!["1".to_string(), "2".to_string()],
        };
        assert_eq!(err.to_string(), r#"kind must be one of: ["1", "2"]"#);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "face_value".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
