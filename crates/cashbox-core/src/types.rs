//! # Domain Types
//!
//! Supporting types for the cash-management domain.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │ DenominationId   │  │ DenominationKind │  │ QuantityPolicy   │      │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────  │      │
//! │  │  i64 surrogate   │  │  Bill            │  │  Reject          │      │
//! │  │  assigned once   │  │  Coin            │  │  AllowDeficit    │      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  ┌──────────────────────────┐  ┌──────────────────────────┐            │
//! │  │ DenominationRecord       │  │ ChangeRecord             │            │
//! │  │  stored-row shape used   │  │  change dispensed from   │            │
//! │  │  by Denomination::hydrate│  │  a denomination          │            │
//! │  └──────────────────────────┘  └──────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Denomination Id
// =============================================================================

/// Surrogate identity of a denomination.
///
/// Issued by the database sequence on insert, or chosen explicitly by the
/// seed script. No range is enforced: zero and negative values are valid ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct DenominationId(i64);

impl DenominationId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        DenominationId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for DenominationId {
    fn from(id: i64) -> Self {
        DenominationId(id)
    }
}

impl fmt::Display for DenominationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Denomination Kind
// =============================================================================

/// Whether a denomination is a paper bill or a coin.
///
/// Stored as text (`'bill'` / `'coin'`) so the database can never hold an
/// out-of-range discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DenominationKind {
    /// Paper or polymer note.
    Bill,
    /// Metal coin.
    Coin,
}

impl DenominationKind {
    /// Legacy integer code used by older till exports (1 = bill, 2 = coin).
    pub const fn legacy_code(&self) -> i64 {
        match self {
            DenominationKind::Bill => 1,
            DenominationKind::Coin => 2,
        }
    }
}

/// Accepts the legacy integer codes and nothing else.
///
/// ## Example
/// ```rust
/// use cashbox_core::DenominationKind;
///
/// assert_eq!(DenominationKind::try_from(1).unwrap(), DenominationKind::Bill);
/// assert_eq!(DenominationKind::try_from(2).unwrap(), DenominationKind::Coin);
/// assert!(DenominationKind::try_from(3).is_err());
/// ```
impl TryFrom<i64> for DenominationKind {
    type Error = ValidationError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(DenominationKind::Bill),
            2 => Ok(DenominationKind::Coin),
            _ => Err(ValidationError::NotAllowed {
                field: "kind".to_string(),
                allowed: vec!["1".to_string(), "2".to_string()],
            }),
        }
    }
}

impl fmt::Display for DenominationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenominationKind::Bill => write!(f, "bill"),
            DenominationKind::Coin => write!(f, "coin"),
        }
    }
}

// =============================================================================
// Quantity Policy
// =============================================================================

/// What a denomination does when a mutation would make its quantity negative.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  quantity = 0, withdraw()                                               │
/// │                                                                         │
/// │  Reject        → Err(InsufficientQuantity), quantity stays 0           │
/// │  AllowDeficit  → Ok, quantity = -1, Withdrawn event flags the deficit  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuantityPolicy {
    /// Negative quantities are refused.
    #[default]
    Reject,
    /// Negative quantities are kept as a deficit to reconcile later.
    AllowDeficit,
}

impl QuantityPolicy {
    /// Returns true if `quantity` is acceptable under this policy.
    #[inline]
    pub const fn permits(&self, quantity: i64) -> bool {
        match self {
            QuantityPolicy::Reject => quantity >= 0,
            QuantityPolicy::AllowDeficit => true,
        }
    }
}

impl fmt::Display for QuantityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityPolicy::Reject => write!(f, "reject"),
            QuantityPolicy::AllowDeficit => write!(f, "allow_deficit"),
        }
    }
}

impl FromStr for QuantityPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" | "strict" => Ok(QuantityPolicy::Reject),
            "allow_deficit" | "allow-deficit" | "allow" | "deficit" => {
                Ok(QuantityPolicy::AllowDeficit)
            }
            _ => Err(ValidationError::NotAllowed {
                field: "quantity_policy".to_string(),
                allowed: vec!["reject".to_string(), "allow_deficit".to_string()],
            }),
        }
    }
}

// =============================================================================
// Denomination Record
// =============================================================================

/// A denomination as stored by the persistence layer.
///
/// This is the input of [`Denomination::hydrate`](crate::Denomination::hydrate)
/// and the output of [`Denomination::to_record`](crate::Denomination::to_record).
/// Unlike a freshly constructed denomination it always carries an id and its
/// stored active flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DenominationRecord {
    pub id: DenominationId,
    pub face_value_cents: i64,
    pub kind: DenominationKind,
    pub quantity: i64,
    pub image_url: String,
    pub description: String,
    pub is_active: bool,
}

// =============================================================================
// Change Record
// =============================================================================

/// Units of a denomination handed out as change.
///
/// Belongs to the denomination through `denomination_id` only; the entity
/// never holds a list of these. Look them up through the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ChangeRecord {
    /// UUID v4.
    pub id: String,
    pub denomination_id: DenominationId,
    /// Units dispensed (always positive).
    pub units: i64,
    /// Sale or receipt this change belongs to, if any.
    pub reference: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_legacy_codes_round_trip() {
        for kind in [DenominationKind::Bill, DenominationKind::Coin] {
            assert_eq!(DenominationKind::try_from(kind.legacy_code()).unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_rejects_unknown_codes() {
        assert!(DenominationKind::try_from(0).is_err());
        assert!(DenominationKind::try_from(-1).is_err());
        assert!(DenominationKind::try_from(3).is_err());
    }

    #[test]
    fn test_kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&DenominationKind::Coin).unwrap();
        assert_eq!(json, "\"coin\"");
    }

    #[test]
    fn test_policy_default_is_reject() {
        assert_eq!(QuantityPolicy::default(), QuantityPolicy::Reject);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("reject".parse::<QuantityPolicy>().unwrap(), QuantityPolicy::Reject);
        assert_eq!(" STRICT ".parse::<QuantityPolicy>().unwrap(), QuantityPolicy::Reject);
        assert_eq!(
            "allow_deficit".parse::<QuantityPolicy>().unwrap(),
            QuantityPolicy::AllowDeficit
        );
        assert_eq!("allow".parse::<QuantityPolicy>().unwrap(), QuantityPolicy::AllowDeficit);
        assert!("sometimes".parse::<QuantityPolicy>().is_err());
    }

    #[test]
    fn test_policy_permits() {
        assert!(QuantityPolicy::Reject.permits(0));
        assert!(!QuantityPolicy::Reject.permits(-1));
        assert!(QuantityPolicy::AllowDeficit.permits(-100));
    }

    #[test]
    fn test_denomination_id_accessors() {
        let id = DenominationId::from(-4);
        assert_eq!(id.get(), -4);
        assert_eq!(id.to_string(), "-4");
    }
}
