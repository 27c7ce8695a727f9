//! # Denomination Entity
//!
//! One denomination of physical currency held in the till: its face value,
//! whether it is a bill or a coin, how many units are available, and whether
//! it is still in circulation.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Denomination Lifecycle                              │
//! │                                                                         │
//! │  Denomination::new(...)          Denomination::hydrate(record)         │
//! │  (new, id = None, active)        (from storage, id + active restored)  │
//! │        │                                    │                           │
//! │        ▼                                    │                           │
//! │  assign_id(id)  ← once, by the repository   │                           │
//! │        │           or the seed script       │                           │
//! │        └──────────────────┬─────────────────┘                           │
//! │                           ▼                                             │
//! │        withdraw() / adjust() / activate() / deactivate()               │
//! │                                                                         │
//! │  Active ◄──── activate() ────┐                                         │
//! │     │                        │                                          │
//! │     └──── deactivate() ──► Inactive                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Chaining
//! Mutators return `&mut Self`, fallible ones inside a `Result`, so a
//! sequence of operations reads as one expression:
//!
//! ```rust
//! use cashbox_core::{CoreError, Denomination, DenominationKind, Money};
//!
//! let mut coin = Denomination::new(
//!     Money::from_cents(50),
//!     100,
//!     DenominationKind::Coin,
//!     "/img/50c.png",
//!     "50 centavos",
//! );
//!
//! coin.withdraw()?.withdraw()?.withdraw()?;
//! assert_eq!(coin.quantity(), 97);
//! # Ok::<(), CoreError>(())
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DenominationId, DenominationKind, DenominationRecord, QuantityPolicy};

// =============================================================================
// Denomination
// =============================================================================

/// A denomination of currency (bill or coin) and its available quantity.
///
/// Fields are private: `face_value`, `kind` and `description` cannot change
/// after construction, and every other field changes only through the
/// operations below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Denomination {
    /// Surrogate identity, `None` until assigned.
    id: Option<DenominationId>,

    /// Face value in cents.
    face_value: Money,

    /// Units available to hand out.
    quantity: i64,

    kind: DenominationKind,

    /// Full URL of an image of the bill or coin.
    image_url: String,

    /// Human label, e.g. "1 real", "25 centavos".
    description: String,

    /// Whether the denomination is still in circulation.
    active: bool,

    /// Runtime behaviour, not part of the stored data.
    #[serde(skip)]
    #[ts(skip)]
    policy: QuantityPolicy,
}

impl Denomination {
    /// Creates a new denomination.
    ///
    /// Always active, never identified. No input is validated here; see
    /// [`validate_new_denomination`](crate::validation::validate_new_denomination)
    /// for the checks the repository runs before insert.
    pub fn new(
        face_value: Money,
        quantity: i64,
        kind: DenominationKind,
        image_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Denomination {
            id: None,
            face_value,
            quantity,
            kind,
            image_url: image_url.into(),
            description: description.into(),
            active: true,
            policy: QuantityPolicy::default(),
        }
    }

    /// Restores a denomination from its stored representation.
    ///
    /// Everything comes back as stored, including a deficit quantity. Stored
    /// data is trusted; the policy only governs mutations made afterwards.
    pub fn hydrate(record: DenominationRecord) -> Self {
        Denomination {
            id: Some(record.id),
            face_value: Money::from_cents(record.face_value_cents),
            quantity: record.quantity,
            kind: record.kind,
            image_url: record.image_url,
            description: record.description,
            active: record.is_active,
            policy: QuantityPolicy::default(),
        }
    }

    /// Sets the quantity policy used by later mutations.
    pub fn with_policy(mut self, policy: QuantityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Converts back to the stored representation.
    ///
    /// Fails with [`CoreError::IdentityNotAssigned`] for a denomination that
    /// was never given an id.
    pub fn to_record(&self) -> CoreResult<DenominationRecord> {
        let id = self.id.ok_or(CoreError::IdentityNotAssigned)?;

        Ok(DenominationRecord {
            id,
            face_value_cents: self.face_value.cents(),
            kind: self.kind,
            quantity: self.quantity,
            image_url: self.image_url.clone(),
            description: self.description.clone(),
            is_active: self.active,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> Option<DenominationId> {
        self.id
    }

    #[inline]
    pub fn face_value(&self) -> Money {
        self.face_value
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn kind(&self) -> DenominationKind {
        self.kind
    }

    #[inline]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn policy(&self) -> QuantityPolicy {
        self.policy
    }

    /// True when more units were handed out than were on hand.
    #[inline]
    pub fn is_in_deficit(&self) -> bool {
        self.quantity < 0
    }

    /// Cash value of the units on hand. A deficit counts as zero.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::{Denomination, DenominationKind, Money};
    ///
    /// let bill = Denomination::new(
    ///     Money::from_cents(2000),
    ///     12,
    ///     DenominationKind::Bill,
    ///     "/img/20.png",
    ///     "20 reais",
    /// );
    /// assert_eq!(bill.total_value().cents(), 24000);
    /// ```
    pub fn total_value(&self) -> Money {
        self.face_value.multiply_quantity(self.quantity.max(0))
    }

    /// Fails with [`CoreError::DenominationInactive`] unless the denomination
    /// is in circulation.
    pub fn ensure_active(&self) -> CoreResult<()> {
        if !self.active {
            return Err(CoreError::DenominationInactive {
                description: self.description.clone(),
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Assigns the surrogate identity.
    ///
    /// Any value is accepted, including zero and negatives. A second call
    /// fails and keeps the first id.
    pub fn assign_id(&mut self, id: impl Into<DenominationId>) -> CoreResult<&mut Self> {
        let id = id.into();

        if let Some(current) = self.id {
            return Err(CoreError::IdentityAlreadyAssigned {
                current: current.get(),
                attempted: id.get(),
            });
        }

        self.id = Some(id);
        Ok(self)
    }

    /// Overwrites the quantity and image URL.
    ///
    /// Face value, kind, description and active flag are untouched. A negative
    /// quantity is refused under [`QuantityPolicy::Reject`], in which case
    /// neither field changes.
    pub fn adjust(&mut self, quantity: i64, image_url: impl Into<String>) -> CoreResult<&mut Self> {
        if !self.policy.permits(quantity) {
            return Err(CoreError::NegativeQuantity { quantity });
        }

        self.quantity = quantity;
        self.image_url = image_url.into();
        Ok(self)
    }

    /// Takes exactly one unit out of the till.
    ///
    /// Under [`QuantityPolicy::Reject`] an empty denomination refuses with
    /// [`CoreError::InsufficientQuantity`]. Under
    /// [`QuantityPolicy::AllowDeficit`] the quantity keeps going down past zero
    /// until `i64::MIN`, where it fails with [`CoreError::QuantityOutOfRange`].
    pub fn withdraw(&mut self) -> CoreResult<&mut Self> {
        let next = self
            .quantity
            .checked_sub(1)
            .ok_or(CoreError::QuantityOutOfRange {
                quantity: self.quantity,
            })?;

        if !self.policy.permits(next) {
            return Err(CoreError::InsufficientQuantity {
                description: self.description.clone(),
                available: self.quantity,
            });
        }

        self.quantity = next;
        Ok(self)
    }

    /// Takes the denomination out of circulation. Idempotent.
    pub fn deactivate(&mut self) -> &mut Self {
        self.active = false;
        self
    }

    /// Puts the denomination back into circulation. Idempotent.
    pub fn activate(&mut self) -> &mut Self {
        self.active = true;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
