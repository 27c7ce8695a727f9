//! # Denomination Commands
//!
//! Mutations as values. A [`DenominationCommand`] is applied with
//! [`Denomination::apply`], which runs the matching operation and describes
//! what changed as a [`DenominationEvent`].
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Service layer             cashbox-core              Service layer      │
//! │                                                                         │
//! │  DenominationCommand ──► Denomination::apply() ──► DenominationEvent   │
//! │  (Withdraw)              (rules + policy)          (Withdrawn 3 → 2)    │
//! │                                 │                        │              │
//! │                                 ▼                        ▼              │
//! │                          Err(CoreError)            tracing / audit     │
//! │                          state unchanged                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core stays free of I/O: it never logs, it hands back the event and the
//! caller decides where it goes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::denomination::Denomination;
use crate::error::CoreResult;
use crate::types::DenominationId;

// =============================================================================
// Command
// =============================================================================

/// A requested change to a denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DenominationCommand {
    AssignId { id: DenominationId },
    Adjust { quantity: i64, image_url: String },
    Withdraw,
    Activate,
    Deactivate,
}

// =============================================================================
// Event
// =============================================================================

/// A change that was applied to a denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DenominationEvent {
    IdAssigned {
        id: DenominationId,
    },
    Adjusted {
        previous_quantity: i64,
        quantity: i64,
        image_url: String,
    },
    Withdrawn {
        previous_quantity: i64,
        quantity: i64,
    },
    Activated,
    Deactivated,
}

impl DenominationEvent {
    /// Returns the new quantity if this event left the denomination in
    /// deficit.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::DenominationEvent;
    ///
    /// let event = DenominationEvent::Withdrawn { previous_quantity: 0, quantity: -1 };
    /// assert_eq!(event.deficit(), Some(-1));
    ///
    /// let event = DenominationEvent::Withdrawn { previous_quantity: 5, quantity: 4 };
    /// assert_eq!(event.deficit(), None);
    /// ```
    pub fn deficit(&self) -> Option<i64> {
        match self {
            DenominationEvent::Withdrawn { quantity, .. }
            | DenominationEvent::Adjusted { quantity, .. }
                if *quantity < 0 =>
            {
                Some(*quantity)
            }
            _ => None,
        }
    }
}

// =============================================================================
// Apply
// =============================================================================

impl Denomination {
    /// Applies a command and reports what changed.
    ///
    /// Failures are the same as the direct operations and leave the
    /// denomination unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::{Denomination, DenominationCommand, DenominationEvent, DenominationKind, Money};
    ///
    /// let mut coin = Denomination::new(
    ///     Money::from_cents(25),
    ///     3,
    ///     DenominationKind::Coin,
    ///     "/img/25c.png",
    ///     "25 centavos",
    /// );
    ///
    /// let event = coin.apply(DenominationCommand::Withdraw).unwrap();
    /// assert_eq!(event, DenominationEvent::Withdrawn { previous_quantity: 3, quantity: 2 });
    /// ```
    pub fn apply(&mut self, command: DenominationCommand) -> CoreResult<DenominationEvent> {
        let previous_quantity = self.quantity();

        let event = match command {
            DenominationCommand::AssignId { id } => {
                self.assign_id(id)?;
                DenominationEvent::IdAssigned { id }
            }
            DenominationCommand::Adjust {
                quantity,
                image_url,
            } => {
                self.adjust(quantity, image_url.clone())?;
                DenominationEvent::Adjusted {
                    previous_quantity,
                    quantity,
                    image_url,
                }
            }
            DenominationCommand::Withdraw => {
                self.withdraw()?;
                DenominationEvent::Withdrawn {
                    previous_quantity,
                    quantity: self.quantity(),
                }
            }
            DenominationCommand::Activate => {
                self.activate();
                DenominationEvent::Activated
            }
            DenominationCommand::Deactivate => {
                self.deactivate();
                DenominationEvent::Deactivated
            }
        };

        Ok(event)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
