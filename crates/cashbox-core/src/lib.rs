//! # cashbox-core: Pure Cash-Management Logic
//!
//! The domain model for the physical cash held in a point-of-sale till: one
//! [`Denomination`] per bill or coin, how many units are on hand, and whether
//! it is still in circulation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cashbox Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ cashbox-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐ ┌───────────┐ ┌───────────┐ ┌────────────┐  │   │
//! │  │   │ denomination │ │  command  │ │   money   │ │ validation │  │   │
//! │  │   │ Denomination │ │  Command  │ │   Money   │ │   rules    │  │   │
//! │  │   │   (entity)   │ │  Event    │ │  (cents)  │ │   checks   │  │   │
//! │  │   └──────────────┘ └───────────┘ └───────────┘ └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  cashbox-db (Database Layer)                    │   │
//! │  │     hydration, identity assignment, change records, seeding     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`denomination`] - The `Denomination` entity and its operations
//! - [`command`] - Commands and events for auditable mutations
//! - [`types`] - Ids, kinds, quantity policy, stored records
//! - [`money`] - Integer-cent money type
//! - [`error`] - Domain error types
//! - [`validation`] - Checks run before a denomination is stored
//!
//! ## Example Usage
//!
//! ```rust
//! use cashbox_core::{Denomination, DenominationKind, Money};
//!
//! let mut coin = Denomination::new(
//!     Money::from_cents(50),
//!     100,
//!     DenominationKind::Coin,
//!     "/img/50c.png",
//!     "50 centavos",
//! );
//!
//! coin.withdraw().unwrap();
//! coin.adjust(200, "/img/50c-v2.png").unwrap();
//! coin.deactivate();
//!
//! assert_eq!(coin.quantity(), 200);
//! assert!(!coin.is_active());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod command;
pub mod denomination;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use command::{DenominationCommand, DenominationEvent};
pub use denomination::Denomination;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a denomination description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Maximum length of an image URL, in bytes.
pub const MAX_IMAGE_URL_LEN: usize = 500;
