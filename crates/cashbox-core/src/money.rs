//! # Money Module
//!
//! Provides the `Money` type used for denomination face values and till totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FACE VALUES AS FLOATS                                                  │
//! │                                                                         │
//! │    0.1f32 is stored as 0.100000001490116...                            │
//! │    200 coins × 0.10 = 20.000000298...  ❌                               │
//! │                                                                         │
//! │  FACE VALUES AS CENTS                                                   │
//! │    200 coins × 10 cents = 2000 cents = R$20.00  ✅                      │
//! │                                                                         │
//! │  Floats are accepted only at the boundary (from_major_f64) and are     │
//! │  rounded to the nearest cent immediately.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashbox_core::money::Money;
//!
//! let fifty_cents = Money::from_cents(50);
//! let ten_reais = Money::from_major_minor(10, 0);
//!
//! assert_eq!((fifty_cents * 4).cents(), 200);
//! assert_eq!((ten_reais + fifty_cents).cents(), 1050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos for BRL).
///
/// ## Design Decisions
/// - **i64 (signed)**: a till in deficit has a negative total
/// - **Single field tuple struct**: zero-cost wrapper over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::money::Money;
    ///
    /// let coin = Money::from_cents(25);
    /// assert_eq!(coin.cents(), 25);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (reais and centavos).
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(2, 50).cents(), 250);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a float amount in major units to cents, rounding to the
    /// nearest cent.
    ///
    /// Only for callers that hold legacy float face values (e.g. `0.5f32`).
    /// Nothing inside this crate does arithmetic on floats.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(0.5).cents(), 50);
    /// assert_eq!(Money::from_major_f64(0.1).cents(), 10);
    /// assert_eq!(Money::from_major_f64(100.0).cents(), 10000);
    /// ```
    pub fn from_major_f64(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies the value by a unit count.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::money::Money;
    ///
    /// let note = Money::from_cents(2000); // R$20.00
    /// assert_eq!(note.multiply_quantity(7).cents(), 14000);
    /// ```
    ///
    /// Saturates at `i64::MAX` / `i64::MIN` cents instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented display, e.g. `R$0.50`. Localised formatting is the UI's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R${}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing an iterator of Money (till totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
