//! # Money Module
//!
//! Provides the `Money` type for monetary amounts flowing through the
//! analytics engine.
//!
//! ## Why Not Integer Cents Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UNIT COST IS ALREADY A QUOTIENT                                        │
//! │                                                                         │
//! │  unit_cost = purchase_price_total / quantity                            │
//! │    100.00 / 3 = 33.333...                                               │
//! │                                                                         │
//! │  Rounding it to 33.33 before multiplying by remaining stock would       │
//! │  drift totals. The engine keeps full precision and only the display    │
//! │  layer rounds:                                                          │
//! │    Money::new(33.3333)?.rounded_cents() == 3333                         │
//! │                                                                         │
//! │  INVARIANT: a Money value is always finite. NaN and ±∞ are rejected    │
//! │  at construction, and every division in the engine is guarded.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use resell_core::money::Money;
//!
//! let cost = Money::new(10.0).unwrap();
//! let price = Money::from_cents(2500); // 25.00
//!
//! let margin = price - cost;
//! assert_eq!(margin.amount(), 15.0);
//!
//! assert!(Money::new(f64::NAN).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A finite monetary amount in major currency units.
///
/// ## Where Money is Used
/// ```text
/// Article.unit_cost ──┬──► unit margin ──► total benefit ──► top sellers
///                     │
///                     └──► stock value (× remaining) ──► growth comparison
///
/// Sale.sale_price ────► revenue ──► month-over-month growth
/// Sale.ads_cost ──────► subtracted from every margin
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[serde(try_from = "f64", into = "f64")]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value, rejecting NaN and infinities.
    ///
    /// ## Example
    /// ```rust
    /// use resell_core::money::Money;
    ///
    /// assert_eq!(Money::new(12.5).unwrap().amount(), 12.5);
    /// assert!(Money::new(f64::INFINITY).is_err());
    /// ```
    pub fn new(amount: f64) -> Result<Self, ValidationError> {
        Self::for_field("amount", amount)
    }

    /// Same as [`Money::new`] but names the offending field in the error.
    pub fn for_field(field: &str, amount: f64) -> Result<Self, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::not_finite(field));
        }
        Ok(Money(amount))
    }

    /// Creates a non-negative Money value for an input field.
    ///
    /// Costs, prices and ad spend are never negative on the way in;
    /// derived values (margins, growth) may be.
    pub fn non_negative(field: &str, amount: f64) -> Result<Self, ValidationError> {
        let money = Self::for_field(field, amount)?;
        if money.is_negative() {
            return Err(ValidationError::negative(field, amount));
        }
        Ok(money)
    }

    /// Creates a Money value from cents.
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(cents as f64 / 100.0)
    }

    /// Returns the zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Returns the raw full-precision amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Rounds to the nearest cent, halves away from zero.
    ///
    /// Display helper only. Engine totals never round.
    ///
    /// ## Example
    /// ```rust
    /// use resell_core::money::Money;
    ///
    /// assert_eq!(Money::new(100.0 / 3.0).unwrap().rounded_cents(), 3333);
    /// assert_eq!(Money::new(-0.125).unwrap().rounded_cents(), -13);
    /// ```
    pub fn rounded_cents(&self) -> i64 {
        (self.0 * 100.0).round() as i64
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Arithmetic mean of `self` over `count` items; zero when `count == 0`.
    ///
    /// ## Example
    /// ```rust
    /// use resell_core::money::Money;
    ///
    /// let total = Money::from_cents(3000);
    /// assert_eq!(total.mean_over(4).amount(), 7.5);
    /// assert!(total.mean_over(0).is_zero());
    /// ```
    pub fn mean_over(&self, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        Money(self.0 / count as f64)
    }

    /// Returns `self / denominator` as a plain ratio, or `None` when the
    /// denominator is zero.
    pub fn ratio_to(&self, denominator: Money) -> Option<f64> {
        if denominator.is_zero() {
            return None;
        }
        Some(self.0 / denominator.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering with two decimals. Localized currency
/// formatting belongs to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl TryFrom<f64> for Money {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.0
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a unit count (stock value = unit cost × remaining).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty as f64)
    }
}

/// Multiplication by a pricing factor (suggested price = cost × 3).
impl Mul<f64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
