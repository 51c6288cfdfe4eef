//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point:                                                   │
//! │    19.99 + 19.99 + 19.99 = 59.97000000000001                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 + 1999 + 1999 = 5997 cents, always exact                       │
//! │                                                                         │
//! │  Cart totals are recomputed on every read, so any per-read rounding     │
//! │  would be repeated forever. Cents never need rounding at all.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! ```text
//!   renderer JSON            Rust
//!   ─────────────            ────
//!   "unitPrice": 19.99  ──►  1999 cents   (decoded exactly via Decimal)
//!   "total": 39.98      ◄──  3998 cents
//!
//!   19.999  ──► rejected (sub-cent precision)
//!   -5      ──► rejected (negative price)
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(1999); // $19.99
//!
//! let doubled = price * 2u32;                   // $39.98
//! let total = price + Money::from_cents(500);   // $24.99
//! assert_eq!(doubled.to_string(), "$39.98");
//! assert_eq!(total.cents(), 2499);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use ts_rs::TS;

/// Decimal places between the major unit and cents.
pub const CENT_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// Serializes as a decimal number of major units (`19.99`).
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price_cents ──► CartLine.line_total() ──► CartStore.total()
///                                                              │
///                                        "$39.98" in the view ◄┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Money(
    #[serde(serialize_with = "decimal_units::serialize")]
    #[ts(type = "number")]
    i64,
);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1999); // Represents $19.99
    /// assert_eq!(price.cents(), 1999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount of major units to exact cents.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_decimal(Decimal::new(1999, 2)).unwrap();
    /// assert_eq!(price.cents(), 1999);
    ///
    /// assert!(Money::from_decimal(Decimal::new(19999, 3)).is_err());
    /// ```
    pub fn from_decimal(amount: Decimal) -> Result<Self, AmountError> {
        if amount.normalize().scale() > CENT_SCALE {
            return Err(AmountError::SubCent);
        }
        (amount * Decimal::ONE_HUNDRED)
            .to_i64()
            .map(Money)
            .ok_or(AmountError::OutOfRange)
    }

    /// The amount in major units, exact to the cent.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, CENT_SCALE)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Why a decimal amount has no exact cents value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount has more than two decimal places")]
    SubCent,

    #[error("amount is negative")]
    Negative,

    #[error("amount is out of range")]
    OutOfRange,
}

// =============================================================================
// Wire Adapter
// =============================================================================

/// Serde adapter for a cents field carried on the wire as major units.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::decimal_units")]
/// pub unit_price_cents: i64,
/// ```
///
/// Decoding goes through `Decimal`, so `19.99` becomes exactly 1999 with no
/// float rounding. Negative amounts are refused on decode.
pub mod decimal_units {
    use rust_decimal::Decimal;
    use serde::{de, ser, Deserialize, Deserializer, Serializer};

    use super::{AmountError, Money};

    /// Largest cents magnitude an `f64` holds exactly (2^53).
    const MAX_EXACT_CENTS: u64 = 1 << 53;

    /// Emits the nearest `f64` to the exact amount, so `1999` reads back as
    /// `19.99` on the renderer.
    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        if cents.unsigned_abs() > MAX_EXACT_CENTS {
            return Err(ser::Error::custom(AmountError::OutOfRange));
        }
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(de::Error::custom(AmountError::Negative));
        }
        Money::from_decimal(amount)
            .map(|money| money.cents())
            .map_err(de::Error::custom)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$19.99`.
///
/// ## Note
/// The renderer may format with its own currency symbol; the shell uses
/// `ShellConfig::format_currency` for that.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${:.2}", sign, self.to_decimal().abs())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Unit price × line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * i64::from(qty))
    }
}

/// Summing line totals into a cart total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Priced {
        #[serde(with = "decimal_units")]
        price: i64,
    }

    fn decode(json: &str) -> Result<i64, serde_json::Error> {
        serde_json::from_str::<Priced>(json).map(|p| p.price)
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1999);
        assert_eq!(money.cents(), 1999);
        assert_eq!(money.to_decimal(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(Decimal::new(1999, 2)), Ok(Money::from_cents(1999)));
        assert_eq!(Money::from_decimal(Decimal::new(20, 0)), Ok(Money::from_cents(2000)));
        // trailing zeros are not sub-cent precision
        assert_eq!(Money::from_decimal(Decimal::new(199_900, 4)), Ok(Money::from_cents(1999)));
        assert_eq!(
            Money::from_decimal(Decimal::new(19_999, 3)),
            Err(AmountError::SubCent)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1999)), "$19.99");
        assert_eq!(format!("{}", Money::from_cents(3998)), "$39.98");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 2u32).cents(), 2000);
        assert_eq!((a * 0u32).cents(), 0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [1999, 2999, 9999]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 14997);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    /// Repeated addition of a price that has no exact binary fraction
    /// stays exact.
    #[test]
    fn test_repeated_addition_is_exact() {
        let total: Money = std::iter::repeat(Money::from_cents(1999)).take(1000).sum();
        assert_eq!(total.cents(), 1_999_000);
        assert_eq!(total.to_string(), "$19990.00");
    }

    #[test]
    fn test_decimal_units_decode() {
        assert_eq!(decode(r#"{"price":19.99}"#).unwrap(), 1999);
        assert_eq!(decode(r#"{"price":0.1}"#).unwrap(), 10);
        assert_eq!(decode(r#"{"price":20}"#).unwrap(), 2000);
        assert_eq!(decode(r#"{"price":0}"#).unwrap(), 0);
    }

    #[test]
    fn test_decimal_units_rejects() {
        let err = decode(r#"{"price":19.999}"#).unwrap_err();
        assert!(err.to_string().contains("more than two decimal places"));

        let err = decode(r#"{"price":-5}"#).unwrap_err();
        assert!(err.to_string().contains("negative"));

        assert!(decode(r#"{"price":-0.05}"#).is_err());
        assert!(decode(r#"{"price":true}"#).is_err());
    }

    #[test]
    fn test_serializes_as_major_units() {
        let json = serde_json::to_value(Money::from_cents(3998)).unwrap();
        assert_eq!(json, serde_json::json!(39.98));

        let json = serde_json::to_value(Money::zero()).unwrap();
        assert_eq!(json.as_f64(), Some(0.0));
    }
}
