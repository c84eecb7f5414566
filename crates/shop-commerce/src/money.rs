//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues in cart math. The storefront API speaks plain decimal
//! numbers (`19.99`), so `Money` serializes as one and accepts either a
//! number or a numeric string when deserializing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of minor units in one major unit.
const CENTS_PER_UNIT: i64 = 100;

/// A monetary value in the store currency.
///
/// Amounts are stored in cents. This avoids floating-point drift when
/// summing line totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the cent range.
    ///
    /// ```
    /// use shop_commerce::money::Money;
    /// let price = Money::from_decimal(49.99).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Self::new(cents as i64))
    }

    /// Parse a decimal string such as `"19.99"`.
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<f64>().ok().and_then(Self::from_decimal)
    }

    /// Create a zero amount.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Clamp negative amounts to zero (for display).
    pub fn non_negative(&self) -> Self {
        Self::new(self.amount_cents.max(0))
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}${}", sign, self.display_amount())
    }

    /// Format without symbol or sign (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let abs = self.amount_cents.unsigned_abs();
        let unit = CENTS_PER_UNIT as u64;
        format!("{}.{:02}", abs / unit, abs % unit)
    }

    /// Add another Money value, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents.checked_mul(factor).map(Money::new)
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let money = match DecimalRepr::deserialize(deserializer)? {
            DecimalRepr::Number(n) => Money::from_decimal(n),
            DecimalRepr::Text(s) => Money::parse(&s),
        };
        money.ok_or_else(|| serde::de::Error::custom("amount is not a finite decimal"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(4999);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99).unwrap().amount_cents, 4999);
        assert_eq!(Money::from_decimal(5.5).unwrap().amount_cents, 550);
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
    }

    #[test]
    fn test_money_parse() {
        assert_eq!(Money::parse(" 19.99 ").unwrap().amount_cents, 1999);
        assert!(Money::parse("abc").is_none());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999).display(), "$49.99");
        assert_eq!(Money::new(2550).display(), "$25.50");
        assert_eq!(Money::new(5).display(), "$0.05");
        assert_eq!(Money::new(-150).display(), "-$1.50");
    }

    #[test]
    fn test_money_checked_math() {
        let a = Money::new(1000);
        assert_eq!(a.try_multiply(2).unwrap().amount_cents, 2000);
        assert_eq!(a.try_add(&Money::new(550)).unwrap().amount_cents, 1550);
        assert!(Money::new(i64::MAX).try_add(&Money::new(1)).is_none());
        assert!(Money::new(i64::MAX).try_multiply(2).is_none());
    }

    #[test]
    fn test_money_sum() {
        let items = [Money::new(100), Money::new(250), Money::new(5)];
        assert_eq!(Money::try_sum(items.iter()).unwrap().amount_cents, 355);
    }

    #[test]
    fn test_money_wire_format() {
        assert_eq!(serde_json::to_string(&Money::new(2550)).unwrap(), "25.5");

        let from_number: Money = serde_json::from_str("10").unwrap();
        assert_eq!(from_number.amount_cents, 1000);

        let from_text: Money = serde_json::from_str(r#""12.30""#).unwrap();
        assert_eq!(from_text.amount_cents, 1230);

        assert!(serde_json::from_str::<Money>(r#""twelve""#).is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
    }
}
