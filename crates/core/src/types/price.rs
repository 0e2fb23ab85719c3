//! Product prices using decimal arithmetic.
//!
//! Prices are stored as fixed two-decimal strings (`"15.00"`). Operator input
//! goes through [`Price::parse_input`], which coerces numeric text the way a
//! browser number field would and rejects anything that is not a number.
//! Stored data written by older tooling may contain `"NaN"`; such values load
//! as [`Price::NotANumber`] instead of failing the whole collection.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency sign shown in front of every rendered price.
pub const CURRENCY_SYMBOL: &str = "₦";

/// Text stored for a price that is not a number.
const NOT_A_NUMBER: &str = "NaN";

/// Errors that can occur when parsing operator price input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not numeric.
    #[error("price must be a number (got {0:?})")]
    NotANumber(String),
}

/// A product price.
///
/// ## Examples
///
/// ```
/// use av_store_core::Price;
///
/// let price = Price::parse_input("15").unwrap();
/// assert_eq!(price.to_fixed(), "15.00");
/// assert_eq!(price.display(), "₦15.00");
///
/// assert!(Price::parse_input("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    /// A numeric amount, already rounded to two decimal places.
    Amount(Decimal),
    /// A stored value that could not be read as a number.
    NotANumber,
}

impl Price {
    /// Build a price from a decimal, rounding to two places (half away from zero).
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Self {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            Self::Amount(Decimal::ZERO)
        } else {
            Self::Amount(rounded)
        }
    }

    /// Parse a price typed by the operator.
    ///
    /// Surrounding whitespace is ignored and empty input is zero. Plain
    /// decimals (`15`, `-2.5`, `.5`, `5.`) and exponent notation (`1e3`) are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] for anything else, including
    /// `NaN` and `Infinity`.
    pub fn parse_input(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::Amount(Decimal::ZERO));
        }
        parse_decimal(trimmed)
            .map(Self::from_decimal)
            .ok_or_else(|| PriceError::NotANumber(trimmed.to_owned()))
    }

    /// The numeric amount, if any.
    #[must_use]
    pub const fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::NotANumber => None,
        }
    }

    /// Returns `true` if the price holds a numeric amount.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Amount(_))
    }

    /// The stored representation: two decimals, or `NaN`.
    #[must_use]
    pub fn to_fixed(&self) -> String {
        match self {
            Self::Amount(amount) => format!("{amount:.2}"),
            Self::NotANumber => NOT_A_NUMBER.to_owned(),
        }
    }

    /// Human-facing price with the currency sign (e.g. `₦15.00`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_SYMBOL}{}", self.to_fixed())
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::Amount(Decimal::ZERO)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_input(s)
    }
}

/// Parse a trimmed numeric string, tolerating a bare leading or trailing dot.
fn parse_decimal(s: &str) -> Option<Decimal> {
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }

    let (sign, unsigned) = match s.as_bytes().first() {
        Some(b'-') => ("-", s.get(1..)?),
        Some(b'+') => ("", s.get(1..)?),
        _ => ("", s),
    };
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let has_mantissa_digit = unsigned
        .chars()
        .take_while(|c| !matches!(c, 'e' | 'E'))
        .any(|c| c.is_ascii_digit());
    if !has_mantissa_digit {
        return None;
    }

    let mut normalized = String::with_capacity(s.len() + 2);
    normalized.push_str(sign);
    if unsigned.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(unsigned);
    if normalized.ends_with('.') {
        normalized.push('0');
    }

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_fixed())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a price string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(Price::default());
        }
        Ok(parse_decimal(trimmed).map_or(Price::NotANumber, Price::from_decimal))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Price::from_decimal(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Price::from_decimal(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Decimal::try_from(v).map_or(Price::NotANumber, Price::from_decimal))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Price::default())
    }
}
