//! Money calculation utilities using rust_decimal for precision
//!
//! Prices arrive from the cart either as JSON numbers or as display strings
//! ("S/. 10.50", "10.50"). Everything is converted to `Decimal` before any
//! arithmetic and rounded to 2 decimal places, half away from zero.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rounding precision for monetary values
pub const DECIMAL_PLACES: u32 = 2;

/// Currency prefix used by the storefront (Peruvian sol)
pub const CURRENCY_PREFIX: &str = "S/.";

/// Round a monetary value to 2 decimal places (half away from zero)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for serialization, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Parse a price string leniently
///
/// Reads the first number in the string: a run of digits with an optional
/// `.digits` fraction, or a bare `.digits`. A leading `S/.` and other
/// surrounding text are ignored. A string with no digits is worth zero.
pub fn parse_price_str(raw: &str) -> Decimal {
    let trimmed = raw.trim_start();
    let body = trimmed.strip_prefix(CURRENCY_PREFIX).unwrap_or(trimmed);
    let bytes = body.as_bytes();
    let is_digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    // A '.' only opens a number when a digit follows it
    let Some(start) = (0..bytes.len())
        .find(|&i| is_digit_at(i) || (bytes[i] == b'.' && is_digit_at(i + 1)))
    else {
        return Decimal::ZERO;
    };

    let mut end = start;
    while is_digit_at(end) {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') && is_digit_at(end + 1) {
        end += 1;
        while is_digit_at(end) {
            end += 1;
        }
    }

    let number = &body[start..end];
    let candidate = if number.starts_with('.') {
        format!("0{}", number)
    } else {
        number.to_string()
    };
    Decimal::from_str(&candidate).unwrap_or(Decimal::ZERO)
}

/// Format an amount as storefront currency: `S/. 12.50`
pub fn format_price(value: Decimal) -> String {
    format!("{} {:.2}", CURRENCY_PREFIX, round_money(value))
}

/// Price as sent by the backend/cart: a number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    /// Decimal value of this price (unparseable or non-finite → 0)
    pub fn to_decimal(&self) -> Decimal {
        match self {
            PriceValue::Number(n) if n.is_finite() => to_decimal(*n),
            PriceValue::Number(_) => Decimal::ZERO,
            PriceValue::Text(s) => parse_price_str(s),
        }
    }

    /// Strict numeric reading: `None` when the value is not a number at all
    ///
    /// Used where a bad price must be reported instead of silently zeroed
    /// (payment provider items).
    pub fn strict_decimal(&self) -> Option<Decimal> {
        match self {
            PriceValue::Number(n) if n.is_finite() => Decimal::from_f64(*n),
            PriceValue::Number(_) => None,
            PriceValue::Text(s) => Decimal::from_str(s.trim()).ok(),
        }
    }
}

impl Default for PriceValue {
    fn default() -> Self {
        PriceValue::Number(0.0)
    }
}

impl From<f64> for PriceValue {
    fn from(value: f64) -> Self {
        PriceValue::Number(value)
    }
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        PriceValue::Text(value.to_string())
    }
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_price(self.to_decimal()))
    }
}
