//! Quantity string parsing - parse text like "1.2 kg" or "3.14 m/s"

use std::str::FromStr;
use crate::{Quantity, Unit, UnitError};
use crate::units::UNITS;

/// Look up a unit by symbol or alias, ignoring surrounding whitespace
pub fn parse_unit(s: &str) -> Result<&'static Unit, UnitError> {
    let s = s.trim();
    UNITS.get(s).ok_or_else(|| UnitError::UnknownUnit(s.to_string()))
}

/// Parse a quantity string like "5 m", "100kg" or "-2.5e3 eV"
///
/// The number must be followed by a unit; a bare number is not a quantity.
pub fn parse_quantity(s: &str) -> Result<Quantity, UnitError> {
    let s = s.trim();
    let split_pos = number_prefix_len(s);

    if split_pos == 0 {
        return Err(UnitError::InvalidQuantity(s.to_string()));
    }

    let num_str = &s[..split_pos];
    let unit_str = s[split_pos..].trim();

    let value: f64 = num_str.parse()
        .map_err(|_| UnitError::InvalidQuantity(s.to_string()))?;

    if unit_str.is_empty() {
        return Err(UnitError::InvalidQuantity(s.to_string()));
    }

    Quantity::new(value, unit_str)
}

/// Length of the leading decimal number in `s`, 0 if there is none
///
/// An exponent marker only counts when digits follow it, so "5eV" splits
/// as "5" and "eV".
fn number_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        digits += pos - frac_start;
    }

    if digits == 0 {
        return 0;
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_start {
            pos = exp;
        }
    }

    pos
}

impl FromStr for Quantity {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_quantity(s)
    }
}
