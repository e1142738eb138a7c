//! Unit representation with conversion factors

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::Dimension;

/// A registered unit: symbol, dimension and scale to the canonical system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "ns")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "nanosecond")
    pub name: String,
    /// The dimension the unit measures
    pub dimension: Dimension,
    /// Factor to the canonical system (value_canonical = value * scale)
    pub scale: f64,
}

impl Unit {
    pub fn new(symbol: &str, name: &str, dimension: Dimension, scale: f64) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            scale,
        }
    }

    /// Check if this is the canonical unit of its dimension
    pub fn is_canonical(&self) -> bool {
        self.scale == 1.0
    }

    /// Check if two units measure the same dimension
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value in this unit to the canonical system
    pub fn to_canonical(&self, value: f64) -> f64 {
        value * self.scale
    }

    /// Convert a canonical value into this unit
    pub fn from_canonical(&self, value: f64) -> f64 {
        value / self.scale
    }

    /// Convert a value from this unit to another unit
    pub fn convert_to(&self, value: f64, target: &Unit) -> Result<f64, UnitError> {
        if !self.is_compatible(target) {
            return Err(UnitError::WrongDimension {
                expected: self.dimension.label().to_string(),
                found: target.dimension.label().to_string(),
                context: format!("cannot convert '{}' to '{}'", self.symbol, target.symbol),
            });
        }
        Ok(target.from_canonical(self.to_canonical(value)))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Errors raised by unit lookup, quantity construction and conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// The registry has no unit with this symbol
    #[error("unit '{0}' is unknown")]
    UnknownUnit(String),

    /// Two dimensions that had to agree differ
    #[error("{context}: dimension '{found}' != '{expected}'")]
    WrongDimension {
        expected: String,
        found: String,
        context: String,
    },

    /// Text could not be read as "<value> <unit>"
    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),
}

impl UnitError {
    pub fn is_unknown_unit(&self) -> bool {
        matches!(self, UnitError::UnknownUnit(_))
    }

    pub fn is_wrong_dimension(&self) -> bool {
        matches!(self, UnitError::WrongDimension { .. })
    }
}
