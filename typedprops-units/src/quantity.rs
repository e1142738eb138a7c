//! Quantity type - a value with an associated unit

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::{Dimension, Unit, UnitError};
use crate::units::find_unit;

/// A physical measurement: a value in the unit named by its symbol
///
/// The dimension and scale are resolved from the unit registry when the
/// quantity is built, so `canonical_value() == value() * scale()` always holds.
/// The symbol is kept as given, so an alias such as "meter" survives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "QuantityRepr", into = "QuantityRepr")]
pub struct Quantity {
    value: f64,
    symbol: String,
    unit: Unit,
}

impl Quantity {
    /// Build a quantity, resolving `symbol` against the unit registry
    pub fn new(value: f64, symbol: &str) -> Result<Self, UnitError> {
        let unit = find_unit(symbol)
            .ok_or_else(|| UnitError::UnknownUnit(symbol.to_string()))?;
        Ok(Quantity {
            value,
            symbol: symbol.to_string(),
            unit: unit.clone(),
        })
    }

    /// Build a quantity from an already resolved unit
    pub fn with_unit(value: f64, unit: Unit) -> Self {
        Quantity { value, symbol: unit.symbol.clone(), unit }
    }

    /// The value in the quantity's own unit
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit symbol as given at construction
    pub fn unit(&self) -> &str {
        &self.symbol
    }

    /// The resolved unit
    pub fn resolved_unit(&self) -> &Unit {
        &self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    pub fn dimension_label(&self) -> &'static str {
        self.unit.dimension.label()
    }

    pub fn scale(&self) -> f64 {
        self.unit.scale
    }

    /// The value in the canonical numeric system
    pub fn canonical_value(&self) -> f64 {
        self.unit.to_canonical(self.value)
    }

    /// Check if two quantities measure the same dimension
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// The value expressed in `unit`, which must share this quantity's dimension
    pub fn value_in(&self, unit: &Unit) -> Result<f64, UnitError> {
        if unit.dimension != self.unit.dimension {
            return Err(UnitError::WrongDimension {
                expected: self.dimension_label().to_string(),
                found: unit.dimension.label().to_string(),
                context: format!("input unit '{}'", unit.symbol),
            });
        }
        Ok(self.value * self.unit.scale / unit.scale)
    }

    /// Same as [`Quantity::value_in`], resolving the unit by symbol
    pub fn value_in_symbol(&self, symbol: &str) -> Result<f64, UnitError> {
        let unit = find_unit(symbol)
            .ok_or_else(|| UnitError::UnknownUnit(symbol.to_string()))?;
        self.value_in(unit)
    }

    /// Convert to another unit of the same dimension
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, UnitError> {
        let value = self.unit.convert_to(self.value, target)?;
        Ok(Quantity::with_unit(value, target.clone()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.symbol)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        // Compare canonical values for equality
        if !self.is_compatible(other) {
            return false;
        }
        self.canonical_value() == other.canonical_value()
    }
}

/// Serialized form: the unit is re-resolved on the way back in
#[derive(Serialize, Deserialize)]
struct QuantityRepr {
    value: f64,
    unit: String,
}

impl TryFrom<QuantityRepr> for Quantity {
    type Error = UnitError;

    fn try_from(repr: QuantityRepr) -> Result<Self, Self::Error> {
        Quantity::new(repr.value, &repr.unit)
    }
}

impl From<Quantity> for QuantityRepr {
    fn from(q: Quantity) -> Self {
        QuantityRepr { value: q.value, unit: q.symbol }
    }
}
