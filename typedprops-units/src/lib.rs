//! Typedprops Units - Physical Quantities and Unit Registry
//!
//! Provides unit-aware quantities resolved against a fixed registry.
//! Every unit maps to a scale in the canonical numeric system
//! (millimeter, nanosecond, MeV, positron charge) and to one dimension label.
//!
//! - `Dimension`: the closed set of dimension labels
//! - `Unit` / `UNITS` / `find_unit`: the registry
//! - `Quantity`: value + unit, with dimension-checked conversion
//! - `QuantityOf<D>`: a quantity whose dimension is fixed by a type-level tag

mod dimension;
mod unit;
mod units;
mod quantity;
mod tagged;
mod parse;

pub use dimension::Dimension;
pub use unit::{Unit, UnitError};
pub use units::{UNITS, UnitRegistry, find_unit};
pub use quantity::Quantity;
pub use tagged::{DimensionTag, QuantityOf, tag};
pub use parse::{parse_unit, parse_quantity};

/// Convenient imports for quantity users
pub mod prelude {
    pub use crate::{Dimension, Quantity, QuantityOf, DimensionTag, Unit, UnitError, find_unit};
    pub use crate::tag;
}
