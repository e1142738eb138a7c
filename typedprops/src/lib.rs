//! Typedprops - Typed, Dimension-Aware Property Sets
//!
//! A `PropertySet` is a heterogeneous key/value container over a weakly-typed
//! backing store. Each key holds one value of one kind:
//! - integers, reals, booleans and strings, as scalars or vectors
//! - `Path`: a string the store knows to be a filesystem path
//! - `Quantity`: a real with a unit symbol, resolved against the unit registry
//! - `QuantityOf<D>`: a quantity whose dimension is fixed at compile time
//!
//! ```
//! use typedprops::{PropertySet, Quantity, QuantityOf, tag};
//!
//! let mut ps: PropertySet = PropertySet::new();
//! ps.put("weight", Quantity::new(1.2, "kg")?)?;
//!
//! let weight = ps.get::<Quantity>("weight")?;
//! let grams = weight.value_in_symbol("g")?;
//! assert!((grams - 1200.0).abs() < 1e-9);
//!
//! let mass: QuantityOf<tag::Mass> = ps.get("weight")?;
//! assert_eq!(mass.unit(), "kg");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Only the closed set of kinds can be stored:
//!
//! ```compile_fail
//! use typedprops::PropertySet;
//!
//! let mut ps: PropertySet = PropertySet::new();
//! ps.put("big", 1u64).unwrap();
//! ```

mod path;
mod kind;
mod error;
mod holdable;
mod property_set;

pub use path::Path;
pub use kind::Kind;
pub use error::{PropertyError, Result};
pub use holdable::Holdable;
pub use property_set::PropertySet;

pub use typedprops_store::{Properties, PropertyStore, Reader, ReaderConfig, StoreError};
pub use typedprops_units::{find_unit, tag, Dimension, DimensionTag, Quantity, QuantityOf, Unit, UnitError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Kind, Path, PropertyError, PropertySet, Quantity, QuantityOf, tag};
}
