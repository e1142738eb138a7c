//! Typedprops Store - Weakly-Typed Property Storage
//!
//! The storage engine behind the typed property set:
//! - `PropertyStore`: the calling contract (presence, predicates, fetch, store)
//! - `Properties`: the in-memory engine, with JSON persistence and a dump
//! - `Reader` / `ReaderConfig`: the configuration text reader
//! - `StoreError`: failures reported by the engine

mod error;
mod datum;
mod store;
mod expand;
mod properties;
mod reader;

pub use error::{StoreError, Result};
pub use datum::{Datum, Storable};
pub use store::PropertyStore;
pub use expand::{expand_path, expand_with};
pub use properties::{Entry, Properties, validate_key};
pub use reader::{Reader, ReaderConfig};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Properties, PropertyStore, Reader, ReaderConfig, StoreError};
}
