//! Kind inference
//!
//! The backing store keeps no kind tag. A key's kind is read off the store's
//! predicates and metadata flags, and this module is the only place that
//! mapping is written down.

use std::fmt;
use typedprops_store::PropertyStore;

/// The closed set of value kinds a property may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    Real,
    Boolean,
    String,
    Path,
    Quantity,
    IntegerVec,
    RealVec,
    BooleanVec,
    StringVec,
}

impl Kind {
    pub const ALL: [Kind; 10] = [
        Kind::Integer,
        Kind::Real,
        Kind::Boolean,
        Kind::String,
        Kind::Path,
        Kind::Quantity,
        Kind::IntegerVec,
        Kind::RealVec,
        Kind::BooleanVec,
        Kind::StringVec,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Integer => "integer",
            Kind::Real => "real",
            Kind::Boolean => "boolean",
            Kind::String => "string",
            Kind::Path => "path",
            Kind::Quantity => "quantity",
            Kind::IntegerVec => "integer[]",
            Kind::RealVec => "real[]",
            Kind::BooleanVec => "boolean[]",
            Kind::StringVec => "string[]",
        }
    }

    pub fn is_vector(self) -> bool {
        matches!(
            self,
            Kind::IntegerVec | Kind::RealVec | Kind::BooleanVec | Kind::StringVec
        )
    }

    /// Whether the value stored under `key` has this kind.
    ///
    /// False for absent keys.
    pub fn matches<S: PropertyStore>(self, store: &S, key: &str) -> bool {
        let scalar = store.is_scalar(key);
        let vector = store.is_vector(key);
        // Reals with neither unit flag are plain numbers
        let unitless = !store.has_explicit_unit(key) && !store.has_unit_symbol(key);

        match self {
            Kind::Integer => scalar && store.is_integer(key),
            Kind::Real => scalar && store.is_real(key) && unitless,
            Kind::Boolean => scalar && store.is_boolean(key),
            Kind::String => scalar && store.is_string(key) && !store.is_explicit_path(key),
            Kind::Path => scalar && store.is_string(key) && store.is_explicit_path(key),
            Kind::Quantity => {
                scalar
                    && store.is_real(key)
                    && store.has_explicit_unit(key)
                    && store.has_unit_symbol(key)
            }
            Kind::IntegerVec => vector && store.is_integer(key),
            Kind::RealVec => vector && store.is_real(key) && unitless,
            Kind::BooleanVec => vector && store.is_boolean(key),
            Kind::StringVec => vector && store.is_string(key),
        }
    }

    /// The kind of the value under `key`, if it has one.
    ///
    /// `None` for absent keys and for a real flagged with an explicit unit
    /// but no unit symbol (a half-written quantity).
    pub fn infer<S: PropertyStore>(store: &S, key: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.matches(store, key))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
