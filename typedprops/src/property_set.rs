//! Typed property set
//!
//! `PropertySet` owns one backing store and exposes it through typed
//! accessors. Every accessor is bounded on [`Holdable`], so only the closed
//! set of kinds can go in or come out; the kind of a stored value is
//! inferred from the store's flags on each access.

use std::fmt;
use tracing::{debug, trace};
use typedprops_store::{Properties, PropertyStore, Storable};
use typedprops_units::Quantity;

use crate::{Holdable, Kind, PropertyError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet<S: PropertyStore = Properties> {
    store: S,
}

impl<S: PropertyStore + Default> PropertySet<S> {
    pub fn new() -> Self {
        PropertySet { store: S::default() }
    }
}

impl<S: PropertyStore> PropertySet<S> {
    /// Adopt an existing store
    pub fn from_store(store: S) -> Self {
        PropertySet { store }
    }

    // ========== Observers ==========

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.store.keys()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.store.has_key(key)
    }

    /// Inferred kind of the value under `key`
    pub fn kind_of(&self, key: &str) -> Option<Kind> {
        Kind::infer(&self.store, key)
    }

    /// Whether `key` holds a value of type `T`. False for absent keys.
    pub fn is_type<T: Holdable>(&self, key: &str) -> bool {
        T::KIND.matches(&self.store, key)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Copy of the backing store
    pub fn to_store(&self) -> S {
        self.store.clone()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ========== Retrieval ==========

    /// Typed read of `key`.
    ///
    /// A [`Path`](crate::Path) comes back with `~`, `$NAME` and `${NAME}`
    /// expanded; an unset variable is a `StoreError::Expansion`, and `$$`
    /// yields a literal `$`.
    pub fn get<T: Holdable>(&self, key: &str) -> Result<T> {
        if !self.store.has_key(key) {
            return Err(PropertyError::MissingKey(key.to_string()));
        }
        self.check_kind::<T>(key)?;
        trace!(key = %key, kind = %T::KIND, "get");
        T::fetch_from(&self.store, key)
    }

    /// Like `get`, but an absent key yields `default`. A present key of
    /// the wrong kind is still an error.
    pub fn get_or<T: Holdable>(&self, key: &str, default: T) -> Result<T> {
        if !self.store.has_key(key) {
            trace!(key = %key, kind = %T::KIND, "get: absent, using default");
            return Ok(default);
        }
        self.get(key)
    }

    fn check_kind<T: Holdable>(&self, key: &str) -> Result<()> {
        if T::KIND.matches(&self.store, key) {
            Ok(())
        } else {
            Err(PropertyError::WrongType {
                key: key.to_string(),
                requested: T::KIND,
                found: Kind::infer(&self.store, key),
            })
        }
    }

    // ========== Insertion and deletion ==========

    /// Insert a new property. Never overwrites.
    pub fn put<T: Holdable>(&mut self, key: &str, value: T) -> Result<()> {
        if self.store.has_key(key) {
            return Err(PropertyError::ExistingKey(key.to_string()));
        }
        value.store_into(&mut self.store, key)?;
        debug!(key = %key, kind = %T::KIND, "put");
        Ok(())
    }

    /// Insert, replacing any existing property of any kind
    pub fn put_or_replace<T: Holdable>(&mut self, key: &str, value: T) -> Result<()> {
        let replaced = self.erase(key);
        self.put(key, value)?;
        debug!(key = %key, kind = %T::KIND, replaced, "put_or_replace");
        Ok(())
    }

    /// Remove a property. Returns whether it was present.
    pub fn erase(&mut self, key: &str) -> bool {
        if !self.store.has_key(key) {
            return false;
        }
        let erased = self.store.erase(key).is_ok();
        debug!(key = %key, erased, "erase");
        erased
    }

    // ========== Display ==========

    fn fetch_raw<T: Storable + fmt::Debug>(&self, key: &str) -> String {
        match self.store.fetch::<T>(key) {
            Ok(v) => format!("{:?}", v),
            Err(e) => format!("<{}>", e),
        }
    }

    fn render(&self, kind: Kind, key: &str) -> String {
        match kind {
            Kind::Integer => self.fetch_raw::<i32>(key),
            Kind::Real => self.fetch_raw::<f64>(key),
            Kind::Boolean => self.fetch_raw::<bool>(key),
            // Paths are shown as stored, without environment expansion
            Kind::String | Kind::Path => self.fetch_raw::<String>(key),
            Kind::IntegerVec => self.fetch_raw::<Vec<i32>>(key),
            Kind::RealVec => self.fetch_raw::<Vec<f64>>(key),
            Kind::BooleanVec => self.fetch_raw::<Vec<bool>>(key),
            Kind::StringVec => self.fetch_raw::<Vec<String>>(key),
            Kind::Quantity => match self.get::<Quantity>(key) {
                Ok(q) => q.to_string(),
                Err(e) => format!("<{}>", e),
            },
        }
    }
}

impl<S: PropertyStore> fmt::Display for PropertySet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in self.names() {
            match self.kind_of(&key) {
                Some(kind) => writeln!(f, "{} : {} = {}", key, kind, self.render(kind, &key))?,
                None => writeln!(f, "{} : <no kind>", key)?,
            }
        }
        Ok(())
    }
}

impl<S: PropertyStore> From<S> for PropertySet<S> {
    fn from(store: S) -> Self {
        PropertySet::from_store(store)
    }
}

impl From<PropertySet<Properties>> for Properties {
    fn from(set: PropertySet<Properties>) -> Self {
        set.into_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typedprops_units::{tag, QuantityOf};
    use crate::Path;

    #[test]
    fn test_new_is_empty() {
        let ps: PropertySet = PropertySet::new();
        assert!(ps.is_empty());
        assert!(ps.names().is_empty());
    }

    #[test]
    fn test_put_get() {
        let mut ps: PropertySet = PropertySet::new();
        ps.put("foo", 1).unwrap();
        ps.put("bar", 3.14).unwrap();
        ps.put("baz", true).unwrap();
        ps.put("flatstring", "foobar".to_string()).unwrap();
        ps.put("apath", Path::from("foobar")).unwrap();

        assert_eq!(ps.get::<i32>("foo").unwrap(), 1);
        assert_eq!(ps.get::<f64>("bar").unwrap(), 3.14);
        assert!(ps.get::<bool>("baz").unwrap());
        assert_eq!(ps.get::<String>("flatstring").unwrap(), "foobar");
        assert_eq!(ps.get::<Path>("apath").unwrap(), "foobar");
        assert_eq!(ps.names(), vec!["apath", "bar", "baz", "flatstring", "foo"]);
    }

    #[test]
    fn test_missing_and_wrong_type() {
        let mut ps: PropertySet = PropertySet::new();
        ps.put("bar", 3.14).unwrap();
        assert!(ps.get::<i32>("nope").unwrap_err().is_missing_key());

        let err = ps.get::<i32>("bar").unwrap_err();
        match err {
            PropertyError::WrongType { requested, found, .. } => {
                assert_eq!(requested, Kind::Integer);
                assert_eq!(found, Some(Kind::Real));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_get_or() {
        let mut ps: PropertySet = PropertySet::new();
        ps.put("bar", 3.14).unwrap();
        assert_eq!(ps.get_or("absent", 42).unwrap(), 42);
        assert!(ps.get_or("bar", 42).unwrap_err().is_wrong_type());
        assert_eq!(ps.get_or("bar", 1.0).unwrap(), 3.14);
    }

    #[test]
    fn test_is_type_and_kind_of() {
        let mut ps: PropertySet = PropertySet::new();
        ps.put("w", Quantity::new(1.2, "kg").unwrap()).unwrap();
        assert!(ps.is_type::<Quantity>("w"));
        assert!(ps.is_type::<QuantityOf<tag::Mass>>("w"));
        assert!(!ps.is_type::<f64>("w"));
        assert!(!ps.is_type::<i32>("missing"));
        assert_eq!(ps.kind_of("w"), Some(Kind::Quantity));
        assert_eq!(ps.kind_of("missing"), None);
    }

    #[test]
    fn test_erase() {
        let mut ps: PropertySet = PropertySet::new();
        ps.put("foo", 1).unwrap();
        assert!(ps.erase("foo"));
        assert!(!ps.has_key("foo"));
        assert!(!ps.erase("foo"));
    }

    #[test]
    fn test_put_or_replace_changes_kind() {
        let mut ps: PropertySet = PropertySet::new();
        ps.put("k", 1).unwrap();
        ps.put_or_replace("k", "s".to_string()).unwrap();
        assert_eq!(ps.get::<String>("k").unwrap(), "s");
        assert!(ps.get_or("k", 0).unwrap_err().is_wrong_type());
    }

    #[test]
    fn test_display() {
        let mut ps: PropertySet = PropertySet::new();
        ps.put("count", 3).unwrap();
        ps.put("ids", vec![1, 2]).unwrap();
        ps.put("input", Path::new("$HOME/x")).unwrap();
        ps.put("width", Quantity::new(2.0, "mm").unwrap()).unwrap();

        let text = ps.to_string();
        assert_eq!(
            text,
            "count : integer = 3\n\
             ids : integer[] = [1, 2]\n\
             input : path = \"$HOME/x\"\n\
             width : quantity = 2 mm\n"
        );
    }

    #[test]
    fn test_display_of_half_written_quantity() {
        let mut store = Properties::new();
        store.store_with_explicit_unit("half", 1.0).unwrap();
        let ps = PropertySet::from(store);
        assert_eq!(ps.to_string(), "half : <no kind>\n");
    }

    #[test]
    fn test_store_conversions() {
        let mut ps: PropertySet = PropertySet::new();
        ps.put("foo", 1).unwrap();
        let copy = ps.to_store();
        assert_eq!(copy.fetch::<i32>("foo").unwrap(), 1);
        assert!(ps.store().has_key("foo"));

        let back: Properties = ps.into();
        assert_eq!(back, copy);
    }
}
