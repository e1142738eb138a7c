//! In-memory property store
//!
//! Entries live in a `BTreeMap`, so keys are enumerated in sorted order and
//! dumps are deterministic. Persistence goes through serde.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::{Datum, PropertyStore, Result, Storable, StoreError};
use crate::expand::expand_path;

fn is_false(b: &bool) -> bool {
    !*b
}

/// One stored value with its metadata flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    datum: Datum,
    #[serde(default, skip_serializing_if = "is_false")]
    explicit_path: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    explicit_unit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Entry {
    fn new(datum: Datum) -> Self {
        Entry {
            datum,
            explicit_path: false,
            explicit_unit: false,
            unit_symbol: None,
            description: None,
        }
    }

    pub fn datum(&self) -> &Datum {
        &self.datum
    }

    pub fn is_explicit_path(&self) -> bool {
        self.explicit_path
    }

    pub fn has_explicit_unit(&self) -> bool {
        self.explicit_unit
    }

    pub fn unit_symbol(&self) -> Option<&str> {
        self.unit_symbol.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.datum.type_name())?;
        if self.datum.is_vector() {
            write!(f, "[{}]", self.datum.len())?;
        }
        if self.explicit_path {
            f.write_str(" as path")?;
        }
        if self.explicit_unit {
            f.write_str(" with unit")?;
        }
        write!(f, " = {}", self.datum)?;
        if let Some(symbol) = &self.unit_symbol {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// Weakly-typed key/value store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    entries: BTreeMap<String, Entry>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the store-level description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Raw entry access, for diagnostics
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Attach a description to an existing key
    pub fn set_key_description(&mut self, key: &str, description: impl Into<String>) -> Result<()> {
        let entry = self.entry_mut(key)?;
        entry.description = Some(description.into());
        Ok(())
    }

    // ========== Persistence ==========

    /// Serialize to JSON. Fails on NaN or infinite reals, which JSON
    /// would otherwise turn into unloadable `null`s.
    pub fn to_json(&self) -> Result<String> {
        if let Some((key, _)) = self.entries.iter().find(|(_, e)| !e.datum.is_finite()) {
            return Err(StoreError::NonFiniteReal(key.clone()));
        }
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let props: Properties = serde_json::from_str(json)?;
        for key in props.entries.keys() {
            validate_key(key)?;
        }
        Ok(props)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    // ========== Internals ==========

    fn entry_mut(&mut self, key: &str) -> Result<&mut Entry> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| StoreError::MissingKey(key.to_string()))
    }

    fn get_entry(&self, key: &str) -> Result<&Entry> {
        self.entries
            .get(key)
            .ok_or_else(|| StoreError::MissingKey(key.to_string()))
    }

    fn insert(&mut self, key: &str, entry: Entry) -> Result<()> {
        validate_key(key)?;
        if self.entries.contains_key(key) {
            return Err(StoreError::ExistingKey(key.to_string()));
        }
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn check(&self, key: &str, pred: impl Fn(&Entry) -> bool) -> bool {
        self.entries.get(key).is_some_and(pred)
    }
}

/// Keys are non-empty and free of whitespace and the `:` / `=` separators
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.chars().any(|c| c.is_whitespace() || c == ':' || c == '=');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

impl PropertyStore for Properties {
    fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn erase(&mut self, key: &str) -> Result<()> {
        self.entries
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::MissingKey(key.to_string()))
    }

    fn dump(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        if let Some(description) = &self.description {
            writeln!(out, "{}", description)?;
        }
        let last = self.entries.len().saturating_sub(1);
        for (i, (key, entry)) in self.entries.iter().enumerate() {
            let branch = if i == last { "`--" } else { "|--" };
            write!(out, "{} {} : {}", branch, key, entry)?;
            if let Some(description) = entry.description() {
                write!(out, "  # {}", description)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn is_integer(&self, key: &str) -> bool {
        self.check(key, |e| e.datum.is_integer())
    }

    fn is_real(&self, key: &str) -> bool {
        self.check(key, |e| e.datum.is_real())
    }

    fn is_boolean(&self, key: &str) -> bool {
        self.check(key, |e| e.datum.is_boolean())
    }

    fn is_string(&self, key: &str) -> bool {
        self.check(key, |e| e.datum.is_string())
    }

    fn is_scalar(&self, key: &str) -> bool {
        self.check(key, |e| e.datum.is_scalar())
    }

    fn is_vector(&self, key: &str) -> bool {
        self.check(key, |e| e.datum.is_vector())
    }

    fn is_explicit_path(&self, key: &str) -> bool {
        self.check(key, |e| e.explicit_path)
    }

    fn has_explicit_unit(&self, key: &str) -> bool {
        self.check(key, |e| e.explicit_unit)
    }

    fn has_unit_symbol(&self, key: &str) -> bool {
        self.check(key, |e| e.unit_symbol.is_some())
    }

    fn fetch<T: Storable>(&self, key: &str) -> Result<T> {
        let entry = self.get_entry(key)?;
        T::from_datum(&entry.datum).ok_or_else(|| StoreError::WrongType {
            key: key.to_string(),
            expected: T::DESCRIPTION,
        })
    }

    fn fetch_path(&self, key: &str) -> Result<String> {
        let entry = self.get_entry(key)?;
        match (&entry.datum, entry.explicit_path) {
            (Datum::String(path), true) => expand_path(path),
            _ => Err(StoreError::WrongType {
                key: key.to_string(),
                expected: "an explicit path",
            }),
        }
    }

    fn fetch_real_with_explicit_unit(&self, key: &str) -> Result<f64> {
        let entry = self.get_entry(key)?;
        match (&entry.datum, entry.explicit_unit) {
            (Datum::Real(value), true) => Ok(*value),
            _ => Err(StoreError::WrongType {
                key: key.to_string(),
                expected: "a real with explicit unit",
            }),
        }
    }

    fn unit_symbol(&self, key: &str) -> Result<String> {
        let entry = self.get_entry(key)?;
        entry.unit_symbol.clone().ok_or_else(|| StoreError::WrongType {
            key: key.to_string(),
            expected: "a real with a unit symbol",
        })
    }

    fn store<T: Storable>(&mut self, key: &str, value: T) -> Result<()> {
        self.insert(key, Entry::new(value.into_datum()))
    }

    fn store_path(&mut self, key: &str, path: &str) -> Result<()> {
        let mut entry = Entry::new(Datum::String(path.to_string()));
        entry.explicit_path = true;
        self.insert(key, entry)
    }

    fn store_with_explicit_unit(&mut self, key: &str, value: f64) -> Result<()> {
        let mut entry = Entry::new(Datum::Real(value));
        entry.explicit_unit = true;
        self.insert(key, entry)
    }

    fn set_unit_symbol(&mut self, key: &str, symbol: &str) -> Result<()> {
        let entry = self.entry_mut(key)?;
        if !matches!(entry.datum, Datum::Real(_)) {
            return Err(StoreError::WrongType {
                key: key.to_string(),
                expected: "a real",
            });
        }
        if symbol.trim().is_empty() || symbol.chars().any(char::is_whitespace) {
            return Err(StoreError::InvalidUnitSymbol {
                key: key.to_string(),
                symbol: symbol.to_string(),
            });
        }
        entry.unit_symbol = Some(symbol.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Properties {
        let mut props = Properties::new();
        props.store("foo", 1).unwrap();
        props.store("bar", 3.14).unwrap();
        props.store("baz", true).unwrap();
        props.store("flatstring", "foobar".to_string()).unwrap();
        props.store_path("apath", "foobar").unwrap();
        props
    }

    #[test]
    fn test_store_and_fetch() {
        let props = sample();
        assert_eq!(props.len(), 5);
        assert_eq!(props.fetch::<i32>("foo").unwrap(), 1);
        assert_eq!(props.fetch::<f64>("bar").unwrap(), 3.14);
        assert!(props.fetch::<bool>("baz").unwrap());
        assert_eq!(props.fetch::<String>("flatstring").unwrap(), "foobar");
    }

    #[test]
    fn test_keys_sorted() {
        assert_eq!(sample().keys(), vec!["apath", "bar", "baz", "flatstring", "foo"]);
    }

    #[test]
    fn test_fetch_wrong_type() {
        let err = sample().fetch::<f64>("foo").unwrap_err();
        assert!(matches!(err, StoreError::WrongType { expected: "a real", .. }));
    }

    #[test]
    fn test_store_existing_key() {
        let mut props = sample();
        assert!(matches!(props.store("foo", 2), Err(StoreError::ExistingKey(_))));
        assert_eq!(props.fetch::<i32>("foo").unwrap(), 1);
    }

    #[test]
    fn test_invalid_keys() {
        let mut props = Properties::new();
        assert!(matches!(props.store("", 1), Err(StoreError::InvalidKey(_))));
        assert!(matches!(props.store("a b", 1), Err(StoreError::InvalidKey(_))));
        assert!(matches!(props.store("a:b", 1), Err(StoreError::InvalidKey(_))));
        assert!(props.store("geometry.layout", 1).is_ok());
    }

    #[test]
    fn test_erase_missing_key() {
        let mut props = sample();
        assert!(props.erase("foo").is_ok());
        assert!(!props.has_key("foo"));
        assert!(matches!(props.erase("foo"), Err(StoreError::MissingKey(_))));
    }

    #[test]
    fn test_flags() {
        let mut props = sample();
        props.store_with_explicit_unit("weight", 1.2).unwrap();
        props.set_unit_symbol("weight", "kg").unwrap();

        assert!(props.is_explicit_path("apath"));
        assert!(!props.is_explicit_path("flatstring"));
        assert!(props.has_explicit_unit("weight"));
        assert!(props.has_unit_symbol("weight"));
        assert!(!props.has_explicit_unit("bar"));
        assert!(!props.has_unit_symbol("missing"));
        assert_eq!(props.fetch_real_with_explicit_unit("weight").unwrap(), 1.2);
        assert_eq!(props.unit_symbol("weight").unwrap(), "kg");
        assert!(props.fetch_real_with_explicit_unit("bar").is_err());
    }

    #[test]
    fn test_set_unit_symbol_rules() {
        let mut props = sample();
        assert!(matches!(props.set_unit_symbol("foo", "m"), Err(StoreError::WrongType { .. })));
        assert!(matches!(props.set_unit_symbol("bar", " "), Err(StoreError::InvalidUnitSymbol { .. })));
        assert!(matches!(props.set_unit_symbol("nope", "m"), Err(StoreError::MissingKey(_))));
    }

    #[test]
    fn test_fetch_path() {
        let props = sample();
        assert_eq!(props.fetch_path("apath").unwrap(), "foobar");
        assert!(props.fetch_path("flatstring").is_err());
    }

    #[test]
    fn test_vectors() {
        let mut props = Properties::new();
        props.store("ids", vec![1, 2, 3]).unwrap();
        assert!(props.is_vector("ids"));
        assert!(props.is_integer("ids"));
        assert!(!props.is_scalar("ids"));
        assert_eq!(props.fetch::<Vec<i32>>("ids").unwrap(), vec![1, 2, 3]);
        assert!(props.fetch::<i32>("ids").is_err());
    }

    #[test]
    fn test_dump() {
        let mut props = Properties::new().with_description("sample");
        props.store("count", 3).unwrap();
        props.store_with_explicit_unit("width", 2.0).unwrap();
        props.set_unit_symbol("width", "mm").unwrap();
        props.set_key_description("count", "number of layers").unwrap();

        let mut out = String::new();
        props.dump(&mut out).unwrap();
        assert_eq!(
            out,
            "sample\n\
             |-- count : integer = 3  # number of layers\n\
             `-- width : real with unit = 2.0 mm\n"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut props = sample();
        props.store_with_explicit_unit("weight", 1.2).unwrap();
        props.set_unit_symbol("weight", "kg").unwrap();

        let json = props.to_json().unwrap();
        let back = Properties::from_json(&json).unwrap();
        assert_eq!(back, props);
        assert!(back.is_explicit_path("apath"));
        assert_eq!(back.unit_symbol("weight").unwrap(), "kg");
    }

    #[test]
    fn test_json_rejects_non_finite_reals() {
        let mut props = Properties::new();
        props.store("x", f64::NAN).unwrap();
        assert!(matches!(props.to_json(), Err(StoreError::NonFiniteReal(k)) if k == "x"));

        let mut props = Properties::new();
        props.store("ys", vec![1.0, f64::INFINITY]).unwrap();
        assert!(matches!(props.to_json(), Err(StoreError::NonFiniteReal(k)) if k == "ys"));

        let path = std::env::temp_dir().join("typedprops_non_finite.json");
        assert!(props.save_json(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_json_rejects_invalid_key() {
        let json = r#"{"entries":{"bad key":{"datum":{"type":"integer","value":1}}}}"#;
        assert!(matches!(Properties::from_json(json), Err(StoreError::InvalidKey(_))));
    }
}
