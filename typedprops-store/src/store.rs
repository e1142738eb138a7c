//! # Property Store Trait
//!
//! The calling contract between the typed property set and a weakly-typed
//! key/value engine. The engine knows scalars and vectors of four primitive
//! types, plus two pieces of metadata: whether a string is an explicit path,
//! and whether a real carries an explicit unit and a unit symbol.

use std::fmt;
use crate::{Result, Storable};

pub trait PropertyStore: Clone + fmt::Debug {
    // ========================================================================
    // Presence and enumeration
    // ========================================================================

    fn has_key(&self, key: &str) -> bool;

    /// All keys, in the engine's own order
    fn keys(&self) -> Vec<String>;

    fn is_empty(&self) -> bool;

    /// Remove a key. Fails if the key is absent.
    fn erase(&mut self, key: &str) -> Result<()>;

    /// Write a human-readable listing of all entries
    fn dump(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    // ========================================================================
    // Kind predicates (false for absent keys)
    // ========================================================================

    fn is_integer(&self, key: &str) -> bool;
    fn is_real(&self, key: &str) -> bool;
    fn is_boolean(&self, key: &str) -> bool;
    fn is_string(&self, key: &str) -> bool;
    fn is_scalar(&self, key: &str) -> bool;
    fn is_vector(&self, key: &str) -> bool;
    fn is_explicit_path(&self, key: &str) -> bool;
    fn has_explicit_unit(&self, key: &str) -> bool;
    fn has_unit_symbol(&self, key: &str) -> bool;

    // ========================================================================
    // Fetch
    // ========================================================================

    fn fetch<T: Storable>(&self, key: &str) -> Result<T>;

    /// Fetch an explicit path, with environment references expanded
    fn fetch_path(&self, key: &str) -> Result<String>;

    /// Fetch a real scalar that carries the explicit unit flag
    fn fetch_real_with_explicit_unit(&self, key: &str) -> Result<f64>;

    fn unit_symbol(&self, key: &str) -> Result<String>;

    // ========================================================================
    // Store (all fail on an occupied key)
    // ========================================================================

    fn store<T: Storable>(&mut self, key: &str, value: T) -> Result<()>;

    /// Store a string and mark it as an explicit path
    fn store_path(&mut self, key: &str, path: &str) -> Result<()>;

    /// Store a real scalar and mark it as carrying an explicit unit
    fn store_with_explicit_unit(&mut self, key: &str, value: f64) -> Result<()>;

    /// Attach a unit symbol to an existing real scalar
    fn set_unit_symbol(&mut self, key: &str, symbol: &str) -> Result<()>;
}
