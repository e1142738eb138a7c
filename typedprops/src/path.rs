//! Filesystem path values
//!
//! A `Path` is a string that the backing store marks as a path, so it can be
//! told apart from a plain string of the same content. The type does no
//! normalization of its own; expansion of `~` and environment references
//! happens when the store hands the value back.
//!
//! On the way back, `$NAME` and `${NAME}` must name a set environment
//! variable or the read fails. Write `$$` for a literal `$`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    value: String,
}

impl Path {
    pub fn new(value: impl Into<String>) -> Self {
        Path { value: value.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn to_path_buf(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.value)
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Path { value }
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Path::new(value)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.value
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl PartialEq<str> for Path {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Path {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl PartialEq<String> for Path {
    fn eq(&self, other: &String) -> bool {
        &self.value == other
    }
}

impl PartialEq<Path> for str {
    fn eq(&self, other: &Path) -> bool {
        self == other.value
    }
}

impl PartialEq<Path> for &str {
    fn eq(&self, other: &Path) -> bool {
        *self == other.value
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_equality() {
        let p = Path::from("foobar");
        assert_eq!(p, "foobar");
        assert_eq!("foobar", p);
        assert_eq!(p, "foobar".to_string());
        assert_ne!(p, Path::from("foobar/"));
    }

    #[test]
    fn test_no_normalization() {
        let p = Path::new("./a//b/../c");
        assert_eq!(p.as_str(), "./a//b/../c");
        assert_eq!(p.to_string(), "./a//b/../c");
    }

    #[test]
    fn test_conversions() {
        let p = Path::new("/tmp/x");
        assert_eq!(p.to_path_buf(), std::path::PathBuf::from("/tmp/x"));
        assert_eq!(String::from(p.clone()), "/tmp/x");
        assert_eq!(p.into_string(), "/tmp/x");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Path::new("~/data")).unwrap();
        assert_eq!(json, r#""~/data""#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, "~/data");
    }
}
