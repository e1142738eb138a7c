//! Raw values held by the backing store
//!
//! A datum is one of four primitive types, either as a scalar or as an
//! ordered vector. It carries no notion of paths or units; those are flags
//! on the owning entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw stored value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Datum {
    Boolean(bool),
    Integer(i32),
    Real(f64),
    String(String),
    BooleanVec(Vec<bool>),
    IntegerVec(Vec<i32>),
    RealVec(Vec<f64>),
    StringVec(Vec<String>),
}

impl Datum {
    pub fn is_boolean(&self) -> bool {
        matches!(self, Datum::Boolean(_) | Datum::BooleanVec(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Datum::Integer(_) | Datum::IntegerVec(_))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Datum::Real(_) | Datum::RealVec(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Datum::String(_) | Datum::StringVec(_))
    }

    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            Datum::BooleanVec(_) | Datum::IntegerVec(_) | Datum::RealVec(_) | Datum::StringVec(_)
        )
    }

    pub fn is_scalar(&self) -> bool {
        !self.is_vector()
    }

    /// Element type name for dumps and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Datum::Boolean(_) | Datum::BooleanVec(_) => "boolean",
            Datum::Integer(_) | Datum::IntegerVec(_) => "integer",
            Datum::Real(_) | Datum::RealVec(_) => "real",
            Datum::String(_) | Datum::StringVec(_) => "string",
        }
    }

    /// Number of elements (1 for scalars)
    pub fn len(&self) -> usize {
        match self {
            Datum::BooleanVec(v) => v.len(),
            Datum::IntegerVec(v) => v.len(),
            Datum::RealVec(v) => v.len(),
            Datum::StringVec(v) => v.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// False if any real is NaN or infinite
    pub fn is_finite(&self) -> bool {
        match self {
            Datum::Real(x) => x.is_finite(),
            Datum::RealVec(v) => v.iter().all(|x| x.is_finite()),
            _ => true,
        }
    }
}

fn write_joined<T, F>(f: &mut fmt::Formatter<'_>, items: &[T], write: F) -> fmt::Result
where
    F: Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
{
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write(f, item)?;
    }
    Ok(())
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Boolean(b) => write!(f, "{}", b),
            Datum::Integer(n) => write!(f, "{}", n),
            Datum::Real(x) => write!(f, "{:?}", x),
            Datum::String(s) => write!(f, "{:?}", s),
            Datum::BooleanVec(v) => write_joined(f, v, |f, b| write!(f, "{}", b)),
            Datum::IntegerVec(v) => write_joined(f, v, |f, n| write!(f, "{}", n)),
            Datum::RealVec(v) => write_joined(f, v, |f, x| write!(f, "{:?}", x)),
            Datum::StringVec(v) => write_joined(f, v, |f, s| write!(f, "{:?}", s)),
        }
    }
}

/// Rust types the store can hold as a datum
pub trait Storable: Sized {
    /// Description used in type errors, e.g. "a real vector"
    const DESCRIPTION: &'static str;

    fn into_datum(self) -> Datum;

    fn from_datum(datum: &Datum) -> Option<Self>;
}

macro_rules! storable {
    ($($ty:ty => $variant:ident, $desc:literal;)+) => {
        $(
            impl Storable for $ty {
                const DESCRIPTION: &'static str = $desc;

                fn into_datum(self) -> Datum {
                    Datum::$variant(self)
                }

                fn from_datum(datum: &Datum) -> Option<Self> {
                    match datum {
                        Datum::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Datum {
                fn from(v: $ty) -> Self {
                    Datum::$variant(v)
                }
            }
        )+
    };
}

storable! {
    bool => Boolean, "a boolean";
    i32 => Integer, "an integer";
    f64 => Real, "a real";
    String => String, "a string";
    Vec<bool> => BooleanVec, "a boolean vector";
    Vec<i32> => IntegerVec, "an integer vector";
    Vec<f64> => RealVec, "a real vector";
    Vec<String> => StringVec, "a string vector";
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let d = Datum::from(vec![1, 2, 3]);
        assert!(d.is_integer());
        assert!(d.is_vector());
        assert!(!d.is_scalar());
        assert_eq!(d.len(), 3);

        let d = Datum::from(3.5);
        assert!(d.is_real());
        assert!(d.is_scalar());
        assert_eq!(d.type_name(), "real");
    }

    #[test]
    fn test_is_finite() {
        assert!(Datum::from(1.5).is_finite());
        assert!(Datum::from(vec![1, 2]).is_finite());
        assert!(!Datum::from(f64::NAN).is_finite());
        assert!(!Datum::from(vec![0.0, f64::NEG_INFINITY]).is_finite());
    }

    #[test]
    fn test_storable_conversion() {
        let d = true.into_datum();
        assert_eq!(bool::from_datum(&d), Some(true));
        assert_eq!(i32::from_datum(&d), None);
        assert_eq!(Vec::<bool>::from_datum(&d), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Datum::from(2.0).to_string(), "2.0");
        assert_eq!(Datum::from("a \"b\"").to_string(), r#""a \"b\"""#);
        assert_eq!(Datum::from(vec![1, 2]).to_string(), "1 2");
        assert_eq!(Datum::from(vec!["x".to_string(), "y".to_string()]).to_string(), r#""x" "y""#);
        assert_eq!(Datum::from(Vec::<f64>::new()).to_string(), "");
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Datum::from(vec![0.5])).unwrap();
        assert_eq!(json, r#"{"type":"real_vec","value":[0.5]}"#);
    }
}
