//! Property set errors

use thiserror::Error;
use typedprops_store::StoreError;
use typedprops_units::UnitError;

use crate::Kind;

#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("property '{0}' is not set")]
    MissingKey(String),

    #[error("property '{0}' is already set")]
    ExistingKey(String),

    #[error("property '{key}' is {}, not {requested}", .found.map_or("unreadable", Kind::name))]
    WrongType {
        key: String,
        requested: Kind,
        found: Option<Kind>,
    },

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl PropertyError {
    pub fn is_missing_key(&self) -> bool {
        matches!(self, PropertyError::MissingKey(_))
    }

    pub fn is_existing_key(&self) -> bool {
        matches!(self, PropertyError::ExistingKey(_))
    }

    pub fn is_wrong_type(&self) -> bool {
        matches!(self, PropertyError::WrongType { .. })
    }

    pub fn is_unknown_unit(&self) -> bool {
        matches!(self, PropertyError::Unit(e) if e.is_unknown_unit())
    }

    pub fn is_wrong_dimension(&self) -> bool {
        matches!(self, PropertyError::Unit(e) if e.is_wrong_dimension())
    }
}

pub type Result<T> = std::result::Result<T, PropertyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_type_message() {
        let err = PropertyError::WrongType {
            key: "bar".to_string(),
            requested: Kind::Integer,
            found: Some(Kind::Real),
        };
        assert_eq!(err.to_string(), "property 'bar' is real, not integer");

        let err = PropertyError::WrongType {
            key: "half".to_string(),
            requested: Kind::Quantity,
            found: None,
        };
        assert_eq!(err.to_string(), "property 'half' is unreadable, not quantity");
    }

    #[test]
    fn test_unit_classification() {
        let err = PropertyError::from(UnitError::UnknownUnit("furlong".to_string()));
        assert!(err.is_unknown_unit());
        assert!(!err.is_wrong_dimension());
        assert!(!err.is_wrong_type());
    }
}
