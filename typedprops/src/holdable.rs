//! The closed set of types a property set can hold
//!
//! `Holdable` is sealed: the ten concrete kinds are implemented here, plus
//! `QuantityOf<D>` for every dimension tag. Anything else is rejected at
//! compile time by the bounds on `PropertySet`'s accessors.

use tracing::warn;
use typedprops_store::PropertyStore;
use typedprops_units::{DimensionTag, Quantity, QuantityOf};

use crate::{Kind, Path, Result};

mod private {
    pub trait Sealed {}
}

/// A type a property set can store and retrieve
pub trait Holdable: private::Sealed + Sized {
    /// The kind a stored value of this type is inferred as
    const KIND: Kind;

    /// Read the value under `key`. The caller has already checked the kind.
    #[doc(hidden)]
    fn fetch_from<S: PropertyStore>(store: &S, key: &str) -> Result<Self>;

    /// Write the value under a free `key`
    #[doc(hidden)]
    fn store_into<S: PropertyStore>(self, store: &mut S, key: &str) -> Result<()>;
}

macro_rules! holdable_datum {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl private::Sealed for $ty {}

            impl Holdable for $ty {
                const KIND: Kind = Kind::$kind;

                fn fetch_from<S: PropertyStore>(store: &S, key: &str) -> Result<Self> {
                    Ok(store.fetch::<$ty>(key)?)
                }

                fn store_into<S: PropertyStore>(self, store: &mut S, key: &str) -> Result<()> {
                    Ok(store.store(key, self)?)
                }
            }
        )+
    };
}

holdable_datum! {
    i32 => Integer,
    f64 => Real,
    bool => Boolean,
    String => String,
    Vec<i32> => IntegerVec,
    Vec<f64> => RealVec,
    Vec<bool> => BooleanVec,
    Vec<String> => StringVec,
}

impl private::Sealed for Path {}

impl Holdable for Path {
    const KIND: Kind = Kind::Path;

    fn fetch_from<S: PropertyStore>(store: &S, key: &str) -> Result<Self> {
        Ok(Path::from(store.fetch_path(key)?))
    }

    fn store_into<S: PropertyStore>(self, store: &mut S, key: &str) -> Result<()> {
        Ok(store.store_path(key, self.as_str())?)
    }
}

impl private::Sealed for Quantity {}

impl Holdable for Quantity {
    const KIND: Kind = Kind::Quantity;

    fn fetch_from<S: PropertyStore>(store: &S, key: &str) -> Result<Self> {
        let value = store.fetch_real_with_explicit_unit(key)?;
        let symbol = store.unit_symbol(key)?;
        Ok(Quantity::new(value, &symbol)?)
    }

    /// Two writes: the magnitude, then the unit symbol. If the second write
    /// fails the key is erased again so no half-written quantity is left.
    fn store_into<S: PropertyStore>(self, store: &mut S, key: &str) -> Result<()> {
        store.store_with_explicit_unit(key, self.value())?;
        if let Err(err) = store.set_unit_symbol(key, self.unit()) {
            warn!(key = %key, unit = %self.unit(), error = %err, "unit symbol rejected, rolling back");
            if let Err(erase_err) = store.erase(key) {
                warn!(key = %key, error = %erase_err, "rollback failed");
            }
            return Err(err.into());
        }
        Ok(())
    }
}

impl<D: DimensionTag> private::Sealed for QuantityOf<D> {}

impl<D: DimensionTag> Holdable for QuantityOf<D> {
    const KIND: Kind = Kind::Quantity;

    fn fetch_from<S: PropertyStore>(store: &S, key: &str) -> Result<Self> {
        let quantity = Quantity::fetch_from(store, key)?;
        Ok(QuantityOf::from_quantity(quantity)?)
    }

    fn store_into<S: PropertyStore>(self, store: &mut S, key: &str) -> Result<()> {
        self.into_quantity().store_into(store, key)
    }
}
