//! Dimension-tagged quantities
//!
//! `QuantityOf<tag::Length>` is a [`Quantity`] whose unit is known to measure
//! a length. Each tag is a zero-sized type, so quantities of different
//! dimensions are different types. The unit itself is only known at run time,
//! so construction checks the resolved dimension against the tag.

use std::fmt;
use std::marker::PhantomData;
use crate::{Dimension, Quantity, Unit, UnitError};

/// A compile-time name for an expected dimension
pub trait DimensionTag: Copy + fmt::Debug + PartialEq + Default + Send + Sync + 'static {
    const DIMENSION: Dimension;
}

/// A [`Quantity`] validated against the dimension named by `D`
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityOf<D: DimensionTag> {
    inner: Quantity,
    _tag: PhantomData<D>,
}

impl<D: DimensionTag> QuantityOf<D> {
    /// Build from a value and unit symbol, failing if the unit is unknown or
    /// measures a dimension other than `D`'s
    pub fn new(value: f64, symbol: &str) -> Result<Self, UnitError> {
        Self::from_quantity(Quantity::new(value, symbol)?)
    }

    /// Re-validate an untagged quantity against `D`
    pub fn from_quantity(quantity: Quantity) -> Result<Self, UnitError> {
        if quantity.dimension() != D::DIMENSION {
            return Err(UnitError::WrongDimension {
                expected: D::DIMENSION.label().to_string(),
                found: quantity.dimension_label().to_string(),
                context: format!("unit '{}'", quantity.unit()),
            });
        }
        Ok(QuantityOf { inner: quantity, _tag: PhantomData })
    }

    /// The dimension every value of this type measures
    pub fn expected_dimension() -> Dimension {
        D::DIMENSION
    }

    pub fn as_quantity(&self) -> &Quantity {
        &self.inner
    }

    pub fn into_quantity(self) -> Quantity {
        self.inner
    }

    pub fn value(&self) -> f64 {
        self.inner.value()
    }

    pub fn unit(&self) -> &str {
        self.inner.unit()
    }

    pub fn dimension(&self) -> Dimension {
        self.inner.dimension()
    }

    pub fn canonical_value(&self) -> f64 {
        self.inner.canonical_value()
    }

    pub fn value_in(&self, unit: &Unit) -> Result<f64, UnitError> {
        self.inner.value_in(unit)
    }

    pub fn value_in_symbol(&self, symbol: &str) -> Result<f64, UnitError> {
        self.inner.value_in_symbol(symbol)
    }
}

impl<D: DimensionTag> AsRef<Quantity> for QuantityOf<D> {
    fn as_ref(&self) -> &Quantity {
        &self.inner
    }
}

impl<D: DimensionTag> From<QuantityOf<D>> for Quantity {
    fn from(tagged: QuantityOf<D>) -> Self {
        tagged.inner
    }
}

impl<D: DimensionTag> TryFrom<Quantity> for QuantityOf<D> {
    type Error = UnitError;

    fn try_from(quantity: Quantity) -> Result<Self, Self::Error> {
        Self::from_quantity(quantity)
    }
}

impl<D: DimensionTag> fmt::Display for QuantityOf<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

macro_rules! dimension_tags {
    ($($tag:ident,)+) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $tag;

            impl super::DimensionTag for $tag {
                const DIMENSION: super::Dimension = super::Dimension::$tag;
            }
        )+
    };
}

/// One tag per [`Dimension`]
pub mod tag {
    dimension_tags! {
        AbsorbedDose,
        Acceleration,
        Activity,
        Amount,
        Angle,
        AngularFrequency,
        Capacitance,
        Conductance,
        Conductivity,
        CrossSection,
        DataStorage,
        DataTransferRate,
        Density,
        ElectricCharge,
        ElectricCurrent,
        ElectricDisplacementField,
        ElectricField,
        ElectricFlux,
        ElectricPotential,
        ElectricResistance,
        ElectricSignalIntegral,
        Energy,
        EquivalentDose,
        Force,
        Fraction,
        Frequency,
        Illuminance,
        Inductance,
        Length,
        Level,
        Luminance,
        LuminousEnergy,
        LuminousEnergyDensity,
        LuminousExposure,
        LuminousFlux,
        LuminousIntensity,
        MagneticFieldStrength,
        MagneticFlux,
        MagneticFluxDensity,
        Mass,
        MassActivity,
        Permeability,
        Permittivity,
        Power,
        Pressure,
        ProcedureDefined,
        Resistivity,
        SolidAngle,
        Surface,
        SurfaceActivity,
        SurfaceDensity,
        SurfaceTension,
        Temperature,
        Time,
        Velocity,
        Volume,
        VolumeActivity,
        WaveNumber,
    }
}
