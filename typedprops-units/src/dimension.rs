//! Dimension labels
//!
//! Every unit in the registry resolves to exactly one of these labels.
//! The set is closed: a label outside it cannot be produced by the registry
//! and cannot be named by a dimension tag.

use std::fmt;
use serde::{Serialize, Deserialize};

macro_rules! dimensions {
    ($($variant:ident => $label:literal,)+) => {
        /// Physical category a unit resolves to
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Dimension {
            $($variant,)+
        }

        impl Dimension {
            /// All known dimensions, in label order
            pub const ALL: &'static [Dimension] = &[$(Dimension::$variant,)+];

            /// The label used by unit tables and configuration text
            pub fn label(&self) -> &'static str {
                match self {
                    $(Dimension::$variant => $label,)+
                }
            }

            /// Look up a dimension by its label
            pub fn from_label(label: &str) -> Option<Dimension> {
                match label {
                    $($label => Some(Dimension::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

dimensions! {
    AbsorbedDose => "absorbed_dose",
    Acceleration => "acceleration",
    Activity => "activity",
    Amount => "amount",
    Angle => "angle",
    AngularFrequency => "angular_frequency",
    Capacitance => "capacitance",
    Conductance => "conductance",
    Conductivity => "conductivity",
    CrossSection => "cross_section",
    DataStorage => "data_storage",
    DataTransferRate => "data_transfer_rate",
    Density => "density",
    ElectricCharge => "electric_charge",
    ElectricCurrent => "electric_current",
    ElectricDisplacementField => "electric_displacement_field",
    ElectricField => "electric_field",
    ElectricFlux => "electric_flux",
    ElectricPotential => "electric_potential",
    ElectricResistance => "electric_resistance",
    ElectricSignalIntegral => "electric_signal_integral",
    Energy => "energy",
    EquivalentDose => "equivalent_dose",
    Force => "force",
    Fraction => "fraction",
    Frequency => "frequency",
    Illuminance => "illuminance",
    Inductance => "inductance",
    Length => "length",
    Level => "level",
    Luminance => "luminance",
    LuminousEnergy => "luminous_energy",
    LuminousEnergyDensity => "luminous_energy_density",
    LuminousExposure => "luminous_exposure",
    LuminousFlux => "luminous_flux",
    LuminousIntensity => "luminous_intensity",
    MagneticFieldStrength => "magnetic_field_strength",
    MagneticFlux => "magnetic_flux",
    MagneticFluxDensity => "magnetic_flux_density",
    Mass => "mass",
    MassActivity => "mass_activity",
    Permeability => "permeability",
    Permittivity => "permittivity",
    Power => "power",
    Pressure => "pressure",
    ProcedureDefined => "procedure_defined",
    Resistivity => "resistivity",
    SolidAngle => "solid_angle",
    Surface => "surface",
    SurfaceActivity => "surface_activity",
    SurfaceDensity => "surface_density",
    SurfaceTension => "surface_tension",
    Temperature => "temperature",
    Time => "time",
    Velocity => "velocity",
    Volume => "volume",
    VolumeActivity => "volume_activity",
    WaveNumber => "wave_number",
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
