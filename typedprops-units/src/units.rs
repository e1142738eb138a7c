//! Unit definitions - common units organized by dimension
//!
//! Scales refer to the canonical system: millimeter, nanosecond, MeV,
//! positron charge, kelvin, mole and candela all have scale 1.

use std::collections::{BTreeSet, HashMap};
use std::f64::consts::PI;
use std::sync::LazyLock;
use crate::{Unit, Dimension};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Resolve a unit symbol (or alias) against the global registry
pub fn find_unit(symbol: &str) -> Option<&'static Unit> {
    UNITS.get(symbol)
}

// Base scales
const MILLIMETER: f64 = 1.0;
const METER: f64 = 1000.0 * MILLIMETER;
const NANOSECOND: f64 = 1.0;
const SECOND: f64 = 1.0e9 * NANOSECOND;
const MEV: f64 = 1.0;
const ELECTRON_VOLT: f64 = 1.0e-6 * MEV;
const E_SI: f64 = 1.602176634e-19;
const EPLUS: f64 = 1.0;

// Derived scales
const COULOMB: f64 = EPLUS / E_SI;
const JOULE: f64 = ELECTRON_VOLT / E_SI;
const KILOGRAM: f64 = JOULE * SECOND * SECOND / (METER * METER);
const GRAM: f64 = 1.0e-3 * KILOGRAM;
const WATT: f64 = JOULE / SECOND;
const NEWTON: f64 = JOULE / METER;
const PASCAL: f64 = NEWTON / (METER * METER);
const AMPERE: f64 = COULOMB / SECOND;
const VOLT: f64 = 1.0e-6 * MEV / EPLUS;
const OHM: f64 = VOLT / AMPERE;
const FARAD: f64 = COULOMB / VOLT;
const WEBER: f64 = VOLT * SECOND;
const TESLA: f64 = WEBER / (METER * METER);
const HENRY: f64 = WEBER / AMPERE;
const HERTZ: f64 = 1.0 / SECOND;
const BECQUEREL: f64 = 1.0 / SECOND;
const GRAY: f64 = JOULE / KILOGRAM;
const SIEMENS: f64 = 1.0 / OHM;
const BARN: f64 = 1.0e-28 * METER * METER;
const CANDELA: f64 = 1.0;
const STERADIAN: f64 = 1.0;
const LUMEN: f64 = CANDELA * STERADIAN;
const LUX: f64 = LUMEN / (METER * METER);
const BIT: f64 = 1.0;
const BYTE: f64 = 8.0 * BIT;

/// Registry of all known units
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        self.aliases.get(symbol).and_then(|canonical| self.units.get(canonical))
    }

    /// Get all units measuring a dimension
    pub fn by_dimension(&self, dimension: Dimension) -> Vec<&Unit> {
        self.units.values()
            .filter(|u| u.dimension == dimension)
            .collect()
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.keys().map(|s| s.as_str()).collect()
    }

    /// Dimensions that at least one registered unit measures
    pub fn dimensions(&self) -> BTreeSet<Dimension> {
        self.units.values().map(|u| u.dimension).collect()
    }

    fn register(&mut self, symbol: &str, name: &str, dimension: Dimension, scale: f64) {
        self.units.insert(symbol.to_string(), Unit::new(symbol, name, dimension, scale));
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_energy_units();
        self.register_electrical_units();
        self.register_magnetic_units();
        self.register_mechanical_units();
        self.register_geometric_units();
        self.register_radiation_units();
        self.register_thermal_units();
        self.register_optical_units();
        self.register_data_units();
        self.register_fraction_units();
    }

    fn register_length_units(&mut self) {
        use Dimension::Length;
        self.register("km", "kilometer", Length, 1.0e3 * METER);
        self.register("m", "meter", Length, METER);
        self.register("cm", "centimeter", Length, 1.0e-2 * METER);
        self.register("mm", "millimeter", Length, MILLIMETER);
        self.register("um", "micrometer", Length, 1.0e-6 * METER);
        self.register("nm", "nanometer", Length, 1.0e-9 * METER);
        self.register("pm", "picometer", Length, 1.0e-12 * METER);
        self.register("fm", "fermi", Length, 1.0e-15 * METER);
        self.register("angstrom", "angstrom", Length, 1.0e-10 * METER);
        self.register("in", "inch", Length, 25.4 * MILLIMETER);
        self.register("ft", "foot", Length, 304.8 * MILLIMETER);
        self.register("pc", "parsec", Length, 3.0856775807e16 * METER);

        self.alias("meter", "m");
        self.alias("meters", "m");
        self.alias("metre", "m");
        self.alias("kilometer", "km");
        self.alias("centimeter", "cm");
        self.alias("millimeter", "mm");
        self.alias("micrometer", "um");
        self.alias("μm", "um");
        self.alias("nanometer", "nm");
        self.alias("fermi", "fm");
        self.alias("inch", "in");
        self.alias("foot", "ft");
        self.alias("parsec", "pc");
    }

    fn register_mass_units(&mut self) {
        use Dimension::Mass;
        self.register("kg", "kilogram", Mass, KILOGRAM);
        self.register("g", "gram", Mass, GRAM);
        self.register("mg", "milligram", Mass, 1.0e-3 * GRAM);
        self.register("ug", "microgram", Mass, 1.0e-6 * GRAM);
        self.register("t", "tonne", Mass, 1.0e3 * KILOGRAM);
        self.register("lb", "pound", Mass, 0.45359237 * KILOGRAM);
        self.register("eV/c2", "electronvolt per c squared", Mass, 1.782661921e-36 * KILOGRAM);

        self.alias("kilogram", "kg");
        self.alias("gram", "g");
        self.alias("milligram", "mg");
        self.alias("μg", "ug");
        self.alias("tonne", "t");
        self.alias("pound", "lb");
    }

    fn register_time_units(&mut self) {
        use Dimension::{Time, Frequency, AngularFrequency};
        self.register("s", "second", Time, SECOND);
        self.register("ms", "millisecond", Time, 1.0e-3 * SECOND);
        self.register("us", "microsecond", Time, 1.0e-6 * SECOND);
        self.register("ns", "nanosecond", Time, NANOSECOND);
        self.register("ps", "picosecond", Time, 1.0e-12 * SECOND);
        self.register("min", "minute", Time, 60.0 * SECOND);
        self.register("h", "hour", Time, 3600.0 * SECOND);
        self.register("day", "day", Time, 86400.0 * SECOND);
        self.register("y", "year", Time, 365.0 * 86400.0 * SECOND);

        self.register("Hz", "hertz", Frequency, HERTZ);
        self.register("kHz", "kilohertz", Frequency, 1.0e3 * HERTZ);
        self.register("MHz", "megahertz", Frequency, 1.0e6 * HERTZ);
        self.register("GHz", "gigahertz", Frequency, 1.0e9 * HERTZ);

        self.register("rad/s", "radian per second", AngularFrequency, 1.0 / SECOND);

        self.alias("second", "s");
        self.alias("sec", "s");
        self.alias("millisecond", "ms");
        self.alias("microsecond", "us");
        self.alias("μs", "us");
        self.alias("nanosecond", "ns");
        self.alias("picosecond", "ps");
        self.alias("minute", "min");
        self.alias("hour", "h");
        self.alias("year", "y");
        self.alias("hertz", "Hz");
    }

    fn register_energy_units(&mut self) {
        use Dimension::{Energy, Power};
        self.register("eV", "electronvolt", Energy, ELECTRON_VOLT);
        self.register("keV", "kiloelectronvolt", Energy, 1.0e3 * ELECTRON_VOLT);
        self.register("MeV", "megaelectronvolt", Energy, MEV);
        self.register("GeV", "gigaelectronvolt", Energy, 1.0e9 * ELECTRON_VOLT);
        self.register("TeV", "teraelectronvolt", Energy, 1.0e12 * ELECTRON_VOLT);
        self.register("J", "joule", Energy, JOULE);
        self.register("kJ", "kilojoule", Energy, 1.0e3 * JOULE);
        self.register("erg", "erg", Energy, 1.0e-7 * JOULE);

        self.register("W", "watt", Power, WATT);
        self.register("mW", "milliwatt", Power, 1.0e-3 * WATT);
        self.register("kW", "kilowatt", Power, 1.0e3 * WATT);
        self.register("MW", "megawatt", Power, 1.0e6 * WATT);

        self.alias("electronvolt", "eV");
        self.alias("joule", "J");
        self.alias("watt", "W");
    }

    fn register_electrical_units(&mut self) {
        use Dimension::*;
        self.register("C", "coulomb", ElectricCharge, COULOMB);
        self.register("e", "elementary charge", ElectricCharge, EPLUS);
        self.register("fC", "femtocoulomb", ElectricCharge, 1.0e-15 * COULOMB);
        self.register("pC", "picocoulomb", ElectricCharge, 1.0e-12 * COULOMB);

        self.register("A", "ampere", ElectricCurrent, AMPERE);
        self.register("mA", "milliampere", ElectricCurrent, 1.0e-3 * AMPERE);
        self.register("uA", "microampere", ElectricCurrent, 1.0e-6 * AMPERE);
        self.register("nA", "nanoampere", ElectricCurrent, 1.0e-9 * AMPERE);

        self.register("V", "volt", ElectricPotential, VOLT);
        self.register("mV", "millivolt", ElectricPotential, 1.0e-3 * VOLT);
        self.register("kV", "kilovolt", ElectricPotential, 1.0e3 * VOLT);
        self.register("MV", "megavolt", ElectricPotential, 1.0e6 * VOLT);

        self.register("ohm", "ohm", ElectricResistance, OHM);
        self.register("kohm", "kiloohm", ElectricResistance, 1.0e3 * OHM);
        self.register("Mohm", "megaohm", ElectricResistance, 1.0e6 * OHM);
        self.register("ohm.m", "ohm meter", Resistivity, OHM * METER);

        self.register("S", "siemens", Conductance, SIEMENS);
        self.register("S/m", "siemens per meter", Conductivity, SIEMENS / METER);

        self.register("F", "farad", Capacitance, FARAD);
        self.register("uF", "microfarad", Capacitance, 1.0e-6 * FARAD);
        self.register("nF", "nanofarad", Capacitance, 1.0e-9 * FARAD);
        self.register("pF", "picofarad", Capacitance, 1.0e-12 * FARAD);
        self.register("F/m", "farad per meter", Permittivity, FARAD / METER);

        self.register("V/m", "volt per meter", ElectricField, VOLT / METER);
        self.register("kV/cm", "kilovolt per centimeter", ElectricField, 1.0e3 * VOLT / (1.0e-2 * METER));
        self.register("C/m2", "coulomb per square meter", ElectricDisplacementField, COULOMB / (METER * METER));
        self.register("V.m", "volt meter", ElectricFlux, VOLT * METER);
        self.register("V.s", "volt second", ElectricSignalIntegral, VOLT * SECOND);
        self.register("nV.s", "nanovolt second", ElectricSignalIntegral, 1.0e-9 * VOLT * SECOND);

        self.alias("coulomb", "C");
        self.alias("ampere", "A");
        self.alias("volt", "V");
        self.alias("farad", "F");
    }

    fn register_magnetic_units(&mut self) {
        use Dimension::*;
        self.register("T", "tesla", MagneticFluxDensity, TESLA);
        self.register("mT", "millitesla", MagneticFluxDensity, 1.0e-3 * TESLA);
        self.register("G", "gauss", MagneticFluxDensity, 1.0e-4 * TESLA);
        self.register("Wb", "weber", MagneticFlux, WEBER);
        self.register("H", "henry", Inductance, HENRY);
        self.register("mH", "millihenry", Inductance, 1.0e-3 * HENRY);
        self.register("A/m", "ampere per meter", MagneticFieldStrength, AMPERE / METER);
        self.register("H/m", "henry per meter", Permeability, HENRY / METER);

        self.alias("tesla", "T");
        self.alias("gauss", "G");
        self.alias("weber", "Wb");
        self.alias("henry", "H");
    }

    fn register_mechanical_units(&mut self) {
        use Dimension::*;
        self.register("m/s", "meter per second", Velocity, METER / SECOND);
        self.register("km/h", "kilometer per hour", Velocity, 1.0e3 * METER / (3600.0 * SECOND));
        self.register("mm/ns", "millimeter per nanosecond", Velocity, MILLIMETER / NANOSECOND);
        self.register("c", "speed of light", Velocity, 299.792458 * MILLIMETER / NANOSECOND);

        self.register("m/s2", "meter per second squared", Acceleration, METER / (SECOND * SECOND));
        self.register("gee", "standard gravity", Acceleration, 9.80665 * METER / (SECOND * SECOND));

        self.register("N", "newton", Force, NEWTON);
        self.register("kN", "kilonewton", Force, 1.0e3 * NEWTON);
        self.register("dyn", "dyne", Force, 1.0e-5 * NEWTON);

        self.register("Pa", "pascal", Pressure, PASCAL);
        self.register("hPa", "hectopascal", Pressure, 1.0e2 * PASCAL);
        self.register("kPa", "kilopascal", Pressure, 1.0e3 * PASCAL);
        self.register("bar", "bar", Pressure, 1.0e5 * PASCAL);
        self.register("mbar", "millibar", Pressure, 1.0e2 * PASCAL);
        self.register("atm", "atmosphere", Pressure, 101325.0 * PASCAL);

        self.register("N/m", "newton per meter", SurfaceTension, NEWTON / METER);

        self.register("g/cm3", "gram per cubic centimeter", Density, GRAM / (1.0e3 * MILLIMETER * MILLIMETER * MILLIMETER));
        self.register("kg/m3", "kilogram per cubic meter", Density, KILOGRAM / (METER * METER * METER));
        self.register("g/cm2", "gram per square centimeter", SurfaceDensity, GRAM / (1.0e2 * MILLIMETER * MILLIMETER));
        self.register("kg/m2", "kilogram per square meter", SurfaceDensity, KILOGRAM / (METER * METER));

        self.alias("newton", "N");
        self.alias("pascal", "Pa");
    }

    fn register_geometric_units(&mut self) {
        use Dimension::*;
        self.register("m2", "square meter", Surface, METER * METER);
        self.register("cm2", "square centimeter", Surface, 1.0e2 * MILLIMETER * MILLIMETER);
        self.register("mm2", "square millimeter", Surface, MILLIMETER * MILLIMETER);

        self.register("m3", "cubic meter", Volume, METER * METER * METER);
        self.register("cm3", "cubic centimeter", Volume, 1.0e3 * MILLIMETER * MILLIMETER * MILLIMETER);
        self.register("mm3", "cubic millimeter", Volume, MILLIMETER * MILLIMETER * MILLIMETER);
        self.register("L", "liter", Volume, 1.0e-3 * METER * METER * METER);
        self.register("mL", "milliliter", Volume, 1.0e-6 * METER * METER * METER);

        self.register("barn", "barn", CrossSection, BARN);
        self.register("mb", "millibarn", CrossSection, 1.0e-3 * BARN);
        self.register("ub", "microbarn", CrossSection, 1.0e-6 * BARN);
        self.register("nb", "nanobarn", CrossSection, 1.0e-9 * BARN);
        self.register("pb", "picobarn", CrossSection, 1.0e-12 * BARN);

        self.register("rad", "radian", Angle, 1.0);
        self.register("mrad", "milliradian", Angle, 1.0e-3);
        self.register("deg", "degree", Angle, PI / 180.0);
        self.register("sr", "steradian", SolidAngle, STERADIAN);

        self.register("1/m", "per meter", WaveNumber, 1.0 / METER);
        self.register("1/cm", "per centimeter", WaveNumber, 1.0 / (1.0e-2 * METER));

        self.alias("liter", "L");
        self.alias("radian", "rad");
        self.alias("degree", "deg");
        self.alias("steradian", "sr");
    }

    fn register_radiation_units(&mut self) {
        use Dimension::*;
        self.register("Bq", "becquerel", Activity, BECQUEREL);
        self.register("kBq", "kilobecquerel", Activity, 1.0e3 * BECQUEREL);
        self.register("MBq", "megabecquerel", Activity, 1.0e6 * BECQUEREL);
        self.register("mBq", "millibecquerel", Activity, 1.0e-3 * BECQUEREL);
        self.register("Ci", "curie", Activity, 3.7e10 * BECQUEREL);

        self.register("Bq/kg", "becquerel per kilogram", MassActivity, BECQUEREL / KILOGRAM);
        self.register("mBq/kg", "millibecquerel per kilogram", MassActivity, 1.0e-3 * BECQUEREL / KILOGRAM);
        self.register("Bq/m3", "becquerel per cubic meter", VolumeActivity, BECQUEREL / (METER * METER * METER));
        self.register("mBq/m3", "millibecquerel per cubic meter", VolumeActivity, 1.0e-3 * BECQUEREL / (METER * METER * METER));
        self.register("Bq/m2", "becquerel per square meter", SurfaceActivity, BECQUEREL / (METER * METER));

        self.register("Gy", "gray", AbsorbedDose, GRAY);
        self.register("Sv", "sievert", EquivalentDose, GRAY);
        self.register("mSv", "millisievert", EquivalentDose, 1.0e-3 * GRAY);

        self.alias("becquerel", "Bq");
        self.alias("curie", "Ci");
        self.alias("gray", "Gy");
        self.alias("sievert", "Sv");
    }

    fn register_thermal_units(&mut self) {
        use Dimension::{Temperature, Amount};
        self.register("K", "kelvin", Temperature, 1.0);
        self.register("mK", "millikelvin", Temperature, 1.0e-3);
        self.register("mol", "mole", Amount, 1.0);
        self.register("mmol", "millimole", Amount, 1.0e-3);

        self.alias("kelvin", "K");
        self.alias("mole", "mol");
    }

    fn register_optical_units(&mut self) {
        use Dimension::*;
        self.register("cd", "candela", LuminousIntensity, CANDELA);
        self.register("lm", "lumen", LuminousFlux, LUMEN);
        self.register("lx", "lux", Illuminance, LUX);
        self.register("cd/m2", "candela per square meter", Luminance, CANDELA / (METER * METER));
        self.register("lm.s", "lumen second", LuminousEnergy, LUMEN * SECOND);
        self.register("lm.s/m3", "lumen second per cubic meter", LuminousEnergyDensity, LUMEN * SECOND / (METER * METER * METER));
        self.register("lx.s", "lux second", LuminousExposure, LUX * SECOND);

        self.alias("candela", "cd");
        self.alias("lumen", "lm");
        self.alias("lux", "lx");
    }

    fn register_data_units(&mut self) {
        use Dimension::{DataStorage, DataTransferRate};
        self.register("bit", "bit", DataStorage, BIT);
        self.register("byte", "byte", DataStorage, BYTE);
        self.register("kB", "kilobyte", DataStorage, 1.0e3 * BYTE);
        self.register("MB", "megabyte", DataStorage, 1.0e6 * BYTE);
        self.register("GB", "gigabyte", DataStorage, 1.0e9 * BYTE);
        self.register("bps", "bit per second", DataTransferRate, BIT / SECOND);
        self.register("Mbps", "megabit per second", DataTransferRate, 1.0e6 * BIT / SECOND);

        self.alias("B", "byte");
        self.alias("bytes", "byte");
    }

    fn register_fraction_units(&mut self) {
        use Dimension::{Fraction, Level};
        self.register("%", "percent", Fraction, 1.0e-2);
        self.register("ppm", "part per million", Fraction, 1.0e-6);
        self.register("ppb", "part per billion", Fraction, 1.0e-9);
        self.register("dB", "decibel", Level, 1.0);

        self.alias("percent", "%");
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1.0e-12
    }

    #[test]
    fn test_unit_registry() {
        let reg = UnitRegistry::new();

        assert!(reg.get("m").is_some());
        assert!(reg.get("kg").is_some());
        assert!(reg.get("ns").is_some());

        assert_eq!(reg.get("meter").unwrap().symbol, "m");
        assert_eq!(reg.get("kilogram").unwrap().symbol, "kg");

        assert!(reg.get("unknown_xyz").is_none());
    }

    #[test]
    fn test_canonical_system() {
        assert_eq!(find_unit("mm").unwrap().scale, 1.0);
        assert_eq!(find_unit("ns").unwrap().scale, 1.0);
        assert_eq!(find_unit("MeV").unwrap().scale, 1.0);
        assert_eq!(find_unit("m").unwrap().scale, 1000.0);
        assert!(close(find_unit("kg").unwrap().scale, 6.241509074460763e24));
    }

    #[test]
    fn test_mass_ratio() {
        let kg = find_unit("kg").unwrap();
        let g = find_unit("g").unwrap();
        assert!(close(kg.scale / g.scale, 1000.0));
    }

    #[test]
    fn test_derived_consistency() {
        // 1 J = 1 N * 1 m and 1 W = 1 J / 1 s
        let joule = find_unit("J").unwrap().scale;
        let newton = find_unit("N").unwrap().scale;
        let meter = find_unit("m").unwrap().scale;
        let watt = find_unit("W").unwrap().scale;
        let second = find_unit("s").unwrap().scale;
        assert!(close(newton * meter, joule));
        assert!(close(watt * second, joule));
    }

    #[test]
    fn test_by_dimension() {
        let length_units = UNITS.by_dimension(Dimension::Length);
        assert!(length_units.len() > 5);
        for unit in length_units {
            assert_eq!(unit.dimension, Dimension::Length);
        }
    }

    #[test]
    fn test_registered_dimensions() {
        let dims = UNITS.dimensions();
        assert!(dims.contains(&Dimension::Length));
        assert!(dims.contains(&Dimension::VolumeActivity));
        assert!(!dims.contains(&Dimension::ProcedureDefined));
    }

    #[test]
    fn test_symbols_unique_dimension() {
        for symbol in UNITS.symbols() {
            let unit = find_unit(symbol).unwrap();
            assert_eq!(unit.symbol, symbol);
            assert!(unit.scale > 0.0, "{} has non-positive scale", symbol);
        }
    }
}
