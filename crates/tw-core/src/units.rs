// tw-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, MassDensity as UomMassDensity,
    SpecificHeatCapacity as UomSpecificHeatCapacity,
    ThermalConductivity as UomThermalConductivity, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type SpecificHeat = UomSpecificHeatCapacity;
pub type Conductivity = UomThermalConductivity;
pub type Time = UomTime;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn w_per_m_k(v: f64) -> Conductivity {
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;
    Conductivity::new::<watt_per_meter_kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn j_per_kg_k(v: f64) -> SpecificHeat {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecificHeat::new::<joule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn to_meters(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

#[inline]
pub fn to_seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

pub mod constants {
    use super::*;

    /// Interior air density used by the lumped air node.
    pub const AIR_DENSITY_KG_M3: f64 = 1.179_766_047_025_846_9;
    /// Interior air specific heat used by the lumped air node.
    pub const AIR_SPECIFIC_HEAT_J_KG_K: f64 = 1_005.458_757;

    pub const SECONDS_PER_HOUR: f64 = 3_600.0;

    #[inline]
    pub fn air_density() -> Density {
        kg_per_m3(AIR_DENSITY_KG_M3)
    }

    #[inline]
    pub fn air_specific_heat() -> SpecificHeat {
        j_per_kg_k(AIR_SPECIFIC_HEAT_J_KG_K)
    }

    /// Volumetric heat capacity of interior air (J/m³·K).
    #[inline]
    pub fn air_volumetric_heat_capacity() -> f64 {
        (air_density() * air_specific_heat()).value
    }
}
