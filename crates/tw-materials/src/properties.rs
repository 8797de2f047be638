//! Thermophysical properties of a single material.

use tw_core::units::{Conductivity, Density, SpecificHeat};
use tw_core::ensure_positive;

use crate::error::MaterialResult;

/// Conductivity, density and specific heat of a homogeneous material.
///
/// All three values are strictly positive and finite; the constructors
/// reject anything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    conductivity: f64,
    density: f64,
    specific_heat: f64,
}

impl MaterialProperties {
    /// Create from raw SI values: W/(m·K), kg/m³, J/(kg·K).
    pub fn new(conductivity: f64, density: f64, specific_heat: f64) -> MaterialResult<Self> {
        Ok(Self {
            conductivity: ensure_positive(conductivity, "conductivity")?,
            density: ensure_positive(density, "density")?,
            specific_heat: ensure_positive(specific_heat, "specific heat")?,
        })
    }

    /// Unchecked constructor for the static table in `standard`, whose
    /// values are covered by `every_entry_is_physical`.
    pub(crate) const fn from_table(conductivity: f64, density: f64, specific_heat: f64) -> Self {
        Self {
            conductivity,
            density,
            specific_heat,
        }
    }

    pub fn from_quantities(
        conductivity: Conductivity,
        density: Density,
        specific_heat: SpecificHeat,
    ) -> MaterialResult<Self> {
        Self::new(conductivity.value, density.value, specific_heat.value)
    }

    /// Thermal conductivity in W/(m·K).
    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    /// Density in kg/m³.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Specific heat in J/(kg·K).
    pub fn specific_heat(&self) -> f64 {
        self.specific_heat
    }

    /// Volumetric heat capacity ρ·c in J/(m³·K).
    pub fn volumetric_heat_capacity(&self) -> f64 {
        self.density * self.specific_heat
    }

    /// Thermal diffusivity k/(ρ·c) in m²/s.
    pub fn diffusivity(&self) -> f64 {
        self.conductivity / self.volumetric_heat_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialError;
    use tw_core::units::{j_per_kg_k, kg_per_m3, w_per_m_k};

    #[test]
    fn concrete_properties() {
        let concrete = MaterialProperties::new(1.75, 2400.0, 840.0).unwrap();
        assert_eq!(concrete.volumetric_heat_capacity(), 2400.0 * 840.0);
        assert!((concrete.diffusivity() - 1.75 / 2_016_000.0).abs() < 1e-18);
    }

    #[test]
    fn from_quantities_matches_raw() {
        let a = MaterialProperties::from_quantities(
            w_per_m_k(0.04),
            kg_per_m3(20.0),
            j_per_kg_k(1400.0),
        )
        .unwrap();
        let b = MaterialProperties::new(0.04, 20.0, 1400.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_non_physical_values() {
        assert!(matches!(
            MaterialProperties::new(0.0, 2400.0, 840.0),
            Err(MaterialError::NonPhysical {
                what: "conductivity",
                ..
            })
        ));
        assert!(MaterialProperties::new(1.0, -1.0, 840.0).is_err());
        assert!(MaterialProperties::new(1.0, 1.0, f64::NAN).is_err());
    }
}
