//! Layered construction definitions.

use tw_core::units::{Length, m, to_meters};

use crate::error::{SolverError, SolverResult};

/// A single homogeneous layer, exterior to interior order implied by its
/// position in a [`Construction`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    material_id: String,
    thickness: Length,
}

impl Layer {
    pub fn new(material_id: impl Into<String>, thickness: Length) -> Self {
        Self {
            material_id: material_id.into(),
            thickness,
        }
    }

    /// Convenience constructor taking the thickness in meters.
    pub fn meters(material_id: impl Into<String>, thickness_m: f64) -> Self {
        Self::new(material_id, m(thickness_m))
    }

    pub fn material_id(&self) -> &str {
        &self.material_id
    }

    pub fn thickness(&self) -> Length {
        self.thickness
    }

    pub fn thickness_m(&self) -> f64 {
        to_meters(self.thickness)
    }
}

/// Ordered layers from the exterior face (first) to the interior face (last).
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    layers: Vec<Layer>,
}

impl Construction {
    /// Build a construction, rejecting empty layer lists and non-positive
    /// thicknesses.
    pub fn new(layers: Vec<Layer>) -> SolverResult<Self> {
        let construction = Self { layers };
        construction.validate()?;
        Ok(construction)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Sum of layer thicknesses in meters.
    pub fn total_thickness_m(&self) -> f64 {
        self.layers.iter().map(Layer::thickness_m).sum()
    }

    pub(crate) fn validate(&self) -> SolverResult<()> {
        if self.layers.is_empty() {
            return Err(SolverError::InvalidConstruction {
                what: "construction has no layers".to_string(),
            });
        }
        for (index, layer) in self.layers.iter().enumerate() {
            let t = layer.thickness_m();
            if !t.is_finite() || t <= 0.0 {
                return Err(SolverError::InvalidConstruction {
                    what: format!(
                        "layer {index} ({}) has non-positive thickness {t} m",
                        layer.material_id
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_thickness_sums_layers() {
        let c = Construction::new(vec![
            Layer::meters("concrete", 0.20),
            Layer::meters("eps", 0.05),
        ])
        .unwrap();
        assert_eq!(c.len(), 2);
        assert!((c.total_thickness_m() - 0.25).abs() < 1e-15);
        assert_eq!(c.layers()[1].material_id(), "eps");
    }

    #[test]
    fn empty_construction_is_rejected() {
        assert!(matches!(
            Construction::new(vec![]),
            Err(SolverError::InvalidConstruction { .. })
        ));
    }

    #[test]
    fn zero_and_negative_thickness_are_rejected() {
        for t in [0.0, -0.1, f64::NAN] {
            let err = Construction::new(vec![
                Layer::meters("concrete", 0.2),
                Layer::meters("eps", t),
            ])
            .unwrap_err();
            assert!(matches!(err, SolverError::InvalidConstruction { .. }));
        }
    }
}
