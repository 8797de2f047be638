//! Construction → control-volume arrays.

use tracing::debug;
use tw_core::harmonic_mean;
use tw_materials::{MaterialCatalog, MaterialProperties};

use crate::construction::Construction;
use crate::error::{SolverError, SolverResult};

/// Smallest resolution accepted by [`discretize`]; the coefficient stencil
/// needs a neighbour on each side of the boundary volumes.
pub const MIN_CONTROL_VOLUMES: usize = 2;

/// Fixed-width control volumes with per-volume conductivity and volumetric
/// heat capacity. Index 0 touches the exterior face, index `nx - 1` the
/// interior face.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscretizedWall {
    k: Vec<f64>,
    rhoc: Vec<f64>,
    dx: f64,
}

impl DiscretizedWall {
    /// Assemble a wall from explicit arrays.
    ///
    /// Both arrays must share a length of at least [`MIN_CONTROL_VOLUMES`],
    /// and `dx` must be positive and finite. Array contents are not checked
    /// here; non-physical values surface as `DegenerateSystem` when the
    /// coefficients are built.
    pub fn from_arrays(k: Vec<f64>, rhoc: Vec<f64>, dx: f64) -> SolverResult<Self> {
        if k.len() != rhoc.len() {
            return Err(SolverError::InvalidConstruction {
                what: format!(
                    "conductivity and capacity arrays differ in length ({} vs {})",
                    k.len(),
                    rhoc.len()
                ),
            });
        }
        if k.len() < MIN_CONTROL_VOLUMES {
            return Err(SolverError::InvalidConstruction {
                what: format!(
                    "need at least {MIN_CONTROL_VOLUMES} control volumes, got {}",
                    k.len()
                ),
            });
        }
        if !dx.is_finite() || dx <= 0.0 {
            return Err(SolverError::InvalidConstruction {
                what: format!("control-volume width must be positive, got {dx}"),
            });
        }
        Ok(Self { k, rhoc, dx })
    }

    /// Number of control volumes.
    pub fn nx(&self) -> usize {
        self.k.len()
    }

    /// Conductivity per control volume, W/(m·K).
    pub fn k(&self) -> &[f64] {
        &self.k
    }

    /// Volumetric heat capacity per control volume, J/(m³·K).
    pub fn rhoc(&self) -> &[f64] {
        &self.rhoc
    }

    /// Control-volume width, m.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn total_thickness_m(&self) -> f64 {
        self.dx * self.nx() as f64
    }

    /// Conductive resistance between the centres of the first and last
    /// volumes, m²·K/W, using the same face conductances as the solver.
    pub fn center_to_center_resistance(&self) -> f64 {
        self.k
            .windows(2)
            .map(|pair| self.dx / harmonic_mean(pair[0], pair[1]))
            .sum()
    }

    /// Heat capacity per unit face area, J/(m²·K).
    pub fn heat_capacity_per_area(&self) -> f64 {
        self.rhoc.iter().sum::<f64>() * self.dx
    }
}

/// Discretize `construction` into `nx` equal control volumes.
///
/// Each layer receives `floor(thickness / dx)` dedicated volumes. Entering a
/// new layer after at least one volume has been placed consumes one extra
/// interface volume whose conductivity is the harmonic mean of the previous
/// volume and the new layer, with the new layer's capacity. Consequently a
/// layer thinner than `dx` keeps only that interface volume, and a thin
/// first layer leaves no trace at all.
///
/// Volumes beyond `nx` are dropped from the end of the last layer; volumes
/// left unassigned by the floors take the last layer's properties.
pub fn discretize(
    construction: &Construction,
    nx: usize,
    catalog: &dyn MaterialCatalog,
) -> SolverResult<DiscretizedWall> {
    if nx < MIN_CONTROL_VOLUMES {
        return Err(SolverError::InvalidConstruction {
            what: format!("need at least {MIN_CONTROL_VOLUMES} control volumes, got {nx}"),
        });
    }
    construction.validate()?;

    // Resolve every material before touching the arrays.
    let resolved: Vec<(f64, MaterialProperties)> = construction
        .layers()
        .iter()
        .map(|layer| Ok((layer.thickness_m(), catalog.get_material(layer.material_id())?)))
        .collect::<SolverResult<_>>()?;

    let total = construction.total_thickness_m();
    let dx = total / nx as f64;

    let mut k = vec![0.0; nx];
    let mut rhoc = vec![0.0; nx];
    let mut i = 0;

    for (layer_index, (thickness, props)) in resolved.iter().enumerate() {
        let layer_k = props.conductivity();
        let layer_rhoc = props.volumetric_heat_capacity();

        if layer_index > 0 && i > 0 && i < nx {
            k[i] = harmonic_mean(k[i - 1], layer_k);
            rhoc[i] = layer_rhoc;
            i += 1;
        }

        let dedicated = (thickness / dx).floor() as usize;
        let end = (i + dedicated).min(nx);
        k[i..end].fill(layer_k);
        rhoc[i..end].fill(layer_rhoc);
        i = end;
    }

    if i < nx {
        if let Some((_, last)) = resolved.last() {
            k[i..].fill(last.conductivity());
            rhoc[i..].fill(last.volumetric_heat_capacity());
        }
    }

    debug!(
        layers = construction.len(),
        nx,
        dx,
        total_thickness_m = total,
        padded = nx.saturating_sub(i),
        "discretized construction"
    );

    Ok(DiscretizedWall { k, rhoc, dx })
}
