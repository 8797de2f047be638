//! Backward-Euler coefficients for one time step.
//!
//! Each control volume `i` satisfies
//!
//! ```text
//! a[i]·T[i] = b[i]·T[i+1] + c[i]·T[i-1] + d[i]
//! ```
//!
//! with face conductances from the harmonic mean of neighbouring volumes and
//! convective (Robin) exchange at both faces: `ho` against the driving
//! temperature on volume 0, `hi` against the interior air on volume `nx-1`.
//! The fully implicit scheme is unconditionally stable for any `dt > 0`.

use tw_core::harmonic_mean;

use crate::discretize::DiscretizedWall;
use crate::error::{SolverError, SolverResult};
use crate::thomas::thomas_solve;

/// Coefficient arrays of one implicit step: diagonal `a`, upper `b`,
/// lower `c`, right-hand side `d`.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub c: Vec<f64>,
    pub d: Vec<f64>,
}

impl TridiagonalSystem {
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Solve with the Thomas algorithm.
    pub fn solve(&self) -> SolverResult<Vec<f64>> {
        thomas_solve(&self.a, &self.b, &self.c, &self.d)
    }
}

#[inline]
fn face_conductance(k_left: f64, k_right: f64, dx: f64) -> f64 {
    harmonic_mean(k_left, k_right) / dx
}

/// Build the system advancing `t` (the field at the start of the step) by
/// `dt` seconds.
///
/// `to_t` is the exterior driving temperature for this step and `ti` the
/// interior air temperature at the start of the step.
pub fn build_system(
    wall: &DiscretizedWall,
    t: &[f64],
    to_t: f64,
    ti: f64,
    ho: f64,
    hi: f64,
    dt: f64,
) -> SolverResult<TridiagonalSystem> {
    let nx = wall.nx();
    if t.len() != nx {
        return Err(SolverError::InvalidArg {
            what: format!("temperature field has {} entries, wall has {nx}", t.len()),
        });
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SolverError::InvalidArg {
            what: format!("time step must be positive, got {dt}"),
        });
    }

    let k = wall.k();
    let rhoc = wall.rhoc();
    let dx = wall.dx();
    let last = nx - 1;

    // Storage term rhoc·dx/dt per volume.
    let storage: Vec<f64> = rhoc.iter().map(|&rc| rc * dx / dt).collect();

    let b: Vec<f64> = (0..nx)
        .map(|i| {
            if i == last {
                0.0
            } else {
                face_conductance(k[i], k[i + 1], dx)
            }
        })
        .collect();

    let c: Vec<f64> = (0..nx)
        .map(|i| {
            if i == 0 {
                0.0
            } else {
                face_conductance(k[i - 1], k[i], dx)
            }
        })
        .collect();

    let d: Vec<f64> = (0..nx)
        .map(|i| {
            let stored = storage[i] * t[i];
            match i {
                0 => stored + ho * to_t,
                i if i == last => stored + hi * ti,
                _ => stored,
            }
        })
        .collect();

    let a: Vec<f64> = (0..nx)
        .map(|i| {
            let conduction = b[i] + c[i];
            match i {
                0 => storage[i] + ho + conduction,
                i if i == last => storage[i] + conduction + hi,
                _ => storage[i] + conduction,
            }
        })
        .collect();

    if let Some((index, &value)) = a.iter().enumerate().find(|&(_, &v)| v.is_nan() || v <= 0.0) {
        return Err(SolverError::DegenerateSystem { index, value });
    }

    Ok(TridiagonalSystem { a, b, c, d })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_wall(nx: usize, k: f64, rhoc: f64, dx: f64) -> DiscretizedWall {
        DiscretizedWall::from_arrays(vec![k; nx], vec![rhoc; nx], dx).unwrap()
    }

    #[test]
    fn boundary_rows_carry_convection() {
        let wall = uniform_wall(4, 2.0, 1000.0, 0.1);
        let t = vec![20.0; 4];
        let sys = build_system(&wall, &t, 30.0, 18.0, 25.0, 8.0, 100.0).unwrap();

        let storage = 1000.0 * 0.1 / 100.0;
        let g = 2.0 / 0.1;

        assert_eq!(sys.c[0], 0.0);
        assert_eq!(sys.b[3], 0.0);
        assert!((sys.b[0] - g).abs() < 1e-12);
        assert!((sys.a[0] - (storage + 25.0 + g)).abs() < 1e-12);
        assert!((sys.d[0] - (storage * 20.0 + 25.0 * 30.0)).abs() < 1e-12);

        assert!((sys.a[1] - (storage + 2.0 * g)).abs() < 1e-12);
        assert!((sys.d[1] - storage * 20.0).abs() < 1e-12);

        assert!((sys.c[3] - g).abs() < 1e-12);
        assert!((sys.a[3] - (storage + g + 8.0)).abs() < 1e-12);
        assert!((sys.d[3] - (storage * 20.0 + 8.0 * 18.0)).abs() < 1e-12);
    }

    #[test]
    fn interior_faces_use_harmonic_mean() {
        let wall =
            DiscretizedWall::from_arrays(vec![1.75, 1.75, 0.04], vec![1e6, 1e6, 3e4], 0.05)
                .unwrap();
        let sys = build_system(&wall, &[22.0; 3], 22.0, 22.0, 20.0, 8.0, 900.0).unwrap();
        let expected = 2.0 * 1.75 * 0.04 / (1.75 + 0.04) / 0.05;
        assert!((sys.b[1] - expected).abs() < 1e-12);
        assert!((sys.c[2] - expected).abs() < 1e-12);
        // Matching faces between neighbours.
        assert_eq!(sys.b[0], sys.c[1]);
        assert_eq!(sys.b[1], sys.c[2]);
    }

    #[test]
    fn uniform_field_in_equilibrium_is_a_fixed_point() {
        let wall = uniform_wall(6, 0.72, 1.6e6, 0.04);
        let t = vec![15.0; 6];
        let sys = build_system(&wall, &t, 15.0, 15.0, 20.0, 8.0, 3600.0).unwrap();
        let t_new = sys.solve().unwrap();
        for v in t_new {
            assert!((v - 15.0).abs() < 1e-10);
        }
    }

    #[test]
    fn non_positive_capacity_is_degenerate() {
        let wall =
            DiscretizedWall::from_arrays(vec![1.0, 1.0, 1.0], vec![1e6, -1e9, 1e6], 0.1).unwrap();
        let err = build_system(&wall, &[0.0; 3], 0.0, 0.0, 10.0, 10.0, 60.0).unwrap_err();
        assert!(matches!(err, SolverError::DegenerateSystem { index: 1, .. }));
    }

    #[test]
    fn mismatched_field_is_rejected() {
        let wall = uniform_wall(4, 1.0, 1e6, 0.1);
        assert!(matches!(
            build_system(&wall, &[0.0; 3], 0.0, 0.0, 10.0, 10.0, 60.0),
            Err(SolverError::InvalidArg { .. })
        ));
        assert!(matches!(
            build_system(&wall, &[0.0; 4], 0.0, 0.0, 10.0, 10.0, 0.0),
            Err(SolverError::InvalidArg { .. })
        ));
    }
}
