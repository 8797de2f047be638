//! Lumped interior-air node.
//!
//! The air is a single thermal mass of depth `La` (room volume per unit
//! envelope area) exchanging heat with the innermost control volume only.
//! It is advanced explicitly after the implicit conduction solve:
//!
//! ```text
//! Tint' = Tint + hi·dt/(ρ_air·c_air·La)·(T_last − Tint)
//! ```
//!
//! The conduction solve is unconditionally stable but this update is not:
//! the stability number `hi·dt/(ρ_air·c_air·La)` must stay below 2 for the
//! isolated node and below 1 for a non-oscillating response.

use tw_core::ensure_finite;
use tw_core::units::constants::air_volumetric_heat_capacity;

use crate::error::SimResult;

/// `hi·dt/(ρ_air·c_air·La)` for the given parameters.
pub fn air_stability_number(hi: f64, dt: f64, la: f64) -> f64 {
    hi * dt / (air_volumetric_heat_capacity() * la)
}

/// Largest `dt` (s) keeping the stability number at or below 1.
pub fn max_monotone_dt(hi: f64, la: f64) -> f64 {
    air_volumetric_heat_capacity() * la / hi
}

/// Advance the interior air temperature over one step.
///
/// `t_last` is the innermost control-volume temperature after the
/// conduction solve. Non-finite results fail with `NumericalInstability`.
pub fn update_interior_air(tint: f64, t_last: f64, hi: f64, dt: f64, la: f64) -> SimResult<f64> {
    let next = tint + air_stability_number(hi, dt, la) * (t_last - tint);
    Ok(ensure_finite(next, "interior air temperature")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn relaxes_toward_surface() {
        let next = update_interior_air(20.0, 30.0, 8.0, 60.0, 3.0).unwrap();
        let fo = air_stability_number(8.0, 60.0, 3.0);
        assert!(fo > 0.0 && fo < 1.0);
        assert!((next - (20.0 + fo * 10.0)).abs() < 1e-12);
        assert!(next > 20.0 && next < 30.0);
    }

    #[test]
    fn equilibrium_is_unchanged() {
        assert_eq!(update_interior_air(22.0, 22.0, 8.0, 900.0, 3.0).unwrap(), 22.0);
    }

    #[test]
    fn monotone_limit_gives_unit_stability_number() {
        let dt = max_monotone_dt(8.0, 3.0);
        assert!((air_stability_number(8.0, dt, 3.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_input_is_instability() {
        assert!(matches!(
            update_interior_air(20.0, f64::NAN, 8.0, 60.0, 3.0),
            Err(SimError::NumericalInstability { .. })
        ));
    }
}
