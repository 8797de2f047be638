//! Periodic spin-up over a repeated design day.
//!
//! A representative day of driving temperatures is applied again and again,
//! carrying the state across cycles, until the interior-air trace of one
//! cycle matches the previous one. With the air held at a setpoint the
//! surface flux trace is compared instead, scaled to kelvin by `hi`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tw_materials::MaterialCatalog;
use tw_solver::Construction;

use crate::error::{SimError, SimResult};
use crate::sim::{InitialConditions, RunParameters, SimRecord, Simulation};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodicOptions {
    /// Upper bound on repetitions of the design day
    pub max_cycles: usize,
    /// Largest change in interior air temperature (or surface flux over
    /// `hi` when conditioned) between consecutive cycles accepted as
    /// periodic (K)
    pub tolerance: f64,
}

impl Default for PeriodicOptions {
    fn default() -> Self {
        Self {
            max_cycles: 30,
            tolerance: 1e-3,
        }
    }
}

/// Outcome of a periodic run. `record` holds the last cycle only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodicRun {
    pub cycles: usize,
    pub converged: bool,
    /// Max change between the last two cycles (K); infinite after one cycle
    pub residual: f64,
    pub record: SimRecord,
}

pub fn run_periodic(
    construction: &Construction,
    catalog: &dyn MaterialCatalog,
    params: &RunParameters,
    day_series: &[f64],
    initial: InitialConditions,
    opts: &PeriodicOptions,
) -> SimResult<PeriodicRun> {
    if day_series.is_empty() {
        return Err(SimError::InvalidArg {
            what: "design day has no samples".to_string(),
        });
    }
    if opts.max_cycles == 0 {
        return Err(SimError::InvalidArg {
            what: "max_cycles must be positive".to_string(),
        });
    }
    if opts.tolerance.is_nan() || opts.tolerance <= 0.0 {
        return Err(SimError::InvalidArg {
            what: format!("tolerance must be positive, got {}", opts.tolerance),
        });
    }

    let mut sim = Simulation::from_construction(construction, catalog, params.clone(), initial)?;

    let mut previous: Option<SimRecord> = None;
    let mut residual = f64::INFINITY;
    let mut cycles = 0;
    let mut converged = false;

    while cycles < opts.max_cycles {
        let record = sim.run_series(day_series)?;
        cycles += 1;

        if let Some(prev) = &previous {
            residual = cycle_residual(prev, &record, params);
            debug!(cycle = cycles, residual, "periodic cycle finished");
            if residual < opts.tolerance {
                converged = true;
                previous = Some(record);
                break;
            }
        }
        previous = Some(record);
    }
    sim.complete();

    if converged {
        info!(cycles, residual, "periodic regime reached");
    } else {
        warn!(
            cycles,
            residual,
            tolerance = opts.tolerance,
            "periodic regime not reached within max_cycles"
        );
    }

    Ok(PeriodicRun {
        cycles,
        converged,
        residual,
        record: previous.unwrap_or_default(),
    })
}

fn cycle_residual(prev: &SimRecord, next: &SimRecord, params: &RunParameters) -> f64 {
    if params.interior.is_conditioned() {
        max_abs_difference(&prev.surface_flux, &next.surface_flux) / params.hi
    } else {
        max_abs_difference(&prev.tint_history, &next.tint_history)
    }
}

fn max_abs_difference(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
