//! Transient envelope simulation for thermowall.
//!
//! Provides:
//! - Lumped interior-air node with an explicit update, or held at a
//!   setpoint for conditioned-space loads
//! - `Simulation`: the per-step state machine (implicit conduction solve,
//!   then explicit air update)
//! - `run`: a full march over a driving series
//! - Periodic spin-up over a repeated design day
//! - Independent scenarios evaluated in parallel
//! - Envelope metrics (decrement factor, time lag, surface energy)

pub mod air;
pub mod error;
pub mod metrics;
pub mod periodic;
pub mod scenarios;
pub mod sim;

pub use air::{air_stability_number, max_monotone_dt, update_interior_air};
pub use error::{SimError, SimResult};
pub use metrics::{EnvelopeMetrics, compute_metrics};
pub use periodic::{PeriodicOptions, PeriodicRun, run_periodic};
pub use scenarios::{Scenario, ScenarioOutcome, run_scenarios};
pub use sim::{
    InitialConditions, InteriorMode, RunParameters, SimPhase, SimRecord, Simulation,
    SimulationState, run,
};
