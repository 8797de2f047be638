//! Simulation runner and result recording.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tw_core::{ensure_finite, ensure_positive};
use tw_materials::MaterialCatalog;
use tw_solver::{Construction, DiscretizedWall, MIN_CONTROL_VOLUMES, build_system, discretize};

use crate::air::{air_stability_number, update_interior_air};
use crate::error::{SimError, SimResult};

/// How the interior air node behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InteriorMode {
    /// Air temperature follows the wall through the lumped air node.
    #[default]
    FreeFloating,
    /// Air is held at `setpoint` (°C); the surface flux becomes a cooling
    /// (positive) or heating (negative) load.
    Conditioned { setpoint: f64 },
}

impl InteriorMode {
    pub fn is_conditioned(self) -> bool {
        matches!(self, Self::Conditioned { .. })
    }

    pub fn setpoint(self) -> Option<f64> {
        match self {
            Self::FreeFloating => None,
            Self::Conditioned { setpoint } => Some(setpoint),
        }
    }
}

/// Discretization and boundary parameters shared by every step of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Number of control volumes (at least 2)
    pub nx: usize,
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Exterior convective coefficient (W/m²K)
    pub ho: f64,
    /// Interior convective coefficient (W/m²K)
    pub hi: f64,
    /// Interior air depth: room volume per unit envelope area (m)
    pub la: f64,
    #[serde(default)]
    pub interior: InteriorMode,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            nx: 200,
            dt: 300.0,
            ho: 13.0,
            hi: 8.6,
            la: 2.5,
            interior: InteriorMode::FreeFloating,
        }
    }
}

impl RunParameters {
    pub fn validate(&self) -> SimResult<()> {
        if self.nx < MIN_CONTROL_VOLUMES {
            return Err(SimError::InvalidArg {
                what: format!(
                    "nx must be at least {MIN_CONTROL_VOLUMES}, got {}",
                    self.nx
                ),
            });
        }
        for (value, what) in [
            (self.dt, "dt"),
            (self.ho, "ho"),
            (self.hi, "hi"),
            (self.la, "la"),
        ] {
            ensure_positive(value, what).map_err(|e| SimError::InvalidArg {
                what: e.to_string(),
            })?;
        }
        if let Some(setpoint) = self.interior.setpoint() {
            ensure_finite(setpoint, "setpoint").map_err(|e| SimError::InvalidArg {
                what: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Stability number of the explicit air update for these parameters.
    pub fn air_stability_number(&self) -> f64 {
        air_stability_number(self.hi, self.dt, self.la)
    }
}

/// Temperatures at t = 0, in °C.
#[derive(Clone, Debug, PartialEq)]
pub enum InitialConditions {
    /// Same temperature in every control volume.
    Uniform { wall: f64, air: f64 },
    /// Explicit field, one entry per control volume.
    Field { wall: Vec<f64>, air: f64 },
}

impl InitialConditions {
    pub fn uniform(wall: f64, air: f64) -> Self {
        Self::Uniform { wall, air }
    }

    fn into_state(self, nx: usize) -> SimResult<SimulationState> {
        let state = match self {
            Self::Uniform { wall, air } => SimulationState {
                t: vec![wall; nx],
                tint: air,
            },
            Self::Field { wall, air } => {
                if wall.len() != nx {
                    return Err(SimError::InvalidArg {
                        what: format!("initial field has {} entries, wall has {nx}", wall.len()),
                    });
                }
                SimulationState { t: wall, tint: air }
            }
        };
        for &v in &state.t {
            ensure_finite(v, "initial wall temperature")?;
        }
        ensure_finite(state.tint, "initial air temperature")?;
        Ok(state)
    }
}

/// Temperature field and interior air temperature between steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Control-volume temperatures, exterior first (°C)
    pub t: Vec<f64>,
    /// Interior air temperature (°C)
    pub tint: f64,
}

/// Lifecycle of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPhase {
    Initialized,
    Stepping,
    Completed,
    Failed,
}

impl SimPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Stepping => "stepping",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Record of simulation results, one entry per completed step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimRecord {
    /// Time at the end of each step, relative to the start of the record (s)
    pub time_s: Vec<f64>,
    /// Temperature field after each step (°C)
    pub t_history: Vec<Vec<f64>>,
    /// Interior air temperature after each step (°C)
    pub tint_history: Vec<f64>,
    /// Convective flux from the inner surface into the air (W/m²)
    pub surface_flux: Vec<f64>,
    /// Step length used for the record (s)
    pub dt: f64,
    /// Interior mode the record was produced with
    #[serde(default)]
    pub interior: InteriorMode,
}

impl SimRecord {
    pub fn len(&self) -> usize {
        self.tint_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tint_history.is_empty()
    }

    fn with_capacity(steps: usize, dt: f64, interior: InteriorMode) -> Self {
        Self {
            time_s: Vec::with_capacity(steps),
            t_history: Vec::with_capacity(steps),
            tint_history: Vec::with_capacity(steps),
            surface_flux: Vec::with_capacity(steps),
            dt,
            interior,
        }
    }
}

/// One construction marching through time.
///
/// Each [`step`](Self::step) builds the implicit system from the current
/// state, solves it, then advances the air node explicitly (or holds it at
/// the setpoint in [`InteriorMode::Conditioned`]). A failed step
/// moves the simulation to [`SimPhase::Failed`] and leaves the state at the
/// last successful step; no further steps are accepted.
#[derive(Clone, Debug)]
pub struct Simulation {
    wall: DiscretizedWall,
    params: RunParameters,
    state: SimulationState,
    phase: SimPhase,
    steps_taken: usize,
    last_surface_flux: Option<f64>,
}

impl Simulation {
    pub fn new(
        wall: DiscretizedWall,
        params: RunParameters,
        initial: InitialConditions,
    ) -> SimResult<Self> {
        params.validate()?;
        if wall.nx() != params.nx {
            return Err(SimError::InvalidArg {
                what: format!(
                    "wall has {} control volumes, parameters ask for {}",
                    wall.nx(),
                    params.nx
                ),
            });
        }
        let mut state = initial.into_state(wall.nx())?;

        match params.interior {
            InteriorMode::Conditioned { setpoint } => state.tint = setpoint,
            InteriorMode::FreeFloating => {
                let fo = params.air_stability_number();
                if fo > 2.0 {
                    warn!(
                        stability_number = fo,
                        dt = params.dt,
                        la = params.la,
                        hi = params.hi,
                        "explicit air update diverges above 2 for an isolated air node; reduce dt or increase la"
                    );
                } else if fo > 1.0 {
                    warn!(
                        stability_number = fo,
                        dt = params.dt,
                        la = params.la,
                        hi = params.hi,
                        "explicit air update oscillates above 1; reduce dt or increase la"
                    );
                }
            }
        }

        Ok(Self {
            wall,
            params,
            state,
            phase: SimPhase::Initialized,
            steps_taken: 0,
            last_surface_flux: None,
        })
    }

    /// Discretize `construction` with `params.nx` volumes and start a run.
    pub fn from_construction(
        construction: &Construction,
        catalog: &dyn MaterialCatalog,
        params: RunParameters,
        initial: InitialConditions,
    ) -> SimResult<Self> {
        params.validate()?;
        let wall = discretize(construction, params.nx, catalog)?;
        Self::new(wall, params, initial)
    }

    /// Continue from a state retained from an earlier run.
    pub fn resume(
        wall: DiscretizedWall,
        params: RunParameters,
        state: SimulationState,
    ) -> SimResult<Self> {
        Self::new(
            wall,
            params,
            InitialConditions::Field {
                wall: state.t,
                air: state.tint,
            },
        )
    }

    /// Advance one step with exterior driving temperature `to_t`.
    pub fn step(&mut self, to_t: f64) -> SimResult<&SimulationState> {
        match self.phase {
            SimPhase::Completed | SimPhase::Failed => {
                return Err(SimError::NotSteppable {
                    phase: self.phase.as_str(),
                });
            }
            SimPhase::Initialized | SimPhase::Stepping => {}
        }

        match self.advance(to_t) {
            Ok((t_new, tint_new, flux)) => {
                self.state.t = t_new;
                self.state.tint = tint_new;
                self.last_surface_flux = Some(flux);
                self.steps_taken += 1;
                self.phase = SimPhase::Stepping;
                Ok(&self.state)
            }
            Err(e) => {
                warn!(step = self.steps_taken, error = %e, "simulation step failed");
                self.phase = SimPhase::Failed;
                Err(e)
            }
        }
    }

    fn advance(&self, to_t: f64) -> SimResult<(Vec<f64>, f64, f64)> {
        let p = &self.params;
        ensure_finite(to_t, "driving temperature")?;

        let system = build_system(
            &self.wall,
            &self.state.t,
            to_t,
            self.state.tint,
            p.ho,
            p.hi,
            p.dt,
        )?;
        let t_new = system.solve()?;
        for &v in &t_new {
            ensure_finite(v, "wall temperature")?;
        }

        let t_last = t_new[t_new.len() - 1];
        let flux = p.hi * (t_last - self.state.tint);
        let tint_new = match p.interior {
            InteriorMode::FreeFloating => {
                update_interior_air(self.state.tint, t_last, p.hi, p.dt, p.la)?
            }
            InteriorMode::Conditioned { setpoint } => setpoint,
        };
        Ok((t_new, tint_new, flux))
    }

    /// Step through `to_series`, recording every step.
    ///
    /// The record's times restart at the first step of this call. On error
    /// the partial record is dropped and the error returned.
    pub fn run_series(&mut self, to_series: &[f64]) -> SimResult<SimRecord> {
        let mut record = SimRecord::with_capacity(
            to_series.len(),
            self.params.dt,
            self.params.interior,
        );
        for (n, &to_t) in to_series.iter().enumerate() {
            let state = self.step(to_t)?;
            record.t_history.push(state.t.clone());
            record.tint_history.push(state.tint);
            record.time_s.push((n + 1) as f64 * self.params.dt);
            record
                .surface_flux
                .push(self.last_surface_flux.unwrap_or_default());
        }
        Ok(record)
    }

    /// Mark the run finished. Failed runs stay failed.
    pub fn complete(&mut self) {
        if self.phase != SimPhase::Failed {
            self.phase = SimPhase::Completed;
        }
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn into_state(self) -> SimulationState {
        self.state
    }

    pub fn wall(&self) -> &DiscretizedWall {
        &self.wall
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Surface-to-air flux of the most recent step (W/m², into the room).
    pub fn last_surface_flux(&self) -> Option<f64> {
        self.last_surface_flux
    }
}

/// Run a construction through `steps` samples of the driving series.
///
/// `to_series` must hold exactly `steps` values. Any failure aborts the run
/// and returns the originating error; no partial history is kept.
pub fn run(
    construction: &Construction,
    catalog: &dyn MaterialCatalog,
    params: &RunParameters,
    steps: usize,
    to_series: &[f64],
    initial: InitialConditions,
) -> SimResult<SimRecord> {
    if to_series.len() != steps {
        return Err(SimError::InvalidArg {
            what: format!(
                "driving series has {} samples, expected {steps}",
                to_series.len()
            ),
        });
    }

    let mut sim = Simulation::from_construction(construction, catalog, params.clone(), initial)?;
    debug!(
        layers = construction.len(),
        nx = params.nx,
        dt = params.dt,
        steps,
        "starting envelope run"
    );

    let record = sim.run_series(to_series)?;
    sim.complete();

    info!(
        steps = record.len(),
        final_tint = sim.state().tint,
        "envelope run completed"
    );
    Ok(record)
}
