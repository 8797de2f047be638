//! Error types for simulation operations.

use thiserror::Error;
use tw_core::TwError;
use tw_solver::SolverError;

/// Errors encountered during a transient run.
///
/// Discretization and solver failures are carried unchanged in
/// [`SimError::Solver`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Numerical instability in {what}: {value}")]
    NumericalInstability { what: &'static str, value: f64 },

    #[error("Simulation is {phase}; no further steps accepted")]
    NotSteppable { phase: &'static str },

    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<TwError> for SimError {
    fn from(e: TwError) -> Self {
        match e {
            TwError::NonFinite { what, value } => SimError::NumericalInstability { what, value },
            other => SimError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
