//! Implicit finite-volume conduction solver for layered envelopes.
//!
//! The pipeline for one construction is:
//! 1. [`discretize`] a [`Construction`] into a [`DiscretizedWall`] (once)
//! 2. [`build_system`] the backward-Euler [`TridiagonalSystem`] (every step)
//! 3. [`thomas_solve`] it for the new temperature field (every step)
//!
//! Temperatures are in °C, lengths in m, times in s.

pub mod coefficients;
pub mod construction;
pub mod discretize;
pub mod error;
pub mod thomas;

pub use coefficients::{TridiagonalSystem, build_system};
pub use construction::{Construction, Layer};
pub use discretize::{DiscretizedWall, MIN_CONTROL_VOLUMES, discretize};
pub use error::{SolverError, SolverResult};
pub use thomas::thomas_solve;
