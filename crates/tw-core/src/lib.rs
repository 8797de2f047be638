//! tw-core: stable foundation for thermowall.
//!
//! Contains:
//! - units (uom SI types + constructors, air constants)
//! - numeric (finiteness checks, harmonic mean)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TwError, TwResult};
pub use numeric::*;
pub use units::*;
