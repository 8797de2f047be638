//! Material lookup and validation errors.

use tw_core::TwError;
use thiserror::Error;

/// Result type for material operations.
pub type MaterialResult<T> = Result<T, MaterialError>;

/// Errors that can occur while building or querying material catalogs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    /// The catalog has no entry for the requested id.
    #[error("Material not found: {id}")]
    NotFound { id: String },

    /// Non-physical property (zero or negative conductivity, density, etc.).
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<TwError> for MaterialError {
    fn from(err: TwError) -> Self {
        match err {
            TwError::NonFinite { what, value } | TwError::NonPositive { what, value } => {
                MaterialError::NonPhysical { what, value }
            }
        }
    }
}
