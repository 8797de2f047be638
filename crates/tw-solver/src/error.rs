//! Error types for discretization and linear solves.

use thiserror::Error;
use tw_core::TwError;
use tw_materials::MaterialError;

/// Errors that can occur while discretizing a construction or solving a step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid construction: {what}")]
    InvalidConstruction { what: String },

    #[error("Material not found: {id}")]
    MaterialNotFound { id: String },

    #[error("Degenerate system: diagonal a[{index}] = {value} is not positive")]
    DegenerateSystem { index: usize, value: f64 },

    #[error("Singular system: zero pivot at row {index}")]
    SingularSystem { index: usize },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<MaterialError> for SolverError {
    fn from(e: MaterialError) -> Self {
        match e {
            MaterialError::NotFound { id } => SolverError::MaterialNotFound { id },
            other => SolverError::InvalidConstruction {
                what: other.to_string(),
            },
        }
    }
}

impl From<TwError> for SolverError {
    fn from(e: TwError) -> Self {
        SolverError::InvalidArg {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_not_found_keeps_id() {
        let err: SolverError = MaterialError::NotFound { id: "cork".into() }.into();
        assert_eq!(err, SolverError::MaterialNotFound { id: "cork".into() });
        assert!(err.to_string().contains("cork"));
    }

    #[test]
    fn non_physical_material_is_invalid_construction() {
        let err: SolverError = MaterialError::NonPhysical {
            what: "density",
            value: 0.0,
        }
        .into();
        assert!(matches!(err, SolverError::InvalidConstruction { .. }));
    }
}
