//! Error types for the tw-app service layer.

use std::path::PathBuf;

/// Application error type shared by the CLI and any other front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Construction not found: {0}")]
    ConstructionNotFound(String),

    #[error("Runtime compilation failed: {0}")]
    Compile(String),

    #[error("Simulation error: {0}")]
    Simulation(#[from] tw_sim::SimError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for tw-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<tw_project::ProjectError> for AppError {
    fn from(err: tw_project::ProjectError) -> Self {
        match err {
            tw_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<tw_project::ValidationError> for AppError {
    fn from(err: tw_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<tw_materials::MaterialError> for AppError {
    fn from(err: tw_materials::MaterialError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<tw_solver::SolverError> for AppError {
    fn from(err: tw_solver::SolverError) -> Self {
        AppError::Compile(err.to_string())
    }
}
