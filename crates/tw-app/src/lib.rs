//! Application service layer for thermowall.
//!
//! Turns project files into simulation inputs, runs them and summarizes the
//! results for the CLI.

pub mod error;
pub mod project_service;
pub mod query;
pub mod run_service;
pub mod runtime_compile;

pub use error::{AppError, AppResult};
pub use project_service::{ConstructionSummary, list_constructions, load_project, validate_project};
pub use query::{MaterialSummary, list_project_materials, list_standard_materials};
pub use run_service::{RunRequest, RunResponse, RunSummary, ScenarioReport, run_project};
pub use runtime_compile::{
    CompiledProject, CompiledScenario, build_catalog, compile_construction, compile_project,
    periodic_options, run_parameters,
};
