//! Scenario execution service.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};
use tw_materials::MaterialCatalog;
use tw_project::schema::Project;
use tw_sim::{
    EnvelopeMetrics, InteriorMode, Scenario, compute_metrics, run, run_periodic, run_scenarios,
};

use crate::error::{AppError, AppResult};
use crate::runtime_compile::{CompiledProject, compile_project};

/// Request to run a project.
#[derive(Debug, Clone, Default)]
pub struct RunRequest<'a> {
    /// Run only this construction; all of them when `None`
    pub construction_id: Option<&'a str>,
    /// Hold the interior air at this temperature (°C), overriding the
    /// project's run settings
    pub setpoint_c: Option<f64>,
}

/// Outcome of one construction's run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Steps in the recorded series (the last cycle for periodic runs)
    pub steps: usize,
    /// Cycles simulated; `None` for a plain run
    pub cycles: Option<usize>,
    pub converged: Option<bool>,
    pub final_tint_c: f64,
    pub metrics: EnvelopeMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response from a project run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResponse {
    pub project: String,
    pub scenarios: Vec<ScenarioReport>,
    pub wall_time_s: f64,
}

impl RunResponse {
    pub fn failed(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|s| s.error.is_some())
    }
}

/// Compile `project` and run every selected construction in parallel.
///
/// Compilation problems abort the whole request; a failure inside one
/// scenario is reported on that scenario only.
pub fn run_project(project: &Project, request: &RunRequest<'_>) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut compiled = compile_project(project, request.construction_id)?;
    if let Some(setpoint) = request.setpoint_c {
        compiled.params.interior = InteriorMode::Conditioned { setpoint };
        compiled
            .params
            .validate()
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    }
    let scenarios = compiled.scenario_list();

    let outcomes = run_scenarios(&scenarios, |scenario| evaluate(&compiled, scenario));

    let reports: Vec<ScenarioReport> = outcomes
        .into_iter()
        .zip(&compiled.scenarios)
        .map(|(outcome, compiled_scenario)| match outcome.result {
            Ok(summary) => ScenarioReport {
                id: outcome.id,
                name: compiled_scenario.name.clone(),
                summary: Some(summary),
                error: None,
            },
            Err(err) => {
                warn!(scenario = %outcome.id, error = %err, "scenario failed");
                ScenarioReport {
                    id: outcome.id,
                    name: compiled_scenario.name.clone(),
                    summary: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();

    let wall_time_s = started.elapsed().as_secs_f64();
    info!(
        project = %project.name,
        scenarios = reports.len(),
        wall_time_s,
        "project run finished"
    );

    Ok(RunResponse {
        project: project.name.clone(),
        scenarios: reports,
        wall_time_s,
    })
}

fn evaluate(compiled: &CompiledProject, scenario: &Scenario) -> tw_sim::SimResult<RunSummary> {
    let catalog: &dyn MaterialCatalog = &compiled.catalog;
    let initial = compiled.initial_conditions();

    let (record, cycles, converged) = match &compiled.periodic {
        Some(opts) => {
            let periodic = run_periodic(
                &scenario.construction,
                catalog,
                &compiled.params,
                &compiled.driving,
                initial,
                opts,
            )?;
            (periodic.record, Some(periodic.cycles), Some(periodic.converged))
        }
        None => {
            let record = run(
                &scenario.construction,
                catalog,
                &compiled.params,
                compiled.driving.len(),
                &compiled.driving,
                initial,
            )?;
            (record, None, None)
        }
    };

    let mut metrics = compute_metrics(&record, &compiled.driving)?;
    if let Some(ambient) = &compiled.ambient {
        metrics = metrics.with_ambient(ambient)?;
    }
    Ok(RunSummary {
        steps: record.len(),
        cycles,
        converged,
        final_tint_c: record.tint_history.last().copied().unwrap_or(compiled.initial_air_c),
        metrics,
    })
}
