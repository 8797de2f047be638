//! Runtime compilation of a `Project` into simulation inputs.

use tracing::debug;
use tw_core::units::{j_per_kg_k, kg_per_m3, m, w_per_m_k};
use tw_materials::{InMemoryCatalog, MaterialProperties, standard_catalog};
use tw_project::schema::{ConstructionDef, PeriodicDef, Project, RunDef};
use tw_sim::{InitialConditions, InteriorMode, PeriodicOptions, RunParameters, Scenario};
use tw_solver::{Construction, Layer};

use crate::error::{AppError, AppResult};

/// Everything needed to run a project, already validated and in SI units.
#[derive(Debug, Clone)]
pub struct CompiledProject {
    pub catalog: InMemoryCatalog,
    pub scenarios: Vec<CompiledScenario>,
    pub params: RunParameters,
    /// Exterior temperature per step (°C)
    pub driving: Vec<f64>,
    /// Outdoor air temperature per step (°C), when the project gives one
    pub ambient: Option<Vec<f64>>,
    pub initial_wall_c: f64,
    pub initial_air_c: f64,
    pub periodic: Option<PeriodicOptions>,
}

#[derive(Debug, Clone)]
pub struct CompiledScenario {
    pub name: String,
    pub scenario: Scenario,
}

impl CompiledProject {
    pub fn initial_conditions(&self) -> InitialConditions {
        InitialConditions::uniform(self.initial_wall_c, self.initial_air_c)
    }

    pub fn scenario_list(&self) -> Vec<Scenario> {
        self.scenarios.iter().map(|s| s.scenario.clone()).collect()
    }
}

/// Built-in catalog with the project's custom materials layered on top.
pub fn build_catalog(project: &Project) -> AppResult<InMemoryCatalog> {
    let mut custom = InMemoryCatalog::new();
    for (id, def) in &project.materials {
        let props = MaterialProperties::from_quantities(
            w_per_m_k(def.conductivity_w_per_m_k),
            kg_per_m3(def.density_kg_per_m3),
            j_per_kg_k(def.specific_heat_j_per_kg_k),
        )?;
        custom.insert(id.clone(), props)?;
    }

    let mut catalog = standard_catalog();
    catalog.extend_from(&custom);
    Ok(catalog)
}

pub fn compile_construction(def: &ConstructionDef) -> AppResult<Construction> {
    let layers = def
        .layers
        .iter()
        .map(|layer| Layer::new(layer.material.clone(), m(layer.thickness_m)))
        .collect();
    Construction::new(layers).map_err(|e| {
        AppError::Compile(format!("construction '{}': {e}", def.id))
    })
}

pub fn run_parameters(run: &RunDef) -> RunParameters {
    RunParameters {
        nx: run.nx,
        dt: run.dt_s,
        ho: run.ho_w_per_m2_k,
        hi: run.hi_w_per_m2_k,
        la: run.la_m,
        interior: match run.setpoint_c {
            Some(setpoint) => InteriorMode::Conditioned { setpoint },
            None => InteriorMode::FreeFloating,
        },
    }
}

pub fn periodic_options(def: &PeriodicDef) -> PeriodicOptions {
    PeriodicOptions {
        max_cycles: def.max_cycles,
        tolerance: def.tolerance_k,
    }
}

/// Validate and compile `project`. With `only`, keep just that construction.
pub fn compile_project(project: &Project, only: Option<&str>) -> AppResult<CompiledProject> {
    tw_project::validate_project(project)?;

    let selected: Vec<&ConstructionDef> = match only {
        Some(id) => {
            let def = project
                .constructions
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| AppError::ConstructionNotFound(id.to_string()))?;
            vec![def]
        }
        None => project.constructions.iter().collect(),
    };

    let scenarios = selected
        .into_iter()
        .map(|def| -> AppResult<CompiledScenario> {
            Ok(CompiledScenario {
                name: def.name.clone(),
                scenario: Scenario::new(def.id.clone(), compile_construction(def)?),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let params = run_parameters(&project.run);
    params
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let driving = project.driving.sample(params.dt);
    let ambient = project.ambient.as_ref().map(|a| a.sample(params.dt));
    debug!(
        project = %project.name,
        scenarios = scenarios.len(),
        steps = driving.len(),
        "project compiled"
    );

    Ok(CompiledProject {
        catalog: build_catalog(project)?,
        scenarios,
        params,
        ambient,
        driving,
        initial_wall_c: project.run.initial_temperature_c,
        initial_air_c: project.run.initial_air_temperature_c(),
        periodic: project.periodic.as_ref().map(periodic_options),
    })
}
