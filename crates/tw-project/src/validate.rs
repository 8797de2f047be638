//! Project validation logic.

use std::collections::HashSet;

use tw_materials::{MaterialCatalog, standard_catalog};

use crate::schema::{
    ConstructionDef, DrivingDef, LATEST_VERSION, MaterialDef, PeriodicDef, Project, RunDef,
};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    for (id, material) in &project.materials {
        validate_material(id, material)?;
    }

    if project.constructions.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "constructions".to_string(),
            value: "[]".to_string(),
            reason: "at least one construction is required".to_string(),
        });
    }

    let builtin = standard_catalog();
    let mut construction_ids = HashSet::new();
    for construction in &project.constructions {
        if !construction_ids.insert(&construction.id) {
            return Err(ValidationError::DuplicateId {
                id: construction.id.clone(),
                context: "constructions".to_string(),
            });
        }
        validate_construction(construction, project, &builtin)?;
    }

    validate_run(&project.run)?;
    validate_driving("driving", &project.driving)?;
    if let Some(ambient) = &project.ambient {
        validate_driving("ambient", ambient)?;
        if ambient.steps() != project.driving.steps() {
            return Err(ValidationError::InvalidValue {
                field: "ambient".to_string(),
                value: format!("{} steps", ambient.steps()),
                reason: format!("must match driving ({} steps)", project.driving.steps()),
            });
        }
    }
    if let Some(periodic) = &project.periodic {
        validate_periodic(periodic)?;
    }

    Ok(())
}

fn validate_material(id: &str, material: &MaterialDef) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "materials".to_string(),
            value: format!("{id:?}"),
            reason: "material id must not be blank".to_string(),
        });
    }
    let context = format!("material '{id}'");
    validate_positive_finite(&context, "conductivity_w_per_m_k", material.conductivity_w_per_m_k)?;
    validate_positive_finite(&context, "density_kg_per_m3", material.density_kg_per_m3)?;
    validate_positive_finite(
        &context,
        "specific_heat_j_per_kg_k",
        material.specific_heat_j_per_kg_k,
    )
}

fn validate_construction(
    construction: &ConstructionDef,
    project: &Project,
    builtin: &dyn MaterialCatalog,
) -> Result<(), ValidationError> {
    let context = format!("construction '{}'", construction.id);
    if construction.layers.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} layers"),
            value: "[]".to_string(),
            reason: "at least one layer is required".to_string(),
        });
    }

    for (index, layer) in construction.layers.iter().enumerate() {
        validate_positive_finite(
            &context,
            &format!("layer {index} thickness_m"),
            layer.thickness_m,
        )?;
        let known =
            project.materials.contains_key(&layer.material) || builtin.contains(&layer.material);
        if !known {
            return Err(ValidationError::MissingReference {
                id: layer.material.clone(),
                context: format!("{context} layer {index} material"),
            });
        }
    }
    Ok(())
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    if run.nx < 2 {
        return Err(ValidationError::InvalidValue {
            field: "run nx".to_string(),
            value: run.nx.to_string(),
            reason: "at least 2 control volumes are required".to_string(),
        });
    }
    validate_positive_finite("run", "dt_s", run.dt_s)?;
    validate_positive_finite("run", "ho_w_per_m2_k", run.ho_w_per_m2_k)?;
    validate_positive_finite("run", "hi_w_per_m2_k", run.hi_w_per_m2_k)?;
    validate_positive_finite("run", "la_m", run.la_m)?;
    validate_finite("run", "initial_temperature_c", run.initial_temperature_c)?;
    if let Some(air) = run.initial_air_temperature_c {
        validate_finite("run", "initial_air_temperature_c", air)?;
    }
    if let Some(setpoint) = run.setpoint_c {
        validate_finite("run", "setpoint_c", setpoint)?;
    }
    Ok(())
}

fn validate_driving(context: &str, driving: &DrivingDef) -> Result<(), ValidationError> {
    if driving.steps() == 0 {
        return Err(ValidationError::InvalidValue {
            field: context.to_string(),
            value: "0 steps".to_string(),
            reason: "input must cover at least one step".to_string(),
        });
    }
    match driving {
        DrivingDef::Series { values_c } => {
            for (index, value) in values_c.iter().enumerate() {
                validate_finite(context, &format!("values_c[{index}]"), *value)?;
            }
        }
        DrivingDef::Sinusoid {
            mean_c,
            amplitude_c,
            period_s,
            ..
        } => {
            validate_finite(context, "mean_c", *mean_c)?;
            validate_finite(context, "amplitude_c", *amplitude_c)?;
            validate_positive_finite(context, "period_s", *period_s)?;
        }
    }
    Ok(())
}

fn validate_periodic(periodic: &PeriodicDef) -> Result<(), ValidationError> {
    if periodic.max_cycles == 0 {
        return Err(ValidationError::InvalidValue {
            field: "periodic max_cycles".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    validate_positive_finite("periodic", "tolerance_k", periodic.tolerance_k)
}

fn validate_positive_finite(context: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} {field}"),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn validate_finite(context: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} {field}"),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}
