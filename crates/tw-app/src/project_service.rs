//! Project loading, validation, and introspection.

use std::path::Path;

use tw_project::schema::Project;

use crate::error::{AppError, AppResult};

/// Summary of a construction for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionSummary {
    pub id: String,
    pub name: String,
    pub layer_count: usize,
    pub total_thickness_m: f64,
}

/// Load a project file (YAML, or JSON by extension) and validate it.
pub fn load_project(path: &Path) -> AppResult<Project> {
    if !path.exists() {
        return Err(AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(tw_project::load(path)?)
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    tw_project::validate_project(project)?;
    Ok(())
}

pub fn list_constructions(project: &Project) -> Vec<ConstructionSummary> {
    project
        .constructions
        .iter()
        .map(|construction| ConstructionSummary {
            id: construction.id.clone(),
            name: construction.name.clone(),
            layer_count: construction.layers.len(),
            total_thickness_m: construction.layers.iter().map(|l| l.thickness_m).sum(),
        })
        .collect()
}
