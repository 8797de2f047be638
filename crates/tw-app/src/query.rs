//! Material catalog queries.

use tw_materials::{MaterialCatalog, filter_standard_materials};
use tw_project::schema::Project;

use crate::error::AppResult;
use crate::runtime_compile::build_catalog;

/// One row of a material listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MaterialSummary {
    pub id: String,
    pub name: String,
    pub conductivity_w_per_m_k: f64,
    pub density_kg_per_m3: f64,
    pub specific_heat_j_per_kg_k: f64,
    pub diffusivity_m2_per_s: f64,
    /// `true` for materials defined in a project file
    pub custom: bool,
}

/// Built-in materials whose id, name or aliases contain `query`.
pub fn list_standard_materials(query: &str) -> Vec<MaterialSummary> {
    filter_standard_materials(query)
        .into_iter()
        .map(|entry| {
            let props = entry.properties();
            MaterialSummary {
                id: entry.canonical_id.to_string(),
                name: entry.display_name.to_string(),
                conductivity_w_per_m_k: props.conductivity(),
                density_kg_per_m3: props.density(),
                specific_heat_j_per_kg_k: props.specific_heat(),
                diffusivity_m2_per_s: props.diffusivity(),
                custom: false,
            }
        })
        .collect()
}

/// Custom materials of `project`, as resolved through the merged catalog.
pub fn list_project_materials(project: &Project) -> AppResult<Vec<MaterialSummary>> {
    let catalog = build_catalog(project)?;
    project
        .materials
        .iter()
        .map(|(id, def)| -> AppResult<MaterialSummary> {
            let props = catalog.get_material(id)?;
            Ok(MaterialSummary {
                id: id.clone(),
                name: def.name.clone().unwrap_or_else(|| id.clone()),
                conductivity_w_per_m_k: props.conductivity(),
                density_kg_per_m3: props.density(),
                specific_heat_j_per_kg_k: props.specific_heat(),
                diffusivity_m2_per_s: props.diffusivity(),
                custom: true,
            })
        })
        .collect()
}
