use tw_app::{list_project_materials, list_standard_materials};
use tw_project::schema::{
    ConstructionDef, DrivingDef, LayerDef, MaterialDef, Project, RunDef,
};

#[test]
fn standard_listing_filters_by_alias() {
    let all = list_standard_materials("");
    assert!(all.len() >= 10);
    assert!(all.iter().all(|m| !m.custom));

    let insulation = list_standard_materials("polystyrene");
    assert_eq!(insulation.len(), 1);
    assert_eq!(insulation[0].id, "eps");
    assert!(insulation[0].diffusivity_m2_per_s > 0.0);
}

#[test]
fn project_materials_are_listed_as_custom() {
    let mut project = Project {
        version: 1,
        name: "materials".to_string(),
        materials: Default::default(),
        constructions: vec![ConstructionDef {
            id: "w".to_string(),
            name: "W".to_string(),
            layers: vec![LayerDef {
                material: "hempcrete".to_string(),
                thickness_m: 0.3,
            }],
        }],
        run: RunDef::default(),
        driving: DrivingDef::Series {
            values_c: vec![20.0],
        },
        ambient: None,
        periodic: None,
    };
    project.materials.insert(
        "hempcrete".to_string(),
        MaterialDef {
            name: Some("Hempcrete".to_string()),
            conductivity_w_per_m_k: 0.07,
            density_kg_per_m3: 275.0,
            specific_heat_j_per_kg_k: 1700.0,
        },
    );

    let listed = list_project_materials(&project).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].custom);
    assert_eq!(listed[0].name, "Hempcrete");
    assert_eq!(listed[0].conductivity_w_per_m_k, 0.07);
}
