//! End-to-end runs of the demo projects through the service layer.

use std::path::PathBuf;

use tw_app::{AppError, RunRequest, list_constructions, load_project, run_project};

fn demo(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // workspace root
    path.push("demos");
    path.push("projects");
    path.push(name);
    path
}

#[test]
fn exterior_insulation_damps_more_than_interior_insulation() {
    let project = load_project(&demo("01_insulation_position.yaml")).unwrap();
    let constructions = list_constructions(&project);
    assert_eq!(constructions.len(), 2);
    assert!((constructions[0].total_thickness_m - 0.25).abs() < 1e-12);

    let response = run_project(&project, &RunRequest::default()).unwrap();
    assert_eq!(response.scenarios.len(), 2);
    assert_eq!(response.failed().count(), 0);

    let outside = response.scenarios[0].summary.as_ref().unwrap();
    let inside = response.scenarios[1].summary.as_ref().unwrap();
    assert_eq!(response.scenarios[0].id, "insulated_outside");
    assert_eq!(outside.converged, Some(true));
    assert_eq!(inside.converged, Some(true));
    assert_eq!(outside.steps, 288);

    let fd_outside = outside.metrics.decrement_factor.unwrap();
    let fd_inside = inside.metrics.decrement_factor.unwrap();
    assert!(fd_outside < fd_inside, "{fd_outside} vs {fd_inside}");
    assert!(fd_inside < 0.5);

    // Periodic regime: what the room gains over the day it loses again.
    for summary in [outside, inside] {
        let m = &summary.metrics;
        let imbalance = (m.heat_gain_wh_m2 - m.heat_loss_wh_m2).abs();
        assert!(imbalance < 0.05 * m.heat_gain_wh_m2.max(0.1));
        assert!((m.tint_mean - 22.5).abs() < 0.1);
    }
}

#[test]
fn single_construction_series_run() {
    let project = load_project(&demo("02_custom_membrane.yaml")).unwrap();
    let request = RunRequest {
        construction_id: Some("brick_membrane_eps"),
        ..RunRequest::default()
    };
    let response = run_project(&project, &request).unwrap();
    assert_eq!(response.scenarios.len(), 1);

    let summary = response.scenarios[0].summary.as_ref().unwrap();
    assert_eq!(summary.steps, 12);
    assert_eq!(summary.cycles, None);
    assert!(summary.final_tint_c.is_finite());
    assert!(summary.metrics.time_lag_s.is_some());
    assert_eq!(summary.metrics.cooling_load_wh_m2, None);
}

#[test]
fn setpoint_turns_surface_flux_into_loads() {
    let project = load_project(&demo("01_insulation_position.yaml")).unwrap();
    let request = RunRequest {
        setpoint_c: Some(24.0),
        ..RunRequest::default()
    };
    let response = run_project(&project, &request).unwrap();
    assert_eq!(response.failed().count(), 0);

    for report in &response.scenarios {
        let summary = report.summary.as_ref().unwrap();
        let m = &summary.metrics;
        assert_eq!(summary.converged, Some(true));
        assert_eq!(summary.final_tint_c, 24.0);
        assert_eq!(m.tint_min, 24.0);
        assert_eq!(m.tint_max, 24.0);

        // Mean drive 22.5 °C below a 24 °C setpoint: heating dominates.
        let cooling = m.cooling_load_wh_m2.unwrap();
        let heating = m.heating_load_wh_m2.unwrap();
        assert!(heating > cooling, "{heating} vs {cooling}");
        assert!((m.total_load_wh_m2.unwrap() - (cooling + heating)).abs() < 1e-9);
    }

    let bad = RunRequest {
        setpoint_c: Some(f64::NAN),
        ..RunRequest::default()
    };
    assert!(matches!(
        run_project(&project, &bad),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn ambient_series_adds_ambient_decrement() {
    let mut project = load_project(&demo("02_custom_membrane.yaml")).unwrap();
    let response = run_project(&project, &RunRequest::default()).unwrap();
    let plain = &response.scenarios[0].summary.as_ref().unwrap().metrics;
    assert_eq!(plain.ambient_decrement_factor, None);

    // Ambient swing is half the driving swing, so the ratio doubles.
    let values_c = match &project.driving {
        tw_project::schema::DrivingDef::Series { values_c } => {
            values_c.iter().map(|v| 21.5 + (v - 21.5) / 2.0).collect()
        }
        other => panic!("unexpected driving {other:?}"),
    };
    project.ambient = Some(tw_project::schema::DrivingDef::Series { values_c });
    let response = run_project(&project, &RunRequest::default()).unwrap();
    let m = &response.scenarios[0].summary.as_ref().unwrap().metrics;
    let sol_air = m.decrement_factor.unwrap();
    let ambient = m.ambient_decrement_factor.unwrap();
    assert!((ambient - 2.0 * sol_air).abs() < 1e-9);
}

#[test]
fn unknown_construction_is_an_error() {
    let project = load_project(&demo("02_custom_membrane.yaml")).unwrap();
    let request = RunRequest {
        construction_id: Some("missing"),
        ..RunRequest::default()
    };
    let err = run_project(&project, &request).unwrap_err();
    assert!(matches!(err, AppError::ConstructionNotFound(_)));
}

#[test]
fn missing_project_file_is_reported() {
    let err = load_project(&demo("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, AppError::ProjectFileRead { .. }));
}

#[test]
fn response_serializes_to_json() {
    let project = load_project(&demo("02_custom_membrane.yaml")).unwrap();
    let response = run_project(&project, &RunRequest::default()).unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["scenarios"][0]["id"], "brick_membrane_eps");
    assert!(json["scenarios"][0]["summary"]["metrics"]["decrement_factor"].is_number());
    assert!(json["scenarios"][0].get("error").is_none());
}

#[test]
fn insulation_cuts_the_cooling_load_of_a_sunlit_wall() {
    let project = load_project(&demo("03_conditioned_office.yaml")).unwrap();
    let response = run_project(&project, &RunRequest::default()).unwrap();
    assert_eq!(response.failed().count(), 0);

    let insulated = &response.scenarios[0].summary.as_ref().unwrap().metrics;
    let bare = &response.scenarios[1].summary.as_ref().unwrap().metrics;
    assert_eq!(response.scenarios[1].id, "bare_brick");

    let cooling_insulated = insulated.cooling_load_wh_m2.unwrap();
    let cooling_bare = bare.cooling_load_wh_m2.unwrap();
    assert!(cooling_insulated > 0.0);
    assert!(cooling_bare > 3.0 * cooling_insulated);
    // Air is held constant, so neither ratio sees any interior swing.
    assert_eq!(bare.ambient_decrement_factor, Some(0.0));
}
