use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tw_app::{
    AppError, AppResult, MaterialSummary, RunRequest, RunResponse, project_service, query,
    run_service,
};

#[derive(Parser)]
#[command(name = "tw-cli")]
#[command(about = "ThermoWall CLI - transient heat conduction through building walls", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project file (YAML, or JSON by extension)
        project_path: PathBuf,
    },
    /// List constructions in a project
    Constructions {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// List built-in materials, plus a project's custom ones
    Materials {
        /// Only show materials whose id, name or alias contains this text
        #[arg(short, long, default_value = "")]
        query: String,
        /// Also list custom materials from this project
        #[arg(short, long)]
        project: Option<PathBuf>,
    },
    /// Run every construction of a project and print envelope metrics
    Run {
        /// Path to the project file
        project_path: PathBuf,
        /// Run only this construction
        #[arg(short, long)]
        construction: Option<String>,
        /// Hold the interior air at this temperature (°C) and report loads
        #[arg(short, long)]
        setpoint: Option<f64>,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Constructions { project_path } => cmd_constructions(&project_path),
        Commands::Materials { query, project } => cmd_materials(&query, project.as_deref()),
        Commands::Run {
            project_path,
            construction,
            setpoint,
            json,
        } => cmd_run(&project_path, construction.as_deref(), setpoint, json),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_constructions(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let constructions = project_service::list_constructions(&project);

    println!("Constructions in project:");
    for c in constructions {
        println!(
            "  {} - {} ({} layers, {:.3} m)",
            c.id, c.name, c.layer_count, c.total_thickness_m
        );
    }
    Ok(())
}

fn cmd_materials(filter: &str, project_path: Option<&Path>) -> AppResult<()> {
    let mut materials = query::list_standard_materials(filter);
    if let Some(path) = project_path {
        let project = project_service::load_project(path)?;
        let needle = filter.trim().to_ascii_lowercase();
        materials.extend(
            query::list_project_materials(&project)?
                .into_iter()
                .filter(|m| {
                    needle.is_empty()
                        || m.id.to_ascii_lowercase().contains(&needle)
                        || m.name.to_ascii_lowercase().contains(&needle)
                }),
        );
    }

    if materials.is_empty() {
        println!("No materials match '{}'", filter);
        return Ok(());
    }

    println!(
        "{:<16} {:<28} {:>9} {:>9} {:>9} {:>11}",
        "id", "name", "k W/mK", "rho kg/m3", "c J/kgK", "alpha m2/s"
    );
    for m in &materials {
        print_material(m);
    }
    Ok(())
}

fn print_material(m: &MaterialSummary) {
    let name = if m.custom {
        format!("{} *", m.name)
    } else {
        m.name.clone()
    };
    println!(
        "{:<16} {:<28} {:>9.3} {:>9.0} {:>9.0} {:>11.3e}",
        m.id,
        name,
        m.conductivity_w_per_m_k,
        m.density_kg_per_m3,
        m.specific_heat_j_per_kg_k,
        m.diffusivity_m2_per_s
    );
}

fn cmd_run(
    project_path: &Path,
    construction: Option<&str>,
    setpoint: Option<f64>,
    json: bool,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let request = RunRequest {
        construction_id: construction,
        setpoint_c: setpoint,
    };
    let response = run_service::run_project(&project, &request)?;

    if json {
        let text = serde_json::to_string_pretty(&response)
            .map_err(|e| AppError::InvalidInput(format!("failed to encode results: {e}")))?;
        println!("{text}");
    } else {
        print_run_summary(&response);
    }

    let failed = response.failed().count();
    if failed > 0 {
        return Err(AppError::InvalidInput(format!(
            "{failed} of {} scenarios failed",
            response.scenarios.len()
        )));
    }
    Ok(())
}

fn print_run_summary(response: &RunResponse) {
    println!(
        "✓ {} ({} scenarios, {:.2} s)",
        response.project,
        response.scenarios.len(),
        response.wall_time_s
    );
    for report in &response.scenarios {
        println!();
        println!("  {} - {}", report.id, report.name);
        if let Some(err) = &report.error {
            println!("    ✗ {err}");
            continue;
        }
        let Some(summary) = &report.summary else {
            continue;
        };
        let m = &summary.metrics;
        if let (Some(cycles), Some(converged)) = (summary.cycles, summary.converged) {
            let status = if converged { "converged" } else { "not converged" };
            println!("    Periodic: {status} after {cycles} cycles");
        }
        println!("    Steps:            {}", summary.steps);
        println!("    Final Tint:       {:.2} °C", summary.final_tint_c);
        println!(
            "    Tint mean/min/max: {:.2} / {:.2} / {:.2} °C",
            m.tint_mean, m.tint_min, m.tint_max
        );
        match (m.decrement_factor, m.time_lag_hhmm()) {
            (Some(fd), Some(lag)) => {
                println!("    FD (sol-air):     {fd:.3}");
                if let Some(fd_ambient) = m.ambient_decrement_factor {
                    println!("    FD (ambient):     {fd_ambient:.3}");
                }
                println!("    Time lag:         {lag}");
            }
            _ => println!("    Decrement factor: n/a (constant exterior temperature)"),
        }
        match (m.cooling_load_wh_m2, m.heating_load_wh_m2, m.total_load_wh_m2) {
            (Some(cooling), Some(heating), Some(total)) => println!(
                "    Cooling/heating:  {cooling:.1} / {heating:.1} Wh/m² (total {total:.1})"
            ),
            _ => println!(
                "    Heat gain/loss:   {:.1} / {:.1} Wh/m²",
                m.heat_gain_wh_m2, m.heat_loss_wh_m2
            ),
        }
    }
}
