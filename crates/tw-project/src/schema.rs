//! Project schema definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    /// Custom materials, merged over the built-in catalog by id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub materials: BTreeMap<String, MaterialDef>,
    #[serde(default)]
    pub constructions: Vec<ConstructionDef>,
    #[serde(default)]
    pub run: RunDef,
    pub driving: DrivingDef,
    /// Outdoor air temperature behind a sol-air `driving` series, same
    /// steps; used only for the ambient decrement factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient: Option<DrivingDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodic: Option<PeriodicDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub conductivity_w_per_m_k: f64,
    pub density_kg_per_m3: f64,
    pub specific_heat_j_per_kg_k: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstructionDef {
    pub id: String,
    pub name: String,
    /// Exterior face first
    pub layers: Vec<LayerDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerDef {
    pub material: String,
    pub thickness_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    #[serde(default = "default_nx")]
    pub nx: usize,
    #[serde(default = "default_dt_s")]
    pub dt_s: f64,
    #[serde(default = "default_ho")]
    pub ho_w_per_m2_k: f64,
    #[serde(default = "default_hi")]
    pub hi_w_per_m2_k: f64,
    #[serde(default = "default_la_m")]
    pub la_m: f64,
    #[serde(default = "default_initial_temperature_c")]
    pub initial_temperature_c: f64,
    /// Defaults to `initial_temperature_c`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_air_temperature_c: Option<f64>,
    /// Hold the interior air at this temperature and report loads;
    /// free-floating when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setpoint_c: Option<f64>,
}

impl Default for RunDef {
    fn default() -> Self {
        Self {
            nx: default_nx(),
            dt_s: default_dt_s(),
            ho_w_per_m2_k: default_ho(),
            hi_w_per_m2_k: default_hi(),
            la_m: default_la_m(),
            initial_temperature_c: default_initial_temperature_c(),
            initial_air_temperature_c: None,
            setpoint_c: None,
        }
    }
}

impl RunDef {
    pub fn initial_air_temperature_c(&self) -> f64 {
        self.initial_air_temperature_c
            .unwrap_or(self.initial_temperature_c)
    }
}

fn default_nx() -> usize {
    200
}

fn default_dt_s() -> f64 {
    300.0
}

fn default_ho() -> f64 {
    13.0
}

fn default_hi() -> f64 {
    8.6
}

fn default_la_m() -> f64 {
    2.5
}

fn default_initial_temperature_c() -> f64 {
    22.0
}

/// Exterior (sol-air) temperature applied at each step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DrivingDef {
    /// One value per step, in °C.
    Series { values_c: Vec<f64> },
    /// `mean + amplitude·sin(2π·n·dt / period)` sampled for `steps` steps.
    Sinusoid {
        mean_c: f64,
        amplitude_c: f64,
        #[serde(default = "default_period_s")]
        period_s: f64,
        steps: usize,
    },
}

fn default_period_s() -> f64 {
    86_400.0
}

impl DrivingDef {
    pub fn steps(&self) -> usize {
        match self {
            Self::Series { values_c } => values_c.len(),
            Self::Sinusoid { steps, .. } => *steps,
        }
    }

    /// Expand into one temperature per step for a time step of `dt_s`.
    pub fn sample(&self, dt_s: f64) -> Vec<f64> {
        match self {
            Self::Series { values_c } => values_c.clone(),
            Self::Sinusoid {
                mean_c,
                amplitude_c,
                period_s,
                steps,
            } => (0..*steps)
                .map(|n| {
                    let phase = std::f64::consts::TAU * n as f64 * dt_s / period_s;
                    mean_c + amplitude_c * phase.sin()
                })
                .collect(),
        }
    }
}

/// Repeat the driving series as a design day until the interior trace settles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodicDef {
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,
    #[serde(default = "default_tolerance_k")]
    pub tolerance_k: f64,
}

impl Default for PeriodicDef {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
            tolerance_k: default_tolerance_k(),
        }
    }
}

fn default_max_cycles() -> usize {
    30
}

fn default_tolerance_k() -> f64 {
    1e-3
}
