//! Envelope performance metrics.
//!
//! Computes the usual comparison figures for a construction from a run over
//! one driving period: decrement factor, time lag, interior air statistics
//! and the heat exchanged across the inner surface.
//!
//! The driving series is normally a sol-air temperature, so
//! `decrement_factor` is the sol-air figure. When the ambient air
//! temperature behind it is known, [`EnvelopeMetrics::with_ambient`] adds
//! the decrement factor against the ambient swing. Runs with conditioned
//! air also report the cooling and heating loads.

use serde::{Deserialize, Serialize};
use tw_core::units::constants::SECONDS_PER_HOUR;
use tw_core::units::{Time, s, to_seconds};

use crate::error::{SimError, SimResult};
use crate::sim::SimRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeMetrics {
    /// Interior air swing over driving (sol-air) swing; `None` for a
    /// constant drive
    pub decrement_factor: Option<f64>,
    /// Interior air swing over ambient air swing; set by
    /// [`with_ambient`](Self::with_ambient)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_decrement_factor: Option<f64>,
    /// Delay from the driving maximum to the interior-air maximum, wrapped
    /// into one series period (s); `None` for a constant drive
    pub time_lag_s: Option<f64>,
    /// Mean interior air temperature (°C)
    pub tint_mean: f64,
    pub tint_min: f64,
    pub tint_max: f64,
    /// max − min of the driving series (K)
    pub driving_swing: f64,
    /// Heat delivered to the room through the inner surface (Wh/m²)
    pub heat_gain_wh_m2: f64,
    /// Heat drawn from the room through the inner surface (Wh/m²)
    pub heat_loss_wh_m2: f64,
    /// Energy removed to hold the setpoint (Wh/m²); conditioned runs only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_load_wh_m2: Option<f64>,
    /// Energy supplied to hold the setpoint (Wh/m²); conditioned runs only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_load_wh_m2: Option<f64>,
    /// Cooling plus heating (Wh/m²)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_load_wh_m2: Option<f64>,
}

impl EnvelopeMetrics {
    pub fn tint_swing(&self) -> f64 {
        self.tint_max - self.tint_min
    }

    pub fn time_lag(&self) -> Option<Time> {
        self.time_lag_s.map(s)
    }

    /// Time lag formatted as `HH:MM`.
    pub fn time_lag_hhmm(&self) -> Option<String> {
        self.time_lag().map(|lag| {
            let minutes = (to_seconds(lag) / 60.0).round() as u64;
            format!("{:02}:{:02}", minutes / 60, minutes % 60)
        })
    }

    /// Add the decrement factor against `ambient`, the outdoor air
    /// temperature over the same steps as the record.
    pub fn with_ambient(mut self, ambient: &[f64]) -> SimResult<Self> {
        if ambient.is_empty() {
            return Err(SimError::InvalidArg {
                what: "ambient series is empty".to_string(),
            });
        }
        let (min, max, _) = extremes(ambient);
        let swing = max - min;
        self.ambient_decrement_factor = (swing > 0.0).then(|| self.tint_swing() / swing);
        Ok(self)
    }
}

/// Compute metrics for `record`, produced by driving with `to_series`.
///
/// Both must cover the same steps; use the last cycle of a periodic run for
/// the steady-periodic figures. In a conditioned record the heat gain is
/// the cooling load and the heat loss the heating load.
pub fn compute_metrics(record: &SimRecord, to_series: &[f64]) -> SimResult<EnvelopeMetrics> {
    let n = record.len();
    if n == 0 {
        return Err(SimError::InvalidArg {
            what: "cannot compute metrics of an empty record".to_string(),
        });
    }
    if to_series.len() != n {
        return Err(SimError::InvalidArg {
            what: format!(
                "driving series has {} samples, record has {n}",
                to_series.len()
            ),
        });
    }

    let (tint_min, tint_max, tint_peak) = extremes(&record.tint_history);
    let (to_min, to_max, to_peak) = extremes(to_series);
    let driving_swing = to_max - to_min;
    let tint_mean = record.tint_history.iter().sum::<f64>() / n as f64;

    let (decrement_factor, time_lag_s) = if driving_swing > 0.0 {
        let lag_steps = (tint_peak + n - to_peak) % n;
        (
            Some((tint_max - tint_min) / driving_swing),
            Some(lag_steps as f64 * record.dt),
        )
    } else {
        (None, None)
    };

    let to_wh = record.dt / SECONDS_PER_HOUR;
    let heat_gain_wh_m2: f64 = record
        .surface_flux
        .iter()
        .map(|q| q.max(0.0) * to_wh)
        .sum();
    let heat_loss_wh_m2: f64 = record
        .surface_flux
        .iter()
        .map(|q| (-q).max(0.0) * to_wh)
        .sum();

    let (cooling_load_wh_m2, heating_load_wh_m2, total_load_wh_m2) =
        if record.interior.is_conditioned() {
            (
                Some(heat_gain_wh_m2),
                Some(heat_loss_wh_m2),
                Some(heat_gain_wh_m2 + heat_loss_wh_m2),
            )
        } else {
            (None, None, None)
        };

    Ok(EnvelopeMetrics {
        decrement_factor,
        ambient_decrement_factor: None,
        time_lag_s,
        tint_mean,
        tint_min,
        tint_max,
        driving_swing,
        heat_gain_wh_m2,
        heat_loss_wh_m2,
        cooling_load_wh_m2,
        heating_load_wh_m2,
        total_load_wh_m2,
    })
}

/// (min, max, index of the first max)
fn extremes(values: &[f64]) -> (f64, f64, usize) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut peak = 0;
    for (i, &v) in values.iter().enumerate() {
        min = min.min(v);
        if v > max {
            max = v;
            peak = i;
        }
    }
    (min, max, peak)
}
