use crate::{TwError, TwResult};

pub fn ensure_finite(v: f64, what: &'static str) -> TwResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TwError::NonFinite { what, value: v })
    }
}

/// Rejects NaN, infinities, zero and negative values.
pub fn ensure_positive(v: f64, what: &'static str) -> TwResult<f64> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(TwError::NonPositive { what, value: v })
    }
}

/// Effective conductivity of two conductive resistances in series.
///
/// Equal inputs return the input unchanged, so an interface between two
/// layers of the same conductivity reproduces that conductivity bit for bit.
#[inline]
pub fn harmonic_mean(k1: f64, k2: f64) -> f64 {
    if k1 == k2 {
        return k1;
    }
    2.0 * k1 * k2 / (k1 + k2)
}
