//! Thomas algorithm (TDMA) for tridiagonal systems.

use crate::error::{SolverError, SolverResult};

/// Solve `a[i]·x[i] = b[i]·x[i+1] + c[i]·x[i-1] + d[i]` for `x`.
///
/// - `a`: main diagonal
/// - `b`: upper coupling (`b[n-1]` unused)
/// - `c`: lower coupling (`c[0]` unused)
/// - `d`: right-hand side
///
/// Note the sign convention: the off-diagonal matrix entries are `-b` and
/// `-c`. A zero pivot fails with [`SolverError::SingularSystem`] instead of
/// producing infinities.
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> SolverResult<Vec<f64>> {
    let n = a.len();
    if n == 0 {
        return Err(SolverError::InvalidArg {
            what: "empty tridiagonal system".to_string(),
        });
    }
    if b.len() != n || c.len() != n || d.len() != n {
        return Err(SolverError::InvalidArg {
            what: format!(
                "coefficient lengths differ (a={n}, b={}, c={}, d={})",
                b.len(),
                c.len(),
                d.len()
            ),
        });
    }

    let mut p = vec![0.0; n];
    let mut q = vec![0.0; n];

    // Forward sweep
    let pivot = checked_pivot(a[0], 0)?;
    p[0] = b[0] / pivot;
    q[0] = d[0] / pivot;

    for i in 1..n {
        let pivot = checked_pivot(a[i] - c[i] * p[i - 1], i)?;
        p[i] = b[i] / pivot;
        q[i] = (d[i] + c[i] * q[i - 1]) / pivot;
    }

    // Back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = q[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = p[i] * x[i + 1] + q[i];
    }

    Ok(x)
}

#[inline]
fn checked_pivot(value: f64, index: usize) -> SolverResult<f64> {
    if value == 0.0 || value.is_nan() {
        Err(SolverError::SingularSystem { index })
    } else {
        Ok(value)
    }
}
