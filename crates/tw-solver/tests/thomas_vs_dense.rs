//! The Thomas solve must agree with a dense LU solve of the same matrix.

use nalgebra::{DMatrix, DVector};
use proptest::prelude::*;
use tw_solver::thomas_solve;

fn dense_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> Vec<f64> {
    let n = a.len();
    let m = DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            a[i]
        } else if j == i + 1 {
            -b[i]
        } else if i == j + 1 {
            -c[i]
        } else {
            0.0
        }
    });
    let rhs = DVector::from_column_slice(d);
    m.lu()
        .solve(&rhs)
        .expect("diagonally dominant matrix is invertible")
        .iter()
        .copied()
        .collect()
}

/// Diagonally dominant systems like the ones the conduction builder emits.
fn dominant_system() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)> {
    (2_usize..40).prop_flat_map(|n| {
        (
            prop::collection::vec(0.0_f64..50.0, n),
            prop::collection::vec(0.0_f64..50.0, n),
            prop::collection::vec(0.01_f64..100.0, n),
            prop::collection::vec(-1000.0_f64..1000.0, n),
        )
            .prop_map(|(mut b, mut c, extra, d)| {
                let n = b.len();
                b[n - 1] = 0.0;
                c[0] = 0.0;
                let a = (0..n).map(|i| b[i] + c[i] + extra[i]).collect();
                (a, b, c, d)
            })
    })
}

proptest! {
    #[test]
    fn thomas_matches_dense_lu((a, b, c, d) in dominant_system()) {
        let x = thomas_solve(&a, &b, &c, &d).unwrap();
        let reference = dense_solve(&a, &b, &c, &d);
        for (i, (xi, ri)) in x.iter().zip(&reference).enumerate() {
            let scale = ri.abs().max(1.0);
            prop_assert!(
                (xi - ri).abs() <= 1e-8 * scale,
                "row {}: thomas={} dense={}", i, xi, ri
            );
        }
    }
}

#[test]
fn heat_equation_pattern_matches_dense() {
    let n = 10;
    let alpha = 0.4;
    let a = vec![1.0 + 2.0 * alpha; n];
    let b: Vec<f64> = (0..n).map(|i| if i < n - 1 { alpha } else { 0.0 }).collect();
    let c: Vec<f64> = (0..n).map(|i| if i > 0 { alpha } else { 0.0 }).collect();
    let d = vec![1.0; n];

    let x = thomas_solve(&a, &b, &c, &d).unwrap();
    let reference = dense_solve(&a, &b, &c, &d);
    for (xi, ri) in x.iter().zip(&reference) {
        assert!((xi - ri).abs() < 1e-12);
        assert!(xi.is_finite() && *xi > 0.0);
    }
}
