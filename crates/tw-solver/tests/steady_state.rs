//! A homogeneous wall held between constant exterior and interior
//! temperatures relaxes to the linear conduction profile.

use tw_materials::InMemoryCatalog;
use tw_solver::{Construction, Layer, build_system, discretize};

#[test]
fn homogeneous_wall_converges_to_linear_profile() {
    let catalog = InMemoryCatalog::new()
        .with_material("brick", 0.72, 1920.0, 835.0)
        .unwrap();
    let construction = Construction::new(vec![Layer::meters("brick", 0.2)]).unwrap();
    let wall = discretize(&construction, 20, &catalog).unwrap();

    let (to, ti, ho, hi) = (35.0, 20.0, 20.0, 8.0);
    let dt = 3600.0;
    let mut t = vec![25.0; wall.nx()];
    for _ in 0..2000 {
        let sys = build_system(&wall, &t, to, ti, ho, hi, dt).unwrap();
        t = sys.solve().unwrap();
    }

    // Exterior exchange acts on volume 0, interior exchange on volume nx-1,
    // with centre-to-centre conduction in between.
    let r_total = 1.0 / ho + wall.center_to_center_resistance() + 1.0 / hi;
    let q = (to - ti) / r_total;
    let k = wall.k()[0];

    for (i, value) in t.iter().enumerate() {
        let expected = to - q / ho - q * i as f64 * wall.dx() / k;
        assert!(
            (value - expected).abs() < 1e-6,
            "volume {i}: got {value}, expected {expected}"
        );
    }

    // Linear: constant gradient between neighbours.
    let step = t[1] - t[0];
    for pair in t.windows(2) {
        assert!((pair[1] - pair[0] - step).abs() < 1e-8);
    }
    // Flux balance at both faces.
    assert!((ho * (to - t[0]) - hi * (t[t.len() - 1] - ti)).abs() < 1e-6);
}
