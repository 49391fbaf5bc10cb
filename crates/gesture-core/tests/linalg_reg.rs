//! Linear algebra regression test
//!
//! Builds covariance matrices from outer products the way the statistical
//! classifier does, then checks inversion, quadratic forms and recovery
//! from rank deficiency.

use gesture_core::linalg::{
    FeatureMask, Matrix, SINGULAR_EPSILON, fix_singular, minus, mul_matrix, quadratic_form,
    scalar_product,
};
use gesture_test::{Jitter, RegParams};

fn covariance(samples: &[Vec<f64>]) -> Matrix {
    let n = samples[0].len();
    let mut m = Matrix::zeros(n, n);
    for s in samples {
        m.add_upper_outer(1.0, s).unwrap();
    }
    m.mirror_upper();
    m.scale(1.0 / samples.len() as f64);
    m
}

#[test]
fn linalg_reg() {
    let mut rp = RegParams::new("linalg");
    let mut jitter = Jitter::new(3);

    // --- Full-rank covariance inverts to a true inverse ---
    eprintln!("=== Full rank ===");
    let samples: Vec<Vec<f64>> = (0..40)
        .map(|_| (0..5).map(|_| jitter.next_offset(10.0)).collect())
        .collect();
    let cov = covariance(&samples);
    let inv = cov.invert().unwrap();
    rp.compare_bool(true, inv.determinant > SINGULAR_EPSILON);
    for i in 0..5 {
        let row: Vec<f64> = cov.row(i).to_vec();
        let prod = mul_matrix(&row, &inv.inverse).unwrap();
        for (j, v) in prod.iter().enumerate() {
            rp.compare_values(if i == j { 1.0 } else { 0.0 }, *v, 1e-9);
        }
    }

    // vᵀ M⁻¹ v > 0 for a positive-definite M
    let v = minus(&samples[0], &samples[1]);
    let q = quadratic_form(&v, &inv.inverse).unwrap();
    rp.compare_bool(true, q > 0.0);
    let w = mul_matrix(&v, &inv.inverse).unwrap();
    rp.compare_values(q, scalar_product(&w, &v), 1e-9);

    // --- Rank-deficient covariance: features 2 and 4 are constant ---
    eprintln!("=== Rank deficient ===");
    let samples: Vec<Vec<f64>> = (0..30)
        .map(|_| {
            let a = jitter.next_offset(5.0);
            let b = jitter.next_offset(5.0);
            vec![a, b, 0.0, a + b + jitter.next_offset(1.0), 0.0]
        })
        .collect();
    let cov = covariance(&samples);
    let plain = cov.invert().unwrap();
    rp.compare_values(0.0, plain.determinant, 0.0);
    let fixed = fix_singular(&cov, SINGULAR_EPSILON).unwrap();
    let kept: Vec<usize> = fixed.mask.indices().collect();
    rp.compare_strings(format!("{:?}", vec![0, 1, 3]), format!("{kept:?}"));
    for i in [2usize, 4] {
        for j in 0..5 {
            rp.compare_values(0.0, fixed.inverse[(i, j)], 0.0);
        }
    }
    // retained block is a true inverse
    let sub = cov.slice(&fixed.mask);
    let sub_inv = fixed.inverse.slice(&fixed.mask);
    for i in 0..3 {
        let prod = mul_matrix(sub.row(i), &sub_inv).unwrap();
        for (j, v) in prod.iter().enumerate() {
            rp.compare_values(if i == j { 1.0 } else { 0.0 }, *v, 1e-9);
        }
    }

    // --- Slice / deslice are inverse on the selected block ---
    let mut mask = FeatureMask::new(5);
    mask.set(1);
    mask.set(3);
    let back = cov.slice(&mask).deslice(-1.0, 5, &mask).unwrap();
    rp.compare_values(cov[(1, 3)], back[(1, 3)], 0.0);
    rp.compare_values(-1.0, back[(0, 0)], 0.0);

    // --- Upper-triangle storage ---
    let upper = cov.upper_triangle();
    rp.compare_values(15.0, upper.len() as f64, 0.0);
    let mut rebuilt = Matrix::from_upper_triangle(5, &upper).unwrap();
    rebuilt.mirror_upper();
    rp.compare_bool(true, rebuilt == cov);

    assert!(rp.cleanup());
}
