//! Vector helpers over `f64` slices.

use super::Matrix;
use crate::error::{Error, Result};

/// Element-wise `a − b`, truncated to the shorter operand.
pub fn minus(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// Dot product, truncated to the shorter operand.
pub fn scalar_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Row vector times matrix: `vᵀ M`.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if `v.len() != m.rows()`.
pub fn mul_matrix(v: &[f64], m: &Matrix) -> Result<Vec<f64>> {
    if v.len() != m.rows() {
        return Err(Error::LengthMismatch {
            left: v.len(),
            right: m.rows(),
        });
    }
    let mut out = vec![0.0; m.cols()];
    for (i, &vi) in v.iter().enumerate() {
        if vi == 0.0 {
            continue;
        }
        for (o, &mij) in out.iter_mut().zip(m.row(i)) {
            *o += vi * mij;
        }
    }
    Ok(out)
}

/// Quadratic form `vᵀ M v`.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] unless `M` is `len × len`.
pub fn quadratic_form(v: &[f64], m: &Matrix) -> Result<f64> {
    if m.cols() != v.len() {
        return Err(Error::LengthMismatch {
            left: v.len(),
            right: m.cols(),
        });
    }
    Ok(scalar_product(&mul_matrix(v, m)?, v))
}
