//! Linear algebra support
//!
//! Dense matrices with Gauss-Jordan inversion, feature masks for
//! restricting a matrix to a subset of its rows and columns, vector
//! helpers, and recovery of an invertible sub-matrix from a singular
//! covariance matrix.

mod mask;
mod matrix;
mod vector;

pub use mask::FeatureMask;
pub use matrix::{Inversion, Matrix};
pub use vector::{minus, mul_matrix, quadratic_form, scalar_product};

use crate::error::{Error, Result};

/// Determinant magnitude at or below which a matrix is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1.0e-6;

/// An inverse recovered from a singular matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    /// Inverse of the retained sub-matrix, embedded at full size with zeros
    pub inverse: Matrix,
    /// Features whose rows and columns were retained
    pub mask: FeatureMask,
    /// Determinant of the retained sub-matrix
    pub determinant: f64,
}

/// Greedily select a feature subset whose sub-matrix is invertible.
///
/// Features are admitted one at a time in index order; a feature stays only
/// if the sub-matrix restricted to the admitted features has
/// `|det| > epsilon`. The inverse of the final sub-matrix is embedded back
/// into full size with zeros in the discarded rows and columns.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for a non-square matrix and
/// [`Error::SingularMatrix`] if no feature can be retained.
pub fn fix_singular(matrix: &Matrix, epsilon: f64) -> Result<Recovered> {
    if !matrix.is_square() {
        return Err(Error::InvalidParameter(format!(
            "cannot recover a {}x{} matrix",
            matrix.rows(),
            matrix.cols()
        )));
    }
    let n = matrix.rows();
    let mut mask = FeatureMask::new(n);
    for i in 0..n {
        mask.set(i);
        let inv = matrix.slice(&mask).invert()?;
        if inv.determinant.abs() <= epsilon {
            mask.clear(i);
        }
    }

    let retained = mask.count();
    let inv = matrix.slice(&mask).invert()?;
    if retained == 0 || inv.determinant.abs() <= epsilon {
        return Err(Error::SingularMatrix { retained });
    }
    Ok(Recovered {
        inverse: inv.inverse.deslice(0.0, n, &mask)?,
        mask,
        determinant: inv.determinant,
    })
}
