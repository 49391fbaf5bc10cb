//! Path lengths and point-to-point distances between polylines.

use super::{Polyline, transform::rotate_by};
use crate::error::{Error, Result};

/// Golden ratio conjugate, (√5 − 1) / 2.
const PHI: f64 = 0.618_033_988_749_894_9;

/// Smallest bracket width accepted by [`golden_section_search`].
const MIN_TOLERANCE: f64 = 1e-12;

/// Sum of the Euclidean distances between consecutive points.
pub fn path_length(points: &Polyline) -> f64 {
    points
        .iter()
        .zip(points.iter().skip(1))
        .map(|(a, b)| a.distance(&b))
        .sum()
}

/// Mean distance between points of equal index.
///
/// The measure is symmetric. Two empty polylines are at distance 0.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the polylines differ in length.
pub fn path_distance(a: &Polyline, b: &Polyline) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = a.iter().zip(b.iter()).map(|(p, q)| p.distance(&q)).sum();
    Ok(sum / a.len() as f64)
}

/// Path distance after rotating `a` about its centroid by `theta`.
pub fn distance_at_angle(a: &Polyline, b: &Polyline, theta: f64) -> Result<f64> {
    path_distance(&rotate_by(a, theta), b)
}

/// Outcome of a golden-section minimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldenSection {
    /// Argument of the best evaluation
    pub angle: f64,
    /// Best value found
    pub distance: f64,
    /// Width of the final bracket
    pub bracket: f64,
    /// Number of function evaluations
    pub evaluations: usize,
}

/// Minimize a unimodal function over `[lo, hi]` by golden-section search.
///
/// Stops once the bracket is no wider than `tolerance`, or once it can no
/// longer shrink in floating point. The search needs
/// O(log(range / tolerance)) evaluations.
pub fn golden_section_search<F>(mut f: F, lo: f64, hi: f64, tolerance: f64) -> Result<GoldenSection>
where
    F: FnMut(f64) -> Result<f64>,
{
    let tolerance = tolerance.max(MIN_TOLERANCE);
    let (mut a, mut b) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let max_steps = step_limit(b - a, tolerance);

    let mut x1 = PHI * a + (1.0 - PHI) * b;
    let mut f1 = f(x1)?;
    let mut x2 = (1.0 - PHI) * a + PHI * b;
    let mut f2 = f(x2)?;
    let mut evaluations = 2;

    let mut steps = 0;
    while (b - a).abs() > tolerance && steps < max_steps {
        let width = (b - a).abs();
        if f1 < f2 {
            b = x2;
            x2 = x1;
            f2 = f1;
            x1 = PHI * a + (1.0 - PHI) * b;
            f1 = f(x1)?;
        } else {
            a = x1;
            x1 = x2;
            f1 = f2;
            x2 = (1.0 - PHI) * a + PHI * b;
            f2 = f(x2)?;
        }
        evaluations += 1;
        steps += 1;
        if (b - a).abs() >= width {
            break;
        }
    }

    let (angle, distance) = if f1 <= f2 { (x1, f1) } else { (x2, f2) };
    Ok(GoldenSection {
        angle,
        distance,
        bracket: (b - a).abs(),
        evaluations,
    })
}

/// Number of bracket reductions needed to shrink `width` to `tolerance`.
fn step_limit(width: f64, tolerance: f64) -> usize {
    if width.is_nan() || width <= tolerance {
        return 0;
    }
    let steps = ((tolerance / width).ln() / PHI.ln()).ceil();
    if steps.is_finite() {
        steps as usize + 1
    } else {
        0
    }
}

/// Smallest path distance over rotations of `a` in `[theta_min, theta_max]`.
///
/// Uses golden-section search down to `tolerance` radians. When the range
/// contains 0 the unrotated distance is a candidate as well, so the result
/// never exceeds [`path_distance`].
pub fn distance_at_best_angle(
    a: &Polyline,
    b: &Polyline,
    theta_min: f64,
    theta_max: f64,
    tolerance: f64,
) -> Result<f64> {
    let search = golden_section_search(
        |theta| distance_at_angle(a, b, theta),
        theta_min,
        theta_max,
        tolerance,
    )?;
    let (lo, hi) = if theta_min <= theta_max {
        (theta_min, theta_max)
    } else {
        (theta_max, theta_min)
    };
    if lo <= 0.0 && 0.0 <= hi {
        Ok(search.distance.min(path_distance(a, b)?))
    } else {
        Ok(search.distance)
    }
}
