//! Normalization pipeline for point sequences.
//!
//! All functions are pure: they borrow the input and return a new
//! [`Polyline`]. Template matching normalizes every stroke the same way:
//!
//! 1. [`resample`] to a fixed number of equidistant points
//! 2. optionally [`rotate_to_zero`] (indicative angle)
//! 3. [`scale_to_square`] to a reference box
//! 4. [`translate_to_origin`] so the centroid sits at (0, 0)

use super::{Point, Polyline, distance::path_length};

/// Resample a polyline to exactly `n` points evenly spaced along its arc.
///
/// The first output point is the first input point. Whenever the distance
/// walked since the last emitted point reaches `path_length / (n - 1)`, the
/// exact point at that arc length is interpolated, emitted and re-inserted
/// into the working sequence so the remainder of the segment is revisited.
/// Floating-point shortfall is made up by appending the final input point.
///
/// Empty input yields an empty polyline; a path of zero length yields `n`
/// copies of its first point.
pub fn resample(points: &Polyline, n: usize) -> Polyline {
    let Some(first) = points.first() else {
        return Polyline::new();
    };
    if n == 0 {
        return Polyline::new();
    }

    let total = path_length(points);
    let mut dst = Polyline::with_capacity(n);
    dst.push_point(first);
    if total <= 0.0 || n == 1 {
        while dst.len() < n {
            dst.push_point(first);
        }
        return dst;
    }

    let seg_length = total / (n - 1) as f64;
    let mut src: Vec<Point> = points.iter().collect();
    let mut walked = 0.0;
    let mut i = 1;
    while i < src.len() && dst.len() < n {
        let p1 = src[i - 1];
        let p2 = src[i];
        let d = p1.distance(&p2);
        if walked + d >= seg_length {
            let t = (seg_length - walked) / d;
            let q = Point::new(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y));
            dst.push_point(q);
            src.insert(i, q);
            walked = 0.0;
        } else {
            walked += d;
        }
        i += 1;
    }

    // rounding can leave us one short of the final point
    if let Some(last) = src.last().copied() {
        while dst.len() < n {
            dst.push_point(last);
        }
    }
    dst
}

/// Arithmetic mean of all points; the origin for an empty polyline.
pub fn centroid(points: &Polyline) -> Point {
    points.centroid().unwrap_or_default()
}

/// Rotate a polyline about its centroid by `theta` radians.
pub fn rotate_by(points: &Polyline, theta: f64) -> Polyline {
    let mut out = points.clone();
    out.rotate_about(centroid(points), theta);
    out
}

/// Rotate so that the indicative angle (first point to centroid) is zero.
///
/// After rotation the centroid lies on the positive x-axis as seen from the
/// first point.
pub fn rotate_to_zero(points: &Polyline) -> Polyline {
    let Some(first) = points.first() else {
        return Polyline::new();
    };
    let c = centroid(points);
    let theta = (c.y - first.y).atan2(c.x - first.x);
    rotate_by(points, -theta)
}

/// Scale x and y independently so the bounding box becomes `size × size`.
///
/// The box is not centered first: coordinates are multiplied in place.
/// A zero width or height is treated as 1.
pub fn scale_to_square(points: &Polyline, size: f64) -> Polyline {
    let Some(bounds) = points.bounds() else {
        return Polyline::new();
    };
    let w = if bounds.width() == 0.0 {
        1.0
    } else {
        bounds.width()
    };
    let h = if bounds.height() == 0.0 {
        1.0
    } else {
        bounds.height()
    };
    let mut out = points.clone();
    out.scale(size / w, size / h);
    out
}

/// Translate so the centroid is at the origin.
pub fn translate_to_origin(points: &Polyline) -> Polyline {
    let c = centroid(points);
    let mut out = points.clone();
    out.translate(-c.x, -c.y);
    out
}

/// Parameters of the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Number of resampled points
    pub num_points: usize,
    /// Side of the reference square
    pub size: f64,
    /// Apply [`rotate_to_zero`] after resampling
    pub rotate_to_zero: bool,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            num_points: 100,
            size: 100.0,
            rotate_to_zero: false,
        }
    }
}

/// Resample, optionally rotate, scale and center a point sequence.
pub fn normalize(points: &Polyline, params: &Normalization) -> Polyline {
    let mut out = resample(points, params.num_points);
    if params.rotate_to_zero {
        out = rotate_to_zero(&out);
    }
    let out = scale_to_square(&out, params.size);
    translate_to_origin(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> Polyline {
        points.iter().copied().collect()
    }

    #[test]
    fn test_resample_count_and_endpoints() {
        let p = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 7.0), (3.0, 3.0)]);
        for n in [2usize, 3, 16, 64, 100] {
            let r = resample(&p, n);
            assert_eq!(r.len(), n, "n={n}");
            assert_eq!(r.first(), p.first());
            let last = r.last().unwrap();
            let end = p.last().unwrap();
            assert!(last.distance(&end) < 1e-6, "n={n}: {last:?} vs {end:?}");
        }
    }

    #[test]
    fn test_resample_even_spacing() {
        let p = line(&[(0.0, 0.0), (100.0, 0.0)]);
        let r = resample(&p, 11);
        for (i, pt) in r.iter().enumerate() {
            assert!((pt.x - 10.0 * i as f64).abs() < 1e-9, "i={i} x={}", pt.x);
            assert_eq!(pt.y, 0.0);
        }
    }

    #[test]
    fn test_resample_single_point() {
        let p = line(&[(4.0, 5.0)]);
        let r = resample(&p, 8);
        assert_eq!(r.len(), 8);
        assert!(r.iter().all(|q| q == Point::new(4.0, 5.0)));
    }

    #[test]
    fn test_resample_empty() {
        assert!(resample(&Polyline::new(), 10).is_empty());
    }

    #[test]
    fn test_resample_repeated_points() {
        let p = line(&[(0.0, 0.0), (0.0, 0.0), (5.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let r = resample(&p, 5);
        assert_eq!(r.len(), 5);
        assert!((r.get(2).unwrap().x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_to_zero_aligns_indicative_angle() {
        let p = line(&[(0.0, 0.0), (0.0, 10.0), (0.0, 20.0)]);
        let r = rotate_to_zero(&p);
        let first = r.first().unwrap();
        let c = centroid(&r);
        let angle = (c.y - first.y).atan2(c.x - first.x);
        assert!(angle.abs() < 1e-9, "angle={angle}");
        // rotation preserves the centroid
        assert!(c.distance(&centroid(&p)) < 1e-9);
    }

    #[test]
    fn test_scale_to_square_degenerate_height() {
        let p = line(&[(0.0, 5.0), (20.0, 5.0)]);
        let s = scale_to_square(&p, 100.0);
        let b = s.bounds().unwrap();
        assert!((b.width() - 100.0).abs() < 1e-9);
        assert_eq!(b.height(), 0.0);
        // height clamped to 1: y is scaled by 100
        assert!((s.get(0).unwrap().y - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_centered() {
        let p = line(&[(10.0, 10.0), (60.0, 110.0), (110.0, 10.0)]);
        let n = normalize(&p, &Normalization::default());
        assert_eq!(n.len(), 100);
        let c = centroid(&n);
        assert!(c.x.abs() < 1e-9 && c.y.abs() < 1e-9);
        let b = n.bounds().unwrap();
        assert!((b.width() - 100.0).abs() < 1e-6);
        assert!((b.height() - 100.0).abs() < 1e-6);
    }
}
