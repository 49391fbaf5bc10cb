//! Predefined gesture shapes
//!
//! Template generators for common pen gestures, drawn in a 100 × 100 box
//! with y growing upwards, plus the rotation and mirroring used to derive
//! variants. Curved shapes are flattened into polylines whose points lie
//! within [`FLATNESS`] of the true curve.

use crate::error::RecogResult;
use crate::shape::ShapeMatchingClassifier;
use gesture_core::{Point, Polyline};
use std::f64::consts::PI;

/// Largest distance between a flattened curve and its chords.
pub const FLATNESS: f64 = 1.0;

/// Subdivision depth limit when flattening curves.
const MAX_DEPTH: u32 = 10;

/// Angular step of spirals, helices and arcs.
const ANGLE_STEP: f64 = PI / 24.0;

/// Mirror axis for [`mirror`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    /// Flip left to right
    Vertical,
    /// Flip top to bottom
    Horizontal,
}

fn segment_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_sq(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_sq(&Point::new(a.x + t * dx, a.y + t * dy))
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Append a flattened cubic Bézier curve, excluding its start point.
fn flatten_cubic(out: &mut Polyline, p0: Point, p1: Point, p2: Point, p3: Point, depth: u32) {
    let flat_sq = FLATNESS * FLATNESS;
    let flat = segment_distance_sq(p1, p0, p3) <= flat_sq
        && segment_distance_sq(p2, p0, p3) <= flat_sq;
    if flat || depth >= MAX_DEPTH {
        out.push_point(p3);
        return;
    }
    // de Casteljau split at t = 0.5
    let p01 = midpoint(p0, p1);
    let p12 = midpoint(p1, p2);
    let p23 = midpoint(p2, p3);
    let p012 = midpoint(p01, p12);
    let p123 = midpoint(p12, p23);
    let mid = midpoint(p012, p123);
    flatten_cubic(out, p0, p01, p012, mid, depth + 1);
    flatten_cubic(out, mid, p123, p23, p3, depth + 1);
}

/// Append a flattened quadratic Bézier curve, excluding its start point.
fn flatten_quad(out: &mut Polyline, p0: Point, control: Point, p2: Point) {
    let c1 = Point::new(
        p0.x + 2.0 / 3.0 * (control.x - p0.x),
        p0.y + 2.0 / 3.0 * (control.y - p0.y),
    );
    let c2 = Point::new(
        p2.x + 2.0 / 3.0 * (control.x - p2.x),
        p2.y + 2.0 / 3.0 * (control.y - p2.y),
    );
    flatten_cubic(out, p0, c1, c2, p2, 0);
}

fn polyline(points: &[(f64, f64)]) -> Polyline {
    points.iter().copied().collect()
}

/// Downward stroke to the bottom middle and back up.
pub fn v_shape() -> Polyline {
    polyline(&[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)])
}

/// Vertical stroke followed by a horizontal one.
pub fn l_shape() -> Polyline {
    polyline(&[(0.0, 0.0), (0.0, 100.0), (100.0, 100.0)])
}

/// Horizontal stroke.
pub fn line() -> Polyline {
    polyline(&[(0.0, 50.0), (100.0, 50.0)])
}

/// Horizontal stroke followed by a vertical one, drawn without lifting.
pub fn cross() -> Polyline {
    polyline(&[(0.0, 50.0), (100.0, 50.0), (50.0, 100.0), (50.0, 0.0)])
}

/// `n` consecutive V shapes.
pub fn zigzag(n: usize) -> Polyline {
    let mut out = Polyline::with_capacity(2 * n + 1);
    out.push(0.0, 0.0);
    for i in 0..n {
        let x = 100.0 * i as f64;
        out.push(x + 50.0, 100.0);
        out.push(x + 100.0, 0.0);
    }
    out
}

/// Archimedean spiral `r = a + b·θ` around the origin.
pub fn spiral(revolutions: f64, a: f64, b: f64) -> Polyline {
    let max_theta = revolutions * 2.0 * PI;
    let mut out = Polyline::new();
    let mut angle = 0.0;
    while angle <= max_theta {
        let radius = a + b * angle;
        out.push(radius * angle.cos(), radius * angle.sin());
        angle += ANGLE_STEP;
    }
    out
}

/// Ellipse with semi-axes `a` and `b` centered at `(h, k)` whose center
/// moves up by `dy` per step.
pub fn helix(revolutions: f64, dy: f64, h: f64, k: f64, a: f64, b: f64) -> Polyline {
    let max_theta = revolutions * 2.0 * PI;
    let mut out = Polyline::new();
    let mut y_center = k;
    let mut angle = 0.0;
    while angle <= max_theta {
        y_center += dy;
        out.push(h + a * angle.cos(), y_center + b * angle.sin());
        angle += ANGLE_STEP;
    }
    out
}

fn humps(n: usize, alternate: bool) -> Polyline {
    let mut out = Polyline::new();
    let y = 50.0;
    let mut start = Point::new(0.0, y);
    let mut h = 50.0;
    out.push_point(start);
    for _ in 0..n {
        let end = Point::new(start.x + 50.0, y);
        let middle = (start.x + end.x) / 2.0;
        let c1 = Point::new(middle - 50.0 / 6.0, y - h);
        let c2 = Point::new(middle + 50.0 / 6.0, y - h);
        flatten_cubic(&mut out, start, c1, c2, end, 0);
        start = end;
        if alternate {
            h = -h;
        }
    }
    out
}

/// `n` half-periods of a wave, alternating below and above the axis.
pub fn wave(n: usize) -> Polyline {
    humps(n, true)
}

/// `n` arches on the same side of the axis.
pub fn arches(n: usize) -> Polyline {
    humps(n, false)
}

/// Circle of radius 50 starting on its left edge, open by π/8.
pub fn open_circle() -> Polyline {
    let center = Point::new(50.0, 50.0);
    let radius = 50.0;
    let extent = 2.0 * PI - PI / 8.0;
    let mut out = Polyline::new();
    let mut angle = 0.0;
    while angle < extent {
        out.push(
            center.x - radius * angle.cos(),
            center.y - radius * angle.sin(),
        );
        angle += ANGLE_STEP;
    }
    out.push(center.x - radius * extent.cos(), center.y - radius * extent.sin());
    out
}

/// Loop shaped like a lowercase gamma.
pub fn gamma() -> Polyline {
    let start = Point::new(0.0, 0.0);
    let top = Point::new(50.0, 100.0);
    let mut out = Polyline::new();
    out.push_point(start);
    flatten_cubic(
        &mut out,
        start,
        Point::new(100.0, 50.0),
        Point::new(100.0, 100.0),
        top,
        0,
    );
    flatten_cubic(
        &mut out,
        top,
        Point::new(0.0, 100.0),
        Point::new(0.0, 50.0),
        Point::new(100.0, 0.0),
        0,
    );
    out
}

/// U shape with rounded bottom corners.
pub fn u_shape() -> Polyline {
    let mut out = polyline(&[(0.0, 0.0), (0.0, 50.0)]);
    flatten_quad(
        &mut out,
        Point::new(0.0, 50.0),
        Point::new(0.0, 100.0),
        Point::new(50.0, 100.0),
    );
    flatten_quad(
        &mut out,
        Point::new(50.0, 100.0),
        Point::new(100.0, 100.0),
        Point::new(100.0, 50.0),
    );
    out.push(100.0, 0.0);
    out
}

/// Rotate a shape about the origin.
pub fn rotate(points: &Polyline, angle: f64) -> Polyline {
    let mut out = points.clone();
    out.rotate(angle);
    out
}

/// Mirror a shape within its own bounding box.
pub fn mirror(points: &Polyline, axis: Mirror) -> Polyline {
    let Some(bounds) = points.bounds() else {
        return Polyline::new();
    };
    points
        .iter()
        .map(|p| match axis {
            Mirror::Vertical => (bounds.max.x - p.x + bounds.min.x, p.y),
            Mirror::Horizontal => (p.x, bounds.max.y - p.y + bounds.min.y),
        })
        .collect()
}

/// Shape-matching classifier preloaded with the standard gesture set:
/// V, U, gamma, line, circle, cross, spiral, helix, wave, arch, zigzag and
/// angle shapes in several orientations.
pub fn automatic_classifier() -> RecogResult<ShapeMatchingClassifier> {
    let v = v_shape();
    let u = u_shape();
    let l = line();
    let x = cross();

    let mut templates = vec![
        ("V1".to_string(), v.clone()),
        ("V2".to_string(), rotate(&v, PI)),
        ("U1".to_string(), u.clone()),
        ("U2".to_string(), rotate(&u, PI)),
        ("Gamma1".to_string(), gamma()),
        ("V3".to_string(), rotate(&v, PI / 2.0)),
        ("V4".to_string(), rotate(&v, 3.0 * PI / 2.0)),
        ("V5".to_string(), mirror(&rotate(&v, PI), Mirror::Vertical)),
        ("Line1".to_string(), l.clone()),
        ("Line2".to_string(), rotate(&l, PI)),
        ("Line3".to_string(), rotate(&l, PI / 2.0)),
        ("Line4".to_string(), rotate(&l, 3.0 * PI / 2.0)),
        ("O1".to_string(), open_circle()),
        ("X1".to_string(), x.clone()),
        ("X2".to_string(), mirror(&x, Mirror::Vertical)),
        ("X3".to_string(), mirror(&x, Mirror::Horizontal)),
        ("Spiral1".to_string(), spiral(1.5, 10.0, 10.0)),
        ("Helix1".to_string(), helix(2.0, 1.5, 50.0, 50.0, 50.0, 20.0)),
    ];
    for n in 1..=4 {
        templates.push((format!("Wave{n}"), wave(n)));
    }
    for n in 1..=4 {
        templates.push((format!("Arche{n}"), arches(n)));
    }
    for n in 1..=4 {
        templates.push((format!("ZigZag{n}"), zigzag(n)));
    }
    templates.push(("Angle1".to_string(), l_shape()));

    let mut classifier = ShapeMatchingClassifier::new();
    for (name, template) in &templates {
        classifier.add_class_with_template(name, template)?;
    }
    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_points() {
        let z = zigzag(2);
        assert_eq!(z.len(), 5);
        assert_eq!(z.last(), Some(Point::new(200.0, 0.0)));
    }

    #[test]
    fn test_curves_stay_near_control_hull() {
        for shape in [wave(3), arches(2), gamma(), u_shape()] {
            let b = shape.bounds().unwrap();
            assert!(b.min.x >= -1e-9 && b.max.x <= 150.0 + 1e-9, "{b:?}");
            assert!(shape.len() > 4);
        }
        let w = wave(2);
        assert_eq!(w.first(), Some(Point::new(0.0, 50.0)));
        assert_eq!(w.last(), Some(Point::new(100.0, 50.0)));
    }

    #[test]
    fn test_mirror_keeps_bounds() {
        let v = rotate(&v_shape(), PI / 3.0);
        for axis in [Mirror::Vertical, Mirror::Horizontal] {
            let m = mirror(&v, axis);
            let (a, b) = (v.bounds().unwrap(), m.bounds().unwrap());
            assert!(a.min.distance(&b.min) < 1e-9 && a.max.distance(&b.max) < 1e-9);
        }
        let m = mirror(&v_shape(), Mirror::Vertical);
        assert_eq!(m.first(), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_rotate_about_origin() {
        let r = rotate(&line(), PI);
        let first = r.first().unwrap();
        assert!(first.distance(&Point::new(0.0, -50.0)) < 1e-9);
    }

    #[test]
    fn test_open_circle_gap() {
        let c = open_circle();
        let (first, last) = (c.first().unwrap(), c.last().unwrap());
        assert_eq!(first, Point::new(0.0, 50.0));
        let gap = first.distance(&last);
        // chord of π/8 on a radius-50 circle
        let expected = 2.0 * 50.0 * (PI / 16.0).sin();
        assert!((gap - expected).abs() < 1e-9, "gap={gap}");
    }
}
