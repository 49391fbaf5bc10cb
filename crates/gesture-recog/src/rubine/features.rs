//! Feature extraction for the statistical classifier
//!
//! Thirteen geometric and kinematic features are computed from a stroke.
//! Segments shorter than [`DIST_SQ_THRESHOLD`] (squared) are skipped so that
//! jitter at the pointer's resolution does not inflate the angle sums.

use gesture_core::Gesture;

/// Number of features.
pub const NFEATURES: usize = 13;

/// A feature vector, indexed by the `PF_*` constants.
pub type FeatureVector = [f64; NFEATURES];

/// Cosine of the initial direction
pub const PF_INIT_COS: usize = 0;
/// Sine of the initial direction
pub const PF_INIT_SIN: usize = 1;
/// Length of the bounding-box diagonal
pub const PF_BB_LEN: usize = 2;
/// Angle of the bounding-box diagonal
pub const PF_BB_TH: usize = 3;
/// Distance between first and last point
pub const PF_SE_LEN: usize = 4;
/// Cosine of the start-to-end direction
pub const PF_SE_COS: usize = 5;
/// Sine of the start-to-end direction
pub const PF_SE_SIN: usize = 6;
/// Arc length
pub const PF_LEN: usize = 7;
/// Total signed turning angle
pub const PF_TH: usize = 8;
/// Total absolute turning angle
pub const PF_ATH: usize = 9;
/// Sum of squared turning angles
pub const PF_SQTH: usize = 10;
/// Duration
pub const PF_DUR: usize = 11;
/// Maximum speed
pub const PF_MAXV: usize = 12;

/// Squared distance below which a segment or direction is ignored.
pub const DIST_SQ_THRESHOLD: f64 = 3.0 * 3.0;

/// Squared start-to-end length at which its direction gets full weight.
pub const SE_TH_ROLLOFF: f64 = 4.0 * 4.0;

/// Start-to-end length below which its direction is zero.
pub const EPSILON: f64 = 1.0e-4;

/// Compute the feature vector of a gesture.
///
/// Gestures with fewer than three points yield an all-zero vector.
pub fn compute_features(gesture: &Gesture) -> FeatureVector {
    let mut fv = [0.0; NFEATURES];
    let points = gesture.points();
    if points.len() < 3 {
        return fv;
    }

    let start = gesture.start();
    let end = gesture.end();

    // initial direction, from the first to the third point
    if let Some(third) = points.get(2) {
        let (dx, dy) = (third.x - start.x, third.y - start.y);
        let dist2 = dx * dx + dy * dy;
        if dist2 > DIST_SQ_THRESHOLD {
            let d = dist2.sqrt();
            fv[PF_INIT_COS] = dx / d;
            fv[PF_INIT_SIN] = dy / d;
        }
    }

    let bounds = gesture.bounds();
    let bblen = bounds.diagonal();
    fv[PF_BB_LEN] = bblen;
    if bblen * bblen > DIST_SQ_THRESHOLD {
        fv[PF_BB_TH] = bounds.height().atan2(bounds.width());
    }

    let (sx, sy) = (end.x - start.x, end.y - start.y);
    let selen = (sx * sx + sy * sy).sqrt();
    fv[PF_SE_LEN] = selen;
    let factor = (selen * selen / SE_TH_ROLLOFF).min(1.0);
    let factor = if selen > EPSILON { factor / selen } else { 0.0 };
    fv[PF_SE_COS] = sx * factor;
    fv[PF_SE_SIN] = sy * factor;

    let mut length = 0.0;
    let mut rotation = 0.0;
    let mut abs_rotation = 0.0;
    let mut sharpness = 0.0;
    let mut max_speed: f64 = 0.0;

    // index of the last point that was not skipped
    let mut previous = 0;
    // direction of the last accepted segment
    let mut last_delta: Option<(f64, f64)> = None;
    for (i, next) in points.iter().enumerate().skip(1) {
        let Some(prev) = points.get(previous) else {
            break;
        };
        let del = (prev.x - next.x, prev.y - next.y);
        let magsq = del.0 * del.0 + del.1 * del.1;
        if magsq <= DIST_SQ_THRESHOLD {
            continue;
        }
        let dist = magsq.sqrt();
        length += dist;

        if let Some(delta) = last_delta {
            let cross = del.0 * delta.1 - delta.0 * del.1;
            let dot = del.0 * delta.0 + del.1 * delta.1;
            let th = cross.atan2(dot);
            rotation += th;
            abs_rotation += th.abs();
            sharpness += th * th;

            if let (Some(t_prev), Some(t_next)) = (gesture.time(previous), gesture.time(i)) {
                let elapsed = (t_next - t_prev) as f64;
                if elapsed > 0.0 {
                    max_speed = max_speed.max(dist / elapsed);
                }
            }
        }

        last_delta = Some(del);
        previous = i;
    }

    fv[PF_LEN] = length;
    fv[PF_TH] = rotation;
    fv[PF_ATH] = abs_rotation;
    fv[PF_SQTH] = sharpness;
    fv[PF_DUR] = gesture.duration() as f64 * 0.01;
    fv[PF_MAXV] = max_speed * 10000.0;
    fv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(points: &[(f64, f64)]) -> Gesture {
        Gesture::from_points(points.iter().copied()).unwrap()
    }

    #[test]
    fn test_short_gesture_all_zero() {
        assert_eq!(compute_features(&gesture(&[(0.0, 0.0), (100.0, 50.0)])), [0.0; NFEATURES]);
        assert_eq!(compute_features(&gesture(&[(4.0, 4.0)])), [0.0; NFEATURES]);
    }

    #[test]
    fn test_right_angle() {
        // y grows downwards on screen; a left turn in this frame is negative
        let fv = compute_features(&gesture(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
        assert!((fv[PF_INIT_COS] - 1.0 / 2f64.sqrt()).abs() < 1e-12);
        assert!((fv[PF_LEN] - 20.0).abs() < 1e-12);
        assert!((fv[PF_TH].abs() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((fv[PF_ATH] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((fv[PF_BB_TH] - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(fv[PF_DUR], 0.0);
        assert_eq!(fv[PF_MAXV], 0.0);
    }

    #[test]
    fn test_close_points_skipped() {
        let plain = compute_features(&gesture(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]));
        let noisy = compute_features(&gesture(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (11.0, 1.0),
            (20.0, 0.0),
        ]));
        assert_eq!(plain[PF_TH], 0.0);
        // the 1-pixel wiggle is below the threshold and ignored
        assert!((noisy[PF_LEN] - 20.0).abs() < 1e-12);
        assert_eq!(noisy[PF_TH], 0.0);
    }

    #[test]
    fn test_start_end_rolloff() {
        // start and end 2 apart: factor = (4/16)/2
        let fv = compute_features(&gesture(&[(0.0, 0.0), (50.0, 50.0), (2.0, 0.0)]));
        assert!((fv[PF_SE_LEN] - 2.0).abs() < 1e-12);
        assert!((fv[PF_SE_COS] - 0.25).abs() < 1e-12);
        assert_eq!(fv[PF_SE_SIN], 0.0);
    }

    #[test]
    fn test_duration_and_speed() {
        let g = Gesture::from_timed_points([
            (0.0, 0.0, 0),
            (10.0, 0.0, 10),
            (20.0, 0.0, 20),
            (60.0, 0.0, 30),
        ])
        .unwrap();
        let fv = compute_features(&g);
        assert!((fv[PF_DUR] - 0.3).abs() < 1e-12);
        // fastest segment: 40 units in 10 ms
        assert!((fv[PF_MAXV] - 4.0 * 10000.0).abs() < 1e-9);
    }
}
