//! gesture-test - Regression test framework for the gesture crates
//!
//! Provides [`RegParams`], which numbers and records every comparison made
//! by a regression test, plus deterministic generators for jittered
//! training gestures so tests need no random-number dependency.
//!
//! # Usage
//!
//! ```ignore
//! use gesture_test::RegParams;
//!
//! let mut rp = RegParams::new("rubine");
//! rp.compare_values(13.0, features.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" for verbose output

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use gesture_core::{Gesture, Point};
use std::path::PathBuf;

/// Deterministic pseudo-random source (linear congruential generator).
#[derive(Debug, Clone)]
pub struct Jitter {
    state: u32,
}

impl Jitter {
    /// Create a generator from a seed.
    pub fn new(seed: u32) -> Self {
        Self {
            state: 1_103_515_245u32.wrapping_mul(seed).wrapping_add(12345),
        }
    }

    /// Next value uniformly spread over `[-amplitude, amplitude]`.
    pub fn next_offset(&mut self, amplitude: f64) -> f64 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        let r = ((self.state >> 16) & 0x7fff) as f64 / 32767.0;
        (2.0 * r - 1.0) * amplitude
    }

    /// Displace every point by an independent offset in each coordinate.
    pub fn perturb(&mut self, points: &[(f64, f64)], amplitude: f64) -> Vec<(f64, f64)> {
        points
            .iter()
            .map(|&(x, y)| (x + self.next_offset(amplitude), y + self.next_offset(amplitude)))
            .collect()
    }
}

/// Build an untimed gesture from coordinate pairs.
///
/// # Panics
///
/// Panics if `points` is empty.
pub fn gesture(points: &[(f64, f64)]) -> Gesture {
    Gesture::from_points(points.iter().copied()).expect("non-empty gesture")
}

/// Build a timed gesture, sampling one point every `interval_ms`.
///
/// # Panics
///
/// Panics if `points` is empty.
pub fn timed_gesture(points: &[(f64, f64)], interval_ms: i64) -> Gesture {
    Gesture::from_timed_points(
        points
            .iter()
            .zip(0i64..)
            .map(|(&(x, y), i)| (x, y, i * interval_ms)),
    )
    .expect("non-empty gesture")
}

/// `count` jittered copies of a shape, each displaced by up to `amplitude`.
pub fn jittered_gestures(
    shape: &[(f64, f64)],
    count: usize,
    amplitude: f64,
    jitter: &mut Jitter,
) -> Vec<Gesture> {
    (0..count)
        .map(|_| gesture(&jitter.perturb(shape, amplitude)))
        .collect()
}

/// Densify a polyline by inserting `per_segment − 1` evenly spaced points
/// inside every segment.
pub fn densify(points: &[(f64, f64)], per_segment: usize) -> Vec<(f64, f64)> {
    let per_segment = per_segment.max(1);
    let mut out = Vec::new();
    for w in points.windows(2) {
        let (a, b) = (Point::from(w[0]), Point::from(w[1]));
        for k in 0..per_segment {
            let t = k as f64 / per_segment as f64;
            out.push((a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)));
        }
    }
    if let Some(&last) = points.last() {
        out.push(last);
    }
    out
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // gesture-test is at crates/gesture-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/target/regout", workspace_root())
}

/// Path for a regression output file, creating the directory if needed.
pub fn regout_path(name: &str) -> TestResult<PathBuf> {
    let dir = regout_dir();
    std::fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(PathBuf::from(dir).join(name))
}
