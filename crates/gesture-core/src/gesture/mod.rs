//! Gesture - A captured stroke
//!
//! A [`Gesture`] is an immutable, non-empty sequence of points, each
//! optionally paired with a capture timestamp in milliseconds. Either every
//! point carries a timestamp or none does, and timestamps never decrease.

mod serial;

pub use serial::MAX_GESTURE_SIZE;

use crate::error::{Error, Result};
use crate::polyline::{Bounds, Point, Polyline, path_length};

/// A completed pointer stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    points: Polyline,
    times: Option<Vec<i64>>,
}

impl Gesture {
    /// Create an untimed gesture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if `points` is empty.
    pub fn new(points: Polyline) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyInput("gesture has no points"));
        }
        Ok(Self {
            points,
            times: None,
        })
    }

    /// Create a gesture with one timestamp per point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if `points` is empty, and
    /// [`Error::InvalidTimestamps`] if the timestamp count differs from the
    /// point count or the timestamps decrease.
    pub fn with_times(points: Polyline, times: Vec<i64>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyInput("gesture has no points"));
        }
        if times.len() != points.len() {
            return Err(Error::InvalidTimestamps(format!(
                "{} timestamps for {} points",
                times.len(),
                points.len()
            )));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::InvalidTimestamps(format!(
                "timestamp {} at index {} precedes {}",
                times[i + 1],
                i + 1,
                times[i]
            )));
        }
        Ok(Self {
            points,
            times: Some(times),
        })
    }

    /// Build an untimed gesture from coordinate pairs.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(points.into_iter().collect())
    }

    /// Build a timed gesture from `(x, y, t)` triples.
    pub fn from_timed_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64, i64)>,
    {
        let mut polyline = Polyline::new();
        let mut times = Vec::new();
        for (x, y, t) in points {
            polyline.push(x, y);
            times.push(t);
        }
        Self::with_times(polyline, times)
    }

    /// Number of points (at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a constructed gesture.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point sequence.
    pub fn points(&self) -> &Polyline {
        &self.points
    }

    /// Timestamps, if the gesture is timed.
    pub fn times(&self) -> Option<&[i64]> {
        self.times.as_deref()
    }

    pub fn is_timed(&self) -> bool {
        self.times.is_some()
    }

    /// Point at `index`.
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index)
    }

    /// Timestamp at `index`, if timed.
    pub fn time(&self, index: usize) -> Option<i64> {
        self.times.as_ref()?.get(index).copied()
    }

    /// First point.
    pub fn start(&self) -> Point {
        self.points.first().unwrap_or_default()
    }

    /// Last point.
    pub fn end(&self) -> Point {
        self.points.last().unwrap_or_default()
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Bounds {
        self.points.bounds().unwrap_or(Bounds {
            min: Point::default(),
            max: Point::default(),
        })
    }

    /// Minimum corner of the bounding box.
    pub fn min(&self) -> Point {
        self.bounds().min
    }

    /// Maximum corner of the bounding box.
    pub fn max(&self) -> Point {
        self.bounds().max
    }

    /// Last timestamp minus first, or 0 for an untimed gesture.
    pub fn duration(&self) -> i64 {
        match self.times.as_deref() {
            Some([first, .., last]) => last - first,
            _ => 0,
        }
    }

    /// Arc length of the stroke.
    pub fn path_length(&self) -> f64 {
        path_length(&self.points)
    }

    /// Consume the gesture and return its points.
    pub fn into_points(self) -> Polyline {
        self.points
    }
}

/// Incremental builder used by capture layers.
///
/// Points are appended as they arrive; [`GestureBuilder::build`] validates
/// the result.
#[derive(Debug, Clone, Default)]
pub struct GestureBuilder {
    points: Polyline,
    times: Vec<i64>,
    untimed: usize,
}

impl GestureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an untimed point.
    pub fn point(mut self, x: f64, y: f64) -> Self {
        self.points.push(x, y);
        self.untimed += 1;
        self
    }

    /// Append a timestamped point.
    pub fn timed_point(mut self, x: f64, y: f64, t: i64) -> Self {
        self.points.push(x, y);
        self.times.push(t);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when no point was added and
    /// [`Error::InvalidTimestamps`] when timed and untimed points are mixed
    /// or timestamps decrease.
    pub fn build(self) -> Result<Gesture> {
        if self.times.is_empty() {
            return Gesture::new(self.points);
        }
        if self.untimed > 0 {
            return Err(Error::InvalidTimestamps(format!(
                "{} of {} points have no timestamp",
                self.untimed,
                self.points.len()
            )));
        }
        Gesture::with_times(self.points, self.times)
    }
}
