//! Polyline - Ordered point sequences
//!
//! Arrays of double-precision coordinate pairs. Raw gesture strokes,
//! resampled templates and intermediate normalization results are all
//! polylines.
//!
//! # Storage layout
//!
//! Points are stored as separate X and Y vectors (SoA layout).

mod distance;
mod serial;
mod transform;

pub use distance::{
    GoldenSection, distance_at_angle, distance_at_best_angle, golden_section_search,
    path_distance, path_length,
};
pub use transform::{
    Normalization, centroid, normalize, resample, rotate_by, rotate_to_zero, scale_to_square,
    translate_to_origin,
};

use crate::error::{Error, Result};

/// A 2-D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f64 {
        self.min.distance(&self.max)
    }
}

/// Ordered sequence of points.
///
/// Stores 2D points as parallel x/y coordinate vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// X coordinates
    x: Vec<f64>,
    /// Y coordinates
    y: Vec<f64>,
}

impl Polyline {
    /// Create a new empty Polyline.
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Create a Polyline with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Create a Polyline from coordinate vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `x` and `y` have different lengths.
    pub fn from_vecs(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Get a point by index.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn get(&self, index: usize) -> Option<Point> {
        Some(Point::new(*self.x.get(index)?, *self.y.get(index)?))
    }

    /// First point, if any.
    pub fn first(&self) -> Option<Point> {
        self.get(0)
    }

    /// Last point, if any.
    pub fn last(&self) -> Option<Point> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Add a point.
    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Add a point.
    pub fn push_point(&mut self, p: Point) {
        self.push(p.x, p.y);
    }

    /// Remove and return the last point.
    pub fn pop(&mut self) -> Option<Point> {
        let x = self.x.pop()?;
        let y = self.y.pop()?;
        Some(Point::new(x, y))
    }

    /// Set a point at index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the index is out of bounds.
    pub fn set(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        self.x[index] = x;
        self.y[index] = y;
        Ok(())
    }

    /// Remove a point at index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the index is out of bounds.
    pub fn remove(&mut self, index: usize) -> Result<Point> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        Ok(Point::new(self.x.remove(index), self.y.remove(index)))
    }

    /// Insert a point at index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the index is beyond the length.
    pub fn insert(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        self.x.insert(index, x);
        self.y.insert(index, y);
        Ok(())
    }

    /// Clear all points.
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    /// Get X coordinates as a slice.
    pub fn x_coords(&self) -> &[f64] {
        &self.x
    }

    /// Get Y coordinates as a slice.
    pub fn y_coords(&self) -> &[f64] {
        &self.y
    }

    /// Compute the bounding box, or `None` if empty.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.first()?;
        let mut min = first;
        let mut max = first;
        for p in self.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Bounds { min, max })
    }

    /// Compute the centroid, or `None` if empty.
    pub fn centroid(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let sx: f64 = self.x.iter().sum();
        let sy: f64 = self.y.iter().sum();
        Some(Point::new(sx / n, sy / n))
    }

    /// Translate all points by (dx, dy).
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x.iter_mut().for_each(|x| *x += dx);
        self.y.iter_mut().for_each(|y| *y += dy);
    }

    /// Scale all points relative to origin.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.x.iter_mut().for_each(|x| *x *= sx);
        self.y.iter_mut().for_each(|y| *y *= sy);
    }

    /// Rotate all points around `center`.
    ///
    /// # Arguments
    ///
    /// * `angle` - Rotation angle in radians (counter-clockwise in a y-up frame).
    pub fn rotate_about(&mut self, center: Point, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        for (x, y) in self.x.iter_mut().zip(self.y.iter_mut()) {
            let dx = *x - center.x;
            let dy = *y - center.y;
            *x = dx * cos - dy * sin + center.x;
            *y = dx * sin + dy * cos + center.y;
        }
    }

    /// Rotate all points around the origin.
    pub fn rotate(&mut self, angle: f64) {
        self.rotate_about(Point::default(), angle);
    }

    /// Create an iterator over points.
    pub fn iter(&self) -> PolylineIter<'_> {
        PolylineIter {
            polyline: self,
            index: 0,
        }
    }
}

/// Iterator over Polyline points.
pub struct PolylineIter<'a> {
    polyline: &'a Polyline,
    index: usize,
}

impl Iterator for PolylineIter<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        let pt = self.polyline.get(self.index)?;
        self.index += 1;
        Some(pt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.polyline.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PolylineIter<'_> {}

impl<'a> IntoIterator for &'a Polyline {
    type Item = Point;
    type IntoIter = PolylineIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        let mut polyline = Self::with_capacity(upper.unwrap_or(lower));
        for p in iter {
            polyline.push_point(p);
        }
        polyline
    }
}

impl FromIterator<(f64, f64)> for Polyline {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        iter.into_iter().map(Point::from).collect()
    }
}
