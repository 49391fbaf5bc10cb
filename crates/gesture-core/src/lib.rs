//! Gesture Core - Data structures for 2-D gesture recognition
//!
//! This crate provides the building blocks shared by the classifiers:
//!
//! - [`Point`] / [`Polyline`] - Ordered point sequences and the
//!   normalization pipeline (resample, rotate, scale, translate)
//! - [`Gesture`] - An immutable captured stroke with optional timestamps
//! - [`linalg`] - Dense matrices, inversion, feature masks
//! - [`io`] - Big-endian binary primitives used by the persistence formats

pub mod error;
pub mod gesture;
pub mod io;
pub mod linalg;
pub mod polyline;

pub use error::{Error, Result};
pub use gesture::{Gesture, GestureBuilder};
pub use linalg::{FeatureMask, Inversion, Matrix, Recovered, fix_singular};
pub use polyline::{
    Bounds, GoldenSection, Normalization, Point, Polyline, PolylineIter, centroid,
    distance_at_angle, distance_at_best_angle, golden_section_search, normalize, path_distance,
    path_length, resample, rotate_by, rotate_to_zero, scale_to_square, translate_to_origin,
};
