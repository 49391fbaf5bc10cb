//! Template shape-matching gesture classifier
//!
//! Strokes are compared point by point after normalization: resampling to a
//! fixed number of equidistant points, scaling to a reference square and
//! centering on the centroid. [`ShapeMatchingOptions::dollar1`] adds
//! rotation to the indicative angle and a golden-section search for the
//! best residual rotation.

mod ident;
mod serial;
mod train;
mod types;

pub use types::{
    ClassifiedAndResampled, DEFAULT_MAX_DISTANCE, DEFAULT_MIN_STROKE_LENGTH, DEFAULT_NUM_POINTS,
    DEFAULT_SIZE, RotationSearch, ShapeClass, ShapeMatchingClassifier, ShapeMatchingOptions,
};

use crate::classifier::{GestureClassifier, Recognition, Score};
use crate::error::RecogResult;
use gesture_core::Gesture;
use std::io::Write;

impl GestureClassifier for ShapeMatchingClassifier {
    fn add_class(&mut self, name: &str) -> RecogResult<()> {
        ShapeMatchingClassifier::add_class(self, name)
    }

    fn remove_class(&mut self, name: &str) -> RecogResult<()> {
        ShapeMatchingClassifier::remove_class(self, name)
    }

    fn rename_class(&mut self, from: &str, to: &str) -> RecogResult<()> {
        ShapeMatchingClassifier::rename_class(self, from, to)
    }

    fn add_example(&mut self, name: &str, example: Gesture) -> RecogResult<()> {
        ShapeMatchingClassifier::add_example(self, name, example)
    }

    fn remove_example(&mut self, name: &str, example: &Gesture) -> RecogResult<bool> {
        ShapeMatchingClassifier::remove_example(self, name, example)
    }

    fn remove_gesture(&mut self, example: &Gesture) -> usize {
        ShapeMatchingClassifier::remove_gesture(self, example)
    }

    fn reset(&mut self) {
        ShapeMatchingClassifier::reset(self)
    }

    fn class_names(&self) -> Vec<&str> {
        ShapeMatchingClassifier::class_names(self)
    }

    fn num_examples(&self, name: &str) -> RecogResult<usize> {
        ShapeMatchingClassifier::num_examples(self, name)
    }

    fn max_distance(&self) -> f64 {
        self.options.max_distance
    }

    fn set_max_distance(&mut self, max_distance: f64) -> RecogResult<()> {
        ShapeMatchingClassifier::set_max_distance(self, max_distance)
    }

    fn classify(&mut self, gesture: &Gesture) -> RecogResult<Recognition> {
        ShapeMatchingClassifier::classify(self, gesture)
    }

    fn sorted_classes(&mut self, gesture: &Gesture) -> RecogResult<Vec<Score>> {
        ShapeMatchingClassifier::sorted_classes(self, gesture)
    }

    fn write_to_writer(&self, mut writer: &mut dyn Write) -> RecogResult<()> {
        ShapeMatchingClassifier::write_to_writer(self, &mut writer)
    }
}
