//! Statistical gesture classifier
//!
//! Each gesture is reduced to a fixed vector of thirteen features. Every
//! class keeps the mean of its examples' feature vectors and the scatter
//! matrix around that mean, both updated incrementally as examples come
//! and go. Training pools the class scatter into one covariance estimate
//! and derives a linear discriminant per class from its inverse.
//!
//! # Examples
//!
//! ```
//! use gesture_core::Gesture;
//! use gesture_recog::rubine::RubineClassifier;
//!
//! let mut classifier = RubineClassifier::new();
//! classifier.add_class("V").unwrap();
//! classifier.add_class("Line").unwrap();
//! classifier
//!     .add_example("V", Gesture::from_points([(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)]).unwrap())
//!     .unwrap();
//! classifier
//!     .add_example("Line", Gesture::from_points([(0.0, 50.0), (100.0, 50.0)]).unwrap())
//!     .unwrap();
//! assert_eq!(classifier.num_examples("V").unwrap(), 1);
//! ```

mod features;
mod ident;
mod serial;
mod train;
mod types;

pub use features::*;
pub use types::{DEFAULT_MAX_DISTANCE, RubineClass, RubineClassifier, RubineOptions};

use crate::classifier::{GestureClassifier, Recognition, Score};
use crate::error::RecogResult;
use gesture_core::Gesture;
use std::io::Write;

impl GestureClassifier for RubineClassifier {
    fn add_class(&mut self, name: &str) -> RecogResult<()> {
        RubineClassifier::add_class(self, name)
    }

    fn remove_class(&mut self, name: &str) -> RecogResult<()> {
        RubineClassifier::remove_class(self, name)
    }

    fn rename_class(&mut self, from: &str, to: &str) -> RecogResult<()> {
        RubineClassifier::rename_class(self, from, to)
    }

    fn add_example(&mut self, name: &str, example: Gesture) -> RecogResult<()> {
        RubineClassifier::add_example(self, name, example)
    }

    fn remove_example(&mut self, name: &str, example: &Gesture) -> RecogResult<bool> {
        RubineClassifier::remove_example(self, name, example)
    }

    fn remove_gesture(&mut self, example: &Gesture) -> usize {
        RubineClassifier::remove_gesture(self, example)
    }

    fn reset(&mut self) {
        RubineClassifier::reset(self)
    }

    fn class_names(&self) -> Vec<&str> {
        RubineClassifier::class_names(self)
    }

    fn num_examples(&self, name: &str) -> RecogResult<usize> {
        RubineClassifier::num_examples(self, name)
    }

    fn max_distance(&self) -> f64 {
        self.options.max_distance
    }

    fn set_max_distance(&mut self, max_distance: f64) -> RecogResult<()> {
        RubineClassifier::set_max_distance(self, max_distance)
    }

    fn classify(&mut self, gesture: &Gesture) -> RecogResult<Recognition> {
        RubineClassifier::classify(self, gesture)
    }

    fn sorted_classes(&mut self, gesture: &Gesture) -> RecogResult<Vec<Score>> {
        RubineClassifier::sorted_classes(self, gesture)
    }

    fn write_to_writer(&self, mut writer: &mut dyn Write) -> RecogResult<()> {
        RubineClassifier::write_to_writer(self, &mut writer)
    }
}
