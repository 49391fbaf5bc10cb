//! Gestures - Trainable 2-D pen and mouse gesture recognition
//!
//! # Overview
//!
//! A gesture is a single stroke captured from a pointing device. This
//! crate recognizes strokes with either of two classifiers:
//!
//! - A statistical classifier trained from examples, which rejects inputs
//!   far from every class mean
//! - A shape-matching classifier comparing normalized strokes to
//!   templates, optionally invariant to rotation
//!
//! # Example
//!
//! ```
//! use gestures::{Gesture, GestureClassifier, ShapeMatchingClassifier};
//! use gestures::recog::factory;
//!
//! let mut classifier = ShapeMatchingClassifier::new();
//! classifier.add_class_with_template("V", &factory::v_shape()).unwrap();
//! classifier.add_class_with_template("L", &factory::l_shape()).unwrap();
//!
//! let stroke = Gesture::from_points([(5.0, 0.0), (52.0, 98.0), (100.0, 3.0)]).unwrap();
//! let result = GestureClassifier::classify(&mut classifier, &stroke).unwrap();
//! assert_eq!(result.name(), Some("V"));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use gesture_core::*;

// Re-export the classifiers as a module to avoid name conflicts
pub use gesture_recog as recog;

pub use gesture_recog::{
    GestureClassifier, Recognition, RecogError, RecogResult, RubineClassifier, Score,
    ShapeMatchingClassifier,
};
