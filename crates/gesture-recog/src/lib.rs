//! gesture-recog - Trainable gesture classifiers
//!
//! This crate provides two classifier families over captured strokes:
//!
//! - **Statistical classification**: thirteen geometric and kinematic
//!   features per stroke, a pooled-covariance linear discriminant per
//!   class, and rejection by Mahalanobis distance
//! - **Shape matching**: normalized template comparison with an optional
//!   rotation search
//!
//! Both implement [`GestureClassifier`] and persist to a big-endian binary
//! format.
//!
//! # Quick Start
//!
//! ```
//! use gesture_core::Gesture;
//! use gesture_recog::factory::automatic_classifier;
//!
//! let classifier = automatic_classifier().unwrap();
//! let stroke = Gesture::from_points([(0.0, 50.0), (100.0, 50.0)]).unwrap();
//! let result = classifier.classify(&stroke).unwrap();
//! assert_eq!(result.name(), Some("Line1"));
//! ```
//!
//! # Modules
//!
//! - [`rubine`]: Statistical classifier
//! - [`shape`]: Shape-matching classifier
//! - [`factory`]: Predefined template shapes

mod classifier;
mod error;
pub mod factory;
pub mod rubine;
pub mod shape;

pub use classifier::{CompileState, GestureClassifier, Recognition, Score};
pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use rubine::{RubineClass, RubineClassifier, RubineOptions};
pub use shape::{
    ClassifiedAndResampled, RotationSearch, ShapeClass, ShapeMatchingClassifier,
    ShapeMatchingOptions,
};

// Re-export core for convenience
pub use gesture_core;
