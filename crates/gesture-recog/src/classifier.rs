//! Classifier interface shared by both classifier families

use crate::error::RecogResult;
use gesture_core::Gesture;
use std::io::Write;
use std::path::Path;

/// A class name paired with a distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// Class name
    pub name: String,
    /// Distance from the input to the class (smaller is closer)
    pub distance: f64,
}

impl Score {
    pub fn new(name: impl Into<String>, distance: f64) -> Self {
        Self {
            name: name.into(),
            distance,
        }
    }
}

/// Outcome of a classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    /// The input matched a class within the rejection threshold
    Recognized(Score),
    /// No class matched; `best` is the closest class when one was scored
    Unrecognized { best: Option<Score> },
}

impl Recognition {
    pub fn is_recognized(&self) -> bool {
        matches!(self, Recognition::Recognized(_))
    }

    /// Name of the recognized class, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Recognition::Recognized(score) => Some(&score.name),
            Recognition::Unrecognized { .. } => None,
        }
    }

    /// The winning or closest score.
    pub fn best(&self) -> Option<&Score> {
        match self {
            Recognition::Recognized(score) => Some(score),
            Recognition::Unrecognized { best } => best.as_ref(),
        }
    }
}

/// Whether a classifier's trained model reflects its current examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompileState {
    /// Examples or classes changed since the last compile
    #[default]
    Stale,
    /// The model is up to date
    Fresh,
}

/// Operations common to the statistical and the shape-matching classifier.
///
/// Classification takes `&mut self` because a classifier may retrain
/// lazily before scoring.
pub trait GestureClassifier {
    /// Add an empty class.
    fn add_class(&mut self, name: &str) -> RecogResult<()>;

    /// Remove a class and all its examples.
    fn remove_class(&mut self, name: &str) -> RecogResult<()>;

    /// Rename a class, keeping its examples and statistics.
    fn rename_class(&mut self, from: &str, to: &str) -> RecogResult<()>;

    /// Add a training example to a class.
    fn add_example(&mut self, name: &str, example: Gesture) -> RecogResult<()>;

    /// Remove the first example of a class equal to `example`.
    ///
    /// Returns `false` if the class holds no such example.
    fn remove_example(&mut self, name: &str, example: &Gesture) -> RecogResult<bool>;

    /// Remove `example` from every class; returns how many copies were removed.
    fn remove_gesture(&mut self, example: &Gesture) -> usize;

    /// Remove every class.
    fn reset(&mut self);

    /// Class names in insertion order.
    fn class_names(&self) -> Vec<&str>;

    /// Number of examples stored for a class.
    fn num_examples(&self, name: &str) -> RecogResult<usize>;

    /// Rejection threshold.
    fn max_distance(&self) -> f64;

    /// Set the rejection threshold.
    fn set_max_distance(&mut self, max_distance: f64) -> RecogResult<()>;

    /// Classify a gesture.
    fn classify(&mut self, gesture: &Gesture) -> RecogResult<Recognition>;

    /// Every scorable class, best match first.
    fn sorted_classes(&mut self, gesture: &Gesture) -> RecogResult<Vec<Score>>;

    /// Serialize the classifier definition.
    fn write_to_writer(&self, writer: &mut dyn Write) -> RecogResult<()>;

    /// Whether a class with this name exists.
    fn contains_class(&self, name: &str) -> bool {
        self.class_names().contains(&name)
    }

    /// Number of classes.
    fn num_classes(&self) -> usize {
        self.class_names().len()
    }

    /// Serialize the classifier definition to a byte vector.
    fn write_to_bytes(&self) -> RecogResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }

    /// Serialize the classifier definition to a file, creating or
    /// truncating it.
    fn write_to_file(&self, path: &Path) -> RecogResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        std::io::Write::flush(&mut writer)?;
        Ok(())
    }
}
