//! Type definitions for the shape-matching classifier

use crate::error::{RecogError, RecogResult};
use gesture_core::{Gesture, Normalization, Polyline, normalize};
use std::f64::consts::PI;

/// Default number of resampled points.
pub const DEFAULT_NUM_POINTS: usize = 100;

/// Default side of the reference square.
pub const DEFAULT_SIZE: f64 = 100.0;

/// Default rejection threshold on the mean point distance.
pub const DEFAULT_MAX_DISTANCE: f64 = 30.0;

/// Default shortest stroke that is classified at all.
pub const DEFAULT_MIN_STROKE_LENGTH: f64 = 20.0;

/// Rotation-invariant matching parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSearch {
    /// Rotations in `[-half_range, half_range]` radians are searched
    pub half_range: f64,
    /// Bracket width at which the search stops, in radians
    pub tolerance: f64,
}

impl Default for RotationSearch {
    fn default() -> Self {
        Self {
            half_range: PI / 4.0,
            tolerance: PI / 90.0,
        }
    }
}

/// Options for [`ShapeMatchingClassifier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeMatchingOptions {
    /// Number of points strokes are resampled to (default: 100)
    pub num_points: usize,
    /// Side of the square strokes are scaled to (default: 100.0)
    pub size: f64,
    /// Rotate strokes so their indicative angle is zero (default: false)
    pub rotate_to_zero: bool,
    /// Search the best rotation when comparing to a template
    /// (default: None)
    pub rotation: Option<RotationSearch>,
    /// Largest accepted distance to the nearest template (default: 30.0)
    pub max_distance: f64,
    /// Strokes with a shorter path are never classified (default: 20.0)
    pub min_stroke_length: f64,
}

impl Default for ShapeMatchingOptions {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
            size: DEFAULT_SIZE,
            rotate_to_zero: false,
            rotation: None,
            max_distance: DEFAULT_MAX_DISTANCE,
            min_stroke_length: DEFAULT_MIN_STROKE_LENGTH,
        }
    }
}

impl ShapeMatchingOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotation-invariant preset: 64 points, indicative angle rotated to
    /// zero and a best-angle search over ±π/4. Strokes of any length are
    /// classified.
    pub fn dollar1() -> Self {
        Self {
            num_points: 64,
            rotate_to_zero: true,
            rotation: Some(RotationSearch::default()),
            min_stroke_length: 0.0,
            ..Self::default()
        }
    }

    /// Set the number of resampled points
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// Set the side of the reference square
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Enable or disable rotation to the indicative angle
    pub fn with_rotate_to_zero(mut self, rotate_to_zero: bool) -> Self {
        self.rotate_to_zero = rotate_to_zero;
        self
    }

    /// Set the rotation search
    pub fn with_rotation(mut self, rotation: Option<RotationSearch>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the rejection threshold
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Set the minimum stroke length
    pub fn with_min_stroke_length(mut self, min_stroke_length: f64) -> Self {
        self.min_stroke_length = min_stroke_length;
        self
    }

    /// Normalization applied to inputs and templates.
    pub fn normalization(&self) -> Normalization {
        Normalization {
            num_points: self.num_points,
            size: self.size,
            rotate_to_zero: self.rotate_to_zero,
        }
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if self.num_points < 2 {
            return Err(RecogError::InvalidParameter(
                "num_points must be at least 2".to_string(),
            ));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(RecogError::InvalidParameter(
                "size must be positive".to_string(),
            ));
        }
        if self.max_distance.is_nan() || self.max_distance < 0.0 {
            return Err(RecogError::InvalidParameter(
                "max_distance must be non-negative".to_string(),
            ));
        }
        if self.min_stroke_length.is_nan() || self.min_stroke_length < 0.0 {
            return Err(RecogError::InvalidParameter(
                "min_stroke_length must be non-negative".to_string(),
            ));
        }
        if let Some(rotation) = self.rotation {
            if rotation.half_range.is_nan() || !(0.0..=PI).contains(&rotation.half_range) {
                return Err(RecogError::InvalidParameter(
                    "rotation half_range must be in [0, π]".to_string(),
                ));
            }
            if rotation.tolerance.is_nan() || rotation.tolerance <= 0.0 {
                return Err(RecogError::InvalidParameter(
                    "rotation tolerance must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// A named class of template strokes.
///
/// `templates[i]` is the normalized form of `examples[i]`. A class without
/// examples is matched against its directly set `template` instead, which
/// is kept both as given (`source`) and normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeClass {
    pub(crate) name: String,
    pub(crate) source: Option<Polyline>,
    pub(crate) template: Option<Polyline>,
    pub(crate) templates: Vec<Polyline>,
    pub(crate) examples: Vec<Gesture>,
}

impl ShapeClass {
    /// Create an empty class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            template: None,
            templates: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directly set template, normalized.
    pub fn template(&self) -> Option<&Polyline> {
        self.template.as_ref()
    }

    /// Directly set template as given.
    pub fn template_source(&self) -> Option<&Polyline> {
        self.source.as_ref()
    }

    pub(crate) fn set_template(&mut self, source: Polyline, params: &Normalization) {
        self.template = Some(normalize(&source, params));
        self.source = Some(source);
    }

    /// Normalized examples.
    pub fn templates(&self) -> &[Polyline] {
        &self.templates
    }

    pub fn examples(&self) -> &[Gesture] {
        &self.examples
    }

    pub fn num_examples(&self) -> usize {
        self.examples.len()
    }

    /// Templates an input is compared against.
    pub fn candidates(&self) -> &[Polyline] {
        if self.templates.is_empty() {
            self.template.as_slice()
        } else {
            &self.templates
        }
    }

    pub(crate) fn add_example(&mut self, example: Gesture, params: &Normalization) {
        self.templates.push(normalize(example.points(), params));
        self.examples.push(example);
    }

    pub(crate) fn remove_example(&mut self, example: &Gesture) -> bool {
        let Some(index) = self.examples.iter().position(|g| g == example) else {
            return false;
        };
        self.examples.remove(index);
        self.templates.remove(index);
        true
    }
}

/// Outcome of [`ShapeMatchingClassifier::classify_and_resample`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedAndResampled {
    /// Recognized class
    pub name: String,
    /// Distance to the nearest template
    pub distance: f64,
    /// The normalized input
    pub input: Polyline,
    /// The nearest template
    pub template: Polyline,
}

/// Template-matching gesture classifier.
///
/// Every stroke is resampled, scaled to a square and centered. An input is
/// assigned to the class owning the nearest template, measured as the mean
/// distance between corresponding points, optionally minimized over a
/// range of rotations. The match is rejected when that distance exceeds
/// the threshold.
#[derive(Debug, Clone, Default)]
pub struct ShapeMatchingClassifier {
    pub(crate) classes: Vec<ShapeClass>,
    pub(crate) options: ShapeMatchingOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_validate() {
        assert!(ShapeMatchingOptions::new().validate().is_ok());
        assert!(ShapeMatchingOptions::dollar1().validate().is_ok());
        assert!(ShapeMatchingOptions::new().with_num_points(1).validate().is_err());
        assert!(ShapeMatchingOptions::new().with_size(0.0).validate().is_err());
        assert!(
            ShapeMatchingOptions::new()
                .with_max_distance(f64::NAN)
                .validate()
                .is_err()
        );
        let bad = RotationSearch {
            half_range: 1.0,
            tolerance: 0.0,
        };
        assert!(ShapeMatchingOptions::new().with_rotation(Some(bad)).validate().is_err());
        let wide = RotationSearch {
            half_range: 1e9,
            tolerance: 1e-9,
        };
        assert!(ShapeMatchingOptions::new().with_rotation(Some(wide)).validate().is_err());
        let half_turn = RotationSearch {
            half_range: PI,
            tolerance: 0.01,
        };
        assert!(ShapeMatchingOptions::new().with_rotation(Some(half_turn)).validate().is_ok());
    }

    #[test]
    fn test_dollar1_preset() {
        let o = ShapeMatchingOptions::dollar1();
        assert_eq!(o.num_points, 64);
        assert!(o.rotate_to_zero);
        assert_eq!(o.rotation, Some(RotationSearch::default()));
        assert_eq!(o.max_distance, DEFAULT_MAX_DISTANCE);
        assert_eq!(o.min_stroke_length, 0.0);
    }

    #[test]
    fn test_candidates_prefer_examples() {
        let params = ShapeMatchingOptions::new().normalization();
        let mut class = ShapeClass::new("V");
        assert!(class.candidates().is_empty());
        let direct: Polyline = [(0.0, 0.0), (10.0, 0.0)].into_iter().collect();
        class.set_template(direct.clone(), &params);
        assert_eq!(class.template_source(), Some(&direct));
        assert_eq!(class.candidates().len(), 1);

        let g = Gesture::from_points([(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)]).unwrap();
        class.add_example(g.clone(), &params);
        assert_eq!(class.candidates(), class.templates());
        assert_eq!(class.templates()[0].len(), 100);
        assert!(class.remove_example(&g));
        assert!(class.templates().is_empty());
        assert!(!class.remove_example(&g));
    }
}
