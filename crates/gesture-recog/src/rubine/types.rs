//! Type definitions for the statistical classifier

use super::features::{FeatureVector, NFEATURES, compute_features};
use crate::classifier::CompileState;
use crate::error::{RecogError, RecogResult};
use gesture_core::{FeatureMask, Gesture, Matrix};

/// Default rejection threshold on the Mahalanobis distance.
pub const DEFAULT_MAX_DISTANCE: f64 = 1000.0;

/// Options for [`RubineClassifier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubineOptions {
    /// Largest Mahalanobis distance to the winning class mean that is still
    /// accepted (default: 1000.0)
    pub max_distance: f64,
}

impl Default for RubineOptions {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

impl RubineOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rejection threshold
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if self.max_distance.is_nan() || self.max_distance < 0.0 {
            return Err(RecogError::InvalidParameter(
                "max_distance must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// A named class of examples with incrementally maintained statistics.
///
/// `mean` is the mean feature vector of the examples and `sum_cov` holds,
/// in its upper triangle, the sum of outer products of their deviations
/// from the mean. Both are updated on every add and remove.
#[derive(Debug, Clone, PartialEq)]
pub struct RubineClass {
    pub(crate) name: String,
    pub(crate) examples: Vec<Gesture>,
    pub(crate) mean: FeatureVector,
    pub(crate) sum_cov: Matrix,
}

impl RubineClass {
    /// Create an empty class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            examples: Vec::new(),
            mean: [0.0; NFEATURES],
            sum_cov: Matrix::zeros(NFEATURES, NFEATURES),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn examples(&self) -> &[Gesture] {
        &self.examples
    }

    pub fn num_examples(&self) -> usize {
        self.examples.len()
    }

    /// Mean feature vector.
    pub fn mean(&self) -> &FeatureVector {
        &self.mean
    }

    /// Upper-triangular sum of deviation outer products.
    pub fn sum_cov(&self) -> &Matrix {
        &self.sum_cov
    }

    /// Add an example and fold its features into the statistics.
    pub fn add_example(&mut self, example: Gesture) -> RecogResult<()> {
        let fv = compute_features(&example);
        self.examples.push(example);
        let n = self.examples.len() as f64;
        let nm1on = (n - 1.0) / n;
        let recipn = 1.0 / n;

        let deviation: Vec<f64> = fv.iter().zip(&self.mean).map(|(f, m)| f - m).collect();
        self.sum_cov.add_upper_outer(nm1on, &deviation)?;
        for (m, f) in self.mean.iter_mut().zip(&fv) {
            *m = nm1on * *m + recipn * f;
        }
        Ok(())
    }

    /// Remove the first example equal to `example` and undo its
    /// contribution to the statistics.
    ///
    /// Returns `false` if no such example is stored.
    pub fn remove_example(&mut self, example: &Gesture) -> RecogResult<bool> {
        let Some(index) = self.examples.iter().position(|g| g == example) else {
            return Ok(false);
        };
        let n = self.examples.len() as f64;
        self.examples.remove(index);
        if self.examples.is_empty() {
            self.mean = [0.0; NFEATURES];
            self.sum_cov = Matrix::zeros(NFEATURES, NFEATURES);
            return Ok(true);
        }

        let fv = compute_features(example);
        let nm1on = (n - 1.0) / n;
        let recipn = 1.0 / n;
        for (m, f) in self.mean.iter_mut().zip(&fv) {
            *m = (*m - recipn * f) / nm1on;
        }
        let deviation: Vec<f64> = fv.iter().zip(&self.mean).map(|(f, m)| f - m).collect();
        self.sum_cov.add_upper_outer(-nm1on, &deviation)?;
        Ok(true)
    }
}

/// Trained discriminant model.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Model {
    /// Inverse of the pooled covariance, full size
    pub(crate) inv_cov: Matrix,
    /// Features retained when the pooled covariance was singular
    pub(crate) mask: FeatureMask,
    /// Discriminant weights, one vector per class
    pub(crate) weights: Vec<Vec<f64>>,
    /// Discriminant constants, one per class
    pub(crate) constants: Vec<f64>,
}

/// Statistical linear-discriminant gesture classifier.
///
/// Training pools the per-class covariance estimates, inverts the pooled
/// matrix and derives one linear discriminant per class. Classification
/// picks the class with the largest discriminant and rejects the input if
/// its Mahalanobis distance to that class mean exceeds the threshold.
///
/// Training is lazy: every mutation marks the model
/// [`CompileState::Stale`] and the next classification recompiles it.
#[derive(Debug, Clone, Default)]
pub struct RubineClassifier {
    pub(crate) classes: Vec<RubineClass>,
    pub(crate) options: RubineOptions,
    pub(crate) state: CompileState,
    pub(crate) model: Option<Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(points: &[(f64, f64)]) -> Gesture {
        Gesture::from_points(points.iter().copied()).unwrap()
    }

    fn examples() -> Vec<Gesture> {
        vec![
            gesture(&[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)]),
            gesture(&[(2.0, 1.0), (48.0, 97.0), (103.0, 2.0)]),
            gesture(&[(0.0, 40.0), (30.0, 0.0), (60.0, 45.0), (90.0, 0.0)]),
        ]
    }

    #[test]
    fn test_mean_matches_direct_average() {
        let mut class = RubineClass::new("V");
        for g in examples() {
            class.add_example(g).unwrap();
        }
        let fvs: Vec<FeatureVector> = examples().iter().map(compute_features).collect();
        for i in 0..NFEATURES {
            let avg = fvs.iter().map(|f| f[i]).sum::<f64>() / 3.0;
            assert!((class.mean()[i] - avg).abs() < 1e-9, "feature {i}");
        }
        // sum of deviation products on the diagonal
        for i in 0..NFEATURES {
            let avg = class.mean()[i];
            let ss: f64 = fvs.iter().map(|f| (f[i] - avg).powi(2)).sum();
            assert!((class.sum_cov()[(i, i)] - ss).abs() < 1e-6 * (1.0 + ss), "feature {i}");
        }
    }

    #[test]
    fn test_add_remove_restores() {
        let mut class = RubineClass::new("V");
        let mut ex = examples();
        let extra = ex.pop().unwrap();
        for g in ex {
            class.add_example(g).unwrap();
        }
        let before = class.clone();
        class.add_example(extra.clone()).unwrap();
        assert!(class.remove_example(&extra).unwrap());
        for i in 0..NFEATURES {
            assert!((class.mean()[i] - before.mean()[i]).abs() < 1e-9);
            for j in 0..NFEATURES {
                let (a, b) = (class.sum_cov()[(i, j)], before.sum_cov()[(i, j)]);
                assert!((a - b).abs() < 1e-6 * (1.0 + b.abs()), "({i}, {j}): {a} vs {b}");
            }
        }
        assert_eq!(class.examples(), before.examples());
    }

    #[test]
    fn test_remove_last_resets() {
        let mut class = RubineClass::new("V");
        let g = examples().remove(0);
        class.add_example(g.clone()).unwrap();
        assert!(class.remove_example(&g).unwrap());
        assert_eq!(class.mean(), &[0.0; NFEATURES]);
        assert_eq!(class.sum_cov(), &Matrix::zeros(NFEATURES, NFEATURES));
        assert!(!class.remove_example(&g).unwrap());
    }

    #[test]
    fn test_options_validate() {
        assert!(RubineOptions::new().validate().is_ok());
        assert!(RubineOptions::new().with_max_distance(-1.0).validate().is_err());
    }
}
