//! Class management and training for the statistical classifier

use tracing::{debug, warn};

use super::features::{FeatureVector, NFEATURES};
use super::types::{Model, RubineClass, RubineClassifier, RubineOptions};
use crate::classifier::CompileState;
use crate::error::{RecogError, RecogResult};
use gesture_core::linalg::{
    FeatureMask, Matrix, SINGULAR_EPSILON, fix_singular, mul_matrix, scalar_product,
};
use gesture_core::{Error, Gesture};

impl RubineClassifier {
    /// Create an empty classifier with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty classifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if the options are invalid.
    pub fn with_options(options: RubineOptions) -> RecogResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::default()
        })
    }

    pub fn options(&self) -> &RubineOptions {
        &self.options
    }

    /// Set the rejection threshold on the Mahalanobis distance.
    pub fn set_max_distance(&mut self, max_distance: f64) -> RecogResult<()> {
        let options = self.options.with_max_distance(max_distance);
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn state(&self) -> CompileState {
        self.state
    }

    fn invalidate(&mut self) {
        self.state = CompileState::Stale;
        self.model = None;
    }

    pub(crate) fn index_of(&self, name: &str) -> RecogResult<usize> {
        self.classes
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| RecogError::ClassNotFound(name.to_string()))
    }

    /// Look up a class.
    pub fn class(&self, name: &str) -> Option<&RubineClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// All classes in insertion order.
    pub fn classes(&self) -> &[RubineClass] {
        &self.classes
    }

    /// Add an empty class.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::DuplicateClass`] if the name is taken.
    pub fn add_class(&mut self, name: &str) -> RecogResult<()> {
        if self.class(name).is_some() {
            return Err(RecogError::DuplicateClass(name.to_string()));
        }
        self.classes.push(RubineClass::new(name));
        self.invalidate();
        Ok(())
    }

    /// Insert a fully built class, as done when loading a definition.
    pub(crate) fn push_class(&mut self, class: RubineClass) -> RecogResult<()> {
        if self.class(&class.name).is_some() {
            return Err(RecogError::DuplicateClass(class.name));
        }
        self.classes.push(class);
        self.invalidate();
        Ok(())
    }

    /// Remove a class and its examples.
    pub fn remove_class(&mut self, name: &str) -> RecogResult<()> {
        let index = self.index_of(name)?;
        self.classes.remove(index);
        self.invalidate();
        Ok(())
    }

    /// Rename a class; its examples and statistics are kept.
    pub fn rename_class(&mut self, from: &str, to: &str) -> RecogResult<()> {
        let index = self.index_of(from)?;
        if from != to && self.class(to).is_some() {
            return Err(RecogError::DuplicateClass(to.to_string()));
        }
        self.classes[index].name = to.to_string();
        self.invalidate();
        Ok(())
    }

    /// Add a training example to a class.
    pub fn add_example(&mut self, name: &str, example: Gesture) -> RecogResult<()> {
        let index = self.index_of(name)?;
        self.classes[index].add_example(example)?;
        self.invalidate();
        Ok(())
    }

    /// Remove the first example of a class equal to `example`.
    pub fn remove_example(&mut self, name: &str, example: &Gesture) -> RecogResult<bool> {
        let index = self.index_of(name)?;
        let removed = self.classes[index].remove_example(example)?;
        if removed {
            self.invalidate();
        }
        Ok(removed)
    }

    /// Remove `example` from every class that holds it.
    pub fn remove_gesture(&mut self, example: &Gesture) -> usize {
        let mut removed = 0;
        for class in &mut self.classes {
            if let Ok(true) = class.remove_example(example) {
                removed += 1;
            }
        }
        if removed > 0 {
            self.invalidate();
        }
        removed
    }

    /// Remove every class.
    pub fn reset(&mut self) {
        self.classes.clear();
        self.invalidate();
    }

    /// Class names in insertion order.
    pub fn class_names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.class(name).is_some()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Number of examples in a class.
    pub fn num_examples(&self, name: &str) -> RecogResult<usize> {
        Ok(self.classes[self.index_of(name)?].num_examples())
    }

    /// Examples of a class.
    pub fn examples(&self, name: &str) -> RecogResult<&[Gesture]> {
        Ok(self.classes[self.index_of(name)?].examples())
    }

    /// Copy of a class's mean feature vector.
    pub fn features(&self, name: &str) -> RecogResult<FeatureVector> {
        Ok(*self.classes[self.index_of(name)?].mean())
    }

    /// Discriminant weights per class, if compiled.
    pub fn weights(&self) -> Option<&[Vec<f64>]> {
        self.model.as_ref().map(|m| m.weights.as_slice())
    }

    /// Discriminant constants per class, if compiled.
    pub fn constants(&self) -> Option<&[f64]> {
        self.model.as_ref().map(|m| m.constants.as_slice())
    }

    /// Features used by the compiled model, if compiled.
    pub fn retained_features(&self) -> Option<&FeatureMask> {
        self.model.as_ref().map(|m| &m.mask)
    }

    /// Inverse pooled covariance, if compiled.
    pub fn inverse_covariance(&self) -> Option<&Matrix> {
        self.model.as_ref().map(|m| &m.inv_cov)
    }

    /// Compile if the model is stale.
    pub fn ensure_fresh(&mut self) -> RecogResult<()> {
        if self.state == CompileState::Stale || self.model.is_none() {
            self.compile()?;
        }
        Ok(())
    }

    /// Train the discriminant model from the current class statistics.
    ///
    /// Pools the per-class deviation sums, divides by the degrees of
    /// freedom and inverts the result. A near-singular pooled covariance is
    /// recovered by keeping only a subset of features.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InsufficientExamples`] when there are no more
    /// examples than classes, and [`RecogError::SingularCovariance`] when
    /// no feature subset gives an invertible covariance.
    pub fn compile(&mut self) -> RecogResult<()> {
        let examples: usize = self.classes.iter().map(RubineClass::num_examples).sum();
        let classes = self.classes.len();
        debug!(classes, examples, "compiling statistical classifier");

        if classes == 0 || examples <= classes {
            self.invalidate();
            return Err(RecogError::InsufficientExamples { examples, classes });
        }
        let denom = (examples - classes) as f64;

        let mut pooled = Matrix::zeros(NFEATURES, NFEATURES);
        for class in &self.classes {
            pooled.add_assign(&class.sum_cov)?;
        }
        pooled.scale(1.0 / denom);
        pooled.mirror_upper();

        let inversion = pooled.invert()?;
        let (inv_cov, mask) = if inversion.determinant.abs() <= SINGULAR_EPSILON {
            match fix_singular(&pooled, SINGULAR_EPSILON) {
                Ok(recovered) => {
                    debug!(
                        retained = ?recovered.mask.indices().collect::<Vec<_>>(),
                        "pooled covariance singular, reduced feature set"
                    );
                    (recovered.inverse, recovered.mask)
                }
                Err(Error::SingularMatrix { retained }) => {
                    warn!(retained, "pooled covariance cannot be made invertible");
                    self.invalidate();
                    return Err(RecogError::SingularCovariance { retained });
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            (inversion.inverse, FeatureMask::full(NFEATURES))
        };

        let mut weights = Vec::with_capacity(classes);
        let mut constants = Vec::with_capacity(classes);
        for class in &self.classes {
            let w = mul_matrix(&class.mean, &inv_cov)?;
            let k = -0.5 * scalar_product(&w, &class.mean);
            weights.push(w);
            constants.push(k);
        }

        self.model = Some(Model {
            inv_cov,
            mask,
            weights,
            constants,
        });
        self.state = CompileState::Fresh;
        debug!(classes, "statistical classifier compiled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(points: &[(f64, f64)]) -> Gesture {
        Gesture::from_points(points.iter().copied()).unwrap()
    }

    #[test]
    fn test_class_management() {
        let mut c = RubineClassifier::new();
        c.add_class("V").unwrap();
        assert!(matches!(c.add_class("V"), Err(RecogError::DuplicateClass(_))));
        c.add_class("v").unwrap();
        assert_eq!(c.class_names(), vec!["V", "v"]);
        assert!(matches!(
            c.add_example("L", gesture(&[(0.0, 0.0)])),
            Err(RecogError::ClassNotFound(_))
        ));
        assert!(matches!(c.rename_class("V", "v"), Err(RecogError::DuplicateClass(_))));
        c.rename_class("V", "Vee").unwrap();
        c.remove_class("v").unwrap();
        assert_eq!(c.class_names(), vec!["Vee"]);
        c.reset();
        assert_eq!(c.num_classes(), 0);
    }

    #[test]
    fn test_compile_insufficient() {
        let mut c = RubineClassifier::new();
        assert!(matches!(
            c.compile(),
            Err(RecogError::InsufficientExamples { examples: 0, classes: 0 })
        ));
        c.add_class("A").unwrap();
        c.add_class("B").unwrap();
        c.add_example("A", gesture(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]))
            .unwrap();
        c.add_example("B", gesture(&[(0.0, 0.0), (10.0, -10.0), (20.0, 0.0)]))
            .unwrap();
        assert!(matches!(
            c.compile(),
            Err(RecogError::InsufficientExamples { examples: 2, classes: 2 })
        ));
        assert_eq!(c.state(), CompileState::Stale);
    }

    #[test]
    fn test_identical_examples_unrecoverable() {
        let mut c = RubineClassifier::new();
        c.add_class("A").unwrap();
        let g = gesture(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]);
        c.add_example("A", g.clone()).unwrap();
        c.add_example("A", g).unwrap();
        assert!(matches!(
            c.compile(),
            Err(RecogError::SingularCovariance { retained: 0 })
        ));
    }

    #[test]
    fn test_mutation_marks_stale() {
        let mut c = RubineClassifier::new();
        c.add_class("A").unwrap();
        for dy in [10.0, 14.0, 19.0] {
            c.add_example("A", gesture(&[(0.0, 0.0), (10.0, dy), (20.0, 0.0)]))
                .unwrap();
        }
        c.compile().unwrap();
        assert_eq!(c.state(), CompileState::Fresh);
        assert!(c.weights().is_some());
        c.add_class("B").unwrap();
        assert_eq!(c.state(), CompileState::Stale);
        assert!(c.weights().is_none());
    }
}
