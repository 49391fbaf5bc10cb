//! Classification with the statistical classifier

use tracing::debug;

use super::features::{FeatureVector, compute_features};
use super::types::{Model, RubineClass, RubineClassifier};
use crate::classifier::{Recognition, Score};
use crate::error::{RecogError, RecogResult};
use gesture_core::Gesture;
use gesture_core::linalg::{minus, quadratic_form, scalar_product};

impl Model {
    fn discriminant(&self, class: usize, fv: &FeatureVector) -> f64 {
        scalar_product(&self.weights[class], fv) + self.constants[class]
    }

    fn mahalanobis(&self, fv: &FeatureVector, mean: &FeatureVector) -> RecogResult<f64> {
        Ok(quadratic_form(&minus(fv, mean), &self.inv_cov)?)
    }
}

impl RubineClassifier {
    /// Compile if needed and borrow the model with the classes it was
    /// trained on.
    fn compiled(&mut self) -> RecogResult<(&Model, &[RubineClass])> {
        self.ensure_fresh()?;
        let model = self.model.as_ref().ok_or(RecogError::InsufficientExamples {
            examples: 0,
            classes: self.classes.len(),
        })?;
        Ok((model, &self.classes))
    }

    /// Discriminant score of every class for a gesture, in class order.
    pub fn discriminants(&mut self, gesture: &Gesture) -> RecogResult<Vec<Score>> {
        let fv = compute_features(gesture);
        let (model, classes) = self.compiled()?;
        Ok(classes
            .iter()
            .enumerate()
            .map(|(c, class)| Score::new(class.name.clone(), model.discriminant(c, &fv)))
            .collect())
    }

    /// Classify a gesture.
    ///
    /// The class with the largest discriminant wins; the result carries the
    /// Mahalanobis distance of the input to that class mean. Distances up
    /// to and including the threshold are accepted.
    pub fn classify(&mut self, gesture: &Gesture) -> RecogResult<Recognition> {
        let max_distance = self.options.max_distance;
        let fv = compute_features(gesture);
        let (model, classes) = self.compiled()?;

        let mut best: Option<(usize, f64)> = None;
        for c in 0..model.weights.len() {
            let value = model.discriminant(c, &fv);
            if best.is_none_or(|(_, max)| value > max) {
                best = Some((c, value));
            }
        }
        let Some((winner, _)) = best else {
            return Ok(Recognition::Unrecognized { best: None });
        };
        let class = &classes[winner];
        let distance = model.mahalanobis(&fv, &class.mean)?;
        let score = Score::new(class.name.clone(), distance);

        if distance <= max_distance {
            Ok(Recognition::Recognized(score))
        } else {
            debug!(class = %score.name, distance, max_distance, "gesture rejected");
            Ok(Recognition::Unrecognized { best: Some(score) })
        }
    }

    /// Every class with the Mahalanobis distance of the input to its mean,
    /// ordered by descending discriminant score.
    ///
    /// The first entry is the class [`RubineClassifier::classify`] picks.
    /// Classes with equal scores keep insertion order.
    pub fn sorted_classes(&mut self, gesture: &Gesture) -> RecogResult<Vec<Score>> {
        let fv = compute_features(gesture);
        let (model, classes) = self.compiled()?;

        let mut ranked = Vec::with_capacity(classes.len());
        for (c, class) in classes.iter().enumerate() {
            let value = model.discriminant(c, &fv);
            let distance = model.mahalanobis(&fv, &class.mean)?;
            ranked.push((value, Score::new(class.name.clone(), distance)));
        }
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(ranked.into_iter().map(|(_, score)| score).collect())
    }

    /// Probability that the best class is not ambiguous,
    /// `1 / Σ exp(score_c − score_max)`.
    pub fn non_ambiguity(&mut self, gesture: &Gesture) -> RecogResult<f64> {
        let scores = self.discriminants(gesture)?;
        let max = scores
            .iter()
            .map(|s| s.distance)
            .fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Ok(0.0);
        }
        let denom: f64 = scores.iter().map(|s| (s.distance - max).exp()).sum();
        Ok(1.0 / denom)
    }

    /// The stored example with the largest discriminant score for its own
    /// class, or `None` for a class without examples.
    pub fn representative(&mut self, name: &str) -> RecogResult<Option<&Gesture>> {
        let index = self.index_of(name)?;
        self.ensure_fresh()?;
        let Some(model) = self.model.as_ref() else {
            return Ok(None);
        };
        let class = &self.classes[index];
        let mut best: Option<(&Gesture, f64)> = None;
        for example in &class.examples {
            let value = model.discriminant(index, &compute_features(example));
            if best.is_none_or(|(_, max)| value > max) {
                best = Some((example, value));
            }
        }
        Ok(best.map(|(g, _)| g))
    }
}
