//! Classification with the shape-matching classifier

use tracing::debug;

use super::types::{ClassifiedAndResampled, ShapeMatchingClassifier};
use crate::classifier::{Recognition, Score};
use crate::error::RecogResult;
use gesture_core::{Gesture, Polyline, distance_at_best_angle, path_distance};

/// Nearest template found for an input.
struct Nearest<'a> {
    class: usize,
    template: &'a Polyline,
    distance: f64,
}

impl ShapeMatchingClassifier {
    /// Distance between two normalized point sequences under the current
    /// options.
    pub fn match_distance(&self, input: &Polyline, template: &Polyline) -> RecogResult<f64> {
        let distance = match self.options.rotation {
            Some(r) => distance_at_best_angle(
                input,
                template,
                -r.half_range,
                r.half_range,
                r.tolerance,
            )?,
            None => path_distance(input, template)?,
        };
        Ok(distance)
    }

    fn nearest(&self, input: &Polyline) -> RecogResult<Option<Nearest<'_>>> {
        let mut best: Option<Nearest<'_>> = None;
        for (c, class) in self.classes.iter().enumerate() {
            for template in class.candidates() {
                let distance = self.match_distance(input, template)?;
                if best.as_ref().is_none_or(|b| distance < b.distance) {
                    best = Some(Nearest {
                        class: c,
                        template,
                        distance,
                    });
                }
            }
        }
        Ok(best)
    }

    fn class_distance(&self, input: &Polyline, index: usize) -> RecogResult<Option<f64>> {
        let mut min: Option<f64> = None;
        for template in self.classes[index].candidates() {
            let distance = self.match_distance(input, template)?;
            if min.is_none_or(|m| distance < m) {
                min = Some(distance);
            }
        }
        Ok(min)
    }

    fn too_short(&self, gesture: &Gesture) -> bool {
        gesture.path_length() < self.options.min_stroke_length
    }

    /// Classify a gesture.
    ///
    /// Strokes shorter than the minimum length and inputs for which no
    /// class has a template are unrecognized without a best score.
    /// Distances up to and including the threshold are accepted.
    pub fn classify(&self, gesture: &Gesture) -> RecogResult<Recognition> {
        if self.too_short(gesture) {
            debug!(length = gesture.path_length(), "stroke too short to classify");
            return Ok(Recognition::Unrecognized { best: None });
        }
        let input = self.normalize(gesture.points());
        let Some(nearest) = self.nearest(&input)? else {
            return Ok(Recognition::Unrecognized { best: None });
        };
        let score = Score::new(self.classes[nearest.class].name.clone(), nearest.distance);
        if score.distance <= self.options.max_distance {
            Ok(Recognition::Recognized(score))
        } else {
            debug!(
                class = %score.name,
                distance = score.distance,
                max_distance = self.options.max_distance,
                "gesture rejected"
            );
            Ok(Recognition::Unrecognized { best: Some(score) })
        }
    }

    /// Classify a gesture and return the normalized input along with the
    /// matched template, or `None` if the gesture is not recognized.
    pub fn classify_and_resample(
        &self,
        gesture: &Gesture,
    ) -> RecogResult<Option<ClassifiedAndResampled>> {
        if self.too_short(gesture) {
            return Ok(None);
        }
        let input = self.normalize(gesture.points());
        let Some(nearest) = self.nearest(&input)? else {
            return Ok(None);
        };
        if nearest.distance > self.options.max_distance {
            return Ok(None);
        }
        let name = self.classes[nearest.class].name.clone();
        let template = nearest.template.clone();
        Ok(Some(ClassifiedAndResampled {
            name,
            distance: nearest.distance,
            input,
            template,
        }))
    }

    /// Every class with its distance to the input, nearest first.
    ///
    /// Classes without any template are omitted. Classes at equal distance
    /// keep insertion order.
    pub fn sorted_classes(&self, gesture: &Gesture) -> RecogResult<Vec<Score>> {
        let input = self.normalize(gesture.points());
        let mut scores = Vec::with_capacity(self.classes.len());
        for (c, class) in self.classes.iter().enumerate() {
            if let Some(distance) = self.class_distance(&input, c)? {
                scores.push(Score::new(class.name.clone(), distance));
            }
        }
        scores.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(scores)
    }

    /// Distance from a gesture to the nearest template of a class, or
    /// `None` if the class has no template.
    pub fn distance_to_class(&self, gesture: &Gesture, name: &str) -> RecogResult<Option<f64>> {
        let index = self.index_of(name)?;
        let input = self.normalize(gesture.points());
        self.class_distance(&input, index)
    }

    /// Distance between the average templates of two classes.
    pub fn distance_between_classes(&self, a: &str, b: &str) -> RecogResult<Option<f64>> {
        let (Some(ta), Some(tb)) = (self.average_template(a)?, self.average_template(b)?) else {
            return Ok(None);
        };
        Ok(Some(path_distance(&ta, &tb)?))
    }

    /// Pointwise average of a class's templates.
    ///
    /// A class without examples yields its directly set template; a class
    /// with neither yields `None`.
    pub fn average_template(&self, name: &str) -> RecogResult<Option<Polyline>> {
        let class = &self.classes[self.index_of(name)?];
        let templates = class.candidates();
        let Some(first) = templates.first() else {
            return Ok(None);
        };
        let n = templates.len() as f64;
        let mut sx = vec![0.0; first.len()];
        let mut sy = vec![0.0; first.len()];
        for template in templates {
            for (i, p) in template.iter().enumerate().take(first.len()) {
                sx[i] += p.x;
                sy[i] += p.y;
            }
        }
        let average = sx
            .iter()
            .zip(&sy)
            .map(|(x, y)| (x / n, y / n))
            .collect::<Polyline>();
        Ok(Some(average))
    }

    /// The normalized template that best represents a class: the example
    /// template nearest to the class average.
    ///
    /// A class without examples yields its directly set template.
    pub fn representative(&self, name: &str) -> RecogResult<Option<&Polyline>> {
        let index = self.index_of(name)?;
        let class = &self.classes[index];
        if class.examples.is_empty() {
            return Ok(class.template.as_ref());
        }
        let Some(average) = self.average_template(name)? else {
            return Ok(None);
        };
        let mut best: Option<(usize, f64)> = None;
        for (i, template) in class.templates.iter().enumerate() {
            let distance = self.match_distance(template, &average)?;
            if best.is_none_or(|(_, min)| distance < min) {
                best = Some((i, distance));
            }
        }
        Ok(best.map(|(i, _)| &class.templates[i]))
    }
}
