//! Class and template management for the shape-matching classifier

use super::types::{ShapeClass, ShapeMatchingClassifier, ShapeMatchingOptions};
use crate::error::{RecogError, RecogResult};
use gesture_core::{Gesture, Polyline, normalize};

impl ShapeMatchingClassifier {
    /// Create an empty classifier with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty classifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if the options are invalid.
    pub fn with_options(options: ShapeMatchingOptions) -> RecogResult<Self> {
        options.validate()?;
        Ok(Self {
            classes: Vec::new(),
            options,
        })
    }

    /// Create an empty rotation-invariant classifier.
    pub fn dollar1() -> Self {
        Self {
            classes: Vec::new(),
            options: ShapeMatchingOptions::dollar1(),
        }
    }

    pub fn options(&self) -> &ShapeMatchingOptions {
        &self.options
    }

    /// Set the rejection threshold.
    pub fn set_max_distance(&mut self, max_distance: f64) -> RecogResult<()> {
        let options = self.options.with_max_distance(max_distance);
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Set the shortest stroke that is classified.
    pub fn set_min_stroke_length(&mut self, min_stroke_length: f64) -> RecogResult<()> {
        let options = self.options.with_min_stroke_length(min_stroke_length);
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub(crate) fn index_of(&self, name: &str) -> RecogResult<usize> {
        self.classes
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| RecogError::ClassNotFound(name.to_string()))
    }

    /// Look up a class.
    pub fn class(&self, name: &str) -> Option<&ShapeClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// All classes in insertion order.
    pub fn classes(&self) -> &[ShapeClass] {
        &self.classes
    }

    /// Normalize a point sequence the way inputs and templates are.
    pub fn normalize(&self, points: &Polyline) -> Polyline {
        normalize(points, &self.options.normalization())
    }

    fn check_template(points: &Polyline) -> RecogResult<()> {
        if points.is_empty() {
            return Err(RecogError::InvalidParameter(
                "template has no points".to_string(),
            ));
        }
        Ok(())
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
        self.classes.push(ShapeClass::new(name));
        Ok(())
    }

    /// Add a class matched against a single template.
    ///
    /// The template is matched in normalized form.
    pub fn add_class_with_template(&mut self, name: &str, template: &Polyline) -> RecogResult<()> {
        Self::check_template(template)?;
        self.add_class(name)?;
        let params = self.options.normalization();
        if let Some(class) = self.classes.last_mut() {
            class.set_template(template.clone(), &params);
        }
        Ok(())
    }

    /// Replace the directly set template of a class.
    pub fn set_template(&mut self, name: &str, template: &Polyline) -> RecogResult<()> {
        let index = self.index_of(name)?;
        Self::check_template(template)?;
        let params = self.options.normalization();
        self.classes[index].set_template(template.clone(), &params);
        Ok(())
    }

    /// Directly set template of a class.
    pub fn template(&self, name: &str) -> RecogResult<Option<&Polyline>> {
        Ok(self.classes[self.index_of(name)?].template())
    }

    /// Normalized examples of a class.
    pub fn templates(&self, name: &str) -> RecogResult<&[Polyline]> {
        Ok(self.classes[self.index_of(name)?].templates())
    }

    pub(crate) fn push_class(&mut self, class: ShapeClass) -> RecogResult<()> {
        if self.class(&class.name).is_some() {
            return Err(RecogError::DuplicateClass(class.name));
        }
        self.classes.push(class);
        Ok(())
    }

    /// Remove a class with its examples and template.
    pub fn remove_class(&mut self, name: &str) -> RecogResult<()> {
        let index = self.index_of(name)?;
        self.classes.remove(index);
        Ok(())
    }

    /// Rename a class.
    pub fn rename_class(&mut self, from: &str, to: &str) -> RecogResult<()> {
        let index = self.index_of(from)?;
        if from != to && self.class(to).is_some() {
            return Err(RecogError::DuplicateClass(to.to_string()));
        }
        self.classes[index].name = to.to_string();
        Ok(())
    }

    /// Add a training example; its normalized form becomes a template.
    pub fn add_example(&mut self, name: &str, example: Gesture) -> RecogResult<()> {
        let index = self.index_of(name)?;
        let params = self.options.normalization();
        self.classes[index].add_example(example, &params);
        Ok(())
    }

    /// Remove the first example of a class equal to `example`.
    pub fn remove_example(&mut self, name: &str, example: &Gesture) -> RecogResult<bool> {
        let index = self.index_of(name)?;
        Ok(self.classes[index].remove_example(example))
    }

    /// Remove `example` from every class that holds it.
    pub fn remove_gesture(&mut self, example: &Gesture) -> usize {
        let mut removed = 0;
        for class in &mut self.classes {
            if class.remove_example(example) {
                removed += 1;
            }
        }
        removed
    }

    /// Remove every class.
    pub fn reset(&mut self) {
        self.classes.clear();
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
}
