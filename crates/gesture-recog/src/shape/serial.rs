//! Serialization for ShapeMatchingClassifier
//!
//! Binary big-endian format:
//!
//! ```text
//! i32 classCount
//! classCount × {
//!     u16 nameLength, UTF-8 name
//!     i32 pointCount, pointCount × (f64 x, f64 y)   directly set template
//!     i32 exampleCount, exampleCount × gesture record
//! }
//! ```
//!
//! The directly set template is stored as given, before normalization; a
//! point count of zero means the class has none. Normalized templates are
//! not stored; they are recomputed with the options the classifier is
//! loaded with.

use tracing::debug;

use super::types::{ShapeClass, ShapeMatchingClassifier, ShapeMatchingOptions};
use crate::error::{RecogError, RecogResult};
use gesture_core::io::{ByteReader, ByteWriter, read_limited};
use gesture_core::{Gesture, Normalization, Polyline};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAX_CLASSES: usize = 100_000;
const MAX_EXAMPLES: usize = 1_000_000;

fn decode_class(
    reader: &mut ByteReader<'_>,
    params: &Normalization,
) -> gesture_core::Result<ShapeClass> {
    let name = reader.read_utf()?;
    let mut class = ShapeClass::new(name);
    let template = Polyline::decode(reader)?;
    if !template.is_empty() {
        class.set_template(template, params);
    }
    let count = reader.read_count("example", MAX_EXAMPLES)?;
    for _ in 0..count {
        class.add_example(Gesture::decode(reader)?, params);
    }
    Ok(class)
}

fn encode_class<W: Write>(class: &ShapeClass, writer: &mut ByteWriter<W>) -> gesture_core::Result<()> {
    writer.write_utf(&class.name)?;
    match &class.source {
        Some(template) => template.encode(writer)?,
        None => writer.write_count(0)?,
    }
    writer.write_count(class.examples.len())?;
    for example in &class.examples {
        example.encode(writer)?;
    }
    Ok(())
}

impl ShapeMatchingClassifier {
    /// Read a classifier definition from a reader with default options.
    pub fn read_from_reader(reader: &mut impl Read) -> RecogResult<Self> {
        let buf = read_limited(reader)?;
        Self::read_from_bytes(&buf)
    }

    /// Read a classifier definition from a file with default options.
    pub fn read_from_file(path: impl AsRef<Path>) -> RecogResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        Self::read_from_reader(&mut reader)
    }

    /// Read a classifier definition from a byte slice with default options.
    pub fn read_from_bytes(data: &[u8]) -> RecogResult<Self> {
        Self::read_from_bytes_with_options(data, ShapeMatchingOptions::default())
    }

    /// Read a classifier definition from a byte slice.
    ///
    /// Templates are normalized with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] for invalid options and
    /// [`RecogError::Format`] naming the byte position and class index for
    /// truncated or malformed input, duplicate class names or trailing
    /// bytes.
    pub fn read_from_bytes_with_options(
        data: &[u8],
        options: ShapeMatchingOptions,
    ) -> RecogResult<Self> {
        let mut classifier = Self::with_options(options)?;
        let params = options.normalization();
        let mut reader = ByteReader::new(data);
        let count = reader
            .read_count("class", MAX_CLASSES)
            .map_err(|e| RecogError::in_class(e, None))?;
        for i in 0..count {
            let start = reader.position();
            let class = decode_class(&mut reader, &params)
                .map_err(|e| RecogError::in_class(e, Some(i)))?;
            if classifier.contains_class(&class.name) {
                return Err(RecogError::Format {
                    class_index: Some(i),
                    position: start,
                    message: format!("duplicate class name '{}'", class.name),
                });
            }
            classifier.push_class(class)?;
        }
        reader
            .finish()
            .map_err(|e| RecogError::in_class(e, None))?;
        debug!(classes = count, "shape-matching classifier loaded");
        Ok(classifier)
    }

    /// Write the classifier definition to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> RecogResult<()> {
        let mut w = ByteWriter::new(writer);
        w.write_count(self.classes.len())?;
        for class in &self.classes {
            encode_class(class, &mut w)?;
        }
        w.into_inner()?;
        Ok(())
    }

    /// Write the classifier definition to a file, creating or truncating it.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> RecogResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)
    }

    /// Write the classifier definition to a byte vector.
    pub fn write_to_bytes(&self) -> RecogResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut c = ShapeMatchingClassifier::new();
        let line: Polyline = [(0.0, 50.0), (100.0, 50.0)].into_iter().collect();
        c.add_class_with_template("Line", &line).unwrap();
        c.add_class("V").unwrap();
        c.add_example(
            "V",
            Gesture::from_timed_points([(0.0, 0.0, 0), (50.0, 100.0, 30), (100.0, 0.0, 60)])
                .unwrap(),
        )
        .unwrap();

        let bytes = c.write_to_bytes().unwrap();
        let back = ShapeMatchingClassifier::read_from_bytes(&bytes).unwrap();
        assert_eq!(back.class_names(), c.class_names());
        assert_eq!(back.examples("V").unwrap(), c.examples("V").unwrap());
        assert_eq!(back.templates("V").unwrap(), c.templates("V").unwrap());
        assert_eq!(back.template("Line").unwrap(), c.template("Line").unwrap());
        assert_eq!(back.classes(), c.classes());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut w = ByteWriter::new(Vec::new());
        w.write_i32(2).unwrap();
        for _ in 0..2 {
            w.write_utf("A").unwrap();
            w.write_i32(0).unwrap();
            w.write_i32(0).unwrap();
        }
        let bytes = w.into_inner().unwrap();
        let err = ShapeMatchingClassifier::read_from_bytes(&bytes).unwrap_err();
        assert!(
            matches!(
                err,
                RecogError::Format {
                    class_index: Some(1),
                    position: 15,
                    ..
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn test_negative_example_count() {
        let mut w = ByteWriter::new(Vec::new());
        w.write_i32(1).unwrap();
        w.write_utf("A").unwrap();
        w.write_i32(0).unwrap();
        w.write_i32(-1).unwrap();
        let bytes = w.into_inner().unwrap();
        assert!(matches!(
            ShapeMatchingClassifier::read_from_bytes(&bytes),
            Err(RecogError::Format {
                class_index: Some(0),
                position: 11,
                ..
            })
        ));
    }
}
