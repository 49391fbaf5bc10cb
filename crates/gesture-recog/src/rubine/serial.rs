//! Serialization for RubineClassifier
//!
//! Binary big-endian format:
//!
//! ```text
//! i32 classCount
//! classCount × {
//!     u16 nameLength, UTF-8 name
//!     i32 exampleCount, exampleCount × gesture record
//!     13 × f64 mean
//!     91 × f64 sum_cov upper triangle, row-major
//! }
//! ```
//!
//! The trained model is not stored; it is recompiled on first use. The
//! stored statistics are checked against the examples on load.

use super::features::NFEATURES;
use super::types::{RubineClass, RubineClassifier};
use crate::error::{RecogError, RecogResult};
use gesture_core::io::{ByteReader, ByteWriter, read_limited};
use gesture_core::{Gesture, Matrix};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Maximum number of classes in a definition.
const MAX_CLASSES: usize = 100_000;

/// Maximum number of examples per class.
const MAX_EXAMPLES: usize = 1_000_000;

/// Number of stored upper-triangular covariance entries.
const UPPER_LEN: usize = NFEATURES * (NFEATURES + 1) / 2;

/// Stored statistics may differ from the replayed ones by this fraction of
/// the largest replayed magnitude.
const STATS_TOLERANCE: f64 = 1e-6;

/// Whether every stored value is finite and within tolerance of its replayed
/// counterpart.
fn consistent(stored: &[f64], replayed: &[f64]) -> bool {
    let scale = replayed.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
    stored.len() == replayed.len()
        && stored
            .iter()
            .zip(replayed)
            .all(|(s, r)| s.is_finite() && (s - r).abs() <= STATS_TOLERANCE * scale)
}

fn decode_class(reader: &mut ByteReader<'_>, index: usize) -> RecogResult<RubineClass> {
    let in_class = |e: gesture_core::Error| RecogError::in_class(e, Some(index));
    let name = reader.read_utf().map_err(in_class)?;
    let count = reader.read_count("example", MAX_EXAMPLES).map_err(in_class)?;
    let mut examples = Vec::with_capacity(count.min(reader.remaining() / 5));
    for _ in 0..count {
        examples.push(Gesture::decode(reader).map_err(in_class)?);
    }
    let stats_start = reader.position();
    let mut mean = [0.0; NFEATURES];
    for m in mean.iter_mut() {
        *m = reader.read_f64().map_err(in_class)?;
    }
    let mut upper = Vec::with_capacity(UPPER_LEN);
    for _ in 0..UPPER_LEN {
        upper.push(reader.read_f64().map_err(in_class)?);
    }

    // the statistics must describe the stored examples
    let mut replayed = RubineClass::new(name);
    for example in &examples {
        replayed.add_example(example.clone())?;
    }
    if !consistent(&mean, &replayed.mean) || !consistent(&upper, &replayed.sum_cov.upper_triangle())
    {
        return Err(RecogError::Format {
            class_index: Some(index),
            position: stats_start,
            message: format!(
                "statistics of class '{}' do not match its examples",
                replayed.name
            ),
        });
    }

    Ok(RubineClass {
        name: replayed.name,
        examples,
        mean,
        sum_cov: Matrix::from_upper_triangle(NFEATURES, &upper).map_err(in_class)?,
    })
}

fn encode_class<W: Write>(class: &RubineClass, writer: &mut ByteWriter<W>) -> gesture_core::Result<()> {
    writer.write_utf(&class.name)?;
    writer.write_count(class.examples.len())?;
    for example in &class.examples {
        example.encode(writer)?;
    }
    for &m in &class.mean {
        writer.write_f64(m)?;
    }
    for v in class.sum_cov.upper_triangle() {
        writer.write_f64(v)?;
    }
    Ok(())
}

impl RubineClassifier {
    /// Read a classifier definition from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> RecogResult<Self> {
        let buf = read_limited(reader)?;
        Self::read_from_bytes(&buf)
    }

    /// Read a classifier definition from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> RecogResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        Self::read_from_reader(&mut reader)
    }

    /// Read a classifier definition from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Format`] naming the byte position and class
    /// index for truncated or malformed input, duplicate class names or
    /// trailing bytes.
    pub fn read_from_bytes(data: &[u8]) -> RecogResult<Self> {
        let mut reader = ByteReader::new(data);
        let count = reader
            .read_count("class", MAX_CLASSES)
            .map_err(|e| RecogError::in_class(e, None))?;
        let mut classifier = Self::new();
        for i in 0..count {
            let start = reader.position();
            let class = decode_class(&mut reader, i)?;
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
