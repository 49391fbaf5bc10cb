//! Serialization for Gesture
//!
//! ```text
//! i32 pointCount            (>= 1)
//! u8  timed                 (0 or 1)
//! pointCount × (f64 x, f64 y [, i64 t])
//! ```

use super::Gesture;
use crate::error::{Error, Result};
use crate::io::{ByteReader, ByteWriter, read_limited};
use crate::polyline::Polyline;
use std::io::{Read, Write};

/// Maximum number of points in a serialized Gesture.
pub const MAX_GESTURE_SIZE: usize = 10_000_000;

impl Gesture {
    /// Decode a gesture record at the reader's position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for an empty record, a bad flag byte,
    /// truncation or decreasing timestamps.
    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.position();
        let n = reader.read_count("point", MAX_GESTURE_SIZE)?;
        if n == 0 {
            return Err(Error::Format {
                position: start,
                message: "gesture record has no points".into(),
            });
        }
        let timed = reader.read_bool()?;
        let cap = n.min(reader.remaining() / 16);
        let mut points = Polyline::with_capacity(cap);
        let mut times = Vec::with_capacity(if timed { cap } else { 0 });
        for _ in 0..n {
            let x = reader.read_f64()?;
            let y = reader.read_f64()?;
            points.push(x, y);
            if timed {
                times.push(reader.read_i64()?);
            }
        }
        let gesture = if timed {
            Self::with_times(points, times)
        } else {
            Self::new(points)
        };
        gesture.map_err(|e| Error::Format {
            position: start,
            message: e.to_string(),
        })
    }

    /// Encode the gesture record.
    pub fn encode<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<()> {
        writer.write_count(self.len())?;
        writer.write_bool(self.is_timed())?;
        for (i, p) in self.points.iter().enumerate() {
            writer.write_f64(p.x)?;
            writer.write_f64(p.y)?;
            if let Some(t) = self.time(i) {
                writer.write_i64(t)?;
            }
        }
        Ok(())
    }

    /// Read a single gesture record from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let buf = read_limited(reader)?;
        Self::read_from_bytes(&buf)
    }

    /// Read a single gesture record from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);
        let gesture = Self::decode(&mut reader)?;
        reader.finish()?;
        Ok(gesture)
    }

    /// Write the gesture record to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        let mut w = ByteWriter::new(writer);
        self.encode(&mut w)?;
        w.into_inner()?;
        Ok(())
    }

    /// Write the gesture record to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}
