//! Serialization for Polyline
//!
//! Binary big-endian format:
//!
//! ```text
//! i32 pointCount
//! pointCount × (f64 x, f64 y)
//! ```

use super::Polyline;
use crate::error::Result;
use crate::io::{ByteReader, ByteWriter, read_limited};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Maximum number of points in a serialized Polyline.
pub const MAX_POLYLINE_SIZE: usize = 10_000_000;

impl Polyline {
    /// Decode a point sequence at the reader's position.
    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let n = reader.read_count("point", MAX_POLYLINE_SIZE)?;
        let mut points = Self::with_capacity(n.min(reader.remaining() / 16));
        for _ in 0..n {
            let x = reader.read_f64()?;
            let y = reader.read_f64()?;
            points.push(x, y);
        }
        Ok(points)
    }

    /// Encode the point sequence.
    pub fn encode<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<()> {
        writer.write_count(self.len())?;
        for p in self.iter() {
            writer.write_f64(p.x)?;
            writer.write_f64(p.y)?;
        }
        Ok(())
    }

    /// Read a Polyline from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let buf = read_limited(reader)?;
        Self::read_from_bytes(&buf)
    }

    /// Read a Polyline from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        Self::read_from_reader(&mut reader)
    }

    /// Read a Polyline from a byte slice.
    ///
    /// The slice must contain exactly one encoded polyline.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);
        let points = Self::decode(&mut reader)?;
        reader.finish()?;
        Ok(points)
    }

    /// Write a Polyline to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        let mut w = ByteWriter::new(writer);
        self.encode(&mut w)?;
        w.into_inner()?;
        Ok(())
    }

    /// Write a Polyline to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)
    }

    /// Write a Polyline to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}
