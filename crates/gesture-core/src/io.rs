//! Big-endian binary primitives
//!
//! Classifier definitions use fixed-width big-endian integers, IEEE-754
//! doubles in network byte order, and strings stored as a `u16` byte
//! length followed by UTF-8.
//!
//! Input is read fully into memory first (bounded by [`MAX_INPUT_SIZE`])
//! and then decoded with a [`ByteReader`] that tracks the byte position, so
//! every decoding error can name the offset where it occurred.

use crate::error::{Error, Result};
use std::io::{Read, Write};

/// Maximum input size in bytes to prevent unbounded memory growth.
pub const MAX_INPUT_SIZE: usize = 100_000_000;

/// Read an entire stream, refusing inputs larger than [`MAX_INPUT_SIZE`].
pub fn read_limited(reader: &mut impl Read) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader
        .take((MAX_INPUT_SIZE + 1) as u64)
        .read_to_end(&mut buf)?;
    if buf.len() > MAX_INPUT_SIZE {
        return Err(Error::Format {
            position: MAX_INPUT_SIZE as u64,
            message: format!("input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"),
        });
    }
    Ok(buf)
}

/// Cursor over an in-memory byte buffer.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> u64 {
        self.pos as u64
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Build a [`Error::Format`] at the current position.
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::Format {
            position: self.position(),
            message: message.into(),
        }
    }

    fn take<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let end = self.pos + N;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| self.error(format!("unexpected end of input reading {what}")))?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.pos = end;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take::<1>("u8")?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take("u16")?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take("i32")?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take("i64")?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.take("f64")?))
    }

    /// Read a boolean stored as a single 0/1 byte.
    pub fn read_bool(&mut self) -> Result<bool> {
        let start = self.position();
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::Format {
                position: start,
                message: format!("invalid boolean byte {other}"),
            }),
        }
    }

    /// Read an `i32` element count and check it against `max`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for a negative count or one above `max`.
    pub fn read_count(&mut self, what: &str, max: usize) -> Result<usize> {
        let start = self.position();
        let raw = self.read_i32()?;
        let count = usize::try_from(raw).map_err(|_| Error::Format {
            position: start,
            message: format!("negative {what} count {raw}"),
        })?;
        if count > max {
            return Err(Error::Format {
                position: start,
                message: format!("{what} count {count} exceeds limit {max}"),
            });
        }
        Ok(count)
    }

    /// Read a string stored as a `u16` byte length and UTF-8 bytes.
    pub fn read_utf(&mut self) -> Result<String> {
        let start = self.position();
        let len = self.read_u16()? as usize;
        let data: &'a [u8] = self.data;
        let end = self.pos + len;
        let bytes = data
            .get(self.pos..end)
            .ok_or_else(|| self.error("unexpected end of input reading string"))?;
        let text = std::str::from_utf8(bytes).map_err(|e| Error::Format {
            position: start,
            message: format!("invalid UTF-8: {e}"),
        })?;
        self.pos = end;
        Ok(text.to_owned())
    }

    /// Fail if any input is left unread.
    pub fn finish(&self) -> Result<()> {
        if self.remaining() > 0 {
            return Err(self.error(format!("{} trailing bytes", self.remaining())));
        }
        Ok(())
    }
}

/// Big-endian encoder over any writer.
#[derive(Debug)]
pub struct ByteWriter<W: Write> {
    inner: W,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.inner.write_all(&[v])?;
        Ok(())
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        self.inner.write_all(&v.to_be_bytes())?;
        Ok(())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.inner.write_all(&v.to_be_bytes())?;
        Ok(())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        self.inner.write_all(&v.to_be_bytes())?;
        Ok(())
    }

    pub fn write_f64(&mut self, v: f64) -> Result<()> {
        self.inner.write_all(&v.to_be_bytes())?;
        Ok(())
    }

    pub fn write_bool(&mut self, v: bool) -> Result<()> {
        self.write_u8(u8::from(v))
    }

    /// Write an element count as `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `count` does not fit.
    pub fn write_count(&mut self, count: usize) -> Result<()> {
        let v = i32::try_from(count)
            .map_err(|_| Error::InvalidParameter(format!("count {count} does not fit in i32")))?;
        self.write_i32(v)
    }

    /// Write a string as a `u16` byte length and UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the encoding exceeds 65535 bytes.
    pub fn write_utf(&mut self, s: &str) -> Result<()> {
        let len = u16::try_from(s.len()).map_err(|_| {
            Error::InvalidParameter(format!("string of {} bytes is too long", s.len()))
        })?;
        self.write_u16(len)?;
        self.inner.write_all(s.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_layout() {
        let mut w = ByteWriter::new(Vec::new());
        w.write_i32(1).unwrap();
        w.write_utf("ab").unwrap();
        let buf = w.into_inner().unwrap();
        assert_eq!(buf, vec![0, 0, 0, 1, 0, 2, b'a', b'b']);
    }

    #[test]
    fn test_read_primitives() {
        let mut w = ByteWriter::new(Vec::new());
        w.write_f64(-2.5).unwrap();
        w.write_i64(-7).unwrap();
        w.write_bool(true).unwrap();
        let buf = w.into_inner().unwrap();
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_f64().unwrap(), -2.5);
        assert_eq!(r.read_i64().unwrap(), -7);
        assert!(r.read_bool().unwrap());
        assert!(r.finish().is_ok());
    }

    #[test]
    fn test_truncated_input_reports_position() {
        let buf = [0u8, 0, 0, 5, 1, 2];
        let mut r = ByteReader::new(&buf);
        r.read_i32().unwrap();
        match r.read_f64() {
            Err(Error::Format { position, .. }) => assert_eq!(position, 4),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_negative_count() {
        let buf = (-3i32).to_be_bytes();
        let mut r = ByteReader::new(&buf);
        assert!(matches!(
            r.read_count("point", 10),
            Err(Error::Format { position: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let buf = [0u8, 2, 0xff, 0xfe];
        let mut r = ByteReader::new(&buf);
        assert!(r.read_utf().is_err());
    }

    #[test]
    fn test_trailing_bytes() {
        let buf = [0u8; 3];
        let mut r = ByteReader::new(&buf);
        r.read_u8().unwrap();
        assert!(r.finish().is_err());
    }
}
