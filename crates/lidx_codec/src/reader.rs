//! Cursor over a varint-concatenated byte slice.

use crate::error::{CodecError, CodecResult};
use crate::varint;

/// Reads consecutive varints from a byte slice.
///
/// Iteration yields `Err` once and then stops if the input is malformed.
///
/// ```
/// use lidx_codec::{encode_all, VarintReader};
///
/// let mut buf = Vec::new();
/// encode_all(&mut buf, [7, 300]);
/// let values: Vec<u64> = VarintReader::new(&buf).collect::<Result<_, _>>().unwrap();
/// assert_eq!(values, vec![7, 300]);
/// ```
#[derive(Debug, Clone)]
pub struct VarintReader<'a> {
    buf: &'a [u8],
    position: usize,
    failed: bool,
}

impl<'a> VarintReader<'a> {
    /// Creates a reader positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            position: 0,
            failed: false,
        }
    }

    /// Current byte offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true once every byte has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.buf.len()
    }

    /// Reads the next value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] at the end of input or on a
    /// truncated value, and [`CodecError::Overflow`] on an oversized one.
    pub fn read(&mut self) -> CodecResult<u64> {
        let (value, next) = varint::decode(self.buf, self.position)?;
        self.position = next;
        Ok(value)
    }

    /// Fails if any bytes remain.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TrailingBytes`] when the input is not exhausted.
    pub fn finish(&self) -> CodecResult<()> {
        if self.is_exhausted() {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes {
                position: self.position,
                remaining: self.buf.len() - self.position,
            })
        }
    }
}

impl Iterator for VarintReader<'_> {
    type Item = CodecResult<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.is_exhausted() {
            return None;
        }
        let result = self.read();
        self.failed = result.is_err();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_all;

    #[test]
    fn reads_in_order() {
        let mut buf = Vec::new();
        encode_all(&mut buf, [1, 128, 42]);

        let mut reader = VarintReader::new(&buf);
        assert_eq!(reader.read().unwrap(), 1);
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read().unwrap(), 128);
        assert_eq!(reader.read().unwrap(), 42);
        assert!(reader.is_exhausted());
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn read_past_end_fails() {
        let mut reader = VarintReader::new(&[0x01]);
        reader.read().unwrap();
        assert!(matches!(
            reader.read(),
            Err(CodecError::UnexpectedEof { position: 1 })
        ));
    }

    #[test]
    fn finish_reports_leftovers() {
        let buf = [0x01, 0x02, 0x03];
        let mut reader = VarintReader::new(&buf);
        reader.read().unwrap();
        assert_eq!(
            reader.finish(),
            Err(CodecError::TrailingBytes {
                position: 1,
                remaining: 2
            })
        );
    }

    #[test]
    fn iterator_stops_after_error() {
        let buf = [0x05, 0x80];
        let items: Vec<_> = VarintReader::new(&buf).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Ok(5));
        assert!(items[1].is_err());
    }
}
