//! Base-128 varint encoding.
//!
//! Each byte carries seven value bits, least-significant group first. The
//! high bit (`0x80`) is set on every byte except the last.
//!
//! ```text
//! 0        -> 00
//! 127      -> 7f
//! 128      -> 80 01
//! u64::MAX -> ff ff ff ff ff ff ff ff ff 01
//! ```

use crate::error::{CodecError, CodecResult};

/// Continuation flag.
const CONTINUATION: u8 = 0x80;

/// Mask for the seven value bits of a byte.
const GROUP_MASK: u8 = 0x7f;

/// Longest possible encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Appends `value` to `buf`.
pub fn encode(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let group = (value as u8) & GROUP_MASK;
        value >>= 7;
        if value == 0 {
            buf.push(group);
            return;
        }
        buf.push(group | CONTINUATION);
    }
}

/// Encodes `value` into a fresh vector.
#[must_use]
pub fn encode_to_vec(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(value));
    encode(&mut buf, value);
    buf
}

/// Returns the number of bytes `encode` writes for `value`.
#[must_use]
pub const fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 {
        1
    } else {
        (bits + 6) / 7
    }
}

/// Decodes one value starting at `position`.
///
/// Returns the value and the position just past its terminating byte.
///
/// # Errors
///
/// Returns [`CodecError::UnexpectedEof`] if `buf` ends before the terminating
/// byte and [`CodecError::Overflow`] if the value does not fit in a `u64`.
pub fn decode(buf: &[u8], position: usize) -> CodecResult<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0u32;
    let mut cursor = position;

    loop {
        let Some(&byte) = buf.get(cursor) else {
            return Err(CodecError::UnexpectedEof { position: cursor });
        };
        cursor += 1;

        let group = u64::from(byte & GROUP_MASK);
        // The tenth byte may only contribute the single remaining bit.
        if (shift == 63 && group > 1) || shift > 63 {
            return Err(CodecError::Overflow { position });
        }
        value |= group << shift;

        if byte & CONTINUATION == 0 {
            return Ok((value, cursor));
        }
        shift += 7;
    }
}

/// Appends every value of `values` to `buf`.
pub fn encode_all<I>(buf: &mut Vec<u8>, values: I)
where
    I: IntoIterator<Item = u64>,
{
    for value in values {
        encode(buf, value);
    }
}

/// Decodes a buffer that holds nothing but concatenated varints.
///
/// # Errors
///
/// Fails if any value is truncated or overflows.
pub fn decode_all(buf: &[u8]) -> CodecResult<Vec<u64>> {
    crate::VarintReader::new(buf).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_encodings() {
        assert_eq!(encode_to_vec(0), vec![0x00]);
        assert_eq!(encode_to_vec(1), vec![0x01]);
        assert_eq!(encode_to_vec(127), vec![0x7f]);
        assert_eq!(encode_to_vec(128), vec![0x80, 0x01]);
        assert_eq!(encode_to_vec(300), vec![0xac, 0x02]);
        assert_eq!(encode_to_vec(16_384), vec![0x80, 0x80, 0x01]);
        assert_eq!(
            encode_to_vec(u64::MAX),
            vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
        );
    }

    #[test]
    fn encoded_len_boundaries() {
        assert_eq!(encoded_len(0), 1);
        assert_eq!(encoded_len(127), 1);
        assert_eq!(encoded_len(128), 2);
        assert_eq!(encoded_len(16_383), 2);
        assert_eq!(encoded_len(16_384), 3);
        assert_eq!(encoded_len(u64::MAX), MAX_VARINT_LEN);
    }

    #[test]
    fn decode_at_offset() {
        let mut buf = vec![0xde, 0xad];
        encode(&mut buf, 300);
        buf.push(0x05);

        let (value, next) = decode(&buf, 2).unwrap();
        assert_eq!(value, 300);
        assert_eq!(next, 4);

        let (value, next) = decode(&buf, next).unwrap();
        assert_eq!(value, 5);
        assert_eq!(next, buf.len());
    }

    #[test]
    fn decode_truncated_fails() {
        let result = decode(&[0x80, 0x80], 0);
        assert_eq!(result, Err(CodecError::UnexpectedEof { position: 2 }));
    }

    #[test]
    fn decode_empty_fails() {
        let result = decode(&[], 0);
        assert_eq!(result, Err(CodecError::UnexpectedEof { position: 0 }));
    }

    #[test]
    fn decode_position_past_end_fails() {
        let result = decode(&[0x01], 5);
        assert!(matches!(result, Err(CodecError::UnexpectedEof { .. })));
    }

    #[test]
    fn decode_overflow_fails() {
        // Tenth byte carries more than the one remaining bit.
        let buf = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02];
        assert_eq!(decode(&buf, 0), Err(CodecError::Overflow { position: 0 }));

        // Eleven bytes can never be valid.
        let buf = [0x80; 11];
        assert!(matches!(decode(&buf, 0), Err(CodecError::Overflow { .. })));
    }

    #[test]
    fn decode_all_list() {
        let mut buf = Vec::new();
        encode_all(&mut buf, [3, 1_000, 0, u64::MAX]);
        assert_eq!(decode_all(&buf).unwrap(), vec![3, 1_000, 0, u64::MAX]);
        assert!(decode_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn decode_all_truncated_tail_fails() {
        let mut buf = Vec::new();
        encode_all(&mut buf, [1, 2]);
        buf.push(0x80);
        assert!(decode_all(&buf).is_err());
    }

    proptest! {
        #[test]
        fn roundtrip_any_value(value in any::<u64>(), prefix in prop::collection::vec(any::<u8>(), 0..8)) {
            let mut buf = prefix.clone();
            encode(&mut buf, value);

            let (decoded, next) = decode(&buf, prefix.len()).unwrap();
            prop_assert_eq!(decoded, value);
            prop_assert_eq!(next, buf.len());
            prop_assert_eq!(next - prefix.len(), encoded_len(value));
        }

        #[test]
        fn only_last_byte_terminates(value in any::<u64>()) {
            let buf = encode_to_vec(value);
            let (last, rest) = buf.split_last().unwrap();
            prop_assert_eq!(last & CONTINUATION, 0);
            prop_assert!(rest.iter().all(|b| b & CONTINUATION != 0));
        }
    }
}
