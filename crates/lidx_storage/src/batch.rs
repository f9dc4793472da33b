//! Atomic write batches and their log payload encoding.

use crate::error::{StorageError, StorageResult};
use lidx_codec::VarintReader;

/// Operation tag for puts in an encoded batch.
const TAG_PUT: u8 = 1;
/// Operation tag for deletes in an encoded batch.
const TAG_DELETE: u8 = 2;

/// A single mutation inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Insert or overwrite a key.
    Put {
        /// Key bytes.
        key: Vec<u8>,
        /// Value bytes.
        value: Vec<u8>,
    },
    /// Remove a key.
    Delete {
        /// Key bytes.
        key: Vec<u8>,
    },
}

impl BatchOp {
    /// Returns the key this operation touches.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// An ordered list of mutations applied atomically by [`crate::KvStore::write`].
///
/// Operations apply in insertion order, so a later operation on the same key
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a put.
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.ops.push(BatchOp::Put { key, value });
    }

    /// Queues a delete.
    pub fn delete(&mut self, key: Vec<u8>) {
        self.ops.push(BatchOp::Delete { key });
    }

    /// Number of queued operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if no operations are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterates over the queued operations.
    pub fn iter(&self) -> impl Iterator<Item = &BatchOp> {
        self.ops.iter()
    }

    /// Serializes the batch for the file store log.
    ///
    /// Each operation is `tag | varint key_len | key`, followed for puts by
    /// `varint value_len | value`.
    #[must_use]
    pub fn encode_payload(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for op in &self.ops {
            match op {
                BatchOp::Put { key, value } => {
                    buf.push(TAG_PUT);
                    put_bytes(&mut buf, key);
                    put_bytes(&mut buf, value);
                }
                BatchOp::Delete { key } => {
                    buf.push(TAG_DELETE);
                    put_bytes(&mut buf, key);
                }
            }
        }
        buf
    }

    /// Deserializes a batch produced by [`WriteBatch::encode_payload`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupted`] on an unknown tag or a length that
    /// runs past the end of the payload.
    pub fn decode_payload(payload: &[u8]) -> StorageResult<Self> {
        let mut batch = Self::new();
        let mut cursor = 0;

        while cursor < payload.len() {
            let tag = payload[cursor];
            cursor += 1;
            match tag {
                TAG_PUT => {
                    let key = take_bytes(payload, &mut cursor)?;
                    let value = take_bytes(payload, &mut cursor)?;
                    batch.put(key, value);
                }
                TAG_DELETE => {
                    let key = take_bytes(payload, &mut cursor)?;
                    batch.delete(key);
                }
                other => {
                    return Err(StorageError::corrupted(format!(
                        "unknown batch operation tag {other} at byte {}",
                        cursor - 1
                    )));
                }
            }
        }

        Ok(batch)
    }
}

impl IntoIterator for WriteBatch {
    type Item = BatchOp;
    type IntoIter = std::vec::IntoIter<BatchOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    lidx_codec::encode(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

fn take_bytes(payload: &[u8], cursor: &mut usize) -> StorageResult<Vec<u8>> {
    let mut reader = VarintReader::new(&payload[*cursor..]);
    let len = reader
        .read()
        .map_err(|e| StorageError::corrupted(format!("bad length in batch: {e}")))?;
    let start = *cursor + reader.position();
    let end = usize::try_from(len)
        .ok()
        .and_then(|len| start.checked_add(len))
        .filter(|&end| end <= payload.len())
        .ok_or_else(|| StorageError::corrupted("batch entry runs past end of payload"))?;
    *cursor = end;
    Ok(payload[start..end].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_roundtrip() {
        let mut batch = WriteBatch::new();
        batch.put(b"hello".to_vec(), vec![0x00, 0x01]);
        batch.delete(b",\x05".to_vec());
        batch.put(b".".to_vec(), Vec::new());

        let payload = batch.encode_payload();
        let decoded = WriteBatch::decode_payload(&payload).unwrap();
        assert_eq!(decoded, batch);
    }

    #[test]
    fn empty_payload_is_empty_batch() {
        let decoded = WriteBatch::decode_payload(&[]).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn unknown_tag_is_corruption() {
        let result = WriteBatch::decode_payload(&[9, 0]);
        assert!(matches!(result, Err(StorageError::Corrupted(_))));
    }

    #[test]
    fn overlong_entry_is_corruption() {
        // Put with a key length of 10 but only two key bytes present.
        let result = WriteBatch::decode_payload(&[TAG_PUT, 10, b'a', b'b']);
        assert!(matches!(result, Err(StorageError::Corrupted(_))));
    }

    #[test]
    fn op_key_accessor() {
        let mut batch = WriteBatch::new();
        batch.put(b"k1".to_vec(), b"v".to_vec());
        batch.delete(b"k2".to_vec());
        let keys: Vec<&[u8]> = batch.iter().map(BatchOp::key).collect();
        assert_eq!(keys, vec![b"k1".as_slice(), b"k2".as_slice()]);
    }
}
