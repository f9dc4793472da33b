//! Batch log record framing.
//!
//! ```text
//! | magic (4) | version (2) | length (4) | payload (N) | crc32 (4) |
//! ```
//!
//! The checksum covers everything before it. One record holds one
//! [`WriteBatch`], which is what makes batch writes atomic on disk.
//!
//! ## Recovery Policy
//!
//! - **Truncated header or payload** at the end of the log is a write torn by
//!   a crash: replay stops there and the tail is discarded.
//! - **Bad magic, unknown version, or checksum mismatch** on a complete record
//!   is corruption and fails the open.

use crate::batch::WriteBatch;
use crate::error::{StorageError, StorageResult};

/// Magic bytes identifying a log record.
pub const LOG_MAGIC: [u8; 4] = *b"LIDX";

/// Current log format version.
pub const LOG_VERSION: u16 = 1;

/// magic (4) + version (2) + length (4)
const HEADER_SIZE: usize = 10;

const CRC_SIZE: usize = 4;

/// Frames an encoded batch payload as a log record.
///
/// # Errors
///
/// Returns an error if the payload exceeds `u32::MAX` bytes.
pub fn frame(payload: &[u8]) -> StorageResult<Vec<u8>> {
    let len = u32::try_from(payload.len())
        .map_err(|_| StorageError::corrupted("batch payload exceeds 4 GiB"))?;

    let mut record = Vec::with_capacity(HEADER_SIZE + payload.len() + CRC_SIZE);
    record.extend_from_slice(&LOG_MAGIC);
    record.extend_from_slice(&LOG_VERSION.to_le_bytes());
    record.extend_from_slice(&len.to_le_bytes());
    record.extend_from_slice(payload);

    let crc = crc32fast::hash(&record);
    record.extend_from_slice(&crc.to_le_bytes());
    Ok(record)
}

/// Result of replaying a log image.
#[derive(Debug, Default)]
pub struct Replay {
    /// Batches of every complete record, in log order.
    pub batches: Vec<WriteBatch>,
    /// Length of the valid prefix of the log.
    pub valid_len: u64,
}

impl Replay {
    /// Returns true if bytes after the last complete record were dropped.
    #[must_use]
    pub fn has_torn_tail(&self, log_len: u64) -> bool {
        self.valid_len < log_len
    }
}

/// Parses every complete record of a log image.
///
/// # Errors
///
/// Fails on bad magic, unsupported version, checksum mismatch, or an
/// undecodable batch payload.
pub fn replay(log: &[u8]) -> StorageResult<Replay> {
    let mut replay = Replay::default();
    let mut offset = 0usize;

    while offset < log.len() {
        let rest = &log[offset..];
        if rest.len() < HEADER_SIZE {
            break;
        }

        if rest[0..4] != LOG_MAGIC {
            return Err(StorageError::corrupted(format!(
                "bad record magic at offset {offset}"
            )));
        }

        let version = u16::from_le_bytes([rest[4], rest[5]]);
        if version != LOG_VERSION {
            return Err(StorageError::corrupted(format!(
                "unsupported log version {version} at offset {offset}"
            )));
        }

        let len = u32::from_le_bytes([rest[6], rest[7], rest[8], rest[9]]) as usize;
        let total = HEADER_SIZE + len + CRC_SIZE;
        if rest.len() < total {
            break;
        }

        let body = &rest[..HEADER_SIZE + len];
        let stored = u32::from_le_bytes([
            rest[HEADER_SIZE + len],
            rest[HEADER_SIZE + len + 1],
            rest[HEADER_SIZE + len + 2],
            rest[HEADER_SIZE + len + 3],
        ]);
        let actual = crc32fast::hash(body);
        if stored != actual {
            return Err(StorageError::ChecksumMismatch {
                offset: offset as u64,
                expected: stored,
                actual,
            });
        }

        replay
            .batches
            .push(WriteBatch::decode_payload(&body[HEADER_SIZE..])?);
        offset += total;
    }

    replay.valid_len = offset as u64;
    Ok(replay)
}
