//! Key-space scans for prefix, substring and suffix queries.

use crate::error::{IndexError, IndexResult};
use crate::keys;
use crate::postings::Postings;
use lidx_storage::KvStore;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How a query token is matched against indexed words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchKind {
    /// Words starting with the token.
    #[default]
    Prefix,
    /// Words containing the token anywhere.
    Substring,
    /// Words ending with the token.
    Suffix,
}

impl SearchKind {
    /// Returns true if `word` matches `token` under this kind.
    #[must_use]
    pub fn matches(self, word: &[u8], token: &[u8]) -> bool {
        match self {
            Self::Prefix => word.starts_with(token),
            Self::Suffix => word.ends_with(token),
            Self::Substring => {
                token.is_empty() || word.windows(token.len()).any(|window| window == token)
            }
        }
    }

    /// Name used by `Display` and `FromStr`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Substring => "substring",
            Self::Suffix => "suffix",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown search kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search kind '{0}' (expected prefix, substring or suffix)")]
pub struct ParseSearchKindError(String);

impl FromStr for SearchKind {
    type Err = ParseSearchKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "substring" | "substr" => Ok(Self::Substring),
            "suffix" => Ok(Self::Suffix),
            _ => Err(ParseSearchKindError(s.to_string())),
        }
    }
}

/// Finds all documents containing a word that matches `token`.
///
/// `token` must already be normalized. Prefix queries seek straight to the
/// token and stop at the first key past it; substring and suffix queries walk
/// every word key.
///
/// The result is sorted and free of duplicates.
///
/// # Errors
///
/// Returns an error if the store fails or a matching postings value does
/// not decode.
pub fn scan(store: &dyn KvStore, token: &str, kind: SearchKind) -> IndexResult<Vec<u64>> {
    let token = token.as_bytes();
    let mut docs = BTreeSet::new();
    let mut matched = 0usize;
    let mut failure: Option<IndexError> = None;

    let mut collect = |value: &[u8]| -> bool {
        match Postings::decode(value) {
            Ok(postings) => {
                matched += 1;
                docs.extend(postings.docs);
                true
            }
            Err(err) => {
                failure = Some(err);
                false
            }
        }
    };

    match kind {
        SearchKind::Prefix => store.scan_from(token, &mut |key, value| {
            if !key.starts_with(token) {
                return false;
            }
            if keys::is_reserved(key) {
                return true;
            }
            collect(value)
        })?,
        SearchKind::Substring | SearchKind::Suffix => store.scan_from(b"", &mut |key, value| {
            if keys::is_reserved(key) || !kind.matches(key, token) {
                return true;
            }
            collect(value)
        })?,
    }

    if let Some(err) = failure {
        return Err(err);
    }

    debug!(%kind, matched, documents = docs.len(), "search complete");
    Ok(docs.into_iter().collect())
}
