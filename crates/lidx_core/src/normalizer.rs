//! Word segmentation and transliteration.
//!
//! Text is split at Unicode word boundaries (UAX #29). Segments holding at
//! least one alphanumeric character are words; whitespace and punctuation
//! segments are skipped. Each word is then folded to ASCII:
//!
//! ```text
//! NFD -> drop combining marks -> NFC -> Latin transliteration -> lowercase
//! ```
//!
//! so `"Café"` and `"CAFE"` both become `"cafe"`, `"Straße"` becomes
//! `"strasse"` and `"Привет"` becomes `"privet"`. Whitespace and control
//! characters produced by transliteration are dropped, so every word is a
//! single run of printable ASCII.

use crate::error::{IndexError, IndexResult};
use crate::keys;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// One span of segmented text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The span itself.
    pub text: &'a str,
    /// Byte offset of the span in the source text.
    pub offset: usize,
    /// Whether the span is a word rather than space or punctuation.
    pub is_word: bool,
}

/// Segments and folds text into index words.
///
/// A `Normalizer` is immutable and cheap to share: build one, wrap it in an
/// [`std::sync::Arc`], and hand clones to every [`crate::Index`].
///
/// # Example
///
/// ```
/// use lidx_core::Normalizer;
///
/// let normalizer = Normalizer::new();
/// let words: Vec<String> = normalizer.words("Crème brûlée, s'il vous plaît").collect();
/// assert_eq!(words, ["creme", "brulee", "s'il", "vous", "plait"]);
/// ```
#[derive(Debug, Default)]
pub struct Normalizer {
    _private: (),
}

impl Normalizer {
    /// Creates a normalizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `text` at word boundaries, keeping every span.
    pub fn segments<'a>(&self, text: &'a str) -> impl Iterator<Item = Segment<'a>> + 'a {
        text.split_word_bound_indices()
            .map(|(offset, span)| Segment {
                text: span,
                offset,
                is_word: span.chars().any(char::is_alphanumeric),
            })
    }

    /// Folds one word or query token.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Normalization`] if the folded form is empty or
    /// starts with a byte reserved by the key schema.
    pub fn transliterate(&self, input: &str) -> IndexResult<String> {
        let stripped: String = input
            .nfd()
            .filter(|&c| !is_combining_mark(c))
            .nfc()
            .collect();

        // Characters without a Latin form are dropped rather than replaced.
        let folded: String = deunicode::deunicode_with_tofu(&stripped, "")
            .chars()
            .filter(char::is_ascii_graphic)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if folded.is_empty() || keys::is_reserved(folded.as_bytes()) {
            return Err(IndexError::normalization(input));
        }
        Ok(folded)
    }

    /// Folded words of `text`, in order, skipping segments that don't fold.
    pub fn words<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.segments(text)
            .filter(|segment| segment.is_word)
            .filter_map(move |segment| match self.transliterate(segment.text) {
                Ok(word) => Some(word),
                Err(_) => {
                    tracing::trace!(segment = segment.text, "skipping unnormalizable segment");
                    None
                }
            })
    }
}
