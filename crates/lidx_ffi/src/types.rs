//! Type definitions for FFI.

use lidx_core::SearchKind;

/// An opaque index handle.
///
/// Created by `lidx_new`, released by `lidx_free`. Never dereference or
/// modify directly.
#[repr(C)]
pub struct LidxHandle {
    _private: [u8; 0],
}

/// Search mode codes accepted by `lidx_search` and `lidx_u_search`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LidxSearchKind {
    /// Words starting with the token.
    Prefix = 0,
    /// Words containing the token.
    Substring = 1,
    /// Words ending with the token.
    Suffix = 2,
}

impl LidxSearchKind {
    /// Converts a raw code, rejecting unknown values.
    pub fn from_raw(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Prefix),
            1 => Some(Self::Substring),
            2 => Some(Self::Suffix),
            _ => None,
        }
    }
}

impl From<LidxSearchKind> for SearchKind {
    fn from(kind: LidxSearchKind) -> Self {
        match kind {
            LidxSearchKind::Prefix => SearchKind::Prefix,
            LidxSearchKind::Substring => SearchKind::Substring,
            LidxSearchKind::Suffix => SearchKind::Suffix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes() {
        assert_eq!(LidxSearchKind::from_raw(0), Some(LidxSearchKind::Prefix));
        assert_eq!(LidxSearchKind::from_raw(2), Some(LidxSearchKind::Suffix));
        assert_eq!(LidxSearchKind::from_raw(3), None);
        assert_eq!(
            SearchKind::from(LidxSearchKind::Substring),
            SearchKind::Substring
        );
    }
}
