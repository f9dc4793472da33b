//! Result codes and last-error reporting.

use lidx_core::{ErrorKind, IndexError};
use lidx_storage::StorageError;
use std::cell::RefCell;
use std::ffi::CString;

/// Result code for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LidxResult {
    /// Operation succeeded.
    Ok = 0,
    /// Generic error.
    Error = 1,
    /// Invalid argument.
    InvalidArgument = 2,
    /// Null pointer.
    NullPointer = 3,
    /// The handle has no open index.
    NotOpen = 4,
    /// The handle already has an open index.
    AlreadyOpen = 5,
    /// The index directory is locked by another handle or process.
    Locked = 6,
    /// Corruption detected.
    Corruption = 7,
    /// I/O error.
    IoError = 8,
    /// Text could not be normalized.
    NormalizationFailed = 9,
}

impl LidxResult {
    /// Returns true if the result indicates success.
    pub fn is_ok(self) -> bool {
        self == LidxResult::Ok
    }

    /// Returns true if the result indicates an error.
    pub fn is_err(self) -> bool {
        self != LidxResult::Ok
    }
}

impl From<&IndexError> for LidxResult {
    fn from(err: &IndexError) -> Self {
        match err {
            IndexError::Storage(StorageError::Locked) => LidxResult::Locked,
            IndexError::Storage(StorageError::Io(_)) => LidxResult::IoError,
            IndexError::Storage(
                StorageError::Corrupted(_) | StorageError::ChecksumMismatch { .. },
            )
            | IndexError::Codec(_)
            | IndexError::Corrupted { .. } => LidxResult::Corruption,
            _ if err.kind() == ErrorKind::NormalizationFailure => LidxResult::NormalizationFailed,
            _ => LidxResult::Error,
        }
    }
}

// Thread-local storage for last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Sets the last error message.
pub(crate) fn set_last_error(message: impl Into<String>) {
    let msg = message.into();
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clears the last error.
pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Records `err` as the last error and returns its code.
pub(crate) fn report(err: &IndexError) -> LidxResult {
    set_last_error(err.to_string());
    LidxResult::from(err)
}

/// Gets the last error message as a C string.
///
/// Returns null if no error is set.
///
/// # Safety
///
/// The returned pointer is valid until the next FFI call on this thread.
#[no_mangle]
pub extern "C" fn lidx_get_last_error() -> *const std::ffi::c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(cstr) => cstr.as_ptr(),
        None => std::ptr::null(),
    })
}

/// Clears the last error message.
#[no_mangle]
pub extern "C" fn lidx_clear_error() {
    clear_last_error();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn result_codes() {
        assert_eq!(LidxResult::Ok as i32, 0);
        assert_eq!(LidxResult::NormalizationFailed as i32, 9);
        assert!(LidxResult::Ok.is_ok());
        assert!(LidxResult::Error.is_err());
    }

    #[test]
    fn error_mapping() {
        let locked = IndexError::Storage(StorageError::Locked);
        assert_eq!(LidxResult::from(&locked), LidxResult::Locked);

        let io = IndexError::Storage(StorageError::Io(io::Error::new(
            io::ErrorKind::Other,
            "boom",
        )));
        assert_eq!(LidxResult::from(&io), LidxResult::IoError);

        let norm = IndexError::normalization("");
        assert_eq!(LidxResult::from(&norm), LidxResult::NormalizationFailed);

        let bad = IndexError::corrupted("bad postings");
        assert_eq!(LidxResult::from(&bad), LidxResult::Corruption);
    }

    #[test]
    fn last_error() {
        clear_last_error();
        assert!(lidx_get_last_error().is_null());

        set_last_error("test error");
        let ptr = lidx_get_last_error();
        assert!(!ptr.is_null());

        // Safety: we just set it
        let msg = unsafe { std::ffi::CStr::from_ptr(ptr) };
        assert_eq!(msg.to_str().unwrap(), "test error");

        lidx_clear_error();
        assert!(lidx_get_last_error().is_null());
    }
}
