//! Index FFI functions.

use crate::error::{clear_last_error, report, set_last_error, LidxResult};
use crate::normalizer::shared_normalizer;
use crate::types::{LidxHandle, LidxSearchKind};
use lidx_core::{Index, IndexResult};
use std::ffi::{c_char, CStr};
use std::path::Path;

/// What a [`LidxHandle`] points at.
struct Handle {
    index: Option<Index>,
}

/// Resolves a handle, recording an error for null.
unsafe fn handle_mut<'a>(handle: *mut LidxHandle) -> Result<&'a mut Handle, LidxResult> {
    if handle.is_null() {
        set_last_error("null handle");
        return Err(LidxResult::NullPointer);
    }
    Ok(&mut *handle.cast::<Handle>())
}

/// Resolves a handle to its open index.
unsafe fn open_index<'a>(handle: *mut LidxHandle) -> Result<&'a mut Index, LidxResult> {
    let handle = handle_mut(handle)?;
    match handle.index.as_mut() {
        Some(index) => Ok(index),
        None => {
            set_last_error("index is not open");
            Err(LidxResult::NotOpen)
        }
    }
}

unsafe fn utf8_arg<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, LidxResult> {
    if ptr.is_null() {
        set_last_error(format!("null {what}"));
        return Err(LidxResult::NullPointer);
    }
    CStr::from_ptr(ptr).to_str().map_err(|_| {
        set_last_error(format!("invalid UTF-8 in {what}"));
        LidxResult::InvalidArgument
    })
}

unsafe fn utf16_arg<'a>(ptr: *const u16, len: usize, what: &str) -> Result<&'a [u16], LidxResult> {
    if ptr.is_null() {
        if len == 0 {
            return Ok(&[]);
        }
        set_last_error(format!("null {what}"));
        return Err(LidxResult::NullPointer);
    }
    Ok(std::slice::from_raw_parts(ptr, len))
}

fn finish<T>(result: IndexResult<T>) -> LidxResult {
    match result {
        Ok(_) => LidxResult::Ok,
        Err(e) => report(&e),
    }
}

macro_rules! try_ffi {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(code) => return code,
        }
    };
}

/// Creates a handle with no open index.
///
/// Release it with `lidx_free`.
#[no_mangle]
pub extern "C" fn lidx_new() -> *mut LidxHandle {
    clear_last_error();
    Box::into_raw(Box::new(Handle { index: None })).cast::<LidxHandle>()
}

/// Releases a handle, closing its index first if open.
///
/// A failed final flush is logged and otherwise ignored; call `lidx_close`
/// first to observe it.
///
/// # Safety
///
/// `handle` must come from `lidx_new` and not be used afterwards. Null is
/// ignored.
#[no_mangle]
pub unsafe extern "C" fn lidx_free(handle: *mut LidxHandle) {
    if handle.is_null() {
        return;
    }
    drop(Box::from_raw(handle.cast::<Handle>()));
}

/// Opens the index stored in directory `path`, creating it if absent.
///
/// # Returns
///
/// `LidxResult::Ok` on success, `AlreadyOpen` if the handle already has an
/// index, `Locked` if another handle or process holds the directory.
///
/// # Safety
///
/// - `handle` must be a valid handle
/// - `path` must be a valid null-terminated UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn lidx_open(handle: *mut LidxHandle, path: *const c_char) -> LidxResult {
    clear_last_error();

    let handle = try_ffi!(handle_mut(handle));
    let path = try_ffi!(utf8_arg(path, "path"));

    if handle.index.is_some() {
        set_last_error("index is already open");
        return LidxResult::AlreadyOpen;
    }

    match Index::open(Path::new(path), shared_normalizer()) {
        Ok(index) => {
            handle.index = Some(index);
            LidxResult::Ok
        }
        Err(e) => report(&e),
    }
}

/// Flushes and closes the index. Closing a handle with no open index
/// succeeds.
///
/// The handle stays valid and may be opened again.
///
/// # Safety
///
/// `handle` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn lidx_close(handle: *mut LidxHandle) -> LidxResult {
    clear_last_error();

    let handle = try_ffi!(handle_mut(handle));
    match handle.index.take() {
        Some(index) => finish(index.close()),
        None => LidxResult::Ok,
    }
}

/// Commits buffered mutations.
///
/// # Safety
///
/// `handle` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn lidx_flush(handle: *mut LidxHandle) -> LidxResult {
    clear_last_error();

    let index = try_ffi!(open_index(handle));
    finish(index.flush())
}

/// Indexes UTF-8 `text` as document `doc`, replacing earlier content.
///
/// # Safety
///
/// - `handle` must be a valid handle
/// - `text` must be a valid null-terminated UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn lidx_set(
    handle: *mut LidxHandle,
    doc: u64,
    text: *const c_char,
) -> LidxResult {
    clear_last_error();

    let index = try_ffi!(open_index(handle));
    let text = try_ffi!(utf8_arg(text, "text"));
    finish(index.set_document(doc, text))
}

/// Indexes UTF-16 `text` of `len` code units as document `doc`.
///
/// # Safety
///
/// - `handle` must be a valid handle
/// - `text` must point to `len` readable `u16` values (may be null if `len`
///   is zero)
#[no_mangle]
pub unsafe extern "C" fn lidx_u_set(
    handle: *mut LidxHandle,
    doc: u64,
    text: *const u16,
    len: usize,
) -> LidxResult {
    clear_last_error();

    let index = try_ffi!(open_index(handle));
    let text = try_ffi!(utf16_arg(text, len, "text"));
    finish(index.set_document_utf16(doc, text))
}

/// Removes document `doc`. Removing an unknown document succeeds.
///
/// # Safety
///
/// `handle` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn lidx_remove(handle: *mut LidxHandle, doc: u64) -> LidxResult {
    clear_last_error();

    let index = try_ffi!(open_index(handle));
    finish(index.remove_document(doc))
}

/// Hands `docs` to the caller.
unsafe fn write_docids(docs: Vec<u64>, out_docids: *mut *mut u64, out_count: *mut usize) {
    *out_count = docs.len();
    *out_docids = if docs.is_empty() {
        std::ptr::null_mut()
    } else {
        Box::into_raw(docs.into_boxed_slice()).cast::<u64>()
    };
}

unsafe fn search_with(
    handle: *mut LidxHandle,
    kind: u32,
    out_docids: *mut *mut u64,
    out_count: *mut usize,
    run: impl FnOnce(&mut Index, lidx_core::SearchKind) -> IndexResult<Vec<u64>>,
) -> LidxResult {
    if out_docids.is_null() || out_count.is_null() {
        set_last_error("null output pointer");
        return LidxResult::NullPointer;
    }
    *out_docids = std::ptr::null_mut();
    *out_count = 0;

    let index = try_ffi!(open_index(handle));
    let Some(kind) = LidxSearchKind::from_raw(kind) else {
        set_last_error(format!("unknown search kind {kind}"));
        return LidxResult::InvalidArgument;
    };

    match run(index, kind.into()) {
        Ok(docs) => {
            write_docids(docs, out_docids, out_count);
            LidxResult::Ok
        }
        Err(e) => report(&e),
    }
}

/// Finds documents with a word matching the UTF-8 `token`.
///
/// `kind` is a [`LidxSearchKind`] code. On success `*out_docids` holds
/// `*out_count` ascending document ids, to be released with
/// `lidx_free_docids`; an empty result is a null pointer and zero count.
///
/// # Safety
///
/// - `handle` must be a valid handle
/// - `token` must be a valid null-terminated UTF-8 string
/// - `out_docids` and `out_count` must be valid pointers
#[no_mangle]
pub unsafe extern "C" fn lidx_search(
    handle: *mut LidxHandle,
    token: *const c_char,
    kind: u32,
    out_docids: *mut *mut u64,
    out_count: *mut usize,
) -> LidxResult {
    clear_last_error();

    let token = try_ffi!(utf8_arg(token, "token"));
    search_with(handle, kind, out_docids, out_count, |index, kind| {
        index.search(token, kind)
    })
}

/// Like `lidx_search` with a UTF-16 token of `len` code units.
///
/// # Safety
///
/// - `handle` must be a valid handle
/// - `token` must point to `len` readable `u16` values
/// - `out_docids` and `out_count` must be valid pointers
#[no_mangle]
pub unsafe extern "C" fn lidx_u_search(
    handle: *mut LidxHandle,
    token: *const u16,
    len: usize,
    kind: u32,
    out_docids: *mut *mut u64,
    out_count: *mut usize,
) -> LidxResult {
    clear_last_error();

    let token = try_ffi!(utf16_arg(token, len, "token"));
    search_with(handle, kind, out_docids, out_count, |index, kind| {
        index.search_utf16(token, kind)
    })
}

/// Releases a document id array returned by a search.
///
/// # Safety
///
/// `docids` and `count` must be exactly what a search returned. Null is
/// ignored.
#[no_mangle]
pub unsafe extern "C" fn lidx_free_docids(docids: *mut u64, count: usize) {
    if docids.is_null() {
        return;
    }
    drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
        docids, count,
    )));
}

/// Returns the library version as a null-terminated string.
///
/// The returned pointer is static and should not be freed.
#[no_mangle]
pub extern "C" fn lidx_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast::<c_char>()
}
