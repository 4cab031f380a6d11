//! C-FFI layer for the IOU verifier, used by Go (cgo) and other FFI consumers.
//!
//! ZERO logic here. All calls delegate to `iou-core`.
//!
//! # Memory Contract
//!
//! All functions that return `*mut c_char` allocate via `CString`.
//! The caller MUST free the returned string by calling `iou_free_string()`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Result from an IOU FFI call.
/// If `error` is null, the call succeeded and `result` contains the output.
/// If `error` is non-null, the call failed and `error` contains the error message.
/// The caller MUST free both `result` and `error` with `iou_free_string()`.
#[repr(C)]
pub struct IouResult {
    pub result: *mut c_char,
    pub error: *mut c_char,
}

impl IouResult {
    fn ok(value: String) -> Self {
        IouResult {
            result: into_c_string(value, ""),
            error: std::ptr::null_mut(),
        }
    }

    fn err(msg: String) -> Self {
        IouResult {
            result: std::ptr::null_mut(),
            error: into_c_string(msg, "unknown error"),
        }
    }
}

/// Interior NUL bytes cannot cross the boundary; fall back to `fallback`.
fn into_c_string(value: String, fallback: &str) -> *mut c_char {
    CString::new(value)
        .or_else(|_| CString::new(fallback))
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}

/// Helper: convert a C string pointer to a Rust &str.
/// Returns None if the pointer is null or not valid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Verify a JSON transaction proposal against the IOU contract.
/// Returns JSON: { "transaction_id": "...", "command": "...", "transition": "...",
/// "accepted": bool, "reason": "..." | null }
///
/// A rejected proposal is a successful call with `"accepted": false`.
/// `error` is set only when the proposal cannot be decoded.
///
/// # Safety
/// `proposal` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `iou_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn iou_verify_transaction(proposal: *const c_char) -> IouResult {
    let proposal = match cstr_to_str(proposal) {
        Some(s) => s,
        None => return IouResult::err("null or invalid UTF-8 input".into()),
    };

    let report = match iou_core::verify_proposal_json(proposal) {
        Ok(report) => report,
        Err(e) => return IouResult::err(e.to_string()),
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => IouResult::ok(json),
        Err(e) => IouResult::err(format!("Serialization error: {}", e)),
    }
}

/// Compute the SHA-256 transaction id of a JSON proposal.
///
/// # Safety
/// `proposal` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `iou_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn iou_transaction_id(proposal: *const c_char) -> IouResult {
    let proposal = match cstr_to_str(proposal) {
        Some(s) => s,
        None => return IouResult::err("null or invalid UTF-8 input".into()),
    };

    match iou_core::LedgerTransaction::from_json(proposal).and_then(|tx| tx.id()) {
        Ok(id) => IouResult::ok(id.to_string()),
        Err(e) => IouResult::err(e.to_string()),
    }
}

/// Free a string previously returned by an IOU FFI function.
///
/// # Safety
/// `ptr` must be a pointer previously returned by an IOU FFI function,
/// or null (in which case this is a no-op).
#[no_mangle]
pub unsafe extern "C" fn iou_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
