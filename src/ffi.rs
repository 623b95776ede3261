#![allow(dead_code)]
//! C-ABI surface so host mini-app shells can embed the engine without going
//! through the CLI. Exposes version identifiers, error categories, and the
//! direct D-Day computation; richer views come back as JSON strings.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::OnceLock;

use crate::dday::{self, date_math};

/// Semantic version of the Rust core (mirrors `Cargo.toml`).
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Semantic version of the FFI surface. Bumps when ABI/contract changes.
pub const FFI_VERSION: &str = "0.1.0";

/// Error categories surfaced across the FFI boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy)]
pub enum FfiErrorCategory {
    Ok = 0,
    Validation = 1,
    Persistence = 2,
    Internal = 3,
}

impl From<FfiErrorCategory> for i32 {
    fn from(value: FfiErrorCategory) -> Self {
        value as i32
    }
}

/// Returns the core (Rust) semantic version as a C string.
#[no_mangle]
pub extern "C" fn ffi_core_version() -> *const c_char {
    static CORE: OnceLock<CString> = OnceLock::new();
    CORE.get_or_init(|| CString::new(CORE_VERSION).expect("static core version"))
        .as_ptr()
}

/// Returns the FFI interface semantic version as a C string.
#[no_mangle]
pub extern "C" fn ffi_version() -> *const c_char {
    static FFI: OnceLock<CString> = OnceLock::new();
    FFI.get_or_init(|| CString::new(FFI_VERSION).expect("static ffi version"))
        .as_ptr()
}

/// Computes the signed D-Day value for `target` relative to `today`, both
/// `YYYY-MM-DD` C strings. Null or malformed input yields 0, matching the
/// engine's degrade-to-zero policy.
///
/// # Safety
/// `today` and `target` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn ffi_day_offset(today: *const c_char, target: *const c_char) -> i64 {
    let (Some(today), Some(target)) = (read_str(today), read_str(target)) else {
        return 0;
    };
    let Some(today) = date_math::parse_iso(today) else {
        return 0;
    };
    dday::day_offset(today, target)
}

/// Formats a D-Day value into its canonical label, returned as an owned C
/// string the caller must release with [`ffi_string_free`].
#[no_mangle]
pub extern "C" fn ffi_dday_label(days: i64) -> *mut c_char {
    CString::new(dday::dday_label(days))
        .expect("label has no interior NUL")
        .into_raw()
}

/// Releases a string previously returned by this module.
///
/// # Safety
/// `ptr` must be null or a pointer obtained from [`ffi_dday_label`].
#[no_mangle]
pub unsafe extern "C" fn ffi_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Classifies store failures into stable FFI categories.
pub fn classify_error(err: &crate::errors::StoreError) -> FfiErrorCategory {
    use crate::errors::StoreError;
    match err {
        StoreError::UnknownItem(_) => FfiErrorCategory::Validation,
        StoreError::Io(_) | StoreError::Serde(_) => FfiErrorCategory::Persistence,
    }
}

unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}
