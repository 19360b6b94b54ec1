use std::ffi::{CStr, CString};
use std::os::raw::c_char;

pub(crate) fn cstr(bytes: &'static [u8]) -> *const c_char {
    debug_assert!(
        bytes.last() == Some(&0),
        "C string must be NUL-terminated"
    );
    bytes.as_ptr().cast()
}

/// Display form of a static C string constant, for log fields and errors.
pub(crate) fn display(bytes: &'static [u8]) -> String {
    CStr::from_bytes_until_nul(bytes)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Copies a libobs-owned string. Null yields an empty string.
pub(crate) unsafe fn owned_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Interior NULs are replaced so arbitrary log text can cross into C.
pub(crate) fn to_cstring(text: &str) -> CString {
    CString::new(text.replace('\0', "\u{FFFD}")).unwrap_or_default()
}
