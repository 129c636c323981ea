//! Cache key validation
//!
//! Keys become file names directly under the store root, so a key is only
//! accepted when it is already a safe base name: sanitizing it must be a
//! no-op. Callers are expected to sanitize their own keys; this module only
//! refuses the ones that were not.

use once_cell::sync::Lazy;
use regex::Regex;

/// Joining characters that sanitization turns into `-`
static JOINERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ &_=+:]").expect("valid regex"));

/// Everything outside this set is dropped by sanitization
static ILLEGAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9.\-]").expect("valid regex"));

/// Sanitize a string so it can be used as a file base name.
///
/// Joining characters become dashes, anything other than ASCII letters,
/// digits, `-` and `.` is removed, and runs of `--` and `..` are collapsed.
pub fn sanitize_base_name(s: &str) -> String {
    let s = JOINERS.replace_all(s, "-");
    let s = ILLEGAL.replace_all(&s, "");
    s.replace("--", "-").replace("..", ".")
}

/// Split a key into its base name and extension (with the dot).
///
/// The extension is the text from the last `.` of the key, unless that dot
/// is the first character.
pub fn split_extension(key: &str) -> (&str, &str) {
    match key.rfind('.') {
        Some(idx) if idx > 0 => key.split_at(idx),
        _ => (key, ""),
    }
}

/// Check whether a key maps to exactly one file directly under a directory.
///
/// Both the base name and the extension must survive sanitization
/// unchanged, so traversal cannot be smuggled in through the extension.
pub fn is_safe_key(key: &str) -> bool {
    if key.is_empty() || key == "." || key.contains("..") {
        return false;
    }

    let (base, ext) = split_extension(key);
    sanitize_base_name(base) == base && sanitize_base_name(ext) == ext
}
