//! JSON Pointer (RFC 6901) string primitives.
//!
//! The reconstruction core in `json-rewind` treats pointer handling as a
//! pre-existing concern; this crate provides it: escaping, parsing,
//! formatting, syntax validation, and the strict-ancestor test between two
//! paths. It knows nothing about documents or values.
//!
//! # Example
//!
//! ```
//! use json_rewind_pointer::{parse_json_pointer, format_json_pointer, is_ancestor};
//!
//! let path = parse_json_pointer("/contacts/0/phones");
//! assert_eq!(path, vec!["contacts", "0", "phones"]);
//! assert_eq!(format_json_pointer(&path), "/contacts/0/phones");
//!
//! let parent = parse_json_pointer("/contacts/0");
//! assert!(is_ancestor(&parent, &path));
//! assert!(!is_ancestor(&path, &parent));
//! ```

use thiserror::Error;

/// A parsed pointer: one string per path segment, empty for the root.
pub type Path = Vec<String>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("{0} is not a JSON Pointer path")]
    InvalidPointer(String),
}

/// Unescapes a pointer segment: `~1` becomes `/`, `~0` becomes `~`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer segment: `~` becomes `~0`, `/` becomes `~1`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Validate a JSON Pointer string.
///
/// The empty string is valid (it addresses the document root). A non-empty
/// pointer must start with `/` and every `~` must introduce one of the two
/// escape sequences `~0` or `~1`.
///
/// # Errors
///
/// Returns [`PointerError::InvalidPointer`] carrying the offending string.
///
/// # Example
///
/// ```
/// use json_rewind_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/foo/a~0b").unwrap();
/// validate_json_pointer("foo").unwrap_err();
/// validate_json_pointer("/foo/a~2b").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), PointerError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(PointerError::InvalidPointer(pointer.to_string()));
    }
    let bytes = pointer.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'~' {
            match bytes.get(i + 1) {
                Some(b'0') | Some(b'1') => i += 2,
                _ => return Err(PointerError::InvalidPointer(pointer.to_string())),
            }
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Parse a JSON Pointer string into path segments.
///
/// The empty string parses to the empty (root) path; otherwise the leading
/// `/` is stripped, the rest is split on `/`, and each segment is unescaped.
///
/// # Example
///
/// ```
/// use json_rewind_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/"), vec![""]);
/// assert_eq!(parse_json_pointer("/foo/bar"), vec!["foo", "bar"]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    // Non-pointer input still drops exactly one leading character, at a
    // char boundary, so unvalidated strings parse without panicking.
    let rest = pointer.strip_prefix('/').unwrap_or_else(|| {
        let mut chars = pointer.chars();
        chars.next();
        chars.as_str()
    });
    rest.split('/').map(unescape_component).collect()
}

/// Format path segments back into a JSON Pointer string.
///
/// Returns the empty string for the root path.
pub fn format_json_pointer(path: &[String]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if a path addresses the document root.
pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Check if `ancestor` is a strict, segment-aligned prefix of `descendant`.
///
/// Equal paths are not ancestors of each other.
///
/// # Example
///
/// ```
/// use json_rewind_pointer::is_ancestor;
///
/// let a = vec!["a".to_string()];
/// let ab = vec!["a".to_string(), "b".to_string()];
/// assert!(is_ancestor(&a, &ab));
/// assert!(is_ancestor(&[], &a));
/// assert!(!is_ancestor(&ab, &a));
/// assert!(!is_ancestor(&a, &a));
/// ```
pub fn is_ancestor(ancestor: &[String], descendant: &[String]) -> bool {
    if ancestor.len() >= descendant.len() {
        return false;
    }
    for i in 0..ancestor.len() {
        if ancestor[i] != descendant[i] {
            return false;
        }
    }
    true
}

/// Check if a segment is a valid non-negative array index.
///
/// Leading zeros are rejected per RFC 6901 (`"0"` is fine, `"01"` is not).
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}
