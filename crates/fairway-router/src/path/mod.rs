// File: fairway-router/src/path/mod.rs
// Purpose: Path validation, normalization, and segment splitting

use std::borrow::Cow;

pub mod ancestry;
pub use ancestry::Ancestry;

/// Checks whether a path is already in canonical form.
///
/// Canonical means: starts with `/`, contains no `//` and no `\`, and does
/// not end with `/` (except the bare root `/`).
///
/// # Examples
///
/// ```
/// use fairway_router::path::is_canonical;
///
/// assert!(is_canonical("/"));
/// assert!(is_canonical("/proposal/submit"));
///
/// assert!(!is_canonical(""));
/// assert!(!is_canonical("proposal"));
/// assert!(!is_canonical("/proposal/"));
/// assert!(!is_canonical("/proposal//submit"));
/// ```
pub fn is_canonical(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }
    if path.contains("//") || path.contains('\\') {
        return false;
    }
    if path == "/" {
        return true;
    }
    !path.ends_with('/')
}

/// Normalizes a requested path to canonical form.
///
/// Zero-copy on the fast path: a path that is already canonical is returned
/// as `Cow::Borrowed`. Otherwise empty segments are dropped, backslashes
/// treated as separators, and a single leading `/` restored.
///
/// # Examples
///
/// ```
/// use fairway_router::path::normalize;
///
/// assert_eq!(normalize("/proposal/submit"), "/proposal/submit");
/// assert_eq!(normalize("/proposal/submit/"), "/proposal/submit");
/// assert_eq!(normalize("proposal//submit"), "/proposal/submit");
/// assert_eq!(normalize(""), "/");
/// ```
pub fn normalize(path: &str) -> Cow<'_, str> {
    if is_canonical(path) {
        return Cow::Borrowed(path);
    }

    let joined = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{joined}"))
    }
}

/// Splits a path into its non-empty segments.
///
/// Leading and trailing slashes are insignificant, so `"/proposal/42/"`,
/// `"proposal/42"`, and `"/proposal/42"` all yield the same sequence.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
