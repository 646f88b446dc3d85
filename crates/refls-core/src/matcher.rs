//! Hierarchical tail matching for listing patterns.
//!
//! A pattern matches a ref name when it is a trailing substring that starts
//! on a `/` component boundary (or spans the whole name). `main` matches
//! `refs/heads/main`; `ain` does not. This is deliberately not a substring
//! or glob match.

/// Returns `true` if `name` matches any pattern in `patterns`.
///
/// An empty pattern list matches every name (no filter was given).
pub fn matches(name: &str, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return true;
    }
    patterns.iter().any(|pattern| matches_one(name, pattern))
}

/// Returns `true` if `pattern` is a tail of `name` on a component boundary.
pub fn matches_one(name: &str, pattern: &str) -> bool {
    let (name_len, pat_len) = (name.len(), pattern.len());
    if pat_len > name_len || !name.ends_with(pattern) {
        return false;
    }
    pat_len == name_len || name.as_bytes()[name_len - pat_len - 1] == b'/'
}
