//! Ref-name validation following git-style format rules.
//!
//! Valid ref names:
//! - Must be non-empty and contain at least one `/` (single-level names like
//!   `HEAD` are pseudo-refs, handled separately by callers)
//! - Must not contain whitespace, control characters, `~`, `^`, `:`, `?`,
//!   `*`, `[`, `\`
//! - Must not contain `..` (double dot) or `@{`
//! - Must not start or end with `/` or end with `.`
//! - Must not contain consecutive slashes (`//`)
//! - Components between slashes must be non-empty, must not start with `.`,
//!   and must not end with `.lock`

use crate::error::{RefError, Result};

/// Characters that are forbidden anywhere in a ref name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

/// Validate a fully qualified ref name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use refls_refs::names::validate_ref_name;
///
/// assert!(validate_ref_name("refs/heads/main").is_ok());
/// assert!(validate_ref_name("refs/tags/v1.0").is_ok());
/// assert!(validate_ref_name("").is_err());
/// assert!(validate_ref_name("refs/heads/bad..name").is_err());
/// assert!(validate_ref_name("onelevel").is_err());
/// ```
pub fn validate_ref_name(name: &str) -> Result<()> {
    let invalid = |reason: String| {
        Err(RefError::InvalidRefName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("ref name must not be empty".into());
    }

    for ch in name.chars() {
        if ch.is_control() {
            return invalid(format!("contains control character: {ch:?}"));
        }
    }
    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return invalid(format!("contains forbidden character: {ch:?}"));
        }
    }

    // `..` is rev-spec range syntax, `@{` is reflog syntax.
    if name.contains("..") {
        return invalid("must not contain '..'".into());
    }
    if name.contains("@{") {
        return invalid("must not contain '@{'".into());
    }

    if name.starts_with('/') || name.ends_with('/') {
        return invalid("must not start or end with '/'".into());
    }
    if name.ends_with('.') {
        return invalid("must not end with '.'".into());
    }
    if name.contains("//") {
        return invalid("must not contain consecutive slashes '//'".into());
    }

    // Single-level names are reserved for pseudo-refs like HEAD.
    if !name.contains('/') {
        return invalid("must contain at least one '/'".into());
    }

    for component in name.split('/') {
        if component.is_empty() {
            return invalid("path components must not be empty".into());
        }
        if component.starts_with('.') {
            return invalid(format!("component must not start with '.': {component:?}"));
        }
        if component.ends_with(".lock") {
            return invalid(format!("component must not end with '.lock': {component:?}"));
        }
    }

    Ok(())
}

/// Boolean form of [`validate_ref_name`].
pub fn is_well_formed(name: &str) -> bool {
    validate_ref_name(name).is_ok()
}
