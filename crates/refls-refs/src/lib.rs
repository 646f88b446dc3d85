//! Reference storage seam for refls.
//!
//! The refls command core never talks to storage directly. Everything it
//! needs — enumerating refs, resolving a name to an object, probing object
//! existence, peeling tags, abbreviating hashes — goes through the
//! [`RefSource`] trait defined here.
//!
//! # Modules
//!
//! - [`error`] — Error types for ref operations
//! - [`names`] — Ref-name validation (git-style format rules)
//! - [`traits`] — The [`RefSource`] trait defining the storage interface
//! - [`memory`] — In-memory [`InMemoryRefSource`] for tests
//! - [`fs`] — File-backed [`FileRefSource`] reading loose refs, a
//!   packed-refs file, and HEAD from a repository directory

pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;

pub use error::{RefError, Result};
pub use fs::FileRefSource;
pub use memory::InMemoryRefSource;
pub use names::{is_well_formed, validate_ref_name};
pub use traits::RefSource;

/// Canonical namespace prefix for branches.
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Canonical namespace prefix for tags.
pub const TAGS_PREFIX: &str = "refs/tags/";
