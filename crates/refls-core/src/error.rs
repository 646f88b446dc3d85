//! The fatal error type for the command core.
//!
//! Everything here terminates the command: the mode functions return these
//! instead of exiting so the binary boundary owns the actual process exit.
//! Recoverable conditions (malformed stdin tokens, quiet verify failures)
//! never surface as an [`Error`].

use refls_refs::RefError;
use thiserror::Error;

/// Fatal, unrecoverable failures of a refls invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// A shown ref points at an object missing from storage. This indicates
    /// repository corruption.
    #[error("bad ref {name} ({oid})")]
    BadRef { name: String, oid: String },

    /// A ref given to verify mode is malformed or unresolvable (non-quiet).
    #[error("'{name}' - not a valid ref")]
    InvalidRef { name: String },

    /// Verify mode was selected without any ref arguments.
    #[error("--verify requires a reference")]
    VerifyWithoutRef,

    /// Backend failure while reading refs or objects.
    #[error(transparent)]
    Ref(#[from] RefError),

    /// Failure writing output or reading the exclusion stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
