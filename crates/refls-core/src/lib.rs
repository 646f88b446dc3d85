//! Command core for refls.
//!
//! refls enumerates named references and prints them in one of three
//! mutually exclusive modes:
//!
//! - **Listing** (default) — enumerate refs, filter by tail patterns, print
//!   each match. Exit 1 when nothing matched.
//! - **Verify** — resolve explicitly named refs, strictly. Invalid refs are
//!   fatal (or silently exit 1 under quiet).
//! - **Exclude-existing** — read ref-bearing lines from stdin and pass
//!   through those naming refs that do not exist locally.
//!
//! The mode functions are pure with respect to the process: they take a
//! [`RefSource`](refls_refs::RefSource), writers, and an immutable
//! [`Options`] struct, and return an exit code or a fatal [`Error`]. The
//! binary boundary decides what a fatal error does to the process.
//!
//! # Modules
//!
//! - [`config`] — [`Options`] and [`Mode`]
//! - [`error`] — The fatal [`Error`] type
//! - [`matcher`] — Hierarchical tail matching for listing patterns
//! - [`format`] — Per-ref output rendering
//! - [`listing`], [`verify`], [`exclude`] — The three modes

use std::io::{BufRead, Write};

use refls_refs::RefSource;
use tracing::debug;

pub mod config;
pub mod error;
pub mod exclude;
pub mod format;
pub mod listing;
pub mod matcher;
pub mod verify;

pub use config::{Mode, Options};
pub use error::{Error, Result};

/// Run exactly one execution mode and return the process exit code.
///
/// `input` is only read in exclude-existing mode. Warnings that are part of
/// the command contract go to `err`; per-ref output goes to `out`.
pub fn run(
    source: &dyn RefSource,
    mode: &Mode,
    opts: &Options,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    match mode {
        Mode::Listing { patterns } => {
            debug!(patterns = patterns.len(), "listing mode");
            listing::run_listing(source, patterns, opts, out)
        }
        Mode::Verify { refs } => {
            debug!(refs = refs.len(), "verify mode");
            verify::run_verify(source, refs, opts, out)
        }
        Mode::ExcludeExisting { pattern } => {
            debug!(pattern = pattern.as_deref(), "exclude-existing mode");
            exclude::run_exclude_existing(source, pattern.as_deref(), input, out, err)
        }
    }
}
