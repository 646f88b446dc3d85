//! Immutable per-invocation configuration.
//!
//! Flags are parsed once at startup into [`Options`] and a [`Mode`] and
//! passed by reference into the mode functions. Nothing in the core mutates
//! them afterwards.

/// Output and filtering options shared by all modes.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Include the HEAD pseudo-ref in listing mode, even when patterns
    /// would filter it out.
    pub show_head: bool,
    /// Restrict listing to `refs/heads/`. Combinable with `tags_only`.
    pub heads_only: bool,
    /// Restrict listing to `refs/tags/`. Combinable with `heads_only`.
    pub tags_only: bool,
    /// Emit a second `<hex> <name>^{}` line for refs that peel.
    pub dereference: bool,
    /// Print only the hash, omitting the ref name.
    pub hash_only: bool,
    /// Suppress all per-ref output. Also changes verify mode's failure
    /// behavior from fatal to a silent exit 1.
    pub quiet: bool,
    /// Minimum abbreviation width for printed hashes; 0 means full length.
    pub abbrev: usize,
}

/// The execution mode, selected once from mutually exclusive flags.
#[derive(Clone, Debug)]
pub enum Mode {
    /// Default mode: enumerate and filter refs by tail patterns.
    Listing { patterns: Vec<String> },
    /// Strictly resolve each named ref, in argument order.
    Verify { refs: Vec<String> },
    /// Read refs from stdin and pass through those absent locally. The
    /// optional pattern is a byte-wise prefix filter on stdin tokens, not a
    /// listing pattern.
    ExcludeExisting { pattern: Option<String> },
}
