//! Listing mode (the default).
//!
//! Enumerates candidate refs — HEAD under `show_head`, the heads and/or
//! tags namespaces under the corresponding restrictions, otherwise all
//! refs — filters them through the tail matcher, and prints each match.
//! Enumeration order is the backend's; no extra ordering is imposed.

use std::io::Write;

use refls_refs::{RefSource, HEADS_PREFIX, TAGS_PREFIX};
use refls_types::ObjectId;

use crate::config::Options;
use crate::error::Result;
use crate::{format, matcher};

/// Run listing mode. Returns exit code 1 when no ref matched, else 0.
pub fn run_listing(
    source: &dyn RefSource,
    patterns: &[String],
    opts: &Options,
    out: &mut dyn Write,
) -> Result<i32> {
    let mut candidates: Vec<(String, ObjectId)> = Vec::new();
    if opts.show_head {
        if let Some(oid) = source.head()? {
            candidates.push(("HEAD".to_string(), oid));
        }
    }
    if opts.heads_only || opts.tags_only {
        if opts.heads_only {
            candidates.extend(source.refs(HEADS_PREFIX)?);
        }
        if opts.tags_only {
            candidates.extend(source.refs(TAGS_PREFIX)?);
        }
    } else {
        candidates.extend(source.refs("")?);
    }

    let mut tally = 0usize;
    for (name, oid) in &candidates {
        // HEAD bypasses the pattern filter when explicitly requested.
        let matched =
            (opts.show_head && name == "HEAD") || matcher::matches(name, patterns);
        if !matched {
            continue;
        }
        tally += 1;
        format::show_one(source, opts, name, oid, out)?;
    }

    Ok(if tally == 0 { 1 } else { 0 })
}
