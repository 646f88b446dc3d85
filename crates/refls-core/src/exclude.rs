//! Exclude-existing mode.
//!
//! Reads newline-delimited records (typically the output of a remote ref
//! listing) and passes through the lines whose ref does not exist locally.
//! A record is `[<anything> ]<refname>[^{}]`: the token is the trailing run
//! of non-whitespace, a `^{}` suffix marks an upstream peeled annotation,
//! and anything before the token (an object id, usually) is opaque.
//! Accepted lines are passed through byte-for-byte.
//!
//! Malformed tokens are warned about and skipped; they never abort the
//! stream. The optional pattern is a byte-wise prefix filter — deliberately
//! not the tail matcher used by listing mode, since stdin records may carry
//! foreign namespaces.

use std::collections::HashSet;
use std::io::{BufRead, Write};

use refls_refs::{is_well_formed, RefSource};

use crate::error::Result;

/// Run exclude-existing mode. Always returns exit code 0; malformed input
/// is reported on `err` but never fails the command.
pub fn run_exclude_existing(
    source: &dyn RefSource,
    pattern: Option<&str>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    let existing: HashSet<String> = source
        .refs("")?
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let original = line.strip_suffix('\n').unwrap_or(&line);

        // The ^{} marker is an upstream peeled-tag annotation, not part of
        // the ref name.
        let record = original.strip_suffix("^{}").unwrap_or(original);
        let token_start = record
            .rfind(|c: char| c.is_ascii_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);
        let token = &record[token_start..];

        if let Some(pattern) = pattern {
            if token.len() < pattern.len() || !token.starts_with(pattern) {
                continue;
            }
        }
        if !is_well_formed(token) {
            writeln!(err, "warning: ref '{token}' ignored")?;
            continue;
        }
        if existing.contains(token) {
            continue;
        }
        writeln!(out, "{original}")?;
    }

    Ok(0)
}
