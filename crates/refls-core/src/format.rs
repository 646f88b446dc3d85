//! Per-ref output rendering.
//!
//! One shown ref produces one line (`<hex> <name>`, or just `<hex>` under
//! hash-only), plus an optional `<peeled-hex> <name>^{}` line under
//! dereference. Quiet mode suppresses output but keeps the object existence
//! check: a ref whose target is missing from storage is repository
//! corruption and always fatal.

use std::io::Write;

use refls_refs::RefSource;
use refls_types::ObjectId;

use crate::config::Options;
use crate::error::{Error, Result};

/// Emit the output line(s) for one ref.
pub fn show_one(
    source: &dyn RefSource,
    opts: &Options,
    name: &str,
    oid: &ObjectId,
    out: &mut dyn Write,
) -> Result<()> {
    if !source.object_exists(oid)? {
        return Err(Error::BadRef {
            name: name.to_string(),
            oid: oid.to_hex(),
        });
    }

    if opts.quiet {
        return Ok(());
    }

    let hex = source.abbrev(oid, opts.abbrev)?;
    if opts.hash_only {
        writeln!(out, "{hex}")?;
    } else {
        writeln!(out, "{hex} {name}")?;
    }

    if !opts.dereference {
        return Ok(());
    }
    if let Some(peeled) = source.peel(oid)? {
        if peeled != *oid {
            let hex = source.abbrev(&peeled, opts.abbrev)?;
            writeln!(out, "{hex} {name}^{{}}")?;
        }
    }
    Ok(())
}
