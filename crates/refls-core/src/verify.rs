//! Verify mode.
//!
//! Each argument must be a fully qualified ref (`refs/...`) or exactly
//! `HEAD`, and must resolve. The first failure is fatal in normal operation;
//! under quiet it is a silent exit 1, with no further refs examined. Both
//! behaviors stop at the first bad ref.

use std::io::Write;

use refls_refs::RefSource;

use crate::config::Options;
use crate::error::{Error, Result};
use crate::format;

/// Run verify mode over the given refs, in argument order.
pub fn run_verify(
    source: &dyn RefSource,
    refs: &[String],
    opts: &Options,
    out: &mut dyn Write,
) -> Result<i32> {
    if refs.is_empty() {
        return Err(Error::VerifyWithoutRef);
    }

    for name in refs {
        let resolved = if name.starts_with("refs/") || name == "HEAD" {
            source.read_ref(name)?
        } else {
            None
        };
        match resolved {
            Some(oid) => format::show_one(source, opts, name, &oid, out)?,
            None if opts.quiet => return Ok(1),
            None => {
                return Err(Error::InvalidRef {
                    name: name.clone(),
                })
            }
        }
    }

    Ok(0)
}
