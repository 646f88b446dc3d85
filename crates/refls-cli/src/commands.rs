use std::io;

use refls_refs::FileRefSource;
use tracing::debug;

use crate::cli::Cli;

/// Exit status for fatal errors: usage errors, invalid refs in non-quiet
/// verify, and corrupted object references.
const FATAL_EXIT: i32 = 128;

/// Run the selected mode against the repository and map fatal errors to a
/// `fatal: ...` message and the fatal exit status.
pub fn run_command(cli: &Cli) -> i32 {
    match try_run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:#}");
            FATAL_EXIT
        }
    }
}

fn try_run(cli: &Cli) -> anyhow::Result<i32> {
    let source = FileRefSource::discover(&cli.repo)?;
    debug!(root = %source.root().display(), "opened repository");

    let mode = cli.mode();
    let opts = cli.options();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();

    let code = refls_core::run(&source, &mode, &opts, &mut input, &mut out, &mut err)?;
    Ok(code)
}
