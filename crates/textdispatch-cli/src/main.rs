//! Entrypoint for the `textdispatch` binary.
//!
//! All work is delegated to [`textdispatch_cli::run`], which loads
//! configuration, installs telemetry, and executes the requested subcommand.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    textdispatch_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
