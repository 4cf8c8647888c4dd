//! Hardfile CLI - drive a single hard file slot from stdin.
//!
//! Reads one command per line (`mount <path>`, `unmount`, `status`, ...)
//! until `quit` or end of input.

mod cli;
mod commands;
mod session;

use clap::Parser;

use crate::cli::Cli;
use crate::session::Session;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.global.init_logging();

    let mut session = Session::start(&cli.global)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session.run(stdin.lock(), &mut stdout.lock())
}
