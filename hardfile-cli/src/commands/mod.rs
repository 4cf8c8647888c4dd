//! Session commands.

use std::io::Write;
use std::str::FromStr;

use crate::session::Session;

pub mod mount;
pub mod reset;
pub mod snapshot;
pub mod stats;
pub mod status;
pub mod unmount;

const HELP: &str = "\
Commands:
  mount <path>       Mount a hard file image (replaces the current one)
  unmount            Unmount the current image
  status             Show whether an image is mounted
  snapshot           Print the mount state as JSON
  restore <json>     Return to a state printed by 'snapshot'
  reset              Simulate a machine reset (image is dropped)
  stats              Show mount statistics
  help               Show this help
  quit               End the session";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Mount(String),
    Unmount,
    Status,
    Snapshot,
    Restore(String),
    Reset,
    Stats,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    /// Parse `<command> [argument]`. The argument is the rest of the line,
    /// so image paths may contain spaces.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "mount" => return Ok(SessionCommand::Mount(arg.to_string())),
            "restore" => {
                if arg.is_empty() {
                    anyhow::bail!("usage: restore <json>");
                }
                return Ok(SessionCommand::Restore(arg.to_string()));
            }
            "unmount" | "umount" => SessionCommand::Unmount,
            "status" => SessionCommand::Status,
            "snapshot" => SessionCommand::Snapshot,
            "reset" => SessionCommand::Reset,
            "stats" => SessionCommand::Stats,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            _ => anyhow::bail!("unknown command '{}' (try 'help')", name),
        };

        if !arg.is_empty() {
            anyhow::bail!("'{}' takes no arguments", name);
        }
        Ok(command)
    }
}

/// Run one command against the session.
pub fn execute<W: Write>(
    command: SessionCommand,
    session: &mut Session,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        SessionCommand::Mount(path) => mount::execute(&path, session, out),
        SessionCommand::Unmount => unmount::execute(session, out),
        SessionCommand::Status => status::execute(session, out),
        SessionCommand::Snapshot => snapshot::save(session, out),
        SessionCommand::Restore(json) => snapshot::restore(&json, session, out),
        SessionCommand::Reset => reset::execute(session, out),
        SessionCommand::Stats => stats::execute(session, out),
        SessionCommand::Help => {
            writeln!(out, "{}", HELP)?;
            Ok(())
        }
        SessionCommand::Quit => Ok(()),
    }
}
