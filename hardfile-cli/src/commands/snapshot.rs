//! Save-state style snapshot and restore of the mount state.

use std::io::Write;

use anyhow::Context;
use hardfile::MountState;

use crate::session::Session;

/// Print the current mount state as JSON.
pub fn save<W: Write>(session: &mut Session, out: &mut W) -> anyhow::Result<()> {
    let snapshot = serde_json::to_string(session.controller.state())?;
    writeln!(out, "{}", snapshot)?;
    Ok(())
}

/// Drive the slot back to a state printed by [`save`].
pub fn restore<W: Write>(json: &str, session: &mut Session, out: &mut W) -> anyhow::Result<()> {
    let saved: MountState =
        serde_json::from_str(json).with_context(|| format!("Invalid snapshot: {}", json))?;

    session.controller.restore(&saved)?;
    writeln!(out, "restored {}", session.controller.state())?;
    Ok(())
}
