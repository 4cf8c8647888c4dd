use std::io::Write;

use crate::session::Session;

/// Drop the image machine-side, then let the controller know.
pub fn execute<W: Write>(session: &mut Session, out: &mut W) -> anyhow::Result<()> {
    session.controller.adapter_mut().reset();

    match session.controller.notify_forced_detach() {
        Some(path) => writeln!(out, "reset, released {}", path)?,
        None => writeln!(out, "reset, slot was empty")?,
    }
    Ok(())
}
