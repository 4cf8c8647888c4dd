use std::io::Write;

use crate::session::Session;

pub fn execute<W: Write>(session: &mut Session, out: &mut W) -> anyhow::Result<()> {
    let state = session.controller.state();

    if session.json {
        writeln!(out, "{}", serde_json::to_string(state)?)?;
    } else {
        writeln!(out, "{}", state)?;
    }
    Ok(())
}
