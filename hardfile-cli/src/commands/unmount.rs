use std::io::Write;

use crate::session::Session;

pub fn execute<W: Write>(session: &mut Session, out: &mut W) -> anyhow::Result<()> {
    let previous = session.controller.mounted_path().map(str::to_string);
    session.controller.unmount()?;

    match previous {
        Some(path) => writeln!(out, "unmounted {}", path)?,
        None => writeln!(out, "not mounted")?,
    }
    Ok(())
}
