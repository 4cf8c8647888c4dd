use std::io::Write;

use crate::session::Session;

pub fn execute<W: Write>(path: &str, session: &mut Session, out: &mut W) -> anyhow::Result<()> {
    let previous = session.controller.mounted_path().map(str::to_string);

    if let Err(e) = session.controller.mount(path) {
        // Replacing can lose the previous image even though the new one failed
        if let Some(previous) = previous
            && !session.controller.is_mounted()
        {
            eprintln!("Warning: {} is no longer mounted", previous);
        }
        return Err(e.into());
    }

    writeln!(out, "mounted {}", path)?;
    Ok(())
}
