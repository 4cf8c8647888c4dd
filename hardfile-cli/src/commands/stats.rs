use std::io::Write;

use crate::session::Session;

pub fn execute<W: Write>(session: &mut Session, out: &mut W) -> anyhow::Result<()> {
    let stats = session.controller.metrics().snapshot();

    if session.json {
        writeln!(out, "{}", serde_json::to_string(&stats)?)?;
        return Ok(());
    }

    writeln!(out, "mounts: {}", stats.mounts)?;
    writeln!(out, "unmounts: {}", stats.unmounts)?;
    writeln!(out, "replacements: {}", stats.replacements)?;
    writeln!(out, "abandoned images: {}", stats.abandoned_images)?;
    writeln!(out, "forced detaches: {}", stats.forced_detaches)?;
    writeln!(out, "attach failures: {}", stats.attach_failures)?;
    writeln!(out, "detach failures: {}", stats.detach_failures)?;
    writeln!(out, "invalid paths: {}", stats.invalid_paths)?;
    Ok(())
}
