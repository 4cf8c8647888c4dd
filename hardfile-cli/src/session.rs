//! Line-oriented session around one mount controller.

use std::io::{BufRead, Write};

use anyhow::Context;
use hardfile::{ImageSlot, MountController};

use crate::cli::GlobalFlags;
use crate::commands::{self, SessionCommand};

pub struct Session {
    pub(crate) controller: MountController<ImageSlot>,
    pub(crate) json: bool,
}

impl Session {
    /// Create the slot and mount the initial image, if one was given.
    pub fn start(global: &GlobalFlags) -> anyhow::Result<Self> {
        let mut controller = MountController::new(ImageSlot::new(global.slot_options()));

        if let Some(path) = &global.mount {
            controller
                .mount(path)
                .with_context(|| format!("Failed to mount initial image '{}'", path))?;
        }

        tracing::info!(state = %controller.state(), "Session started");
        Ok(Self {
            controller,
            json: global.json,
        })
    }

    /// Execute commands from `input` until `quit` or end of input.
    ///
    /// A failing command is reported on stderr and the session goes on.
    /// The slot is released on every exit path, I/O errors included.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        let result = self.run_commands(input, out);
        self.shutdown();
        result
    }

    fn run_commands<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let result = match line.parse::<SessionCommand>() {
                Ok(SessionCommand::Quit) => break,
                Ok(command) => commands::execute(command, self, out),
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                eprintln!("Error: {:#}", e);
            }
            out.flush().context("Failed to write output")?;
        }
        Ok(())
    }

    /// Leave the slot empty before exiting.
    fn shutdown(&mut self) {
        if let Err(e) = self.controller.unmount() {
            tracing::warn!(error = %e, "Failed to unmount hard file at exit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hardfile_test_utils::create_image_str;
    use std::io::Read;
    use tempfile::TempDir;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            mount: None,
            read_only: false,
            json: false,
            log_level: "off".into(),
        }
    }

    fn run(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_start_with_initial_image() {
        let dir = TempDir::new().unwrap();
        let image = create_image_str(&dir, "boot.hdf");
        let session = Session::start(&GlobalFlags {
            mount: Some(image.clone()),
            ..flags()
        })
        .unwrap();
        assert_eq!(session.controller.mounted_path(), Some(image.as_str()));
    }

    #[test]
    fn test_start_with_missing_image_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.hdf").to_string_lossy().into_owned();
        let err = Session::start(&GlobalFlags {
            mount: Some(missing),
            ..flags()
        })
        .err()
        .unwrap();
        assert!(err.to_string().contains("Failed to mount initial image"));
    }

    #[test]
    fn test_script_runs_until_quit() {
        let dir = TempDir::new().unwrap();
        let image = create_image_str(&dir, "disk1.hdf");
        let mut session = Session::start(&flags()).unwrap();

        let output = run(
            &mut session,
            &format!("# comment\nmount {}\n\nstatus\nquit\nunmount\n", image),
        );
        assert_eq!(output, format!("mounted {}\nmounted {}\n", image, image));
        // Session end releases the slot
        assert!(!session.controller.is_mounted());
        assert!(session.controller.adapter().attached_path().is_none());
    }

    #[test]
    fn test_failed_command_does_not_stop_session() {
        let mut session = Session::start(&flags()).unwrap();

        let output = run(&mut session, "mount\nbogus\nstatus\n");
        assert_eq!(output, "unmounted\n");
        assert_eq!(session.controller.metrics().invalid_paths(), 1);
    }

    /// Input that yields `script` and then fails.
    struct BrokenInput {
        script: std::io::Cursor<Vec<u8>>,
    }

    impl Read for BrokenInput {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.script.read(buf)? {
                0 => Err(std::io::Error::other("terminal hung up")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_error_still_unmounts() {
        let dir = TempDir::new().unwrap();
        let image = create_image_str(&dir, "disk1.hdf");
        let mut session = Session::start(&flags()).unwrap();
        let input = std::io::BufReader::new(BrokenInput {
            script: std::io::Cursor::new(format!("mount {}\n", image).into_bytes()),
        });

        let mut out = Vec::new();
        let err = session.run(input, &mut out).unwrap_err();
        assert!(err.to_string().contains("Failed to read command"));
        assert_eq!(String::from_utf8(out).unwrap(), format!("mounted {}\n", image));
        assert!(!session.controller.is_mounted());
        assert!(session.controller.adapter().attached_path().is_none());
    }

    /// Output that accepts writes but refuses to flush.
    struct BrokenOutput(Vec<u8>);

    impl Write for BrokenOutput {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("broken pipe"))
        }
    }

    #[test]
    fn test_flush_error_still_unmounts() {
        let dir = TempDir::new().unwrap();
        let image = create_image_str(&dir, "disk1.hdf");
        let mut session = Session::start(&flags()).unwrap();

        let mut out = BrokenOutput(Vec::new());
        let err = session
            .run(format!("mount {}\nstatus\n", image).as_bytes(), &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to write output"));
        assert!(!session.controller.is_mounted());
        assert_eq!(session.controller.metrics().unmounts(), 1);
    }
}
