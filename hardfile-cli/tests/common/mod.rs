#![allow(dead_code)]

use assert_cmd::Command;
use std::time::Duration;
use tempfile::TempDir;

pub use hardfile_test_utils::create_image_str;

/// Per-test scratch directory plus a preconfigured `hardfile` command.
pub struct TestContext {
    pub dir: TempDir,
}

impl TestContext {
    pub fn new_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_hardfile");
        let mut cmd = Command::new(bin_path);
        cmd.timeout(Duration::from_secs(30));
        cmd.env_remove("RUST_LOG")
            .env_remove("HARDFILE_IMAGE")
            .env_remove("HARDFILE_LOG");
        cmd
    }

    pub fn image(&self, name: &str) -> String {
        create_image_str(&self.dir, name)
    }

    pub fn missing(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }
}

pub fn hardfile() -> TestContext {
    TestContext {
        dir: TempDir::new().expect("Failed to create temp dir"),
    }
}
