//! Shared test doubles for hardfile crates.

use std::path::PathBuf;
use std::sync::Arc;

use hardfile::{AdapterError, MachineStateAdapter};
use parking_lot::Mutex;
use tempfile::TempDir;

/// One call made into a [`RecordingAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterCall {
    Attach(String),
    Detach,
}

#[derive(Debug, Default)]
struct Machine {
    calls: Vec<AdapterCall>,
    attached: Option<String>,
    fail_attach: bool,
    fail_detach: bool,
    /// Calls that broke the attach-when-empty / detach-when-attached contract
    violations: usize,
}

/// Adapter double that records every call and fails on demand.
///
/// Clones share the same machine, so a test can keep one handle and give
/// another to the controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingAdapter {
    machine: Arc<Mutex<Machine>>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following attach fail (or succeed again).
    pub fn fail_attaches(&self, fail: bool) {
        self.machine.lock().fail_attach = fail;
    }

    /// Make every following detach fail (or succeed again).
    pub fn fail_detaches(&self, fail: bool) {
        self.machine.lock().fail_detach = fail;
    }

    pub fn calls(&self) -> Vec<AdapterCall> {
        self.machine.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.machine.lock().calls.clear();
    }

    /// What the machine believes is attached.
    pub fn attached(&self) -> Option<String> {
        self.machine.lock().attached.clone()
    }

    /// Number of out-of-order calls received.
    pub fn violations(&self) -> usize {
        self.machine.lock().violations
    }

    /// Drop the attached image machine-side, as a reset would.
    pub fn simulate_reset(&self) -> Option<String> {
        self.machine.lock().attached.take()
    }
}

impl MachineStateAdapter for RecordingAdapter {
    fn attach(&mut self, path: &str) -> Result<(), AdapterError> {
        let mut machine = self.machine.lock();
        machine.calls.push(AdapterCall::Attach(path.to_string()));

        if let Some(current) = machine.attached.clone() {
            machine.violations += 1;
            return Err(AdapterError::Busy(current));
        }
        if machine.fail_attach {
            return Err(AdapterError::Rejected(format!("attach {} refused", path)));
        }

        machine.attached = Some(path.to_string());
        Ok(())
    }

    fn detach(&mut self) -> Result<(), AdapterError> {
        let mut machine = self.machine.lock();
        machine.calls.push(AdapterCall::Detach);

        if machine.attached.is_none() {
            machine.violations += 1;
            return Err(AdapterError::Empty);
        }
        if machine.fail_detach {
            return Err(AdapterError::Rejected("detach refused".into()));
        }

        machine.attached = None;
        Ok(())
    }
}

/// Create a small hard file image named `name` inside `dir`.
pub fn create_image(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, vec![0u8; 4096]).expect("Failed to create test image");
    path
}

/// Same as [`create_image`], as the string form the controller takes.
pub fn create_image_str(dir: &TempDir, name: &str) -> String {
    create_image(dir, name).to_string_lossy().into_owned()
}
