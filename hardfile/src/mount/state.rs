//! Attachment state of the hard file slot.

use serde::{Deserialize, Serialize};

/// Whether an image is attached, and which one.
///
/// A path exists only in the `Mounted` variant, so a mounted slot always
/// has a path and an unmounted one never remembers one.
///
/// ```text
/// Unmounted ──mount(p)──▶ Mounted(p) ──mount(q)──▶ Mounted(q)
///     ▲                       │
///     └──unmount / forced─────┘
/// ```
///
/// Serializes as `{"state":"mounted","path":"..."}` or
/// `{"state":"unmounted"}` for save-state files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum MountState {
    /// No image attached. Initial state.
    #[default]
    Unmounted,

    /// Image at `path` is attached to the machine.
    Mounted { path: String },
}

impl MountState {
    pub fn is_mounted(&self) -> bool {
        matches!(self, MountState::Mounted { .. })
    }

    /// Path of the attached image, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            MountState::Mounted { path } => Some(path),
            MountState::Unmounted => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MountState::Unmounted => "unmounted",
            MountState::Mounted { .. } => "mounted",
        }
    }
}

impl std::fmt::Display for MountState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MountState::Unmounted => write!(f, "unmounted"),
            MountState::Mounted { path } => write!(f, "mounted {}", path),
        }
    }
}
