//! Error types for hard file mounting.
//!
//! Errors are split by who produced them:
//! - [`AdapterError`]: the emulated machine refused or failed an attach/detach
//! - [`MountError`]: what the controller reports to its caller
//! - [`InvalidPathReason`]: why a path was rejected before reaching the machine

use std::io;
use thiserror::Error;

/// Result alias for controller operations.
pub type MountResult<T> = Result<T, MountError>;

// ============================================================================
// Controller Errors
// ============================================================================

/// Errors reported by [`MountController`](crate::MountController) operations.
///
/// None of these are fatal: the controller stays usable after any of them,
/// and its cached state always reflects the last confirmed adapter outcome.
/// ```ignore
/// match controller.mount(path) {
///     Err(MountError::InvalidPath { .. }) => { /* ask the user for another path */ }
///     Err(MountError::AttachFailed { .. }) => { /* now unmounted */ }
///     Err(MountError::DetachFailed { .. }) => { /* still on the previous image */ }
///     Ok(()) => {}
/// }
/// ```
#[derive(Debug, Error)]
pub enum MountError {
    /// Path failed syntactic validation; the machine was never asked.
    #[error("invalid hard file path {path:?}: {reason}")]
    InvalidPath {
        path: String,
        reason: InvalidPathReason,
    },

    /// The machine could not attach the image.
    #[error("attach {path}: {source}")]
    AttachFailed {
        path: String,
        #[source]
        source: AdapterError,
    },

    /// The machine could not detach the currently mounted image.
    #[error("detach {path}: {source}")]
    DetachFailed {
        path: String,
        #[source]
        source: AdapterError,
    },
}

impl MountError {
    /// Path the failed operation was about.
    pub fn path(&self) -> &str {
        match self {
            MountError::InvalidPath { path, .. }
            | MountError::AttachFailed { path, .. }
            | MountError::DetachFailed { path, .. } => path,
        }
    }

    /// Adapter failure behind this error, if the machine was involved.
    pub fn adapter_error(&self) -> Option<&AdapterError> {
        match self {
            MountError::InvalidPath { .. } => None,
            MountError::AttachFailed { source, .. } | MountError::DetachFailed { source, .. } => {
                Some(source)
            }
        }
    }
}

/// Why a hard file path was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPathReason {
    #[error("path is empty")]
    Empty,

    /// Control characters (NUL included) never appear in a usable image path.
    #[error("control character at byte {index}")]
    ControlCharacter { index: usize },
}

// ============================================================================
// Adapter Errors
// ============================================================================

/// Errors returned by a [`MachineStateAdapter`](crate::MachineStateAdapter).
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Slot already holds an image.
    #[error("slot busy with {0}")]
    Busy(String),

    /// Nothing attached to detach.
    #[error("slot is empty")]
    Empty,

    /// Image path exists but is not a regular file.
    #[error("{path} is not a regular file")]
    NotAFile { path: String },

    /// Image could not be opened.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Machine refused the request.
    #[error("rejected by machine: {0}")]
    Rejected(String),
}
