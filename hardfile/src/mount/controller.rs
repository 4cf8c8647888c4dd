//! Mount controller for the single hard file slot.

use super::path::validate_path;
use super::state::MountState;
use crate::adapter::MachineStateAdapter;
use crate::errors::{MountError, MountResult};
use crate::metrics::MountMetrics;

/// Owns the attachment state of one storage slot and mediates every
/// attach/detach request to the machine.
///
/// Queries answer from the cached [`MountState`] and never reach the
/// adapter. Mutations update the cache only after the adapter confirms.
///
/// The controller does no locking of its own. Callers on several threads
/// must serialize access, e.g. with `parking_lot::Mutex<MountController<A>>`
/// for an `A: Send` adapter.
#[derive(Debug)]
pub struct MountController<A> {
    adapter: A,
    state: MountState,
    metrics: MountMetrics,
}

impl<A: MachineStateAdapter> MountController<A> {
    /// Create a controller in the unmounted state.
    ///
    /// The adapter's slot is assumed to be empty.
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            state: MountState::Unmounted,
            metrics: MountMetrics::new(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.state.is_mounted()
    }

    /// Path of the mounted image, or `None` when unmounted.
    pub fn mounted_path(&self) -> Option<&str> {
        self.state.path()
    }

    /// Cached attachment state, suitable for save-states.
    pub fn state(&self) -> &MountState {
        &self.state
    }

    pub fn metrics(&self) -> &MountMetrics {
        &self.metrics
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access to the adapter, e.g. to reset the machine.
    ///
    /// Attaching or detaching through this handle desynchronizes the
    /// controller; report machine-side detaches with
    /// [`notify_forced_detach`](Self::notify_forced_detach).
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    /// Mount the image at `path`.
    ///
    /// When an image is already mounted it is replaced: the current image
    /// is detached first, then `path` is attached.
    ///
    /// # Errors
    ///
    /// - `InvalidPath`: `path` is empty or contains control characters.
    ///   The adapter is not called and the state is unchanged.
    /// - `DetachFailed`: the current image could not be detached. Still
    ///   mounted on the current image.
    /// - `AttachFailed`: `path` could not be attached. The slot ends up
    ///   unmounted, also when the previous image was already detached.
    pub fn mount(&mut self, path: &str) -> MountResult<()> {
        if let Err(reason) = validate_path(path) {
            self.metrics.increment_invalid_paths();
            tracing::debug!(path = ?path, %reason, "Rejected hard file path");
            return Err(MountError::InvalidPath {
                path: path.to_string(),
                reason,
            });
        }

        let replaced = match &self.state {
            MountState::Mounted { path: current } => Some(current.clone()),
            MountState::Unmounted => None,
        };

        if let Some(current) = &replaced {
            tracing::debug!(from = %current, to = %path, "Replacing mounted hard file");
            self.detach(current)?;
        }

        if let Err(source) = self.adapter.attach(path) {
            self.metrics.increment_attach_failures();
            if let Some(previous) = &replaced {
                self.metrics.increment_abandoned_images();
                tracing::warn!(previous = %previous, "Replaced hard file detached, slot left empty");
            }
            tracing::warn!(path = %path, error = %source, "Failed to attach hard file");
            return Err(MountError::AttachFailed {
                path: path.to_string(),
                source,
            });
        }

        self.state = MountState::Mounted {
            path: path.to_string(),
        };
        self.metrics.increment_mounts();
        if replaced.is_some() {
            self.metrics.increment_replacements();
        }
        tracing::info!(path = %path, "Hard file mounted");
        Ok(())
    }

    /// Unmount the current image.
    ///
    /// Unmounting while already unmounted succeeds without touching the
    /// adapter.
    ///
    /// # Errors
    ///
    /// Returns `DetachFailed` if the adapter could not detach; the image
    /// stays mounted.
    pub fn unmount(&mut self) -> MountResult<()> {
        let current = match &self.state {
            MountState::Mounted { path } => path.clone(),
            MountState::Unmounted => {
                tracing::debug!("Unmount requested while unmounted");
                return Ok(());
            }
        };

        self.detach(&current)?;
        self.metrics.increment_unmounts();
        tracing::info!(path = %current, "Hard file unmounted");
        Ok(())
    }

    /// Record that the machine dropped the image on its own (reset, device
    /// removal). The adapter is not called.
    ///
    /// Returns the path that was mounted, if any.
    pub fn notify_forced_detach(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            MountState::Mounted { path } => {
                self.metrics.increment_forced_detaches();
                tracing::warn!(path = %path, "Machine detached hard file");
                Some(path)
            }
            MountState::Unmounted => None,
        }
    }

    /// Bring the slot to a previously saved state through the regular
    /// `mount`/`unmount` operations.
    ///
    /// Restoring the state already held does nothing.
    ///
    /// # Errors
    ///
    /// Same as [`mount`](Self::mount) or [`unmount`](Self::unmount).
    pub fn restore(&mut self, saved: &MountState) -> MountResult<()> {
        if &self.state == saved {
            tracing::debug!(state = %saved, "Saved mount state already active");
            return Ok(());
        }

        match saved {
            MountState::Mounted { path } => self.mount(path),
            MountState::Unmounted => self.unmount(),
        }
    }

    /// Detach the current image and settle into `Unmounted`.
    fn detach(&mut self, current: &str) -> MountResult<()> {
        if let Err(source) = self.adapter.detach() {
            self.metrics.increment_detach_failures();
            tracing::warn!(path = %current, error = %source, "Failed to detach hard file");
            return Err(MountError::DetachFailed {
                path: current.to_string(),
                source,
            });
        }

        self.state = MountState::Unmounted;
        Ok(())
    }
}
