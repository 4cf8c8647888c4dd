//! Mount statistics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters for one controller.
///
/// All counters are monotonic (never decrease).
#[derive(Default, Debug)]
pub struct MountMetrics {
    /// Successful mounts, replacements included
    pub(crate) mounts: AtomicU64,
    /// Successful explicit unmounts of an attached image
    pub(crate) unmounts: AtomicU64,
    /// Mounts that swapped out a previously attached image
    pub(crate) replacements: AtomicU64,
    /// Images detached by a replace whose attach then failed
    pub(crate) abandoned_images: AtomicU64,
    /// Images dropped by the machine without a controller request
    pub(crate) forced_detaches: AtomicU64,
    pub(crate) attach_failures: AtomicU64,
    pub(crate) detach_failures: AtomicU64,
    /// Paths rejected before reaching the machine
    pub(crate) invalid_paths: AtomicU64,
}

impl MountMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn increment_mounts(&self) {
        self.mounts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_unmounts(&self) {
        self.unmounts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_replacements(&self) {
        self.replacements.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_abandoned_images(&self) {
        self.abandoned_images.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_forced_detaches(&self) {
        self.forced_detaches.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_attach_failures(&self) {
        self.attach_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_detach_failures(&self) {
        self.detach_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_invalid_paths(&self) {
        self.invalid_paths.fetch_add(1, Ordering::Relaxed);
    }

    pub fn mounts(&self) -> u64 {
        self.mounts.load(Ordering::Relaxed)
    }

    pub fn unmounts(&self) -> u64 {
        self.unmounts.load(Ordering::Relaxed)
    }

    pub fn replacements(&self) -> u64 {
        self.replacements.load(Ordering::Relaxed)
    }

    pub fn abandoned_images(&self) -> u64 {
        self.abandoned_images.load(Ordering::Relaxed)
    }

    pub fn forced_detaches(&self) -> u64 {
        self.forced_detaches.load(Ordering::Relaxed)
    }

    pub fn attach_failures(&self) -> u64 {
        self.attach_failures.load(Ordering::Relaxed)
    }

    pub fn detach_failures(&self) -> u64 {
        self.detach_failures.load(Ordering::Relaxed)
    }

    pub fn invalid_paths(&self) -> u64 {
        self.invalid_paths.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> MountMetricsSnapshot {
        MountMetricsSnapshot {
            mounts: self.mounts(),
            unmounts: self.unmounts(),
            replacements: self.replacements(),
            abandoned_images: self.abandoned_images(),
            forced_detaches: self.forced_detaches(),
            attach_failures: self.attach_failures(),
            detach_failures: self.detach_failures(),
            invalid_paths: self.invalid_paths(),
        }
    }
}

/// Plain copy of [`MountMetrics`] for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountMetricsSnapshot {
    pub mounts: u64,
    pub unmounts: u64,
    pub replacements: u64,
    pub abandoned_images: u64,
    pub forced_detaches: u64,
    pub attach_failures: u64,
    pub detach_failures: u64,
    pub invalid_paths: u64,
}

impl MountMetricsSnapshot {
    /// Total failed operations, validation rejections included.
    pub fn failures(&self) -> u64 {
        self.attach_failures + self.detach_failures + self.invalid_paths
    }

    /// Times an attached image left the slot, whatever the cause.
    pub fn detaches(&self) -> u64 {
        self.unmounts + self.replacements + self.abandoned_images + self.forced_detaches
    }
}
