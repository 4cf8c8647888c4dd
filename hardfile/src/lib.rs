//! Hardfile - mount lifecycle for a single emulated hard file volume.
//!
//! The [`MountController`] is the source of truth for whether a hard file
//! image is attached to the emulated machine, and which one. The machine
//! itself is reached through a [`MachineStateAdapter`] injected at
//! construction, so the controller can be driven against a real slot
//! ([`ImageSlot`]) or a fake in tests.
//!
//! ```
//! use hardfile::{ImageSlot, MountController, SlotOptions};
//!
//! let mut controller = MountController::new(ImageSlot::new(SlotOptions::default()));
//! assert!(!controller.is_mounted());
//! assert!(controller.mount("").is_err());
//! assert_eq!(controller.mounted_path(), None);
//! ```

pub mod adapter;
pub mod constants;
pub mod errors;
pub mod metrics;
pub mod mount;

pub use adapter::{ImageSlot, MachineStateAdapter, SlotOptions};
pub use errors::{AdapterError, InvalidPathReason, MountError, MountResult};
pub use metrics::{MountMetrics, MountMetricsSnapshot};
pub use mount::{MountController, MountState, validate_path};
