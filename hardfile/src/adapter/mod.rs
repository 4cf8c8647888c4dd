//! Boundary to the emulated machine's record of attached storage.
//!
//! The controller never touches machine state directly; every attach and
//! detach goes through a [`MachineStateAdapter`].

mod slot;

pub use slot::{ImageSlot, SlotOptions};

use crate::errors::AdapterError;

/// Plugs hard file images into (and out of) the machine's storage slot.
///
/// The controller guarantees ordering: `attach` is only called while the
/// slot is empty, and `detach` only while an image is attached.
/// Implementations should report what actually happened; the controller
/// updates its own state only after an `Ok`.
///
/// Adapters may be `!Send`. A controller shared across threads needs
/// `A: Send`.
pub trait MachineStateAdapter {
    /// Plug the image at `path` into the slot.
    ///
    /// # Errors
    ///
    /// Returns an `AdapterError` if the machine could not attach the image.
    /// The slot must be left empty in that case.
    fn attach(&mut self, path: &str) -> Result<(), AdapterError>;

    /// Unplug whatever is attached.
    ///
    /// # Errors
    ///
    /// Returns an `AdapterError` if the machine could not detach. The
    /// previously attached image must stay attached in that case.
    fn detach(&mut self) -> Result<(), AdapterError>;
}

impl<A: MachineStateAdapter + ?Sized> MachineStateAdapter for Box<A> {
    fn attach(&mut self, path: &str) -> Result<(), AdapterError> {
        (**self).attach(path)
    }

    fn detach(&mut self) -> Result<(), AdapterError> {
        (**self).detach()
    }
}

impl<A: MachineStateAdapter + ?Sized> MachineStateAdapter for &mut A {
    fn attach(&mut self, path: &str) -> Result<(), AdapterError> {
        (**self).attach(path)
    }

    fn detach(&mut self) -> Result<(), AdapterError> {
        (**self).detach()
    }
}
