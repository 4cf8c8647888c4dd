//! Mount state machine for the single hard file slot.
//!
//! - `MountState` - tagged attachment state (`Unmounted` / `Mounted`)
//! - `MountController` - drives the adapter and owns the state
//! - `validate_path` - syntactic checks applied before any attach

mod controller;
mod path;
mod state;

pub use controller::MountController;
pub use path::validate_path;
pub use state::MountState;
