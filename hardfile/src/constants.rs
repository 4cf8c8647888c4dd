//! Constants shared by the library and its front ends.

/// Environment variables understood by front ends.
pub mod envs {
    /// Image to mount when a session starts.
    pub const HARDFILE_IMAGE: &str = "HARDFILE_IMAGE";

    /// Log filter used when `RUST_LOG` is not set.
    pub const HARDFILE_LOG: &str = "HARDFILE_LOG";
}

/// Logging defaults.
pub mod logging {
    pub const DEFAULT_LEVEL: &str = "warn";
}
