use crate::errors::InvalidPathReason;

/// Check that `path` is usable as a hard file path.
///
/// Only syntax is checked here: the path must be non-empty and free of
/// control characters. Whether the image exists is for the machine to say.
pub fn validate_path(path: &str) -> Result<(), InvalidPathReason> {
    if path.is_empty() {
        return Err(InvalidPathReason::Empty);
    }

    if let Some((index, _)) = path.char_indices().find(|(_, c)| c.is_control()) {
        return Err(InvalidPathReason::ControlCharacter { index });
    }

    Ok(())
}
