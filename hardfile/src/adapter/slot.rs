//! File-backed storage slot.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::MachineStateAdapter;
use crate::errors::AdapterError;

/// Options for an [`ImageSlot`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOptions {
    /// Open images without write access.
    ///
    /// Default: false
    #[serde(default)]
    pub read_only: bool,
}

/// An image held open by the slot.
#[derive(Debug)]
struct AttachedImage {
    path: PathBuf,
    size: u64,
    #[allow(dead_code)] // Held for lifetime, released on detach
    file: File,
}

/// Single storage slot backed by an image file on the host.
///
/// Attaching opens the image and keeps the handle until detach, so the
/// image must exist and be a regular file. Sector I/O is not done here.
#[derive(Debug)]
pub struct ImageSlot {
    options: SlotOptions,
    image: Option<AttachedImage>,
}

impl ImageSlot {
    pub fn new(options: SlotOptions) -> Self {
        Self {
            options,
            image: None,
        }
    }

    pub fn options(&self) -> &SlotOptions {
        &self.options
    }

    /// Path of the image currently held open.
    pub fn attached_path(&self) -> Option<&Path> {
        self.image.as_ref().map(|image| image.path.as_path())
    }

    /// Size in bytes of the attached image, as seen at attach time.
    pub fn image_size(&self) -> Option<u64> {
        self.image.as_ref().map(|image| image.size)
    }

    /// Drop the attached image the way a machine reset would.
    ///
    /// Returns the path that was attached. The owning controller must be
    /// told via `notify_forced_detach`.
    pub fn reset(&mut self) -> Option<PathBuf> {
        let image = self.image.take()?;
        tracing::info!(path = %image.path.display(), "Slot reset, image released");
        Some(image.path)
    }
}

impl Default for ImageSlot {
    fn default() -> Self {
        Self::new(SlotOptions::default())
    }
}

impl MachineStateAdapter for ImageSlot {
    fn attach(&mut self, path: &str) -> Result<(), AdapterError> {
        if let Some(image) = &self.image {
            return Err(AdapterError::Busy(image.path.display().to_string()));
        }

        let io_err = |source: std::io::Error| AdapterError::Io {
            path: path.to_string(),
            source,
        };

        let metadata = std::fs::metadata(path).map_err(io_err)?;
        if !metadata.is_file() {
            return Err(AdapterError::NotAFile {
                path: path.to_string(),
            });
        }

        let file = OpenOptions::new()
            .read(true)
            .write(!self.options.read_only)
            .open(path)
            .map_err(io_err)?;

        tracing::debug!(
            path = %path,
            size = metadata.len(),
            read_only = self.options.read_only,
            "Image attached to slot"
        );

        self.image = Some(AttachedImage {
            path: PathBuf::from(path),
            size: metadata.len(),
            file,
        });
        Ok(())
    }

    fn detach(&mut self) -> Result<(), AdapterError> {
        let image = self.image.take().ok_or(AdapterError::Empty)?;
        tracing::debug!(path = %image.path.display(), "Image detached from slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn image(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, vec![0u8; 512]).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_attach_and_detach() {
        let dir = TempDir::new().unwrap();
        let path = image(&dir, "disk1.hdf");
        let mut slot = ImageSlot::default();

        slot.attach(&path).unwrap();
        assert_eq!(slot.attached_path(), Some(Path::new(&path)));
        assert_eq!(slot.image_size(), Some(512));

        slot.detach().unwrap();
        assert!(slot.attached_path().is_none());
    }

    #[test]
    fn test_attach_missing_image() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.hdf");
        let mut slot = ImageSlot::default();

        let err = slot.attach(&missing.to_string_lossy()).unwrap_err();
        assert!(matches!(err, AdapterError::Io { .. }));
        assert!(slot.attached_path().is_none());
    }

    #[test]
    fn test_attach_directory() {
        let dir = TempDir::new().unwrap();
        let mut slot = ImageSlot::default();

        let err = slot.attach(&dir.path().to_string_lossy()).unwrap_err();
        assert!(matches!(err, AdapterError::NotAFile { .. }));
    }

    #[test]
    fn test_attach_when_busy() {
        let dir = TempDir::new().unwrap();
        let first = image(&dir, "a.hdf");
        let second = image(&dir, "b.hdf");
        let mut slot = ImageSlot::default();

        slot.attach(&first).unwrap();
        let err = slot.attach(&second).unwrap_err();
        assert!(matches!(err, AdapterError::Busy(_)));
        assert_eq!(slot.attached_path(), Some(Path::new(&first)));
    }

    #[test]
    fn test_detach_empty() {
        let mut slot = ImageSlot::default();
        assert!(matches!(slot.detach(), Err(AdapterError::Empty)));
    }

    fn held_file(slot: &ImageSlot) -> &File {
        &slot.image.as_ref().expect("no image attached").file
    }

    #[test]
    fn test_read_only_attach_has_no_write_access() {
        let dir = TempDir::new().unwrap();
        let path = image(&dir, "ro.hdf");
        let mut slot = ImageSlot::new(SlotOptions { read_only: true });

        slot.attach(&path).unwrap();
        let mut file = held_file(&slot);
        assert!(file.write_all(b"boot block").is_err());
        assert_eq!(std::fs::read(&path).unwrap(), vec![0u8; 512]);
    }

    #[test]
    fn test_default_attach_is_writable() {
        let dir = TempDir::new().unwrap();
        let path = image(&dir, "rw.hdf");
        let mut slot = ImageSlot::default();

        slot.attach(&path).unwrap();
        let mut file = held_file(&slot);
        file.write_all(b"boot").unwrap();
        file.flush().unwrap();
        assert_eq!(&std::fs::read(&path).unwrap()[..4], b"boot");
    }

    #[test]
    fn test_reset_releases_image() {
        let dir = TempDir::new().unwrap();
        let path = image(&dir, "reset.hdf");
        let mut slot = ImageSlot::default();

        assert!(slot.reset().is_none());
        slot.attach(&path).unwrap();
        assert_eq!(slot.reset(), Some(PathBuf::from(&path)));
        assert!(slot.attached_path().is_none());
    }
}
