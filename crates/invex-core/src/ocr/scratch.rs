//! Scoped temporary page images.

use std::path::{Path, PathBuf};

use image::GrayImage;
use tempfile::TempDir;
use tracing::{trace, warn};

use crate::error::OcrError;

/// Scratch directory holding one document's page images.
///
/// The directory and anything left in it are removed on drop.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a fresh scratch directory under the system temp dir.
    pub fn new() -> Result<Self, OcrError> {
        let dir = tempfile::Builder::new().prefix("invex-ocr-").tempdir()?;
        Ok(Self { dir })
    }

    /// Create a scratch directory under `parent`.
    pub fn new_in(parent: &Path) -> Result<Self, OcrError> {
        let dir = tempfile::Builder::new().prefix("invex-ocr-").tempdir_in(parent)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write the image for page `index` (0-based) as `page-<index>.png`.
    pub fn write_page(&self, index: usize, image: &GrayImage) -> Result<ScratchImage, OcrError> {
        let path = self.dir.path().join(format!("page-{}.png", index));
        image
            .save(&path)
            .map_err(|e| OcrError::Preprocessing(format!("failed to write {}: {}", path.display(), e)))?;

        trace!("Wrote scratch image {}", path.display());
        Ok(ScratchImage { path })
    }
}

/// A page image on disk, deleted when dropped.
#[derive(Debug)]
pub struct ScratchImage {
    path: PathBuf,
}

impl ScratchImage {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchImage {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => trace!("Removed scratch image {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}
