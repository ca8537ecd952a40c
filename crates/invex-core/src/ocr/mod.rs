//! OCR fallback: page binarization, scratch images, and the Tesseract engine.

mod preprocessing;
mod scratch;
mod tesseract;

pub use preprocessing::ImagePreprocessor;
pub use scratch::{ScratchDir, ScratchImage};
pub use tesseract::TesseractEngine;

use std::path::Path;

use crate::error::OcrError;

/// An optical character recognition engine.
///
/// Engines read a prepared image from disk and return its text.
pub trait OcrEngine {
    /// Recognize text in the image at `image_path`.
    fn recognize(&self, image_path: &Path) -> Result<String, OcrError>;
}

impl<T: OcrEngine + ?Sized> OcrEngine for &T {
    fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        (**self).recognize(image_path)
    }
}
