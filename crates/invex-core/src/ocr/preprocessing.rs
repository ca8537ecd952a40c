//! Image preprocessing for OCR.

use image::{DynamicImage, GrayImage, Luma};
use tracing::trace;

/// Binarizes page images ahead of recognition.
pub struct ImagePreprocessor {
    /// Grayscale values strictly above this become white.
    threshold: u8,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with the default threshold (150).
    pub fn new() -> Self {
        Self { threshold: 150 }
    }

    /// Set the binarization threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Convert to grayscale, then apply a fixed binary threshold.
    pub fn binarize(&self, image: &DynamicImage) -> GrayImage {
        let gray = image.to_luma8();
        let (width, height) = gray.dimensions();
        trace!("Binarizing {}x{} page at threshold {}", width, height, self.threshold);

        let mut result = GrayImage::new(width, height);
        for (x, y, pixel) in gray.enumerate_pixels() {
            let output = if pixel[0] > self.threshold { 255 } else { 0 };
            result.put_pixel(x, y, Luma([output]));
        }

        result
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
