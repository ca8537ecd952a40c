//! PDF processing module.

mod extractor;
mod render;

pub use extractor::PdfExtractor;
pub use render::{PageRasterizer, PdftoppmRasterizer};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text-layer access.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract embedded text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract embedded text from every page.
    ///
    /// Page texts are concatenated in page order, each followed by a
    /// newline. Pages with no text (or only whitespace) contribute nothing.
    fn extract_text(&self) -> Result<String> {
        let mut text = String::new();
        for page in 1..=self.page_count() {
            let page_text = self.extract_page_text(page)?;
            if !page_text.trim().is_empty() {
                text.push_str(&page_text);
                text.push('\n');
            }
        }
        Ok(text)
    }
}
