//! Document text extraction with OCR fallback.
//!
//! Embedded text is preferred. When it is too short to be useful the
//! document is rasterized, each page binarized and written to a scratch
//! image, and the OCR engine reads the pages back in order.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::InvexConfig;
use crate::ocr::{ImagePreprocessor, OcrEngine, ScratchDir, TesseractEngine};
use crate::pdf::{PageRasterizer, PdfExtractor, PdfProcessor, PdftoppmRasterizer};

/// Where a document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// The PDF's embedded text layer.
    Embedded,
    /// OCR over rasterized pages.
    Ocr,
}

/// Text extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub source: TextSource,
    /// Pages read from the text layer, or pages rasterized for OCR.
    pub page_count: u32,
}

/// Extracts a document's text, falling back to OCR for short text layers.
pub struct TextExtractor<R = PdftoppmRasterizer, O = TesseractEngine> {
    rasterizer: R,
    ocr: O,
    preprocessor: ImagePreprocessor,
    min_text_length: usize,
    render_dpi: u32,
    scratch_parent: Option<PathBuf>,
}

impl TextExtractor {
    /// Build the `pdftoppm` + Tesseract extractor described by `config`.
    pub fn from_config(config: &InvexConfig) -> Self {
        let rasterizer = PdftoppmRasterizer::new().with_command(&config.ocr.pdftoppm_command);
        let ocr = TesseractEngine::new(&config.ocr.languages)
            .with_command(&config.ocr.tesseract_command);

        TextExtractor::new(rasterizer, ocr)
            .with_min_text_length(config.pdf.min_text_length)
            .with_render_dpi(config.pdf.render_dpi)
            .with_preprocessor(
                ImagePreprocessor::new().with_threshold(config.ocr.binarize_threshold),
            )
    }
}

impl<R: PageRasterizer, O: OcrEngine> TextExtractor<R, O> {
    pub fn new(rasterizer: R, ocr: O) -> Self {
        Self {
            rasterizer,
            ocr,
            preprocessor: ImagePreprocessor::new(),
            min_text_length: 20,
            render_dpi: 200,
            scratch_parent: None,
        }
    }

    /// Embedded text shorter than this (trimmed, in chars) triggers OCR.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    pub fn with_render_dpi(mut self, dpi: u32) -> Self {
        self.render_dpi = dpi;
        self
    }

    pub fn with_preprocessor(mut self, preprocessor: ImagePreprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    /// Place scratch page images under `parent` instead of the system temp dir.
    pub fn with_scratch_dir(mut self, parent: impl Into<PathBuf>) -> Self {
        self.scratch_parent = Some(parent.into());
        self
    }

    /// Extract the text of the PDF at `pdf_path`.
    pub fn extract(&self, pdf_path: &Path) -> Result<ExtractedText> {
        let start = Instant::now();
        let pdf = PdfExtractor::open(pdf_path)?;
        let embedded = pdf.extract_text()?;

        if !self.is_too_short(&embedded) {
            info!(
                "Using embedded text for {} ({} pages, {} chars)",
                pdf_path.display(),
                pdf.page_count(),
                embedded.trim().chars().count()
            );
            return Ok(ExtractedText {
                text: embedded,
                source: TextSource::Embedded,
                page_count: pdf.page_count(),
            });
        }

        info!(
            "Embedded text of {} is under {} chars, falling back to OCR",
            pdf_path.display(),
            self.min_text_length
        );

        let (text, page_count) = self.ocr_pages(pdf_path)?;
        debug!(
            "OCR of {} took {}ms",
            pdf_path.display(),
            start.elapsed().as_millis()
        );

        Ok(ExtractedText {
            text,
            source: TextSource::Ocr,
            page_count,
        })
    }

    fn is_too_short(&self, text: &str) -> bool {
        text.trim().chars().count() < self.min_text_length
    }

    fn ocr_pages(&self, pdf_path: &Path) -> Result<(String, u32)> {
        let pages = self.rasterizer.rasterize(pdf_path, self.render_dpi)?;
        let scratch = match &self.scratch_parent {
            Some(parent) => ScratchDir::new_in(parent)?,
            None => ScratchDir::new()?,
        };

        let mut text = String::new();
        for (index, page) in pages.iter().enumerate() {
            let binary = self.preprocessor.binarize(page);
            let image = scratch.write_page(index, &binary)?;

            let page_text = self.ocr.recognize(image.path())?;
            debug!("Page {} OCR yielded {} chars", index + 1, page_text.len());

            text.push_str(&page_text);
            text.push('\n');
        }

        Ok((text, pages.len() as u32))
    }
}
