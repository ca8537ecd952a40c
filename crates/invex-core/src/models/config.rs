//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the invex pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Batch run configuration.
    pub batch: BatchConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,
}

/// Batch run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Folder scanned (non-recursively) for `.pdf` files.
    pub input_dir: PathBuf,

    /// Where the result table is written.
    pub output_path: PathBuf,

    /// Skip files whose extraction fails instead of aborting the run.
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("invoices/Chinese"),
            output_path: PathBuf::from("extracted_invoices_chinese.xlsx"),
            continue_on_error: false,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Embedded text shorter than this (after trimming) triggers OCR.
    pub min_text_length: usize,

    /// DPI for rendering PDF pages to images.
    pub render_dpi: u32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 20,
            render_dpi: 200,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language set, `+`-separated.
    pub languages: String,

    /// Grayscale values above this become white, the rest black.
    pub binarize_threshold: u8,

    /// Tesseract executable.
    pub tesseract_command: String,

    /// Poppler `pdftoppm` executable.
    pub pdftoppm_command: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            // English + Chinese (simplified) + Danish
            languages: "eng+chi_sim+dan".to_string(),
            binarize_threshold: 150,
            tesseract_command: "tesseract".to_string(),
            pdftoppm_command: "pdftoppm".to_string(),
        }
    }
}

impl InvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
