//! Core library for batch invoice field extraction.
//!
//! This crate provides:
//! - PDF text extraction with an OCR fallback for scanned documents
//! - Invoice Number, Date and Total Amount extraction rules
//! - A batch driver over a folder of PDFs
//! - Result table output as xlsx, CSV or JSON

pub mod error;
pub mod models;
pub mod pdf;
pub mod ocr;
pub mod invoice;
pub mod extract;
pub mod batch;
pub mod output;

#[cfg(test)]
mod test_support;

pub use error::{InvexError, Result};
pub use models::config::{BatchConfig, InvexConfig, OcrConfig, PdfConfig};
pub use models::record::{FieldRecord, InvoiceFields, ResultTable, COLUMNS};
pub use pdf::{PageRasterizer, PdfExtractor, PdfProcessor, PdftoppmRasterizer};
pub use ocr::{ImagePreprocessor, OcrEngine, TesseractEngine};
pub use invoice::FieldParser;
pub use extract::{ExtractedText, TextExtractor, TextSource};
pub use batch::{list_invoices, BatchProcessor, BatchReport, FileFailure};
pub use output::{write_table, OutputFormat};
