//! Batch driver: folder enumeration and per-file extraction into a result table.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{InvexError, Result};
use crate::extract::TextExtractor;
use crate::invoice::FieldParser;
use crate::models::record::{FieldRecord, ResultTable};
use crate::ocr::OcrEngine;
use crate::pdf::PageRasterizer;

/// List the `.pdf` files directly inside `dir`, in directory-listing order.
///
/// The suffix match is case-sensitive and subdirectories are not entered.
pub fn list_invoices(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(InvexError::Config(format!(
            "input folder {} is not a directory",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let is_pdf = entry.file_name().to_string_lossy().ends_with(".pdf");
        if is_pdf && !entry.file_type()?.is_dir() {
            files.push(entry.path());
        }
    }

    Ok(files)
}

/// A file left out of the table because its extraction failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub error: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One record per successfully processed file, in processing order.
    pub table: ResultTable,
    /// Files skipped because of errors (only with continue-on-error).
    pub failures: Vec<FileFailure>,
}

/// Runs the extractor and parser over a list of files.
pub struct BatchProcessor<'a, R, O> {
    extractor: &'a TextExtractor<R, O>,
    parser: FieldParser,
    continue_on_error: bool,
}

impl<'a, R: PageRasterizer, O: OcrEngine> BatchProcessor<'a, R, O> {
    pub fn new(extractor: &'a TextExtractor<R, O>) -> Self {
        Self {
            extractor,
            parser: FieldParser::new(),
            continue_on_error: false,
        }
    }

    /// Record failing files and keep going instead of aborting the batch.
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Extract and parse a single file into a record.
    pub fn process_file(&self, path: &Path) -> Result<FieldRecord> {
        let extracted = self.extractor.extract(path)?;
        let fields = self.parser.parse(&extracted.text);
        Ok(FieldRecord::new(fields, file_name(path)))
    }

    /// Process `files` in order.
    ///
    /// `on_file` is called with the file name before each file is processed.
    /// Unless continue-on-error is set, the first failure aborts the run and
    /// the records collected so far are dropped.
    pub fn run<F>(&self, files: &[PathBuf], mut on_file: F) -> Result<BatchReport>
    where
        F: FnMut(&str),
    {
        let mut report = BatchReport::default();

        for path in files {
            let name = file_name(path);
            on_file(&name);

            match self.process_file(path) {
                Ok(record) => report.table.push(record),
                Err(e) if self.continue_on_error => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    report.failures.push(FileFailure {
                        file_name: name,
                        error: e.to_string(),
                    });
                }
                Err(e) => {
                    return Err(InvexError::File {
                        file: name,
                        source: Box::new(e),
                    });
                }
            }
        }

        info!(
            "Batch complete: {} records, {} failures",
            report.table.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// List the PDFs in `dir` and process them.
    pub fn run_dir<F>(&self, dir: &Path, on_file: F) -> Result<BatchReport>
    where
        F: FnMut(&str),
    {
        let files = list_invoices(dir)?;
        info!("Found {} PDF files in {}", files.len(), dir.display());
        self.run(&files, on_file)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_pdf, FakeOcr, FakeRasterizer};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_invoices_filters_suffix() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.PDF", "notes.txt", "c.pdf.bak", "d.pdf"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("e.pdf"), b"").unwrap();

        let mut names: Vec<String> = list_invoices(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.pdf", "d.pdf"]);
    }

    #[test]
    fn test_list_invoices_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_invoices(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, InvexError::Config(_)));
    }

    #[test]
    fn test_end_to_end_embedded_text() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(
            dir.path(),
            "invoice.pdf",
            &[&["Invoice ABC123 Date 01/01/2024 Total 99.99"]],
        );

        let rasterizer = FakeRasterizer::pages(1);
        let ocr = FakeOcr::returning(&[]);
        let extractor = TextExtractor::new(&rasterizer, &ocr);

        let mut progress = Vec::new();
        let report = BatchProcessor::new(&extractor)
            .run_dir(dir.path(), |name| progress.push(name.to_string()))
            .unwrap();

        assert_eq!(progress, vec!["invoice.pdf"]);
        assert_eq!(
            report.table.records(),
            &[FieldRecord {
                invoice_number: Some("ABC123".to_string()),
                date: Some("01/01/2024".to_string()),
                total_amount: Some("99.99".to_string()),
                source_file: "invoice.pdf".to_string(),
            }]
        );
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_end_to_end_ocr_fallback() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(dir.path(), "scan.pdf", &[&[]]);

        let rasterizer = FakeRasterizer::pages(1);
        let ocr = FakeOcr::returning(&["发票 88017\n日期 15/03/2024\n合计 1,234.56"]);
        let extractor = TextExtractor::new(&rasterizer, &ocr);

        let report = BatchProcessor::new(&extractor)
            .run_dir(dir.path(), |_| {})
            .unwrap();

        let record = &report.table.records()[0];
        assert_eq!(record.invoice_number.as_deref(), Some("88017"));
        assert_eq!(record.date.as_deref(), Some("15/03/2024"));
        assert_eq!(record.total_amount.as_deref(), Some("1,234.56"));
        assert_eq!(record.source_file, "scan.pdf");
    }

    #[test]
    fn test_rows_follow_listing_order_and_repeat() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(dir.path(), "one.pdf", &[&["Invoice 1 dated 01/02/2023 sum 10.00"]]);
        write_pdf(dir.path(), "two.pdf", &[&["Faktura 2 dated 03/04/2023 sum 20.00"]]);
        write_pdf(dir.path(), "three.pdf", &[&["Nothing to see on this page at all"]]);

        let rasterizer = FakeRasterizer::pages(1);
        let ocr = FakeOcr::returning(&[]);
        let extractor = TextExtractor::new(&rasterizer, &ocr);
        let processor = BatchProcessor::new(&extractor);

        let listing: Vec<String> = list_invoices(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect();

        let first = processor.run_dir(dir.path(), |_| {}).unwrap();
        let second = processor.run_dir(dir.path(), |_| {}).unwrap();

        let order: Vec<String> = first
            .table
            .records()
            .iter()
            .map(|r| r.source_file.clone())
            .collect();
        assert_eq!(order, listing);
        assert_eq!(first.table, second.table);

        let blank = first
            .table
            .records()
            .iter()
            .find(|r| r.source_file == "three.pdf")
            .unwrap();
        assert_eq!(blank.invoice_number, None);
        assert_eq!(blank.date, None);
        assert_eq!(blank.total_amount, None);
    }

    #[test]
    fn test_failure_aborts_batch() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(dir.path(), "good.pdf", &[&["Invoice 1 dated 01/02/2023 sum 10.00"]]);
        std::fs::write(dir.path().join("bad.pdf"), b"not a pdf").unwrap();

        let rasterizer = FakeRasterizer::pages(1);
        let ocr = FakeOcr::returning(&[]);
        let extractor = TextExtractor::new(&rasterizer, &ocr);

        let err = BatchProcessor::new(&extractor)
            .run_dir(dir.path(), |_| {})
            .unwrap_err();

        match err {
            InvexError::File { file, source } => {
                assert_eq!(file, "bad.pdf");
                assert!(matches!(*source, InvexError::Pdf(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_continue_on_error_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(dir.path(), "good.pdf", &[&["Invoice 1 dated 01/02/2023 sum 10.00"]]);
        std::fs::write(dir.path().join("bad.pdf"), b"not a pdf").unwrap();

        let rasterizer = FakeRasterizer::pages(1);
        let ocr = FakeOcr::returning(&[]);
        let extractor = TextExtractor::new(&rasterizer, &ocr);

        let report = BatchProcessor::new(&extractor)
            .with_continue_on_error(true)
            .run_dir(dir.path(), |_| {})
            .unwrap();

        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.records()[0].source_file, "good.pdf");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file_name, "bad.pdf");
    }

    #[test]
    fn test_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        let rasterizer = FakeRasterizer::pages(1);
        let ocr = FakeOcr::returning(&[]);
        let extractor = TextExtractor::new(&rasterizer, &ocr);

        let report = BatchProcessor::new(&extractor)
            .run_dir(dir.path(), |_| panic!("no files expected"))
            .unwrap();
        assert!(report.table.is_empty());
    }
}
