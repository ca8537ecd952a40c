//! Error types for the invex-core library.

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Page rasterization error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Result table output error.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Processing of a specific input file failed.
    #[error("{file}: {source}")]
    File {
        file: String,
        #[source]
        source: Box<InvexError>,
    },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised while turning PDF pages into images.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The rasterizer executable could not be found.
    #[error("rasterizer not found: {0} (install poppler-utils)")]
    ToolNotFound(String),

    /// The rasterizer ran but reported failure.
    #[error("rasterizer failed: {0}")]
    Failed(String),

    /// The rasterizer produced no page images.
    #[error("no page images produced for {0}")]
    NoImages(String),

    /// A produced page image could not be decoded.
    #[error("failed to load page image: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error around the scratch directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR engine executable could not be found.
    #[error("OCR engine not available: {0}")]
    EngineUnavailable(String),

    /// The OCR engine ran but reported failure.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),

    /// I/O error while handling scratch images.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while writing the result table.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Spreadsheet writer error.
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV writer error.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
