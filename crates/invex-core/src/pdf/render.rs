//! Page rasterization through poppler's `pdftoppm`.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::DynamicImage;
use tracing::debug;

use crate::error::RenderError;

/// Turns every page of a PDF into an image, in page order.
pub trait PageRasterizer {
    fn rasterize(&self, pdf_path: &Path, dpi: u32) -> Result<Vec<DynamicImage>, RenderError>;
}

impl<T: PageRasterizer + ?Sized> PageRasterizer for &T {
    fn rasterize(&self, pdf_path: &Path, dpi: u32) -> Result<Vec<DynamicImage>, RenderError> {
        (**self).rasterize(pdf_path, dpi)
    }
}

/// Rasterizer backed by the `pdftoppm` command-line tool.
pub struct PdftoppmRasterizer {
    command: String,
}

impl PdftoppmRasterizer {
    pub fn new() -> Self {
        Self {
            command: "pdftoppm".to_string(),
        }
    }

    /// Use a different `pdftoppm` executable.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf_path: &Path, dpi: u32) -> Result<Vec<DynamicImage>, RenderError> {
        let temp_dir = tempfile::Builder::new().prefix("invex-render-").tempdir()?;

        let output = Command::new(&self.command)
            .args(["-png", "-r", &dpi.to_string()])
            .arg(pdf_path)
            .arg(temp_dir.path().join("page"))
            .output();

        match output {
            Ok(output) if output.status.success() => {}
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(RenderError::Failed(stderr.trim().to_string()));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::ToolNotFound(self.command.clone()));
            }
            Err(e) => return Err(RenderError::Io(e)),
        }

        let pages = page_images(temp_dir.path())?;
        if pages.is_empty() {
            return Err(RenderError::NoImages(pdf_path.display().to_string()));
        }

        debug!("pdftoppm rendered {} pages at {} DPI", pages.len(), dpi);

        pages
            .iter()
            .map(|path| image::open(path).map_err(RenderError::from))
            .collect()
    }
}

/// PNGs written by `pdftoppm`, in page order.
///
/// `pdftoppm` zero-pads page numbers to a common width (`page-01.png`,
/// `page-10.png`), so lexical order is page order.
fn page_images(dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
        .collect();

    images.sort();
    Ok(images)
}
