//! Tesseract OCR engine via the command-line tool.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::OcrEngine;
use crate::error::OcrError;

/// Runs `tesseract <image> stdout -l <languages>`.
pub struct TesseractEngine {
    command: String,
    languages: String,
}

impl TesseractEngine {
    /// Create an engine for a `+`-separated language set, e.g. `eng+chi_sim+dan`.
    pub fn new(languages: impl Into<String>) -> Self {
        Self {
            command: "tesseract".to_string(),
            languages: languages.into(),
        }
    }

    /// Use a different `tesseract` executable.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn languages(&self) -> &str {
        &self.languages
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.languages])
            .output();

        match output {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout).into_owned();
                debug!(
                    "tesseract [{}] recognized {} chars in {}",
                    self.languages,
                    text.len(),
                    image_path.display()
                );
                Ok(text)
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::Recognition(format!("tesseract failed: {}", stderr.trim())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::EngineUnavailable(
                format!("{} not found (install tesseract-ocr)", self.command),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}
