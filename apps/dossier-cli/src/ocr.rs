//! OCR through the external `tesseract` binary

use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

use completeness_engine::{OcrEngine, OcrError};
use image::{DynamicImage, ImageFormat};

/// Pipes each page as PNG into `tesseract stdin stdout`
#[derive(Debug, Clone, Copy, Default)]
pub struct TesseractOcr;

impl OcrEngine for TesseractOcr {
    fn recognize(&self, page: &DynamicImage, language: &str) -> Result<String, OcrError> {
        let mut png = Vec::new();
        page.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OcrError::Failed(format!("could not encode page: {}", e)))?;

        let mut child = Command::new("tesseract")
            .args(["stdin", "stdout", "-l", language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    OcrError::Unavailable("tesseract (install tesseract-ocr)".to_string())
                }
                _ => OcrError::Failed(e.to_string()),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&png)
                .map_err(|e| OcrError::Failed(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| OcrError::Failed(e.to_string()))?;
        if !output.status.success() {
            return Err(OcrError::Failed(format!(
                "tesseract failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
