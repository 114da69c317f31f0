//! Resume text extraction.
//!
//! PDFs go through native extraction first; when that yields too little
//! text (scanned documents) or the caller forces it, the OCR HTTP API takes
//! over. Plain-text uploads pass straight through. Anything else is
//! rejected with a structured error.

pub mod ocr;

use thiserror::Error;
use tracing::{info, warn};

use crate::extract::ocr::{OcrClient, OcrError};

/// Native extraction shorter than this is assumed to be a scanned PDF.
const MIN_NATIVE_TEXT_LEN: usize = 100;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    #[error("unsupported file format '{0}': upload a PDF or plain-text resume")]
    UnsupportedFormat(String),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Whether the OCR fallback should run for this extraction result.
pub fn needs_ocr(text: &str, force: bool) -> bool {
    force || text.trim().len() < MIN_NATIVE_TEXT_LEN
}

/// Extracts text from an uploaded resume.
///
/// Missing OCR credentials degrade to an explanatory message rather than an
/// error: the upload still lands, the user is told why the text is thin.
pub async fn extract_resume_text(
    data: &[u8],
    file_name: &str,
    force_ocr: bool,
    ocr: Option<&OcrClient>,
) -> Result<String, ExtractError> {
    match extension_of(file_name).as_deref() {
        Some("pdf") => extract_pdf_text(data, force_ocr, ocr).await,
        Some("txt") | Some("text") | Some("md") => {
            Ok(String::from_utf8_lossy(data).into_owned())
        }
        other => Err(ExtractError::UnsupportedFormat(
            other.unwrap_or("none").to_string(),
        )),
    }
}

async fn extract_pdf_text(
    data: &[u8],
    force_ocr: bool,
    ocr: Option<&OcrClient>,
) -> Result<String, ExtractError> {
    let bytes = data.to_vec();
    let native = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    if !needs_ocr(&native, force_ocr) {
        return Ok(native);
    }

    match ocr {
        Some(client) => {
            info!("native extraction too thin ({} chars), falling back to OCR", native.trim().len());
            Ok(client.extract_text(data).await?)
        }
        None => {
            warn!("OCR needed but credentials are not configured");
            Ok("OCR processing requested but OCR API credentials are not configured.".to_string())
        }
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    file_name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_ocr_on_short_text() {
        assert!(needs_ocr("only a title", false));
        assert!(!needs_ocr(&"x".repeat(200), false));
    }

    #[test]
    fn test_needs_ocr_when_forced() {
        assert!(needs_ocr(&"x".repeat(200), true));
    }

    #[test]
    fn test_extension_sniffing() {
        assert_eq!(extension_of("resume.PDF").as_deref(), Some("pdf"));
        assert_eq!(extension_of("notes.txt").as_deref(), Some("txt"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("no_extension"), None);
    }

    #[tokio::test]
    async fn test_plain_text_passes_through() {
        let text = extract_resume_text(b"my resume body", "resume.txt", false, None)
            .await
            .unwrap();
        assert_eq!(text, "my resume body");
    }

    #[tokio::test]
    async fn test_unsupported_format_is_rejected() {
        let err = extract_resume_text(b"...", "resume.docx", false, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ext) if ext == "docx"));
    }

    #[tokio::test]
    async fn test_invalid_pdf_bytes_error() {
        let err = extract_resume_text(b"not a pdf", "resume.pdf", false, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
