//! Document Text Extractor — resume bytes in, plain text out.
//!
//! Extraction is best-effort by contract: a corrupt or unsupported document
//! yields an empty string, never an error. Downstream stages treat empty text
//! as "no skills found". Layout, tables, and embedded images are discarded.

mod docx;
mod pdf;

#[cfg(test)]
pub(crate) use docx::build_test_docx;

use bytes::Bytes;
use tracing::warn;

/// Declared format of an uploaded resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Infers the format from the uploaded filename, falling back to the
    /// declared content type.
    pub fn infer(filename: Option<&str>, content_type: Option<&str>) -> Option<Self> {
        if let Some(name) = filename {
            let lower = name.to_ascii_lowercase();
            if lower.ends_with(".pdf") {
                return Some(DocumentFormat::Pdf);
            }
            if lower.ends_with(".docx") {
                return Some(DocumentFormat::Docx);
            }
        }
        match content_type {
            Some("application/pdf") => Some(DocumentFormat::Pdf),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
                Some(DocumentFormat::Docx)
            }
            _ => None,
        }
    }
}

/// A resume as uploaded: raw bytes plus the declared format.
/// Created per request and discarded after text extraction.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    pub format: DocumentFormat,
}

/// Extracts the raw text content of a resume document.
///
/// PDF page text and DOCX paragraph text are concatenated in document order.
pub fn extract_text(document: &ResumeDocument) -> String {
    let result = match document.format {
        DocumentFormat::Pdf => pdf::extract(&document.bytes),
        DocumentFormat::Docx => docx::extract(&document.bytes),
    };

    match result {
        Ok(text) => text,
        Err(e) => {
            warn!("Text extraction failed ({:?}): {e:#}", document.format);
            String::new()
        }
    }
}
