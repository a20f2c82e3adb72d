//! Format-specific text extraction.
//!
//! A submission is dispatched on its file extension to a matching reader.
//! Every reader produces plain text; nothing downstream ever sees the raw
//! bytes of a binary format.

pub mod pdf;
pub mod text;
pub mod word;

use std::path::Path;

use crate::types::{AppError, AppResult, ExtractedContext};

/// The recognized set of document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    Txt,
    Markdown,
}

impl DocumentFormat {
    /// Match a filename extension against the recognized set.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())?
            .to_lowercase();

        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "doc" => Some(DocumentFormat::Doc),
            "txt" => Some(DocumentFormat::Txt),
            "md" => Some(DocumentFormat::Markdown),
            _ => None,
        }
    }
}

/// Extract plain text from raw file bytes, dispatching on the extension.
///
/// Fails with [`AppError::UnsupportedFormat`] when the extension matches
/// none of the recognized formats, or when the matching reader cannot get
/// text out of the bytes.
pub fn extract_text(data: &[u8], file_name: &str) -> AppResult<ExtractedContext> {
    let format = DocumentFormat::from_file_name(file_name).ok_or_else(|| {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)");
        AppError::UnsupportedFormat(format!(
            "{}: supported formats are pdf, docx, doc, txt, md",
            ext
        ))
    })?;

    tracing::debug!(file_name, format = ?format, size = data.len(), "extracting text");

    let raw = match format {
        DocumentFormat::Pdf => pdf::extract(data)?,
        DocumentFormat::Docx => word::extract_docx(data)?,
        DocumentFormat::Doc => word::extract_doc(data)?,
        DocumentFormat::Txt | DocumentFormat::Markdown => text::extract(data),
    };

    let cleaned = cleanup_text(&raw);
    if cleaned.is_empty() {
        return Err(AppError::UnsupportedFormat(format!(
            "no text content could be extracted from {}",
            file_name
        )));
    }

    Ok(ExtractedContext::new(cleaned))
}

/// Strip NULs, trim every line, and drop empty lines.
fn cleanup_text(raw: &str) -> String {
    raw.replace('\0', "")
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
