//! PDF text extraction.
//!
//! `pdf-extract` does the text pull from the in-memory bytes; `lopdf` is
//! only consulted for the page count. Encrypted and image-only PDFs come
//! out empty or as parse errors and are reported as unsupported.

use crate::types::{AppError, AppResult};

pub fn extract(data: &[u8]) -> AppResult<String> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::UnsupportedFormat(format!("failed to read PDF: {}", e)))?;

    match lopdf::Document::load_mem(data) {
        Ok(doc) => tracing::debug!(pages = doc.get_pages().len(), "parsed PDF"),
        Err(e) => tracing::debug!(error = %e, "could not load PDF for page count"),
    }

    if text.trim().is_empty() {
        return Err(AppError::UnsupportedFormat(
            "PDF has no extractable text (image-based or encrypted)".to_string(),
        ));
    }

    Ok(text)
}
