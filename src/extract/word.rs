//! Word document text extraction.
//!
//! `.docx` goes through `docx-rs`: walk the document body, collect the text
//! runs of every paragraph. Tables are skipped.
//!
//! Legacy `.doc` has no maintained pure-Rust parser; those files get a
//! best-effort lossy decode filtered down to printable runs.

use crate::types::{AppError, AppResult};

pub fn extract_docx(data: &[u8]) -> AppResult<String> {
    let doc = docx_rs::read_docx(data)
        .map_err(|e| AppError::UnsupportedFormat(format!("failed to read DOCX: {}", e)))?;

    let mut content = String::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            content.push_str(&t.text);
                        }
                    }
                }
            }
            content.push('\n');
        }
    }

    Ok(content)
}

/// Minimum length for a run of printable characters to count as text
/// rather than binary noise.
const MIN_RUN_LEN: usize = 4;

pub fn extract_doc(data: &[u8]) -> AppResult<String> {
    // Some files named .doc are actually OOXML; try the real parser first.
    if let Ok(content) = extract_docx(data) {
        if !content.trim().is_empty() {
            return Ok(content);
        }
    }

    let decoded = String::from_utf8_lossy(data);
    let content = printable_runs(&decoded);

    if content.trim().is_empty() {
        return Err(AppError::UnsupportedFormat(
            "no readable text found in legacy .doc file".to_string(),
        ));
    }

    Ok(content)
}

/// Collect runs of printable characters, dropping anything shorter than
/// `MIN_RUN_LEN`.
fn printable_runs(decoded: &str) -> String {
    let mut runs = Vec::new();
    let mut current = String::new();

    for ch in decoded.chars() {
        if ch == '\u{FFFD}' || (ch.is_control() && ch != '\n' && ch != '\t') {
            if current.trim().chars().count() >= MIN_RUN_LEN {
                runs.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push(ch);
        }
    }
    if current.trim().chars().count() >= MIN_RUN_LEN {
        runs.push(current.trim().to_string());
    }

    runs.join("\n")
}
