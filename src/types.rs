// Type definitions and enums

use bytes::Bytes;

/// A document received from the upstream file-retrieval service.
///
/// Created on upload receipt and discarded once text extraction has run.
#[derive(Debug, Clone)]
pub struct DocumentSubmission {
    pub file_bytes: Bytes,
    pub file_name: String,
    /// MIME type guessed from the file extension.
    pub mime_hint: String,
}

impl DocumentSubmission {
    pub fn new(file_bytes: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let mime_hint = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_bytes: file_bytes.into(),
            file_name,
            mime_hint,
        }
    }

    pub fn size(&self) -> usize {
        self.file_bytes.len()
    }
}

/// Plain text derived from a submission. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContext {
    pub text: String,
}

impl ExtractedContext {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// What kind of upload a stored file was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FileKind {
    Document,
    Image,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Document => write!(f, "document"),
            FileKind::Image => write!(f, "image"),
        }
    }
}

/// Request for the text-generation endpoint.
///
/// The prompt is a single string. There is deliberately no field that can
/// carry bytes or file payloads; the endpoint only accepts text from this
/// adapter.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GenerationResponse {
    pub content: String,
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Extension outside the recognized set, or the matching reader could
    /// not get text out of the bytes.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The generation endpoint returned a failure.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_hint_from_extension() {
        let sub = DocumentSubmission::new(&b"hello"[..], "notes.pdf");
        assert_eq!(sub.mime_hint, "application/pdf");

        let sub = DocumentSubmission::new(&b"hello"[..], "notes.txt");
        assert_eq!(sub.mime_hint, "text/plain");

        let sub = DocumentSubmission::new(&b"hello"[..], "mystery.bin");
        assert_eq!(sub.mime_hint, "application/octet-stream");
    }

    #[test]
    fn test_submission_size() {
        let sub = DocumentSubmission::new(&b"12345"[..], "a.txt");
        assert_eq!(sub.size(), 5);
    }
}
