//! Document Agent
//!
//! The ingestion pipeline for a single uploaded document: extract plain
//! text, record the upload, build the context string, forward it to the
//! generation endpoint. The endpoint only ever receives text.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::config::{AdapterConfig, Config, LLMConfig};
use crate::extract;
use crate::llm::{GoogleAdapter, TextGenerator};
use crate::memory::{MemoryStore, SessionMemory, StoredFile};
use crate::types::{
    AppError, AppResult, DocumentSubmission, FileKind, GenerationRequest, TokenUsage,
};

const CONTEXT_LABEL: &str = "Document content:";
const DESCRIPTION_CHARS: usize = 200;

/// User-facing messages, keyed off the failure classification below.
pub const MSG_UNSUPPORTED_FORMAT: &str =
    "This file format is not supported. Please try a different document.";
pub const MSG_RATE_LIMITED: &str =
    "The assistant is handling too many requests right now. Please try again in a few minutes.";
pub const MSG_FILE_TOO_LARGE: &str =
    "The file is too large. Please upload a smaller document.";
pub const MSG_GENERIC_FAILURE: &str =
    "Something went wrong while processing the document. Please try again later.";

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    pub file_name: String,
    pub reply: String,
    pub usage: TokenUsage,
}

pub struct DocumentAgent {
    generator: Arc<dyn TextGenerator>,
    memory: Arc<dyn MemoryStore>,
    llm: LLMConfig,
    limits: AdapterConfig,
}

impl DocumentAgent {
    pub fn from_config(config: &Config) -> Self {
        Self {
            generator: Arc::new(GoogleAdapter::new(&config.llm.google_api_key)),
            memory: Arc::new(SessionMemory::new(config.adapter.memory_capacity)),
            llm: config.llm.clone(),
            limits: config.adapter.clone(),
        }
    }

    /// Assemble an agent from explicit parts. Tests swap in a mock
    /// generator and an inspectable memory store here.
    pub fn with_parts(
        generator: Arc<dyn TextGenerator>,
        memory: Arc<dyn MemoryStore>,
        llm: LLMConfig,
        limits: AdapterConfig,
    ) -> Self {
        Self {
            generator,
            memory,
            llm,
            limits,
        }
    }

    /// Run one submission through the pipeline.
    ///
    /// The failure is scoped to this submission; callers map errors to a
    /// user-facing message with [`user_message`].
    pub async fn handle_submission(
        &self,
        user_id: i64,
        submission: DocumentSubmission,
    ) -> AppResult<DocumentAnalysis> {
        info!(
            file_name = %submission.file_name,
            mime_hint = %submission.mime_hint,
            size = submission.size(),
            "Handling document submission"
        );

        if submission.size() > self.limits.max_file_size_bytes {
            return Err(AppError::InvalidSubmission(format!(
                "file is {} bytes, limit is {}",
                submission.size(),
                self.limits.max_file_size_bytes
            )));
        }

        let context = extract::extract_text(&submission.file_bytes, &submission.file_name)?;

        self.memory
            .save(
                user_id,
                StoredFile {
                    id: uuid::Uuid::new_v4(),
                    name: submission.file_name.clone(),
                    kind: FileKind::Document,
                    description: describe(&context.text),
                    text: Some(context.text.clone()),
                    bytes: submission.file_bytes.clone(),
                    uploaded_at: Utc::now(),
                },
            )
            .await;

        let prompt = build_context(
            &submission.file_name,
            &context.text,
            self.limits.max_context_chars,
        );

        let request = GenerationRequest {
            model: self.llm.model.clone(),
            prompt,
            system_instruction: Some(self.llm.system_prompt.clone()),
            max_output_tokens: Some(self.llm.max_output_tokens),
            temperature: Some(self.llm.temperature),
        };

        match self.generator.generate(&request).await {
            Ok(response) => {
                info!(
                    file_name = %submission.file_name,
                    response_len = response.content.len(),
                    "Document analysis complete"
                );
                Ok(DocumentAnalysis {
                    file_name: submission.file_name,
                    reply: response.content,
                    usage: response.usage,
                })
            }
            Err(e) => {
                error!(file_name = %submission.file_name, error = %e, "Generation call failed");
                Err(e)
            }
        }
    }
}

/// Wrap extracted text with the fixed context label. String concatenation
/// only; the text is truncated to the configured character limit first.
pub fn build_context(file_name: &str, text: &str, max_chars: usize) -> String {
    let body = truncate_chars(text, max_chars);
    format!(
        "The user uploaded the document '{file_name}' for analysis.\n\n\
         {CONTEXT_LABEL}\n{body}\n\n\
         Analyze this document and give a brief answer with recommendations."
    )
}

/// Map a pipeline failure to the message shown to the user.
///
/// Endpoint failures are classified by substring match on the error text:
/// quota markers first, then format/type markers (both case-insensitive).
/// Everything else gets the generic message.
pub fn user_message(error: &AppError) -> &'static str {
    match error {
        AppError::UnsupportedFormat(_) => MSG_UNSUPPORTED_FORMAT,
        AppError::InvalidSubmission(_) => MSG_FILE_TOO_LARGE,
        AppError::Generation(detail) => {
            let lower = detail.to_lowercase();
            if lower.contains("429") || lower.contains("quota") {
                MSG_RATE_LIMITED
            } else if lower.contains("format") || lower.contains("type") {
                MSG_UNSUPPORTED_FORMAT
            } else {
                MSG_GENERIC_FAILURE
            }
        }
        AppError::Internal(_) => MSG_GENERIC_FAILURE,
    }
}

fn describe(text: &str) -> String {
    format!("Document contains: {}", truncate_chars(text, DESCRIPTION_CHARS))
}

/// Truncate to `max_chars` characters on a char boundary, marking the cut.
fn truncate_chars(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => Cow::Owned(format!("{}...", &text[..idx])),
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerationResponse;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    struct MockGenerator {
        fail_with: Option<String>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl MockGenerator {
        fn replying() -> Self {
            Self {
                fail_with: None,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
            self.seen.lock().await.push(request.clone());
            match &self.fail_with {
                Some(message) => Err(AppError::Generation(message.clone())),
                None => Ok(GenerationResponse {
                    content: "The document looks fine.".to_string(),
                    finish_reason: "STOP".to_string(),
                    usage: TokenUsage::default(),
                }),
            }
        }
    }

    fn llm_config() -> LLMConfig {
        LLMConfig {
            google_api_key: "test-key".to_string(),
            model: "gemini-2.5-pro".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            max_output_tokens: 512,
            temperature: 0.7,
        }
    }

    fn agent_with(
        generator: Arc<MockGenerator>,
        memory: Arc<SessionMemory>,
        limits: AdapterConfig,
    ) -> DocumentAgent {
        DocumentAgent::with_parts(generator, memory, llm_config(), limits)
    }

    #[tokio::test]
    async fn test_text_submission_reaches_generator_and_memory() {
        let generator = Arc::new(MockGenerator::replying());
        let memory = Arc::new(SessionMemory::default());
        let agent = agent_with(generator.clone(), memory.clone(), AdapterConfig::default());

        let submission = DocumentSubmission::new(&b"meeting notes: ship on friday"[..], "notes.txt");
        let analysis = agent.handle_submission(42, submission).await.unwrap();

        assert_eq!(analysis.file_name, "notes.txt");
        assert_eq!(analysis.reply, "The document looks fine.");

        let seen = generator.seen.lock().await;
        assert_eq!(seen.len(), 1);
        assert!(seen[0].prompt.contains("meeting notes: ship on friday"));
        assert!(seen[0].prompt.contains(CONTEXT_LABEL));
        assert!(seen[0].prompt.contains("notes.txt"));
        assert_eq!(seen[0].model, "gemini-2.5-pro");

        let remembered = memory.recall(42).await;
        assert_eq!(remembered.len(), 1);
        assert_eq!(remembered[0].name, "notes.txt");
        assert_eq!(remembered[0].kind, FileKind::Document);
        assert_eq!(
            remembered[0].text.as_deref(),
            Some("meeting notes: ship on friday")
        );
    }

    #[tokio::test]
    async fn test_oversized_submission_is_rejected_before_extraction() {
        let generator = Arc::new(MockGenerator::replying());
        let memory = Arc::new(SessionMemory::default());
        let limits = AdapterConfig {
            max_file_size_bytes: 8,
            ..AdapterConfig::default()
        };
        let agent = agent_with(generator.clone(), memory.clone(), limits);

        let submission = DocumentSubmission::new(&b"way past the size limit"[..], "big.txt");
        let err = agent.handle_submission(1, submission).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidSubmission(_)));
        assert!(generator.seen.lock().await.is_empty());
        assert!(memory.recall(1).await.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_extension_never_reaches_generator() {
        let generator = Arc::new(MockGenerator::replying());
        let memory = Arc::new(SessionMemory::default());
        let agent = agent_with(generator.clone(), memory.clone(), AdapterConfig::default());

        let submission = DocumentSubmission::new(&b"GIF89a"[..], "animation.gif");
        let err = agent.handle_submission(1, submission).await.unwrap_err();

        assert!(matches!(err, AppError::UnsupportedFormat(_)));
        assert!(generator.seen.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let generator = Arc::new(MockGenerator::failing("network timeout"));
        let memory = Arc::new(SessionMemory::default());
        let agent = agent_with(generator, memory, AdapterConfig::default());

        let submission = DocumentSubmission::new(&b"some text"[..], "a.txt");
        let err = agent.handle_submission(1, submission).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[test]
    fn test_build_context_contains_extracted_text() {
        let context = build_context("a.txt", "the quick brown fox", 2000);
        assert!(context.contains("the quick brown fox"));
        assert!(context.contains(CONTEXT_LABEL));
        assert!(context.contains("a.txt"));
    }

    #[test]
    fn test_build_context_truncates_long_text() {
        let long = "x".repeat(5000);
        let context = build_context("a.txt", &long, 2000);
        assert!(context.contains(&format!("{}...", "x".repeat(2000))));
        assert!(!context.contains(&"x".repeat(2001)));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "日本語のテキスト";
        assert_eq!(truncate_chars(text, 3).as_ref(), "日本語...");
        assert_eq!(truncate_chars(text, 100).as_ref(), text);
    }

    #[test]
    fn test_user_message_format_and_type_patterns() {
        let err = AppError::Generation("Gemini API error (400): Unsupported Type in request payload".into());
        assert_eq!(user_message(&err), MSG_UNSUPPORTED_FORMAT);

        let err = AppError::Generation("bad file FORMAT".into());
        assert_eq!(user_message(&err), MSG_UNSUPPORTED_FORMAT);
    }

    #[test]
    fn test_user_message_generic_failure() {
        let err = AppError::Generation("network timeout".into());
        assert_eq!(user_message(&err), MSG_GENERIC_FAILURE);

        let err = AppError::Internal("broken pipe".into());
        assert_eq!(user_message(&err), MSG_GENERIC_FAILURE);
    }

    #[test]
    fn test_user_message_quota_patterns_win_over_type() {
        let err = AppError::Generation("429 RESOURCE_EXHAUSTED: quota exceeded for request type".into());
        assert_eq!(user_message(&err), MSG_RATE_LIMITED);

        let err = AppError::Generation("Quota exhausted".into());
        assert_eq!(user_message(&err), MSG_RATE_LIMITED);
    }

    #[test]
    fn test_user_message_unsupported_format() {
        let err = AppError::UnsupportedFormat("exe".into());
        assert_eq!(user_message(&err), MSG_UNSUPPORTED_FORMAT);
    }

    #[test]
    fn test_user_message_file_too_large() {
        let err = AppError::InvalidSubmission("file is 9 bytes, limit is 8".into());
        assert_eq!(user_message(&err), MSG_FILE_TOO_LARGE);
    }

    #[test]
    fn test_describe_is_bounded() {
        let description = describe(&"y".repeat(400));
        assert!(description.starts_with("Document contains: "));
        assert!(description.ends_with("..."));
        assert!(description.chars().count() < 230);
    }
}
