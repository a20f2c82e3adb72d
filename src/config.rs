use anyhow::Result;
use serde::Deserialize;
use std::env;

const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Analyze uploaded documents and give a \
     concise answer with recommendations.";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub llm: LLMConfig,
    pub adapter: AdapterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub google_api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdapterConfig {
    /// Submissions above this size are rejected before extraction.
    pub max_file_size_bytes: usize,
    /// Extracted text is truncated to this many characters before it enters
    /// the context string.
    pub max_context_chars: usize,
    /// Per-user cap on remembered uploads; oldest records are evicted.
    pub memory_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            llm: LLMConfig {
                google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-pro".to_string()),
                system_prompt: env::var("SYSTEM_PROMPT")
                    .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string()),
                max_output_tokens: env::var("MAX_OUTPUT_TOKENS")
                    .unwrap_or_else(|_| "2048".to_string())
                    .parse()?,
                temperature: env::var("LLM_TEMPERATURE")
                    .unwrap_or_else(|_| "0.7".to_string())
                    .parse()?,
            },
            adapter: AdapterConfig {
                max_file_size_bytes: env::var("MAX_FILE_SIZE_BYTES")
                    .unwrap_or_else(|_| (5 * 1024 * 1024).to_string())
                    .parse()?,
                max_context_chars: env::var("MAX_CONTEXT_CHARS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()?,
                memory_capacity: env::var("MEMORY_CAPACITY")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
        })
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 5 * 1024 * 1024,
            max_context_chars: 2000,
            memory_capacity: 10,
        }
    }
}
