// Google Gemini adapter
// Endpoint: POST {base}/models/{model}:generateContent
// API Reference: https://ai.google.dev/api/generate-content
//
// IMPORTANT: this route takes text parts only. Binary payloads (the API's
// inline-data blob parts) are rejected here, so the request types below
// cannot represent them.

use crate::llm::provider::TextGenerator;
use crate::types::{AppError, AppResult, GenerationRequest, GenerationResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

// Request types for the Gemini API
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

/// The only content part this adapter can construct: plain text.
#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

// Response types for the Gemini API
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata", default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: u32,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
    #[serde(default)]
    code: Option<i32>,
    #[serde(default)]
    status: Option<String>,
}

impl GoogleAdapter {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Point the adapter at a different base URL. Tests use this to hit a
    /// local mock server.
    pub fn with_base_url(api_key: &str, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.into(),
        }
    }

    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system_instruction.as_ref().map(|s| Content {
                role: None,
                parts: vec![Part { text: s.clone() }],
            }),
            generation_config: Some(GenerationConfig {
                max_output_tokens: request.max_output_tokens,
                temperature: request.temperature,
            }),
        }
    }
}

#[async_trait]
impl TextGenerator for GoogleAdapter {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, request.model
        );

        let body = Self::build_request(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("Gemini request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as a structured Gemini error response
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                return Err(AppError::Generation(format!(
                    "Gemini API error ({}): {} (status: {:?}, code: {:?})",
                    status,
                    error_response.error.message,
                    error_response.error.status,
                    error_response.error.code
                )));
            }

            return Err(AppError::Generation(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let gemini_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("Failed to parse Gemini response: {}", e)))?;

        let candidate = gemini_response
            .candidates
            .first()
            .ok_or_else(|| AppError::Generation("Gemini returned no candidates".to_string()))?;

        let content = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        let usage = gemini_response
            .usage_metadata
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(GenerationResponse {
            content,
            finish_reason: candidate
                .finish_reason
                .clone()
                .unwrap_or_else(|| "STOP".to_string()),
            usage,
        })
    }
}

/// Gemini model names accepted by this adapter.
pub mod models {
    /// Default text model.
    pub const GEMINI_2_5_PRO: &str = "gemini-2.5-pro";
    pub const GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";

    pub const DEFAULT_TEXT: &str = GEMINI_2_5_PRO;
}
