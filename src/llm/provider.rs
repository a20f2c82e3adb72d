use crate::types::{AppResult, GenerationRequest, GenerationResponse};
use async_trait::async_trait;

/// Seam between the document adapter and the generation endpoint.
///
/// Implementations take the request's prompt string and nothing else; the
/// request type cannot represent file payloads.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResponse>;
}
