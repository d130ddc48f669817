pub mod error;
pub mod gemini;
pub mod json;

/// Prompt plus the response schema the service is told to follow.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub prompt: String,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> Provider;

    /// Issues one schema-constrained call and returns the raw reply text.
    async fn generate_structured(&self, request: StructuredRequest) -> anyhow::Result<String>;
}
