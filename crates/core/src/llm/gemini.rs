use crate::config::Settings;
use crate::llm::error::{FailureStage, LlmDiagnosticsError};
use crate::llm::{LlmClient, Provider, StructuredRequest};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const RESPONSE_MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// A missing credential is not fatal here: the client is still built and
    /// every call fails until a key is configured.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = match settings.require_gemini_api_key() {
            Ok(key) => Some(key.to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "Gemini API key not found; advisory requests will fail");
                None
            }
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.gemini_timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url: settings.gemini_base_url.clone(),
            model: settings.gemini_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn diagnostics(stage: FailureStage, detail: impl Into<String>) -> LlmDiagnosticsError {
        LlmDiagnosticsError::new(Provider::Gemini, stage, detail)
    }

    fn build_request(request: StructuredRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
                response_schema: request.response_schema,
            },
        }
    }

    async fn generate_content(
        &self,
        req: GenerateContentRequest,
    ) -> anyhow::Result<(serde_json::Value, GenerateContentResponse)> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(Self::diagnostics(FailureStage::Credentials, "GEMINI_API_KEY is not configured").into());
        };

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(api_key)?);

        let res = self
            .http
            .post(self.url())
            .headers(headers)
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                let stage = if e.is_timeout() {
                    FailureStage::Timeout
                } else {
                    FailureStage::Transport
                };
                Self::diagnostics(stage, format!("Gemini request failed: {e}"))
            })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| {
            Self::diagnostics(
                FailureStage::Transport,
                format!("failed to read Gemini response body: {e}"),
            )
        })?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            return Err(LlmDiagnosticsError {
                raw_output: Some(text),
                raw_response_json,
                ..Self::diagnostics(FailureStage::Http, format!("status={status}"))
            }
            .into());
        }

        let raw_json = serde_json::from_str::<serde_json::Value>(&text).map_err(|e| LlmDiagnosticsError {
            raw_output: Some(text.clone()),
            ..Self::diagnostics(FailureStage::Parse, format!("Gemini response is not JSON: {e}"))
        })?;
        let parsed = serde_json::from_value::<GenerateContentResponse>(raw_json.clone()).map_err(|e| {
            LlmDiagnosticsError {
                raw_response_json: Some(raw_json.clone()),
                ..Self::diagnostics(
                    FailureStage::Parse,
                    format!("failed to decode Gemini response into GenerateContentResponse: {e}"),
                )
            }
        })?;
        Ok((raw_json, parsed))
    }

    /// Concatenated text parts of the first candidate, as the SDK's `text` accessor does.
    fn response_text(res: &GenerateContentResponse) -> Option<String> {
        let candidate = res.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    fn empty_reply_detail(res: &GenerateContentResponse) -> String {
        let finish_reason = res
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .unwrap_or("none");
        let block_reason = res
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
            .unwrap_or("none");
        format!("no text in reply (finish_reason={finish_reason}, block_reason={block_reason})")
    }
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn generate_structured(&self, request: StructuredRequest) -> anyhow::Result<String> {
        let (raw_json, res) = self.generate_content(Self::build_request(request)).await?;
        match Self::response_text(&res) {
            Some(text) => Ok(text),
            None => Err(LlmDiagnosticsError {
                raw_response_json: Some(raw_json),
                ..Self::diagnostics(FailureStage::Empty, Self::empty_reply_detail(&res))
            }
            .into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,

    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,

    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
