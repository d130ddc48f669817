use crate::llm::Provider;
use serde_json::Value;
use std::fmt;

/// Where an advisory call failed. Only used for logs; callers see a bare absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Credentials,
    Transport,
    Timeout,
    Http,
    Empty,
    Parse,
}

impl FailureStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credentials => "credentials",
            Self::Transport => "transport",
            Self::Timeout => "timeout",
            Self::Http => "http",
            Self::Empty => "empty",
            Self::Parse => "parse",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmDiagnosticsError {
    pub provider: Provider,
    pub stage: FailureStage,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}

impl LlmDiagnosticsError {
    pub fn new(provider: Provider, stage: FailureStage, detail: impl Into<String>) -> Self {
        Self {
            provider,
            stage,
            detail: detail.into(),
            raw_output: None,
            raw_response_json: None,
        }
    }
}

impl fmt::Display for LlmDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LLM error (provider={:?}, stage={}): {}",
            self.provider,
            self.stage.as_str(),
            self.detail
        )
    }
}

impl std::error::Error for LlmDiagnosticsError {}

/// Stage tag for any error an advisory call produced. Errors that carry no
/// diagnostics are treated as transport failures.
pub fn failure_stage(err: &anyhow::Error) -> FailureStage {
    err.downcast_ref::<LlmDiagnosticsError>()
        .map(|diag| diag.stage)
        .unwrap_or(FailureStage::Transport)
}

/// What the service actually sent back, when the error kept it: the reply text
/// if there was one, otherwise the raw response body.
pub fn raw_reply(err: &anyhow::Error) -> Option<String> {
    let diag = err.downcast_ref::<LlmDiagnosticsError>()?;
    diag.raw_output
        .clone()
        .or_else(|| diag.raw_response_json.as_ref().map(Value::to_string))
}
