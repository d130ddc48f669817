//! Advisory client: prompt → schema-constrained call → typed reply.
//!
//! Every failure is logged with its stage and then collapsed to `None`; callers
//! only ever branch on presence.

use crate::domain::advice::{AdvisoryRequest, InvestmentAdvice};
use crate::domain::contract::ResponseContract;
use crate::domain::forecast::{CashflowForecast, ForecastRequest};
use crate::llm::error::{failure_stage, raw_reply, FailureStage, LlmDiagnosticsError};
use crate::llm::{json, LlmClient, StructuredRequest};
use crate::prompt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AdvisoryClient {
    llm: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl AdvisoryClient {
    pub fn new(llm: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    pub async fn investment_advice(&self, req: &AdvisoryRequest) -> Option<InvestmentAdvice> {
        self.request(prompt::advice_prompt(req)).await
    }

    /// `req` has already passed the syntax gate; this never re-validates it.
    pub async fn cashflow_forecast(&self, req: &ForecastRequest) -> Option<CashflowForecast> {
        self.request(prompt::forecast_prompt(req)).await
    }

    async fn request<T: ResponseContract>(&self, prompt: String) -> Option<T> {
        match self.try_request::<T>(prompt).await {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(
                    operation = T::NAME,
                    provider = ?self.llm.provider(),
                    stage = failure_stage(&err).as_str(),
                    error = %format!("{err:#}"),
                    "advisory request failed"
                );
                if let Some(raw) = raw_reply(&err) {
                    tracing::debug!(operation = T::NAME, raw = %raw, "raw advisory reply");
                }
                None
            }
        }
    }

    async fn try_request<T: ResponseContract>(&self, prompt: String) -> anyhow::Result<T> {
        let request = StructuredRequest {
            prompt,
            response_schema: T::response_schema(),
        };

        let text = tokio::time::timeout(self.timeout, self.llm.generate_structured(request))
            .await
            .map_err(|_| {
                LlmDiagnosticsError::new(
                    self.llm.provider(),
                    FailureStage::Timeout,
                    format!("no reply within {:?}", self.timeout),
                )
            })??;

        json::parse_reply::<T>(&text).map_err(|e| {
            LlmDiagnosticsError {
                raw_output: Some(text),
                ..LlmDiagnosticsError::new(self.llm.provider(), FailureStage::Parse, format!("{e:#}"))
            }
            .into()
        })
    }
}
