//! Per-form request lifecycle: `Idle → Requesting → Succeeded | Failed`.
//!
//! Each form owns a single result slot. Starting a request clears whatever the
//! slot held, a second start while one is in flight is refused, and a
//! completion carrying an outdated ticket is dropped.

use crate::advisor::AdvisoryClient;
use crate::domain::advice::{AdvisoryRequest, InvestmentAdvice};
use crate::domain::forecast::{CashflowForecast, ForecastRequest, INVALID_HISTORICAL_DATA_MESSAGE};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

pub const ADVICE_UNAVAILABLE_MESSAGE: &str = "Could not fetch investment advice. Please try again.";
pub const FORECAST_UNAVAILABLE_MESSAGE: &str =
    "Could not generate cashflow forecast. Please try again.";
pub const BUSY_MESSAGE: &str = "A request for this form is already in progress.";

pub type Ticket = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequestState<T> {
    Idle,
    Requesting { ticket: Ticket },
    Succeeded { result: T },
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// The form already has a request in flight.
    Busy,
    /// Forecast input is not syntactically valid JSON. No call was made.
    InvalidFormat,
    /// The external call failed for any reason.
    Unavailable(&'static str),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str(BUSY_MESSAGE),
            Self::InvalidFormat => f.write_str(INVALID_HISTORICAL_DATA_MESSAGE),
            Self::Unavailable(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for FormError {}

#[derive(Debug)]
pub struct RequestSlot<T> {
    state: RequestState<T>,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            state: RequestState::Idle,
        }
    }
}

impl<T> RequestSlot<T> {
    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, RequestState::Requesting { .. })
    }

    /// Moves to `Requesting`, discarding any previous result or error.
    pub fn begin(&mut self) -> Result<Ticket, FormError> {
        if self.is_busy() {
            return Err(FormError::Busy);
        }
        let ticket = Uuid::new_v4();
        self.state = RequestState::Requesting { ticket };
        Ok(ticket)
    }

    /// Returns false when `ticket` is not the request currently in flight.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<T, FormError>) -> bool {
        if !self.holds(ticket) {
            tracing::debug!(%ticket, "discarding stale completion");
            return false;
        }
        self.state = match outcome {
            Ok(result) => RequestState::Succeeded { result },
            Err(err) => RequestState::Failed {
                message: err.to_string(),
            },
        };
        true
    }

    /// Drops an in-flight request that will never complete.
    pub fn abandon(&mut self, ticket: Ticket) {
        if self.holds(ticket) {
            self.state = RequestState::Idle;
        }
    }

    fn holds(&self, ticket: Ticket) -> bool {
        matches!(&self.state, RequestState::Requesting { ticket: current } if *current == ticket)
    }
}

#[derive(Debug)]
pub struct FormSession<T> {
    slot: Mutex<RequestSlot<T>>,
}

impl<T> Default for FormSession<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(RequestSlot::default()),
        }
    }
}

impl<T: Clone> FormSession<T> {
    pub fn snapshot(&self) -> RequestState<T> {
        self.lock().state().clone()
    }

    pub async fn run<F, Fut>(&self, op: F) -> Result<T, FormError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FormError>>,
    {
        let ticket = self.lock().begin()?;
        let mut in_flight = InFlight {
            session: self,
            ticket: Some(ticket),
        };

        let outcome = op().await;

        in_flight.ticket = None;
        self.lock().finish(ticket, outcome.clone());
        outcome
    }

    fn lock(&self) -> MutexGuard<'_, RequestSlot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the slot to `Idle` if the running future is dropped before it
/// completes, so the form does not stay busy forever.
struct InFlight<'a, T: Clone> {
    session: &'a FormSession<T>,
    ticket: Option<Ticket>,
}

impl<T: Clone> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.session.lock().abandon(ticket);
        }
    }
}

/// The two advisory forms and the client they share.
pub struct AdvisorySession {
    advisor: AdvisoryClient,
    advice: FormSession<InvestmentAdvice>,
    forecast: FormSession<CashflowForecast>,
}

impl AdvisorySession {
    pub fn new(advisor: AdvisoryClient) -> Self {
        Self {
            advisor,
            advice: FormSession::default(),
            forecast: FormSession::default(),
        }
    }

    pub fn advice_state(&self) -> RequestState<InvestmentAdvice> {
        self.advice.snapshot()
    }

    pub fn forecast_state(&self) -> RequestState<CashflowForecast> {
        self.forecast.snapshot()
    }

    pub async fn request_advice(&self, req: &AdvisoryRequest) -> Result<InvestmentAdvice, FormError> {
        self.advice
            .run(move || async move {
                self.advisor
                    .investment_advice(req)
                    .await
                    .ok_or(FormError::Unavailable(ADVICE_UNAVAILABLE_MESSAGE))
            })
            .await
    }

    /// Runs the syntax gate first; input that fails it never reaches the client.
    pub async fn request_forecast(&self, historical_data: &str) -> Result<CashflowForecast, FormError> {
        self.forecast
            .run(move || async move {
                let req = ForecastRequest::parse(historical_data).map_err(|e| {
                    tracing::info!(detail = %e.detail, "rejected historical data");
                    FormError::InvalidFormat
                })?;
                self.advisor
                    .cashflow_forecast(&req)
                    .await
                    .ok_or(FormError::Unavailable(FORECAST_UNAVAILABLE_MESSAGE))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::tests::{advisor, StubLlm};
    use crate::llm::error::FailureStage;
    use std::sync::Arc;

    #[test]
    fn begin_clears_previous_result() {
        let mut slot = RequestSlot::<u32>::default();
        let first = slot.begin().unwrap();
        assert!(slot.finish(first, Ok(7)));
        assert_eq!(slot.state(), &RequestState::Succeeded { result: 7 });

        let second = slot.begin().unwrap();
        assert_eq!(slot.state(), &RequestState::Requesting { ticket: second });
    }

    #[test]
    fn begin_clears_previous_error() {
        let mut slot = RequestSlot::<u32>::default();
        let t = slot.begin().unwrap();
        slot.finish(t, Err(FormError::InvalidFormat));
        assert_eq!(
            slot.state(),
            &RequestState::Failed {
                message: "Invalid JSON format in historical data.".to_string()
            }
        );

        slot.begin().unwrap();
        assert!(slot.is_busy());
    }

    #[test]
    fn second_begin_while_requesting_is_refused() {
        let mut slot = RequestSlot::<u32>::default();
        let ticket = slot.begin().unwrap();
        assert_eq!(slot.begin(), Err(FormError::Busy));
        assert_eq!(slot.state(), &RequestState::Requesting { ticket });
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut slot = RequestSlot::<u32>::default();
        let old = slot.begin().unwrap();
        slot.abandon(old);
        let current = slot.begin().unwrap();

        assert!(!slot.finish(old, Ok(1)));
        assert_eq!(slot.state(), &RequestState::Requesting { ticket: current });
        assert!(slot.finish(current, Ok(2)));
        assert_eq!(slot.state(), &RequestState::Succeeded { result: 2 });
    }

    #[test]
    fn state_serializes_with_status_tag() {
        let value = serde_json::to_value(RequestState::Succeeded { result: 3 }).unwrap();
        assert_eq!(value, serde_json::json!({"status": "succeeded", "result": 3}));
        let idle = serde_json::to_value(RequestState::<u32>::Idle).unwrap();
        assert_eq!(idle, serde_json::json!({"status": "idle"}));
    }

    #[tokio::test]
    async fn dropped_request_frees_the_form() {
        let session = FormSession::<u32>::default();
        {
            let fut = session.run(|| std::future::pending::<Result<u32, FormError>>());
            tokio::pin!(fut);
            let polled = tokio::time::timeout(std::time::Duration::from_millis(10), &mut fut).await;
            assert!(polled.is_err());
            assert!(matches!(session.snapshot(), RequestState::Requesting { .. }));
        }
        assert_eq!(session.snapshot(), RequestState::Idle);
    }

    #[tokio::test]
    async fn invalid_forecast_input_never_calls_the_service() {
        let stub = StubLlm::replying(r#"{"forecast":[],"analysis":"x"}"#);
        let session = AdvisorySession::new(advisor(stub.clone()));

        for bad in ["not-json", "", "{not json"] {
            let err = session.request_forecast(bad).await.unwrap_err();
            assert_eq!(err, FormError::InvalidFormat);
            assert_eq!(err.to_string(), "Invalid JSON format in historical data.");
        }

        assert_eq!(stub.call_count(), 0);
        assert_eq!(
            session.forecast_state(),
            RequestState::Failed {
                message: "Invalid JSON format in historical data.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn empty_array_is_forwarded() {
        let stub = StubLlm::replying(r#"{"forecast":[],"analysis":"no data"}"#);
        let session = AdvisorySession::new(advisor(stub.clone()));

        let forecast = session.request_forecast("[]").await.unwrap();

        assert!(forecast.forecast.is_empty());
        assert_eq!(stub.call_count(), 1);
        assert!(stub.prompts.lock().unwrap()[0].prompt.ends_with("Data: []"));
        assert!(matches!(session.forecast_state(), RequestState::Succeeded { .. }));
    }

    #[tokio::test]
    async fn external_failure_is_reported_generically() {
        let session = AdvisorySession::new(advisor(StubLlm::failing(FailureStage::Timeout)));

        let err = session.request_advice(&AdvisoryRequest::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Could not fetch investment advice. Please try again.");

        let err = session.request_forecast("[]").await.unwrap_err();
        assert_eq!(err.to_string(), "Could not generate cashflow forecast. Please try again.");
    }

    #[tokio::test]
    async fn forms_are_independent() {
        let stub: Arc<StubLlm> = StubLlm::replying(
            r#"{"strategySummary":"s","assetAllocation":{},"recommendations":[]}"#,
        );
        let session = AdvisorySession::new(advisor(stub));

        session.request_advice(&AdvisoryRequest::default()).await.unwrap();
        assert!(matches!(session.advice_state(), RequestState::Succeeded { .. }));
        assert_eq!(session.forecast_state(), RequestState::Idle);
    }
}
