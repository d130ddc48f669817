use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nairawise_core::advisor::AdvisoryClient;
use nairawise_core::catalog::{self, DashboardView, InvestmentOpportunity, LearningModule, PricingPlan, TrackView};
use nairawise_core::domain::advice::{AdvisoryRequest, AllocationSlice, InvestmentAdvice};
use nairawise_core::domain::forecast::{CashflowForecast, ForecastChartRow, SAMPLE_HISTORICAL_DATA};
use nairawise_core::llm::gemini::GeminiClient;
use nairawise_core::session::{AdvisorySession, FormError, RequestState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = nairawise_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let llm = GeminiClient::from_settings(&settings).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        e
    })?;
    tracing::info!(model = llm.model(), "gemini client ready");

    let advisor = AdvisoryClient::new(Arc::new(llm), settings.gemini_timeout());
    let state = AppState {
        session: Arc::new(AdvisorySession::new(advisor)),
    };

    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/dashboard", get(get_dashboard))
        .route("/track", get(get_track))
        .route("/learn/modules", get(list_learning_modules))
        .route("/learn/modules/:id", get(get_learning_module))
        .route("/invest/opportunities", get(list_opportunities))
        .route("/invest/advice", get(get_advice_state).post(post_advice))
        .route("/pro/forecast", get(get_forecast_state).post(post_forecast))
        .route("/pricing", get(list_pricing_plans))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    session: Arc<AdvisorySession>,
}

async fn get_dashboard() -> Json<DashboardView> {
    Json(catalog::dashboard())
}

async fn get_track() -> Json<TrackView> {
    Json(catalog::track())
}

async fn list_learning_modules() -> Json<Vec<LearningModule>> {
    Json(catalog::learning_modules())
}

async fn get_learning_module(Path(id): Path<String>) -> Result<Json<LearningModule>, StatusCode> {
    catalog::learning_module(&id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_opportunities() -> Json<Vec<InvestmentOpportunity>> {
    Json(catalog::investment_opportunities())
}

async fn list_pricing_plans() -> Json<Vec<PricingPlan>> {
    Json(catalog::pricing_plans())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiAdvice {
    advice: InvestmentAdvice,
    allocation_chart: Vec<AllocationSlice>,
}

impl From<InvestmentAdvice> for ApiAdvice {
    fn from(advice: InvestmentAdvice) -> Self {
        let allocation_chart = advice.allocation_chart();
        Self {
            advice,
            allocation_chart,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiForecast {
    forecast: CashflowForecast,
    chart: Vec<ForecastChartRow>,
}

impl From<CashflowForecast> for ApiForecast {
    fn from(forecast: CashflowForecast) -> Self {
        let chart = forecast.chart_rows();
        Self { forecast, chart }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastBody {
    historical_data: String,
}

struct ApiError(FormError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            FormError::Busy => StatusCode::CONFLICT,
            FormError::InvalidFormat => StatusCode::BAD_REQUEST,
            FormError::Unavailable(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn get_advice_state(State(state): State<AppState>) -> Json<RequestState<InvestmentAdvice>> {
    Json(state.session.advice_state())
}

async fn post_advice(
    State(state): State<AppState>,
    Json(req): Json<AdvisoryRequest>,
) -> Result<Json<ApiAdvice>, ApiError> {
    let advice = state.session.request_advice(&req).await.map_err(ApiError)?;
    Ok(Json(advice.into()))
}

async fn get_forecast_state(State(state): State<AppState>) -> Json<serde_json::Value> {
    let forecast_state = state.session.forecast_state();
    if matches!(forecast_state, RequestState::Idle) {
        return Json(json!({
            "status": "idle",
            "sampleHistoricalData": SAMPLE_HISTORICAL_DATA,
        }));
    }
    Json(serde_json::to_value(forecast_state).unwrap_or_else(|_| json!({ "status": "unknown" })))
}

async fn post_forecast(
    State(state): State<AppState>,
    Json(body): Json<ForecastBody>,
) -> Result<Json<ApiForecast>, ApiError> {
    let forecast = state
        .session
        .request_forecast(&body.historical_data)
        .await
        .map_err(ApiError)?;
    Ok(Json(forecast.into()))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &nairawise_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
