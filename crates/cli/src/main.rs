use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nairawise_core::advisor::AdvisoryClient;
use nairawise_core::domain::advice::{AdvisoryRequest, RiskTolerance};
use nairawise_core::domain::forecast::{ForecastRequest, SAMPLE_HISTORICAL_DATA};
use nairawise_core::llm::gemini::GeminiClient;
use nairawise_core::prompt;
use nairawise_core::session::AdvisorySession;

#[derive(Debug, Parser)]
#[command(name = "nairawise_cli")]
struct Args {
    /// Print the prompt that would be sent and exit without calling the model.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a personalized investment roadmap.
    Advice {
        /// Low, Medium or High.
        #[arg(long)]
        risk: Option<RiskTolerance>,

        #[arg(long)]
        goals: Option<String>,

        #[arg(long)]
        age: Option<u32>,
    },

    /// Forecast the next three months of cashflow from historical JSON.
    Forecast {
        /// Historical data as JSON text. Defaults to the sample payload.
        #[arg(long, conflicts_with = "data_file")]
        data: Option<String>,

        /// Read the historical data from a file.
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = nairawise_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let result = run(args, &settings).await;
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
    }
    result
}

async fn run(args: Args, settings: &nairawise_core::config::Settings) -> anyhow::Result<()> {
    match args.command {
        Command::Advice { risk, goals, age } => {
            let defaults = AdvisoryRequest::default();
            let req = AdvisoryRequest {
                risk_tolerance: risk.unwrap_or(defaults.risk_tolerance),
                goals: goals.unwrap_or(defaults.goals),
                age: age.unwrap_or(defaults.age),
            };

            if args.dry_run {
                println!("{}", prompt::advice_prompt(&req));
                return Ok(());
            }

            let session = session_from_settings(settings)?;
            let advice = session.request_advice(&req).await?;
            println!("{}", serde_json::to_string_pretty(&advice)?);
            tracing::info!(
                risk = %req.risk_tolerance,
                age = req.age,
                recommendations = advice.recommendations.len(),
                "investment advice generated"
            );
        }
        Command::Forecast { data, data_file } => {
            let historical_data = match (data, data_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => SAMPLE_HISTORICAL_DATA.to_string(),
            };

            if args.dry_run {
                let req = ForecastRequest::parse(&historical_data)?;
                println!("{}", prompt::forecast_prompt(&req));
                return Ok(());
            }

            let session = session_from_settings(settings)?;
            let forecast = session.request_forecast(&historical_data).await?;
            println!("{}", serde_json::to_string_pretty(&forecast)?);
            tracing::info!(months = forecast.forecast.len(), "cashflow forecast generated");
        }
    }

    Ok(())
}

fn session_from_settings(settings: &nairawise_core::config::Settings) -> anyhow::Result<AdvisorySession> {
    let llm = GeminiClient::from_settings(settings)?;
    let advisor = AdvisoryClient::new(Arc::new(llm), settings.gemini_timeout());
    Ok(AdvisorySession::new(advisor))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_advice_flags() {
        let args = Args::parse_from(["nairawise_cli", "advice", "--risk", "low", "--age", "45"]);
        match args.command {
            Command::Advice { risk, goals, age } => {
                assert_eq!(risk, Some(RiskTolerance::Low));
                assert_eq!(goals, None);
                assert_eq!(age, Some(45));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_risk_level() {
        assert!(Args::try_parse_from(["nairawise_cli", "advice", "--risk", "yolo"]).is_err());
    }

    #[test]
    fn data_and_data_file_conflict() {
        let res = Args::try_parse_from([
            "nairawise_cli",
            "forecast",
            "--data",
            "[]",
            "--data-file",
            "history.json",
        ]);
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn dry_run_rejects_invalid_history_without_a_client() {
        let args = Args::parse_from(["nairawise_cli", "--dry-run", "forecast", "--data", "not-json"]);
        let err = run(args, &nairawise_core::config::Settings::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON format in historical data.");
    }

    #[tokio::test]
    async fn missing_credential_surfaces_generic_failure() {
        let args = Args::parse_from(["nairawise_cli", "forecast", "--data", "[]"]);
        let err = run(args, &nairawise_core::config::Settings::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not generate cashflow forecast. Please try again."
        );
    }
}
