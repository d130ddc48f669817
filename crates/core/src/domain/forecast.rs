use serde::{Deserialize, Serialize};
use std::fmt;

pub const INVALID_HISTORICAL_DATA_MESSAGE: &str = "Invalid JSON format in historical data.";

/// Payload pre-filled in the cashflow predictor.
pub const SAMPLE_HISTORICAL_DATA: &str = r#"[
  {"month": "April", "income": 500000, "expense": 350000},
  {"month": "May", "income": 650000, "expense": 400000},
  {"month": "June", "income": 580000, "expense": 420000}
]"#;

/// Historical data that passed the syntax gate, kept as the caller typed it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    historical_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidHistoricalData {
    pub detail: String,
}

impl fmt::Display for InvalidHistoricalData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(INVALID_HISTORICAL_DATA_MESSAGE)
    }
}

impl std::error::Error for InvalidHistoricalData {}

impl ForecastRequest {
    /// Syntactic JSON check only. Field names, types and ranges are not inspected.
    pub fn parse(text: &str) -> Result<Self, InvalidHistoricalData> {
        serde_json::from_str::<serde_json::Value>(text).map_err(|e| InvalidHistoricalData {
            detail: e.to_string(),
        })?;
        Ok(Self {
            historical_data: text.to_string(),
        })
    }

    pub fn historical_data(&self) -> &str {
        &self.historical_data
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowForecast {
    pub forecast: Vec<MonthlyPrediction>,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPrediction {
    pub month: String,
    pub predicted_income: f64,
    pub predicted_expense: f64,
}

/// Bar-chart row for one forecast month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastChartRow {
    pub name: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

impl CashflowForecast {
    pub fn chart_rows(&self) -> Vec<ForecastChartRow> {
        self.forecast
            .iter()
            .map(|p| ForecastChartRow {
                name: p.month.clone(),
                income: p.predicted_income,
                expense: p.predicted_expense,
                net: p.predicted_income - p.predicted_expense,
            })
            .collect()
    }
}
