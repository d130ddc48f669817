use crate::domain::advice::InvestmentAdvice;
use crate::domain::forecast::CashflowForecast;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// A typed reply the model is asked to produce, together with the schema
/// declared to the service for it.
pub trait ResponseContract: DeserializeOwned + Send {
    const NAME: &'static str;

    fn response_schema() -> Value;
}

impl ResponseContract for InvestmentAdvice {
    const NAME: &'static str = "investment_advice";

    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "required": ["strategySummary", "assetAllocation", "recommendations"],
            "properties": {
                "strategySummary": {"type": "STRING"},
                "assetAllocation": {
                    "type": "OBJECT",
                    "properties": {
                        "stocks": {"type": "NUMBER"},
                        "bonds": {"type": "NUMBER"},
                        "realEstate": {"type": "NUMBER"},
                        "agriTech": {"type": "NUMBER"},
                        "cash": {"type": "NUMBER"}
                    }
                },
                "recommendations": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "required": ["name", "description"],
                        "properties": {
                            "name": {"type": "STRING"},
                            "description": {"type": "STRING"}
                        }
                    }
                }
            }
        })
    }
}

impl ResponseContract for CashflowForecast {
    const NAME: &'static str = "cashflow_forecast";

    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "required": ["forecast", "analysis"],
            "properties": {
                "forecast": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "required": ["month", "predictedIncome", "predictedExpense"],
                        "properties": {
                            "month": {"type": "STRING"},
                            "predictedIncome": {"type": "NUMBER"},
                            "predictedExpense": {"type": "NUMBER"}
                        }
                    }
                },
                "analysis": {"type": "STRING"}
            }
        })
    }
}
