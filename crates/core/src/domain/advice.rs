use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    pub const ALL: [RiskTolerance; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown risk tolerance: {s} (expected Low, Medium or High)"))
    }
}

/// Profile submitted to the investment-roadmap generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRequest {
    pub risk_tolerance: RiskTolerance,
    pub goals: String,
    pub age: u32,
}

impl Default for AdvisoryRequest {
    fn default() -> Self {
        Self {
            risk_tolerance: RiskTolerance::Medium,
            goals: "Save for a Masters Degree in 5 years.".to_string(),
            age: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAdvice {
    pub strategy_summary: String,
    /// Free-form asset-class labels. Weights are taken as returned; nothing
    /// forces them to add up to 100.
    pub asset_allocation: BTreeMap<String, f64>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub description: String,
}

/// One pie-chart slice of an allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub name: String,
    pub value: f64,
    /// Share of the sum of all weights, in percent.
    pub percent: f64,
}

impl InvestmentAdvice {
    pub fn allocation_chart(&self) -> Vec<AllocationSlice> {
        let total: f64 = self.asset_allocation.values().sum();
        self.asset_allocation
            .iter()
            .map(|(name, &value)| AllocationSlice {
                name: name.clone(),
                value,
                percent: if total == 0.0 { 0.0 } else { value * 100.0 / total },
            })
            .collect()
    }
}
