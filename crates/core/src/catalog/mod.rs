//! Illustrative figures shown on the dashboard screens. Nothing here is
//! computed from real accounts.

mod data;

use crate::domain::advice::RiskTolerance;
use chrono::NaiveDate;
use serde::Serialize;

pub use data::{
    dashboard, investment_opportunities, learning_module, learning_modules, pricing_plans, track,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsJar {
    pub id: &'static str,
    pub name: &'static str,
    pub current_amount: f64,
    pub goal_amount: f64,
    pub emoji: &'static str,
}

impl SavingsJar {
    pub fn progress_percent(&self) -> f64 {
        if self.goal_amount <= 0.0 {
            return 0.0;
        }
        self.current_amount / self.goal_amount * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsJarView {
    #[serde(flatten)]
    pub jar: SavingsJar,
    pub progress_percent: f64,
}

impl From<SavingsJar> for SavingsJarView {
    fn from(jar: SavingsJar) -> Self {
        let progress_percent = jar.progress_percent();
        Self { jar, progress_percent }
    }
}

/// A named value in a chart series (line or pie).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub name: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub total_balance: f64,
    pub change_from_last_month_percent: f64,
    pub monthly_spending: f64,
    pub monthly_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub greeting: &'static str,
    pub summary: BalanceSummary,
    pub portfolio_growth: Vec<SeriesPoint>,
    pub spending_breakdown: Vec<SeriesPoint>,
    pub quick_actions: Vec<&'static str>,
    pub recent_transactions: Vec<Transaction>,
    pub savings_jars: Vec<SavingsJarView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackView {
    pub spending_breakdown: Vec<SeriesPoint>,
    pub savings_jars: Vec<SavingsJarView>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningModule {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssetType {
    Stocks,
    #[serde(rename = "Real Estate")]
    RealEstate,
    AgriTech,
    Bonds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentOpportunity {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub expected_return: &'static str,
    pub risk_level: RiskTolerance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub name: &'static str,
    pub price: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_period: Option<&'static str>,
    pub description: &'static str,
    pub features: Vec<&'static str>,
    pub button_text: &'static str,
    pub highlighted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn jar_progress_is_share_of_goal() {
        let laptop = &track().savings_jars[0];
        assert_eq!(laptop.jar.name, "New Laptop");
        assert!((laptop.progress_percent - 41.666_666).abs() < 1e-3);
    }

    #[test]
    fn jar_with_zero_goal_has_no_progress() {
        let jar = SavingsJar {
            id: "x",
            name: "x",
            current_amount: 10.0,
            goal_amount: 0.0,
            emoji: "",
        };
        assert_eq!(jar.progress_percent(), 0.0);
    }

    #[test]
    fn transaction_serializes_like_the_ledger() {
        let tx = dashboard().recent_transactions[1].clone();
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["date"], "2024-07-27");
        assert_eq!(value["amount"], json!(150000.0));
    }

    #[test]
    fn jar_view_flattens_jar_fields() {
        let value = serde_json::to_value(&dashboard().savings_jars[1]).unwrap();
        assert_eq!(value["name"], "December Detty");
        assert_eq!(value["goalAmount"], json!(200000.0));
        assert_eq!(value["progressPercent"], json!(37.5));
    }

    #[test]
    fn dashboard_and_tracker_use_their_own_datasets() {
        assert_eq!(dashboard().recent_transactions.len(), 3);
        assert_eq!(dashboard().savings_jars.len(), 2);
        assert_eq!(track().transactions.len(), 5);
        assert_eq!(track().savings_jars.len(), 3);
        assert_eq!(track().spending_breakdown.len(), 6);
    }

    #[test]
    fn learning_module_lookup() {
        assert_eq!(learning_modules().len(), 5);
        assert_eq!(learning_module("3").unwrap().category, "Investing");
        assert!(learning_module("99").is_none());
    }

    #[test]
    fn opportunity_types_serialize_with_display_names() {
        let value = serde_json::to_value(investment_opportunities()).unwrap();
        assert_eq!(value[1]["type"], "Real Estate");
        assert_eq!(value[2]["riskLevel"], "Low");
    }

    #[test]
    fn only_plus_plan_is_highlighted() {
        let highlighted: Vec<_> = pricing_plans()
            .into_iter()
            .filter(|p| p.highlighted)
            .map(|p| p.name)
            .collect();
        assert_eq!(highlighted, vec!["NairaPlus"]);
        assert_eq!(pricing_plans()[0].price_period, None);
    }
}
