use super::{
    AssetType, BalanceSummary, DashboardView, InvestmentOpportunity, LearningModule, PricingPlan,
    SavingsJar, SeriesPoint, TrackView, Transaction, TransactionKind,
};
use crate::domain::advice::RiskTolerance;
use chrono::NaiveDate;

const PLACEHOLDER_CONTENT: &str = "Full content here...";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn point(name: &'static str, value: f64) -> SeriesPoint {
    SeriesPoint { name, value }
}

fn tx(
    id: &'static str,
    name: &'static str,
    category: &'static str,
    amount: f64,
    on: NaiveDate,
    kind: TransactionKind,
) -> Transaction {
    Transaction {
        id,
        name,
        category,
        amount,
        date: on,
        kind,
    }
}

fn jar(id: &'static str, name: &'static str, current: f64, goal: f64, emoji: &'static str) -> SavingsJar {
    SavingsJar {
        id,
        name,
        current_amount: current,
        goal_amount: goal,
        emoji,
    }
}

pub fn dashboard() -> DashboardView {
    use TransactionKind::{Expense, Income};

    DashboardView {
        greeting: "Welcome Back, Tunde!",
        summary: BalanceSummary {
            total_balance: 1_250_345.50,
            change_from_last_month_percent: 5.2,
            monthly_spending: 89_500.00,
            monthly_income: 350_000.00,
        },
        portfolio_growth: vec![
            point("Jan", 500_000.0),
            point("Feb", 520_000.0),
            point("Mar", 510_000.0),
            point("Apr", 550_000.0),
            point("May", 580_000.0),
            point("Jun", 620_000.0),
        ],
        spending_breakdown: vec![
            point("Food", 45_000.0),
            point("Transport", 25_000.0),
            point("Airtime", 10_000.0),
            point("Utilities", 30_000.0),
            point("Entertainment", 20_000.0),
        ],
        quick_actions: vec!["Add Expense", "Add Income", "Find an Investment", "Pay a Bill"],
        recent_transactions: vec![
            tx("1", "DSTV Subscription", "Utilities", 12_500.0, date(2024, 7, 28), Expense),
            tx("2", "Freelance Payment", "Income", 150_000.0, date(2024, 7, 27), Income),
            tx("3", "Chicken Republic", "Food", 4_500.0, date(2024, 7, 26), Expense),
        ],
        savings_jars: vec![
            jar("1", "New Laptop", 250_000.0, 600_000.0, "💻").into(),
            jar("2", "December Detty", 75_000.0, 200_000.0, "🎉").into(),
        ],
    }
}

pub fn track() -> TrackView {
    use TransactionKind::{Expense, Income};

    TrackView {
        spending_breakdown: vec![
            point("Food & Groceries", 45_000.0),
            point("Transport", 25_000.0),
            point("Airtime & Data", 15_000.0),
            point("Utilities & Bills", 30_000.0),
            point("Entertainment", 22_000.0),
            point("Health", 8_000.0),
        ],
        savings_jars: vec![
            jar("1", "New Laptop", 250_000.0, 600_000.0, "💻").into(),
            jar("2", "Vacation to Ghana", 75_000.0, 200_000.0, "✈️").into(),
            jar("3", "Emergency Fund", 450_000.0, 1_000_000.0, "🛡️").into(),
        ],
        transactions: vec![
            tx("1", "DSTV Subscription", "Utilities & Bills", 12_500.0, date(2024, 7, 28), Expense),
            tx("2", "Client Payment", "Income", 150_000.0, date(2024, 7, 27), Income),
            tx("3", "The Place Restaurant", "Food & Groceries", 4_500.0, date(2024, 7, 26), Expense),
            tx("4", "Uber Trip", "Transport", 2_300.0, date(2024, 7, 25), Expense),
            tx("5", "MTN Airtime", "Airtime & Data", 5_000.0, date(2024, 7, 25), Expense),
        ],
    }
}

pub fn learning_modules() -> Vec<LearningModule> {
    let module = |id, title, description, category| LearningModule {
        id,
        title,
        description,
        category,
        content: PLACEHOLDER_CONTENT,
    };

    vec![
        module(
            "1",
            "Budgeting on a Student Income",
            "Learn how to manage your funds effectively while in school.",
            "Budgeting",
        ),
        module(
            "2",
            "Understanding Inflation in Nigeria",
            "How the falling Naira affects your savings and purchasing power.",
            "Economics",
        ),
        module(
            "3",
            "Intro to Nigerian Stocks (NGX)",
            "A beginner's guide to investing in the Nigerian stock market.",
            "Investing",
        ),
        module(
            "4",
            "Debt Management Strategies",
            "Avoid predatory lenders and manage your loans wisely.",
            "Debt",
        ),
        module(
            "5",
            "Tax for Freelancers & SMEs",
            "Understand your tax obligations as a small business owner.",
            "Business",
        ),
    ]
}

pub fn learning_module(id: &str) -> Option<LearningModule> {
    learning_modules().into_iter().find(|m| m.id == id)
}

pub fn investment_opportunities() -> Vec<InvestmentOpportunity> {
    let op = |id, name, asset_type, expected_return, risk_level| InvestmentOpportunity {
        id,
        name,
        asset_type,
        expected_return,
        risk_level,
    };

    vec![
        op("1", "MTN Nigeria", AssetType::Stocks, "15% p.a.", RiskTolerance::Medium),
        op("2", "Lekki Gardens Phase V", AssetType::RealEstate, "25% p.a.", RiskTolerance::Medium),
        op("3", "FGN Savings Bond", AssetType::Bonds, "11% p.a.", RiskTolerance::Low),
        op("4", "ThriveAgric Farm", AssetType::AgriTech, "20% p.a.", RiskTolerance::High),
    ]
}

pub fn pricing_plans() -> Vec<PricingPlan> {
    vec![
        PricingPlan {
            name: "NairaBasic",
            price: "Free",
            price_period: None,
            description: "Essential tools to start your financial journey.",
            features: vec![
                "Basic financial literacy modules",
                "Essential budgeting & expense tracking",
                "Bill reminders",
                "Basic savings jars",
            ],
            button_text: "Current Plan",
            highlighted: false,
        },
        PricingPlan {
            name: "NairaPlus",
            price: "₦3,500",
            price_period: Some("/ month"),
            description: "For students and professionals ready to grow their wealth.",
            features: vec![
                "All Basic features",
                "Advanced financial literacy modules",
                "Personalized investment roadmaps",
                "Robo-advisor access",
                "Financial Health Score",
                "Priority customer support",
            ],
            button_text: "Upgrade to Plus",
            highlighted: true,
        },
        PricingPlan {
            name: "NairaPro",
            price: "₦8,000",
            price_period: Some("/ month"),
            description: "For business owners and freelancers managing it all.",
            features: vec![
                "All Plus features",
                "BizLedger (invoicing, expense management)",
                "AI-powered Cashflow Predictor",
                "Funding opportunities list",
                "Contract & legal templates",
                "Dedicated business advisor chat",
            ],
            button_text: "Upgrade to Pro",
            highlighted: false,
        },
    ]
}
