//! Instruction text sent to the model. Caller-supplied text is interpolated
//! as-is; nothing is escaped.

use crate::domain::advice::AdvisoryRequest;
use crate::domain::forecast::ForecastRequest;

pub fn advice_prompt(req: &AdvisoryRequest) -> String {
    format!(
        "You are 'NairaWise', an expert financial advisor for the Nigerian market. \
A user has the following profile: Risk Tolerance: {}, Financial Goals: '{}', Age: {}. \
Based on this, create a personalized investment roadmap. \
Recommend a mix of Nigerian investment options like Treasury Bills, FGN Bonds, stocks on the NGX, and real estate. \
Explain your reasoning in a clear, encouraging tone.",
        req.risk_tolerance, req.goals, req.age
    )
}

pub fn forecast_prompt(req: &ForecastRequest) -> String {
    format!(
        "You are 'NairaWise', a business financial analyst specializing in Nigerian SMEs. \
Based on the following historical monthly data, provide a 3-month cashflow forecast. \
Highlight potential shortfalls or surpluses and give one actionable tip. Data: {}",
        req.historical_data()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advice::RiskTolerance;

    fn retire_early() -> AdvisoryRequest {
        AdvisoryRequest {
            risk_tolerance: RiskTolerance::Low,
            goals: "Retire early".to_string(),
            age: 45,
        }
    }

    #[test]
    fn advice_prompt_embeds_profile_verbatim() {
        let prompt = advice_prompt(&retire_early());
        assert!(prompt.contains("Risk Tolerance: Low"));
        assert!(prompt.contains("Financial Goals: 'Retire early'"));
        assert!(prompt.contains("Age: 45."));
        assert!(prompt.starts_with("You are 'NairaWise', an expert financial advisor"));
    }

    #[test]
    fn advice_prompt_is_deterministic() {
        assert_eq!(advice_prompt(&retire_early()), advice_prompt(&retire_early()));
    }

    #[test]
    fn advice_prompt_does_not_escape_goals() {
        let req = AdvisoryRequest {
            goals: "it's {\"odd\"}\nreally".to_string(),
            ..retire_early()
        };
        assert!(advice_prompt(&req).contains("'it's {\"odd\"}\nreally'"));
    }

    #[test]
    fn advice_prompt_is_total_over_edge_values() {
        for risk in RiskTolerance::ALL {
            for age in [0, 1, u32::MAX] {
                let req = AdvisoryRequest {
                    risk_tolerance: risk,
                    goals: String::new(),
                    age,
                };
                let prompt = advice_prompt(&req);
                assert!(prompt.contains(&format!("Age: {age}")));
            }
        }
    }

    #[test]
    fn forecast_prompt_appends_raw_data() {
        let req = ForecastRequest::parse("[]").unwrap();
        let prompt = forecast_prompt(&req);
        assert!(prompt.ends_with("Data: []"));
        assert!(prompt.contains("3-month cashflow forecast"));
    }
}
