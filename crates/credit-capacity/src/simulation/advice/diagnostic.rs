use serde::{Deserialize, Serialize};

use super::AdviceContext;
use crate::simulation::domain::{AdequacyLevel, EmploymentStatus, HouseholdType};

/// Strengths and watch points listed at most.
const MAX_POINTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalLikelihood {
    VeryHigh,
    High,
    Moderate,
    Low,
    VeryLow,
}

impl ApprovalLikelihood {
    pub const fn from_score(score: u8) -> Self {
        match score {
            85.. => Self::VeryHigh,
            70..=84 => Self::High,
            55..=69 => Self::Moderate,
            40..=54 => Self::Low,
            _ => Self::VeryLow,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very high",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::VeryLow => "Very low",
        }
    }
}

/// How a lender is likely to read the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDiagnostic {
    pub score: u8,
    pub approval_likelihood: ApprovalLikelihood,
    pub strengths: Vec<String>,
    pub watch_points: Vec<String>,
    pub estimated_turnaround: String,
}

pub fn bank_diagnostic(ctx: &AdviceContext) -> BankDiagnostic {
    let share = ctx.down_payment_share_percent();

    let mut strengths = Vec::new();
    match ctx.employment_status {
        EmploymentStatus::CivilServant => {
            strengths.push("Civil servant status is highly valued by lenders".to_string())
        }
        EmploymentStatus::PermanentContract => {
            strengths.push("Permanent contract shows stable employment".to_string())
        }
        _ => {}
    }
    if share >= 20.0 {
        strengths.push(format!("Solid down payment of {share:.0}%"));
    }
    if ctx.projected_debt_ratio <= 30.0 {
        strengths.push("Comfortable debt ratio".to_string());
    }
    if ctx.adequacy == AdequacyLevel::Comfortable {
        strengths.push("Ample disposable income".to_string());
    }
    if ctx.household == HouseholdType::Couple && ctx.income > 5000.0 {
        strengths.push("High joint household income".to_string());
    }
    if (25..=45).contains(&ctx.age) {
        strengths.push("Ideal age bracket for borrowing".to_string());
    }
    strengths.truncate(MAX_POINTS);

    let mut watch_points = Vec::new();
    if share < 10.0 {
        watch_points.push("Down payment below 10% does not cover notary fees".to_string());
    }
    if ctx.projected_debt_ratio > 33.0 {
        watch_points.push(format!(
            "Debt ratio of {:.1}% close to the ceiling",
            ctx.projected_debt_ratio
        ));
    }
    match ctx.employment_status {
        EmploymentStatus::FixedTermContract => {
            watch_points.push("Fixed-term contract means stricter conditions".to_string())
        }
        EmploymentStatus::SelfEmployed => watch_points
            .push("Self-employed borrowers usually need three years of accounts".to_string()),
        _ => {}
    }
    if ctx.age_at_term() > 70 {
        watch_points.push(format!(
            "Loan ends at age {}, insurance costs more",
            ctx.age_at_term()
        ));
    }
    if ctx.adequacy == AdequacyLevel::Borderline {
        watch_points.push("Disposable income only just above the minimum".to_string());
    }
    if ctx.existing_charges > 0.0 {
        watch_points.push("Existing loans weigh on the file".to_string());
    }
    watch_points.truncate(MAX_POINTS);

    let turnaround = if ctx.score >= 80 && share >= 15.0 {
        "2-3 weeks"
    } else if ctx.score >= 60 {
        "3-4 weeks"
    } else {
        "4-6 weeks"
    };

    BankDiagnostic {
        score: ctx.score,
        approval_likelihood: ApprovalLikelihood::from_score(ctx.score),
        strengths,
        watch_points,
        estimated_turnaround: turnaround.to_string(),
    }
}
