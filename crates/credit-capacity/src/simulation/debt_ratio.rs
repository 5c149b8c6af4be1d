use serde::{Deserialize, Serialize};

use super::policy::{round_hundredths, UnderwritingPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtRatioLevel {
    Ok,
    Limit,
    Exceeded,
}

impl DebtRatioLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "Comfortable debt ratio",
            Self::Limit => "Close to the regulatory ceiling",
            Self::Exceeded => "Above the regulatory ceiling",
        }
    }
}

/// Position of a debt ratio against the alert threshold and the ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRatioCheck {
    pub compliant: bool,
    pub level: DebtRatioLevel,
    /// Percentage points above the ceiling; negative when under it.
    pub excess_points: f64,
    pub message: String,
}

/// Debt ratio in percent, rounded to two decimals. Zero when there is no income.
pub fn debt_ratio_percent(income: f64, existing_charges: f64, project_installment: f64) -> f64 {
    if !(income > 0.0) {
        return 0.0;
    }
    let total = existing_charges.max(0.0) + project_installment.max(0.0);
    (total / income * 100.0 * 100.0).round() / 100.0
}

pub fn check_debt_ratio(ratio_percent: f64, policy: &UnderwritingPolicy) -> DebtRatioCheck {
    let ratio_percent = round_hundredths(ratio_percent);
    let ceiling = policy.ceiling_percent();
    let alert = policy.alert_percent();
    let excess = ratio_percent - ceiling;

    let (compliant, level, message) = if ratio_percent <= alert {
        (true, DebtRatioLevel::Ok, "Comfortable debt ratio".to_string())
    } else if !policy.exceeds_ceiling(ratio_percent) {
        (
            true,
            DebtRatioLevel::Limit,
            "Debt ratio close to the regulatory ceiling".to_string(),
        )
    } else {
        (
            false,
            DebtRatioLevel::Exceeded,
            format!("Debt ratio exceeds the ceiling by {excess:.1} points (max {ceiling}%)"),
        )
    };

    DebtRatioCheck {
        compliant,
        level,
        excess_points: round_hundredths(excess),
        message,
    }
}

/// Insurance-agnostic headroom under the ceiling, rounded to the euro.
///
/// This is the simplified recommendation shown next to the installment input. It deliberately
/// ignores insurance so it stays put while the borrower edits the installment.
pub fn simple_max_installment(income: f64, existing_charges: f64, ceiling: f64) -> f64 {
    if !(income > 0.0) {
        return 0.0;
    }
    (income * ceiling - existing_charges).round().max(0.0)
}
