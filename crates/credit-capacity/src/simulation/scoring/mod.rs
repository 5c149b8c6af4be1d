mod rules;
mod verdict;

pub use verdict::Verdict;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::affordability::AffordabilityResult;
use super::domain::{EmploymentStatus, FinancialProfile, LoanParameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    DebtRatio,
    DisposableIncome,
    DownPayment,
    EmploymentStability,
    AgeAtTerm,
    ExistingDebt,
    IncomeLevel,
}

impl CriterionKind {
    pub const ALL: [CriterionKind; 7] = [
        Self::DebtRatio,
        Self::DisposableIncome,
        Self::DownPayment,
        Self::EmploymentStability,
        Self::AgeAtTerm,
        Self::ExistingDebt,
        Self::IncomeLevel,
    ];

    /// Weight of the criterion. The seven weights add up to 100.
    pub const fn maximum(self) -> u8 {
        match self {
            Self::DebtRatio => 25,
            Self::DisposableIncome => 20,
            Self::DownPayment => 15,
            Self::EmploymentStability => 15,
            Self::AgeAtTerm => 10,
            Self::ExistingDebt => 5,
            Self::IncomeLevel => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DebtRatio => "Projected debt ratio",
            Self::DisposableIncome => "Disposable income",
            Self::DownPayment => "Down payment",
            Self::EmploymentStability => "Employment stability",
            Self::AgeAtTerm => "Age at loan term",
            Self::ExistingDebt => "Existing debt",
            Self::IncomeLevel => "Income level",
        }
    }
}

/// Figures the scorer reads, detached from how they were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityInput {
    pub projected_debt_ratio: f64,
    pub disposable_income: f64,
    pub minimum_disposable_income: f64,
    pub down_payment: f64,
    pub max_purchase_price: f64,
    pub employment_status: EmploymentStatus,
    pub age: u32,
    pub duration_years: u32,
    pub current_debt_ratio: f64,
    pub income: f64,
}

impl FeasibilityInput {
    pub fn from_simulation(
        profile: &FinancialProfile,
        loan: &LoanParameters,
        result: &AffordabilityResult,
    ) -> Self {
        Self {
            projected_debt_ratio: result.projected_debt_ratio,
            disposable_income: result.disposable_income,
            minimum_disposable_income: result.minimum_disposable_income,
            down_payment: loan.down_payment.max(0.0),
            max_purchase_price: result.max_purchase_price,
            employment_status: profile.employment_status,
            age: profile.age,
            duration_years: loan.duration_years,
            current_debt_ratio: result.current_debt_ratio,
            income: result.income,
        }
    }

    /// Down payment as a percentage of the reachable purchase price.
    pub fn down_payment_share_percent(&self) -> f64 {
        if self.max_purchase_price > 0.0 && self.down_payment > 0.0 {
            self.down_payment / self.max_purchase_price * 100.0
        } else {
            0.0
        }
    }

    pub fn age_at_term(&self) -> u32 {
        self.age.saturating_add(self.duration_years)
    }
}

/// One row of the breakdown, rendered as a progress bar with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCriterion {
    pub criterion: CriterionKind,
    pub label: String,
    pub achieved: u8,
    pub maximum: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityScore {
    pub score: u8,
    pub criteria: Vec<ScoreCriterion>,
    pub verdict: Verdict,
}

/// Stateless scorer for callers that hold a scoring value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityScorer;

impl FeasibilityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, input: &FeasibilityInput) -> FeasibilityScore {
        let criteria = rules::score_criteria(input);
        let total: u32 = criteria
            .iter()
            .map(|criterion| u32::from(criterion.achieved.min(criterion.maximum)))
            .sum();
        let score = u8::try_from(total.min(100)).unwrap_or(100);
        let verdict = Verdict::from_score(score);

        debug!(score, verdict = verdict.label(), "feasibility scored");

        FeasibilityScore {
            score,
            criteria,
            verdict,
        }
    }
}

pub fn score_feasibility(input: &FeasibilityInput) -> FeasibilityScore {
    FeasibilityScorer::new().score(input)
}
