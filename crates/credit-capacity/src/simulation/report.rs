use serde::{Deserialize, Serialize};

use super::affordability::{compute_affordability_with, AffordabilityResult};
use super::domain::{FinancialProfile, LoanParameters};
use super::policy::UnderwritingPolicy;
use super::scoring::{score_feasibility, FeasibilityInput, FeasibilityScore};

/// Affordability figures together with the score derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    pub affordability: AffordabilityResult,
    pub feasibility: FeasibilityScore,
}

pub fn feasibility_report(
    profile: &FinancialProfile,
    loan: &LoanParameters,
    policy: &UnderwritingPolicy,
) -> FeasibilityReport {
    let affordability = compute_affordability_with(profile, loan, policy);
    let feasibility =
        score_feasibility(&FeasibilityInput::from_simulation(profile, loan, &affordability));

    FeasibilityReport {
        affordability,
        feasibility,
    }
}
