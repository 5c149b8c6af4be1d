//! Broker advice derived from a feasibility report: alternative loan scenarios and the
//! bank-facing diagnostic of the file.

mod diagnostic;
mod scenarios;

use serde::{Deserialize, Serialize};

use super::domain::{
    AdequacyLevel, EmploymentStatus, FinancialProfile, HouseholdType, LoanParameters,
    PropertyCategory,
};
use super::policy::UnderwritingPolicy;
use super::ptz::{check_ptz_eligibility, PtzEligibility};
use super::report::FeasibilityReport;

pub use diagnostic::{bank_diagnostic, ApprovalLikelihood, BankDiagnostic};
pub use scenarios::{
    alternative_scenarios, Scenario, ScenarioAdjustment, ScenarioKind, MAX_SCENARIOS,
};

/// Snapshot of one simulated file that every advice rule reads.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceContext {
    pub age: u32,
    pub employment_status: EmploymentStatus,
    pub household: HouseholdType,
    pub income: f64,
    pub existing_charges: f64,
    pub down_payment: f64,
    pub duration_years: u32,
    pub annual_rate_percent: f64,
    pub property_category: PropertyCategory,
    pub monthly_installment: f64,
    pub borrowable_capital: f64,
    pub max_purchase_price: f64,
    pub projected_debt_ratio: f64,
    pub adequacy: AdequacyLevel,
    pub score: u8,
    pub ptz: PtzEligibility,
}

impl AdviceContext {
    pub fn new(
        profile: &FinancialProfile,
        loan: &LoanParameters,
        report: &FeasibilityReport,
    ) -> Self {
        let result = &report.affordability;
        Self {
            age: profile.age,
            employment_status: profile.employment_status,
            household: profile.household,
            income: result.income,
            existing_charges: result.existing_charges,
            down_payment: loan.down_payment.max(0.0),
            duration_years: loan.duration_years,
            annual_rate_percent: loan.annual_rate_percent,
            property_category: loan.property_category,
            monthly_installment: result.monthly_installment,
            borrowable_capital: result.borrowable_capital,
            max_purchase_price: result.max_purchase_price,
            projected_debt_ratio: result.projected_debt_ratio,
            adequacy: result.adequacy,
            score: report.feasibility.score,
            ptz: check_ptz_eligibility(profile),
        }
    }

    /// Down payment as a percentage of `price`.
    pub fn down_payment_share_of(&self, price: f64) -> f64 {
        if price > 0.0 {
            self.down_payment / price * 100.0
        } else {
            0.0
        }
    }

    pub fn down_payment_share_percent(&self) -> f64 {
        self.down_payment_share_of(self.max_purchase_price)
    }

    pub fn age_at_term(&self) -> u32 {
        self.age.saturating_add(self.duration_years)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceReport {
    pub diagnostic: BankDiagnostic,
    pub scenarios: Vec<Scenario>,
    pub ptz: PtzEligibility,
}

pub fn advise(
    profile: &FinancialProfile,
    loan: &LoanParameters,
    report: &FeasibilityReport,
    policy: &UnderwritingPolicy,
) -> AdviceReport {
    let context = AdviceContext::new(profile, loan, report);
    AdviceReport {
        diagnostic: bank_diagnostic(&context),
        scenarios: alternative_scenarios(&context, policy),
        ptz: context.ptz,
    }
}
