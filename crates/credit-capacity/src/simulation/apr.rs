//! Approximate annual effective global rate (TAEG) and the legal cap it is checked against.

use serde::{Deserialize, Serialize};

use super::amortization::{installment_for_capital, interest_cost};
use super::insurance::{monthly_premium, round_cents};

/// Legal APR cap for fixed-rate loans of 20 years and more, first quarter 2026.
pub const DEFAULT_USURY_RATE_PERCENT: f64 = 5.48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuaranteeKind {
    Mortgage,
    #[default]
    Surety,
}

impl GuaranteeKind {
    /// Share of the borrowed capital charged for the guarantee.
    pub const fn fee_rate(self) -> f64 {
        match self {
            Self::Mortgage => 0.015,
            Self::Surety => 0.012,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AprRequest {
    pub capital: f64,
    pub annual_rate_percent: f64,
    pub duration_years: u32,
    #[serde(default)]
    pub application_fee: f64,
    #[serde(default)]
    pub guarantee_fee: f64,
    pub insurance_annual_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditCostBreakdown {
    pub interest: f64,
    pub insurance: f64,
    pub application_fee: f64,
    pub guarantee_fee: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AprEstimate {
    pub apr_percent: f64,
    pub total_cost: f64,
    pub breakdown: CreditCostBreakdown,
}

/// Nominal rate plus every non-interest cost spread evenly over capital and years.
/// Linear approximation, not the actuarial rate.
pub fn estimate_apr(request: &AprRequest) -> AprEstimate {
    if !(request.capital > 0.0) || request.duration_years == 0 {
        return AprEstimate::default();
    }

    let capital = request.capital;
    let years = f64::from(request.duration_years);
    let installment =
        installment_for_capital(capital, request.annual_rate_percent, request.duration_years);
    let interest = interest_cost(capital, installment, request.duration_years);
    let insurance = monthly_premium(capital, request.insurance_annual_rate) * 12.0 * years;
    let application_fee = request.application_fee.max(0.0);
    let guarantee_fee = request.guarantee_fee.max(0.0);

    let extra_costs = insurance + application_fee + guarantee_fee;
    let apr_percent = request.annual_rate_percent + extra_costs / capital / years * 100.0;

    AprEstimate {
        apr_percent: round_cents(apr_percent),
        total_cost: (interest + extra_costs).round(),
        breakdown: CreditCostBreakdown {
            interest: interest.round(),
            insurance: insurance.round(),
            application_fee,
            guarantee_fee,
        },
    }
}

pub fn within_usury_rate(apr_percent: f64, usury_rate_percent: f64) -> bool {
    apr_percent <= usury_rate_percent
}

pub fn estimate_guarantee_fee(capital: f64, kind: GuaranteeKind) -> f64 {
    if !(capital > 0.0) {
        return 0.0;
    }
    (capital * kind.fee_rate()).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AprRequest {
        AprRequest {
            capital: 200_000.0,
            annual_rate_percent: 3.5,
            duration_years: 20,
            application_fee: 900.0,
            guarantee_fee: 2_000.0,
            insurance_annual_rate: 0.0034,
        }
    }

    #[test]
    fn apr_adds_fees_and_insurance_to_nominal_rate() {
        let estimate = estimate_apr(&request());
        assert_eq!(estimate.apr_percent, 3.91);
        assert_eq!(estimate.breakdown.insurance, 13_600.0);
        assert_eq!(estimate.breakdown.interest, 78_381.0);
        assert_eq!(estimate.total_cost, 94_881.0);
        assert!(within_usury_rate(estimate.apr_percent, DEFAULT_USURY_RATE_PERCENT));
    }

    #[test]
    fn apr_without_fees_is_nominal() {
        let estimate = estimate_apr(&AprRequest {
            application_fee: 0.0,
            guarantee_fee: 0.0,
            insurance_annual_rate: 0.0,
            ..request()
        });
        assert_eq!(estimate.apr_percent, 3.5);
    }

    #[test]
    fn empty_loan_has_no_cost() {
        let estimate = estimate_apr(&AprRequest {
            capital: 0.0,
            ..request()
        });
        assert_eq!(estimate, AprEstimate::default());
    }

    #[test]
    fn usury_cap_is_inclusive() {
        assert!(within_usury_rate(5.48, DEFAULT_USURY_RATE_PERCENT));
        assert!(!within_usury_rate(5.49, DEFAULT_USURY_RATE_PERCENT));
    }

    #[test]
    fn guarantee_fee_by_kind() {
        assert_eq!(estimate_guarantee_fee(200_000.0, GuaranteeKind::Mortgage), 3_000.0);
        assert_eq!(estimate_guarantee_fee(200_000.0, GuaranteeKind::default()), 2_400.0);
        assert_eq!(estimate_guarantee_fee(-1.0, GuaranteeKind::Surety), 0.0);
    }
}
