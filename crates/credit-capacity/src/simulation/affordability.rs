use serde::{Deserialize, Serialize};
use tracing::debug;

use super::amortization::{amortization_factor, solve_max_installment};
use super::debt_ratio::simple_max_installment;
use super::disposable::{adequacy_level, minimum_disposable_income};
use super::domain::{AdequacyLevel, FinancialProfile, LoanParameters};
use super::policy::UnderwritingPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    DebtCeilingExceeded,
    InsufficientDisposableIncome,
}

/// Advisory attached to a result. The figures stay available when alerts are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// Everything derived from one profile and one set of loan parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub income: f64,
    pub existing_charges: f64,
    pub monthly_installment: f64,
    pub borrowable_capital: f64,
    pub monthly_insurance: f64,
    pub total_monthly_cost: f64,
    pub current_debt_ratio: f64,
    pub current_debt_ratio_high: bool,
    /// Post-project ratio in percent, rounded to one decimal.
    pub projected_debt_ratio: f64,
    pub exceeds_ceiling: bool,
    /// Insurance-agnostic headroom, kept apart from the solver's figure.
    pub minimum_recommended_installment: f64,
    pub disposable_income: f64,
    pub minimum_disposable_income: f64,
    pub adequacy: AdequacyLevel,
    pub total_budget: f64,
    pub max_purchase_price: f64,
    pub notary_rate: f64,
    pub notary_fees: f64,
    pub total_interest_cost: f64,
    pub feasible: bool,
    pub alerts: Vec<Alert>,
}

impl AffordabilityResult {
    /// Zeroed figures for a household without income. Nothing is left to live on, so adequacy
    /// and the disposable-income alert follow the same rule as any other file: a positive
    /// household minimum makes the file at risk and raises the alert.
    fn without_income(
        existing_charges: f64,
        minimum_disposable_income: f64,
        notary_rate: f64,
    ) -> Self {
        let adequacy = adequacy_level(0.0, minimum_disposable_income);
        let alerts = disposable_income_alert(adequacy, 0.0, minimum_disposable_income)
            .into_iter()
            .collect();

        Self {
            income: 0.0,
            existing_charges,
            monthly_installment: 0.0,
            borrowable_capital: 0.0,
            monthly_insurance: 0.0,
            total_monthly_cost: 0.0,
            current_debt_ratio: 0.0,
            current_debt_ratio_high: false,
            projected_debt_ratio: 0.0,
            exceeds_ceiling: false,
            minimum_recommended_installment: 0.0,
            disposable_income: 0.0,
            minimum_disposable_income,
            adequacy,
            total_budget: 0.0,
            max_purchase_price: 0.0,
            notary_rate,
            notary_fees: 0.0,
            total_interest_cost: 0.0,
            feasible: false,
            alerts,
        }
    }
}

fn disposable_income_alert(
    adequacy: AdequacyLevel,
    disposable: f64,
    minimum: f64,
) -> Option<Alert> {
    (adequacy == AdequacyLevel::AtRisk).then(|| Alert {
        kind: AlertKind::InsufficientDisposableIncome,
        message: format!(
            "Disposable income {disposable:.0} EUR is below the {minimum:.0} EUR required"
        ),
    })
}

/// Runs the calculator with the default HCSF policy.
pub fn compute_affordability(
    profile: &FinancialProfile,
    loan: &LoanParameters,
) -> AffordabilityResult {
    compute_affordability_with(profile, loan, &UnderwritingPolicy::default())
}

pub fn compute_affordability_with(
    profile: &FinancialProfile,
    loan: &LoanParameters,
    policy: &UnderwritingPolicy,
) -> AffordabilityResult {
    let income = profile.total_income();
    let existing_charges = profile.existing_charges().max(0.0);
    let minimum_disposable_income = minimum_disposable_income(profile, policy);
    let notary_rate = policy.notary_rate(loan.property_category);

    if !(income > 0.0) {
        debug!(income, "no income, nothing to finance");
        return AffordabilityResult::without_income(
            existing_charges,
            minimum_disposable_income,
            notary_rate,
        );
    }

    let installment = loan.monthly_installment.max(0.0);
    let months = f64::from(loan.months());

    let factor = amortization_factor(loan.annual_rate_percent, loan.duration_years);
    let borrowable_capital = if factor > 0.0 { installment / factor } else { 0.0 };
    let monthly_insurance = borrowable_capital * policy.insurance_annual_rate.max(0.0) / 12.0;
    let total_monthly_cost = existing_charges + installment + monthly_insurance;

    let ceiling_percent = policy.ceiling_percent();
    let current_debt_ratio = existing_charges / income * 100.0;
    let projected_debt_ratio = (total_monthly_cost / income * 1000.0).round() / 10.0;
    let exceeds_ceiling = policy.exceeds_ceiling(projected_debt_ratio);

    let minimum_recommended_installment =
        simple_max_installment(income, existing_charges, policy.debt_ratio_ceiling);

    let disposable_income = income - total_monthly_cost;
    let adequacy = adequacy_level(disposable_income, minimum_disposable_income);

    let total_budget = loan.down_payment.max(0.0) + borrowable_capital;
    let max_purchase_price = total_budget / (1.0 + notary_rate);
    let notary_fees = max_purchase_price * notary_rate;
    let total_interest_cost =
        ((installment + monthly_insurance) * months - borrowable_capital).max(0.0);

    let mut alerts = Vec::new();
    if exceeds_ceiling {
        alerts.push(Alert {
            kind: AlertKind::DebtCeilingExceeded,
            message: format!(
                "Projected debt ratio {:.1}% exceeds the {}% ceiling",
                projected_debt_ratio, ceiling_percent
            ),
        });
    }
    alerts.extend(disposable_income_alert(
        adequacy,
        disposable_income,
        minimum_disposable_income,
    ));
    let feasible = !exceeds_ceiling && adequacy != AdequacyLevel::AtRisk;

    debug!(
        income,
        installment,
        borrowable_capital,
        projected_debt_ratio,
        feasible,
        "affordability computed"
    );

    AffordabilityResult {
        income,
        existing_charges,
        monthly_installment: installment,
        borrowable_capital,
        monthly_insurance,
        total_monthly_cost,
        current_debt_ratio,
        current_debt_ratio_high: policy.exceeds_ceiling(current_debt_ratio),
        projected_debt_ratio,
        exceeds_ceiling,
        minimum_recommended_installment,
        disposable_income,
        minimum_disposable_income,
        adequacy,
        total_budget,
        max_purchase_price,
        notary_rate,
        notary_fees,
        total_interest_cost,
        feasible,
        alerts,
    }
}

/// Solver output for a profile, using the loan's rate and duration and the policy's insurance
/// rate and ceiling.
pub fn solve_max_installment_for(
    profile: &FinancialProfile,
    loan: &LoanParameters,
    policy: &UnderwritingPolicy,
) -> f64 {
    solve_max_installment(
        profile.total_income(),
        profile.existing_charges(),
        loan.annual_rate_percent,
        loan.duration_years,
        policy.insurance_annual_rate,
        policy.debt_ratio_ceiling,
    )
}

/// Loan parameters with the installment replaced by the solver's maximum.
pub fn with_solved_installment(
    profile: &FinancialProfile,
    loan: &LoanParameters,
    policy: &UnderwritingPolicy,
) -> LoanParameters {
    LoanParameters {
        monthly_installment: solve_max_installment_for(profile, loan, policy),
        ..loan.clone()
    }
}
