//! "Can I buy this property?" planning: start from a price and work back to the income it needs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::amortization::installment_for_capital;
use super::domain::PropertyCategory;
use super::insurance::monthly_premium;
use super::policy::UnderwritingPolicy;

/// Guarantee, application and brokerage costs, as a share of the price.
pub const ANCILLARY_FEE_RATE: f64 = 0.015;
/// Debt ratio banks prefer for a first reading of the file.
pub const COMFORT_DEBT_RATIO: f64 = 0.33;
pub const MINIMUM_DOWN_PAYMENT_SHARE: f64 = 0.10;
pub const IDEAL_DOWN_PAYMENT_SHARE: f64 = 0.20;
pub const VARIANT_DURATIONS: [u32; 4] = [15, 20, 25, 30];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPurchase {
    pub price: f64,
    #[serde(default)]
    pub property_category: PropertyCategory,
    #[serde(default)]
    pub down_payment: f64,
    pub annual_rate_percent: f64,
    pub duration_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationVariant {
    pub duration_years: u32,
    pub total_installment: f64,
    pub min_income: f64,
    pub total_repaid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPurchasePlan {
    pub notary_fees: f64,
    pub ancillary_fees: f64,
    /// Price plus notary and ancillary fees.
    pub project_cost: f64,
    pub amount_to_borrow: f64,
    /// Part of the down payment left over once the whole project is paid for.
    pub surplus_down_payment: f64,
    pub credit_installment: f64,
    pub insurance_installment: f64,
    pub total_installment: f64,
    pub min_income_comfort: f64,
    pub min_income_ceiling: f64,
    pub minimum_down_payment: f64,
    pub ideal_down_payment: f64,
    pub down_payment_sufficient: bool,
    /// Interest plus insurance over the chosen duration.
    pub total_credit_cost: f64,
    pub duration_variants: Vec<DurationVariant>,
}

fn min_income_for(total_installment: f64, debt_ratio: f64) -> f64 {
    if total_installment > 0.0 {
        (total_installment / debt_ratio).ceil()
    } else {
        0.0
    }
}

fn total_installment_for(
    borrowed: f64,
    annual_rate_percent: f64,
    duration_years: u32,
    policy: &UnderwritingPolicy,
) -> f64 {
    installment_for_capital(borrowed, annual_rate_percent, duration_years)
        + monthly_premium(borrowed, policy.insurance_annual_rate)
}

pub fn plan_target_purchase(
    target: &TargetPurchase,
    policy: &UnderwritingPolicy,
) -> TargetPurchasePlan {
    let price = target.price.max(0.0);
    let down_payment = target.down_payment.max(0.0);
    let notary_fees = price * policy.notary_rate(target.property_category);
    let ancillary_fees = price * ANCILLARY_FEE_RATE;
    let project_cost = price + notary_fees + ancillary_fees;
    let amount_to_borrow = (project_cost - down_payment).max(0.0);

    let credit_installment = installment_for_capital(
        amount_to_borrow,
        target.annual_rate_percent,
        target.duration_years,
    );
    let insurance_installment = monthly_premium(amount_to_borrow, policy.insurance_annual_rate);
    let total_installment = credit_installment + insurance_installment;

    let months = f64::from(target.duration_years.saturating_mul(12));
    let total_credit_cost = (total_installment * months - amount_to_borrow).max(0.0);

    let minimum_down_payment = (price * MINIMUM_DOWN_PAYMENT_SHARE).round();

    let duration_variants = VARIANT_DURATIONS
        .iter()
        .map(|&years| {
            let installment =
                total_installment_for(amount_to_borrow, target.annual_rate_percent, years, policy);
            DurationVariant {
                duration_years: years,
                total_installment: installment.round(),
                min_income: min_income_for(installment, COMFORT_DEBT_RATIO),
                total_repaid: (installment * f64::from(years * 12)).round(),
            }
        })
        .collect();

    debug!(price, amount_to_borrow, total_installment, "target purchase planned");

    TargetPurchasePlan {
        notary_fees,
        ancillary_fees,
        project_cost,
        amount_to_borrow,
        surplus_down_payment: (down_payment - project_cost).max(0.0),
        credit_installment,
        insurance_installment,
        total_installment,
        min_income_comfort: min_income_for(total_installment, COMFORT_DEBT_RATIO),
        min_income_ceiling: min_income_for(total_installment, policy.debt_ratio_ceiling),
        minimum_down_payment,
        ideal_down_payment: (price * IDEAL_DOWN_PAYMENT_SHARE).round(),
        down_payment_sufficient: down_payment >= minimum_down_payment,
        total_credit_cost,
        duration_variants,
    }
}
