use super::common::*;
use crate::simulation::domain::{AdequacyLevel, FinancialProfile, HouseholdType};
use crate::simulation::{
    compute_affordability, compute_affordability_with, solve_max_installment_for, AlertKind,
    UnderwritingPolicy,
};

#[test]
fn solver_output_stays_within_ceiling_end_to_end() {
    let profile = single_borrower();
    let policy = policy_with_insurance(0.0036);
    let max = solve_max_installment_for(&profile, &loan(0.0), &policy);
    assert_eq!(max, 998.0);

    let result = compute_affordability_with(&profile, &loan(max), &policy);
    assert!(result.projected_debt_ratio <= 35.0, "ratio {}", result.projected_debt_ratio);
    assert!(!result.exceeds_ceiling);
    assert!(result.borrowable_capital > 170_000.0);
    assert!(result.feasible);
    assert!(result.alerts.is_empty());
}

#[test]
fn projected_ratio_is_rounded_before_the_ceiling_test() {
    let profile = FinancialProfile {
        primary_income: 10_000.0,
        ..single_borrower()
    };
    let policy = policy_with_insurance(0.0);

    let at_limit = compute_affordability_with(&profile, &loan(3504.0), &policy);
    assert_eq!(at_limit.projected_debt_ratio, 35.0);
    assert!(!at_limit.exceeds_ceiling);

    let over = compute_affordability_with(&profile, &loan(3506.0), &policy);
    assert_eq!(over.projected_debt_ratio, 35.1);
    assert!(over.exceeds_ceiling);
    assert_eq!(over.alerts.len(), 1);
    assert_eq!(over.alerts[0].kind, AlertKind::DebtCeilingExceeded);
    assert!(over.alerts[0].message.contains("35.1%"));
}

#[test]
fn no_income_yields_zeroed_figures() {
    let profile = FinancialProfile {
        primary_income: 0.0,
        existing_debt_payments: 150.0,
        ..single_borrower()
    };
    let result = compute_affordability(&profile, &loan(900.0));

    assert_eq!(result.current_debt_ratio, 0.0);
    assert_eq!(result.projected_debt_ratio, 0.0);
    assert_eq!(result.borrowable_capital, 0.0);
    assert_eq!(result.disposable_income, 0.0);
    assert_eq!(result.minimum_recommended_installment, 0.0);
    assert_eq!(result.max_purchase_price, 0.0);
    assert!(!result.feasible);
    assert_eq!(result.adequacy, AdequacyLevel::AtRisk);
    assert_eq!(result.alerts.len(), 1);
    assert_eq!(result.alerts[0].kind, AlertKind::InsufficientDisposableIncome);
    assert!(result.alerts[0].message.contains("800"));
}

#[test]
fn no_income_without_household_minimum_raises_no_alert() {
    let mut policy = policy_with_insurance(0.0034);
    policy.disposable_income.single = 0.0;
    let profile = FinancialProfile {
        primary_income: 0.0,
        ..single_borrower()
    };
    let result = compute_affordability_with(&profile, &loan(900.0), &policy);

    assert_eq!(result.minimum_disposable_income, 0.0);
    assert_ne!(result.adequacy, AdequacyLevel::AtRisk);
    assert!(result.alerts.is_empty());
    assert!(!result.feasible);
}

#[test]
fn overridden_ceiling_is_compliant_at_the_limit() {
    let policy = UnderwritingPolicy {
        debt_ratio_ceiling: 0.29,
        insurance_annual_rate: 0.0,
        ..UnderwritingPolicy::default()
    };
    let profile = FinancialProfile {
        primary_income: 10_000.0,
        ..single_borrower()
    };

    let at_limit = compute_affordability_with(&profile, &loan(2900.0), &policy);
    assert_eq!(at_limit.projected_debt_ratio, 29.0);
    assert!(!at_limit.exceeds_ceiling);
    assert!(at_limit.alerts.is_empty());

    let over = compute_affordability_with(&profile, &loan(2906.0), &policy);
    assert_eq!(over.projected_debt_ratio, 29.1);
    assert!(over.exceeds_ceiling);
    assert!(over.alerts[0].message.contains("29%"));

    let charged = FinancialProfile {
        existing_debt_payments: 2900.0,
        ..profile
    };
    let result = compute_affordability_with(&charged, &loan(0.0), &policy);
    assert!(!result.current_debt_ratio_high);
}

#[test]
fn current_debt_ratio_is_high_only_above_the_ceiling() {
    let charged = |charges: f64| FinancialProfile {
        existing_debt_payments: charges,
        ..single_borrower()
    };

    let above = compute_affordability(&charged(1060.0), &loan(0.0));
    assert!(above.current_debt_ratio > 35.3 && above.current_debt_ratio < 35.4);
    assert!(above.current_debt_ratio_high);

    let at_limit = compute_affordability(&charged(1050.0), &loan(0.0));
    assert_eq!(at_limit.current_debt_ratio, 35.0);
    assert!(!at_limit.current_debt_ratio_high);

    let below = compute_affordability(&charged(600.0), &loan(0.0));
    assert!(!below.current_debt_ratio_high);
}

#[test]
fn alerts_accumulate_when_both_limits_fail() {
    let result = compute_affordability(&stretched_borrower(), &loan(600.0));

    assert_eq!(result.projected_debt_ratio, 55.3);
    assert_eq!(result.adequacy, AdequacyLevel::AtRisk);
    let kinds: Vec<AlertKind> = result.alerts.iter().map(|alert| alert.kind).collect();
    assert_eq!(
        kinds,
        vec![AlertKind::DebtCeilingExceeded, AlertKind::InsufficientDisposableIncome]
    );
    assert!(result.alerts[1].message.contains("800"));
    assert!(!result.feasible);
    assert!(result.current_debt_ratio > 13.0 && result.current_debt_ratio < 13.4);
}

#[test]
fn couple_recommendation_ignores_insurance() {
    let profile = FinancialProfile {
        household: HouseholdType::Couple,
        primary_income: 3000.0,
        secondary_income: 2500.0,
        ..single_borrower()
    };
    let result = compute_affordability(&profile, &loan(1500.0));
    assert_eq!(result.minimum_recommended_installment, 1925.0);

    let solved = solve_max_installment_for(&profile, &loan(0.0), &policy_with_insurance(0.0034));
    assert!(solved < result.minimum_recommended_installment);
}

#[test]
fn purchase_budget_nets_out_notary_fees() {
    let mut parameters = loan(1000.0);
    parameters.down_payment = 30_000.0;
    let result = compute_affordability(&single_borrower(), &parameters);

    assert_eq!(result.notary_rate, 0.08);
    assert!((result.total_budget - (30_000.0 + result.borrowable_capital)).abs() < 1e-6);
    assert!((result.max_purchase_price * 1.08 - result.total_budget).abs() < 1e-6);
    assert!((result.notary_fees - result.max_purchase_price * 0.08).abs() < 1e-6);
    assert!(result.total_interest_cost > 0.0);
}

#[test]
fn repeated_runs_are_identical() {
    let profile = couple_of_civil_servants();
    let parameters = loan(1400.0);
    assert_eq!(
        compute_affordability(&profile, &parameters),
        compute_affordability(&profile, &parameters)
    );
}
