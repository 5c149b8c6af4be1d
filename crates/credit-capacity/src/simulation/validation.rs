use std::fmt;

use serde::Serialize;

use super::domain::{FinancialProfile, LoanParameters};
use super::policy::UnderwritingPolicy;

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every problem found in a submission, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid simulation input: {}", summarize(.issues))]
pub struct ValidationErrors {
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Default)]
struct IssueCollector {
    issues: Vec<ValidationIssue>,
}

impl IssueCollector {
    fn check(&mut self, ok: bool, field: &'static str, message: impl FnOnce() -> String) {
        if !ok {
            self.issues.push(ValidationIssue {
                field,
                message: message(),
            });
        }
    }

    fn amount(&mut self, field: &'static str, value: f64, max: f64) {
        self.check(value.is_finite() && value >= 0.0, field, || {
            "must be a non-negative amount".to_string()
        });
        self.check(!(value > max), field, || format!("must not exceed {max:.0} EUR"));
    }

    fn duration(&mut self, duration_years: u32, policy: &UnderwritingPolicy) {
        self.check(
            (policy.min_duration_years..=policy.max_duration_years).contains(&duration_years),
            "duration_years",
            || {
                format!(
                    "must be between {} and {} years",
                    policy.min_duration_years, policy.max_duration_years
                )
            },
        );
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                issues: self.issues,
            })
        }
    }
}

/// Form-level bounds on a profile and its loan settings. The calculators never call this and
/// stay total on any input.
pub fn validate_simulation(
    profile: &FinancialProfile,
    loan: &LoanParameters,
    policy: &UnderwritingPolicy,
) -> Result<(), ValidationErrors> {
    let limits = &policy.limits;
    let mut collector = IssueCollector::default();

    collector.check(
        (limits.min_age..=limits.max_age).contains(&profile.age),
        "age",
        || format!("must be between {} and {}", limits.min_age, limits.max_age),
    );
    collector.amount("primary_income", profile.primary_income, limits.max_income);
    collector.amount("secondary_income", profile.secondary_income, limits.max_income);
    collector.amount("other_income", profile.other_income, limits.max_income);
    collector.amount("existing_debt_payments", profile.existing_debt_payments, limits.max_income);
    collector.amount("other_fixed_charges", profile.other_fixed_charges, limits.max_income);

    collector.duration(loan.duration_years, policy);
    collector.amount("monthly_installment", loan.monthly_installment, limits.max_income);
    collector.amount("down_payment", loan.down_payment, limits.max_down_payment);
    collector.check(
        loan.annual_rate_percent.is_finite() && (0.0..=20.0).contains(&loan.annual_rate_percent),
        "annual_rate_percent",
        || "must be between 0 and 20".to_string(),
    );

    collector.finish()
}

/// Bounds on a target property price.
pub fn validate_property_price(
    price: f64,
    policy: &UnderwritingPolicy,
) -> Result<(), ValidationErrors> {
    let limits = &policy.limits;
    let mut collector = IssueCollector::default();
    collector.check(
        price.is_finite()
            && price >= limits.min_property_price
            && price <= limits.max_property_price,
        "price",
        || {
            format!(
                "must be between {:.0} and {:.0} EUR",
                limits.min_property_price, limits.max_property_price
            )
        },
    );
    collector.finish()
}

/// Bounds on a standalone repayment plan request.
pub fn validate_loan_terms(
    capital: f64,
    duration_years: u32,
    policy: &UnderwritingPolicy,
) -> Result<(), ValidationErrors> {
    let limits = &policy.limits;
    let mut collector = IssueCollector::default();
    collector.check(
        capital.is_finite() && capital > 0.0 && capital <= limits.max_property_price,
        "capital",
        || format!("must be positive and at most {:.0} EUR", limits.max_property_price),
    );
    collector.duration(duration_years, policy);
    collector.finish()
}
