use serde::{Deserialize, Serialize};

use super::domain::{AdequacyLevel, FinancialProfile};
use super::policy::UnderwritingPolicy;

/// Comfortable means at least this multiple of the minimum remains each month.
pub const COMFORT_MULTIPLIER: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisposableIncomeCheck {
    pub sufficient: bool,
    pub amount: f64,
    pub minimum: f64,
    pub margin: f64,
    pub level: AdequacyLevel,
}

pub fn minimum_disposable_income(profile: &FinancialProfile, policy: &UnderwritingPolicy) -> f64 {
    policy
        .disposable_income
        .minimum_for(profile.household, profile.children)
}

pub fn adequacy_level(disposable: f64, minimum: f64) -> AdequacyLevel {
    if disposable >= minimum * COMFORT_MULTIPLIER {
        AdequacyLevel::Comfortable
    } else if disposable >= minimum {
        AdequacyLevel::Borderline
    } else {
        AdequacyLevel::AtRisk
    }
}

pub fn check_disposable_income(
    disposable: f64,
    profile: &FinancialProfile,
    policy: &UnderwritingPolicy,
) -> DisposableIncomeCheck {
    let minimum = minimum_disposable_income(profile, policy);
    DisposableIncomeCheck {
        sufficient: disposable >= minimum,
        amount: disposable,
        minimum,
        margin: (disposable - minimum).round(),
        level: adequacy_level(disposable, minimum),
    }
}

/// Highest installment, insurance included, that still leaves the minimum to live on.
pub fn max_installment_for_disposable_income(
    profile: &FinancialProfile,
    policy: &UnderwritingPolicy,
) -> f64 {
    let minimum = minimum_disposable_income(profile, policy);
    (profile.total_income() - profile.existing_charges() - minimum)
        .round()
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::domain::HouseholdType;

    fn couple_with_two_children() -> FinancialProfile {
        FinancialProfile {
            household: HouseholdType::Couple,
            children: 2,
            primary_income: 2600.0,
            secondary_income: 1400.0,
            existing_debt_payments: 200.0,
            ..FinancialProfile::default()
        }
    }

    #[test]
    fn adequacy_thresholds() {
        assert_eq!(adequacy_level(1200.0, 1000.0), AdequacyLevel::Comfortable);
        assert_eq!(adequacy_level(1199.0, 1000.0), AdequacyLevel::Borderline);
        assert_eq!(adequacy_level(1000.0, 1000.0), AdequacyLevel::Borderline);
        assert_eq!(adequacy_level(999.0, 1000.0), AdequacyLevel::AtRisk);
    }

    #[test]
    fn check_reports_margin_against_household_minimum() {
        let profile = couple_with_two_children();
        let check = check_disposable_income(1650.0, &profile, &UnderwritingPolicy::default());
        assert_eq!(check.minimum, 1800.0);
        assert_eq!(check.margin, -150.0);
        assert!(!check.sufficient);
        assert_eq!(check.level, AdequacyLevel::AtRisk);
    }

    #[test]
    fn installment_ceiling_from_disposable_floor() {
        let profile = couple_with_two_children();
        let max = max_installment_for_disposable_income(&profile, &UnderwritingPolicy::default());
        assert_eq!(max, 2000.0);
    }
}
