//! Simplified zero-rate loan (PTZ) eligibility.
//!
//! Uses the monthly net income of the profile against the ceiling of the tightest zone. The full
//! scheme also depends on the zone of the property, the fiscal income of two years before and
//! first-time-buyer status, none of which the profile carries.

use serde::{Deserialize, Serialize};

use super::domain::{FinancialProfile, HouseholdType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtzEligibility {
    pub eligible: bool,
    pub household_size: u32,
    /// Monthly net income ceiling for the household size.
    pub income_ceiling: f64,
    /// Zero when not eligible.
    pub max_amount: f64,
}

pub fn household_size(household: HouseholdType, children: u32) -> u32 {
    let adults = match household {
        HouseholdType::Single => 1,
        HouseholdType::Couple => 2,
    };
    children.saturating_add(adults)
}

/// Ceilings stop growing past four people.
pub fn income_ceiling(household_size: u32) -> f64 {
    match household_size {
        0 | 1 => 4083.0,
        2 => 6125.0,
        3 => 7350.0,
        _ => 8575.0,
    }
}

pub fn max_ptz_amount(household: HouseholdType, children: u32) -> f64 {
    match (household, children) {
        (HouseholdType::Single, 0) => 100_000.0,
        (HouseholdType::Single, _) => 120_000.0,
        (HouseholdType::Couple, 0 | 1) => 120_000.0,
        (HouseholdType::Couple, _) => 150_000.0,
    }
}

pub fn check_ptz_eligibility(profile: &FinancialProfile) -> PtzEligibility {
    let size = household_size(profile.household, profile.children);
    let ceiling = income_ceiling(size);
    let income = profile.total_income();
    let eligible = income > 0.0 && income <= ceiling;

    PtzEligibility {
        eligible,
        household_size: size,
        income_ceiling: ceiling,
        max_amount: if eligible {
            max_ptz_amount(profile.household, profile.children)
        } else {
            0.0
        },
    }
}
