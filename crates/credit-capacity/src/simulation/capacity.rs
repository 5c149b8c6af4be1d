use serde::{Deserialize, Serialize};

use super::amortization::{capital_from_installment, solve_max_installment};
use super::domain::FinancialProfile;
use super::policy::UnderwritingPolicy;

/// Durations brokers quote side by side.
pub const STANDARD_DURATIONS: [u32; 4] = [10, 15, 20, 25];

/// Borrowing capacity at one duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowingCapacity {
    pub duration_years: u32,
    pub annual_rate_percent: f64,
    pub max_installment: f64,
    pub capital: f64,
    /// Euros of capital per euro of monthly installment.
    pub capital_per_installment: f64,
}

pub fn borrowing_capacity(
    profile: &FinancialProfile,
    annual_rate_percent: f64,
    duration_years: u32,
    policy: &UnderwritingPolicy,
) -> BorrowingCapacity {
    let max_installment = solve_max_installment(
        profile.total_income(),
        profile.existing_charges(),
        annual_rate_percent,
        duration_years,
        policy.insurance_annual_rate,
        policy.debt_ratio_ceiling,
    );
    let capital =
        capital_from_installment(max_installment, annual_rate_percent, duration_years).round();
    let capital_per_installment = if max_installment > 0.0 {
        (capital / max_installment).round()
    } else {
        0.0
    };

    BorrowingCapacity {
        duration_years,
        annual_rate_percent,
        max_installment,
        capital,
        capital_per_installment,
    }
}

/// Capacities over the standard duration ladder, each at the reference rate for its horizon
/// unless a rate is forced.
pub fn capacities_by_duration(
    profile: &FinancialProfile,
    forced_rate_percent: Option<f64>,
    policy: &UnderwritingPolicy,
) -> Vec<BorrowingCapacity> {
    STANDARD_DURATIONS
        .iter()
        .map(|&years| {
            let rate = forced_rate_percent
                .unwrap_or_else(|| policy.reference_rates.for_duration(years));
            borrowing_capacity(profile, rate, years, policy)
        })
        .collect()
}

/// Shortest allowed duration whose capacity reaches `target_capital`.
pub fn shortest_duration_for(
    target_capital: f64,
    profile: &FinancialProfile,
    annual_rate_percent: f64,
    policy: &UnderwritingPolicy,
) -> Option<BorrowingCapacity> {
    (policy.min_duration_years..=policy.max_duration_years)
        .map(|years| borrowing_capacity(profile, annual_rate_percent, years, policy))
        .find(|capacity| capacity.capital >= target_capital)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(income: f64, charges: f64) -> FinancialProfile {
        FinancialProfile {
            primary_income: income,
            existing_debt_payments: charges,
            ..FinancialProfile::default()
        }
    }

    #[test]
    fn capacity_grows_with_duration() {
        let policy = UnderwritingPolicy::default();
        let capacities = capacities_by_duration(&profile(4000.0, 200.0), Some(3.5), &policy);
        assert_eq!(capacities.len(), 4);
        assert!(capacities
            .windows(2)
            .all(|pair| pair[0].capital < pair[1].capital));
    }

    #[test]
    fn reference_rates_apply_per_horizon() {
        let policy = UnderwritingPolicy::default();
        let capacities = capacities_by_duration(&profile(4000.0, 0.0), None, &policy);
        let rates: Vec<f64> = capacities.iter().map(|c| c.annual_rate_percent).collect();
        assert_eq!(rates, vec![3.2, 3.2, 3.5, 3.8]);
    }

    #[test]
    fn shortest_duration_reaching_target() {
        let policy = UnderwritingPolicy::default();
        let found = shortest_duration_for(200_000.0, &profile(4000.0, 200.0), 3.5, &policy)
            .expect("reachable within 25 years");
        assert!(found.capital >= 200_000.0);
        let previous =
            borrowing_capacity(&profile(4000.0, 200.0), 3.5, found.duration_years - 1, &policy);
        assert!(previous.capital < 200_000.0);
    }

    #[test]
    fn unreachable_target_yields_none() {
        let policy = UnderwritingPolicy::default();
        assert!(shortest_duration_for(1_000_000.0, &profile(2000.0, 0.0), 3.5, &policy).is_none());
    }
}
