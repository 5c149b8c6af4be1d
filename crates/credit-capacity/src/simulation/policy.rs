use serde::{Deserialize, Serialize};

use super::domain::{HouseholdType, PropertyCategory};

/// Regulatory and market parameters applied by every calculator.
///
/// Defaults follow the HCSF 2024 recommendation and the market averages used by French
/// brokers in 2024-2025.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwritingPolicy {
    /// Maximum share of net income consumed by all debt service, insurance included.
    pub debt_ratio_ceiling: f64,
    /// Ratio above which a compliant file is flagged as close to the ceiling.
    pub debt_ratio_alert: f64,
    pub min_duration_years: u32,
    pub max_duration_years: u32,
    pub default_duration_years: u32,
    pub notary_rate_new: f64,
    pub notary_rate_existing: f64,
    /// Yearly premium as a fraction of the initial capital.
    pub insurance_annual_rate: f64,
    pub disposable_income: DisposableIncomeFloor,
    pub reference_rates: ReferenceRates,
    pub limits: InputLimits,
}

impl Default for UnderwritingPolicy {
    fn default() -> Self {
        Self {
            debt_ratio_ceiling: 0.35,
            debt_ratio_alert: 0.315,
            min_duration_years: 10,
            max_duration_years: 25,
            default_duration_years: 20,
            notary_rate_new: 0.025,
            notary_rate_existing: 0.08,
            insurance_annual_rate: 0.0034,
            disposable_income: DisposableIncomeFloor::default(),
            reference_rates: ReferenceRates::default(),
            limits: InputLimits::default(),
        }
    }
}

impl UnderwritingPolicy {
    pub fn notary_rate(&self, category: PropertyCategory) -> f64 {
        match category {
            PropertyCategory::New => self.notary_rate_new,
            PropertyCategory::Existing => self.notary_rate_existing,
        }
    }

    /// Ceiling expressed in percent, as ratios are reported. Rounded to hundredths so an
    /// override such as `0.29` reads as exactly `29.0`.
    pub fn ceiling_percent(&self) -> f64 {
        round_hundredths(self.debt_ratio_ceiling * 100.0)
    }

    pub fn alert_percent(&self) -> f64 {
        round_hundredths(self.debt_ratio_alert * 100.0)
    }

    /// Strict comparison of a ratio in percent against the ceiling. A ratio exactly at the
    /// ceiling is compliant.
    pub fn exceeds_ceiling(&self, ratio_percent: f64) -> bool {
        round_hundredths(ratio_percent) > self.ceiling_percent()
    }
}

pub(crate) fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Minimum monthly income left after debt service, by household shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisposableIncomeFloor {
    pub single: f64,
    pub couple: f64,
    pub per_child: f64,
}

impl Default for DisposableIncomeFloor {
    fn default() -> Self {
        Self {
            single: 800.0,
            couple: 1200.0,
            per_child: 300.0,
        }
    }
}

impl DisposableIncomeFloor {
    pub fn minimum_for(&self, household: HouseholdType, children: u32) -> f64 {
        let base = match household {
            HouseholdType::Single => self.single,
            HouseholdType::Couple => self.couple,
        };
        base + f64::from(children) * self.per_child
    }
}

/// Nominal annual rates in percent by loan horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceRates {
    /// 10 to 15 years.
    pub short: f64,
    /// 15 to 20 years.
    pub medium: f64,
    /// 20 to 25 years.
    pub long: f64,
}

impl Default for ReferenceRates {
    fn default() -> Self {
        Self {
            short: 3.2,
            medium: 3.5,
            long: 3.8,
        }
    }
}

impl ReferenceRates {
    pub fn for_duration(&self, duration_years: u32) -> f64 {
        match duration_years {
            0..=15 => self.short,
            16..=20 => self.medium,
            _ => self.long,
        }
    }
}

/// Bounds enforced on form input before any calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub min_age: u32,
    pub max_age: u32,
    pub max_income: f64,
    pub max_down_payment: f64,
    pub min_property_price: f64,
    pub max_property_price: f64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 70,
            max_income: 100_000.0,
            max_down_payment: 2_000_000.0,
            min_property_price: 10_000.0,
            max_property_price: 5_000_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_have_lower_notary_rate() {
        let policy = UnderwritingPolicy::default();
        assert!(
            policy.notary_rate(PropertyCategory::New)
                < policy.notary_rate(PropertyCategory::Existing)
        );
    }

    #[test]
    fn overridden_ceiling_is_compliant_at_the_limit() {
        let policy = UnderwritingPolicy {
            debt_ratio_ceiling: 0.29,
            debt_ratio_alert: 0.28,
            ..UnderwritingPolicy::default()
        };
        assert_eq!(policy.ceiling_percent(), 29.0);
        assert_eq!(policy.alert_percent(), 28.0);
        assert!(!policy.exceeds_ceiling(29.0));
        assert!(!policy.exceeds_ceiling(2900.0 / 10_000.0 * 100.0));
        assert!(policy.exceeds_ceiling(29.01));
    }

    #[test]
    fn disposable_floor_adds_children_allowance() {
        let floor = DisposableIncomeFloor::default();
        assert_eq!(floor.minimum_for(HouseholdType::Couple, 2), 1800.0);
        assert_eq!(floor.minimum_for(HouseholdType::Single, 0), 800.0);
    }

    #[test]
    fn reference_rate_follows_horizon() {
        let rates = ReferenceRates::default();
        assert_eq!(rates.for_duration(12), 3.2);
        assert_eq!(rates.for_duration(20), 3.5);
        assert_eq!(rates.for_duration(25), 3.8);
    }

    #[test]
    fn partial_policy_json_keeps_defaults() {
        let policy: UnderwritingPolicy =
            serde_json::from_str(r#"{"insurance_annual_rate": 0.0036}"#).expect("valid json");
        assert_eq!(policy.insurance_annual_rate, 0.0036);
        assert_eq!(policy.debt_ratio_ceiling, 0.35);
    }
}
