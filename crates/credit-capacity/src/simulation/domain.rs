use serde::{Deserialize, Serialize};

/// Employment situation of the main borrower, as banks classify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    #[default]
    PermanentContract,
    CivilServant,
    FixedTermContract,
    SelfEmployed,
    Retired,
    Other,
}

impl EmploymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PermanentContract => "Permanent contract",
            Self::CivilServant => "Civil servant",
            Self::FixedTermContract => "Fixed-term contract",
            Self::SelfEmployed => "Self-employed",
            Self::Retired => "Retired",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdType {
    #[default]
    Single,
    Couple,
}

impl HouseholdType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Couple => "Couple",
        }
    }
}

/// New builds carry reduced notary fees compared with existing properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    New,
    #[default]
    Existing,
}

impl PropertyCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New build",
            Self::Existing => "Existing property",
        }
    }
}

/// Household finances entered by the borrower. Amounts are net and monthly, in euros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    pub age: u32,
    pub employment_status: EmploymentStatus,
    pub household: HouseholdType,
    pub children: u32,
    pub primary_income: f64,
    pub secondary_income: f64,
    pub other_income: f64,
    pub existing_debt_payments: f64,
    pub other_fixed_charges: f64,
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            age: 35,
            employment_status: EmploymentStatus::default(),
            household: HouseholdType::default(),
            children: 0,
            primary_income: 0.0,
            secondary_income: 0.0,
            other_income: 0.0,
            existing_debt_payments: 0.0,
            other_fixed_charges: 0.0,
        }
    }
}

impl FinancialProfile {
    pub fn total_income(&self) -> f64 {
        self.primary_income + self.secondary_income + self.other_income
    }

    pub fn existing_charges(&self) -> f64 {
        self.existing_debt_payments + self.other_fixed_charges
    }
}

/// Loan settings chosen for the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanParameters {
    /// Installment excluding insurance. Either solver-derived or set by the borrower.
    pub monthly_installment: f64,
    pub duration_years: u32,
    pub down_payment: f64,
    pub property_category: PropertyCategory,
    /// Nominal annual rate as a percentage, e.g. `3.5`.
    pub annual_rate_percent: f64,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            monthly_installment: 0.0,
            duration_years: 20,
            down_payment: 0.0,
            property_category: PropertyCategory::default(),
            annual_rate_percent: 3.5,
        }
    }
}

impl LoanParameters {
    pub fn months(&self) -> u32 {
        self.duration_years.saturating_mul(12)
    }
}

/// How the household's remaining income compares to the recommended floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdequacyLevel {
    Comfortable,
    Borderline,
    AtRisk,
}

impl AdequacyLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Comfortable => "Comfortable",
            Self::Borderline => "Borderline",
            Self::AtRisk => "At risk",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_sums_incomes_and_charges() {
        let profile = FinancialProfile {
            primary_income: 2800.0,
            secondary_income: 2200.0,
            other_income: 500.0,
            existing_debt_payments: 250.0,
            other_fixed_charges: 100.0,
            ..FinancialProfile::default()
        };

        assert_eq!(profile.total_income(), 5500.0);
        assert_eq!(profile.existing_charges(), 350.0);
    }

    #[test]
    fn missing_fields_deserialize_to_zero_amounts() {
        let profile: FinancialProfile =
            serde_json::from_str(r#"{"age": 41, "household": "couple"}"#).expect("valid json");

        assert_eq!(profile.age, 41);
        assert_eq!(profile.household, HouseholdType::Couple);
        assert_eq!(profile.total_income(), 0.0);
        assert_eq!(profile.existing_charges(), 0.0);
    }

    #[test]
    fn employment_status_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&EmploymentStatus::FixedTermContract).expect("serializes");
        assert_eq!(json, "\"fixed_term_contract\"");
    }
}
