use serde::{Deserialize, Serialize};

use super::domain::PropertyCategory;
use super::policy::UnderwritingPolicy;

/// Closing costs for a purchase with an indicative split by component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotaryFees {
    pub total: f64,
    pub rate: f64,
    pub breakdown: NotaryBreakdown,
}

/// Indicative split of the category rate. Each component is rounded on its own, so their sum
/// can differ from `total` by a few euros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotaryBreakdown {
    pub transfer_duties: f64,
    pub notary_emoluments: f64,
    pub disbursements: f64,
    pub sundry_fees: f64,
}

pub fn notary_fees(
    price: f64,
    category: PropertyCategory,
    policy: &UnderwritingPolicy,
) -> NotaryFees {
    if !(price > 0.0) {
        return NotaryFees {
            total: 0.0,
            rate: 0.0,
            breakdown: NotaryBreakdown::default(),
        };
    }

    let rate = policy.notary_rate(category);
    // Reduced VAT-regime duties on new builds, registration duties on existing ones.
    let (duties, emoluments, disbursements, sundry) = match category {
        PropertyCategory::New => (0.007, 0.01, 0.005, 0.003),
        PropertyCategory::Existing => (0.058, 0.01, 0.007, 0.005),
    };

    NotaryFees {
        total: (price * rate).round(),
        rate,
        breakdown: NotaryBreakdown {
            transfer_duties: (price * duties).round(),
            notary_emoluments: (price * emoluments).round(),
            disbursements: (price * disbursements).round(),
            sundry_fees: (price * sundry).round(),
        },
    }
}

/// Price plus closing costs.
pub fn total_acquisition_cost(
    price: f64,
    category: PropertyCategory,
    policy: &UnderwritingPolicy,
) -> f64 {
    price.max(0.0) + notary_fees(price, category, policy).total
}

/// Highest price whose price-plus-fees fits in `budget`.
pub fn max_price_for_budget(
    budget: f64,
    category: PropertyCategory,
    policy: &UnderwritingPolicy,
) -> f64 {
    if !(budget > 0.0) {
        return 0.0;
    }
    budget / (1.0 + policy.notary_rate(category))
}
