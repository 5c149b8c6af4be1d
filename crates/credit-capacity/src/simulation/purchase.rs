use serde::{Deserialize, Serialize};

use super::domain::PropertyCategory;
use super::notary::{max_price_for_budget, notary_fees};
use super::policy::UnderwritingPolicy;

/// What a down payment plus a borrowing capacity can buy once closing costs are paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseCapacity {
    pub total_budget: f64,
    pub max_price: f64,
    pub estimated_notary_fees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub accessible: bool,
    /// Price plus notary fees.
    pub needed: f64,
    /// Down payment plus borrowing capacity.
    pub available: f64,
    pub shortfall: f64,
}

pub fn purchase_capacity(
    down_payment: f64,
    borrowable_capital: f64,
    category: PropertyCategory,
    policy: &UnderwritingPolicy,
) -> PurchaseCapacity {
    let total_budget = down_payment.max(0.0) + borrowable_capital.max(0.0);
    let max_price = max_price_for_budget(total_budget, category, policy);

    PurchaseCapacity {
        total_budget,
        max_price,
        estimated_notary_fees: notary_fees(max_price, category, policy).total,
    }
}

pub fn check_property_within_budget(
    price: f64,
    down_payment: f64,
    borrowable_capital: f64,
    category: PropertyCategory,
    policy: &UnderwritingPolicy,
) -> BudgetCheck {
    let needed = price.max(0.0) + notary_fees(price, category, policy).total;
    let available = down_payment.max(0.0) + borrowable_capital.max(0.0);

    BudgetCheck {
        accessible: available >= needed,
        needed,
        available,
        shortfall: (needed - available).max(0.0),
    }
}

/// Down payment needed on top of `borrowable_capital` to cover price and fees.
pub fn required_down_payment(
    price: f64,
    borrowable_capital: f64,
    category: PropertyCategory,
    policy: &UnderwritingPolicy,
) -> f64 {
    let needed = price.max(0.0) + notary_fees(price, category, policy).total;
    (needed - borrowable_capital.max(0.0)).round().max(0.0)
}
