use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::AdviceContext;
use crate::simulation::amortization::capital_from_installment;
use crate::simulation::domain::{HouseholdType, PropertyCategory};
use crate::simulation::notary::max_price_for_budget;
use crate::simulation::policy::UnderwritingPolicy;

/// Scenarios shown to the borrower at once.
pub const MAX_SCENARIOS: usize = 3;

const SAFER_DEBT_RATIO: f64 = 0.30;
const SAFER_TRIGGER_PERCENT: f64 = 32.0;
const MIN_INSTALLMENT_SAVING: f64 = 50.0;
const MIN_CHARGES_TO_REDUCE: f64 = 200.0;
const MIN_BUDGET_GAIN: f64 = 5_000.0;
const EXTRA_DOWN_PAYMENT: f64 = 10_000.0;
const RATE_FLOOR_PERCENT: f64 = 2.5;
const EXTRA_YEARS: u32 = 5;
const LONGER_DURATION_RATE_PREMIUM: f64 = 0.1;
const MAX_AGE_AT_TERM: u32 = 75;
const CO_BORROWER_INCOME_FACTOR: f64 = 1.6;
const CO_BORROWER_DEBT_RATIO: f64 = 0.33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    ZeroRateLoan,
    SaferInstallment,
    ReduceExistingDebt,
    LargerDownPayment,
    LongerDuration,
    CoBorrower,
    NewBuild,
}

impl ScenarioKind {
    /// Ranking weight, higher first.
    pub const fn weight(self) -> u8 {
        match self {
            Self::ZeroRateLoan => 95,
            Self::SaferInstallment => 90,
            Self::ReduceExistingDebt => 85,
            Self::LargerDownPayment => 80,
            Self::LongerDuration => 70,
            Self::CoBorrower => 65,
            Self::NewBuild => 60,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::ZeroRateLoan => "With a zero-rate loan",
            Self::SaferInstallment => "Safer installment",
            Self::ReduceExistingDebt => "Pay down existing loans",
            Self::LargerDownPayment => "With 10 000 EUR more down payment",
            Self::LongerDuration => "Borrow over 5 more years",
            Self::CoBorrower => "With a co-borrower",
            Self::NewBuild => "Switch to a new build",
        }
    }
}

/// Loan settings a scenario changes. `None` keeps the simulated value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAdjustment {
    pub down_payment: Option<f64>,
    pub duration_years: Option<u32>,
    pub monthly_installment: Option<f64>,
    pub property_category: Option<PropertyCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub title: String,
    pub adjustment: ScenarioAdjustment,
    pub max_purchase_price: f64,
    pub annual_rate_percent: f64,
    pub monthly_installment: f64,
    /// Purchase price gained (or lost when negative) against the simulated file.
    pub budget_change: f64,
    pub advantages: Vec<String>,
    pub drawbacks: Vec<String>,
    pub recommended: bool,
}

impl Scenario {
    fn new(kind: ScenarioKind, ctx: &AdviceContext, max_purchase_price: f64) -> Self {
        let price = max_purchase_price.max(0.0).round();
        Self {
            kind,
            title: kind.title().to_string(),
            adjustment: ScenarioAdjustment::default(),
            max_purchase_price: price,
            annual_rate_percent: ctx.annual_rate_percent,
            monthly_installment: ctx.monthly_installment,
            budget_change: price - ctx.max_purchase_price.round(),
            advantages: Vec::new(),
            drawbacks: Vec::new(),
            recommended: false,
        }
    }
}

type ScenarioRule = fn(&AdviceContext, &UnderwritingPolicy) -> Option<Scenario>;

const RULES: [ScenarioRule; 7] = [
    zero_rate_loan,
    safer_installment,
    reduce_existing_debt,
    larger_down_payment,
    longer_duration,
    co_borrower,
    new_build,
];

/// Applicable scenarios, heaviest first, capped at [`MAX_SCENARIOS`].
pub fn alternative_scenarios(ctx: &AdviceContext, policy: &UnderwritingPolicy) -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> =
        RULES.iter().filter_map(|rule| rule(ctx, policy)).collect();
    scenarios.sort_by_key(|scenario| Reverse(scenario.kind.weight()));
    scenarios.truncate(MAX_SCENARIOS);
    scenarios
}

fn price_for(budget: f64, ctx: &AdviceContext, policy: &UnderwritingPolicy) -> f64 {
    max_price_for_budget(budget, ctx.property_category, policy)
}

fn zero_rate_loan(ctx: &AdviceContext, policy: &UnderwritingPolicy) -> Option<Scenario> {
    if !ctx.ptz.eligible {
        return None;
    }

    let amount = ctx.ptz.max_amount;
    let budget = ctx.down_payment + ctx.borrowable_capital + amount;
    let base = Scenario::new(ScenarioKind::ZeroRateLoan, ctx, price_for(budget, ctx, policy));
    let location = match ctx.property_category {
        PropertyCategory::New => "New builds and off-plan purchases qualify",
        PropertyCategory::Existing => "Existing homes only qualify in zones B2 and C",
    };

    Some(Scenario {
        advantages: vec![
            format!("Purchase budget +{:.0} EUR", base.budget_change),
            format!("{amount:.0} EUR borrowed at 0%"),
            "Repayment deferral of 5 to 15 years possible".to_string(),
        ],
        drawbacks: vec![
            "Subject to income ceilings".to_string(),
            location.to_string(),
        ],
        recommended: true,
        annual_rate_percent: 0.0,
        ..base
    })
}

fn safer_installment(ctx: &AdviceContext, policy: &UnderwritingPolicy) -> Option<Scenario> {
    if ctx.projected_debt_ratio <= SAFER_TRIGGER_PERCENT {
        return None;
    }

    let installment = (ctx.income * SAFER_DEBT_RATIO - ctx.existing_charges)
        .round()
        .max(0.0);
    let saving = ctx.monthly_installment - installment;
    if saving <= MIN_INSTALLMENT_SAVING {
        return None;
    }

    let capital =
        capital_from_installment(installment, ctx.annual_rate_percent, ctx.duration_years);
    let base = Scenario::new(
        ScenarioKind::SaferInstallment,
        ctx,
        price_for(ctx.down_payment + capital, ctx, policy),
    );

    Some(Scenario {
        adjustment: ScenarioAdjustment {
            monthly_installment: Some(installment),
            ..ScenarioAdjustment::default()
        },
        monthly_installment: installment,
        advantages: vec![
            "Debt ratio held at 30%".to_string(),
            format!("Monthly saving of {saving:.0} EUR"),
            "Stronger file for the bank".to_string(),
        ],
        drawbacks: vec![format!(
            "Purchase budget reduced by {:.0} EUR",
            -base.budget_change
        )],
        recommended: ctx.score < 70,
        ..base
    })
}

fn reduce_existing_debt(ctx: &AdviceContext, policy: &UnderwritingPolicy) -> Option<Scenario> {
    if ctx.existing_charges < MIN_CHARGES_TO_REDUCE {
        return None;
    }

    let freed = (ctx.existing_charges * 0.5).round();
    let installment = ctx.monthly_installment + freed;
    let capital =
        capital_from_installment(installment, ctx.annual_rate_percent, ctx.duration_years);
    let base = Scenario::new(
        ScenarioKind::ReduceExistingDebt,
        ctx,
        price_for(ctx.down_payment + capital, ctx, policy),
    );
    if base.budget_change <= MIN_BUDGET_GAIN {
        return None;
    }

    Some(Scenario {
        adjustment: ScenarioAdjustment {
            monthly_installment: Some(installment),
            ..ScenarioAdjustment::default()
        },
        monthly_installment: installment,
        advantages: vec![
            format!("Purchase budget +{:.0} EUR", base.budget_change),
            format!("{freed:.0} EUR of monthly headroom freed"),
        ],
        drawbacks: vec!["Uses part of the savings to repay early".to_string()],
        recommended: ctx.projected_debt_ratio > 33.0,
        ..base
    })
}

fn larger_down_payment(ctx: &AdviceContext, policy: &UnderwritingPolicy) -> Option<Scenario> {
    if ctx.down_payment_share_percent() >= 25.0 {
        return None;
    }

    let down_payment = ctx.down_payment + EXTRA_DOWN_PAYMENT;
    let price = price_for(down_payment + ctx.borrowable_capital, ctx, policy);
    let share = if price > 0.0 { down_payment / price * 100.0 } else { 0.0 };
    let rate_gain = if share >= 20.0 { 0.15 } else { 0.05 };
    let rate = (ctx.annual_rate_percent - rate_gain)
        .max(RATE_FLOOR_PERCENT)
        .min(ctx.annual_rate_percent);
    let base = Scenario::new(ScenarioKind::LargerDownPayment, ctx, price);

    let negotiation = if ctx.annual_rate_percent - rate > 0.1 {
        format!("Rate negotiable down to {rate:.2}%")
    } else {
        "Stronger file for the bank".to_string()
    };

    Some(Scenario {
        adjustment: ScenarioAdjustment {
            down_payment: Some(down_payment),
            ..ScenarioAdjustment::default()
        },
        annual_rate_percent: rate,
        advantages: vec![
            format!("Down payment reaches {share:.0}% of the price"),
            format!("Purchase budget +{:.0} EUR", base.budget_change),
            negotiation,
        ],
        drawbacks: vec![
            format!("Requires {EXTRA_DOWN_PAYMENT:.0} EUR of extra savings"),
            "Postpones the purchase by a few months".to_string(),
        ],
        recommended: ctx.down_payment_share_percent() < 15.0,
        ..base
    })
}

fn longer_duration(ctx: &AdviceContext, policy: &UnderwritingPolicy) -> Option<Scenario> {
    let duration = ctx.duration_years.saturating_add(EXTRA_YEARS);
    if duration > policy.max_duration_years
        || ctx.age.saturating_add(duration) > MAX_AGE_AT_TERM
    {
        return None;
    }

    let rate = ctx.annual_rate_percent + LONGER_DURATION_RATE_PREMIUM;
    let capital = capital_from_installment(ctx.monthly_installment, rate, duration);
    let base = Scenario::new(
        ScenarioKind::LongerDuration,
        ctx,
        price_for(ctx.down_payment + capital, ctx, policy),
    );
    let extra_cost = ctx.monthly_installment * f64::from(EXTRA_YEARS * 12);

    Some(Scenario {
        adjustment: ScenarioAdjustment {
            duration_years: Some(duration),
            ..ScenarioAdjustment::default()
        },
        annual_rate_percent: rate,
        advantages: vec![
            format!("Purchase budget +{:.0} EUR", base.budget_change),
            "Same monthly installment".to_string(),
        ],
        drawbacks: vec![
            format!("Credit cost +{extra_cost:.0} EUR"),
            "Slightly higher rate (+0.10 point)".to_string(),
        ],
        ..base
    })
}

fn co_borrower(ctx: &AdviceContext, policy: &UnderwritingPolicy) -> Option<Scenario> {
    if ctx.household != HouseholdType::Single || ctx.score >= 80 {
        return None;
    }

    let income = ctx.income * CO_BORROWER_INCOME_FACTOR;
    let installment = (income * CO_BORROWER_DEBT_RATIO - ctx.existing_charges)
        .round()
        .max(0.0);
    let capital =
        capital_from_installment(installment, ctx.annual_rate_percent, ctx.duration_years);
    let base = Scenario::new(
        ScenarioKind::CoBorrower,
        ctx,
        price_for(ctx.down_payment + capital, ctx, policy),
    );

    Some(Scenario {
        adjustment: ScenarioAdjustment {
            monthly_installment: Some(installment),
            ..ScenarioAdjustment::default()
        },
        monthly_installment: installment,
        advantages: vec![
            format!("Estimated purchase budget {:.0} EUR", base.max_purchase_price),
            "Repayments shared between two borrowers".to_string(),
        ],
        drawbacks: vec![
            "Joint and several liability for the debt".to_string(),
            "Requires a creditworthy co-borrower".to_string(),
        ],
        recommended: ctx.score < 60,
        ..base
    })
}

fn new_build(ctx: &AdviceContext, policy: &UnderwritingPolicy) -> Option<Scenario> {
    if ctx.property_category != PropertyCategory::Existing {
        return None;
    }

    let budget = ctx.down_payment + ctx.borrowable_capital;
    let price = max_price_for_budget(budget, PropertyCategory::New, policy);
    let base = Scenario::new(ScenarioKind::NewBuild, ctx, price);
    if base.budget_change <= MIN_BUDGET_GAIN {
        return None;
    }

    Some(Scenario {
        adjustment: ScenarioAdjustment {
            property_category: Some(PropertyCategory::New),
            ..ScenarioAdjustment::default()
        },
        advantages: vec![
            format!("Purchase budget +{:.0} EUR", base.budget_change),
            "Reduced notary fees".to_string(),
            "Opens the zero-rate loan in every zone".to_string(),
        ],
        drawbacks: vec![
            "Narrower choice of locations".to_string(),
            "Delivery delay for off-plan purchases".to_string(),
        ],
        recommended: true,
        ..base
    })
}
