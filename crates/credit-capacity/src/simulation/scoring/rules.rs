use super::super::domain::EmploymentStatus;
use super::{CriterionKind, FeasibilityInput, ScoreCriterion};

/// `(bound, points)` pairs, best tier first.
type Tiers = [(f64, u8)];

const DEBT_RATIO_TIERS: [(f64, u8); 5] =
    [(25.0, 25), (28.0, 22), (30.0, 19), (33.0, 12), (35.0, 4)];
const DISPOSABLE_MULTIPLE_TIERS: [(f64, u8); 5] =
    [(2.0, 20), (1.5, 16), (1.2, 12), (1.0, 7), (0.8, 3)];
const DOWN_PAYMENT_SHARE_TIERS: [(f64, u8); 5] =
    [(30.0, 15), (20.0, 13), (15.0, 11), (10.0, 8), (5.0, 5)];
const AGE_AT_TERM_TIERS: [(f64, u8); 5] = [(60.0, 10), (65.0, 9), (70.0, 6), (75.0, 3), (80.0, 1)];
const EXISTING_DEBT_TIERS: [(f64, u8); 5] = [(0.0, 5), (5.0, 4), (10.0, 3), (15.0, 2), (20.0, 1)];
const INCOME_TIERS: [(f64, u8); 5] =
    [(5000.0, 10), (3500.0, 8), (2500.0, 6), (1800.0, 4), (1200.0, 2)];

/// Points when the household minimum is unknown.
const DISPOSABLE_NEUTRAL_POINTS: u8 = 10;
/// Points for any down payment below the first tier.
const TOKEN_DOWN_PAYMENT_POINTS: u8 = 2;

/// Points of the first tier whose upper bound the value does not exceed.
fn points_at_most(value: f64, tiers: &Tiers) -> u8 {
    tiers
        .iter()
        .find(|(bound, _)| value <= *bound)
        .map_or(0, |(_, points)| *points)
}

/// Points of the first tier whose lower bound the value reaches.
fn points_at_least(value: f64, tiers: &Tiers) -> u8 {
    tiers
        .iter()
        .find(|(bound, _)| value >= *bound)
        .map_or(0, |(_, points)| *points)
}

fn criterion(kind: CriterionKind, achieved: u8, comment: String) -> ScoreCriterion {
    ScoreCriterion {
        criterion: kind,
        label: kind.label().to_string(),
        achieved,
        maximum: kind.maximum(),
        comment,
    }
}

fn debt_ratio(input: &FeasibilityInput) -> ScoreCriterion {
    let ratio = input.projected_debt_ratio;
    let achieved = points_at_most(ratio, &DEBT_RATIO_TIERS);
    let comment = match achieved {
        25 => format!("{ratio:.1}% leaves a wide margin under the ceiling"),
        22 | 19 => format!("{ratio:.1}% is comfortable"),
        12 => format!("{ratio:.1}% is within usual bank practice"),
        4 => format!("{ratio:.1}% sits at the regulatory limit"),
        _ => format!("{ratio:.1}% is above the 35% ceiling"),
    };
    criterion(CriterionKind::DebtRatio, achieved, comment)
}

fn disposable_income(input: &FeasibilityInput) -> ScoreCriterion {
    let minimum = input.minimum_disposable_income;
    if !(minimum > 0.0) {
        return criterion(
            CriterionKind::DisposableIncome,
            DISPOSABLE_NEUTRAL_POINTS,
            "no household minimum to compare against".to_string(),
        );
    }

    let multiple = input.disposable_income / minimum;
    let achieved = points_at_least(multiple, &DISPOSABLE_MULTIPLE_TIERS);
    let comment = format!(
        "{:.0} EUR left each month, {multiple:.1}x the {minimum:.0} EUR minimum",
        input.disposable_income
    );
    criterion(CriterionKind::DisposableIncome, achieved, comment)
}

fn down_payment(input: &FeasibilityInput) -> ScoreCriterion {
    let share = input.down_payment_share_percent();
    let achieved = match points_at_least(share, &DOWN_PAYMENT_SHARE_TIERS) {
        0 if share > 0.0 => TOKEN_DOWN_PAYMENT_POINTS,
        points => points,
    };
    let comment = if share > 0.0 {
        format!("down payment covers {share:.1}% of the purchase price")
    } else {
        "no down payment".to_string()
    };
    criterion(CriterionKind::DownPayment, achieved, comment)
}

fn employment_points(status: EmploymentStatus) -> u8 {
    match status {
        EmploymentStatus::CivilServant => 15,
        EmploymentStatus::PermanentContract => 14,
        EmploymentStatus::Retired => 10,
        EmploymentStatus::SelfEmployed => 8,
        EmploymentStatus::Other => 7,
        EmploymentStatus::FixedTermContract => 5,
    }
}

fn employment(input: &FeasibilityInput) -> ScoreCriterion {
    let status = input.employment_status;
    criterion(
        CriterionKind::EmploymentStability,
        employment_points(status),
        format!("{} income", status.label().to_lowercase()),
    )
}

fn age_at_term(input: &FeasibilityInput) -> ScoreCriterion {
    let age = input.age_at_term();
    let achieved = points_at_most(f64::from(age), &AGE_AT_TERM_TIERS);
    let comment = if achieved >= 9 {
        format!("loan ends at {age}, before retirement")
    } else {
        format!("loan runs until age {age}")
    };
    criterion(CriterionKind::AgeAtTerm, achieved, comment)
}

fn existing_debt(input: &FeasibilityInput) -> ScoreCriterion {
    let ratio = input.current_debt_ratio;
    let achieved = points_at_most(ratio, &EXISTING_DEBT_TIERS);
    let comment = if ratio > 0.0 {
        format!("existing loans take {ratio:.1}% of income")
    } else {
        "no existing loans".to_string()
    };
    criterion(CriterionKind::ExistingDebt, achieved, comment)
}

fn income_level(input: &FeasibilityInput) -> ScoreCriterion {
    let income = input.income;
    criterion(
        CriterionKind::IncomeLevel,
        points_at_least(income, &INCOME_TIERS),
        format!("{income:.0} EUR net per month"),
    )
}

/// Criteria in display order, each capped at its own maximum.
pub(crate) fn score_criteria(input: &FeasibilityInput) -> Vec<ScoreCriterion> {
    vec![
        debt_ratio(input),
        disposable_income(input),
        down_payment(input),
        employment(input),
        age_at_term(input),
        existing_debt(input),
        income_level(input),
    ]
}
