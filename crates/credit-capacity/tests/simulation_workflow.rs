use chrono::NaiveDate;
use credit_capacity::simulation::capacity::shortest_duration_for;
use credit_capacity::simulation::purchase::{check_property_within_budget, purchase_capacity};
use credit_capacity::simulation::{
    amortization_schedule, capacities_by_duration, compute_affordability_with, feasibility_report,
    plan_target_purchase, validate_simulation, with_solved_installment, write_csv,
    EmploymentStatus, FinancialProfile, HouseholdType, LoanParameters, PropertyCategory,
    TargetPurchase, UnderwritingPolicy, Verdict,
};

fn household() -> FinancialProfile {
    FinancialProfile {
        age: 31,
        employment_status: EmploymentStatus::PermanentContract,
        household: HouseholdType::Couple,
        children: 1,
        primary_income: 2800.0,
        secondary_income: 2200.0,
        existing_debt_payments: 150.0,
        ..FinancialProfile::default()
    }
}

fn loan() -> LoanParameters {
    LoanParameters {
        monthly_installment: 0.0,
        duration_years: 25,
        down_payment: 35_000.0,
        property_category: PropertyCategory::Existing,
        annual_rate_percent: 3.8,
    }
}

#[test]
fn solved_plan_is_feasible_and_scored() {
    let policy = UnderwritingPolicy::default();
    let profile = household();
    validate_simulation(&profile, &loan(), &policy).expect("form input within bounds");

    let loan = with_solved_installment(&profile, &loan(), &policy);
    assert!(loan.monthly_installment > 1_500.0);

    let report = feasibility_report(&profile, &loan, &policy);
    let affordability = &report.affordability;
    assert!(affordability.feasible);
    assert!(affordability.projected_debt_ratio <= 35.0);
    assert!(affordability.max_purchase_price < affordability.total_budget);
    assert!(report.feasibility.score >= 60, "score {}", report.feasibility.score);
    assert!(report.feasibility.verdict >= Verdict::Good);

    let capacity = purchase_capacity(
        loan.down_payment,
        affordability.borrowable_capital,
        loan.property_category,
        &policy,
    );
    assert!((capacity.max_price - affordability.max_purchase_price).abs() < 1e-6);
}

#[test]
fn target_property_within_reach_of_the_household() {
    let policy = UnderwritingPolicy::default();
    let profile = household();
    let loan = with_solved_installment(&profile, &loan(), &policy);
    let affordability = compute_affordability_with(&profile, &loan, &policy);

    let price = 250_000.0;
    let check = check_property_within_budget(
        price,
        loan.down_payment,
        affordability.borrowable_capital,
        PropertyCategory::Existing,
        &policy,
    );
    assert!(check.accessible, "shortfall {}", check.shortfall);

    let plan = plan_target_purchase(
        &TargetPurchase {
            price,
            property_category: PropertyCategory::Existing,
            down_payment: loan.down_payment,
            annual_rate_percent: loan.annual_rate_percent,
            duration_years: loan.duration_years,
        },
        &policy,
    );
    assert!(plan.min_income_ceiling <= profile.total_income());
    assert_eq!(plan.duration_variants.len(), 4);
}

#[test]
fn capacity_ladder_and_shortest_duration_agree() {
    let policy = UnderwritingPolicy::default();
    let profile = household();
    let ladder = capacities_by_duration(&profile, Some(3.8), &policy);
    let target = ladder[1].capital;

    let shortest = shortest_duration_for(target, &profile, 3.8, &policy).expect("reachable");
    assert!(shortest.duration_years <= 15);
    assert!(shortest.capital >= target);
}

#[test]
fn repayment_plan_exports_to_csv() {
    let first_due_on = NaiveDate::from_ymd_opt(2026, 11, 5).expect("valid date");
    let rows = amortization_schedule(180_000.0, 3.8, 25, Some(first_due_on));
    assert_eq!(rows.len(), 300);
    assert_eq!(rows.last().and_then(|row| row.due_on), NaiveDate::from_ymd_opt(2051, 10, 5));

    let mut buffer = Vec::new();
    write_csv(&rows, &mut buffer).expect("csv export");
    let text = String::from_utf8(buffer).expect("utf8");
    assert_eq!(text.lines().count(), 301);
    assert!(text.lines().nth(1).unwrap_or_default().starts_with("1,2026-11-05,"));
}
