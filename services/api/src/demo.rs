use crate::infra::{parse_choice, parse_date};
use chrono::NaiveDate;
use clap::Args;
use credit_capacity::config::AppConfig;
use credit_capacity::error::AppError;
use credit_capacity::simulation::apr::{
    estimate_guarantee_fee, within_usury_rate, DEFAULT_USURY_RATE_PERCENT,
};
use credit_capacity::simulation::capacity::shortest_duration_for;
use credit_capacity::simulation::debt_ratio::check_debt_ratio;
use credit_capacity::simulation::disposable::check_disposable_income;
use credit_capacity::simulation::insurance;
use credit_capacity::simulation::notary::notary_fees;
use credit_capacity::simulation::purchase::{
    check_property_within_budget, required_down_payment,
};
use credit_capacity::simulation::validation::{validate_loan_terms, validate_property_price};
use credit_capacity::simulation::{
    advise, amortization_schedule, capacities_by_duration, estimate_apr, feasibility_report,
    plan_target_purchase, validate_simulation, with_solved_installment, write_csv, AdviceReport,
    AprRequest, EmploymentStatus, FeasibilityReport, FinancialProfile, GuaranteeKind,
    HouseholdType, LoanParameters, PropertyCategory, TargetPurchase, TargetPurchasePlan,
    UnderwritingPolicy,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Broker file fee used by the walkthrough when estimating the APR.
const DEMO_APPLICATION_FEE: f64 = 900.0;

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Net monthly income of the main borrower
    #[arg(long)]
    pub(crate) income: f64,
    /// Net monthly income of the co-borrower
    #[arg(long, default_value_t = 0.0)]
    pub(crate) secondary_income: f64,
    /// Other recurring monthly income (rent received, allowances)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) other_income: f64,
    /// Monthly repayments on loans already running
    #[arg(long, default_value_t = 0.0)]
    pub(crate) debts: f64,
    /// Other fixed monthly charges (alimony, rent kept after purchase)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) charges: f64,
    #[arg(long, default_value = "single", value_parser = parse_choice::<HouseholdType>)]
    pub(crate) household: HouseholdType,
    #[arg(long, default_value_t = 0)]
    pub(crate) children: u32,
    #[arg(long, default_value_t = 35)]
    pub(crate) age: u32,
    /// permanent_contract, civil_servant, fixed_term_contract, self_employed, retired or other
    #[arg(
        long,
        default_value = "permanent_contract",
        value_parser = parse_choice::<EmploymentStatus>
    )]
    pub(crate) employment: EmploymentStatus,
    /// Loan duration in years
    #[arg(long, default_value_t = 20)]
    pub(crate) duration: u32,
    /// Nominal annual rate in percent. Defaults to the reference rate for the duration.
    #[arg(long)]
    pub(crate) rate: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) down_payment: f64,
    /// new or existing
    #[arg(long, default_value = "existing", value_parser = parse_choice::<PropertyCategory>)]
    pub(crate) category: PropertyCategory,
    /// Monthly installment excluding insurance. The highest compliant one is used when omitted.
    #[arg(long)]
    pub(crate) installment: Option<f64>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl SimulateArgs {
    fn inputs(&self, policy: &UnderwritingPolicy) -> (FinancialProfile, LoanParameters) {
        let profile = FinancialProfile {
            age: self.age,
            employment_status: self.employment,
            household: self.household,
            children: self.children,
            primary_income: self.income,
            secondary_income: self.secondary_income,
            other_income: self.other_income,
            existing_debt_payments: self.debts,
            other_fixed_charges: self.charges,
        };
        let loan = LoanParameters {
            monthly_installment: self.installment.unwrap_or(0.0),
            duration_years: self.duration,
            down_payment: self.down_payment,
            property_category: self.category,
            annual_rate_percent: self
                .rate
                .unwrap_or_else(|| policy.reference_rates.for_duration(self.duration)),
        };
        (profile, loan)
    }
}

#[derive(Args, Debug)]
pub(crate) struct TargetArgs {
    /// Asking price of the property
    #[arg(long)]
    pub(crate) price: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) down_payment: f64,
    #[arg(long, default_value = "existing", value_parser = parse_choice::<PropertyCategory>)]
    pub(crate) category: PropertyCategory,
    #[arg(long, default_value_t = 20)]
    pub(crate) duration: u32,
    /// Nominal annual rate in percent. Defaults to the reference rate for the duration.
    #[arg(long)]
    pub(crate) rate: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct ScheduleArgs {
    /// Borrowed capital
    #[arg(long)]
    pub(crate) capital: f64,
    #[arg(long, default_value_t = 20)]
    pub(crate) duration: u32,
    /// Nominal annual rate in percent. Defaults to the reference rate for the duration.
    #[arg(long)]
    pub(crate) rate: Option<f64>,
    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) first_due_on: Option<NaiveDate>,
    /// Write the CSV to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Force one nominal rate across every duration instead of the reference rates.
    #[arg(long)]
    pub(crate) rate: Option<f64>,
    /// Property price used for the budget check and the target plan.
    #[arg(long)]
    pub(crate) target_price: Option<f64>,
    /// Due date of the first installment in the schedule preview (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub(crate) first_due_on: Option<NaiveDate>,
    /// Skip the target purchase portion of the demo.
    #[arg(long)]
    pub(crate) skip_plan: bool,
}

pub(crate) fn run_simulation(args: SimulateArgs) -> Result<(), AppError> {
    let policy = AppConfig::load()?.policy;
    let (profile, loan) = args.inputs(&policy);
    validate_simulation(&profile, &loan, &policy)?;

    let loan = if args.installment.is_some() {
        loan
    } else {
        with_solved_installment(&profile, &loan, &policy)
    };
    let report = feasibility_report(&profile, &loan, &policy);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report payload unavailable: {err}"),
        }
    } else {
        render_feasibility_report(&profile, &loan, &report, &policy);
        println!();
        render_advice(&advise(&profile, &loan, &report, &policy));
    }
    Ok(())
}

pub(crate) fn run_target_plan(args: TargetArgs) -> Result<(), AppError> {
    let policy = AppConfig::load()?.policy;
    validate_property_price(args.price, &policy)?;

    let target = TargetPurchase {
        price: args.price,
        property_category: args.category,
        down_payment: args.down_payment,
        annual_rate_percent: args
            .rate
            .unwrap_or_else(|| policy.reference_rates.for_duration(args.duration)),
        duration_years: args.duration,
    };
    let plan = plan_target_purchase(&target, &policy);
    render_target_plan(&target, &plan);
    Ok(())
}

pub(crate) fn run_schedule_export(args: ScheduleArgs) -> Result<(), AppError> {
    let policy = AppConfig::load()?.policy;
    validate_loan_terms(args.capital, args.duration, &policy)?;

    let rate = args
        .rate
        .unwrap_or_else(|| policy.reference_rates.for_duration(args.duration));
    let rows = amortization_schedule(args.capital, rate, args.duration, args.first_due_on);

    match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            write_csv(&rows, BufWriter::new(file))?;
            println!(
                "Wrote {} monthly installments at {:.2}% to {}",
                rows.len(),
                rate,
                path.display()
            );
        }
        None => write_csv(&rows, std::io::stdout().lock())?,
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        rate,
        target_price,
        first_due_on,
        skip_plan,
    } = args;

    let policy = AppConfig::load()?.policy;
    let profile = demo_household();
    let mut loan = LoanParameters {
        duration_years: 25,
        down_payment: 35_000.0,
        property_category: PropertyCategory::Existing,
        annual_rate_percent: rate.unwrap_or_else(|| policy.reference_rates.for_duration(25)),
        ..LoanParameters::default()
    };
    let target_price = target_price.unwrap_or(250_000.0);

    println!("Credit capacity demo");
    println!(
        "- {} household, {} child(ren), {:.0} EUR net monthly income, {:.0} EUR existing charges",
        profile.household.label(),
        profile.children,
        profile.total_income(),
        profile.existing_charges()
    );

    println!("\nBorrowing capacity by duration");
    let ladder = capacities_by_duration(&profile, rate, &policy);
    for capacity in &ladder {
        println!(
            "  - {} years at {:.2}%: {:.0} EUR/month -> {:.0} EUR ({:.0} EUR per EUR/month)",
            capacity.duration_years,
            capacity.annual_rate_percent,
            capacity.max_installment,
            capacity.capital,
            capacity.capital_per_installment
        );
    }
    if let Some(medium) = ladder.get(1) {
        match shortest_duration_for(medium.capital, &profile, loan.annual_rate_percent, &policy) {
            Some(shortest) => println!(
                "  Shortest duration reaching {:.0} EUR at {:.2}%: {} years",
                medium.capital, loan.annual_rate_percent, shortest.duration_years
            ),
            None => println!("  No allowed duration reaches {:.0} EUR", medium.capital),
        }
    }

    loan = with_solved_installment(&profile, &loan, &policy);
    let report = feasibility_report(&profile, &loan, &policy);
    println!();
    render_feasibility_report(&profile, &loan, &report, &policy);
    println!();
    render_advice(&advise(&profile, &loan, &report, &policy));

    let borrowable = report.affordability.borrowable_capital;
    println!("\nTarget property at {:.0} EUR", target_price);
    let fees = notary_fees(target_price, loan.property_category, &policy);
    println!("- Notary fees {:.0} EUR ({:.1}%)", fees.total, fees.rate * 100.0);
    println!(
        "  duties {:.0} | emoluments {:.0} | disbursements {:.0} | sundry {:.0}",
        fees.breakdown.transfer_duties,
        fees.breakdown.notary_emoluments,
        fees.breakdown.disbursements,
        fees.breakdown.sundry_fees
    );
    let check = check_property_within_budget(
        target_price,
        loan.down_payment,
        borrowable,
        loan.property_category,
        &policy,
    );
    if check.accessible {
        println!(
            "- Within budget: {:.0} EUR needed, {:.0} EUR available",
            check.needed, check.available
        );
    } else {
        println!(
            "- Out of budget by {:.0} EUR; a down payment of {:.0} EUR would close the gap",
            check.shortfall,
            required_down_payment(target_price, borrowable, loan.property_category, &policy)
        );
    }

    println!("\nBorrower insurance on {:.0} EUR", borrowable);
    let offers = [0.0010, 0.0025, policy.insurance_annual_rate];
    for quote in insurance::compare(borrowable, loan.duration_years, &offers) {
        println!(
            "  - {:.2}%/year: {:.2} EUR/month | {:.0} EUR in total | effective {:.2}%",
            quote.annual_rate * 100.0,
            quote.monthly_premium,
            quote.total_premium,
            quote.effective_rate_percent
        );
    }

    let guarantee = GuaranteeKind::default();
    let apr = estimate_apr(&AprRequest {
        capital: borrowable,
        annual_rate_percent: loan.annual_rate_percent,
        duration_years: loan.duration_years,
        application_fee: DEMO_APPLICATION_FEE,
        guarantee_fee: estimate_guarantee_fee(borrowable, guarantee),
        insurance_annual_rate: policy.insurance_annual_rate,
    });
    println!(
        "\nEstimated APR {:.2}% ({} usury cap of {:.2}%)",
        apr.apr_percent,
        if within_usury_rate(apr.apr_percent, DEFAULT_USURY_RATE_PERCENT) {
            "within the"
        } else {
            "above the"
        },
        DEFAULT_USURY_RATE_PERCENT
    );
    println!("- Credit cost {:.0} EUR", apr.total_cost);
    println!(
        "  interest {:.0} | insurance {:.0} | file fee {:.0} | guarantee {:.0}",
        apr.breakdown.interest,
        apr.breakdown.insurance,
        apr.breakdown.application_fee,
        apr.breakdown.guarantee_fee
    );

    let rows = amortization_schedule(
        borrowable,
        loan.annual_rate_percent,
        loan.duration_years,
        first_due_on,
    );
    println!("\nRepayment schedule preview ({} installments)", rows.len());
    let preview = rows.iter().take(3).chain(rows.last());
    for row in preview {
        let due = row
            .due_on
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("month {}", row.month));
        println!(
            "  - {}: {:.2} EUR = {:.2} interest + {:.2} principal, {:.2} EUR remaining",
            due, row.installment, row.interest, row.principal, row.remaining
        );
    }

    if skip_plan {
        return Ok(());
    }

    let target = TargetPurchase {
        price: target_price,
        property_category: loan.property_category,
        down_payment: loan.down_payment,
        annual_rate_percent: loan.annual_rate_percent,
        duration_years: loan.duration_years,
    };
    println!();
    render_target_plan(&target, &plan_target_purchase(&target, &policy));

    Ok(())
}

fn demo_household() -> FinancialProfile {
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

fn render_feasibility_report(
    profile: &FinancialProfile,
    loan: &LoanParameters,
    report: &FeasibilityReport,
    policy: &UnderwritingPolicy,
) {
    let result = &report.affordability;
    println!(
        "Affordability over {} years at {:.2}% ({})",
        loan.duration_years,
        loan.annual_rate_percent,
        loan.property_category.label()
    );
    println!(
        "- Installment {:.0} EUR + insurance {:.2} EUR = {:.2} EUR per month",
        result.monthly_installment, result.monthly_insurance, result.total_monthly_cost
    );
    println!(
        "- Borrowable capital {:.0} EUR | interest cost {:.0} EUR",
        result.borrowable_capital, result.total_interest_cost
    );

    let ratio = check_debt_ratio(result.projected_debt_ratio, policy);
    println!(
        "- Debt ratio {:.1}% today -> {:.1}% with the project: {}",
        result.current_debt_ratio, result.projected_debt_ratio, ratio.message
    );
    println!(
        "- Recommended installment without insurance: {:.0} EUR",
        result.minimum_recommended_installment
    );

    let disposable = check_disposable_income(result.disposable_income, profile, policy);
    println!(
        "- Disposable income {:.0} EUR (minimum {:.0}, margin {:.0}): {}",
        disposable.amount,
        disposable.minimum,
        disposable.margin,
        disposable.level.label()
    );
    println!(
        "- Budget {:.0} EUR buys up to {:.0} EUR with {:.0} EUR notary fees ({:.1}%)",
        result.total_budget,
        result.max_purchase_price,
        result.notary_fees,
        result.notary_rate * 100.0
    );

    if result.alerts.is_empty() {
        println!("- Alerts: none");
    } else {
        println!("- Alerts:");
        for alert in &result.alerts {
            println!("    - {}", alert.message);
        }
    }

    let score = &report.feasibility;
    println!(
        "Feasibility score {}/100: {} ({})",
        score.score,
        score.verdict.label(),
        if result.feasible { "feasible" } else { "not feasible" }
    );
    for criterion in &score.criteria {
        println!(
            "  - {}: {}/{} ({})",
            criterion.label, criterion.achieved, criterion.maximum, criterion.comment
        );
    }
}

fn render_advice(advice: &AdviceReport) {
    let diagnostic = &advice.diagnostic;
    println!(
        "Bank diagnostic: {} approval likelihood, about {} to an offer",
        diagnostic.approval_likelihood.label(),
        diagnostic.estimated_turnaround
    );
    for strength in &diagnostic.strengths {
        println!("  + {strength}");
    }
    for point in &diagnostic.watch_points {
        println!("  ! {point}");
    }

    if advice.ptz.eligible {
        println!(
            "- Zero-rate loan: eligible up to {:.0} EUR (household of {}, ceiling {:.0} EUR)",
            advice.ptz.max_amount, advice.ptz.household_size, advice.ptz.income_ceiling
        );
    }

    if advice.scenarios.is_empty() {
        println!("- No alternative scenario improves this file");
        return;
    }
    println!("Alternative scenarios:");
    for scenario in &advice.scenarios {
        println!(
            "  - {}{}: up to {:.0} EUR ({:+.0}) at {:.2}%, {:.0} EUR/month",
            scenario.title,
            if scenario.recommended { " (recommended)" } else { "" },
            scenario.max_purchase_price,
            scenario.budget_change,
            scenario.annual_rate_percent,
            scenario.monthly_installment
        );
        for advantage in &scenario.advantages {
            println!("      + {advantage}");
        }
        for drawback in &scenario.drawbacks {
            println!("      - {drawback}");
        }
    }
}

fn render_target_plan(target: &TargetPurchase, plan: &TargetPurchasePlan) {
    println!(
        "Target purchase plan for {:.0} EUR ({}) over {} years at {:.2}%",
        target.price,
        target.property_category.label(),
        target.duration_years,
        target.annual_rate_percent
    );
    println!(
        "- Project cost {:.0} EUR: notary {:.0} | ancillary {:.0}",
        plan.project_cost, plan.notary_fees, plan.ancillary_fees
    );
    println!(
        "- Borrow {:.0} EUR | surplus down payment {:.0} EUR",
        plan.amount_to_borrow, plan.surplus_down_payment
    );
    println!(
        "- Monthly {:.2} EUR credit + {:.2} EUR insurance = {:.2} EUR",
        plan.credit_installment, plan.insurance_installment, plan.total_installment
    );
    println!(
        "- Net income needed: {:.0} EUR for comfort, {:.0} EUR at the ceiling",
        plan.min_income_comfort, plan.min_income_ceiling
    );
    println!(
        "- Down payment: minimum {:.0} EUR, ideal {:.0} EUR ({})",
        plan.minimum_down_payment,
        plan.ideal_down_payment,
        if plan.down_payment_sufficient {
            "sufficient"
        } else {
            "insufficient"
        }
    );
    println!("- Credit cost {:.0} EUR", plan.total_credit_cost);
    println!("Other durations:");
    for variant in &plan.duration_variants {
        println!(
            "  - {} years: {:.2} EUR/month | income from {:.0} EUR | {:.0} EUR repaid",
            variant.duration_years,
            variant.total_installment,
            variant.min_income,
            variant.total_repaid
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulate_args() -> SimulateArgs {
        SimulateArgs {
            income: 3000.0,
            secondary_income: 0.0,
            other_income: 0.0,
            debts: 0.0,
            charges: 0.0,
            household: HouseholdType::Single,
            children: 0,
            age: 34,
            employment: EmploymentStatus::PermanentContract,
            duration: 20,
            rate: None,
            down_payment: 20_000.0,
            category: PropertyCategory::Existing,
            installment: None,
            json: false,
        }
    }

    #[test]
    fn simulate_inputs_fall_back_to_reference_rate() {
        let policy = UnderwritingPolicy::default();
        let (profile, loan) = simulate_args().inputs(&policy);

        assert_eq!(profile.total_income(), 3000.0);
        assert_eq!(loan.annual_rate_percent, 3.5);
        assert_eq!(loan.monthly_installment, 0.0);

        let forced = SimulateArgs {
            rate: Some(4.1),
            duration: 25,
            installment: Some(950.0),
            ..simulate_args()
        };
        let (_, loan) = forced.inputs(&policy);
        assert_eq!(loan.annual_rate_percent, 4.1);
        assert_eq!(loan.monthly_installment, 950.0);
    }

    #[test]
    fn demo_household_passes_validation() {
        let policy = UnderwritingPolicy::default();
        let loan = LoanParameters {
            duration_years: 25,
            annual_rate_percent: 3.8,
            ..LoanParameters::default()
        };
        assert!(validate_simulation(&demo_household(), &loan, &policy).is_ok());
    }

    #[test]
    fn demo_household_advice_credits_the_permanent_contract() {
        let policy = UnderwritingPolicy::default();
        let profile = demo_household();
        let loan = with_solved_installment(
            &profile,
            &LoanParameters {
                duration_years: 25,
                down_payment: 35_000.0,
                annual_rate_percent: 3.8,
                ..LoanParameters::default()
            },
            &policy,
        );
        let report = feasibility_report(&profile, &loan, &policy);
        let advice = advise(&profile, &loan, &report, &policy);

        assert!(advice.diagnostic.strengths[0].contains("Permanent contract"));
        assert!(advice.ptz.eligible);
        assert!(advice.scenarios.len() <= 3);
    }
}
