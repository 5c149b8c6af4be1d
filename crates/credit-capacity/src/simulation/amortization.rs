//! Level-installment arithmetic and the insurance-aware installment solver.

/// Per-month multiplier converting principal into a level installment.
///
/// Falls back to straight-line repayment (`1/n`) when the rate is not positive and returns `0`
/// when there is no repayment period at all.
pub fn amortization_factor(annual_rate_percent: f64, duration_years: u32) -> f64 {
    let months = duration_years.saturating_mul(12);
    if months == 0 {
        return 0.0;
    }

    let n = f64::from(months);
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate > 0.0 && monthly_rate.is_finite() {
        monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-n))
    } else {
        1.0 / n
    }
}

/// Largest whole-euro installment (insurance excluded) keeping
/// `(existing_charges + installment + insurance) / income` at or below the ceiling.
///
/// Insurance is proportional to the capital implied by the installment
/// (`capital = installment / f`), so the ceiling equation is linear in the installment and is
/// solved in closed form: `installment = (income * ceiling - charges) / (1 + ins / (12 f))`.
/// The result is floored so the ratio recomputed from it never crosses the ceiling.
pub fn solve_max_installment(
    income: f64,
    existing_charges: f64,
    annual_rate_percent: f64,
    duration_years: u32,
    insurance_annual_rate: f64,
    debt_ratio_ceiling: f64,
) -> f64 {
    if !(income > 0.0) {
        return 0.0;
    }

    let factor = amortization_factor(annual_rate_percent, duration_years);
    if factor <= 0.0 {
        return 0.0;
    }

    let headroom = income * debt_ratio_ceiling - existing_charges.max(0.0);
    if !(headroom > 0.0) {
        return 0.0;
    }

    let insurance_coefficient = 1.0 + insurance_annual_rate.max(0.0) / (12.0 * factor);
    let raw = headroom / insurance_coefficient;

    raw.floor().max(0.0)
}

/// Capital repaid by `installment` over the duration. Zero when nothing can be amortized.
pub fn capital_from_installment(
    installment: f64,
    annual_rate_percent: f64,
    duration_years: u32,
) -> f64 {
    let factor = amortization_factor(annual_rate_percent, duration_years);
    if factor <= 0.0 || !(installment > 0.0) {
        return 0.0;
    }
    installment / factor
}

/// Level installment, insurance excluded, repaying `capital` over the duration.
pub fn installment_for_capital(capital: f64, annual_rate_percent: f64, duration_years: u32) -> f64 {
    if !(capital > 0.0) {
        return 0.0;
    }
    capital * amortization_factor(annual_rate_percent, duration_years)
}

/// Interest paid over the life of the loan for a level installment.
pub fn interest_cost(capital: f64, installment: f64, duration_years: u32) -> f64 {
    let months = f64::from(duration_years.saturating_mul(12));
    (installment * months - capital).max(0.0)
}
