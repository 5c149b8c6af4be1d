use std::io::Write;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::amortization::installment_for_capital;
use super::insurance::round_cents;

/// One month of a level-installment repayment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub due_on: Option<NaiveDate>,
    pub installment: f64,
    pub interest: f64,
    pub principal: f64,
    pub remaining: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleExportError {
    #[error("failed to encode amortization schedule: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush amortization schedule: {0}")]
    Io(#[from] std::io::Error),
}

/// Month-by-month split of each installment between interest and principal.
///
/// When `first_due_on` is set, each row carries its calendar due date, one month apart. The
/// last row absorbs rounding so the remaining balance lands on zero.
pub fn amortization_schedule(
    capital: f64,
    annual_rate_percent: f64,
    duration_years: u32,
    first_due_on: Option<NaiveDate>,
) -> Vec<AmortizationRow> {
    let months = duration_years.saturating_mul(12);
    if !(capital > 0.0) || months == 0 {
        return Vec::new();
    }

    let installment = installment_for_capital(capital, annual_rate_percent, duration_years);
    let monthly_rate = (annual_rate_percent / 100.0 / 12.0).max(0.0);
    let mut remaining = capital;

    (1..=months)
        .map(|month| {
            let interest = remaining * monthly_rate;
            let principal = if month == months {
                remaining
            } else {
                (installment - interest).min(remaining)
            };
            remaining = (remaining - principal).max(0.0);

            AmortizationRow {
                month,
                due_on: first_due_on
                    .and_then(|first| first.checked_add_months(Months::new(month - 1))),
                installment: round_cents(interest + principal),
                interest: round_cents(interest),
                principal: round_cents(principal),
                remaining: round_cents(remaining),
            }
        })
        .collect()
}

/// Writes the schedule with a header row.
pub fn write_csv<W: Write>(rows: &[AmortizationRow], writer: W) -> Result<(), ScheduleExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
