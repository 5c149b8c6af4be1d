use serde::{Deserialize, Serialize};

/// Borrower insurance premium computed on the initial capital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceQuote {
    pub annual_rate: f64,
    pub monthly_premium: f64,
    pub total_premium: f64,
    /// Annual effective insurance rate (TAEA) in percent.
    pub effective_rate_percent: f64,
}

/// Monthly premium for `capital` at a yearly rate expressed as a fraction of capital.
pub fn monthly_premium(capital: f64, annual_rate: f64) -> f64 {
    if !(capital > 0.0) || !(annual_rate > 0.0) {
        return 0.0;
    }
    capital * annual_rate / 12.0
}

pub fn quote(capital: f64, duration_years: u32, annual_rate: f64) -> InsuranceQuote {
    if !(capital > 0.0) || duration_years == 0 {
        return InsuranceQuote {
            annual_rate,
            monthly_premium: 0.0,
            total_premium: 0.0,
            effective_rate_percent: 0.0,
        };
    }

    let monthly = monthly_premium(capital, annual_rate);
    let total = monthly * 12.0 * f64::from(duration_years);

    InsuranceQuote {
        annual_rate,
        monthly_premium: round_cents(monthly),
        total_premium: total.round(),
        effective_rate_percent: effective_rate_percent(capital, total, duration_years),
    }
}

/// Simplified TAEA: total premium spread evenly over capital and years.
pub fn effective_rate_percent(capital: f64, total_premium: f64, duration_years: u32) -> f64 {
    if !(capital > 0.0) || duration_years == 0 {
        return 0.0;
    }
    round_cents(total_premium / capital / f64::from(duration_years) * 100.0)
}

/// Quotes the same loan at several premium rates, cheapest first.
pub fn compare(capital: f64, duration_years: u32, rates: &[f64]) -> Vec<InsuranceQuote> {
    let mut quotes: Vec<InsuranceQuote> = rates
        .iter()
        .map(|rate| quote(capital, duration_years, *rate))
        .collect();
    quotes.sort_by(|a, b| a.total_premium.total_cmp(&b.total_premium));
    quotes
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
