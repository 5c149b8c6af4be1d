use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Parses a command-line choice using the snake_case names of the JSON API, so
/// `fixed_term_contract` means the same thing on both surfaces.
pub(crate) fn parse_choice<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| format!("unknown value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_capacity::simulation::{EmploymentStatus, PropertyCategory};

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2026-03-05 "),
            Ok(NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date"))
        );
        assert!(parse_date("2026-02-30").is_err());
    }

    #[test]
    fn parse_choice_matches_api_names() {
        assert_eq!(
            parse_choice::<EmploymentStatus>("Fixed-Term-Contract"),
            Ok(EmploymentStatus::FixedTermContract)
        );
        assert_eq!(parse_choice::<PropertyCategory>("new"), Ok(PropertyCategory::New));
        let err = parse_choice::<PropertyCategory>("castle").expect_err("unknown category");
        assert!(err.contains("castle"));
    }
}
