use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use crate::simulation::domain::{
    EmploymentStatus, FinancialProfile, HouseholdType, LoanParameters, PropertyCategory,
};
use crate::simulation::{simulation_router, UnderwritingPolicy};

/// Single borrower on a permanent contract, 3 000 EUR net, no existing loans.
pub(super) fn single_borrower() -> FinancialProfile {
    FinancialProfile {
        age: 34,
        employment_status: EmploymentStatus::PermanentContract,
        household: HouseholdType::Single,
        children: 0,
        primary_income: 3000.0,
        ..FinancialProfile::default()
    }
}

pub(super) fn couple_of_civil_servants() -> FinancialProfile {
    FinancialProfile {
        age: 32,
        employment_status: EmploymentStatus::CivilServant,
        household: HouseholdType::Couple,
        children: 0,
        primary_income: 3500.0,
        secondary_income: 2500.0,
        ..FinancialProfile::default()
    }
}

/// Stretched file: low income, a car loan and a late start.
pub(super) fn stretched_borrower() -> FinancialProfile {
    FinancialProfile {
        age: 55,
        employment_status: EmploymentStatus::FixedTermContract,
        household: HouseholdType::Single,
        primary_income: 1500.0,
        existing_debt_payments: 200.0,
        ..FinancialProfile::default()
    }
}

pub(super) fn loan(installment: f64) -> LoanParameters {
    LoanParameters {
        monthly_installment: installment,
        duration_years: 20,
        down_payment: 0.0,
        property_category: PropertyCategory::Existing,
        annual_rate_percent: 3.5,
    }
}

pub(super) fn policy_with_insurance(rate: f64) -> UnderwritingPolicy {
    UnderwritingPolicy {
        insurance_annual_rate: rate,
        ..UnderwritingPolicy::default()
    }
}

pub(super) fn router() -> Router {
    simulation_router(Arc::new(UnderwritingPolicy::default()))
}

pub(super) fn json_request(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serializable payload")))
        .expect("valid request")
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}
