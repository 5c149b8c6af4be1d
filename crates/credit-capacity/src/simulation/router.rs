use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::advice::{advise, AdviceReport};
use super::affordability::{
    compute_affordability_with, with_solved_installment, AffordabilityResult,
};
use super::apr::{
    estimate_apr, within_usury_rate, AprEstimate, AprRequest, DEFAULT_USURY_RATE_PERCENT,
};
use super::capacity::{capacities_by_duration, BorrowingCapacity};
use super::debt_ratio::simple_max_installment;
use super::domain::{FinancialProfile, LoanParameters};
use super::policy::UnderwritingPolicy;
use super::report::{feasibility_report, FeasibilityReport};
use super::schedule::{amortization_schedule, write_csv};
use super::target::{plan_target_purchase, TargetPurchase, TargetPurchasePlan};
use super::validation::{validate_loan_terms, validate_property_price, validate_simulation};
use crate::error::AppError;

/// Profile and loan settings as submitted by the simulator form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub profile: FinancialProfile,
    #[serde(default)]
    pub loan: LoanParameters,
    /// Replace the submitted installment with the highest one the ceiling allows.
    #[serde(default)]
    pub use_max_installment: bool,
}

impl SimulationRequest {
    fn resolved_loan(&self, policy: &UnderwritingPolicy) -> LoanParameters {
        if self.use_max_installment {
            with_solved_installment(&self.profile, &self.loan, policy)
        } else {
            self.loan.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxInstallmentResponse {
    pub max_installment: f64,
    pub minimum_recommended_installment: f64,
    pub capacities: Vec<BorrowingCapacity>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub capital: f64,
    pub annual_rate_percent: f64,
    pub duration_years: u32,
    #[serde(default)]
    pub first_due_on: Option<NaiveDate>,
    #[serde(default)]
    pub format: ScheduleFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AprQuery {
    #[serde(flatten)]
    pub request: AprRequest,
    #[serde(default = "default_usury_rate")]
    pub usury_rate_percent: f64,
}

fn default_usury_rate() -> f64 {
    DEFAULT_USURY_RATE_PERCENT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AprResponse {
    #[serde(flatten)]
    pub estimate: AprEstimate,
    pub usury_rate_percent: f64,
    pub within_usury_rate: bool,
}

/// Router exposing the calculators as JSON endpoints under `/api/v1/simulations`.
pub fn simulation_router(policy: Arc<UnderwritingPolicy>) -> Router {
    Router::new()
        .route(
            "/api/v1/simulations/max-installment",
            post(max_installment_handler),
        )
        .route("/api/v1/simulations/affordability", post(affordability_handler))
        .route("/api/v1/simulations/feasibility", post(feasibility_handler))
        .route("/api/v1/simulations/advice", post(advice_handler))
        .route("/api/v1/simulations/target-plan", post(target_plan_handler))
        .route("/api/v1/simulations/schedule", post(schedule_handler))
        .route("/api/v1/simulations/apr", post(apr_handler))
        .with_state(policy)
}

pub(crate) async fn max_installment_handler(
    State(policy): State<Arc<UnderwritingPolicy>>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<MaxInstallmentResponse>, AppError> {
    validate_simulation(&request.profile, &request.loan, &policy)?;

    let solved = with_solved_installment(&request.profile, &request.loan, &policy);
    let response = MaxInstallmentResponse {
        max_installment: solved.monthly_installment,
        minimum_recommended_installment: simple_max_installment(
            request.profile.total_income(),
            request.profile.existing_charges(),
            policy.debt_ratio_ceiling,
        ),
        capacities: capacities_by_duration(
            &request.profile,
            Some(request.loan.annual_rate_percent),
            &policy,
        ),
    };

    info!(
        max_installment = response.max_installment,
        "solved maximum installment"
    );
    Ok(Json(response))
}

pub(crate) async fn affordability_handler(
    State(policy): State<Arc<UnderwritingPolicy>>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<AffordabilityResult>, AppError> {
    validate_simulation(&request.profile, &request.loan, &policy)?;

    let loan = request.resolved_loan(&policy);
    let result = compute_affordability_with(&request.profile, &loan, &policy);

    info!(
        projected_debt_ratio = result.projected_debt_ratio,
        feasible = result.feasible,
        alerts = result.alerts.len(),
        "affordability simulated"
    );
    Ok(Json(result))
}

pub(crate) async fn feasibility_handler(
    State(policy): State<Arc<UnderwritingPolicy>>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<FeasibilityReport>, AppError> {
    validate_simulation(&request.profile, &request.loan, &policy)?;

    let loan = request.resolved_loan(&policy);
    let report = feasibility_report(&request.profile, &loan, &policy);

    info!(
        score = report.feasibility.score,
        verdict = report.feasibility.verdict.label(),
        "feasibility scored"
    );
    Ok(Json(report))
}

pub(crate) async fn advice_handler(
    State(policy): State<Arc<UnderwritingPolicy>>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<AdviceReport>, AppError> {
    validate_simulation(&request.profile, &request.loan, &policy)?;

    let loan = request.resolved_loan(&policy);
    let report = feasibility_report(&request.profile, &loan, &policy);
    let advice = advise(&request.profile, &loan, &report, &policy);

    info!(
        score = advice.diagnostic.score,
        scenarios = advice.scenarios.len(),
        ptz_eligible = advice.ptz.eligible,
        "advice generated"
    );
    Ok(Json(advice))
}

pub(crate) async fn target_plan_handler(
    State(policy): State<Arc<UnderwritingPolicy>>,
    Json(target): Json<TargetPurchase>,
) -> Result<Json<TargetPurchasePlan>, AppError> {
    validate_property_price(target.price, &policy)?;

    let plan = plan_target_purchase(&target, &policy);
    info!(
        price = target.price,
        amount_to_borrow = plan.amount_to_borrow,
        "target purchase planned"
    );
    Ok(Json(plan))
}

pub(crate) async fn schedule_handler(
    State(policy): State<Arc<UnderwritingPolicy>>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Response, AppError> {
    validate_loan_terms(request.capital, request.duration_years, &policy)?;

    let rows = amortization_schedule(
        request.capital,
        request.annual_rate_percent,
        request.duration_years,
        request.first_due_on,
    );
    info!(months = rows.len(), "amortization schedule generated");

    match request.format {
        ScheduleFormat::Json => Ok(Json(rows).into_response()),
        ScheduleFormat::Csv => {
            let mut body = Vec::new();
            write_csv(&rows, &mut body)?;
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
                body,
            )
                .into_response())
        }
    }
}

pub(crate) async fn apr_handler(
    State(policy): State<Arc<UnderwritingPolicy>>,
    Json(query): Json<AprQuery>,
) -> Result<Json<AprResponse>, AppError> {
    validate_loan_terms(query.request.capital, query.request.duration_years, &policy)?;

    let estimate = estimate_apr(&query.request);
    let within = within_usury_rate(estimate.apr_percent, query.usury_rate_percent);
    info!(apr_percent = estimate.apr_percent, within, "apr estimated");

    Ok(Json(AprResponse {
        estimate,
        usury_rate_percent: query.usury_rate_percent,
        within_usury_rate: within,
    }))
}
