//! Mortgage simulation: the insurance-aware installment solver, the affordability calculator and
//! the feasibility scorer, plus the broker tools built on the same amortization arithmetic and
//! the advice drawn from a scored file.
//!
//! Every calculator is a pure function of immutable inputs. Degenerate input (no income, zero
//! duration) yields zeroed figures rather than an error; form bounds live in [`validation`] and
//! are applied by callers.

pub mod advice;
pub mod affordability;
pub mod amortization;
pub mod apr;
pub mod capacity;
pub mod debt_ratio;
pub mod disposable;
pub mod domain;
pub mod insurance;
pub mod notary;
pub mod policy;
pub mod ptz;
pub mod purchase;
pub mod report;
pub mod router;
pub mod schedule;
pub mod scoring;
pub mod target;
pub mod validation;

#[cfg(test)]
mod tests;

pub use advice::{
    advise, alternative_scenarios, bank_diagnostic, AdviceContext, AdviceReport,
    ApprovalLikelihood, BankDiagnostic, Scenario, ScenarioAdjustment, ScenarioKind,
};
pub use affordability::{
    compute_affordability, compute_affordability_with, solve_max_installment_for,
    with_solved_installment, AffordabilityResult, Alert, AlertKind,
};
pub use amortization::{
    amortization_factor, capital_from_installment, installment_for_capital, interest_cost,
    solve_max_installment,
};
pub use apr::{estimate_apr, AprEstimate, AprRequest, GuaranteeKind};
pub use capacity::{
    borrowing_capacity, capacities_by_duration, shortest_duration_for, BorrowingCapacity,
};
pub use domain::{
    AdequacyLevel, EmploymentStatus, FinancialProfile, HouseholdType, LoanParameters,
    PropertyCategory,
};
pub use policy::UnderwritingPolicy;
pub use ptz::{check_ptz_eligibility, PtzEligibility};
pub use report::{feasibility_report, FeasibilityReport};
pub use router::{simulation_router, SimulationRequest};
pub use schedule::{amortization_schedule, write_csv, AmortizationRow, ScheduleExportError};
pub use scoring::{
    score_feasibility, CriterionKind, FeasibilityInput, FeasibilityScore, FeasibilityScorer,
    ScoreCriterion, Verdict,
};
pub use target::{plan_target_purchase, TargetPurchase, TargetPurchasePlan};
pub use validation::{validate_simulation, ValidationErrors, ValidationIssue};
