//! Axum route handlers for the flag endpoints.
//!
//! Query-string failures and warehouse errors both surface as the
//! `{"success": false, "error": ...}` envelope via `AppError`.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flags::definition::{FlagKind, FlagQuery, DEFAULT_INACTIVE_DAYS};
use crate::flags::industry::Industry;
use crate::flags::report::FlagReport;
use crate::flags::service::{all_priorities, run_flag, AllPrioritiesReport};
use crate::response::Envelope;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LookbackParams {
    pub days: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct NoActivityParams {
    pub inactive_days: Option<i32>,
    pub lookback_days: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct IndustryListing {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct IndustriesResponse {
    pub industries: BTreeMap<&'static str, IndustryListing>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /flags/new-ts-posting?days=7
///
/// Posters publishing for the first time within the window, approved or not.
pub async fn handle_new_ts_posting(
    State(state): State<AppState>,
    params: Result<Query<LookbackParams>, QueryRejection>,
) -> Result<Json<Envelope<FlagReport>>, AppError> {
    let Query(params) = params?;
    let days = params
        .days
        .unwrap_or(FlagKind::NewTsPosting.default_lookback_days());

    let report = run_flag(state.warehouse.as_ref(), FlagQuery::new_ts_posting(days)?).await?;
    Ok(Json(Envelope::success(report)))
}

/// GET /flags/less-than-6?days=30
///
/// Approved open postings with fewer than 6 valuable applicants.
pub async fn handle_less_than_6(
    State(state): State<AppState>,
    params: Result<Query<LookbackParams>, QueryRejection>,
) -> Result<Json<Envelope<FlagReport>>, AppError> {
    let Query(params) = params?;
    let days = params
        .days
        .unwrap_or(FlagKind::LessThan6.default_lookback_days());

    let report = run_flag(state.warehouse.as_ref(), FlagQuery::less_than_6(days)?).await?;
    Ok(Json(Envelope::success(report)))
}

/// GET /flags/no-activity?inactive_days=7&lookback_days=30
///
/// Approved open postings whose pipeline has been quiet for `inactive_days`.
pub async fn handle_no_activity(
    State(state): State<AppState>,
    params: Result<Query<NoActivityParams>, QueryRejection>,
) -> Result<Json<Envelope<FlagReport>>, AppError> {
    let Query(params) = params?;
    let query = FlagQuery::no_activity(
        params.inactive_days.unwrap_or(DEFAULT_INACTIVE_DAYS),
        params
            .lookback_days
            .unwrap_or(FlagKind::NoActivity.default_lookback_days()),
    )?;

    let report = run_flag(state.warehouse.as_ref(), query).await?;
    Ok(Json(Envelope::success(report)))
}

/// GET /flags/all-priorities?days=7
///
/// Every high-priority flag in one call, with a per-flag breakdown.
pub async fn handle_all_priorities(
    State(state): State<AppState>,
    params: Result<Query<LookbackParams>, QueryRejection>,
) -> Result<Json<Envelope<AllPrioritiesReport>>, AppError> {
    let Query(params) = params?;
    let days = params
        .days
        .unwrap_or(FlagKind::NewTsPosting.default_lookback_days());

    let report = all_priorities(state.warehouse.as_ref(), days).await?;
    Ok(Json(Envelope::success(report)))
}

/// GET /industries
///
/// Category labels and the keywords that select them, for message templating.
pub async fn handle_industries() -> Json<Envelope<IndustriesResponse>> {
    let industries = Industry::PRIORITY
        .into_iter()
        .map(|industry| {
            (
                industry.as_str(),
                IndustryListing {
                    name: industry.display_name(),
                    keywords: industry.keywords(),
                },
            )
        })
        .collect();

    Json(Envelope::success(IndustriesResponse { industries }))
}
