//! Handlers for `/reports` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reports/dashboard` | Optional `?date=YYYY-MM-DD` |
//! | `GET`  | `/reports/monthly-activity` | Optional `?months=N`, default 6 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use fiado_core::{
  Error as CoreError,
  report::{DashboardSummary, MonthlyActivity},
  store::LedgerStore,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Dashboard ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
  pub date: Option<NaiveDate>,
}

/// `GET /reports/dashboard[?date=YYYY-MM-DD]` — headline figures as of the
/// given day, defaulting to today.
pub async fn dashboard<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardSummary>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let today = params.date.unwrap_or_else(|| Utc::now().date_naive());
  let summary = store.dashboard(today).await.map_err(ApiError::from_store)?;
  Ok(Json(summary))
}

// ─── Monthly activity ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
  pub months: Option<u32>,
}

/// `GET /reports/monthly-activity[?months=N]` — per-month credit, payment
/// and sales figures for the trailing `N` months, oldest first.
pub async fn monthly_activity<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ActivityParams>,
) -> Result<Json<Vec<MonthlyActivity>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let months = params.months.unwrap_or(6);
  let activity = store
    .monthly_activity(Utc::now().date_naive(), months)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(activity))
}
