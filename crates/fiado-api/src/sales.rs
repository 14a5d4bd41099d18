//! Handlers for `/daily-sales` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/daily-sales` | Optional `?month=YYYY-MM`, date descending |
//! | `POST`   | `/daily-sales` | Record under the duplicate-date policy |
//! | `GET`    | `/daily-sales/:id` | 404 if not found |
//! | `PUT`    | `/daily-sales/:id` | Replace the row; no duplicate policy |
//! | `DELETE` | `/daily-sales/:id` | Plain row delete |
//!
//! `POST` answers `201` with `"outcome":"recorded"` when the figure was
//! written, or `200` with `"outcome":"needs_resolution"` and the occupying
//! rows when the date is taken and the body carried no `resolution`. Nothing
//! is written in the latter case; the caller resubmits with
//! `"resolution":"overwrite"` or `"resolution":"register_additional"`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use fiado_core::{
  Error as CoreError,
  sale::{CalendarMonth, DailySale, DuplicateResolution, SaleDraft, SaleOutcome},
  store::LedgerStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub month: Option<CalendarMonth>,
}

/// `GET /daily-sales[?month=YYYY-MM]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<DailySale>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let sales = store
    .list_daily_sales(params.month)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(sales))
}

// ─── Record ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecordBody {
  pub date:       NaiveDate,
  pub amount:     f64,
  pub notes:      Option<String>,
  /// Required only when rows already exist for `date`.
  pub resolution: Option<DuplicateResolution>,
}

/// `POST /daily-sales` — body:
/// `{"date":"2024-03-01","amount":200.0,"notes":null,"resolution":null}`
pub async fn record<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<RecordBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let draft =
    SaleDraft { date: body.date, amount: body.amount, notes: body.notes };
  let outcome = store
    .record_daily_sale(draft, body.resolution)
    .await
    .map_err(ApiError::from_store)?;
  let status = match &outcome {
    SaleOutcome::Recorded { .. } => StatusCode::CREATED,
    SaleOutcome::NeedsResolution { .. } => StatusCode::OK,
  };
  Ok((status, Json(outcome)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /daily-sales/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<DailySale>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let sale = store
    .get_daily_sale(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("daily sale {id} not found")))?;
  Ok(Json(sale))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /daily-sales/:id` — body: `{"date":"…","amount":…,"notes":…}`
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SaleDraft>,
) -> Result<Json<DailySale>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let sale = store
    .update_daily_sale(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(sale))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /daily-sales/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  store.delete_daily_sale(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
