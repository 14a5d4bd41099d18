//! Handlers for `/credits` and `/adjustments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/credits` | All credits with owners, newest first |
//! | `POST`   | `/credits` | Submission: top up the active credit or open one |
//! | `GET`    | `/credits/:id` | Credit with freshly derived state |
//! | `DELETE` | `/credits/:id` | Cancel: hard-delete with payments and trail |
//! | `GET`    | `/credits/:id/payments` | Date ascending |
//! | `GET`    | `/credits/:id/adjustments` | Audit trail, date ascending |
//! | `GET`    | `/credits/:id/statement` | Merged movement timeline |
//! | `GET`    | `/adjustments/:id` | One audit row |
//!
//! A submission against a customer with an active credit tops that credit up
//! and answers with `"action":"applied"`; otherwise a fresh credit is opened
//! and the answer carries `"action":"opened"`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use fiado_core::{
  Error as CoreError,
  credit::{CancelReceipt, CreditAdjustment, CreditSubmission},
  payment::Payment,
  report::{CreditStatement, CreditWithCustomer, ResolvedCredit},
  store::LedgerStore,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /credits`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CreditWithCustomer>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let credits = store.list_credits().await.map_err(ApiError::from_store)?;
  Ok(Json(credits))
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// `POST /credits` — body: `{"customer_id":"…","amount":50.0,"notes":null}`
pub async fn submit<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreditSubmission>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let receipt = store.submit_credit(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(receipt)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /credits/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ResolvedCredit>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let credit = store
    .get_credit(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("credit {id} not found")))?;
  Ok(Json(credit))
}

// ─── Cancel ───────────────────────────────────────────────────────────────────

/// `DELETE /credits/:id` — removes the credit with every payment and
/// adjustment under it. No snapshot is written; use a customer purge for a
/// recoverable deletion.
pub async fn cancel_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CancelReceipt>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let receipt = store.cancel_credit(id).await.map_err(ApiError::from_store)?;
  Ok(Json(receipt))
}

// ─── Payments of one ──────────────────────────────────────────────────────────

/// `GET /credits/:id/payments`
pub async fn payments_of<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Payment>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let payments = store
    .payments_for_credit(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(payments))
}

// ─── Adjustments of one ───────────────────────────────────────────────────────

/// `GET /credits/:id/adjustments`
pub async fn adjustments_of<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<CreditAdjustment>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let adjustments = store
    .adjustments_for_credit(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(adjustments))
}

// ─── Statement ────────────────────────────────────────────────────────────────

/// `GET /credits/:id/statement` — payments and adjustments merged into one
/// timeline, date ascending, with the credit's closing state.
pub async fn statement_of<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CreditStatement>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let statement =
    store.credit_statement(id).await.map_err(ApiError::from_store)?;
  Ok(Json(statement))
}

// ─── Get one adjustment ───────────────────────────────────────────────────────

/// `GET /adjustments/:id`
pub async fn get_adjustment<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CreditAdjustment>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let adjustment = store
    .get_adjustment(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("adjustment {id} not found")))?;
  Ok(Json(adjustment))
}
