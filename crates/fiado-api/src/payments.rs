//! Handlers for `/payments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/payments` | All payments with their credits, newest first |
//! | `POST`   | `/payments` | Validated submission against one credit |
//! | `GET`    | `/payments/:id` | 404 if not found |
//! | `PUT`    | `/payments/:id` | Bookkeeping repair; re-syncs the credit |
//! | `DELETE` | `/payments/:id` | May flip the credit back to active |
//!
//! A submission is rejected with `409` when the credit is already settled or
//! the amount overshoots the remaining balance; the response body carries the
//! exact balance so the caller can correct and resubmit.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use fiado_core::{
  Error as CoreError,
  payment::{Payment, PaymentSubmission, PaymentUpdate},
  report::PaymentWithCredit,
  store::LedgerStore,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /payments`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<PaymentWithCredit>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let payments = store.list_payments().await.map_err(ApiError::from_store)?;
  Ok(Json(payments))
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// `POST /payments` — body: `{"credit_id":"…","amount":30.0}`
pub async fn submit<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PaymentSubmission>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let receipt =
    store.submit_payment(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(receipt)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /payments/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Payment>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let payment = store
    .get_payment(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("payment {id} not found")))?;
  Ok(Json(payment))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /payments/:id` — body: `{"amount":25.0,"date":"2024-06-01T12:00:00Z"}`
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<PaymentUpdate>,
) -> Result<Json<Payment>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let payment = store
    .update_payment(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(payment))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /payments/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  store.delete_payment(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
