//! Handlers for `/customers` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/customers` | All customers, name order |
//! | `POST`   | `/customers` | Body: `{"name":"Ana","phone":null,"address":null}` |
//! | `GET`    | `/customers/:id` | 404 if not found |
//! | `PUT`    | `/customers/:id` | Replace the contact fields |
//! | `DELETE` | `/customers/:id` | Snapshot-first cascade purge |
//! | `GET`    | `/customers/:id/credits` | The customer's credits, newest first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use fiado_core::{
  Error as CoreError,
  backup::CustomerPurge,
  customer::{Customer, NewCustomer},
  report::ResolvedCredit,
  store::LedgerStore,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /customers`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Customer>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let customers = store.list_customers().await.map_err(ApiError::from_store)?;
  Ok(Json(customers))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /customers`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewCustomer>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let customer = store.add_customer(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(customer)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /customers/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Customer>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let customer = store
    .get_customer(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("customer {id} not found")))?;
  Ok(Json(customer))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /customers/:id` — body matches `POST /customers`
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewCustomer>,
) -> Result<Json<Customer>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let customer = store
    .update_customer(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(customer))
}

// ─── Purge ────────────────────────────────────────────────────────────────────

/// `DELETE /customers/:id` — the only way to delete a customer. The receipt
/// reports where the snapshot landed and how many rows went with it.
pub async fn purge_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CustomerPurge>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let receipt = store.purge_customer(id).await.map_err(ApiError::from_store)?;
  Ok(Json(receipt))
}

// ─── Credits of one ───────────────────────────────────────────────────────────

/// `GET /customers/:id/credits` — balances freshly derived.
pub async fn credits_of<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<ResolvedCredit>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let credits = store
    .credits_for_customer(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(credits))
}
