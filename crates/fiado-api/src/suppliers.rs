//! Handlers for `/suppliers` and `/supplier-payments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/suppliers` | All suppliers, name order |
//! | `POST`   | `/suppliers` | Body: `{"name":"…",…}` |
//! | `GET`    | `/suppliers/:id` | 404 if not found |
//! | `PUT`    | `/suppliers/:id` | Replace the contact fields |
//! | `DELETE` | `/suppliers/:id` | Snapshot-first cascade purge |
//! | `GET`    | `/suppliers/:id/payments` | Date ascending |
//! | `GET`    | `/supplier-payments` | All, with suppliers, newest first |
//! | `POST`   | `/supplier-payments` | Record a payment to a supplier |
//! | `GET`    | `/supplier-payments/:id` | 404 if not found |
//! | `PUT`    | `/supplier-payments/:id` | Replace amount, date, notes |
//! | `DELETE` | `/supplier-payments/:id` | Plain row delete |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use fiado_core::{
  Error as CoreError,
  backup::SupplierPurge,
  payment::{NewSupplierPayment, SupplierPayment, SupplierPaymentUpdate},
  report::SupplierPaymentWithSupplier,
  store::LedgerStore,
  supplier::{NewSupplier, Supplier},
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /suppliers`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Supplier>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let suppliers = store.list_suppliers().await.map_err(ApiError::from_store)?;
  Ok(Json(suppliers))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /suppliers`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewSupplier>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let supplier = store.add_supplier(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(supplier)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /suppliers/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Supplier>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let supplier = store
    .get_supplier(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("supplier {id} not found")))?;
  Ok(Json(supplier))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /suppliers/:id` — body matches `POST /suppliers`
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewSupplier>,
) -> Result<Json<Supplier>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let supplier = store
    .update_supplier(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(supplier))
}

// ─── Purge ────────────────────────────────────────────────────────────────────

/// `DELETE /suppliers/:id` — cascade removal of the supplier and its
/// payments, written to a snapshot first.
pub async fn purge_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SupplierPurge>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let receipt = store.purge_supplier(id).await.map_err(ApiError::from_store)?;
  Ok(Json(receipt))
}

// ─── Payments of one ──────────────────────────────────────────────────────────

/// `GET /suppliers/:id/payments`
pub async fn payments_of<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<SupplierPayment>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let payments = store
    .payments_for_supplier(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(payments))
}

// ─── Payment list ─────────────────────────────────────────────────────────────

/// `GET /supplier-payments`
pub async fn payment_list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SupplierPaymentWithSupplier>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let payments =
    store.list_supplier_payments().await.map_err(ApiError::from_store)?;
  Ok(Json(payments))
}

// ─── Payment create ───────────────────────────────────────────────────────────

/// `POST /supplier-payments` — body:
/// `{"supplier_id":"…","amount":80.0,"date":"2024-06-10","notes":null}`
pub async fn payment_create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewSupplierPayment>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let payment = store
    .add_supplier_payment(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(payment)))
}

// ─── Payment get one ──────────────────────────────────────────────────────────

/// `GET /supplier-payments/:id`
pub async fn payment_get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SupplierPayment>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let payment = store
    .get_supplier_payment(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("supplier payment {id} not found"))
    })?;
  Ok(Json(payment))
}

// ─── Payment update ───────────────────────────────────────────────────────────

/// `PUT /supplier-payments/:id`
pub async fn payment_update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SupplierPaymentUpdate>,
) -> Result<Json<SupplierPayment>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let payment = store
    .update_supplier_payment(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(payment))
}

// ─── Payment delete ───────────────────────────────────────────────────────────

/// `DELETE /supplier-payments/:id`
pub async fn payment_delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  store
    .delete_supplier_payment(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
