//! Handlers for `/settings` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/settings` | All settings, key order |
//! | `GET`    | `/settings/:key` | 404 if not found |
//! | `PUT`    | `/settings/:key` | Upsert: body `{"value":"…"}` |
//! | `DELETE` | `/settings/:key` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use fiado_core::{Error as CoreError, setting::Setting, store::LedgerStore};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /settings`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Setting>>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let settings = store.list_settings().await.map_err(ApiError::from_store)?;
  Ok(Json(settings))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /settings/:key`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(key): Path<String>,
) -> Result<Json<Setting>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let setting = store
    .get_setting(key.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("setting {key:?} not found")))?;
  Ok(Json(setting))
}

// ─── Put ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PutBody {
  pub value: String,
}

/// `PUT /settings/:key` — body: `{"value":"La Tiendita"}`. Creates the key
/// or replaces its value.
pub async fn put_one<S>(
  State(store): State<Arc<S>>,
  Path(key): Path<String>,
  Json(body): Json<PutBody>,
) -> Result<Json<Setting>, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  let setting = store
    .put_setting(key, body.value)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(setting))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /settings/:key`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: Into<CoreError>,
{
  store.delete_setting(key).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
