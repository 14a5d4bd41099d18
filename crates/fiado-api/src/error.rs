//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Handlers collapse backend errors through [`fiado_core::Error`] so the
//! ledger taxonomy maps onto HTTP statuses in exactly one place.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use fiado_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// The operation conflicts with the credit's current balance. Carries the
  /// exact balance so the caller can correct and resubmit.
  #[error("conflict: {message}")]
  Conflict { message: String, balance: f64 },

  #[error("{0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Collapse a store-level error into the HTTP taxonomy.
  pub fn from_store<E: Into<CoreError>>(e: E) -> Self {
    e.into().into()
  }
}

impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self {
    let message = e.to_string();
    match e {
      CoreError::CustomerNotFound(_)
      | CoreError::SupplierNotFound(_)
      | CoreError::CreditNotFound(_)
      | CoreError::PaymentNotFound(_)
      | CoreError::SupplierPaymentNotFound(_)
      | CoreError::AdjustmentNotFound(_)
      | CoreError::SaleNotFound(_)
      | CoreError::SettingNotFound(_) => Self::NotFound(message),
      CoreError::CreditAlreadyPaid { balance, .. }
      | CoreError::PaymentExceedsBalance { balance, .. } => {
        Self::Conflict { message, balance }
      }
      CoreError::Validation(_) => Self::Validation(message),
      other => Self::Store(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::Conflict { message, balance } => (
        StatusCode::CONFLICT,
        json!({ "error": message, "balance": balance }),
      ),
      ApiError::Validation(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": m }))
      }
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": e.to_string() }),
      ),
    };
    (status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  #[test]
  fn not_found_family_maps_to_not_found() {
    let e = ApiError::from(CoreError::CustomerNotFound(Uuid::new_v4()));
    assert!(matches!(e, ApiError::NotFound(_)));
  }

  #[test]
  fn balance_violations_carry_the_exact_balance() {
    let e = ApiError::from(CoreError::PaymentExceedsBalance {
      credit_id: Uuid::new_v4(),
      balance:   50.0,
    });
    match e {
      ApiError::Conflict { balance, .. } => assert_eq!(balance, 50.0),
      other => panic!("expected conflict, got {other:?}"),
    }
  }

  #[test]
  fn already_paid_is_a_conflict() {
    let e = ApiError::from(CoreError::CreditAlreadyPaid {
      credit_id: Uuid::new_v4(),
      balance:   0.0,
    });
    assert!(matches!(e, ApiError::Conflict { .. }));
  }

  #[test]
  fn validation_failures_keep_their_message() {
    let e =
      ApiError::from(CoreError::Validation("amount must be positive".into()));
    match e {
      ApiError::Validation(m) => assert!(m.contains("amount must be positive")),
      other => panic!("expected validation, got {other:?}"),
    }
  }

  #[test]
  fn storage_failures_are_internal() {
    let e = ApiError::from(CoreError::Storage("transaction failed".into()));
    assert!(matches!(e, ApiError::Store(_)));
  }
}
