//! Error types for `fiado-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("customer not found: {0}")]
  CustomerNotFound(Uuid),

  #[error("supplier not found: {0}")]
  SupplierNotFound(Uuid),

  #[error("credit not found: {0}")]
  CreditNotFound(Uuid),

  #[error("payment not found: {0}")]
  PaymentNotFound(Uuid),

  #[error("supplier payment not found: {0}")]
  SupplierPaymentNotFound(Uuid),

  #[error("adjustment not found: {0}")]
  AdjustmentNotFound(Uuid),

  #[error("daily sale not found: {0}")]
  SaleNotFound(Uuid),

  #[error("setting not found: {0:?}")]
  SettingNotFound(String),

  #[error("validation failed: {0}")]
  Validation(String),

  /// The credit's computed balance is already within tolerance of zero;
  /// no further payment may be recorded against it.
  #[error("credit {credit_id} is already paid (balance {balance})")]
  CreditAlreadyPaid { credit_id: Uuid, balance: f64 },

  /// The submitted amount exceeds what remains on the credit. Carries the
  /// exact balance so the caller can correct and resubmit.
  #[error("payment exceeds remaining balance {balance} on credit {credit_id}")]
  PaymentExceedsBalance { credit_id: Uuid, balance: f64 },

  /// The backend rejected an atomic operation; nothing was applied.
  #[error("storage failure: {0}")]
  Storage(String),

  /// The deletion snapshot could not be persisted, so the deletion was
  /// aborted before any row was removed.
  #[error("backup write failed: {0}")]
  BackupWrite(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
