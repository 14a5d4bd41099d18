//! Payment records for both sides of the books.
//!
//! Customer payments reduce a credit's outstanding balance and carry a full
//! timestamp. Supplier payments are plain bookkeeping rows on a calendar day
//! and take no part in the balance math.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::report::ResolvedCredit;

// ─── Customer payments ───────────────────────────────────────────────────────

/// A repayment against a credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
  pub payment_id: Uuid,
  pub credit_id:  Uuid,
  pub amount:     f64,
  pub date:       DateTime<Utc>,
}

/// Input to [`crate::store::LedgerStore::submit_payment`]. The payment date
/// is always set by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSubmission {
  pub credit_id: Uuid,
  pub amount:    f64,
}

/// Replacement values for [`crate::store::LedgerStore::update_payment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentUpdate {
  pub amount: f64,
  pub date:   DateTime<Utc>,
}

/// Result of a successful payment submission: the created row plus the
/// credit's state after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
  pub payment: Payment,
  pub credit:  ResolvedCredit,
}

// ─── Supplier payments ───────────────────────────────────────────────────────

/// A payment made to a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPayment {
  pub payment_id:  Uuid,
  pub supplier_id: Uuid,
  pub amount:      f64,
  pub date:        NaiveDate,
  pub notes:       Option<String>,
}

/// Input to [`crate::store::LedgerStore::add_supplier_payment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplierPayment {
  pub supplier_id: Uuid,
  pub amount:      f64,
  pub date:        NaiveDate,
  pub notes:       Option<String>,
}

/// Replacement values for
/// [`crate::store::LedgerStore::update_supplier_payment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPaymentUpdate {
  pub amount: f64,
  pub date:   NaiveDate,
  pub notes:  Option<String>,
}
