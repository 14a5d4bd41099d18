//! Credit — a customer's running account and its adjustment audit trail.
//!
//! A credit's `amount` is the principal: it only ever grows (through
//! adjustments) and is never reduced in place. The outstanding balance is
//! always derived as `amount − Σ payments`; the stored status caches that
//! derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::report::ResolvedCredit;

// ─── Records ─────────────────────────────────────────────────────────────────

/// The cached repayment state of a credit.
///
/// Authoritative state is recomputed from the balance on every read path
/// that matters; see [`crate::balance::status_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
  Active,
  Paid,
}

/// A customer's credit account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credit {
  pub credit_id:   Uuid,
  pub customer_id: Uuid,
  /// Principal: the total amount extended, including later additions.
  pub amount:      f64,
  /// When the credit was opened; set by the store.
  pub date:        DateTime<Utc>,
  /// Cache of the derived status; may lag until the next recomputation.
  pub status:      CreditStatus,
}

/// The kind of a recorded adjustment. Only principal additions exist;
/// reductions are expressed as payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
  Addition,
}

/// An immutable audit record of a principal increase. Never updated or
/// individually deleted; removed only when its credit is cancelled or its
/// customer is purged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditAdjustment {
  pub adjustment_id: Uuid,
  pub credit_id:     Uuid,
  pub amount:        f64,
  pub date:          DateTime<Utc>,
  pub kind:          AdjustmentKind,
  pub notes:         Option<String>,
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::LedgerStore::submit_credit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditSubmission {
  pub customer_id: Uuid,
  pub amount:      f64,
  pub notes:       Option<String>,
}

/// How a submission affected the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditAction {
  /// The customer had no active credit; a fresh one was opened.
  Opened,
  /// The amount was added onto the customer's existing active credit.
  Applied,
}

/// Result of a credit submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditReceipt {
  pub action:     CreditAction,
  pub credit:     ResolvedCredit,
  /// The audit row written for an [`CreditAction::Applied`] submission.
  /// `None` for a fresh credit, or when the audit insert failed — the
  /// principal update stands regardless.
  pub adjustment: Option<CreditAdjustment>,
}

/// Result of [`crate::store::LedgerStore::cancel_credit`]: how many dependent
/// rows were removed along with the credit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CancelReceipt {
  pub payments:    usize,
  pub adjustments: usize,
}
