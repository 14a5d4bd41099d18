//! The balance calculator — the single source of truth for a credit's
//! outstanding balance and the status derived from it.
//!
//! Everything here is pure. Both the mutation paths and every read/report
//! path go through [`resolve`]; nothing else in the workspace recomputes
//! balances.

use serde::{Deserialize, Serialize};

use crate::credit::CreditStatus;

/// Tolerance for balance comparisons. Amounts are `f64`, so a sum of
/// payments can miss the principal by float error; a balance within this of
/// zero counts as settled.
pub const EPSILON: f64 = 0.001;

/// A credit's derived state: what remains to pay and the status that follows
/// from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditState {
  pub balance: f64,
  pub status:  CreditStatus,
}

impl CreditState {
  pub fn is_active(&self) -> bool { self.status == CreditStatus::Active }
}

/// Remaining balance: `amount − total_paid`. Not clamped — a transiently
/// negative value is possible mid-validation and counts as fully paid.
pub fn outstanding(amount: f64, total_paid: f64) -> f64 {
  amount - total_paid
}

/// The status a balance implies.
pub fn status_for(balance: f64) -> CreditStatus {
  if balance <= EPSILON { CreditStatus::Paid } else { CreditStatus::Active }
}

/// Derive the full state from the principal and the sum of payments.
pub fn resolve(amount: f64, total_paid: f64) -> CreditState {
  let balance = outstanding(amount, total_paid);
  CreditState { balance, status: status_for(balance) }
}
