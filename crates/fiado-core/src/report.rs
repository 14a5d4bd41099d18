//! Computed read models — never stored, always derived.
//!
//! Every balance in these types comes fresh from
//! [`crate::balance::resolve`]; stored statuses are never echoed back
//! without recomputation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  balance::CreditState,
  credit::Credit,
  customer::Customer,
  payment::{Payment, SupplierPayment},
  sale::CalendarMonth,
  supplier::Supplier,
};

// ─── Resolved records ────────────────────────────────────────────────────────

/// A credit bundled with its freshly derived state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedCredit {
  pub credit: Credit,
  pub state:  CreditState,
}

/// List item for the credit overview: the credit, its owner, its state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditWithCustomer {
  pub credit:   Credit,
  pub customer: Customer,
  pub state:    CreditState,
}

/// List item for the payment overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentWithCredit {
  pub payment: Payment,
  pub credit:  Credit,
}

/// List item for the supplier-payment overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPaymentWithSupplier {
  pub payment:  SupplierPayment,
  pub supplier: Supplier,
}

// ─── Statement ───────────────────────────────────────────────────────────────

/// What kind of movement a statement line records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
  Payment,
  Adjustment,
}

/// One line of a credit statement. Payments carry negative amounts,
/// adjustments positive ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementEntry {
  pub date:   DateTime<Utc>,
  pub kind:   EntryKind,
  pub amount: f64,
  pub notes:  Option<String>,
}

/// A credit's full movement history, date-ascending.
///
/// Adjustment lines are informational: their amounts are already folded into
/// the credit's principal, so the closing state is `amount − Σ payments` and
/// adjustments are not added a second time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditStatement {
  pub customer: Customer,
  pub credit:   Credit,
  pub entries:  Vec<StatementEntry>,
  pub state:    CreditState,
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Headline figures for a reference day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
  pub customers:               usize,
  /// Credits whose computed balance exceeds the tolerance.
  pub active_credits:          usize,
  pub paid_credits:            usize,
  /// Sum of balances over all active credits.
  pub outstanding_total:       f64,
  /// Supplier payments falling in the reference day's calendar month.
  pub supplier_payments_month: f64,
  /// Daily-sales total recorded for the reference day.
  pub sales_today:             f64,
}

/// One month's activity for the trailing-activity chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyActivity {
  pub month:          CalendarMonth,
  pub credits_opened: usize,
  pub payments_made:  usize,
  pub sales_total:    f64,
}
