//! Deletion snapshots and the sink they are written through.
//!
//! A cascade deletion must not commit until a snapshot of everything being
//! removed is durably stored. The sink is the seam: the store assembles the
//! document, the sink decides where it lands.

use std::{io, path::PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  credit::{Credit, CreditAdjustment},
  customer::Customer,
  payment::{Payment, SupplierPayment},
  supplier::Supplier,
};

// ─── Snapshot documents ──────────────────────────────────────────────────────

/// Everything removed by a customer purge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSnapshot {
  pub deleted_at:  DateTime<Utc>,
  pub customer:    Customer,
  pub credits:     Vec<Credit>,
  pub payments:    Vec<Payment>,
  pub adjustments: Vec<CreditAdjustment>,
}

/// Everything removed by a supplier purge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierSnapshot {
  pub deleted_at: DateTime<Utc>,
  pub supplier:   Supplier,
  pub payments:   Vec<SupplierPayment>,
}

/// A snapshot ready to persist. Serialises as the inner struct, without an
/// enum wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotDocument {
  Customer(CustomerSnapshot),
  Supplier(SupplierSnapshot),
}

impl SnapshotDocument {
  /// The `(kind, id)` pair backup names are built from.
  pub fn label(&self) -> (&'static str, Uuid) {
    match self {
      Self::Customer(s) => ("customer", s.customer.customer_id),
      Self::Supplier(s) => ("supplier", s.supplier.supplier_id),
    }
  }

  /// When the deletion was initiated.
  pub fn deleted_at(&self) -> DateTime<Utc> {
    match self {
      Self::Customer(s) => s.deleted_at,
      Self::Supplier(s) => s.deleted_at,
    }
  }
}

// ─── Sink ────────────────────────────────────────────────────────────────────

/// Write-once durable storage for deletion snapshots.
///
/// `persist` must not return until the document is durable; an error aborts
/// the deletion that produced it. A snapshot that outlives an aborted
/// deletion is inert residue and is never replayed.
pub trait BackupSink: Send + Sync {
  /// Persist one document and return where it landed.
  fn persist(&self, doc: &SnapshotDocument) -> io::Result<PathBuf>;
}

// ─── Purge receipts ──────────────────────────────────────────────────────────

/// Result of [`crate::store::LedgerStore::purge_customer`]: where the
/// snapshot landed and how many rows each table lost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPurge {
  pub backup:      PathBuf,
  pub credits:     usize,
  pub payments:    usize,
  pub adjustments: usize,
}

/// Result of [`crate::store::LedgerStore::purge_supplier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPurge {
  pub backup:   PathBuf,
  pub payments: usize,
}
