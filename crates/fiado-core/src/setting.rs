//! Key/value configuration rows. Not part of the ledger invariants.

use serde::{Deserialize, Serialize};

/// One configuration entry (business name, receipt footer, …). Writes are
/// upserts keyed on `key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
  pub key:   String,
  pub value: String,
}
