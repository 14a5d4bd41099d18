//! Supplier — the payee on the purchasing side of the books.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A supplier the business pays. Supplier payments hang off this record but
/// take no part in the credit-ledger math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
  pub supplier_id: Uuid,
  pub name:        String,
  pub phone:       Option<String>,
  pub email:       Option<String>,
  pub address:     Option<String>,
  pub notes:       Option<String>,
}

/// Input to [`crate::store::LedgerStore::add_supplier`] and
/// [`crate::store::LedgerStore::update_supplier`]. The id is always assigned
/// by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
  pub name:    String,
  pub phone:   Option<String>,
  pub email:   Option<String>,
  pub address: Option<String>,
  pub notes:   Option<String>,
}
