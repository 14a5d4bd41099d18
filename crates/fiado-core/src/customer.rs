//! Customer — the account holder on the credit side of the books.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Someone who buys on credit. All ledger state lives in the customer's
/// credits; this record holds only contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
  pub customer_id: Uuid,
  pub name:        String,
  pub phone:       Option<String>,
  pub address:     Option<String>,
}

/// Input to [`crate::store::LedgerStore::add_customer`] and
/// [`crate::store::LedgerStore::update_customer`]. The id is always assigned
/// by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
  pub name:    String,
  pub phone:   Option<String>,
  pub address: Option<String>,
}
