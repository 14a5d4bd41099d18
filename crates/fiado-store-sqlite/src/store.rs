//! [`SqliteStore`] — the SQLite implementation of [`LedgerStore`].
//!
//! Composite operations open a rusqlite transaction inside the connection
//! thread; the transaction commits only when the whole operation succeeded,
//! so readers never observe partial state. Cascade purges persist their
//! snapshot through the backup sink before any row is deleted.

use std::{collections::HashMap, path::Path, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use fiado_core::{
  Error as CoreError, balance,
  backup::{
    BackupSink, CustomerPurge, CustomerSnapshot, SnapshotDocument,
    SupplierPurge, SupplierSnapshot,
  },
  credit::{
    AdjustmentKind, CancelReceipt, Credit, CreditAction, CreditAdjustment,
    CreditReceipt, CreditStatus, CreditSubmission,
  },
  customer::{Customer, NewCustomer},
  payment::{
    NewSupplierPayment, Payment, PaymentReceipt, PaymentSubmission,
    PaymentUpdate, SupplierPayment, SupplierPaymentUpdate,
  },
  report::{
    CreditStatement, CreditWithCustomer, DashboardSummary, EntryKind,
    MonthlyActivity, PaymentWithCredit, ResolvedCredit, StatementEntry,
    SupplierPaymentWithSupplier,
  },
  sale::{
    CalendarMonth, DailySale, DuplicateResolution, SaleDraft, SaleOutcome,
  },
  setting::Setting,
  store::LedgerStore,
  supplier::{NewSupplier, Supplier},
};

use crate::{
  Error, Result,
  encode::{
    RawAdjustment, RawCredit, RawCustomer, RawPayment, RawSale, RawSupplier,
    RawSupplierPayment, encode_date, encode_dt, encode_kind, encode_status,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A credit ledger backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted and the
/// backup sink is shared.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
  sink: Arc<dyn BackupSink>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  /// Deletion snapshots are persisted through `sink`.
  pub async fn open(
    path: impl AsRef<Path>,
    sink: Arc<dyn BackupSink>,
  ) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, sink };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(sink: Arc<dyn BackupSink>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, sink };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row loading ─────────────────────────────────────────────────────────────

fn load_customer(
  conn: &rusqlite::Connection,
  id: Uuid,
) -> Result<Option<Customer>> {
  conn
    .query_row(
      "SELECT customer_id, name, phone, address FROM customers
       WHERE customer_id = ?1",
      rusqlite::params![encode_uuid(id)],
      |row| {
        Ok(RawCustomer {
          customer_id: row.get(0)?,
          name:        row.get(1)?,
          phone:       row.get(2)?,
          address:     row.get(3)?,
        })
      },
    )
    .optional()?
    .map(RawCustomer::into_customer)
    .transpose()
}

fn load_supplier(
  conn: &rusqlite::Connection,
  id: Uuid,
) -> Result<Option<Supplier>> {
  conn
    .query_row(
      "SELECT supplier_id, name, phone, email, address, notes FROM suppliers
       WHERE supplier_id = ?1",
      rusqlite::params![encode_uuid(id)],
      |row| {
        Ok(RawSupplier {
          supplier_id: row.get(0)?,
          name:        row.get(1)?,
          phone:       row.get(2)?,
          email:       row.get(3)?,
          address:     row.get(4)?,
          notes:       row.get(5)?,
        })
      },
    )
    .optional()?
    .map(RawSupplier::into_supplier)
    .transpose()
}

fn load_credit(
  conn: &rusqlite::Connection,
  id: Uuid,
) -> Result<Option<Credit>> {
  conn
    .query_row(
      "SELECT credit_id, customer_id, amount, date, status FROM credits
       WHERE credit_id = ?1",
      rusqlite::params![encode_uuid(id)],
      |row| {
        Ok(RawCredit {
          credit_id:   row.get(0)?,
          customer_id: row.get(1)?,
          amount:      row.get(2)?,
          date:        row.get(3)?,
          status:      row.get(4)?,
        })
      },
    )
    .optional()?
    .map(RawCredit::into_credit)
    .transpose()
}

fn load_payment(
  conn: &rusqlite::Connection,
  id: Uuid,
) -> Result<Option<Payment>> {
  conn
    .query_row(
      "SELECT payment_id, credit_id, amount, date FROM payments
       WHERE payment_id = ?1",
      rusqlite::params![encode_uuid(id)],
      |row| {
        Ok(RawPayment {
          payment_id: row.get(0)?,
          credit_id:  row.get(1)?,
          amount:     row.get(2)?,
          date:       row.get(3)?,
        })
      },
    )
    .optional()?
    .map(RawPayment::into_payment)
    .transpose()
}

fn load_supplier_payment(
  conn: &rusqlite::Connection,
  id: Uuid,
) -> Result<Option<SupplierPayment>> {
  conn
    .query_row(
      "SELECT payment_id, supplier_id, amount, date, notes
       FROM supplier_payments WHERE payment_id = ?1",
      rusqlite::params![encode_uuid(id)],
      |row| {
        Ok(RawSupplierPayment {
          payment_id:  row.get(0)?,
          supplier_id: row.get(1)?,
          amount:      row.get(2)?,
          date:        row.get(3)?,
          notes:       row.get(4)?,
        })
      },
    )
    .optional()?
    .map(RawSupplierPayment::into_payment)
    .transpose()
}

fn load_adjustment(
  conn: &rusqlite::Connection,
  id: Uuid,
) -> Result<Option<CreditAdjustment>> {
  conn
    .query_row(
      "SELECT adjustment_id, credit_id, amount, date, kind, notes
       FROM adjustments WHERE adjustment_id = ?1",
      rusqlite::params![encode_uuid(id)],
      |row| {
        Ok(RawAdjustment {
          adjustment_id: row.get(0)?,
          credit_id:     row.get(1)?,
          amount:        row.get(2)?,
          date:          row.get(3)?,
          kind:          row.get(4)?,
          notes:         row.get(5)?,
        })
      },
    )
    .optional()?
    .map(RawAdjustment::into_adjustment)
    .transpose()
}

fn load_sale(
  conn: &rusqlite::Connection,
  id: Uuid,
) -> Result<Option<DailySale>> {
  conn
    .query_row(
      "SELECT sale_id, date, amount, notes FROM daily_sales
       WHERE sale_id = ?1",
      rusqlite::params![encode_uuid(id)],
      |row| {
        Ok(RawSale {
          sale_id: row.get(0)?,
          date:    row.get(1)?,
          amount:  row.get(2)?,
          notes:   row.get(3)?,
        })
      },
    )
    .optional()?
    .map(RawSale::into_sale)
    .transpose()
}

/// A customer's credits, newest first.
fn credits_of(
  conn: &rusqlite::Connection,
  customer_id: Uuid,
) -> Result<Vec<Credit>> {
  let mut stmt = conn.prepare(
    "SELECT credit_id, customer_id, amount, date, status FROM credits
     WHERE customer_id = ?1 ORDER BY date DESC",
  )?;
  let raws = stmt
    .query_map(rusqlite::params![encode_uuid(customer_id)], |row| {
      Ok(RawCredit {
        credit_id:   row.get(0)?,
        customer_id: row.get(1)?,
        amount:      row.get(2)?,
        date:        row.get(3)?,
        status:      row.get(4)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawCredit::into_credit).collect()
}

/// A credit's payments, date ascending.
fn payments_of(
  conn: &rusqlite::Connection,
  credit_id: Uuid,
) -> Result<Vec<Payment>> {
  let mut stmt = conn.prepare(
    "SELECT payment_id, credit_id, amount, date FROM payments
     WHERE credit_id = ?1 ORDER BY date ASC",
  )?;
  let raws = stmt
    .query_map(rusqlite::params![encode_uuid(credit_id)], |row| {
      Ok(RawPayment {
        payment_id: row.get(0)?,
        credit_id:  row.get(1)?,
        amount:     row.get(2)?,
        date:       row.get(3)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawPayment::into_payment).collect()
}

/// A credit's adjustments, date ascending.
fn adjustments_of(
  conn: &rusqlite::Connection,
  credit_id: Uuid,
) -> Result<Vec<CreditAdjustment>> {
  let mut stmt = conn.prepare(
    "SELECT adjustment_id, credit_id, amount, date, kind, notes
     FROM adjustments WHERE credit_id = ?1 ORDER BY date ASC",
  )?;
  let raws = stmt
    .query_map(rusqlite::params![encode_uuid(credit_id)], |row| {
      Ok(RawAdjustment {
        adjustment_id: row.get(0)?,
        credit_id:     row.get(1)?,
        amount:        row.get(2)?,
        date:          row.get(3)?,
        kind:          row.get(4)?,
        notes:         row.get(5)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawAdjustment::into_adjustment).collect()
}

/// A supplier's payments, date ascending.
fn supplier_payments_of(
  conn: &rusqlite::Connection,
  supplier_id: Uuid,
) -> Result<Vec<SupplierPayment>> {
  let mut stmt = conn.prepare(
    "SELECT payment_id, supplier_id, amount, date, notes
     FROM supplier_payments WHERE supplier_id = ?1 ORDER BY date ASC",
  )?;
  let raws = stmt
    .query_map(rusqlite::params![encode_uuid(supplier_id)], |row| {
      Ok(RawSupplierPayment {
        payment_id:  row.get(0)?,
        supplier_id: row.get(1)?,
        amount:      row.get(2)?,
        date:        row.get(3)?,
        notes:       row.get(4)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawSupplierPayment::into_payment).collect()
}

/// Rows recorded for one calendar day, oldest insertion first.
fn sales_on(
  conn: &rusqlite::Connection,
  date: NaiveDate,
) -> Result<Vec<DailySale>> {
  let mut stmt = conn.prepare(
    "SELECT sale_id, date, amount, notes FROM daily_sales
     WHERE date = ?1 ORDER BY rowid ASC",
  )?;
  let raws = stmt
    .query_map(rusqlite::params![encode_date(date)], |row| {
      Ok(RawSale {
        sale_id: row.get(0)?,
        date:    row.get(1)?,
        amount:  row.get(2)?,
        notes:   row.get(3)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawSale::into_sale).collect()
}

fn total_paid(conn: &rusqlite::Connection, credit_id: Uuid) -> Result<f64> {
  Ok(conn.query_row(
    "SELECT COALESCE(SUM(amount), 0.0) FROM payments WHERE credit_id = ?1",
    rusqlite::params![encode_uuid(credit_id)],
    |row| row.get(0),
  )?)
}

fn resolved(
  conn: &rusqlite::Connection,
  credit: Credit,
) -> Result<ResolvedCredit> {
  let paid = total_paid(conn, credit.credit_id)?;
  let state = balance::resolve(credit.amount, paid);
  Ok(ResolvedCredit { credit, state })
}

fn resolved_credit(
  conn: &rusqlite::Connection,
  id: Uuid,
) -> Result<Option<ResolvedCredit>> {
  let credit = match load_credit(conn, id)? {
    Some(c) => c,
    None => return Ok(None),
  };
  Ok(Some(resolved(conn, credit)?))
}

/// A customer's credits with computed state, newest first.
/// Errors if the customer does not exist.
fn credits_for(
  conn: &rusqlite::Connection,
  customer_id: Uuid,
) -> Result<Vec<ResolvedCredit>> {
  if load_customer(conn, customer_id)?.is_none() {
    return Err(CoreError::CustomerNotFound(customer_id).into());
  }
  credits_of(conn, customer_id)?
    .into_iter()
    .map(|credit| resolved(conn, credit))
    .collect()
}

/// Errors if the credit does not exist.
fn payments_for(
  conn: &rusqlite::Connection,
  credit_id: Uuid,
) -> Result<Vec<Payment>> {
  if load_credit(conn, credit_id)?.is_none() {
    return Err(CoreError::CreditNotFound(credit_id).into());
  }
  payments_of(conn, credit_id)
}

/// Errors if the credit does not exist.
fn adjustments_for(
  conn: &rusqlite::Connection,
  credit_id: Uuid,
) -> Result<Vec<CreditAdjustment>> {
  if load_credit(conn, credit_id)?.is_none() {
    return Err(CoreError::CreditNotFound(credit_id).into());
  }
  adjustments_of(conn, credit_id)
}

/// Errors if the supplier does not exist.
fn supplier_payments_for(
  conn: &rusqlite::Connection,
  supplier_id: Uuid,
) -> Result<Vec<SupplierPayment>> {
  if load_supplier(conn, supplier_id)?.is_none() {
    return Err(CoreError::SupplierNotFound(supplier_id).into());
  }
  supplier_payments_of(conn, supplier_id)
}

// ─── Row writing ─────────────────────────────────────────────────────────────

fn insert_credit(conn: &rusqlite::Connection, credit: &Credit) -> Result<()> {
  conn.execute(
    "INSERT INTO credits (credit_id, customer_id, amount, date, status)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    rusqlite::params![
      encode_uuid(credit.credit_id),
      encode_uuid(credit.customer_id),
      credit.amount,
      encode_dt(credit.date),
      encode_status(credit.status),
    ],
  )?;
  Ok(())
}

fn insert_payment(
  conn: &rusqlite::Connection,
  payment: &Payment,
) -> Result<()> {
  conn.execute(
    "INSERT INTO payments (payment_id, credit_id, amount, date)
     VALUES (?1, ?2, ?3, ?4)",
    rusqlite::params![
      encode_uuid(payment.payment_id),
      encode_uuid(payment.credit_id),
      payment.amount,
      encode_dt(payment.date),
    ],
  )?;
  Ok(())
}

fn insert_adjustment(
  conn: &rusqlite::Connection,
  adjustment: &CreditAdjustment,
) -> Result<()> {
  conn.execute(
    "INSERT INTO adjustments (adjustment_id, credit_id, amount, date, kind, notes)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    rusqlite::params![
      encode_uuid(adjustment.adjustment_id),
      encode_uuid(adjustment.credit_id),
      adjustment.amount,
      encode_dt(adjustment.date),
      encode_kind(adjustment.kind),
      adjustment.notes,
    ],
  )?;
  Ok(())
}

fn insert_sale(conn: &rusqlite::Connection, draft: &SaleDraft) -> Result<DailySale> {
  let sale = DailySale {
    sale_id: Uuid::new_v4(),
    date:    draft.date,
    amount:  draft.amount,
    notes:   draft.notes.clone(),
  };
  conn.execute(
    "INSERT INTO daily_sales (sale_id, date, amount, notes)
     VALUES (?1, ?2, ?3, ?4)",
    rusqlite::params![
      encode_uuid(sale.sale_id),
      encode_date(sale.date),
      sale.amount,
      sale.notes,
    ],
  )?;
  Ok(sale)
}

/// Errors if the supplier does not exist.
fn insert_supplier_payment(
  conn: &rusqlite::Connection,
  payment: &SupplierPayment,
) -> Result<()> {
  if load_supplier(conn, payment.supplier_id)?.is_none() {
    return Err(CoreError::SupplierNotFound(payment.supplier_id).into());
  }
  conn.execute(
    "INSERT INTO supplier_payments (payment_id, supplier_id, amount, date, notes)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    rusqlite::params![
      encode_uuid(payment.payment_id),
      encode_uuid(payment.supplier_id),
      payment.amount,
      encode_date(payment.date),
      payment.notes,
    ],
  )?;
  Ok(())
}

fn update_supplier_payment_row(
  conn: &rusqlite::Connection,
  id: Uuid,
  input: &SupplierPaymentUpdate,
) -> Result<SupplierPayment> {
  let payment = match load_supplier_payment(conn, id)? {
    Some(p) => p,
    None => return Err(CoreError::SupplierPaymentNotFound(id).into()),
  };
  conn.execute(
    "UPDATE supplier_payments SET amount = ?1, date = ?2, notes = ?3
     WHERE payment_id = ?4",
    rusqlite::params![
      input.amount,
      encode_date(input.date),
      input.notes,
      encode_uuid(id)
    ],
  )?;
  Ok(SupplierPayment {
    amount: input.amount,
    date: input.date,
    notes: input.notes.clone(),
    ..payment
  })
}

fn set_status(
  conn: &rusqlite::Connection,
  credit_id: Uuid,
  status: CreditStatus,
) -> Result<()> {
  conn.execute(
    "UPDATE credits SET status = ?1 WHERE credit_id = ?2",
    rusqlite::params![encode_status(status), encode_uuid(credit_id)],
  )?;
  Ok(())
}

/// Recompute a credit's state and re-sync the cached status column.
fn sync_status(conn: &rusqlite::Connection, credit_id: Uuid) -> Result<()> {
  let credit = match load_credit(conn, credit_id)? {
    Some(c) => c,
    None => return Ok(()),
  };
  let paid = total_paid(conn, credit_id)?;
  let state = balance::resolve(credit.amount, paid);
  if state.status != credit.status {
    set_status(conn, credit_id, state.status)?;
  }
  Ok(())
}

// ─── Transactional operations ────────────────────────────────────────────────

fn submit_credit_tx(
  tx: &rusqlite::Transaction<'_>,
  input: &CreditSubmission,
  now: DateTime<Utc>,
) -> Result<CreditReceipt> {
  if load_customer(tx, input.customer_id)?.is_none() {
    return Err(CoreError::CustomerNotFound(input.customer_id).into());
  }

  // Newest-first scan for a credit that is active both by stored status and
  // by computed balance. Legacy data may hold several; the most recent wins.
  let mut target: Option<(Credit, f64)> = None;
  for credit in credits_of(tx, input.customer_id)? {
    if credit.status != CreditStatus::Active {
      continue;
    }
    let paid = total_paid(tx, credit.credit_id)?;
    if balance::resolve(credit.amount, paid).is_active() {
      target = Some((credit, paid));
      break;
    }
  }

  match target {
    Some((mut credit, paid)) => {
      credit.amount += input.amount;
      tx.execute(
        "UPDATE credits SET amount = ?1 WHERE credit_id = ?2",
        rusqlite::params![credit.amount, encode_uuid(credit.credit_id)],
      )?;

      let adjustment = CreditAdjustment {
        adjustment_id: Uuid::new_v4(),
        credit_id:     credit.credit_id,
        amount:        input.amount,
        date:          now,
        kind:          AdjustmentKind::Addition,
        notes:         input.notes.clone(),
      };
      // The audit insert is best-effort: the principal update stands even
      // when the audit row cannot be written.
      let adjustment = match insert_adjustment(tx, &adjustment) {
        Ok(()) => Some(adjustment),
        Err(e) => {
          tracing::warn!(
            credit_id = %credit.credit_id,
            error = %e,
            "adjustment audit row not written; principal update kept",
          );
          None
        }
      };

      let state = balance::resolve(credit.amount, paid);
      Ok(CreditReceipt {
        action: CreditAction::Applied,
        credit: ResolvedCredit { credit, state },
        adjustment,
      })
    }
    None => {
      let credit = Credit {
        credit_id:   Uuid::new_v4(),
        customer_id: input.customer_id,
        amount:      input.amount,
        date:        now,
        status:      CreditStatus::Active,
      };
      insert_credit(tx, &credit)?;
      let state = balance::resolve(credit.amount, 0.0);
      Ok(CreditReceipt {
        action:     CreditAction::Opened,
        credit:     ResolvedCredit { credit, state },
        adjustment: None,
      })
    }
  }
}

fn submit_payment_tx(
  tx: &rusqlite::Transaction<'_>,
  input: &PaymentSubmission,
  now: DateTime<Utc>,
) -> Result<PaymentReceipt> {
  let mut credit = match load_credit(tx, input.credit_id)? {
    Some(c) => c,
    None => return Err(CoreError::CreditNotFound(input.credit_id).into()),
  };

  let paid = total_paid(tx, credit.credit_id)?;
  let before = balance::resolve(credit.amount, paid);

  if !before.is_active() {
    return Err(
      CoreError::CreditAlreadyPaid {
        credit_id: credit.credit_id,
        balance:   before.balance,
      }
      .into(),
    );
  }
  if input.amount > before.balance + balance::EPSILON {
    return Err(
      CoreError::PaymentExceedsBalance {
        credit_id: credit.credit_id,
        balance:   before.balance,
      }
      .into(),
    );
  }

  let payment = Payment {
    payment_id: Uuid::new_v4(),
    credit_id:  credit.credit_id,
    amount:     input.amount,
    date:       now,
  };
  insert_payment(tx, &payment)?;

  let after = balance::resolve(credit.amount, paid + payment.amount);
  if after.status != credit.status {
    set_status(tx, credit.credit_id, after.status)?;
    credit.status = after.status;
  }

  Ok(PaymentReceipt {
    payment,
    credit: ResolvedCredit { credit, state: after },
  })
}

fn update_payment_tx(
  tx: &rusqlite::Transaction<'_>,
  id: Uuid,
  input: &PaymentUpdate,
) -> Result<Payment> {
  let payment = match load_payment(tx, id)? {
    Some(p) => p,
    None => return Err(CoreError::PaymentNotFound(id).into()),
  };
  tx.execute(
    "UPDATE payments SET amount = ?1, date = ?2 WHERE payment_id = ?3",
    rusqlite::params![input.amount, encode_dt(input.date), encode_uuid(id)],
  )?;
  sync_status(tx, payment.credit_id)?;
  Ok(Payment { amount: input.amount, date: input.date, ..payment })
}

fn delete_payment_tx(tx: &rusqlite::Transaction<'_>, id: Uuid) -> Result<()> {
  let payment = match load_payment(tx, id)? {
    Some(p) => p,
    None => return Err(CoreError::PaymentNotFound(id).into()),
  };
  tx.execute(
    "DELETE FROM payments WHERE payment_id = ?1",
    rusqlite::params![encode_uuid(id)],
  )?;
  // The credit may flip back to active.
  sync_status(tx, payment.credit_id)?;
  Ok(())
}

fn cancel_credit_tx(
  tx: &rusqlite::Transaction<'_>,
  id: Uuid,
) -> Result<CancelReceipt> {
  if load_credit(tx, id)?.is_none() {
    return Err(CoreError::CreditNotFound(id).into());
  }
  let id_str = encode_uuid(id);
  let payments = tx.execute(
    "DELETE FROM payments WHERE credit_id = ?1",
    rusqlite::params![id_str],
  )?;
  let adjustments = tx.execute(
    "DELETE FROM adjustments WHERE credit_id = ?1",
    rusqlite::params![id_str],
  )?;
  tx.execute(
    "DELETE FROM credits WHERE credit_id = ?1",
    rusqlite::params![id_str],
  )?;
  Ok(CancelReceipt { payments, adjustments })
}

fn purge_customer_tx(
  tx: &rusqlite::Transaction<'_>,
  sink: &dyn BackupSink,
  id: Uuid,
  deleted_at: DateTime<Utc>,
) -> Result<CustomerPurge> {
  let customer = match load_customer(tx, id)? {
    Some(c) => c,
    None => return Err(CoreError::CustomerNotFound(id).into()),
  };

  let credits = credits_of(tx, id)?;
  let mut payments = Vec::new();
  let mut adjustments = Vec::new();
  for credit in &credits {
    payments.extend(payments_of(tx, credit.credit_id)?);
    adjustments.extend(adjustments_of(tx, credit.credit_id)?);
  }

  let (n_credits, n_payments, n_adjustments) =
    (credits.len(), payments.len(), adjustments.len());

  // Snapshot-first: nothing is deleted unless the backup is durable.
  let snapshot = SnapshotDocument::Customer(CustomerSnapshot {
    deleted_at,
    customer,
    credits,
    payments,
    adjustments,
  });
  let backup = sink.persist(&snapshot).map_err(Error::Backup)?;

  let id_str = encode_uuid(id);
  tx.execute(
    "DELETE FROM payments WHERE credit_id IN
       (SELECT credit_id FROM credits WHERE customer_id = ?1)",
    rusqlite::params![id_str],
  )?;
  tx.execute(
    "DELETE FROM adjustments WHERE credit_id IN
       (SELECT credit_id FROM credits WHERE customer_id = ?1)",
    rusqlite::params![id_str],
  )?;
  tx.execute(
    "DELETE FROM credits WHERE customer_id = ?1",
    rusqlite::params![id_str],
  )?;
  tx.execute(
    "DELETE FROM customers WHERE customer_id = ?1",
    rusqlite::params![id_str],
  )?;

  Ok(CustomerPurge {
    backup,
    credits: n_credits,
    payments: n_payments,
    adjustments: n_adjustments,
  })
}

fn purge_supplier_tx(
  tx: &rusqlite::Transaction<'_>,
  sink: &dyn BackupSink,
  id: Uuid,
  deleted_at: DateTime<Utc>,
) -> Result<SupplierPurge> {
  let supplier = match load_supplier(tx, id)? {
    Some(s) => s,
    None => return Err(CoreError::SupplierNotFound(id).into()),
  };

  let payments = supplier_payments_of(tx, id)?;
  let n_payments = payments.len();

  let snapshot = SnapshotDocument::Supplier(SupplierSnapshot {
    deleted_at,
    supplier,
    payments,
  });
  let backup = sink.persist(&snapshot).map_err(Error::Backup)?;

  let id_str = encode_uuid(id);
  tx.execute(
    "DELETE FROM supplier_payments WHERE supplier_id = ?1",
    rusqlite::params![id_str],
  )?;
  tx.execute(
    "DELETE FROM suppliers WHERE supplier_id = ?1",
    rusqlite::params![id_str],
  )?;

  Ok(SupplierPurge { backup, payments: n_payments })
}

fn record_sale_tx(
  tx: &rusqlite::Transaction<'_>,
  draft: &SaleDraft,
  resolution: Option<DuplicateResolution>,
) -> Result<SaleOutcome> {
  let existing = sales_on(tx, draft.date)?;

  let first = match existing.first() {
    None => {
      let sale = insert_sale(tx, draft)?;
      return Ok(SaleOutcome::Recorded { sale });
    }
    Some(first) => first.clone(),
  };

  match resolution {
    None => Ok(SaleOutcome::NeedsResolution { existing }),
    Some(DuplicateResolution::RegisterAdditional) => {
      let sale = insert_sale(tx, draft)?;
      Ok(SaleOutcome::Recorded { sale })
    }
    Some(DuplicateResolution::Overwrite) => {
      // Replace the first recorded row in place; id and date survive.
      tx.execute(
        "UPDATE daily_sales SET amount = ?1, notes = ?2 WHERE sale_id = ?3",
        rusqlite::params![
          draft.amount,
          draft.notes,
          encode_uuid(first.sale_id)
        ],
      )?;
      Ok(SaleOutcome::Recorded {
        sale: DailySale {
          sale_id: first.sale_id,
          date:    first.date,
          amount:  draft.amount,
          notes:   draft.notes.clone(),
        },
      })
    }
  }
}

// ─── Report queries ──────────────────────────────────────────────────────────

fn statement_of(
  conn: &rusqlite::Connection,
  credit_id: Uuid,
) -> Result<CreditStatement> {
  let credit = match load_credit(conn, credit_id)? {
    Some(c) => c,
    None => return Err(CoreError::CreditNotFound(credit_id).into()),
  };
  let customer = match load_customer(conn, credit.customer_id)? {
    Some(c) => c,
    None => return Err(CoreError::CustomerNotFound(credit.customer_id).into()),
  };

  let payments = payments_of(conn, credit_id)?;
  let adjustments = adjustments_of(conn, credit_id)?;
  let paid: f64 = payments.iter().map(|p| p.amount).sum();

  let mut entries =
    Vec::with_capacity(payments.len() + adjustments.len());
  entries.extend(payments.into_iter().map(|p| StatementEntry {
    date:   p.date,
    kind:   EntryKind::Payment,
    amount: -p.amount,
    notes:  None,
  }));
  entries.extend(adjustments.into_iter().map(|a| StatementEntry {
    date:   a.date,
    kind:   EntryKind::Adjustment,
    amount: a.amount,
    notes:  a.notes,
  }));
  entries.sort_by_key(|e| e.date);

  let state = balance::resolve(credit.amount, paid);
  Ok(CreditStatement { customer, credit, entries, state })
}

/// `(amount, total_paid)` per credit, for dashboard aggregation.
fn credit_totals(conn: &rusqlite::Connection) -> Result<Vec<(f64, f64)>> {
  let mut stmt = conn.prepare(
    "SELECT c.amount, COALESCE(SUM(p.amount), 0.0)
     FROM credits c
     LEFT JOIN payments p ON p.credit_id = c.credit_id
     GROUP BY c.credit_id",
  )?;
  let rows = stmt
    .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn dashboard_of(
  conn: &rusqlite::Connection,
  today: NaiveDate,
) -> Result<DashboardSummary> {
  let customers: i64 =
    conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;

  let mut active_credits = 0;
  let mut paid_credits = 0;
  let mut outstanding_total = 0.0;
  for (amount, paid) in credit_totals(conn)? {
    let state = balance::resolve(amount, paid);
    if state.is_active() {
      active_credits += 1;
      outstanding_total += state.balance;
    } else {
      paid_credits += 1;
    }
  }

  let month_like = format!("{}-%", CalendarMonth::of(today));
  let supplier_payments_month: f64 = conn.query_row(
    "SELECT COALESCE(SUM(amount), 0.0) FROM supplier_payments
     WHERE date LIKE ?1",
    rusqlite::params![month_like],
    |row| row.get(0),
  )?;

  let sales_today: f64 = conn.query_row(
    "SELECT COALESCE(SUM(amount), 0.0) FROM daily_sales WHERE date = ?1",
    rusqlite::params![encode_date(today)],
    |row| row.get(0),
  )?;

  Ok(DashboardSummary {
    customers: customers as usize,
    active_credits,
    paid_credits,
    outstanding_total,
    supplier_payments_month,
    sales_today,
  })
}

/// Count rows per `YYYY-MM` bucket; the first 7 chars of both RFC 3339
/// timestamps and plain dates are exactly that bucket.
fn month_counts(
  conn: &rusqlite::Connection,
  sql: &str,
) -> Result<HashMap<String, usize>> {
  let mut stmt = conn.prepare(sql)?;
  let rows = stmt
    .query_map([], |row| {
      Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows.into_iter().map(|(k, n)| (k, n as usize)).collect())
}

fn month_sums(
  conn: &rusqlite::Connection,
  sql: &str,
) -> Result<HashMap<String, f64>> {
  let mut stmt = conn.prepare(sql)?;
  let rows = stmt
    .query_map([], |row| {
      Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows.into_iter().collect())
}

fn activity_of(
  conn: &rusqlite::Connection,
  now: NaiveDate,
  months: u32,
) -> Result<Vec<MonthlyActivity>> {
  let mut buckets = Vec::with_capacity(months as usize);
  let mut month = CalendarMonth::of(now);
  for _ in 0..months {
    buckets.push(month);
    month = month.pred();
  }
  buckets.reverse();

  let credits = month_counts(
    conn,
    "SELECT substr(date, 1, 7), COUNT(*) FROM credits GROUP BY 1",
  )?;
  let payments = month_counts(
    conn,
    "SELECT substr(date, 1, 7), COUNT(*) FROM payments GROUP BY 1",
  )?;
  let sales = month_sums(
    conn,
    "SELECT substr(date, 1, 7), COALESCE(SUM(amount), 0.0)
     FROM daily_sales GROUP BY 1",
  )?;

  Ok(
    buckets
      .into_iter()
      .map(|m| {
        let key = m.to_string();
        MonthlyActivity {
          month:          m,
          credits_opened: credits.get(&key).copied().unwrap_or(0),
          payments_made:  payments.get(&key).copied().unwrap_or(0),
          sales_total:    sales.get(&key).copied().unwrap_or(0.0),
        }
      })
      .collect(),
  )
}

// ─── LedgerStore impl ────────────────────────────────────────────────────────

impl LedgerStore for SqliteStore {
  type Error = Error;

  // ── Customers ─────────────────────────────────────────────────────────────

  async fn add_customer(&self, input: NewCustomer) -> Result<Customer> {
    let customer = Customer {
      customer_id: Uuid::new_v4(),
      name:        input.name,
      phone:       input.phone,
      address:     input.address,
    };

    let row = customer.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO customers (customer_id, name, phone, address)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            encode_uuid(row.customer_id),
            row.name,
            row.phone,
            row.address
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(customer)
  }

  async fn get_customer(&self, id: Uuid) -> Result<Option<Customer>> {
    self.conn.call(move |conn| Ok(load_customer(conn, id))).await?
  }

  async fn list_customers(&self) -> Result<Vec<Customer>> {
    let raws: Vec<RawCustomer> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT customer_id, name, phone, address FROM customers
           ORDER BY name COLLATE NOCASE",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawCustomer {
              customer_id: row.get(0)?,
              name:        row.get(1)?,
              phone:       row.get(2)?,
              address:     row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCustomer::into_customer).collect()
  }

  async fn update_customer(
    &self,
    id: Uuid,
    input: NewCustomer,
  ) -> Result<Customer> {
    let updated = Customer {
      customer_id: id,
      name:        input.name,
      phone:       input.phone,
      address:     input.address,
    };

    let row = updated.clone();
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE customers SET name = ?1, phone = ?2, address = ?3
           WHERE customer_id = ?4",
          rusqlite::params![
            row.name,
            row.phone,
            row.address,
            encode_uuid(id)
          ],
        )?)
      })
      .await?;

    if n == 0 {
      return Err(CoreError::CustomerNotFound(id).into());
    }
    Ok(updated)
  }

  async fn purge_customer(&self, id: Uuid) -> Result<CustomerPurge> {
    let sink = Arc::clone(&self.sink);
    let deleted_at = Utc::now();
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let result = purge_customer_tx(&tx, sink.as_ref(), id, deleted_at);
        if result.is_ok() {
          tx.commit()?;
        }
        Ok(result)
      })
      .await?
  }

  // ── Credits ───────────────────────────────────────────────────────────────

  async fn submit_credit(
    &self,
    input: CreditSubmission,
  ) -> Result<CreditReceipt> {
    if input.amount <= 0.0 {
      return Err(
        CoreError::Validation("credit amount must be positive".into()).into(),
      );
    }

    let now = Utc::now();
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let result = submit_credit_tx(&tx, &input, now);
        if result.is_ok() {
          tx.commit()?;
        }
        Ok(result)
      })
      .await?
  }

  async fn get_credit(&self, id: Uuid) -> Result<Option<ResolvedCredit>> {
    self.conn.call(move |conn| Ok(resolved_credit(conn, id))).await?
  }

  async fn list_credits(&self) -> Result<Vec<CreditWithCustomer>> {
    let rows: Vec<(RawCredit, RawCustomer, f64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             c.credit_id, c.customer_id, c.amount, c.date, c.status,
             cu.name, cu.phone, cu.address,
             COALESCE(SUM(p.amount), 0.0) AS paid
           FROM credits c
           JOIN customers cu ON cu.customer_id = c.customer_id
           LEFT JOIN payments p ON p.credit_id = c.credit_id
           GROUP BY c.credit_id
           ORDER BY c.date DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok((
              RawCredit {
                credit_id:   row.get(0)?,
                customer_id: row.get(1)?,
                amount:      row.get(2)?,
                date:        row.get(3)?,
                status:      row.get(4)?,
              },
              RawCustomer {
                customer_id: row.get(1)?,
                name:        row.get(5)?,
                phone:       row.get(6)?,
                address:     row.get(7)?,
              },
              row.get(8)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(raw_credit, raw_customer, paid)| {
        let credit = raw_credit.into_credit()?;
        let customer = raw_customer.into_customer()?;
        let state = balance::resolve(credit.amount, paid);
        Ok(CreditWithCustomer { credit, customer, state })
      })
      .collect()
  }

  async fn credits_for_customer(
    &self,
    customer_id: Uuid,
  ) -> Result<Vec<ResolvedCredit>> {
    self
      .conn
      .call(move |conn| Ok(credits_for(conn, customer_id)))
      .await?
  }

  async fn cancel_credit(&self, id: Uuid) -> Result<CancelReceipt> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let result = cancel_credit_tx(&tx, id);
        if result.is_ok() {
          tx.commit()?;
        }
        Ok(result)
      })
      .await?
  }

  // ── Payments ──────────────────────────────────────────────────────────────

  async fn submit_payment(
    &self,
    input: PaymentSubmission,
  ) -> Result<PaymentReceipt> {
    if input.amount <= 0.0 {
      return Err(
        CoreError::Validation("payment amount must be positive".into())
          .into(),
      );
    }

    let now = Utc::now();
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let result = submit_payment_tx(&tx, &input, now);
        if result.is_ok() {
          tx.commit()?;
        }
        Ok(result)
      })
      .await?
  }

  async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>> {
    self.conn.call(move |conn| Ok(load_payment(conn, id))).await?
  }

  async fn list_payments(&self) -> Result<Vec<PaymentWithCredit>> {
    let rows: Vec<(RawPayment, RawCredit)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             p.payment_id, p.credit_id, p.amount, p.date,
             c.customer_id, c.amount, c.date, c.status
           FROM payments p
           JOIN credits c ON c.credit_id = p.credit_id
           ORDER BY p.date DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok((
              RawPayment {
                payment_id: row.get(0)?,
                credit_id:  row.get(1)?,
                amount:     row.get(2)?,
                date:       row.get(3)?,
              },
              RawCredit {
                credit_id:   row.get(1)?,
                customer_id: row.get(4)?,
                amount:      row.get(5)?,
                date:        row.get(6)?,
                status:      row.get(7)?,
              },
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(raw_payment, raw_credit)| {
        Ok(PaymentWithCredit {
          payment: raw_payment.into_payment()?,
          credit:  raw_credit.into_credit()?,
        })
      })
      .collect()
  }

  async fn payments_for_credit(&self, credit_id: Uuid) -> Result<Vec<Payment>> {
    self.conn.call(move |conn| Ok(payments_for(conn, credit_id))).await?
  }

  async fn update_payment(
    &self,
    id: Uuid,
    input: PaymentUpdate,
  ) -> Result<Payment> {
    if input.amount <= 0.0 {
      return Err(
        CoreError::Validation("payment amount must be positive".into())
          .into(),
      );
    }

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let result = update_payment_tx(&tx, id, &input);
        if result.is_ok() {
          tx.commit()?;
        }
        Ok(result)
      })
      .await?
  }

  async fn delete_payment(&self, id: Uuid) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let result = delete_payment_tx(&tx, id);
        if result.is_ok() {
          tx.commit()?;
        }
        Ok(result)
      })
      .await?
  }

  // ── Adjustments ───────────────────────────────────────────────────────────

  async fn adjustments_for_credit(
    &self,
    credit_id: Uuid,
  ) -> Result<Vec<CreditAdjustment>> {
    self
      .conn
      .call(move |conn| Ok(adjustments_for(conn, credit_id)))
      .await?
  }

  async fn get_adjustment(
    &self,
    id: Uuid,
  ) -> Result<Option<CreditAdjustment>> {
    self.conn.call(move |conn| Ok(load_adjustment(conn, id))).await?
  }

  // ── Suppliers ─────────────────────────────────────────────────────────────

  async fn add_supplier(&self, input: NewSupplier) -> Result<Supplier> {
    let supplier = Supplier {
      supplier_id: Uuid::new_v4(),
      name:        input.name,
      phone:       input.phone,
      email:       input.email,
      address:     input.address,
      notes:       input.notes,
    };

    let row = supplier.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO suppliers (supplier_id, name, phone, email, address, notes)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            encode_uuid(row.supplier_id),
            row.name,
            row.phone,
            row.email,
            row.address,
            row.notes
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(supplier)
  }

  async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>> {
    self.conn.call(move |conn| Ok(load_supplier(conn, id))).await?
  }

  async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
    let raws: Vec<RawSupplier> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT supplier_id, name, phone, email, address, notes
           FROM suppliers ORDER BY name COLLATE NOCASE",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawSupplier {
              supplier_id: row.get(0)?,
              name:        row.get(1)?,
              phone:       row.get(2)?,
              email:       row.get(3)?,
              address:     row.get(4)?,
              notes:       row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSupplier::into_supplier).collect()
  }

  async fn update_supplier(
    &self,
    id: Uuid,
    input: NewSupplier,
  ) -> Result<Supplier> {
    let updated = Supplier {
      supplier_id: id,
      name:        input.name,
      phone:       input.phone,
      email:       input.email,
      address:     input.address,
      notes:       input.notes,
    };

    let row = updated.clone();
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE suppliers
           SET name = ?1, phone = ?2, email = ?3, address = ?4, notes = ?5
           WHERE supplier_id = ?6",
          rusqlite::params![
            row.name,
            row.phone,
            row.email,
            row.address,
            row.notes,
            encode_uuid(id)
          ],
        )?)
      })
      .await?;

    if n == 0 {
      return Err(CoreError::SupplierNotFound(id).into());
    }
    Ok(updated)
  }

  async fn purge_supplier(&self, id: Uuid) -> Result<SupplierPurge> {
    let sink = Arc::clone(&self.sink);
    let deleted_at = Utc::now();
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let result = purge_supplier_tx(&tx, sink.as_ref(), id, deleted_at);
        if result.is_ok() {
          tx.commit()?;
        }
        Ok(result)
      })
      .await?
  }

  // ── Supplier payments ─────────────────────────────────────────────────────

  async fn add_supplier_payment(
    &self,
    input: NewSupplierPayment,
  ) -> Result<SupplierPayment> {
    if input.amount <= 0.0 {
      return Err(
        CoreError::Validation(
          "supplier payment amount must be positive".into(),
        )
        .into(),
      );
    }

    let payment = SupplierPayment {
      payment_id:  Uuid::new_v4(),
      supplier_id: input.supplier_id,
      amount:      input.amount,
      date:        input.date,
      notes:       input.notes,
    };

    let row = payment.clone();
    self
      .conn
      .call(move |conn| Ok(insert_supplier_payment(conn, &row)))
      .await??;

    Ok(payment)
  }

  async fn get_supplier_payment(
    &self,
    id: Uuid,
  ) -> Result<Option<SupplierPayment>> {
    self
      .conn
      .call(move |conn| Ok(load_supplier_payment(conn, id)))
      .await?
  }

  async fn list_supplier_payments(
    &self,
  ) -> Result<Vec<SupplierPaymentWithSupplier>> {
    let rows: Vec<(RawSupplierPayment, RawSupplier)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             p.payment_id, p.supplier_id, p.amount, p.date, p.notes,
             s.name, s.phone, s.email, s.address, s.notes
           FROM supplier_payments p
           JOIN suppliers s ON s.supplier_id = p.supplier_id
           ORDER BY p.date DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok((
              RawSupplierPayment {
                payment_id:  row.get(0)?,
                supplier_id: row.get(1)?,
                amount:      row.get(2)?,
                date:        row.get(3)?,
                notes:       row.get(4)?,
              },
              RawSupplier {
                supplier_id: row.get(1)?,
                name:        row.get(5)?,
                phone:       row.get(6)?,
                email:       row.get(7)?,
                address:     row.get(8)?,
                notes:       row.get(9)?,
              },
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(raw_payment, raw_supplier)| {
        Ok(SupplierPaymentWithSupplier {
          payment:  raw_payment.into_payment()?,
          supplier: raw_supplier.into_supplier()?,
        })
      })
      .collect()
  }

  async fn payments_for_supplier(
    &self,
    supplier_id: Uuid,
  ) -> Result<Vec<SupplierPayment>> {
    self
      .conn
      .call(move |conn| Ok(supplier_payments_for(conn, supplier_id)))
      .await?
  }

  async fn update_supplier_payment(
    &self,
    id: Uuid,
    input: SupplierPaymentUpdate,
  ) -> Result<SupplierPayment> {
    if input.amount <= 0.0 {
      return Err(
        CoreError::Validation(
          "supplier payment amount must be positive".into(),
        )
        .into(),
      );
    }

    self
      .conn
      .call(move |conn| Ok(update_supplier_payment_row(conn, id, &input)))
      .await?
  }

  async fn delete_supplier_payment(&self, id: Uuid) -> Result<()> {
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM supplier_payments WHERE payment_id = ?1",
          rusqlite::params![encode_uuid(id)],
        )?)
      })
      .await?;

    if n == 0 {
      return Err(CoreError::SupplierPaymentNotFound(id).into());
    }
    Ok(())
  }

  // ── Daily sales ───────────────────────────────────────────────────────────

  async fn record_daily_sale(
    &self,
    draft: SaleDraft,
    resolution: Option<DuplicateResolution>,
  ) -> Result<SaleOutcome> {
    if draft.amount < 0.0 {
      return Err(
        CoreError::Validation("sale amount must not be negative".into())
          .into(),
      );
    }

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let result = record_sale_tx(&tx, &draft, resolution);
        if result.is_ok() {
          tx.commit()?;
        }
        Ok(result)
      })
      .await?
  }

  async fn get_daily_sale(&self, id: Uuid) -> Result<Option<DailySale>> {
    self.conn.call(move |conn| Ok(load_sale(conn, id))).await?
  }

  async fn list_daily_sales(
    &self,
    month: Option<CalendarMonth>,
  ) -> Result<Vec<DailySale>> {
    let like = month.map(|m| format!("{m}-%"));

    let raws: Vec<RawSale> = self
      .conn
      .call(move |conn| {
        let map = |row: &rusqlite::Row<'_>| {
          Ok(RawSale {
            sale_id: row.get(0)?,
            date:    row.get(1)?,
            amount:  row.get(2)?,
            notes:   row.get(3)?,
          })
        };

        let rows = if let Some(pattern) = like {
          let mut stmt = conn.prepare(
            "SELECT sale_id, date, amount, notes FROM daily_sales
             WHERE date LIKE ?1 ORDER BY date DESC",
          )?;
          stmt
            .query_map(rusqlite::params![pattern], map)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT sale_id, date, amount, notes FROM daily_sales
             ORDER BY date DESC",
          )?;
          stmt.query_map([], map)?.collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSale::into_sale).collect()
  }

  async fn update_daily_sale(
    &self,
    id: Uuid,
    draft: SaleDraft,
  ) -> Result<DailySale> {
    if draft.amount < 0.0 {
      return Err(
        CoreError::Validation("sale amount must not be negative".into())
          .into(),
      );
    }

    let updated = DailySale {
      sale_id: id,
      date:    draft.date,
      amount:  draft.amount,
      notes:   draft.notes,
    };

    let row = updated.clone();
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE daily_sales SET date = ?1, amount = ?2, notes = ?3
           WHERE sale_id = ?4",
          rusqlite::params![
            encode_date(row.date),
            row.amount,
            row.notes,
            encode_uuid(id)
          ],
        )?)
      })
      .await?;

    if n == 0 {
      return Err(CoreError::SaleNotFound(id).into());
    }
    Ok(updated)
  }

  async fn delete_daily_sale(&self, id: Uuid) -> Result<()> {
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM daily_sales WHERE sale_id = ?1",
          rusqlite::params![encode_uuid(id)],
        )?)
      })
      .await?;

    if n == 0 {
      return Err(CoreError::SaleNotFound(id).into());
    }
    Ok(())
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  async fn put_setting(&self, key: String, value: String) -> Result<Setting> {
    let setting = Setting { key, value };

    let row = setting.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO settings (key, value) VALUES (?1, ?2)
           ON CONFLICT(key) DO UPDATE SET value = excluded.value",
          rusqlite::params![row.key, row.value],
        )?;
        Ok(())
      })
      .await?;

    Ok(setting)
  }

  async fn get_setting(&self, key: String) -> Result<Option<Setting>> {
    let setting = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT key, value FROM settings WHERE key = ?1",
              rusqlite::params![key],
              |row| Ok(Setting { key: row.get(0)?, value: row.get(1)? }),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(setting)
  }

  async fn list_settings(&self) -> Result<Vec<Setting>> {
    let settings = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Setting { key: row.get(0)?, value: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(settings)
  }

  async fn delete_setting(&self, key: String) -> Result<()> {
    let reported = key.clone();
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM settings WHERE key = ?1",
          rusqlite::params![key],
        )?)
      })
      .await?;

    if n == 0 {
      return Err(CoreError::SettingNotFound(reported).into());
    }
    Ok(())
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  async fn credit_statement(&self, credit_id: Uuid) -> Result<CreditStatement> {
    self
      .conn
      .call(move |conn| Ok(statement_of(conn, credit_id)))
      .await?
  }

  async fn dashboard(&self, today: NaiveDate) -> Result<DashboardSummary> {
    self.conn.call(move |conn| Ok(dashboard_of(conn, today))).await?
  }

  async fn monthly_activity(
    &self,
    now: NaiveDate,
    months: u32,
  ) -> Result<Vec<MonthlyActivity>> {
    self
      .conn
      .call(move |conn| Ok(activity_of(conn, now, months)))
      .await?
  }
}
