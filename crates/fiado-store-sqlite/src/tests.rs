//! Integration tests for `SqliteStore` against an in-memory database.

use std::{path::PathBuf, sync::Arc};

use chrono::{NaiveDate, Utc};
use fiado_core::{
  Error as CoreError,
  backup::{BackupSink, SnapshotDocument},
  balance::EPSILON,
  credit::{CreditAction, CreditStatus, CreditSubmission},
  customer::NewCustomer,
  payment::{NewSupplierPayment, PaymentSubmission, PaymentUpdate},
  report::EntryKind,
  sale::{CalendarMonth, DailySale, DuplicateResolution, SaleDraft, SaleOutcome},
  store::LedgerStore,
  supplier::NewSupplier,
};
use tempfile::TempDir;
use uuid::Uuid;

use crate::{Error, FsBackupSink, SqliteStore};

async fn store() -> (SqliteStore, TempDir) {
  let dir = tempfile::tempdir().expect("temp dir");
  let sink = Arc::new(FsBackupSink::new(dir.path()));
  let s = SqliteStore::open_in_memory(sink)
    .await
    .expect("in-memory store");
  (s, dir)
}

/// A sink that always fails, for exercising purge aborts.
struct FailingSink;

impl BackupSink for FailingSink {
  fn persist(&self, _doc: &SnapshotDocument) -> std::io::Result<PathBuf> {
    Err(std::io::Error::other("disk full"))
  }
}

fn customer(name: &str) -> NewCustomer {
  NewCustomer { name: name.into(), phone: None, address: None }
}

fn supplier(name: &str) -> NewSupplier {
  NewSupplier {
    name:    name.into(),
    phone:   None,
    email:   None,
    address: None,
    notes:   None,
  }
}

fn credit(customer_id: Uuid, amount: f64) -> CreditSubmission {
  CreditSubmission { customer_id, amount, notes: None }
}

fn payment(credit_id: Uuid, amount: f64) -> PaymentSubmission {
  PaymentSubmission { credit_id, amount }
}

fn supplier_payment(
  supplier_id: Uuid,
  amount: f64,
  date: NaiveDate,
) -> NewSupplierPayment {
  NewSupplierPayment { supplier_id, amount, date, notes: None }
}

fn sale(date: NaiveDate, amount: f64) -> SaleDraft {
  SaleDraft { date, amount, notes: None }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn recorded(outcome: SaleOutcome) -> DailySale {
  match outcome {
    SaleOutcome::Recorded { sale } => sale,
    other => panic!("expected a recorded sale, got {other:?}"),
  }
}

// ─── Customers ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_customer() {
  let (s, _backups) = store().await;

  let added = s.add_customer(customer("Alice")).await.unwrap();
  let fetched = s.get_customer(added.customer_id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Alice");
  assert_eq!(fetched.customer_id, added.customer_id);
}

#[tokio::test]
async fn get_customer_missing_returns_none() {
  let (s, _backups) = store().await;
  assert!(s.get_customer(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_customer_replaces_contact_fields() {
  let (s, _backups) = store().await;
  let added = s.add_customer(customer("Alice")).await.unwrap();

  let updated = s
    .update_customer(
      added.customer_id,
      NewCustomer {
        name:    "Alice L".into(),
        phone:   Some("555-0101".into()),
        address: None,
      },
    )
    .await
    .unwrap();
  assert_eq!(updated.name, "Alice L");

  let fetched = s.get_customer(added.customer_id).await.unwrap().unwrap();
  assert_eq!(fetched.phone.as_deref(), Some("555-0101"));
}

#[tokio::test]
async fn update_missing_customer_errors() {
  let (s, _backups) = store().await;
  let err = s
    .update_customer(Uuid::new_v4(), customer("Nobody"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CustomerNotFound(_))));
}

// ─── Credit submission ───────────────────────────────────────────────────────

#[tokio::test]
async fn first_submission_opens_credit() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();

  let receipt = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  assert_eq!(receipt.action, CreditAction::Opened);
  assert!(receipt.adjustment.is_none());
  assert_eq!(receipt.credit.credit.amount, 100.0);
  assert_eq!(receipt.credit.state.balance, 100.0);
  assert_eq!(receipt.credit.state.status, CreditStatus::Active);
}

#[tokio::test]
async fn submission_tops_up_active_credit() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();

  let first = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let second = s.submit_credit(credit(c.customer_id, 50.0)).await.unwrap();

  assert_eq!(second.action, CreditAction::Applied);
  assert_eq!(second.credit.credit.credit_id, first.credit.credit.credit_id);
  assert_eq!(second.credit.credit.amount, 150.0);
  assert_eq!(second.credit.state.balance, 150.0);

  let adjustment = second.adjustment.expect("audit row");
  assert_eq!(adjustment.amount, 50.0);

  let trail = s
    .adjustments_for_credit(first.credit.credit.credit_id)
    .await
    .unwrap();
  assert_eq!(trail.len(), 1);

  // still a single credit for the customer
  let credits = s.credits_for_customer(c.customer_id).await.unwrap();
  assert_eq!(credits.len(), 1);
}

#[tokio::test]
async fn submission_after_payoff_opens_fresh_credit() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();

  let first = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let first_id = first.credit.credit.credit_id;
  s.submit_payment(payment(first_id, 100.0)).await.unwrap();

  let second = s.submit_credit(credit(c.customer_id, 40.0)).await.unwrap();
  assert_eq!(second.action, CreditAction::Opened);
  assert_ne!(second.credit.credit.credit_id, first_id);

  let credits = s.credits_for_customer(c.customer_id).await.unwrap();
  assert_eq!(credits.len(), 2);
  // newest first
  assert_eq!(credits[0].credit.amount, 40.0);
}

#[tokio::test]
async fn submit_credit_unknown_customer_errors() {
  let (s, _backups) = store().await;
  let err = s.submit_credit(credit(Uuid::new_v4(), 50.0)).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CustomerNotFound(_))));
}

#[tokio::test]
async fn submit_credit_rejects_non_positive_amount() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();

  let err = s.submit_credit(credit(c.customer_id, 0.0)).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::Validation(_))));
}

// ─── Payments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn repayment_scenario_tracks_balance() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();
  let receipt = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let id = receipt.credit.credit.credit_id;

  s.submit_payment(payment(id, 30.0)).await.unwrap();
  let after = s.submit_payment(payment(id, 20.0)).await.unwrap();
  assert_eq!(after.credit.state.balance, 50.0);
  assert_eq!(after.credit.state.status, CreditStatus::Active);

  // exceeds the remaining balance; the error carries that balance
  let err = s.submit_payment(payment(id, 60.0)).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::PaymentExceedsBalance { balance, .. })
      if balance == 50.0
  ));

  let settled = s.submit_payment(payment(id, 50.0)).await.unwrap();
  assert_eq!(settled.credit.state.status, CreditStatus::Paid);

  let err = s.submit_payment(payment(id, 10.0)).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::CreditAlreadyPaid { balance, .. })
      if balance.abs() <= EPSILON
  ));
}

#[tokio::test]
async fn rejected_payment_writes_nothing() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();
  let receipt = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let id = receipt.credit.credit.credit_id;

  let err = s.submit_payment(payment(id, 150.0)).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::PaymentExceedsBalance { .. })
  ));

  assert!(s.payments_for_credit(id).await.unwrap().is_empty());
  let fetched = s.get_credit(id).await.unwrap().unwrap();
  assert_eq!(fetched.state.balance, 100.0);
}

#[tokio::test]
async fn residue_within_tolerance_settles_credit() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();
  let receipt = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let id = receipt.credit.credit.credit_id;

  let settled = s.submit_payment(payment(id, 99.9995)).await.unwrap();
  assert_eq!(settled.credit.state.status, CreditStatus::Paid);
}

#[tokio::test]
async fn submit_payment_unknown_credit_errors() {
  let (s, _backups) = store().await;
  let err = s.submit_payment(payment(Uuid::new_v4(), 10.0)).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CreditNotFound(_))));
}

#[tokio::test]
async fn submit_payment_rejects_non_positive_amount() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();
  let receipt = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();

  let err = s
    .submit_payment(payment(receipt.credit.credit.credit_id, -5.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::Validation(_))));
}

#[tokio::test]
async fn deleting_payment_reactivates_credit() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();
  let receipt = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let id = receipt.credit.credit.credit_id;

  let paid = s.submit_payment(payment(id, 100.0)).await.unwrap();
  assert_eq!(paid.credit.state.status, CreditStatus::Paid);

  s.delete_payment(paid.payment.payment_id).await.unwrap();

  let fetched = s.get_credit(id).await.unwrap().unwrap();
  assert_eq!(fetched.state.status, CreditStatus::Active);
  assert_eq!(fetched.state.balance, 100.0);
  assert_eq!(fetched.credit.status, CreditStatus::Active);
}

#[tokio::test]
async fn updating_payment_resyncs_status() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();
  let receipt = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let id = receipt.credit.credit.credit_id;

  let paid = s.submit_payment(payment(id, 100.0)).await.unwrap();

  let updated = s
    .update_payment(
      paid.payment.payment_id,
      PaymentUpdate { amount: 40.0, date: paid.payment.date },
    )
    .await
    .unwrap();
  assert_eq!(updated.amount, 40.0);

  let fetched = s.get_credit(id).await.unwrap().unwrap();
  assert_eq!(fetched.state.status, CreditStatus::Active);
  assert_eq!(fetched.state.balance, 60.0);
}

#[tokio::test]
async fn list_payments_joins_credits() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();
  let receipt = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let id = receipt.credit.credit.credit_id;
  s.submit_payment(payment(id, 25.0)).await.unwrap();

  let all = s.list_payments().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].payment.amount, 25.0);
  assert_eq!(all[0].credit.credit_id, id);
}

// ─── Credit cancellation ─────────────────────────────────────────────────────

#[tokio::test]
async fn cancel_credit_removes_dependents() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();

  let opened = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let id = opened.credit.credit.credit_id;
  s.submit_payment(payment(id, 30.0)).await.unwrap();
  s.submit_credit(credit(c.customer_id, 50.0)).await.unwrap(); // audit row

  let receipt = s.cancel_credit(id).await.unwrap();
  assert_eq!(receipt.payments, 1);
  assert_eq!(receipt.adjustments, 1);

  assert!(s.get_credit(id).await.unwrap().is_none());
  // the customer survives
  assert!(s.get_customer(c.customer_id).await.unwrap().is_some());
}

#[tokio::test]
async fn cancel_missing_credit_errors() {
  let (s, _backups) = store().await;
  let err = s.cancel_credit(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CreditNotFound(_))));
}

// ─── Customer purge ──────────────────────────────────────────────────────────

#[tokio::test]
async fn purge_customer_snapshots_then_deletes() {
  let (s, backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();

  let first = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let first_id = first.credit.credit.credit_id;
  s.submit_payment(payment(first_id, 100.0)).await.unwrap();
  let second = s.submit_credit(credit(c.customer_id, 40.0)).await.unwrap();
  s.submit_payment(payment(second.credit.credit.credit_id, 10.0))
    .await
    .unwrap();

  let receipt = s.purge_customer(c.customer_id).await.unwrap();
  assert_eq!(receipt.credits, 2);
  assert_eq!(receipt.payments, 2);
  assert_eq!(receipt.adjustments, 0);
  assert!(receipt.backup.starts_with(backups.path()));

  // one snapshot document holding everything that was removed
  let text = std::fs::read_to_string(&receipt.backup).unwrap();
  let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
  assert_eq!(doc["customer"]["name"], "Alice");
  assert_eq!(doc["credits"].as_array().unwrap().len(), 2);
  assert_eq!(doc["payments"].as_array().unwrap().len(), 2);
  assert_eq!(doc["adjustments"].as_array().unwrap().len(), 0);
  assert!(doc["deleted_at"].is_string());

  assert!(s.get_customer(c.customer_id).await.unwrap().is_none());
  assert!(s.get_credit(first_id).await.unwrap().is_none());
  assert!(s.list_payments().await.unwrap().is_empty());
}

#[tokio::test]
async fn purge_aborts_when_backup_fails() {
  let s = SqliteStore::open_in_memory(Arc::new(FailingSink)).await.unwrap();
  let c = s.add_customer(customer("Bob")).await.unwrap();
  let receipt = s.submit_credit(credit(c.customer_id, 60.0)).await.unwrap();

  let err = s.purge_customer(c.customer_id).await.unwrap_err();
  assert!(matches!(err, Error::Backup(_)));

  // nothing was deleted
  assert!(s.get_customer(c.customer_id).await.unwrap().is_some());
  assert!(
    s.get_credit(receipt.credit.credit.credit_id).await.unwrap().is_some()
  );
}

#[tokio::test]
async fn purge_missing_customer_errors() {
  let (s, _backups) = store().await;
  let err = s.purge_customer(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CustomerNotFound(_))));
}

// ─── Suppliers ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn supplier_roundtrip() {
  let (s, _backups) = store().await;

  let added = s.add_supplier(supplier("Distribuidora Norte")).await.unwrap();
  let fetched = s.get_supplier(added.supplier_id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Distribuidora Norte");

  let updated = s
    .update_supplier(
      added.supplier_id,
      NewSupplier {
        name:    "Distribuidora Norte SA".into(),
        phone:   None,
        email:   Some("ventas@norte.example".into()),
        address: None,
        notes:   None,
      },
    )
    .await
    .unwrap();
  assert_eq!(updated.name, "Distribuidora Norte SA");

  let all = s.list_suppliers().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].email.as_deref(), Some("ventas@norte.example"));
}

#[tokio::test]
async fn supplier_payment_flow() {
  let (s, _backups) = store().await;
  let sup = s.add_supplier(supplier("Distribuidora Norte")).await.unwrap();

  let p = s
    .add_supplier_payment(supplier_payment(
      sup.supplier_id,
      80.0,
      day(2024, 6, 10),
    ))
    .await
    .unwrap();

  let listed = s.payments_for_supplier(sup.supplier_id).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].payment_id, p.payment_id);

  let updated = s
    .update_supplier_payment(
      p.payment_id,
      fiado_core::payment::SupplierPaymentUpdate {
        amount: 95.0,
        date:   day(2024, 6, 11),
        notes:  Some("corrected invoice".into()),
      },
    )
    .await
    .unwrap();
  assert_eq!(updated.amount, 95.0);

  let fetched = s.get_supplier_payment(p.payment_id).await.unwrap().unwrap();
  assert_eq!(fetched.date, day(2024, 6, 11));

  s.delete_supplier_payment(p.payment_id).await.unwrap();
  assert!(s.payments_for_supplier(sup.supplier_id).await.unwrap().is_empty());

  let err = s.delete_supplier_payment(p.payment_id).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::SupplierPaymentNotFound(_))
  ));
}

#[tokio::test]
async fn supplier_payment_rejects_bad_input() {
  let (s, _backups) = store().await;

  let err = s
    .add_supplier_payment(supplier_payment(
      Uuid::new_v4(),
      10.0,
      day(2024, 1, 1),
    ))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::SupplierNotFound(_))));

  let sup = s.add_supplier(supplier("Distribuidora Norte")).await.unwrap();
  let err = s
    .add_supplier_payment(supplier_payment(
      sup.supplier_id,
      0.0,
      day(2024, 1, 1),
    ))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::Validation(_))));
}

#[tokio::test]
async fn purge_supplier_snapshots_then_deletes() {
  let (s, backups) = store().await;
  let sup = s.add_supplier(supplier("Distribuidora Norte")).await.unwrap();
  s.add_supplier_payment(supplier_payment(
    sup.supplier_id,
    80.0,
    day(2024, 6, 10),
  ))
  .await
  .unwrap();
  s.add_supplier_payment(supplier_payment(
    sup.supplier_id,
    30.0,
    day(2024, 5, 20),
  ))
  .await
  .unwrap();

  let receipt = s.purge_supplier(sup.supplier_id).await.unwrap();
  assert_eq!(receipt.payments, 2);
  assert!(receipt.backup.starts_with(backups.path()));

  let text = std::fs::read_to_string(&receipt.backup).unwrap();
  let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
  assert_eq!(doc["supplier"]["name"], "Distribuidora Norte");
  assert_eq!(doc["payments"].as_array().unwrap().len(), 2);

  assert!(s.get_supplier(sup.supplier_id).await.unwrap().is_none());
  assert!(s.list_supplier_payments().await.unwrap().is_empty());
}

// ─── Parent scoping ──────────────────────────────────────────────────────────

#[tokio::test]
async fn scoped_lists_require_existing_parents() {
  let (s, _backups) = store().await;

  let err = s.credits_for_customer(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CustomerNotFound(_))));

  let err = s.payments_for_credit(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CreditNotFound(_))));

  let err = s.adjustments_for_credit(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CreditNotFound(_))));

  let err = s.payments_for_supplier(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::SupplierNotFound(_))));
}

// ─── Daily sales ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_sale_records_directly() {
  let (s, _backups) = store().await;

  let outcome =
    s.record_daily_sale(sale(day(2024, 5, 1), 100.0), None).await.unwrap();
  let row = recorded(outcome);
  assert_eq!(row.date, day(2024, 5, 1));
  assert_eq!(row.amount, 100.0);
}

#[tokio::test]
async fn duplicate_date_without_resolution_writes_nothing() {
  let (s, _backups) = store().await;
  s.record_daily_sale(sale(day(2024, 5, 1), 100.0), None).await.unwrap();

  let outcome =
    s.record_daily_sale(sale(day(2024, 5, 1), 80.0), None).await.unwrap();
  assert!(matches!(
    outcome,
    SaleOutcome::NeedsResolution { ref existing } if existing.len() == 1
  ));

  let all = s.list_daily_sales(None).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].amount, 100.0);
}

#[tokio::test]
async fn overwrite_keeps_id_and_date() {
  let (s, _backups) = store().await;
  let first = recorded(
    s.record_daily_sale(sale(day(2024, 5, 1), 100.0), None).await.unwrap(),
  );

  let overwritten = recorded(
    s.record_daily_sale(
      sale(day(2024, 5, 1), 80.0),
      Some(DuplicateResolution::Overwrite),
    )
    .await
    .unwrap(),
  );
  assert_eq!(overwritten.sale_id, first.sale_id);
  assert_eq!(overwritten.date, first.date);
  assert_eq!(overwritten.amount, 80.0);

  let all = s.list_daily_sales(None).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].amount, 80.0);
}

#[tokio::test]
async fn register_additional_appends_row() {
  let (s, _backups) = store().await;
  let first = recorded(
    s.record_daily_sale(sale(day(2024, 5, 1), 100.0), None).await.unwrap(),
  );

  let extra = recorded(
    s.record_daily_sale(
      sale(day(2024, 5, 1), 50.0),
      Some(DuplicateResolution::RegisterAdditional),
    )
    .await
    .unwrap(),
  );
  assert_ne!(extra.sale_id, first.sale_id);

  let all = s.list_daily_sales(None).await.unwrap();
  assert_eq!(all.len(), 2);

  // a third attempt without a resolution now reports both rows
  let outcome =
    s.record_daily_sale(sale(day(2024, 5, 1), 25.0), None).await.unwrap();
  assert!(matches!(
    outcome,
    SaleOutcome::NeedsResolution { ref existing } if existing.len() == 2
  ));
}

#[tokio::test]
async fn list_daily_sales_filters_by_month() {
  let (s, _backups) = store().await;
  s.record_daily_sale(sale(day(2024, 3, 1), 100.0), None).await.unwrap();
  s.record_daily_sale(sale(day(2024, 3, 5), 50.0), None).await.unwrap();
  s.record_daily_sale(sale(day(2024, 4, 1), 75.0), None).await.unwrap();

  let march = s
    .list_daily_sales(Some("2024-03".parse().unwrap()))
    .await
    .unwrap();
  assert_eq!(march.len(), 2);
  // date descending
  assert_eq!(march[0].date, day(2024, 3, 5));

  let all = s.list_daily_sales(None).await.unwrap();
  assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn update_daily_sale_bypasses_duplicate_policy() {
  let (s, _backups) = store().await;
  let first = recorded(
    s.record_daily_sale(sale(day(2024, 5, 1), 100.0), None).await.unwrap(),
  );
  recorded(s.record_daily_sale(sale(day(2024, 5, 2), 60.0), None).await.unwrap());

  // moving a row onto an occupied date is a plain edit
  let moved = s
    .update_daily_sale(first.sale_id, sale(day(2024, 5, 2), 110.0))
    .await
    .unwrap();
  assert_eq!(moved.date, day(2024, 5, 2));

  let all = s.list_daily_sales(None).await.unwrap();
  assert_eq!(all.len(), 2);
  assert!(all.iter().all(|row| row.date == day(2024, 5, 2)));
}

#[tokio::test]
async fn delete_missing_sale_errors() {
  let (s, _backups) = store().await;
  let err = s.delete_daily_sale(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::SaleNotFound(_))));
}

// ─── Settings ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_setting_upserts() {
  let (s, _backups) = store().await;

  s.put_setting("business_name".into(), "La Tiendita".into()).await.unwrap();
  s.put_setting("business_name".into(), "La Tiendita 2".into())
    .await
    .unwrap();

  let fetched =
    s.get_setting("business_name".into()).await.unwrap().unwrap();
  assert_eq!(fetched.value, "La Tiendita 2");
  assert_eq!(s.list_settings().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_missing_setting_errors() {
  let (s, _backups) = store().await;
  let err = s.delete_setting("missing".into()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::SettingNotFound(_))));
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn statement_merges_payments_and_adjustments() {
  let (s, _backups) = store().await;
  let c = s.add_customer(customer("Alice")).await.unwrap();

  let opened = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  let id = opened.credit.credit.credit_id;
  s.submit_payment(payment(id, 30.0)).await.unwrap();
  s.submit_credit(credit(c.customer_id, 50.0)).await.unwrap(); // top-up
  s.submit_payment(payment(id, 40.0)).await.unwrap();

  let statement = s.credit_statement(id).await.unwrap();
  assert_eq!(statement.customer.customer_id, c.customer_id);
  assert_eq!(statement.entries.len(), 3);

  let kinds: Vec<_> = statement.entries.iter().map(|e| e.kind).collect();
  assert_eq!(
    kinds,
    [EntryKind::Payment, EntryKind::Adjustment, EntryKind::Payment]
  );
  assert_eq!(statement.entries[0].amount, -30.0);
  assert_eq!(statement.entries[1].amount, 50.0);
  assert_eq!(statement.entries[2].amount, -40.0);

  // adjustments are already folded into the principal, never re-added
  assert_eq!(statement.credit.amount, 150.0);
  assert_eq!(statement.state.balance, 80.0);
  assert_eq!(statement.state.status, CreditStatus::Active);
}

#[tokio::test]
async fn statement_missing_credit_errors() {
  let (s, _backups) = store().await;
  let err = s.credit_statement(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CreditNotFound(_))));
}

#[tokio::test]
async fn dashboard_aggregates() {
  let (s, _backups) = store().await;
  let today = day(2024, 6, 15);

  let alice = s.add_customer(customer("Alice")).await.unwrap();
  let bob = s.add_customer(customer("Bob")).await.unwrap();

  let a = s.submit_credit(credit(alice.customer_id, 100.0)).await.unwrap();
  s.submit_payment(payment(a.credit.credit.credit_id, 40.0)).await.unwrap();

  let b = s.submit_credit(credit(bob.customer_id, 50.0)).await.unwrap();
  s.submit_payment(payment(b.credit.credit.credit_id, 50.0)).await.unwrap();

  let sup = s.add_supplier(supplier("Distribuidora Norte")).await.unwrap();
  s.add_supplier_payment(supplier_payment(
    sup.supplier_id,
    80.0,
    day(2024, 6, 10),
  ))
  .await
  .unwrap();
  s.add_supplier_payment(supplier_payment(
    sup.supplier_id,
    30.0,
    day(2024, 5, 20),
  ))
  .await
  .unwrap();

  s.record_daily_sale(sale(day(2024, 6, 15), 200.0), None).await.unwrap();
  s.record_daily_sale(sale(day(2024, 6, 14), 100.0), None).await.unwrap();

  let dash = s.dashboard(today).await.unwrap();
  assert_eq!(dash.customers, 2);
  assert_eq!(dash.active_credits, 1);
  assert_eq!(dash.paid_credits, 1);
  assert_eq!(dash.outstanding_total, 60.0);
  assert_eq!(dash.supplier_payments_month, 80.0);
  assert_eq!(dash.sales_today, 200.0);
}

#[tokio::test]
async fn monthly_activity_buckets_oldest_first() {
  let (s, _backups) = store().await;
  let today = Utc::now().date_naive();

  let c = s.add_customer(customer("Alice")).await.unwrap();
  let receipt = s.submit_credit(credit(c.customer_id, 100.0)).await.unwrap();
  s.submit_payment(payment(receipt.credit.credit.credit_id, 25.0))
    .await
    .unwrap();
  s.record_daily_sale(sale(today, 120.0), None).await.unwrap();

  let activity = s.monthly_activity(today, 3).await.unwrap();
  assert_eq!(activity.len(), 3);

  let current = CalendarMonth::of(today);
  assert_eq!(activity[0].month, current.pred().pred());
  assert_eq!(activity[1].month, current.pred());
  assert_eq!(activity[2].month, current);

  assert_eq!(activity[2].credits_opened, 1);
  assert_eq!(activity[2].payments_made, 1);
  assert_eq!(activity[2].sales_total, 120.0);

  assert_eq!(activity[0].credits_opened, 0);
  assert_eq!(activity[0].sales_total, 0.0);
}
