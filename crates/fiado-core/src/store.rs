//! The `LedgerStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `fiado-store-sqlite`).
//! Higher layers (`fiado-api`, `fiado-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  backup::{CustomerPurge, SupplierPurge},
  credit::{CancelReceipt, CreditAdjustment, CreditReceipt, CreditSubmission},
  customer::{Customer, NewCustomer},
  payment::{
    NewSupplierPayment, Payment, PaymentReceipt, PaymentSubmission,
    PaymentUpdate, SupplierPayment, SupplierPaymentUpdate,
  },
  report::{
    CreditStatement, CreditWithCustomer, DashboardSummary, MonthlyActivity,
    PaymentWithCredit, ResolvedCredit, SupplierPaymentWithSupplier,
  },
  sale::{
    CalendarMonth, DailySale, DuplicateResolution, SaleDraft, SaleOutcome,
  },
  setting::Setting,
  supplier::{NewSupplier, Supplier},
};

/// Abstraction over a credit-ledger backend.
///
/// Composite operations (credit and payment submission, cascade purges,
/// credit cancellation, daily-sale recording) are transactional: concurrent
/// readers never observe a partial application. Every balance returned by a
/// method here is freshly derived via [`crate::balance::resolve`]; stored
/// statuses are a cache.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LedgerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Customers ─────────────────────────────────────────────────────────

  /// Create and persist a new customer. The id is assigned by the store.
  fn add_customer(
    &self,
    input: NewCustomer,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  /// Retrieve a customer by id. Returns `None` if not found.
  fn get_customer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Customer>, Self::Error>> + Send + '_;

  fn list_customers(
    &self,
  ) -> impl Future<Output = Result<Vec<Customer>, Self::Error>> + Send + '_;

  /// Replace a customer's contact fields.
  fn update_customer(
    &self,
    id: Uuid,
    input: NewCustomer,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  /// Cascade-delete a customer: snapshot everything first, then remove the
  /// customer with every credit, payment and adjustment under it,
  /// all-or-nothing. The only way to delete a customer.
  fn purge_customer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<CustomerPurge, Self::Error>> + Send + '_;

  // ── Credits ───────────────────────────────────────────────────────────

  /// Run the adjustment flow: top up the customer's active credit (writing
  /// an audit row), or open a fresh credit when none is active.
  fn submit_credit(
    &self,
    input: CreditSubmission,
  ) -> impl Future<Output = Result<CreditReceipt, Self::Error>> + Send + '_;

  fn get_credit(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ResolvedCredit>, Self::Error>> + Send + '_;

  /// All credits joined with their owners, newest first.
  fn list_credits(
    &self,
  ) -> impl Future<Output = Result<Vec<CreditWithCustomer>, Self::Error>> + Send + '_;

  /// A customer's credits, newest first. Errors if the customer is missing.
  fn credits_for_customer(
    &self,
    customer_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ResolvedCredit>, Self::Error>> + Send + '_;

  /// Hard-delete a credit together with its payments and adjustments, in one
  /// transaction. No snapshot is written.
  fn cancel_credit(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<CancelReceipt, Self::Error>> + Send + '_;

  // ── Payments ──────────────────────────────────────────────────────────

  /// Validate and record a repayment. Rejects non-positive amounts, payments
  /// against settled credits, and amounts beyond the remaining balance; on
  /// success the credit's cached status is re-synced in the same
  /// transaction.
  fn submit_payment(
    &self,
    input: PaymentSubmission,
  ) -> impl Future<Output = Result<PaymentReceipt, Self::Error>> + Send + '_;

  fn get_payment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Payment>, Self::Error>> + Send + '_;

  /// All payments joined with the credits they repay, newest first.
  fn list_payments(
    &self,
  ) -> impl Future<Output = Result<Vec<PaymentWithCredit>, Self::Error>> + Send + '_;

  /// A credit's payments, date ascending. Errors if the credit is missing.
  fn payments_for_credit(
    &self,
    credit_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Payment>, Self::Error>> + Send + '_;

  /// Replace a payment's amount and date, then re-sync the credit's cached
  /// status. Bookkeeping repair; no balance validation applies.
  fn update_payment(
    &self,
    id: Uuid,
    input: PaymentUpdate,
  ) -> impl Future<Output = Result<Payment, Self::Error>> + Send + '_;

  /// Delete a payment and re-sync the credit's cached status (the credit may
  /// flip back to active).
  fn delete_payment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Adjustments ───────────────────────────────────────────────────────

  /// A credit's audit trail, date ascending. Errors if the credit is
  /// missing.
  fn adjustments_for_credit(
    &self,
    credit_id: Uuid,
  ) -> impl Future<Output = Result<Vec<CreditAdjustment>, Self::Error>> + Send + '_;

  fn get_adjustment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CreditAdjustment>, Self::Error>> + Send + '_;

  // ── Suppliers ─────────────────────────────────────────────────────────

  fn add_supplier(
    &self,
    input: NewSupplier,
  ) -> impl Future<Output = Result<Supplier, Self::Error>> + Send + '_;

  fn get_supplier(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Supplier>, Self::Error>> + Send + '_;

  fn list_suppliers(
    &self,
  ) -> impl Future<Output = Result<Vec<Supplier>, Self::Error>> + Send + '_;

  fn update_supplier(
    &self,
    id: Uuid,
    input: NewSupplier,
  ) -> impl Future<Output = Result<Supplier, Self::Error>> + Send + '_;

  /// Cascade-delete a supplier and its payments, snapshot-first, like
  /// [`LedgerStore::purge_customer`].
  fn purge_supplier(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<SupplierPurge, Self::Error>> + Send + '_;

  // ── Supplier payments ─────────────────────────────────────────────────

  /// Record a payment to a supplier. Rejects non-positive amounts and
  /// missing suppliers.
  fn add_supplier_payment(
    &self,
    input: NewSupplierPayment,
  ) -> impl Future<Output = Result<SupplierPayment, Self::Error>> + Send + '_;

  fn get_supplier_payment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<SupplierPayment>, Self::Error>> + Send + '_;

  /// All supplier payments joined with their suppliers, newest first.
  fn list_supplier_payments(
    &self,
  ) -> impl Future<Output = Result<Vec<SupplierPaymentWithSupplier>, Self::Error>>
  + Send
  + '_;

  /// A supplier's payments, date ascending. Errors if the supplier is
  /// missing.
  fn payments_for_supplier(
    &self,
    supplier_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SupplierPayment>, Self::Error>> + Send + '_;

  fn update_supplier_payment(
    &self,
    id: Uuid,
    input: SupplierPaymentUpdate,
  ) -> impl Future<Output = Result<SupplierPayment, Self::Error>> + Send + '_;

  fn delete_supplier_payment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Daily sales ───────────────────────────────────────────────────────

  /// Record a sales figure under the duplicate-date policy: a draft landing
  /// on an occupied date without a resolution writes nothing and reports the
  /// existing rows instead.
  fn record_daily_sale(
    &self,
    draft: SaleDraft,
    resolution: Option<DuplicateResolution>,
  ) -> impl Future<Output = Result<SaleOutcome, Self::Error>> + Send + '_;

  fn get_daily_sale(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<DailySale>, Self::Error>> + Send + '_;

  /// Sales date-descending, optionally restricted to one calendar month.
  fn list_daily_sales(
    &self,
    month: Option<CalendarMonth>,
  ) -> impl Future<Output = Result<Vec<DailySale>, Self::Error>> + Send + '_;

  /// Replace a sale row wholesale. The duplicate-date policy does not apply
  /// here.
  fn update_daily_sale(
    &self,
    id: Uuid,
    draft: SaleDraft,
  ) -> impl Future<Output = Result<DailySale, Self::Error>> + Send + '_;

  fn delete_daily_sale(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Settings ──────────────────────────────────────────────────────────

  /// Upsert a setting and return the stored row.
  fn put_setting(
    &self,
    key: String,
    value: String,
  ) -> impl Future<Output = Result<Setting, Self::Error>> + Send + '_;

  fn get_setting(
    &self,
    key: String,
  ) -> impl Future<Output = Result<Option<Setting>, Self::Error>> + Send + '_;

  fn list_settings(
    &self,
  ) -> impl Future<Output = Result<Vec<Setting>, Self::Error>> + Send + '_;

  fn delete_setting(
    &self,
    key: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reports ───────────────────────────────────────────────────────────

  /// A credit's movement timeline (payments and adjustments merged, date
  /// ascending) with its closing state.
  fn credit_statement(
    &self,
    credit_id: Uuid,
  ) -> impl Future<Output = Result<CreditStatement, Self::Error>> + Send + '_;

  /// Headline figures as of `today`.
  fn dashboard(
    &self,
    today: NaiveDate,
  ) -> impl Future<Output = Result<DashboardSummary, Self::Error>> + Send + '_;

  /// Activity buckets for the `months` calendar months ending at `now`'s
  /// month, oldest first.
  fn monthly_activity(
    &self,
    now: NaiveDate,
    months: u32,
  ) -> impl Future<Output = Result<Vec<MonthlyActivity>, Self::Error>> + Send + '_;
}
