//! JSON REST API for Fiado.
//!
//! Exposes an axum [`Router`] backed by any [`fiado_core::store::LedgerStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", fiado_api::api_router(store.clone()))
//! ```

pub mod credits;
pub mod customers;
pub mod error;
pub mod payments;
pub mod reports;
pub mod sales;
pub mod settings;
pub mod suppliers;

use std::sync::Arc;

use axum::{Router, routing::get};
use fiado_core::store::LedgerStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: LedgerStore + Clone + Send + Sync + 'static,
  S::Error: Into<fiado_core::Error>,
{
  Router::new()
    // Customers
    .route(
      "/customers",
      get(customers::list::<S>).post(customers::create::<S>),
    )
    .route(
      "/customers/{id}",
      get(customers::get_one::<S>)
        .put(customers::update_one::<S>)
        .delete(customers::purge_one::<S>),
    )
    .route("/customers/{id}/credits", get(customers::credits_of::<S>))
    // Credits
    .route("/credits", get(credits::list::<S>).post(credits::submit::<S>))
    .route(
      "/credits/{id}",
      get(credits::get_one::<S>).delete(credits::cancel_one::<S>),
    )
    .route("/credits/{id}/payments", get(credits::payments_of::<S>))
    .route("/credits/{id}/adjustments", get(credits::adjustments_of::<S>))
    .route("/credits/{id}/statement", get(credits::statement_of::<S>))
    .route("/adjustments/{id}", get(credits::get_adjustment::<S>))
    // Payments
    .route("/payments", get(payments::list::<S>).post(payments::submit::<S>))
    .route(
      "/payments/{id}",
      get(payments::get_one::<S>)
        .put(payments::update_one::<S>)
        .delete(payments::delete_one::<S>),
    )
    // Suppliers
    .route(
      "/suppliers",
      get(suppliers::list::<S>).post(suppliers::create::<S>),
    )
    .route(
      "/suppliers/{id}",
      get(suppliers::get_one::<S>)
        .put(suppliers::update_one::<S>)
        .delete(suppliers::purge_one::<S>),
    )
    .route("/suppliers/{id}/payments", get(suppliers::payments_of::<S>))
    .route(
      "/supplier-payments",
      get(suppliers::payment_list::<S>).post(suppliers::payment_create::<S>),
    )
    .route(
      "/supplier-payments/{id}",
      get(suppliers::payment_get_one::<S>)
        .put(suppliers::payment_update_one::<S>)
        .delete(suppliers::payment_delete_one::<S>),
    )
    // Daily sales
    .route("/daily-sales", get(sales::list::<S>).post(sales::record::<S>))
    .route(
      "/daily-sales/{id}",
      get(sales::get_one::<S>)
        .put(sales::update_one::<S>)
        .delete(sales::delete_one::<S>),
    )
    // Settings
    .route("/settings", get(settings::list::<S>))
    .route(
      "/settings/{key}",
      get(settings::get_one::<S>)
        .put(settings::put_one::<S>)
        .delete(settings::delete_one::<S>),
    )
    // Reports
    .route("/reports/dashboard", get(reports::dashboard::<S>))
    .route(
      "/reports/monthly-activity",
      get(reports::monthly_activity::<S>),
    )
    .with_state(store)
}
