//! SQLite backend for the Fiado credit ledger.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Composite ledger operations (credit
//! and payment submission, cascade purges, cancellation, sale recording) run
//! inside a single rusqlite transaction on that thread.

mod backup;
mod encode;
mod schema;
mod store;

pub mod error;

pub use backup::FsBackupSink;
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
