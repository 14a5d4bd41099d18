//! Core types and trait definitions for the Fiado credit ledger.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod backup;
pub mod balance;
pub mod credit;
pub mod customer;
pub mod error;
pub mod payment;
pub mod report;
pub mod sale;
pub mod setting;
pub mod store;
pub mod supplier;

pub use error::{Error, Result};
