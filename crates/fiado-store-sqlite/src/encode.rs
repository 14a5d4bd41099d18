//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar days as `YYYY-MM-DD`.
//! UUIDs are stored as hyphenated lowercase strings. Amounts stay `REAL`.

use chrono::{DateTime, NaiveDate, Utc};
use fiado_core::{
  credit::{AdjustmentKind, Credit, CreditAdjustment, CreditStatus},
  customer::Customer,
  payment::{Payment, SupplierPayment},
  sale::DailySale,
  supplier::Supplier,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── CreditStatus ────────────────────────────────────────────────────────────

pub fn encode_status(s: CreditStatus) -> &'static str {
  match s {
    CreditStatus::Active => "active",
    CreditStatus::Paid => "paid",
  }
}

pub fn decode_status(s: &str) -> Result<CreditStatus> {
  match s {
    "active" => Ok(CreditStatus::Active),
    "paid" => Ok(CreditStatus::Paid),
    other => Err(Error::DateParse(format!("unknown credit status: {other:?}"))),
  }
}

// ─── AdjustmentKind ──────────────────────────────────────────────────────────

pub fn encode_kind(k: AdjustmentKind) -> &'static str {
  match k {
    AdjustmentKind::Addition => "addition",
  }
}

pub fn decode_kind(s: &str) -> Result<AdjustmentKind> {
  match s {
    "addition" => Ok(AdjustmentKind::Addition),
    other => {
      Err(Error::DateParse(format!("unknown adjustment kind: {other:?}")))
    }
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `customers` row.
pub struct RawCustomer {
  pub customer_id: String,
  pub name:        String,
  pub phone:       Option<String>,
  pub address:     Option<String>,
}

impl RawCustomer {
  pub fn into_customer(self) -> Result<Customer> {
    Ok(Customer {
      customer_id: decode_uuid(&self.customer_id)?,
      name:        self.name,
      phone:       self.phone,
      address:     self.address,
    })
  }
}

/// Raw strings read directly from a `credits` row.
pub struct RawCredit {
  pub credit_id:   String,
  pub customer_id: String,
  pub amount:      f64,
  pub date:        String,
  pub status:      String,
}

impl RawCredit {
  pub fn into_credit(self) -> Result<Credit> {
    Ok(Credit {
      credit_id:   decode_uuid(&self.credit_id)?,
      customer_id: decode_uuid(&self.customer_id)?,
      amount:      self.amount,
      date:        decode_dt(&self.date)?,
      status:      decode_status(&self.status)?,
    })
  }
}

/// Raw strings read directly from a `payments` row.
pub struct RawPayment {
  pub payment_id: String,
  pub credit_id:  String,
  pub amount:     f64,
  pub date:       String,
}

impl RawPayment {
  pub fn into_payment(self) -> Result<Payment> {
    Ok(Payment {
      payment_id: decode_uuid(&self.payment_id)?,
      credit_id:  decode_uuid(&self.credit_id)?,
      amount:     self.amount,
      date:       decode_dt(&self.date)?,
    })
  }
}

/// Raw strings read directly from an `adjustments` row.
pub struct RawAdjustment {
  pub adjustment_id: String,
  pub credit_id:     String,
  pub amount:        f64,
  pub date:          String,
  pub kind:          String,
  pub notes:         Option<String>,
}

impl RawAdjustment {
  pub fn into_adjustment(self) -> Result<CreditAdjustment> {
    Ok(CreditAdjustment {
      adjustment_id: decode_uuid(&self.adjustment_id)?,
      credit_id:     decode_uuid(&self.credit_id)?,
      amount:        self.amount,
      date:          decode_dt(&self.date)?,
      kind:          decode_kind(&self.kind)?,
      notes:         self.notes,
    })
  }
}

/// Raw strings read directly from a `suppliers` row.
pub struct RawSupplier {
  pub supplier_id: String,
  pub name:        String,
  pub phone:       Option<String>,
  pub email:       Option<String>,
  pub address:     Option<String>,
  pub notes:       Option<String>,
}

impl RawSupplier {
  pub fn into_supplier(self) -> Result<Supplier> {
    Ok(Supplier {
      supplier_id: decode_uuid(&self.supplier_id)?,
      name:        self.name,
      phone:       self.phone,
      email:       self.email,
      address:     self.address,
      notes:       self.notes,
    })
  }
}

/// Raw strings read directly from a `supplier_payments` row.
pub struct RawSupplierPayment {
  pub payment_id:  String,
  pub supplier_id: String,
  pub amount:      f64,
  pub date:        String,
  pub notes:       Option<String>,
}

impl RawSupplierPayment {
  pub fn into_payment(self) -> Result<SupplierPayment> {
    Ok(SupplierPayment {
      payment_id:  decode_uuid(&self.payment_id)?,
      supplier_id: decode_uuid(&self.supplier_id)?,
      amount:      self.amount,
      date:        decode_date(&self.date)?,
      notes:       self.notes,
    })
  }
}

/// Raw strings read directly from a `daily_sales` row.
pub struct RawSale {
  pub sale_id: String,
  pub date:    String,
  pub amount:  f64,
  pub notes:   Option<String>,
}

impl RawSale {
  pub fn into_sale(self) -> Result<DailySale> {
    Ok(DailySale {
      sale_id: decode_uuid(&self.sale_id)?,
      date:    decode_date(&self.date)?,
      amount:  self.amount,
      notes:   self.notes,
    })
  }
}
