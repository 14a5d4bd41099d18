//! SQL schema for the Fiado SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS customers (
    customer_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    phone       TEXT,
    address     TEXT
);

-- `amount` is the principal and only ever grows; `status` caches the
-- derived active/paid state and is re-synced on writes, recomputed on reads.
CREATE TABLE IF NOT EXISTS credits (
    credit_id   TEXT PRIMARY KEY,
    customer_id TEXT NOT NULL REFERENCES customers(customer_id),
    amount      REAL NOT NULL,
    date        TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    status      TEXT NOT NULL    -- 'active' | 'paid'
);

CREATE TABLE IF NOT EXISTS payments (
    payment_id TEXT PRIMARY KEY,
    credit_id  TEXT NOT NULL REFERENCES credits(credit_id),
    amount     REAL NOT NULL,
    date       TEXT NOT NULL     -- ISO 8601 UTC; store-assigned
);

-- Audit rows for principal increases. Never updated; deleted only when the
-- owning credit is cancelled or its customer purged.
CREATE TABLE IF NOT EXISTS adjustments (
    adjustment_id TEXT PRIMARY KEY,
    credit_id     TEXT NOT NULL REFERENCES credits(credit_id),
    amount        REAL NOT NULL,
    date          TEXT NOT NULL, -- ISO 8601 UTC; store-assigned
    kind          TEXT NOT NULL DEFAULT 'addition',
    notes         TEXT
);

CREATE TABLE IF NOT EXISTS suppliers (
    supplier_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    phone       TEXT,
    email       TEXT,
    address     TEXT,
    notes       TEXT
);

CREATE TABLE IF NOT EXISTS supplier_payments (
    payment_id  TEXT PRIMARY KEY,
    supplier_id TEXT NOT NULL REFERENCES suppliers(supplier_id),
    amount      REAL NOT NULL,
    date        TEXT NOT NULL,   -- calendar day, YYYY-MM-DD
    notes       TEXT
);

-- Several rows may share one date; the day's figure is the sum across them.
CREATE TABLE IF NOT EXISTS daily_sales (
    sale_id TEXT PRIMARY KEY,
    date    TEXT NOT NULL,       -- calendar day, YYYY-MM-DD
    amount  REAL NOT NULL,
    notes   TEXT
);

CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS credits_customer_idx ON credits(customer_id);
CREATE INDEX IF NOT EXISTS payments_credit_idx ON payments(credit_id);
CREATE INDEX IF NOT EXISTS adjustments_credit_idx ON adjustments(credit_id);
CREATE INDEX IF NOT EXISTS supplier_payments_supplier_idx
    ON supplier_payments(supplier_id);
CREATE INDEX IF NOT EXISTS daily_sales_date_idx ON daily_sales(date);

PRAGMA user_version = 1;
";
