//! Double-entry ledger store and bookkeeping rules.
//!
//! This module implements the authoritative transaction collection:
//! - The fixed chart of accounts
//! - Transaction and line domain types
//! - Business rule validation (balance, positivity)
//! - Error types for ledger operations
//! - The append-style store with change notification

pub mod accounts;
pub mod error;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod store_props;

pub use accounts::AccountCode;
pub use error::LedgerError;
pub use store::LedgerStore;
pub use types::{
    AuditEvent, SourceModule, Transaction, TransactionKind, TransactionLine, TransactionStatus,
};
pub use validation::{totals, validate_lines, LineTotals};
