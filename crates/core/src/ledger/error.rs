//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use fundbook_shared::types::TransactionId;

/// Errors that can occur during ledger operations.
///
/// Everything here is recoverable: draft entries are expected to be
/// transiently invalid while a user edits them, so nothing in this module
/// panics on a business-rule condition.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A transaction with this id already exists.
    #[error("Transaction id already exists: {0}")]
    DuplicateTransactionId(TransactionId),

    /// No transaction with this id.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Lines of a posted transaction cannot be changed in place.
    #[error("Transaction {0} is posted; lines are immutable (use a reversing entry)")]
    PostedImmutable(TransactionId),

    /// Transaction is already posted.
    #[error("Transaction {0} is already posted")]
    AlreadyPosted(TransactionId),

    /// Only posted transactions can be reversed.
    #[error("Transaction {0} is not posted and cannot be reversed")]
    NotPosted(TransactionId),

    /// Transaction is not balanced (debits != credits).
    #[error("Transaction is not balanced. Debit: {debits}, Credit: {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Transaction has no lines.
    #[error("Transaction must have at least one line")]
    NoLines,

    /// Line amounts must be non-negative.
    #[error("Line amounts must be non-negative")]
    NegativeAmount,

    /// A line must carry a debit or a credit.
    #[error("Line must carry a non-zero debit or credit")]
    EmptyLine,
}

impl LedgerError {
    /// Returns the error code for host-service surfacing.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateTransactionId(_) => "DUPLICATE_TRANSACTION_ID",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::PostedImmutable(_) => "POSTED_IMMUTABLE",
            Self::AlreadyPosted(_) => "ALREADY_POSTED",
            Self::NotPosted(_) => "NOT_POSTED",
            Self::Unbalanced { .. } => "UNBALANCED_TRANSACTION",
            Self::NoLines => "NO_LINES",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::EmptyLine => "EMPTY_LINE",
        }
    }
}
