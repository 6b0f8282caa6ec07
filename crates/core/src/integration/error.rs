//! Integration error types.

use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur during event synthesis.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// The domain event is missing a required field or carries a value no
    /// well-formed emitter produces. Programmer error, not a business-rule
    /// condition.
    #[error("Malformed event: {0}")]
    MalformedEvent(&'static str),

    /// An inventory drawdown asked for more than is on hand.
    #[error("Insufficient stock of {item}: {requested} requested, {on_hand} on hand")]
    InsufficientStock {
        /// The item drawn down.
        item: String,
        /// Quantity on hand.
        on_hand: u32,
        /// Quantity requested.
        requested: u32,
    },

    /// The ledger store refused the synthesized entry.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl IntegrationError {
    /// Returns the error code for host-service surfacing.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedEvent(_) => "MALFORMED_EVENT",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::Ledger(err) => err.error_code(),
        }
    }
}
