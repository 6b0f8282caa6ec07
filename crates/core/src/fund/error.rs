//! Fund-control error types.

use rust_decimal::Decimal;
use thiserror::Error;

use fundbook_shared::types::UnitCode;

/// Errors that can occur during fund authority operations.
#[derive(Debug, Error)]
pub enum FundError {
    /// A distribution named a unit that matches no node.
    ///
    /// Never a silent no-op: an apportionment that lands nowhere is an
    /// observable failure the caller must handle.
    #[error("No fund control node matches unit {0}")]
    InvalidTarget(UnitCode),

    /// An update targeted a node that is not in the tree.
    #[error("Fund control node not found: {0}")]
    NodeNotFound(UnitCode),

    /// The node would have more distributed than its total authority.
    #[error("Unit {unit} would be overdistributed: {amount_distributed} distributed of {total_authority} authority")]
    AuthorityExceeded {
        /// The offending unit.
        unit: UnitCode,
        /// Its total authority.
        total_authority: Decimal,
        /// The distributed amount that would exceed it.
        amount_distributed: Decimal,
    },

    /// Distribution and transfer amounts must be positive.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// A transfer named the same unit on both sides.
    #[error("Transfer source and target must differ: {0}")]
    SelfTransfer(UnitCode),
}

impl FundError {
    /// Returns the error code for host-service surfacing.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTarget(_) => "INVALID_TARGET",
            Self::NodeNotFound(_) => "NODE_NOT_FOUND",
            Self::AuthorityExceeded { .. } => "AUTHORITY_EXCEEDED",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::SelfTransfer(_) => "SELF_TRANSFER",
        }
    }
}
