//! Explicit store construction and injection.
//!
//! There are no process-wide singletons: callers build a
//! [`FinanceContext`] and hand out references (or clone an `Arc` around
//! it), which keeps tests isolated and allows several independent
//! hierarchies in one process.

use thiserror::Error;

use crate::fund::{FundAuthorityStore, FundControlNode, FundError};
use crate::ledger::LedgerStore;

/// Errors that can occur while building a context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The seed hierarchy JSON did not parse.
    #[error("Seed hierarchy is not valid JSON: {0}")]
    Seed(#[from] serde_json::Error),

    /// The seed hierarchy violates a fund invariant.
    #[error(transparent)]
    Fund(#[from] FundError),
}

/// The engine's store handles, created once at process start.
#[derive(Debug)]
pub struct FinanceContext {
    /// The ledger store.
    pub ledger: LedgerStore,
    /// The fund authority store.
    pub funds: FundAuthorityStore,
}

impl FinanceContext {
    /// Builds a context over a seed hierarchy.
    ///
    /// # Errors
    ///
    /// `Fund` when the seed violates the authority invariant.
    pub fn new(root: FundControlNode) -> Result<Self, ContextError> {
        Ok(Self {
            ledger: LedgerStore::new(),
            funds: FundAuthorityStore::new(root)?,
        })
    }

    /// Builds a context from the JSON seed supplied by the host loader.
    ///
    /// # Errors
    ///
    /// `Seed` when the JSON does not describe a hierarchy; `Fund` when the
    /// hierarchy violates the authority invariant.
    pub fn from_seed_json(seed: &str) -> Result<Self, ContextError> {
        let root: FundControlNode = serde_json::from_str(seed)?;
        tracing::info!(root = %root.id, "fund hierarchy seeded");
        Self::new(root)
    }
}
