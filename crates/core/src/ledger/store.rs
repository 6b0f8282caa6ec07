//! The append-style ledger store.
//!
//! The store exclusively owns the transaction collection. Every accessor
//! returns a snapshot that is never mutated in place afterward; every
//! mutation swaps the top-level collection and then notifies subscribers
//! synchronously, so a listener's read-back reflects exactly the mutation
//! that triggered it.

use std::sync::{Arc, RwLock};

use chrono::Utc;

use fundbook_shared::observe::{ObserverSet, SubscriberId};
use fundbook_shared::types::{DocumentRef, TransactionId};

use super::error::LedgerError;
use super::types::{AuditEvent, Transaction, TransactionKind, TransactionLine, TransactionStatus};
use super::validation::validate_lines;

/// Ordered collection of ledger transactions, newest first.
#[derive(Debug, Default)]
pub struct LedgerStore {
    transactions: RwLock<Vec<Arc<Transaction>>>,
    observers: ObserverSet,
}

impl LedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot, newest first.
    ///
    /// The returned transactions are shared handles; the store never
    /// mutates them in place, so the snapshot stays internally consistent
    /// for as long as the caller holds it.
    #[must_use]
    pub fn transactions(&self) -> Vec<Arc<Transaction>> {
        self.transactions
            .read()
            .expect("ledger store lock poisoned")
            .clone()
    }

    /// Looks up a transaction by id.
    #[must_use]
    pub fn get(&self, id: &TransactionId) -> Option<Arc<Transaction>> {
        self.transactions
            .read()
            .expect("ledger store lock poisoned")
            .iter()
            .find(|tx| tx.id == *id)
            .cloned()
    }

    /// Number of stored transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions
            .read()
            .expect("ledger store lock poisoned")
            .len()
    }

    /// Returns true if the store holds no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a transaction at the front of the collection.
    ///
    /// Ids must be unique; entries arriving as `Posted` must balance.
    /// Subscribers are notified after the mutation commits.
    ///
    /// # Errors
    ///
    /// `DuplicateTransactionId` if the id already exists; line validation
    /// errors if a posted entry is unbalanced or malformed.
    pub fn add_transaction(&self, transaction: Transaction) -> Result<Arc<Transaction>, LedgerError> {
        if transaction.status.is_posted() {
            validate_lines(&transaction.lines)?;
        }

        let stored = Arc::new(transaction);
        {
            let mut transactions = self.transactions.write().expect("ledger store lock poisoned");
            if transactions.iter().any(|tx| tx.id == stored.id) {
                return Err(LedgerError::DuplicateTransactionId(stored.id.clone()));
            }
            transactions.insert(0, Arc::clone(&stored));
        }

        tracing::info!(
            id = %stored.id,
            kind = ?stored.kind,
            amount = %stored.total_amount,
            "transaction added"
        );
        self.observers.notify();
        Ok(stored)
    }

    /// Replaces the transaction matching `transaction.id`.
    ///
    /// A posted entry's lines are immutable: only status-preserving edits
    /// (audit appends, description touch-ups) are accepted for them.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound` if no entry matches; `PostedImmutable` when
    /// the update would change a posted entry's lines; line validation
    /// errors when the replacement is posted but unbalanced.
    pub fn update_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Arc<Transaction>, LedgerError> {
        if transaction.status.is_posted() {
            validate_lines(&transaction.lines)?;
        }

        let stored = Arc::new(transaction);
        {
            let mut transactions = self.transactions.write().expect("ledger store lock poisoned");
            let index = transactions
                .iter()
                .position(|tx| tx.id == stored.id)
                .ok_or_else(|| LedgerError::TransactionNotFound(stored.id.clone()))?;

            let existing = &transactions[index];
            if existing.status.is_posted()
                && (existing.lines != stored.lines || !stored.status.is_posted())
            {
                return Err(LedgerError::PostedImmutable(stored.id.clone()));
            }

            transactions[index] = Arc::clone(&stored);
        }

        tracing::debug!(id = %stored.id, "transaction updated");
        self.observers.notify();
        Ok(stored)
    }

    /// Transitions a pending transaction to `Posted`.
    ///
    /// The balance rule is enforced here: an unbalanced pending entry
    /// cannot be posted and the store is left unchanged.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound`, `AlreadyPosted`, or a line validation error.
    pub fn post_transaction(
        &self,
        id: &TransactionId,
        actor: &str,
    ) -> Result<Arc<Transaction>, LedgerError> {
        let posted = {
            let mut transactions = self.transactions.write().expect("ledger store lock poisoned");
            let index = transactions
                .iter()
                .position(|tx| tx.id == *id)
                .ok_or_else(|| LedgerError::TransactionNotFound(id.clone()))?;

            let existing = &transactions[index];
            if existing.status.is_posted() {
                return Err(LedgerError::AlreadyPosted(id.clone()));
            }
            validate_lines(&existing.lines)?;

            let mut updated = Transaction::clone(existing);
            updated.status = TransactionStatus::Posted;
            updated.audit.push(AuditEvent::now(actor, "posted"));
            let updated = Arc::new(updated);
            transactions[index] = Arc::clone(&updated);
            updated
        };

        tracing::info!(id = %posted.id, actor, "transaction posted");
        self.observers.notify();
        Ok(posted)
    }

    /// Reverses a posted transaction with an offsetting entry.
    ///
    /// Builds a new posted entry with debits and credits swapped, linked to
    /// the original through its document reference, and stamps the original
    /// with an audit record. Returns the reversing entry.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound` if no entry matches, `NotPosted` if the target
    /// has not been posted.
    pub fn reverse_transaction(
        &self,
        id: &TransactionId,
        actor: &str,
        reason: &str,
    ) -> Result<Arc<Transaction>, LedgerError> {
        let reversal = {
            let mut transactions = self.transactions.write().expect("ledger store lock poisoned");
            let index = transactions
                .iter()
                .position(|tx| tx.id == *id)
                .ok_or_else(|| LedgerError::TransactionNotFound(id.clone()))?;

            let original = &transactions[index];
            if !original.status.is_posted() {
                return Err(LedgerError::NotPosted(id.clone()));
            }

            let lines: Vec<TransactionLine> = original
                .lines
                .iter()
                .map(|line| TransactionLine {
                    account: line.account,
                    memo: Some(format!(
                        "Reversal: {}",
                        line.memo.clone().unwrap_or_default()
                    )),
                    debit: line.credit,
                    credit: line.debit,
                    fund: line.fund.clone(),
                    cost_center: line.cost_center.clone(),
                })
                .collect();

            let total_amount = lines.iter().map(|line| line.debit).sum();
            let reversal = Arc::new(Transaction {
                id: TransactionId::generated("REV"),
                date: Utc::now().date_naive(),
                description: format!("Reversal of {id}. Reason: {reason}"),
                kind: TransactionKind::AdjustingEntry,
                source: original.source,
                document: DocumentRef::new(original.id.as_str()),
                total_amount,
                status: TransactionStatus::Posted,
                created_by: actor.to_string(),
                lines,
                audit: vec![AuditEvent::now(actor, "reversal synthesized")],
            });

            let mut stamped = Transaction::clone(original);
            stamped
                .audit
                .push(AuditEvent::now(actor, format!("reversed by {}", reversal.id)));
            transactions[index] = Arc::new(stamped);
            transactions.insert(0, Arc::clone(&reversal));
            reversal
        };

        tracing::info!(original = %id, reversal = %reversal.id, "transaction reversed");
        self.observers.notify();
        Ok(reversal)
    }

    /// Registers a change listener.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriberId {
        self.observers.subscribe(listener)
    }

    /// Removes a change listener.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }
}
