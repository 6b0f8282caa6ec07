//! Ledger domain types.
//!
//! This module defines the transaction aggregate and its lines. The single
//! most important invariant of the whole subsystem lives here: any entry
//! that reaches `Posted` status has equal debit and credit totals, and a
//! posted entry is never edited in place - only superseded by a reversing
//! entry.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fundbook_shared::types::{DocumentRef, FundCode, TransactionId, UnitCode};

use super::accounts::AccountCode;

/// Transaction type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Expense accrual (goods/services received, not yet paid).
    Accrual,
    /// Outlay against a previously accrued payable.
    Disbursement,
    /// Obligation of authority (travel order, project order).
    Obligation,
    /// Revenue recognition or billing.
    Revenue,
    /// Cost transfer between cost centers.
    Transfer,
    /// Asset capitalization.
    Capitalization,
    /// Asset disposal.
    Disposal,
    /// Manually authored journal entry.
    ManualJournal,
    /// Adjusting entry (including reversals).
    AdjustingEntry,
    /// Contingency operation cost tagging.
    ContingencyTag,
}

/// Transaction status in the posting workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Awaiting approval; lines may still change.
    PendingApproval,
    /// Posted to the ledger (immutable except by reversing entry).
    Posted,
}

impl TransactionStatus {
    /// Returns true if the transaction's lines can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::PendingApproval)
    }

    /// Returns true if the transaction has been posted.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

/// The module that raised the business event behind a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceModule {
    /// Travel orders and settlements.
    Travel,
    /// Purchase requests, contracts, expense accruals, disbursements.
    Acquisition,
    /// Asset capitalization, depreciation, disposal.
    Assets,
    /// Contingency operation cost tagging.
    Contingency,
    /// Cost transfers between cost centers.
    CostTransfer,
    /// Reimbursable project orders.
    ProjectOrders,
    /// Outgrant (real property lease) billing.
    Outgrants,
    /// Revenue recognition.
    Revenue,
    /// Manually authored journal entries.
    Manual,
}

/// A single line of a ledger transaction.
///
/// By convention exactly one of `debit`/`credit` is non-zero, though the
/// model permits both for generality. Amounts are never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLine {
    /// Account posted to, from the fixed chart of accounts.
    pub account: AccountCode,
    /// Optional memo for this line.
    pub memo: Option<String>,
    /// Debit amount (0 if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (0 if this is a debit line).
    pub credit: Decimal,
    /// Appropriation/fund code this line executes against.
    pub fund: FundCode,
    /// Cost center (fund-control unit) this line is charged to.
    pub cost_center: UnitCode,
}

impl TransactionLine {
    /// Builds a debit line.
    #[must_use]
    pub fn debit(
        account: AccountCode,
        amount: Decimal,
        fund: FundCode,
        cost_center: UnitCode,
        memo: impl Into<Option<String>>,
    ) -> Self {
        Self {
            account,
            memo: memo.into(),
            debit: amount,
            credit: Decimal::ZERO,
            fund,
            cost_center,
        }
    }

    /// Builds a credit line.
    #[must_use]
    pub fn credit(
        account: AccountCode,
        amount: Decimal,
        fund: FundCode,
        cost_center: UnitCode,
        memo: impl Into<Option<String>>,
    ) -> Self {
        Self {
            account,
            memo: memo.into(),
            debit: Decimal::ZERO,
            credit: amount,
            fund,
            cost_center,
        }
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// One step in a transaction's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// When the action happened.
    pub at: DateTime<Utc>,
    /// Who performed it.
    pub actor: String,
    /// What happened ("synthesized", "posted", "reversed", …).
    pub action: String,
}

impl AuditEvent {
    /// Records an action as of now.
    #[must_use]
    pub fn now(actor: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            actor: actor.into(),
            action: action.into(),
        }
    }
}

/// A ledger transaction: an ordered set of lines plus provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique id, prefixed by synthesis source for human traceability.
    pub id: TransactionId,
    /// Effective date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Transaction type.
    pub kind: TransactionKind,
    /// Module that raised the originating event.
    pub source: SourceModule,
    /// Reference to the originating document.
    pub document: DocumentRef,
    /// Total amount (sum of debit lines).
    pub total_amount: Decimal,
    /// Posting status.
    pub status: TransactionStatus,
    /// Identity of the creator.
    pub created_by: String,
    /// The ordered ledger lines.
    pub lines: Vec<TransactionLine>,
    /// Audit trail, oldest first.
    pub audit: Vec<AuditEvent>,
}

impl Transaction {
    /// Sum of all debit amounts.
    #[must_use]
    pub fn total_debits(&self) -> Decimal {
        self.lines.iter().map(|line| line.debit).sum()
    }

    /// Sum of all credit amounts.
    #[must_use]
    pub fn total_credits(&self) -> Decimal {
        self.lines.iter().map(|line| line.credit).sum()
    }

    /// Returns true when debit and credit totals are equal.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }
}
