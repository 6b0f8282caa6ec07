//! Traceability data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fundbook_shared::types::{AssetId, DocumentRef, FundCode, ProjectId, TransactionId, UnitCode};

use crate::ledger::{TransactionKind, TransactionStatus};

/// The project master record, as carried by the host's project module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project id.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Fund the project executes against.
    pub fund: FundCode,
    /// Cost center performing the work.
    pub cost_center: UnitCode,
    /// Purchase request that started acquisition, when one exists.
    pub purchase_request: Option<DocumentRef>,
    /// Awarded contract, when one exists.
    pub contract: Option<DocumentRef>,
    /// Accountable assets delivered to the project.
    pub assets: Vec<AssetId>,
}

/// Funding leg: the fund-control node the project draws on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingTrace {
    /// Unit code of the node.
    pub unit: UnitCode,
    /// Node display name.
    pub unit_name: String,
    /// Total authority at the node.
    pub total_authority: Decimal,
    /// Amount distributed at the node.
    pub amount_distributed: Decimal,
    /// Authority still available.
    pub available: Decimal,
}

/// Acquisition leg: the documents that bought the work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionTrace {
    /// Purchase request, when one exists.
    pub purchase_request: Option<DocumentRef>,
    /// Contract, when one exists.
    pub contract: Option<DocumentRef>,
}

/// Execution leg: posted totals charged to the project's cost center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    /// Net obligations outstanding (obligated minus liquidated).
    pub obligations_outstanding: Decimal,
    /// Total disbursed from Treasury.
    pub disbursed: Decimal,
    /// Net expense recognized.
    pub expensed: Decimal,
}

/// A transaction reference in the accounting leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRef {
    /// Transaction id.
    pub id: TransactionId,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Posting status.
    pub status: TransactionStatus,
    /// Total amount.
    pub amount: Decimal,
}

/// Accounting leg: every ledger entry touching the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingTrace {
    /// Matching transactions, newest first.
    pub transactions: Vec<TransactionRef>,
}

/// Assets leg: accountable property attributed to the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsTrace {
    /// Asset ids from the project record.
    pub assets: Vec<AssetId>,
    /// Capitalized cost posted for the project's cost center.
    pub capitalized_cost: Decimal,
}

/// The fixed-shape cross-reference for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTraceability {
    /// The project.
    pub project: ProjectId,
    /// Funding leg; absent when no fund-control node matches the
    /// project's cost center.
    pub funding: Option<FundingTrace>,
    /// Acquisition leg.
    pub acquisition: AcquisitionTrace,
    /// Execution leg.
    pub execution: ExecutionTrace,
    /// Accounting leg.
    pub accounting: AccountingTrace,
    /// Assets leg.
    pub assets: AssetsTrace,
}
