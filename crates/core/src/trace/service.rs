//! The traceability projector.

use rust_decimal::Decimal;

use crate::fund::FundAuthorityStore;
use crate::ledger::{AccountCode, LedgerStore, Transaction};

use super::types::{
    AccountingTrace, AcquisitionTrace, AssetsTrace, ExecutionTrace, FundingTrace, ProjectRecord,
    ProjectTraceability, TransactionRef,
};

/// Read-only projection across the ledger and fund stores.
pub struct TraceabilityService;

impl TraceabilityService {
    /// Derives the end-to-end cross-reference for a project.
    ///
    /// A transaction belongs to the project when any of its lines charges
    /// the project's cost center, or its document reference matches one of
    /// the project's acquisition documents or assets. Execution totals
    /// count posted entries only; the accounting leg lists matches in any
    /// status so pending work is visible too.
    #[must_use]
    pub fn project_traceability(
        project: &ProjectRecord,
        ledger: &LedgerStore,
        funds: &FundAuthorityStore,
    ) -> ProjectTraceability {
        let funding = funds.find(&project.cost_center).map(|node| FundingTrace {
            unit: node.id.clone(),
            unit_name: node.name.clone(),
            total_authority: node.total_authority,
            amount_distributed: node.amount_distributed,
            available: node.available(),
        });

        let mut obligations_outstanding = Decimal::ZERO;
        let mut disbursed = Decimal::ZERO;
        let mut expensed = Decimal::ZERO;
        let mut transactions = Vec::new();

        for tx in ledger.transactions() {
            if !Self::belongs_to_project(&tx, project) {
                continue;
            }
            transactions.push(TransactionRef {
                id: tx.id.clone(),
                kind: tx.kind,
                status: tx.status,
                amount: tx.total_amount,
            });
            if !tx.status.is_posted() {
                continue;
            }
            for line in &tx.lines {
                if line.cost_center != project.cost_center {
                    continue;
                }
                match line.account {
                    AccountCode::ObligationsOutstanding => {
                        obligations_outstanding += line.credit - line.debit;
                    }
                    AccountCode::FundBalanceWithTreasury => {
                        disbursed += line.credit - line.debit;
                    }
                    account if account.is_expense() => {
                        expensed += line.debit - line.credit;
                    }
                    _ => {}
                }
            }
        }

        let capitalized_cost = ledger
            .transactions()
            .iter()
            .filter(|tx| tx.status.is_posted())
            .flat_map(|tx| tx.lines.clone())
            .filter(|line| {
                line.cost_center == project.cost_center && line.account == AccountCode::GeneralPpe
            })
            .map(|line| line.debit - line.credit)
            .sum();

        ProjectTraceability {
            project: project.id.clone(),
            funding,
            acquisition: AcquisitionTrace {
                purchase_request: project.purchase_request.clone(),
                contract: project.contract.clone(),
            },
            execution: ExecutionTrace {
                obligations_outstanding,
                disbursed,
                expensed,
            },
            accounting: AccountingTrace { transactions },
            assets: AssetsTrace {
                assets: project.assets.clone(),
                capitalized_cost,
            },
        }
    }

    fn belongs_to_project(tx: &Transaction, project: &ProjectRecord) -> bool {
        if tx.lines.iter().any(|line| line.cost_center == project.cost_center) {
            return true;
        }
        let doc = tx.document.as_str();
        if project
            .purchase_request
            .as_ref()
            .is_some_and(|pr| pr.as_str() == doc)
        {
            return true;
        }
        if project.contract.as_ref().is_some_and(|c| c.as_str() == doc) {
            return true;
        }
        project.assets.iter().any(|asset| asset.as_str() == doc)
    }
}
