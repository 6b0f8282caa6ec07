//! The ADA validator.

use std::collections::HashMap;

use rust_decimal::Decimal;

use fundbook_shared::types::UnitCode;

use crate::fund::FundControlNode;
use crate::ledger::Transaction;

/// Candidate drafts may carry cent-rounded amounts; balance is checked to
/// a one-cent tolerance.
const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Outcome of an ADA check.
///
/// A value, not an error: draft entries are expected to be transiently
/// invalid while a user edits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaVerdict {
    /// Whether the candidate passed every check.
    pub valid: bool,
    /// Diagnostic for the first failing check, or a pass message.
    pub message: String,
}

impl AdaVerdict {
    fn pass() -> Self {
        Self {
            valid: true,
            message: "Candidate is balanced and within fund authority".to_string(),
        }
    }

    fn fail(message: String) -> Self {
        Self {
            valid: false,
            message,
        }
    }
}

/// Validates a candidate transaction against the fund authority hierarchy.
///
/// Checks, in order, returning the first failure:
/// 1. Debits equal credits (within the one-cent editing tolerance).
/// 2. For every line whose cost center maps to a fund-control node, the
///    cumulative obligation must not push `amount_distributed` above
///    `total_authority`.
///
/// Never mutates state.
#[must_use]
pub fn validate(candidate: &Transaction, hierarchy: &FundControlNode) -> AdaVerdict {
    let debits = candidate.total_debits();
    let credits = candidate.total_credits();
    if (debits - credits).abs() > BALANCE_TOLERANCE {
        return AdaVerdict::fail(format!(
            "Ledger imbalance: debits {debits}, credits {credits}"
        ));
    }

    // Lines whose cost center maps to no node are not fund-controlled and
    // pass through; running totals catch multi-line breaches against one
    // node in line order.
    let mut obligated: HashMap<UnitCode, Decimal> = HashMap::new();
    for line in &candidate.lines {
        if line.debit <= Decimal::ZERO {
            continue;
        }
        let Some(node) = hierarchy.find(&line.cost_center) else {
            continue;
        };
        let running = obligated.entry(line.cost_center.clone()).or_default();
        *running += line.debit;
        if node.amount_distributed + *running > node.total_authority {
            return AdaVerdict::fail(format!(
                "fund control violation: obligation of {} exceeds available authority for {} ({})",
                running, node.name, node.id
            ));
        }
    }

    AdaVerdict::pass()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{
        AccountCode, SourceModule, TransactionKind, TransactionLine, TransactionStatus,
    };
    use fundbook_shared::types::{DocumentRef, FundCode, TransactionId};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn hierarchy() -> FundControlNode {
        FundControlNode {
            id: UnitCode::from("CMD"),
            name: "Command".to_string(),
            total_authority: dec!(50000),
            amount_distributed: dec!(10000),
            children: vec![Arc::new(FundControlNode {
                id: UnitCode::from("CC-100"),
                name: "Cost Center 100".to_string(),
                total_authority: dec!(1000),
                amount_distributed: dec!(950),
                children: vec![],
            })],
        }
    }

    fn candidate(lines: Vec<TransactionLine>) -> Transaction {
        Transaction {
            id: TransactionId::new("MJE-1"),
            date: chrono::NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            description: "candidate".to_string(),
            kind: TransactionKind::ManualJournal,
            source: SourceModule::Manual,
            document: DocumentRef::new("DOC-1"),
            total_amount: lines.iter().map(|l| l.debit).sum(),
            status: TransactionStatus::PendingApproval,
            created_by: "clerk".to_string(),
            lines,
            audit: vec![],
        }
    }

    fn line(debit: Decimal, credit: Decimal, cost_center: &str) -> TransactionLine {
        TransactionLine {
            account: AccountCode::OperatingExpense,
            memo: None,
            debit,
            credit,
            fund: FundCode::from("OMA-2026"),
            cost_center: UnitCode::from(cost_center),
        }
    }

    #[test]
    fn test_rejects_imbalance_first() {
        let verdict = validate(
            &candidate(vec![line(dec!(100), dec!(0), "CC-100"), line(dec!(0), dec!(80), "CC-100")]),
            &hierarchy(),
        );
        assert!(!verdict.valid);
        assert!(verdict.message.contains("Ledger imbalance"));
    }

    #[test]
    fn test_one_cent_rounding_tolerated() {
        let verdict = validate(
            &candidate(vec![
                line(dec!(33.33), dec!(0), "UNCONTROLLED"),
                line(dec!(0), dec!(33.34), "UNCONTROLLED"),
            ]),
            &hierarchy(),
        );
        assert!(verdict.valid);
    }

    #[test]
    fn test_rejects_fund_control_breach() {
        // CC-100 has 50 available; a 100 obligation breaches it.
        let verdict = validate(
            &candidate(vec![line(dec!(100), dec!(0), "CC-100"), line(dec!(0), dec!(100), "NONE")]),
            &hierarchy(),
        );
        assert!(!verdict.valid);
        assert!(verdict.message.contains("fund control"));
        assert!(verdict.message.contains("Cost Center 100"));
        assert!(verdict.message.contains("CC-100"));
    }

    #[test]
    fn test_cumulative_lines_breach_together() {
        // Two 30s fit individually; together they exceed the 50 available.
        let verdict = validate(
            &candidate(vec![
                line(dec!(30), dec!(0), "CC-100"),
                line(dec!(30), dec!(0), "CC-100"),
                line(dec!(0), dec!(60), "NONE"),
            ]),
            &hierarchy(),
        );
        assert!(!verdict.valid);
        assert!(verdict.message.contains("fund control"));
    }

    #[test]
    fn test_within_authority_passes() {
        let verdict = validate(
            &candidate(vec![line(dec!(50), dec!(0), "CC-100"), line(dec!(0), dec!(50), "NONE")]),
            &hierarchy(),
        );
        assert!(verdict.valid, "{}", verdict.message);
    }

    #[test]
    fn test_uncontrolled_lines_pass_through() {
        let verdict = validate(
            &candidate(vec![
                line(dec!(9999), dec!(0), "NOT-IN-TREE"),
                line(dec!(0), dec!(9999), "NOT-IN-TREE"),
            ]),
            &hierarchy(),
        );
        assert!(verdict.valid);
    }

    #[test]
    fn test_deterministic_verdicts() {
        let tx = candidate(vec![line(dec!(100), dec!(0), "CC-100"), line(dec!(0), dec!(100), "NONE")]);
        let tree = hierarchy();
        assert_eq!(validate(&tx, &tree), validate(&tx, &tree));
    }

    #[test]
    fn test_validator_does_not_mutate_inputs() {
        let tx = candidate(vec![line(dec!(50), dec!(0), "CC-100"), line(dec!(0), dec!(50), "NONE")]);
        let tree = hierarchy();
        let before = tree.clone();
        let _ = validate(&tx, &tree);
        assert_eq!(tree, before);
    }
}
