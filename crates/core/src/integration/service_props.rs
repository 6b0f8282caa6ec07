//! Property-based tests for synthesis determinism and balance.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use fundbook_shared::types::{DocumentRef, FundCode, UnitCode};

use crate::ledger::{AccountCode, LedgerStore, Transaction};

use super::events::{ContingencyCost, ContingencyOperation, Expense, TravelSettlement};
use super::service::IntegrationService;

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
}

fn expense(amount: Decimal) -> Expense {
    Expense {
        id: DocumentRef::new("EXP-P"),
        description: "prop expense".to_string(),
        amount,
        vendor: None,
        fund: FundCode::from("OMA-2026"),
        cost_center: UnitCode::from("CC-100"),
        date: date(),
    }
}

/// Account/side/amount triples, the deterministic part of a synthesis.
fn line_shape(tx: &Transaction) -> Vec<(AccountCode, Decimal, Decimal)> {
    tx.lines
        .iter()
        .map(|line| (line.account, line.debit, line.credit))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Synthesis is deterministic for identical inputs, ignoring the
    /// generated id and audit timestamps.
    #[test]
    fn prop_synthesis_deterministic(amount in positive_amount()) {
        let ledger = LedgerStore::new();
        let event = expense(amount);
        let first = IntegrationService::accrue_expense(&ledger, &event, "system").unwrap();
        let second = IntegrationService::accrue_expense(&ledger, &event, "system").unwrap();

        prop_assert_ne!(&first.id, &second.id, "generated ids must differ");
        prop_assert_eq!(line_shape(&first), line_shape(&second));
        prop_assert_eq!(first.total_amount, second.total_amount);
        prop_assert_eq!(first.kind, second.kind);
    }

    /// Every accrual balances by construction.
    #[test]
    fn prop_accrual_balances(amount in positive_amount()) {
        let ledger = LedgerStore::new();
        let tx = IntegrationService::accrue_expense(&ledger, &expense(amount), "system").unwrap();
        prop_assert!(tx.is_balanced());
        prop_assert_eq!(tx.total_amount, amount);
    }

    /// Travel settlements balance whatever the actual/obligated split.
    #[test]
    fn prop_travel_settlement_balances(
        actual in positive_amount(),
        obligated in positive_amount(),
    ) {
        let ledger = LedgerStore::new();
        let tx = IntegrationService::settle_travel(
            &ledger,
            &TravelSettlement {
                order_id: DocumentRef::new("TO-P"),
                traveler: "prop".to_string(),
                actual_cost: actual,
                obligated_cost: obligated,
                fund: FundCode::from("OMA-2026"),
                cost_center: UnitCode::from("CC-100"),
                date: date(),
            },
            "system",
        ).unwrap();
        prop_assert!(tx.is_balanced());
    }

    /// Contingency tagging balances for any non-empty category set.
    #[test]
    fn prop_contingency_tagging_balances(
        amounts in proptest::collection::vec(positive_amount(), 1..8),
    ) {
        let ledger = LedgerStore::new();
        let costs = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| ContingencyCost {
                category: format!("Category {i}"),
                amount: *amount,
            })
            .collect();
        let tx = IntegrationService::tag_contingency_costs(
            &ledger,
            &ContingencyOperation {
                id: DocumentRef::new("OP-P"),
                name: "prop op".to_string(),
                fund: FundCode::from("OMA-2026"),
                cost_center: UnitCode::from("CC-100"),
                costs,
                date: date(),
            },
            "system",
        ).unwrap();
        prop_assert!(tx.is_balanced());
        prop_assert_eq!(tx.lines.len(), amounts.len() + 1);
    }
}
