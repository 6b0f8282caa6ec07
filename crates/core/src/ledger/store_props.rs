//! Property-based tests for the ledger store.

use proptest::prelude::*;
use rust_decimal::Decimal;

use fundbook_shared::types::{DocumentRef, FundCode, TransactionId, UnitCode};

use super::accounts::AccountCode;
use super::store::LedgerStore;
use super::types::{
    SourceModule, Transaction, TransactionKind, TransactionLine, TransactionStatus,
};
use super::validation::validate_lines;

/// Strategy for a positive amount between 0.01 and 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_lines(amounts: &[Decimal]) -> Vec<TransactionLine> {
    let total: Decimal = amounts.iter().copied().sum();
    let mut lines: Vec<TransactionLine> = amounts
        .iter()
        .map(|amount| {
            TransactionLine::debit(
                AccountCode::OperatingExpense,
                *amount,
                FundCode::from("OMA-2026"),
                UnitCode::from("CC-100"),
                None,
            )
        })
        .collect();
    lines.push(TransactionLine::credit(
        AccountCode::AccountsPayable,
        total,
        FundCode::from("OMA-2026"),
        UnitCode::from("CC-100"),
        None,
    ));
    lines
}

fn make_transaction(id: &str, lines: Vec<TransactionLine>) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        date: chrono::NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        description: "prop entry".to_string(),
        kind: TransactionKind::ManualJournal,
        source: SourceModule::Manual,
        document: DocumentRef::new("DOC-P"),
        total_amount: lines.iter().map(|l| l.debit).sum(),
        status: TransactionStatus::Posted,
        created_by: "prop".to_string(),
        lines,
        audit: vec![],
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any set of positive debits offset by one matching credit validates.
    #[test]
    fn prop_constructed_balanced_lines_accepted(
        amounts in proptest::collection::vec(positive_amount(), 1..6),
    ) {
        let lines = make_lines(&amounts);
        prop_assert!(validate_lines(&lines).is_ok());
    }

    /// Perturbing the credit side of a balanced set breaks validation.
    #[test]
    fn prop_perturbed_lines_rejected(
        amounts in proptest::collection::vec(positive_amount(), 1..6),
        delta in positive_amount(),
    ) {
        let mut lines = make_lines(&amounts);
        let last = lines.len() - 1;
        lines[last].credit += delta;
        prop_assert!(validate_lines(&lines).is_err());
    }

    /// Every posted transaction in the store balances, whatever was offered.
    #[test]
    fn prop_store_only_holds_balanced_posted_entries(
        batches in proptest::collection::vec(
            (proptest::collection::vec(positive_amount(), 1..4), any::<bool>()),
            1..8,
        ),
    ) {
        let store = LedgerStore::new();
        for (i, (amounts, tamper)) in batches.iter().enumerate() {
            let mut lines = make_lines(amounts);
            if *tamper {
                let last = lines.len() - 1;
                lines[last].credit += Decimal::ONE;
            }
            // Tampered entries are rejected; the store never sees them.
            let _ = store.add_transaction(make_transaction(&format!("P-{i}"), lines));
        }

        for tx in store.transactions() {
            prop_assert!(tx.status.is_posted());
            prop_assert!(tx.is_balanced(), "unbalanced posted entry {}", tx.id);
        }
    }

    /// Two reads without an intervening mutation return equal sequences.
    #[test]
    fn prop_snapshot_idempotent(
        amounts in proptest::collection::vec(positive_amount(), 1..4),
    ) {
        let store = LedgerStore::new();
        store
            .add_transaction(make_transaction("P-0", make_lines(&amounts)))
            .unwrap();
        prop_assert_eq!(store.transactions(), store.transactions());
    }
}
