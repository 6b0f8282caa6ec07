//! Property-based tests for distribution propagation.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use fundbook_shared::types::{DocumentRef, UnitCode};

use super::store::FundAuthorityStore;
use super::types::{Distribution, FundControlNode};

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A three-level tree with known unit ids.
fn seed() -> FundControlNode {
    FundControlNode {
        id: UnitCode::from("CMD"),
        name: "Command".to_string(),
        total_authority: Decimal::ZERO,
        amount_distributed: Decimal::ZERO,
        children: vec![
            Arc::new(FundControlNode {
                id: UnitCode::from("SUB-1"),
                name: "Sub One".to_string(),
                total_authority: Decimal::ZERO,
                amount_distributed: Decimal::ZERO,
                children: vec![Arc::new(FundControlNode::new("CC-100", "CC 100"))],
            }),
            Arc::new(FundControlNode::new("SUB-2", "Sub Two")),
        ],
    }
}

const UNITS: [&str; 4] = ["CMD", "SUB-1", "SUB-2", "CC-100"];

fn unit_strategy() -> impl Strategy<Value = UnitCode> {
    (0usize..UNITS.len()).prop_map(|i| UnitCode::from(UNITS[i]))
}

fn assert_invariant(node: &FundControlNode) {
    assert!(
        node.is_within_authority(),
        "unit {} overdistributed: {} of {}",
        node.id,
        node.amount_distributed,
        node.total_authority
    );
    for child in &node.children {
        assert_invariant(child);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A distribution moves exactly its target: both fields grow by the
    /// amount, and every other node is unchanged by value.
    #[test]
    fn prop_distribution_targets_exactly_one_node(
        unit in unit_strategy(),
        amount in positive_amount(),
    ) {
        let store = FundAuthorityStore::new(seed()).unwrap();
        let before = store.hierarchy();

        store.add_distribution(Distribution {
            to_unit: unit.clone(),
            amount,
            authority: DocumentRef::new("FAD-P"),
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }).unwrap();

        let after = store.hierarchy();
        for id in UNITS {
            let id = UnitCode::from(id);
            let old = before.find(&id).unwrap();
            let new = after.find(&id).unwrap();
            if id == unit {
                prop_assert_eq!(new.total_authority, old.total_authority + amount);
                prop_assert_eq!(new.amount_distributed, old.amount_distributed + amount);
            } else {
                prop_assert_eq!(new.total_authority, old.total_authority);
                prop_assert_eq!(new.amount_distributed, old.amount_distributed);
            }
        }
    }

    /// The authority invariant holds after any sequence of distributions.
    #[test]
    fn prop_invariant_holds_after_distribution_sequences(
        ops in proptest::collection::vec((unit_strategy(), positive_amount()), 1..20),
    ) {
        let store = FundAuthorityStore::new(seed()).unwrap();
        for (unit, amount) in ops {
            store.add_distribution(Distribution {
                to_unit: unit,
                amount,
                authority: DocumentRef::new("FAD-P"),
                date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            }).unwrap();
        }
        assert_invariant(&store.hierarchy());
    }
}
