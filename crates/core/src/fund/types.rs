//! Fund-control domain types.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fundbook_shared::types::{DocumentRef, UnitCode};

/// A node in the fund authority tree.
///
/// Children are held behind `Arc` so a path-only rebuild can keep sibling
/// subtrees by reference. Invariant: `amount_distributed <=
/// total_authority` for every node in every published snapshot, and no
/// node id appears twice in one tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundControlNode {
    /// Organizational unit code identifying this node.
    pub id: UnitCode,
    /// Display name.
    pub name: String,
    /// Total authority apportioned to this node.
    #[serde(default)]
    pub total_authority: Decimal,
    /// Amount distributed onward (to children or execution).
    #[serde(default)]
    pub amount_distributed: Decimal,
    /// Subordinate nodes, ordered.
    #[serde(default)]
    pub children: Vec<Arc<FundControlNode>>,
}

impl FundControlNode {
    /// Creates a leaf node with no authority.
    #[must_use]
    pub fn new(id: impl Into<UnitCode>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_authority: Decimal::ZERO,
            amount_distributed: Decimal::ZERO,
            children: Vec::new(),
        }
    }

    /// Authority still available at this node.
    #[must_use]
    pub fn available(&self) -> Decimal {
        self.total_authority - self.amount_distributed
    }

    /// Returns true when this node respects the authority invariant.
    #[must_use]
    pub fn is_within_authority(&self) -> bool {
        self.amount_distributed <= self.total_authority
    }

    /// Finds a node by exact id, pre-order.
    #[must_use]
    pub fn find(&self, id: &UnitCode) -> Option<&FundControlNode> {
        if self.id == *id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Finds a node by display name, pre-order first match.
    ///
    /// Name-based lookup is a convenience for reporting only - the tree may
    /// hold same-named siblings, so mutation paths always match by id.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&FundControlNode> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_name(name))
    }

    /// Walks the subtree and returns the first node violating the
    /// authority invariant, if any.
    #[must_use]
    pub fn first_overdistributed(&self) -> Option<&FundControlNode> {
        if !self.is_within_authority() {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.first_overdistributed())
    }
}

/// Authority pushed down from Treasury apportionment to a named unit.
///
/// Self-contained, not a double-entry pair: applying it increases both
/// `total_authority` and `amount_distributed` of the matched node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Exact id of the receiving unit.
    pub to_unit: UnitCode,
    /// Amount of authority distributed.
    pub amount: Decimal,
    /// The apportionment/authority document behind this distribution.
    pub authority: DocumentRef,
    /// Effective date.
    pub date: NaiveDate,
}

/// Authority reassignment between two fund nodes.
///
/// Bookkept as a pair of offsetting adjustments: recording the action does
/// not itself rebalance the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferAction {
    /// Unit giving up authority.
    pub from_unit: UnitCode,
    /// Unit receiving authority.
    pub to_unit: UnitCode,
    /// Amount reassigned.
    pub amount: Decimal,
    /// Justification.
    pub reason: String,
    /// Effective date.
    pub date: NaiveDate,
}
