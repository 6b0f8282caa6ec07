//! The fund authority store.
//!
//! Holds the tree root behind a lock and publishes `Arc` snapshots. Every
//! mutation rebuilds only the path from the root to the touched node
//! (copy-on-write); sibling subtrees are carried over by reference, so an
//! old snapshot handle remains valid and unchanged after any update.

use std::sync::{Arc, RwLock};

use rust_decimal::Decimal;

use fundbook_shared::observe::{ObserverSet, SubscriberId};
use fundbook_shared::types::UnitCode;

use super::error::FundError;
use super::types::{Distribution, FundControlNode, TransferAction};

/// Store owning the fund authority tree and the transfer log.
#[derive(Debug)]
pub struct FundAuthorityStore {
    root: RwLock<Arc<FundControlNode>>,
    distributions: RwLock<Vec<Arc<Distribution>>>,
    transfers: RwLock<Vec<Arc<TransferAction>>>,
    observers: ObserverSet,
}

impl FundAuthorityStore {
    /// Creates a store over a seed hierarchy.
    ///
    /// # Errors
    ///
    /// `AuthorityExceeded` if any seed node is already overdistributed.
    pub fn new(root: FundControlNode) -> Result<Self, FundError> {
        check_subtree(&root)?;
        Ok(Self {
            root: RwLock::new(Arc::new(root)),
            distributions: RwLock::new(Vec::new()),
            transfers: RwLock::new(Vec::new()),
            observers: ObserverSet::new(),
        })
    }

    /// Returns the current tree snapshot.
    #[must_use]
    pub fn hierarchy(&self) -> Arc<FundControlNode> {
        Arc::clone(&self.root.read().expect("fund store lock poisoned"))
    }

    /// Finds a node by exact id in the current snapshot.
    #[must_use]
    pub fn find(&self, id: &UnitCode) -> Option<Arc<FundControlNode>> {
        find_arc(&self.hierarchy(), id)
    }

    /// Finds a node by display name, pre-order first match.
    ///
    /// Convenience query for reporting. Mutation paths never use it: two
    /// nodes may share a name, and only exact ids are unambiguous.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Arc<FundControlNode>> {
        find_arc_by_name(&self.hierarchy(), name)
    }

    /// Authority still available at a unit, if the unit exists.
    #[must_use]
    pub fn available(&self, id: &UnitCode) -> Option<Decimal> {
        self.find(id).map(|node| node.available())
    }

    /// Applies a Treasury apportionment to the unit matching
    /// `distribution.to_unit` by exact id.
    ///
    /// Atomically increments both `total_authority` and
    /// `amount_distributed` by the distribution amount, records the
    /// distribution, and notifies subscribers.
    ///
    /// # Errors
    ///
    /// `NonPositiveAmount` for amounts <= 0; `InvalidTarget` when no node
    /// matches (never a silent no-op).
    pub fn add_distribution(&self, distribution: Distribution) -> Result<(), FundError> {
        if distribution.amount <= Decimal::ZERO {
            return Err(FundError::NonPositiveAmount);
        }

        {
            let mut root = self.root.write().expect("fund store lock poisoned");
            let target = find_arc(&*root, &distribution.to_unit)
                .ok_or_else(|| FundError::InvalidTarget(distribution.to_unit.clone()))?;

            let updated = Arc::new(FundControlNode {
                id: target.id.clone(),
                name: target.name.clone(),
                total_authority: target.total_authority + distribution.amount,
                amount_distributed: target.amount_distributed + distribution.amount,
                children: target.children.clone(),
            });

            *root = replace_node(&*root, &distribution.to_unit, updated)
                .expect("target located above, replacement cannot miss");

            self.distributions
                .write()
                .expect("fund store lock poisoned")
                .push(Arc::new(distribution.clone()));
        }

        tracing::info!(
            unit = %distribution.to_unit,
            amount = %distribution.amount,
            "distribution applied"
        );
        self.observers.notify();
        Ok(())
    }

    /// Replaces the node with `node.id` anywhere in the tree.
    ///
    /// The path from the root to the match is reconstructed; sibling
    /// subtrees are reused by reference.
    ///
    /// # Errors
    ///
    /// `AuthorityExceeded` when the replacement subtree violates the
    /// authority invariant; `NodeNotFound` when no node matches.
    pub fn update_node(&self, node: FundControlNode) -> Result<(), FundError> {
        check_subtree(&node)?;

        let id = node.id.clone();
        {
            let mut root = self.root.write().expect("fund store lock poisoned");
            *root = replace_node(&*root, &id, Arc::new(node))
                .ok_or_else(|| FundError::NodeNotFound(id.clone()))?;
        }

        tracing::debug!(unit = %id, "fund node updated");
        self.observers.notify();
        Ok(())
    }

    /// Records an authority reassignment in the transfer log.
    ///
    /// The log itself does not rebalance nodes. Usage discipline: callers
    /// must follow up with `update_node` for both endpoints, or the tree
    /// and the transfer log diverge.
    ///
    /// # Errors
    ///
    /// `NonPositiveAmount`, `SelfTransfer`, or `InvalidTarget` when either
    /// endpoint matches no node.
    pub fn add_transfer(&self, transfer: TransferAction) -> Result<(), FundError> {
        if transfer.amount <= Decimal::ZERO {
            return Err(FundError::NonPositiveAmount);
        }
        if transfer.from_unit == transfer.to_unit {
            return Err(FundError::SelfTransfer(transfer.to_unit));
        }
        {
            let root = self.root.read().expect("fund store lock poisoned");
            for unit in [&transfer.from_unit, &transfer.to_unit] {
                if find_arc(&*root, unit).is_none() {
                    return Err(FundError::InvalidTarget(unit.clone()));
                }
            }
        }

        self.transfers
            .write()
            .expect("fund store lock poisoned")
            .push(Arc::new(transfer));
        self.observers.notify();
        Ok(())
    }

    /// Returns the transfer log, oldest first.
    #[must_use]
    pub fn transfers(&self) -> Vec<Arc<TransferAction>> {
        self.transfers
            .read()
            .expect("fund store lock poisoned")
            .clone()
    }

    /// Returns the distribution log, oldest first.
    #[must_use]
    pub fn distributions(&self) -> Vec<Arc<Distribution>> {
        self.distributions
            .read()
            .expect("fund store lock poisoned")
            .clone()
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

/// Pre-order search returning a shared handle.
fn find_arc(node: &Arc<FundControlNode>, id: &UnitCode) -> Option<Arc<FundControlNode>> {
    if node.id == *id {
        return Some(Arc::clone(node));
    }
    node.children.iter().find_map(|child| find_arc(child, id))
}

fn find_arc_by_name(node: &Arc<FundControlNode>, name: &str) -> Option<Arc<FundControlNode>> {
    if node.name == name {
        return Some(Arc::clone(node));
    }
    node.children
        .iter()
        .find_map(|child| find_arc_by_name(child, name))
}

/// Rebuilds the path from `node` down to the first pre-order match of
/// `target`, substituting `replacement` there. Untouched subtrees are
/// carried over by reference.
fn replace_node(
    node: &Arc<FundControlNode>,
    target: &UnitCode,
    replacement: Arc<FundControlNode>,
) -> Option<Arc<FundControlNode>> {
    if node.id == *target {
        return Some(replacement);
    }
    for (index, child) in node.children.iter().enumerate() {
        if let Some(rebuilt) = replace_node(child, target, Arc::clone(&replacement)) {
            let mut children = node.children.clone();
            children[index] = rebuilt;
            return Some(Arc::new(FundControlNode {
                id: node.id.clone(),
                name: node.name.clone(),
                total_authority: node.total_authority,
                amount_distributed: node.amount_distributed,
                children,
            }));
        }
    }
    None
}

/// Returns the first authority-invariant violation in a subtree.
fn check_subtree(node: &FundControlNode) -> Result<(), FundError> {
    match node.first_overdistributed() {
        None => Ok(()),
        Some(offender) => Err(FundError::AuthorityExceeded {
            unit: offender.id.clone(),
            total_authority: offender.total_authority,
            amount_distributed: offender.amount_distributed,
        }),
    }
}
