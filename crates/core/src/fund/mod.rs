//! Fund authority tree and distribution propagation.
//!
//! A rooted tree of fund-control nodes (command → sub-command → cost
//! center), each tracking total authority and the amount distributed out of
//! it. Updates rebuild only the path from the root to the touched node, so
//! snapshots held by concurrent readers never observe a torn write.

pub mod error;
pub mod store;
pub mod types;

#[cfg(test)]
mod store_props;

pub use error::FundError;
pub use store::FundAuthorityStore;
pub use types::{Distribution, FundControlNode, TransferAction};
