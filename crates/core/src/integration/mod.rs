//! Synthesis of balanced ledger entries from domain events.
//!
//! Each recognized business event kind has exactly one synthesis template
//! with a hard-coded offsetting account pair, so every produced entry is
//! balanced by construction rather than checked after the fact. Events that
//! represent an actual posting are pushed into the ledger store as part of
//! synthesis; advisory operations return a decision or a derived number and
//! touch nothing.

pub mod error;
pub mod events;
pub mod service;

#[cfg(test)]
mod service_props;

pub use error::IntegrationError;
pub use events::{
    AssetRecord, ContingencyCost, ContingencyOperation, CostTransfer, DisbursementNotice, Expense,
    InventoryDrawdown, OutgrantBilling, OverheadPool, ProjectOrder, PurchaseRequest,
    RevenueRecognition, TravelOrder, TravelSettlement,
};
pub use service::{FundCertification, IntegrationService};
