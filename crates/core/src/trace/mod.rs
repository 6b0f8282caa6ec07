//! Project traceability projection.
//!
//! A read-only cross-reference proving that every financial artifact for a
//! project can be traced end-to-end: funding, acquisition, execution,
//! accounting, and assets. No writes, no state machine.

pub mod service;
pub mod types;

pub use service::TraceabilityService;
pub use types::{
    AccountingTrace, AcquisitionTrace, AssetsTrace, ExecutionTrace, FundingTrace, ProjectRecord,
    ProjectTraceability, TransactionRef,
};
