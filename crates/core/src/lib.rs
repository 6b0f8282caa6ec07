//! Core business logic for Fundbook.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and synthesis
//! templates live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry ledger store and bookkeeping rules
//! - `fund` - Fund authority tree and distribution propagation
//! - `ada` - Anti-deficiency (fund control) validation
//! - `integration` - Synthesis of balanced entries from domain events
//! - `trace` - Project traceability projection
//! - `context` - Explicit store construction and seed loading

pub mod ada;
pub mod context;
pub mod fund;
pub mod integration;
pub mod ledger;
pub mod trace;
