//! Shared types and protocols for Fundbook.
//!
//! This crate provides the pieces every other crate leans on:
//! - Typed identifiers for type-safe document and unit references
//! - The observer protocol used by all stores for change notification
//!
//! No domain logic lives here.

pub mod observe;
pub mod types;

pub use observe::{ObserverSet, SubscriberId};
