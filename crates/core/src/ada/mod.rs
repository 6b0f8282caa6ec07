//! Anti-deficiency (fund control) validation.
//!
//! Pre-flight checks run against a candidate entry before a manual posting.
//! Pure functions over a transaction and a hierarchy snapshot: same inputs
//! always produce the same verdict, which matters because UI callers invoke
//! the check on every keystroke of a draft entry.

pub mod validator;

pub use validator::{validate, AdaVerdict};
