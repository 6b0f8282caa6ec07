//! Typed identifiers for type-safe entity references.
//!
//! Ledger documents are identified by human-readable codes ("INT-EXP-…",
//! "TO-2026-0142"), not opaque UUIDs, so downstream reviewers can trace an
//! entry back to its source at a glance. Typed wrappers prevent accidentally
//! passing a `FundCode` where a `UnitCode` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed identifier wrappers over human-readable codes.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an existing code.
            #[must_use]
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Returns the code as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the inner code.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Returns true if the code is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_string())
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self(code)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id!(TransactionId, "Unique identifier for a ledger transaction.");
typed_id!(
    DocumentRef,
    "Reference to an originating document (expense report, travel order, contract, …)."
);
typed_id!(FundCode, "Appropriation/fund code carried on a ledger line.");
typed_id!(
    UnitCode,
    "Organizational unit code identifying a fund-control node (command, sub-command, cost center)."
);
typed_id!(ProjectId, "Unique identifier for a project.");
typed_id!(AssetId, "Unique identifier for an accountable asset.");

impl TransactionId {
    /// Generates a fresh transaction id with a synthesis-source prefix.
    ///
    /// The prefix preserves human traceability ("ACR-…" came from the
    /// accrual path); the UUID suffix guarantees uniqueness.
    #[must_use]
    pub fn generated(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::new_v4().simple()))
    }
}
