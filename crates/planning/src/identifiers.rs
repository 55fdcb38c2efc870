//! Newtype domain identifiers.
//!
//! Every planning concept that has an identity is represented as a distinct
//! newtype wrapping a primitive. This prevents accidentally interchanging a
//! [`MilestoneNumber`] with an [`IssueNumber`] even though both are `u64`
//! under the hood.
//!
//! All newtypes serialise transparently, so the on-disk JSON carries plain
//! numbers and strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes.
// Generates: struct (Copy, Ord), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// Identifies a sprint milestone within one planning run.
    ///
    /// Assigned in creation order starting at 1. Numbers restart at 1 on every
    /// run, so the same number may name different milestones across runs.
    MilestoneNumber
}

u64_id! {
    /// Identifies a locally stored issue.
    ///
    /// Derived from the wall clock (`unix seconds mod 100000`), so two issues
    /// created in the same second share a number and the later one overwrites
    /// the earlier document.
    IssueNumber
}

impl IssueNumber {
    /// Exclusive upper bound of the issue number space.
    pub const MODULUS: i64 = 100_000;

    /// Derives an issue number from a unix timestamp in whole seconds.
    pub fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds.rem_euclid(Self::MODULUS) as u64)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single planning run (one invocation of the planner).
///
/// Generated fresh for every CLI invocation and attached to the run's tracing
/// span so all activity from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanningRunId(Uuid);

impl PlanningRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PlanningRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a GitHub repository in `"owner/repo"` format.
    RepositoryId
}

impl RepositoryId {
    /// Builds an identifier from its owner and repository name.
    ///
    /// Returns `None` if either part is empty.
    pub fn from_parts(owner: &str, name: &str) -> Option<Self> {
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Self::new(format!("{owner}/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_id_joins_owner_and_name() {
        let repo = RepositoryId::from_parts("acme", "widgets").unwrap();
        assert_eq!(repo.as_str(), "acme/widgets");
        assert!(RepositoryId::from_parts("", "widgets").is_none());
        assert!(RepositoryId::from_parts("acme", "").is_none());
    }

    #[test]
    fn issue_number_wraps_at_modulus() {
        assert_eq!(IssueNumber::from_unix_seconds(1_704_067_200).as_u64(), 67_200);
        assert_eq!(IssueNumber::from_unix_seconds(99_999).as_u64(), 99_999);
        assert_eq!(IssueNumber::from_unix_seconds(100_000).as_u64(), 0);
    }

    #[test]
    fn identifiers_serialise_as_plain_values() {
        let json = serde_json::to_string(&MilestoneNumber::new(3)).unwrap();
        assert_eq!(json, "3");
        let json = serde_json::to_string(&RepositoryId::new("a/b").unwrap()).unwrap();
        assert_eq!(json, "\"a/b\"");
    }
}
