//! # Domain Errors
//!
//! Error types for name parsing and name policy.

use thiserror::Error;

/// Hash type (32-byte Keccak-256).
pub type Hash = [u8; 32];

/// Hash of the empty (root) name.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Name error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Malformed label structure (empty label, leading/trailing/double dot).
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The offending input
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// The auctioned label is below the minimum length.
    #[error("Label '{label}' is too short: {actual} characters, minimum {min}")]
    LabelTooShort {
        /// The offending label
        label: String,
        /// Characters in the label
        actual: usize,
        /// Required minimum
        min: usize,
    },
}

impl NameError {
    /// Build an `InvalidName` error.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// True for policy failures (as opposed to structural ones).
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::LabelTooShort { .. })
    }
}
