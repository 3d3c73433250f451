//! # Domain Errors
//!
//! Error types for the auction registrar.
//!
//! Local checks (name structure, length policy, lifecycle preconditions, salt)
//! fail before anything is submitted. Ledger transport failures are surfaced
//! as `LedgerUnavailable` and never folded into a name state.

use super::value_objects::NameState;
use na_01_name_hashing::NameError;
use std::time::Duration;
use thiserror::Error;

/// Auction registrar error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    /// Malformed label structure.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The offending input
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// The name fails the length policy.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Operation attempted in the wrong lifecycle state.
    #[error("Precondition failed for '{name}': {reason} (state: {state})")]
    Precondition {
        /// Name the operation targeted
        name: String,
        /// State observed on the ledger
        state: NameState,
        /// What was required
        reason: String,
    },

    /// Empty salt.
    #[error("Salt is required")]
    MissingSalt,

    /// Ledger query or submission failed or timed out. Retryable.
    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// Reveal does not match any recorded commitment.
    #[error("Reveal does not match commitment {sealed_hash}")]
    Mismatch {
        /// Hex of the recomputed seal
        sealed_hash: String,
    },

    /// The ledger refused a submission.
    #[error("Ledger rejected submission: {0}")]
    LedgerRejected(String),

    /// Bid or deposit inconsistency.
    #[error("Invalid bid: {0}")]
    InvalidBid(String),
}

impl AuctionError {
    /// Build a `Precondition` error.
    pub fn precondition(name: impl Into<String>, state: NameState, reason: impl Into<String>) -> Self {
        Self::Precondition {
            name: name.into(),
            state,
            reason: reason.into(),
        }
    }

    /// True if the caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LedgerUnavailable(_))
    }
}

impl From<NameError> for AuctionError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::InvalidName { name, reason } => Self::InvalidName { name, reason },
            policy @ NameError::LabelTooShort { .. } => Self::Validation(policy.to_string()),
        }
    }
}

/// Ledger gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Transport or node failure.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within the configured bound.
    #[error("Ledger call '{operation}' timed out after {elapsed:?}")]
    Timeout {
        /// Gateway method
        operation: String,
        /// Configured bound
        elapsed: Duration,
    },

    /// The ledger processed and refused the call.
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl From<LedgerError> for AuctionError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Unavailable(_) | LedgerError::Timeout { .. } => {
                Self::LedgerUnavailable(err.to_string())
            }
            LedgerError::Rejected(reason) => Self::LedgerRejected(reason),
        }
    }
}
