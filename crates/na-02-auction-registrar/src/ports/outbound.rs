//! # Outbound Ports
//!
//! Traits for external dependencies: the registration ledger and the clock.
//!
//! The ledger is the only source of truth. Submissions return as soon as the
//! ledger accepts them; confirmation is not awaited.

use crate::domain::{Address, Amount, AuctionEntry, BidCommitment, BidSalt, Deed, Hash, LedgerError, TransactionRef};
use async_trait::async_trait;

/// Registration ledger - outbound port.
///
/// Auction entries are keyed by the label hash of the auctioned label;
/// registry records (owner, resolver) by namehash.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Auction entry for a label.
    async fn get_auction_entry(&self, label_hash: Hash) -> Result<AuctionEntry, LedgerError>;

    /// Registry owner of a node (zero if unset).
    async fn get_owner(&self, node: Hash) -> Result<Address, LedgerError>;

    /// Resolver of a node. Fails if none is configured.
    async fn get_resolver(&self, node: Hash) -> Result<Address, LedgerError>;

    /// Deed at an address.
    async fn get_deed(&self, deed: Address) -> Result<Option<Deed>, LedgerError>;

    /// Commitment recorded for `(bidder, sealed_hash)`.
    async fn get_sealed_bid(
        &self,
        bidder: Address,
        sealed_hash: Hash,
    ) -> Result<Option<BidCommitment>, LedgerError>;

    /// Start an auction for a label and record the first sealed bid.
    async fn submit_start_auction_and_bid(
        &self,
        label_hash: Hash,
        commitment: &BidCommitment,
    ) -> Result<TransactionRef, LedgerError>;

    /// Record a sealed bid.
    async fn submit_sealed_bid(&self, commitment: &BidCommitment) -> Result<TransactionRef, LedgerError>;

    /// Reveal a sealed bid.
    async fn submit_reveal(
        &self,
        label_hash: Hash,
        bidder: Address,
        value: Amount,
        salt: &BidSalt,
    ) -> Result<TransactionRef, LedgerError>;

    /// Finish a won auction.
    async fn submit_finish(&self, label_hash: Hash) -> Result<TransactionRef, LedgerError>;

    /// Invalidate a name. Takes the label in clear so the ledger can check
    /// its length.
    async fn submit_invalidate(&self, label: &str) -> Result<TransactionRef, LedgerError>;

    /// Transfer an owned name.
    async fn submit_transfer(&self, label_hash: Hash, new_owner: Address) -> Result<TransactionRef, LedgerError>;

    /// Assign the owner of `subdomain` under `parent`.
    async fn submit_set_subdomain_owner(
        &self,
        parent: Hash,
        subdomain_label_hash: Hash,
        owner: Address,
    ) -> Result<TransactionRef, LedgerError>;
}

/// Clock - outbound port (unix seconds).
pub trait TimeSource: Send + Sync {
    /// Current time.
    fn now(&self) -> u64;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Clock frozen at a fixed time.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedClock(pub u64);

impl TimeSource for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}
