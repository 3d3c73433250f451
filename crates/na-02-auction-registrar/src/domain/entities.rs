//! # Domain Entities
//!
//! Auction entries, deeds, bid commitments and operation receipts.

use super::errors::{AuctionError, LedgerError};
use super::value_objects::{Address, Amount, Hash, LedgerStatus, LockedValue, NameState, TransactionRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ledger view of one top-level name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionEntry {
    /// Raw ledger status.
    pub status: LedgerStatus,
    /// Deed holding the winning deposit (zero if none).
    pub deed: Address,
    /// Registration deadline (unix seconds, zero if never auctioned).
    pub registration_date: u64,
    /// Second-highest revealed bid, or the minimum.
    pub value: LockedValue,
    /// Highest revealed bid.
    pub highest_bid: Amount,
}

impl AuctionEntry {
    /// Entry for a name never auctioned.
    pub fn open() -> Self {
        Self {
            status: LedgerStatus::Open,
            deed: Address::ZERO,
            registration_date: 0,
            value: LockedValue::Minimum,
            highest_bid: Amount::zero(),
        }
    }

    /// Decode the raw ledger tuple.
    pub fn from_raw(
        status_code: u8,
        deed: Address,
        registration_date: u64,
        value: Amount,
        highest_bid: Amount,
    ) -> Result<Self, LedgerError> {
        let status = LedgerStatus::from_code(status_code)
            .ok_or_else(|| LedgerError::Rejected(format!("unknown status code {}", status_code)))?;
        Ok(Self {
            status,
            deed,
            registration_date,
            value: LockedValue::from_raw(value),
            highest_bid,
        })
    }

    /// Bidding and reveal deadlines, if an auction was ever started.
    pub fn timeline(&self, reveal_period_secs: u64) -> Option<AuctionTimeline> {
        if self.registration_date == 0 {
            return None;
        }
        Some(AuctionTimeline::new(self.registration_date, reveal_period_secs))
    }

    /// True once some bid has been revealed.
    pub fn has_revealed_bid(&self) -> bool {
        !self.highest_bid.is_zero()
    }
}

impl Default for AuctionEntry {
    fn default() -> Self {
        Self::open()
    }
}

/// Deadlines of one auction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionTimeline {
    /// Last second sealed bids are accepted (exclusive).
    pub bidding_ends: u64,
    /// Last second bids may be revealed (exclusive); the registration date.
    pub revealing_ends: u64,
}

impl AuctionTimeline {
    /// Derive from the registration date.
    pub fn new(registration_date: u64, reveal_period_secs: u64) -> Self {
        Self {
            bidding_ends: registration_date.saturating_sub(reveal_period_secs),
            revealing_ends: registration_date,
        }
    }

    /// Sealed bids accepted at `now`.
    pub fn is_bidding(&self, now: u64) -> bool {
        now < self.bidding_ends
    }

    /// Reveals accepted at `now`.
    pub fn is_revealing(&self, now: u64) -> bool {
        now >= self.bidding_ends && now < self.revealing_ends
    }

    /// Both windows closed.
    pub fn is_over(&self, now: u64) -> bool {
        now >= self.revealing_ends
    }
}

/// Locked stake tied to a name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deed {
    /// Deed address.
    pub address: Address,
    /// Current owner.
    pub owner: Address,
    /// Locked amount.
    pub balance: Amount,
}

/// A sealed bid as recorded by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidCommitment {
    /// Seal binding label, bidder, value and salt.
    pub sealed_hash: Hash,
    /// Bidder.
    pub bidder: Address,
    /// Amount attached; at least the bid value.
    pub deposit: Amount,
}

/// A commitment opened with its value and salt.
///
/// Only produced by a successful reveal check, so a revealed bid without a
/// matching prior seal cannot be built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedBid {
    commitment: BidCommitment,
    label_hash: Hash,
    value: Amount,
    salt_digest: Hash,
}

impl RevealedBid {
    pub(crate) fn new(commitment: BidCommitment, label_hash: Hash, value: Amount, salt_digest: Hash) -> Self {
        Self {
            commitment,
            label_hash,
            value,
            salt_digest,
        }
    }

    /// The opened commitment.
    pub fn commitment(&self) -> &BidCommitment {
        &self.commitment
    }

    /// Label the bid was for.
    pub fn label_hash(&self) -> Hash {
        self.label_hash
    }

    /// True bid value.
    pub fn value(&self) -> Amount {
        self.value
    }

    /// Digest of the salt used in the seal.
    pub fn salt_digest(&self) -> Hash {
        self.salt_digest
    }
}

/// A bid is either still sealed or revealed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bid {
    /// Value hidden; only the seal and deposit are known.
    Sealed(BidCommitment),
    /// Value and salt disclosed and checked against the seal.
    Revealed(RevealedBid),
}

impl Bid {
    /// The underlying commitment.
    pub fn commitment(&self) -> &BidCommitment {
        match self {
            Self::Sealed(c) => c,
            Self::Revealed(r) => r.commitment(),
        }
    }

    /// Seal of the bid.
    pub fn sealed_hash(&self) -> Hash {
        self.commitment().sealed_hash
    }

    /// Bidder.
    pub fn bidder(&self) -> Address {
        self.commitment().bidder
    }

    /// Deposit attached at seal time.
    pub fn deposit(&self) -> Amount {
        self.commitment().deposit
    }

    /// True once revealed.
    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

/// How the ledger settled one matching reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealSettlement {
    /// Bid below the registrar minimum; deposit returned.
    BelowMinimum {
        /// Returned to the bidder
        refund: Amount,
    },
    /// New highest bid; the previous leader's deed is released.
    NewLeader {
        /// Deposit in excess of the bid, returned to the bidder
        refund: Amount,
        /// Previous leader, refunded in full
        displaced: Option<Address>,
    },
    /// Second-highest so far; sets the settlement price.
    RunnerUp {
        /// Returned to the bidder
        refund: Amount,
    },
    /// Neither highest nor second; deposit returned.
    Outbid {
        /// Returned to the bidder
        refund: Amount,
    },
}

impl RevealSettlement {
    /// Amount returned to the revealing bidder.
    pub fn refund(&self) -> Amount {
        match self {
            Self::BelowMinimum { refund }
            | Self::NewLeader { refund, .. }
            | Self::RunnerUp { refund }
            | Self::Outbid { refund } => *refund,
        }
    }

    /// True if the revealed bid took the lead.
    pub fn is_leading(&self) -> bool {
        matches!(self, Self::NewLeader { .. })
    }
}

/// Accepted submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Correlation id used in log lines.
    pub operation_id: Uuid,
    /// Ledger transaction reference.
    pub tx: TransactionRef,
    /// Normalized name.
    pub name: String,
}

/// Result of starting an auction or placing a bid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidReceipt {
    /// Accepted submission.
    pub submission: Submission,
    /// The commitment sent.
    pub commitment: BidCommitment,
}

/// Result of a reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealOutcome {
    /// Accepted submission.
    pub submission: Submission,
    /// Commitment that matched.
    pub sealed_hash: Hash,
    /// Revealed value.
    pub value: Amount,
    /// Accounting against the entry as read before submission.
    pub settlement: RevealSettlement,
}

/// Result of finishing an auction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishOutcome {
    /// Accepted submission.
    pub submission: Submission,
    /// Deed owner who becomes registry owner.
    pub winner: Address,
    /// Second-price settlement amount.
    pub settlement: Amount,
}

/// Result of an invalidation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidateOutcome {
    /// Accepted submission.
    pub submission: Submission,
    /// State before invalidation.
    pub previous_state: NameState,
    /// Characters in the offending label.
    pub label_length: usize,
}

/// Everything known about one name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameReport {
    /// Normalized name.
    pub name: String,
    /// Hex namehash.
    pub name_hash: String,
    /// Derived state.
    pub state: NameState,
    /// Auction entry (top-level names only).
    pub entry: Option<AuctionEntry>,
    /// Deadlines (top-level names with an auction only).
    pub timeline: Option<AuctionTimeline>,
    /// Deed owner (Won or Owned only).
    pub deed_owner: Option<Address>,
    /// Registry owner, if set.
    pub registry_owner: Option<Address>,
    /// Resolver, or None if not configured.
    pub resolver: Option<Address>,
    /// True if an Available name would be refused by the length rule.
    pub length_restricted: bool,
}

impl NameReport {
    /// Available and startable.
    pub fn is_available(&self) -> bool {
        self.state == NameState::Available && !self.length_restricted
    }

    /// Render as JSON.
    pub fn to_json(&self) -> Result<String, AuctionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AuctionError::Validation(format!("report serialization failed: {}", e)))
    }
}
