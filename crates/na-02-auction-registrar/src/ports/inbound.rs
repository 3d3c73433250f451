//! # Inbound Ports
//!
//! API trait defining what the auction registrar can do.
//!
//! Names may be given with or without the registrar suffix; `enstest`
//! and `enstest.eth` are the same name.

use crate::domain::{
    Address, Amount, AuctionError, BidReceipt, BidSalt, FinishOutcome, InvalidateOutcome,
    NameReport, NameState, RevealOutcome, Submission,
};
use async_trait::async_trait;

/// A sealed bid to place.
#[derive(Clone, Debug)]
pub struct BidRequest {
    /// Name to bid on.
    pub name: String,
    /// Bidder.
    pub bidder: Address,
    /// True bid value.
    pub value: Amount,
    /// Optional larger deposit to hide the value.
    pub mask: Option<Amount>,
    /// Salt phrase needed again at reveal.
    pub salt: BidSalt,
}

impl BidRequest {
    /// Create a bid without a mask.
    pub fn new(name: impl Into<String>, bidder: Address, value: Amount, salt: impl Into<BidSalt>) -> Self {
        Self {
            name: name.into(),
            bidder,
            value,
            mask: None,
            salt: salt.into(),
        }
    }

    /// Builder-style method to set the mask
    pub fn with_mask(mut self, mask: Amount) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// A reveal to submit.
#[derive(Clone, Debug)]
pub struct RevealRequest {
    /// Name the bid was for.
    pub name: String,
    /// Bidder.
    pub bidder: Address,
    /// Value as sealed.
    pub value: Amount,
    /// Salt as sealed.
    pub salt: BidSalt,
}

impl RevealRequest {
    /// Create a reveal.
    pub fn new(name: impl Into<String>, bidder: Address, value: Amount, salt: impl Into<BidSalt>) -> Self {
        Self {
            name: name.into(),
            bidder,
            value,
            salt: salt.into(),
        }
    }
}

impl From<&BidRequest> for RevealRequest {
    fn from(bid: &BidRequest) -> Self {
        Self {
            name: bid.name.clone(),
            bidder: bid.bidder,
            value: bid.value,
            salt: bid.salt.clone(),
        }
    }
}

/// Name auction API - inbound port.
#[async_trait]
pub trait NameAuctionApi: Send + Sync {
    /// Current lifecycle state.
    async fn state(&self, name: &str) -> Result<NameState, AuctionError>;

    /// True if an auction can be started for the name now.
    async fn is_available(&self, name: &str) -> Result<bool, AuctionError>;

    /// Everything known about the name.
    async fn info(&self, name: &str) -> Result<NameReport, AuctionError>;

    /// Start an auction with a first sealed bid.
    async fn start_auction(&self, request: BidRequest) -> Result<BidReceipt, AuctionError>;

    /// Place a sealed bid on a running auction.
    async fn place_bid(&self, request: BidRequest) -> Result<BidReceipt, AuctionError>;

    /// Reveal a sealed bid.
    async fn reveal(&self, request: RevealRequest) -> Result<RevealOutcome, AuctionError>;

    /// Finish a won auction.
    async fn finish(&self, name: &str) -> Result<FinishOutcome, AuctionError>;

    /// Reclaim a won or owned name that violates the length rule.
    async fn invalidate(&self, name: &str) -> Result<InvalidateOutcome, AuctionError>;

    /// Transfer an owned name.
    async fn transfer(&self, name: &str, new_owner: Address) -> Result<Submission, AuctionError>;

    /// Assign a subdomain owner under an owned parent.
    async fn set_subdomain_owner(&self, name: &str, owner: Address) -> Result<Submission, AuctionError>;
}
