//! # Ports Module
//!
//! Inbound (API) and outbound (ledger, clock) ports.

pub mod inbound;
pub mod outbound;

pub use inbound::{BidRequest, NameAuctionApi, RevealRequest};
pub use outbound::{FixedClock, LedgerGateway, TimeSource};
