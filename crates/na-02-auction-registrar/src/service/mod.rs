//! # Service Layer
//!
//! Implements the `NameAuctionApi` over a ledger gateway.

mod name_auction_service;

pub use name_auction_service::NameAuctionService;
