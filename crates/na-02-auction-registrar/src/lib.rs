//! # NA-02 Auction Registrar
//!
//! Sealed-bid, second-price auctions for names under a registrar suffix.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure business logic, no I/O
//!   - `AuctionEntry`, `Deed`, `BidCommitment`: ledger records
//!   - `NameState`: caller-facing lifecycle
//!   - `RegistrarConfig`: configuration with validation
//!   - `BidSalt`: zeroized bid secret
//!
//! - **Algorithms** (`algorithms/`): Pure functions
//!   - State derivation, sealing, reveal accounting, finishing, invalidation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `NameAuctionApi`: Driving port (inbound API)
//!   - `LedgerGateway`, `TimeSource`: Driven ports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `NameAuctionService`: Implements `NameAuctionApi`
//!
//! - **Adapters Layer** (`adapters/`): In-memory ledger and clocks
//!
//! ## Lifecycle
//!
//! ```text
//! Available -> Bidding -> Revealing -> Won -> Owned
//!                              |          \      \
//!                              v           +------+--> Invalid
//!                          Available         (label too short)
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use na_02_auction_registrar::{
//!     ether, BidRequest, InMemoryLedger, NameAuctionApi, NameAuctionService,
//!     RegistrarConfig, RevealRequest, SystemClock,
//! };
//! use std::sync::Arc;
//!
//! let clock = Arc::new(SystemClock);
//! let ledger = Arc::new(InMemoryLedger::new(RegistrarConfig::default(), clock.clone()));
//! let service = NameAuctionService::new(ledger, clock);
//!
//! let bid = BidRequest::new("verylongname", bidder, ether(1), "secret phrase");
//! service.start_auction(bid).await?;
//! // ... once the reveal window opens
//! service.reveal(RevealRequest::new("verylongname", bidder, ether(1), "secret phrase")).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::{InMemoryLedger, ManualClock, SystemClock};
pub use domain::{
    centi_ether, ether, Address, Amount, AuctionEntry, AuctionError, AuctionTimeline, Bid,
    BidCommitment, BidReceipt, BidSalt, Deed, FinishOutcome, InvalidateOutcome, LedgerError,
    LedgerStatus, LockedValue, NameReport, NameState, RegistrarConfig, RevealOutcome,
    RevealSettlement, RevealedBid, Submission, TransactionRef,
};
pub use ports::{BidRequest, FixedClock, LedgerGateway, NameAuctionApi, RevealRequest, TimeSource};
pub use service::NameAuctionService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
