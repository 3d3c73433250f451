//! # Name Auction Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate flows
//!     ├── flows.rs          # seal -> reveal -> finish -> invalidate
//!     ├── concurrency.rs    # racing submissions against one ledger
//!     └── telemetry.rs      # subscriber installation
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p na-tests
//! cargo test -p na-tests integration::
//!
//! # Benchmarks
//! cargo bench -p na-tests
//! ```

#![allow(dead_code)]

pub mod integration;
