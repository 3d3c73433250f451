//! Registrar configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use na_02_auction_registrar::domain::RegistrarConfig;
//!
//! let config = RegistrarConfig::default()
//!     .with_ledger_timeout(Duration::from_secs(2))
//!     .with_min_label_length(7);
//! config.validate()?;
//! ```

use super::errors::AuctionError;
use super::value_objects::{centi_ether, Amount};
use na_01_name_hashing::{NamePolicy, DEFAULT_MIN_LABEL_LENGTH, DEFAULT_TLD};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Reveal window before the registration date (48 hours).
pub const DEFAULT_REVEAL_PERIOD_SECS: u64 = 48 * 3600;

/// Bidding plus reveal window of a freshly started auction (5 days).
pub const DEFAULT_AUCTION_LENGTH_SECS: u64 = 5 * 24 * 3600;

/// Bound on any single ledger call.
pub const DEFAULT_LEDGER_TIMEOUT_MS: u64 = 5_000;

/// Registrar configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarConfig {
    /// Registrar suffix
    pub tld: String,
    /// Minimum characters in the auctioned label
    pub min_label_length: usize,
    /// Reveal window, seconds before the registration date
    pub reveal_period_secs: u64,
    /// Length of a freshly started auction
    pub auction_length_secs: u64,
    /// Minimum price a winner pays (0.01 ether)
    pub min_price: Amount,
    /// Bound on any single ledger call, milliseconds
    pub ledger_timeout_ms: u64,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            tld: DEFAULT_TLD.to_string(),
            min_label_length: DEFAULT_MIN_LABEL_LENGTH,
            reveal_period_secs: DEFAULT_REVEAL_PERIOD_SECS,
            auction_length_secs: DEFAULT_AUCTION_LENGTH_SECS,
            min_price: centi_ether(1),
            ledger_timeout_ms: DEFAULT_LEDGER_TIMEOUT_MS,
        }
    }
}

impl RegistrarConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `NA_TLD`: Registrar suffix (default: eth)
    /// - `NA_MIN_LABEL_LENGTH`: Minimum label length (default: 7)
    /// - `NA_REVEAL_PERIOD_SECS`: Reveal window (default: 172800)
    /// - `NA_AUCTION_LENGTH_SECS`: Auction length (default: 432000)
    /// - `NA_LEDGER_TIMEOUT_MS`: Ledger call bound (default: 5000)
    ///
    /// Unparseable numbers fall back to the default.
    pub fn from_env() -> Result<Self, AuctionError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup and validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuctionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str, default: u64| -> u64 {
            lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
        };

        let config = Self {
            tld: lookup("NA_TLD").unwrap_or(defaults.tld),
            min_label_length: lookup("NA_MIN_LABEL_LENGTH")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_label_length),
            reveal_period_secs: number("NA_REVEAL_PERIOD_SECS", defaults.reveal_period_secs),
            auction_length_secs: number("NA_AUCTION_LENGTH_SECS", defaults.auction_length_secs),
            min_price: defaults.min_price,
            ledger_timeout_ms: number("NA_LEDGER_TIMEOUT_MS", defaults.ledger_timeout_ms),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), AuctionError> {
        if self.tld.is_empty() || self.tld.contains('.') {
            return Err(AuctionError::Validation(format!(
                "tld must be a single non-empty label, got '{}'",
                self.tld
            )));
        }

        if self.min_label_length == 0 {
            return Err(AuctionError::Validation(
                "min_label_length cannot be 0".to_string(),
            ));
        }

        // Bidding must get some time before the reveal window opens.
        if self.reveal_period_secs >= self.auction_length_secs {
            return Err(AuctionError::Validation(format!(
                "reveal_period_secs ({}) must be shorter than auction_length_secs ({})",
                self.reveal_period_secs, self.auction_length_secs
            )));
        }

        if self.ledger_timeout_ms == 0 {
            return Err(AuctionError::Validation(
                "ledger_timeout_ms cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Name policy derived from this configuration.
    pub fn name_policy(&self) -> NamePolicy {
        NamePolicy::new(self.tld.clone(), self.min_label_length)
    }

    /// Ledger call bound.
    pub fn ledger_timeout(&self) -> Duration {
        Duration::from_millis(self.ledger_timeout_ms)
    }

    /// Builder-style method to set the ledger timeout
    pub fn with_ledger_timeout(mut self, timeout: Duration) -> Self {
        self.ledger_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Builder-style method to set the minimum label length
    pub fn with_min_label_length(mut self, min: usize) -> Self {
        self.min_label_length = min;
        self
    }

    /// Builder-style method to set the reveal period
    pub fn with_reveal_period_secs(mut self, secs: u64) -> Self {
        self.reveal_period_secs = secs;
        self
    }

    /// Builder-style method to set the auction length
    pub fn with_auction_length_secs(mut self, secs: u64) -> Self {
        self.auction_length_secs = secs;
        self
    }

    /// Builder-style method to set the minimum price
    pub fn with_min_price(mut self, min_price: Amount) -> Self {
        self.min_price = min_price;
        self
    }
}
