//! Clock Adapters
//!
//! Implements `TimeSource` from the system clock, or a settable clock for
//! driving auctions through their deadlines in tests.

use crate::ports::outbound::TimeSource;
use parking_lot::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Settable clock.
#[derive(Debug)]
pub struct ManualClock {
    current_time: RwLock<u64>,
}

impl ManualClock {
    /// Create a clock at `time`.
    pub fn new(time: u64) -> Self {
        Self {
            current_time: RwLock::new(time),
        }
    }

    /// Set current time.
    pub fn set_time(&self, time: u64) {
        *self.current_time.write() = time;
    }

    /// Advance time.
    pub fn advance(&self, secs: u64) {
        *self.current_time.write() += secs;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(1_700_000_000)
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> u64 {
        *self.current_time.read()
    }
}
