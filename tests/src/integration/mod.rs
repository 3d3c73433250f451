//! Cross-crate integration flows.

pub mod concurrency;
pub mod flows;
pub mod telemetry;
