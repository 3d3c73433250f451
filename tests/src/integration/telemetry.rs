//! # Telemetry Wiring
//!
//! The registrar logs through the global subscriber installed by
//! `na-telemetry`.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use na_02_auction_registrar::{
        ether, Address, BidRequest, InMemoryLedger, ManualClock, NameAuctionApi,
        NameAuctionService, RegistrarConfig,
    };
    use na_telemetry::{init_telemetry, TelemetryConfig, TelemetryError};

    #[tokio::test]
    async fn test_service_runs_under_installed_subscriber() {
        let config = TelemetryConfig::default()
            .with_service_name("na-tests")
            .with_json_logs(true)
            .with_log_level("warn");
        let guard = init_telemetry(config);

        // Only one global subscriber per process.
        assert!(matches!(
            init_telemetry(TelemetryConfig::default()),
            Err(TelemetryError::AlreadyInitialized(_))
        ));
        if let Ok(guard) = &guard {
            assert_eq!(guard.service_name(), "na-tests");
        }

        let clock = Arc::new(ManualClock::default());
        let ledger = Arc::new(InMemoryLedger::new(RegistrarConfig::default(), clock.clone()));
        let service = NameAuctionService::new(ledger, clock);
        let receipt = service
            .start_auction(BidRequest::new(
                "telemetered",
                Address::new([0x42; 20]),
                ether(1),
                "salt",
            ))
            .await
            .unwrap();
        assert_eq!(receipt.submission.name, "telemetered.eth");
    }
}
