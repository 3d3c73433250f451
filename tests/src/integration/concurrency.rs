//! # Concurrent Submissions
//!
//! Many callers share one service and one ledger. The ledger serialises
//! conflicting writes; losers observe the new state and fail.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use na_02_auction_registrar::{
        centi_ether, ether, Address, AuctionError, BidRequest, InMemoryLedger, ManualClock,
        NameAuctionApi, NameAuctionService, NameState, RegistrarConfig, RevealRequest,
    };
    use rand::Rng;

    const NAME: &str = "concurrently.eth";

    fn bidder(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn setup() -> (
        Arc<NameAuctionService<InMemoryLedger>>,
        Arc<InMemoryLedger>,
        Arc<ManualClock>,
    ) {
        let clock = Arc::new(ManualClock::default());
        let ledger = Arc::new(InMemoryLedger::new(RegistrarConfig::default(), clock.clone()));
        let service = Arc::new(NameAuctionService::new(ledger.clone(), clock.clone()));
        (service, ledger, clock)
    }

    fn advance_to_reveal(clock: &ManualClock) {
        let config = RegistrarConfig::default();
        clock.advance(config.auction_length_secs - config.reveal_period_secs);
    }

    fn advance_past_registration(clock: &ManualClock) {
        clock.advance(RegistrarConfig::default().reveal_period_secs);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_bids_all_recorded() {
        let (service, ledger, clock) = setup();
        service
            .start_auction(BidRequest::new(NAME, bidder(1), ether(1), "opener"))
            .await
            .unwrap();

        let mut rng = rand::thread_rng();
        let values: Vec<u64> = (2..=20).map(|_| rng.gen_range(2..500)).collect();

        let handles: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let service = service.clone();
                let request = BidRequest::new(
                    NAME,
                    bidder(i as u8 + 2),
                    centi_ether(*value),
                    format!("salt-{}", i),
                );
                tokio::spawn(async move { service.place_bid(request).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(ledger.sealed_bid_count(), values.len() + 1);

        advance_to_reveal(&clock);
        for (i, value) in values.iter().enumerate() {
            service
                .reveal(RevealRequest::new(
                    NAME,
                    bidder(i as u8 + 2),
                    centi_ether(*value),
                    format!("salt-{}", i),
                ))
                .await
                .unwrap();
        }
        advance_past_registration(&clock);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        let highest = sorted[sorted.len() - 1];
        let second = sorted[sorted.len() - 2];

        let outcome = service.finish(NAME).await.unwrap();
        assert_eq!(outcome.settlement, centi_ether(second));
        let report = service.info(NAME).await.unwrap();
        assert_eq!(report.state, NameState::Owned);
        assert_eq!(report.deed_owner, Some(outcome.winner));
        assert!(values
            .iter()
            .enumerate()
            .any(|(i, v)| *v == highest && bidder(i as u8 + 2) == outcome.winner));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_finish_settles_once() {
        let (service, ledger, clock) = setup();
        service
            .start_auction(BidRequest::new(NAME, bidder(1), ether(1), "salt"))
            .await
            .unwrap();
        advance_to_reveal(&clock);
        service
            .reveal(RevealRequest::new(NAME, bidder(1), ether(1), "salt"))
            .await
            .unwrap();
        advance_past_registration(&clock);
        ledger.set_latency(Duration::from_millis(10));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.finish(NAME).await })
            })
            .collect();

        let mut finished = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => finished += 1,
                Err(AuctionError::Precondition {
                    state: NameState::Owned,
                    ..
                }) => {}
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(service.state(NAME).await.unwrap(), NameState::Owned);
    }

    #[tokio::test]
    async fn test_duplicate_commitment_rejected() {
        let (service, _ledger, _clock) = setup();
        let request = BidRequest::new(NAME, bidder(1), ether(1), "salt");
        service.start_auction(request.clone()).await.unwrap();
        let err = service.place_bid(request).await.unwrap_err();
        assert!(matches!(err, AuctionError::LedgerRejected(_)));
    }
}
