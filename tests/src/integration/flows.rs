//! # Integration Test Flows
//!
//! Drives `NameAuctionService` over the in-memory ledger through complete
//! auction lifecycles:
//!
//! 1. **Seal → Reveal → Finish**: second-price settlement and refunds
//! 2. **Invalidate**: length policy enforced after registration
//! 3. **Transfer / Subdomains**: ownership after the auction
//! 4. **Ledger failures**: timeouts and outages surface as errors, never states

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use na_01_name_hashing::{hash_chain, label_hash, name_hash, NamePolicy};
    use na_02_auction_registrar::algorithms::seal_hash;
    use na_02_auction_registrar::{
        centi_ether, ether, Address, AuctionError, BidRequest, BidSalt,
        InMemoryLedger, ManualClock, NameAuctionApi, NameAuctionService, NameState,
        RegistrarConfig, RevealRequest,
    };

    const ALICE: Address = Address::new([0xa1; 20]);
    const BOB: Address = Address::new([0xb0; 20]);
    const CAROL: Address = Address::new([0xc0; 20]);
    const NAME: &str = "verylongname.eth";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Registrar {
        service: NameAuctionService<InMemoryLedger>,
        ledger: Arc<InMemoryLedger>,
        clock: Arc<ManualClock>,
        config: RegistrarConfig,
    }

    impl Registrar {
        fn new(config: RegistrarConfig) -> Self {
            let clock = Arc::new(ManualClock::default());
            let ledger = Arc::new(InMemoryLedger::new(config.clone(), clock.clone()));
            let service =
                NameAuctionService::with_config(ledger.clone(), clock.clone(), config.clone())
                    .unwrap();
            Self {
                service,
                ledger,
                clock,
                config,
            }
        }

        fn open_reveal_window(&self) {
            self.clock
                .advance(self.config.auction_length_secs - self.config.reveal_period_secs);
        }

        fn close_auction(&self) {
            self.clock.advance(self.config.reveal_period_secs);
        }

        async fn register(&self, name: &str, owner: Address) {
            self.service
                .start_auction(BidRequest::new(name, owner, ether(1), "owner-salt"))
                .await
                .unwrap();
            self.open_reveal_window();
            self.service
                .reveal(RevealRequest::new(name, owner, ether(1), "owner-salt"))
                .await
                .unwrap();
            self.close_auction();
            self.service.finish(name).await.unwrap();
        }
    }

    fn registrar() -> Registrar {
        Registrar::new(RegistrarConfig::default())
    }

    // =============================================================================
    // SEAL → REVEAL → FINISH
    // =============================================================================

    /// Three bidders; the highest pays the second-highest revealed bid.
    #[tokio::test]
    async fn test_full_auction_second_price() {
        let r = registrar();

        let start = r
            .service
            .start_auction(BidRequest::new(NAME, ALICE, ether(1), "alice"))
            .await
            .unwrap();
        let bob_bid = BidRequest::new(NAME, BOB, ether(2), "bob").with_mask(ether(3));
        let bob = r.service.place_bid(bob_bid.clone()).await.unwrap();
        r.service
            .place_bid(BidRequest::new(NAME, CAROL, centi_ether(150), "carol"))
            .await
            .unwrap();

        assert_eq!(start.commitment.deposit, ether(1));
        assert_eq!(bob.commitment.deposit, ether(3));
        assert_eq!(r.ledger.sealed_bid_count(), 3);
        assert_ne!(start.submission.operation_id, bob.submission.operation_id);
        assert_eq!(r.service.state(NAME).await.unwrap(), NameState::Bidding);

        r.open_reveal_window();
        assert_eq!(r.service.state(NAME).await.unwrap(), NameState::Revealing);

        r.service
            .reveal(RevealRequest::new(NAME, ALICE, ether(1), "alice"))
            .await
            .unwrap();
        let revealed = r.service.reveal(RevealRequest::from(&bob_bid)).await.unwrap();
        assert_eq!(revealed.sealed_hash, bob.commitment.sealed_hash);
        r.service
            .reveal(RevealRequest::new(NAME, CAROL, centi_ether(150), "carol"))
            .await
            .unwrap();
        assert_eq!(r.ledger.sealed_bid_count(), 0);

        r.close_auction();
        assert_eq!(r.service.state(NAME).await.unwrap(), NameState::Won);

        let report = r.service.info(NAME).await.unwrap();
        assert_eq!(report.deed_owner, Some(BOB));
        assert_eq!(report.registry_owner, None);

        let finished = r.service.finish(NAME).await.unwrap();
        assert_eq!(finished.winner, BOB);
        assert_eq!(finished.settlement, centi_ether(150));
        assert_eq!(r.service.state(NAME).await.unwrap(), NameState::Owned);

        // Alice was displaced, Carol lost, Bob gets mask excess plus the
        // difference between his bid and the settlement price.
        assert_eq!(r.ledger.refund_balance(ALICE), ether(1));
        assert_eq!(r.ledger.refund_balance(CAROL), centi_ether(150));
        assert_eq!(r.ledger.refund_balance(BOB), centi_ether(150));
    }

    /// A lone bidder pays the minimum price.
    #[tokio::test]
    async fn test_single_bid_pays_minimum() {
        let r = registrar();
        r.service
            .start_auction(BidRequest::new(NAME, ALICE, ether(1), "alice"))
            .await
            .unwrap();
        r.open_reveal_window();
        r.service
            .reveal(RevealRequest::new(NAME, ALICE, ether(1), "alice"))
            .await
            .unwrap();
        r.close_auction();

        let finished = r.service.finish(NAME).await.unwrap();
        assert_eq!(finished.settlement, r.config.min_price);
        assert_eq!(r.ledger.refund_balance(ALICE), ether(1) - r.config.min_price);
    }

    /// Unrevealed bids leave the name available again.
    #[tokio::test]
    async fn test_unrevealed_auction_reopens() {
        let r = registrar();
        r.service
            .start_auction(BidRequest::new(NAME, ALICE, ether(1), "alice"))
            .await
            .unwrap();
        r.open_reveal_window();
        r.close_auction();
        assert_eq!(r.service.state(NAME).await.unwrap(), NameState::Available);
        assert!(r.service.is_available(NAME).await.unwrap());
        assert!(matches!(
            r.service.finish(NAME).await,
            Err(AuctionError::Precondition {
                state: NameState::Available,
                ..
            })
        ));
    }

    /// A reveal only matches the exact sealed tuple.
    #[tokio::test]
    async fn test_reveal_must_match_commitment() {
        let r = registrar();
        r.service
            .start_auction(BidRequest::new(NAME, ALICE, ether(1), "alice"))
            .await
            .unwrap();
        r.open_reveal_window();

        let wrong_value = r
            .service
            .reveal(RevealRequest::new(NAME, ALICE, ether(2), "alice"))
            .await;
        assert!(matches!(wrong_value, Err(AuctionError::Mismatch { .. })));

        let wrong_bidder = r
            .service
            .reveal(RevealRequest::new(NAME, BOB, ether(1), "alice"))
            .await;
        assert!(matches!(wrong_bidder, Err(AuctionError::Mismatch { .. })));

        let no_salt = r
            .service
            .reveal(RevealRequest::new(NAME, ALICE, ether(1), ""))
            .await;
        assert_eq!(no_salt.unwrap_err(), AuctionError::MissingSalt);

        assert_eq!(r.ledger.sealed_bid_count(), 1);
    }

    /// The service-side seal agrees with the ledger's recomputation.
    #[tokio::test]
    async fn test_offline_seal_matches_submission() {
        let r = registrar();
        let request = BidRequest::new("VeryLongName", ALICE, ether(1), "alice").with_mask(ether(2));
        let offline = r.service.seal(&request).unwrap();
        let receipt = r.service.start_auction(request).await.unwrap();
        assert_eq!(offline, receipt.commitment);
        assert_eq!(
            offline.sealed_hash,
            seal_hash(
                &label_hash("verylongname"),
                &ALICE,
                ether(1),
                &BidSalt::new("alice").digest()
            )
        );
    }

    // =============================================================================
    // INVALIDATE
    // =============================================================================

    /// Names registered under a looser policy can be invalidated once it tightens.
    #[tokio::test]
    async fn test_invalidate_after_policy_tightens() {
        let clock = Arc::new(ManualClock::default());
        let strict = RegistrarConfig::default();
        let loose = strict.clone().with_min_label_length(3);
        let ledger = Arc::new(InMemoryLedger::new(strict.clone(), clock.clone()));
        let loose_service =
            NameAuctionService::with_config(ledger.clone(), clock.clone(), loose.clone()).unwrap();
        let strict_service =
            NameAuctionService::with_config(ledger.clone(), clock.clone(), strict).unwrap();

        loose_service
            .start_auction(BidRequest::new("abcd", ALICE, ether(1), "s"))
            .await
            .unwrap();
        clock.advance(loose.auction_length_secs - loose.reveal_period_secs);
        loose_service
            .reveal(RevealRequest::new("abcd", ALICE, ether(1), "s"))
            .await
            .unwrap();
        clock.advance(loose.reveal_period_secs);
        loose_service.finish("abcd").await.unwrap();
        let refunded = ledger.refund_balance(ALICE);

        // Conforming under the policy it was registered with.
        assert!(matches!(
            loose_service.invalidate("abcd").await,
            Err(AuctionError::Precondition {
                state: NameState::Owned,
                ..
            })
        ));

        let outcome = strict_service.invalidate("abcd").await.unwrap();
        assert_eq!(outcome.previous_state, NameState::Owned);
        assert_eq!(outcome.label_length, 4);
        assert_eq!(strict_service.state("abcd").await.unwrap(), NameState::Invalid);
        assert_eq!(
            ledger.refund_balance(ALICE),
            refunded + loose.min_price
        );
    }

    /// The length rule only restricts top-level availability.
    #[tokio::test]
    async fn test_availability_follows_length_policy() {
        let r = Registrar::new(RegistrarConfig::default().with_min_label_length(3));
        assert!(r.service.is_available("abc.eth").await.unwrap());
        assert!(!r.service.is_available("ab.eth").await.unwrap());
        assert!(r.service.info("ab.eth").await.unwrap().length_restricted);
    }

    #[tokio::test]
    async fn test_invalidate_requires_winner() {
        let r = registrar();
        let err = r.service.invalidate("short.eth").await.unwrap_err();
        assert!(matches!(
            err,
            AuctionError::Precondition {
                state: NameState::Available,
                ..
            }
        ));
    }

    // =============================================================================
    // TRANSFER / SUBDOMAINS
    // =============================================================================

    #[tokio::test]
    async fn test_transfer_then_subdomain() {
        let r = registrar();
        r.register(NAME, ALICE).await;

        r.service.transfer(NAME, BOB).await.unwrap();
        let report = r.service.info(NAME).await.unwrap();
        assert_eq!(report.registry_owner, Some(BOB));
        assert_eq!(report.deed_owner, Some(BOB));

        let sub = "wallet.verylongname.eth";
        assert_eq!(r.service.state(sub).await.unwrap(), NameState::Available);
        r.service.set_subdomain_owner(sub, CAROL).await.unwrap();
        assert_eq!(r.service.state(sub).await.unwrap(), NameState::Owned);

        let sub_report = r.service.info(sub).await.unwrap();
        assert_eq!(sub_report.registry_owner, Some(CAROL));
        assert!(sub_report.entry.is_none());
        assert_eq!(
            sub_report.name_hash,
            format!("0x{}", hex::encode(name_hash(sub).unwrap()))
        );
    }

    /// Subdomains bypass the auction and the length rule.
    #[tokio::test]
    async fn test_short_subdomain_allowed() {
        let r = registrar();
        r.register(NAME, ALICE).await;
        r.service
            .set_subdomain_owner("a.verylongname.eth", BOB)
            .await
            .unwrap();
        assert_eq!(
            r.service.state("a.verylongname.eth").await.unwrap(),
            NameState::Owned
        );
    }

    #[tokio::test]
    async fn test_resolver_reported_when_set() {
        let r = registrar();
        let resolver = Address::new([0x55; 20]);
        r.ledger.set_resolver(name_hash(NAME).unwrap(), resolver);
        let report = r.service.info(NAME).await.unwrap();
        assert_eq!(report.resolver, Some(resolver));
        assert!(report.to_json().unwrap().contains("verylongname.eth"));
    }

    // =============================================================================
    // LEDGER FAILURES
    // =============================================================================

    #[tokio::test]
    async fn test_outage_is_retryable() {
        let r = registrar();
        r.ledger.set_unavailable(Some("node offline"));
        let err = r.service.info(NAME).await.unwrap_err();
        assert!(err.is_retryable());

        r.ledger.set_unavailable(None);
        assert!(r.service.info(NAME).await.is_ok());
    }

    #[tokio::test]
    async fn test_slow_ledger_bounded_by_timeout() {
        let r = Registrar::new(
            RegistrarConfig::default().with_ledger_timeout(Duration::from_millis(25)),
        );
        r.ledger.set_latency(Duration::from_millis(400));
        let err = r
            .service
            .start_auction(BidRequest::new(NAME, ALICE, ether(1), "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuctionError::LedgerUnavailable(_)));
        assert_eq!(r.ledger.sealed_bid_count(), 0);
    }

    // =============================================================================
    // NAME HASHING ACROSS CRATES
    // =============================================================================

    #[test]
    fn test_hash_chain_matches_policy_qualification() {
        let policy = NamePolicy::default();
        let name = policy.parse("VeryLongName").unwrap();
        let chain = hash_chain(name.as_str()).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1].name_hash, name.hash());
        assert_eq!(chain[1].label_hash, label_hash("verylongname"));
    }
}
