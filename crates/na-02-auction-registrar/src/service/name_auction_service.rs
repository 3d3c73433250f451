//! Name Auction Service
//!
//! Orchestrates domain logic and coordinates with the ledger.
//!
//! Every check that can be made locally (name structure, length policy,
//! salt, bid value) runs before the ledger is touched. Every ledger call is
//! bounded by the configured timeout; expiry surfaces as `LedgerUnavailable`,
//! never as a name state.

use async_trait::async_trait;
use na_01_name_hashing::{label_hash, Name, NamePolicy};
use na_telemetry::{log_name_event, log_tx_event, subsystem_span};
use std::future::Future;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

use crate::algorithms::{
    apply_reveal, check_finishable, check_invalidatable, open_commitment, resolve_state,
    resolve_subdomain_state, seal_bid, seal_hash, settlement_price, winner_of,
};
use crate::domain::{
    invariant_salt_present, invariant_top_level, Address, AuctionEntry, AuctionError, BidCommitment,
    BidReceipt, FinishOutcome, Hash, InvalidateOutcome, LedgerError, NameReport, NameState,
    RegistrarConfig, RevealOutcome, Submission, TransactionRef,
};
use crate::ports::{BidRequest, LedgerGateway, NameAuctionApi, RevealRequest, TimeSource};

const SUBSYSTEM: &str = "na-02";

/// Ledger facts for one top-level name.
struct TopLevelView {
    state: NameState,
    entry: AuctionEntry,
    registry_owner: Address,
}

/// Name Auction Service implementation
///
/// Implements the `NameAuctionApi` port using an injected ledger gateway and
/// clock.
pub struct NameAuctionService<L: LedgerGateway> {
    /// Registration ledger (driven port)
    ledger: Arc<L>,
    /// Clock used for deadline derivation
    clock: Arc<dyn TimeSource>,
    config: RegistrarConfig,
    policy: NamePolicy,
}

impl<L: LedgerGateway> NameAuctionService<L> {
    /// Create a service with the default configuration
    pub fn new(ledger: Arc<L>, clock: Arc<dyn TimeSource>) -> Self {
        let config = RegistrarConfig::default();
        let policy = config.name_policy();
        Self {
            ledger,
            clock,
            config,
            policy,
        }
    }

    /// Create with a custom configuration
    pub fn with_config(
        ledger: Arc<L>,
        clock: Arc<dyn TimeSource>,
        config: RegistrarConfig,
    ) -> Result<Self, AuctionError> {
        config.validate()?;
        let policy = config.name_policy();
        Ok(Self {
            ledger,
            clock,
            config,
            policy,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    /// Build the commitment for a bid without submitting it.
    pub fn seal(&self, request: &BidRequest) -> Result<BidCommitment, AuctionError> {
        let (_, label) = self.top_level(&request.name)?;
        seal_bid(&label, request.bidder, request.value, request.mask, &request.salt)
    }

    /// Run a ledger call under the configured timeout.
    async fn call<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AuctionError>
    where
        F: Future<Output = Result<T, LedgerError>>,
    {
        let bound = self.config.ledger_timeout();
        let err = match timeout(bound, fut).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => err,
            Err(_) => LedgerError::Timeout {
                operation: operation.to_string(),
                elapsed: bound,
            },
        };
        warn!("[na-02] Ledger call {} failed: {}", operation, err);
        Err(err.into())
    }

    fn parse(&self, input: &str) -> Result<Name, AuctionError> {
        Ok(self.policy.parse(input)?)
    }

    /// Parse a name that must sit directly under the registrar suffix.
    fn top_level(&self, input: &str) -> Result<(Name, Hash), AuctionError> {
        let name = self.parse(input)?;
        invariant_top_level(&name, &self.policy)?;
        let label = name.leftmost_label_hash();
        Ok((name, label))
    }

    async fn view(&self, name: &Name, label: Hash) -> Result<TopLevelView, AuctionError> {
        let entry = self
            .call("get_auction_entry", self.ledger.get_auction_entry(label))
            .await?;
        let registry_owner = self.call("get_owner", self.ledger.get_owner(name.hash())).await?;
        let state = resolve_state(
            self.clock.now(),
            &entry,
            registry_owner,
            self.config.reveal_period_secs,
        );
        debug!("[na-02] {} resolved to {}", name, state);
        Ok(TopLevelView {
            state,
            entry,
            registry_owner,
        })
    }

    async fn resolve(&self, name: &Name) -> Result<NameState, AuctionError> {
        if self.policy.is_top_level(name) {
            return Ok(self.view(name, name.leftmost_label_hash()).await?.state);
        }
        let owner = self.call("get_owner", self.ledger.get_owner(name.hash())).await?;
        Ok(resolve_subdomain_state(owner))
    }

    fn require(name: &Name, state: NameState, expected: NameState) -> Result<(), AuctionError> {
        if state != expected {
            warn!("[na-02] {} is {}, expected {}", name, state, expected);
            return Err(AuctionError::precondition(
                name.as_str(),
                state,
                format!("expected {}", expected),
            ));
        }
        Ok(())
    }

    /// Re-read the name after the ledger refused a write. A lost race shows
    /// up as a failed precondition on the fresh view.
    async fn recheck<T, P>(
        &self,
        name: &Name,
        label: Hash,
        result: Result<T, AuctionError>,
        precondition: P,
    ) -> Result<T, AuctionError>
    where
        P: Fn(&TopLevelView) -> Result<(), AuctionError> + Send,
    {
        match result {
            Err(AuctionError::LedgerRejected(reason)) => {
                let view = self.view(name, label).await?;
                precondition(&view)?;
                Err(AuctionError::LedgerRejected(reason))
            }
            other => other,
        }
    }

    fn submission(operation_id: Uuid, tx: TransactionRef, name: &Name) -> Submission {
        Submission {
            operation_id,
            tx,
            name: name.to_string(),
        }
    }

    async fn do_start_auction(&self, request: BidRequest, operation_id: Uuid) -> Result<BidReceipt, AuctionError> {
        let (name, label) = self.top_level(&request.name)?;
        let commitment = seal_bid(&label, request.bidder, request.value, request.mask, &request.salt)?;
        self.policy.validate(name.as_str())?;

        let view = self.view(&name, label).await?;
        Self::require(&name, view.state, NameState::Available)?;

        let tx = self
            .call(
                "submit_start_auction_and_bid",
                self.ledger.submit_start_auction_and_bid(label, &commitment),
            )
            .await?;
        log_tx_event!(info, SUBSYSTEM, "Auction start", name, tx,
            bidder = %request.bidder, deposit = %commitment.deposit);

        Ok(BidReceipt {
            submission: Self::submission(operation_id, tx, &name),
            commitment,
        })
    }

    async fn do_place_bid(&self, request: BidRequest, operation_id: Uuid) -> Result<BidReceipt, AuctionError> {
        let (name, label) = self.top_level(&request.name)?;
        let commitment = seal_bid(&label, request.bidder, request.value, request.mask, &request.salt)?;

        let view = self.view(&name, label).await?;
        Self::require(&name, view.state, NameState::Bidding)?;

        let tx = self
            .call("submit_sealed_bid", self.ledger.submit_sealed_bid(&commitment))
            .await?;
        log_tx_event!(info, SUBSYSTEM, "Auction bid", name, tx,
            bidder = %request.bidder, deposit = %commitment.deposit);

        Ok(BidReceipt {
            submission: Self::submission(operation_id, tx, &name),
            commitment,
        })
    }

    async fn do_reveal(&self, request: RevealRequest, operation_id: Uuid) -> Result<RevealOutcome, AuctionError> {
        let (name, label) = self.top_level(&request.name)?;
        invariant_salt_present(&request.salt)?;

        let view = self.view(&name, label).await?;
        Self::require(&name, view.state, NameState::Revealing)?;

        let sealed_hash = seal_hash(&label, &request.bidder, request.value, &request.salt.digest());
        let commitment = self
            .call(
                "get_sealed_bid",
                self.ledger.get_sealed_bid(request.bidder, sealed_hash),
            )
            .await?
            .ok_or_else(|| {
                warn!("[na-02] No commitment for reveal on {}", name);
                AuctionError::Mismatch {
                    sealed_hash: hex::encode(sealed_hash),
                }
            })?;
        let opened = open_commitment(&commitment, &label, request.value, &request.salt)?;

        // The ledger assigns the deed address; only the accounting is projected.
        let mut projected = view.entry.clone();
        let settlement = apply_reveal(
            &mut projected,
            opened.value(),
            commitment.deposit,
            Address::ZERO,
            self.config.min_price,
        );

        let tx = self
            .call(
                "submit_reveal",
                self.ledger
                    .submit_reveal(label, request.bidder, opened.value(), &request.salt),
            )
            .await?;
        log_tx_event!(info, SUBSYSTEM, "Auction reveal", name, tx,
            bidder = %request.bidder, value = %opened.value(),
            leading = settlement.is_leading(), refund = %settlement.refund());

        Ok(RevealOutcome {
            submission: Self::submission(operation_id, tx, &name),
            sealed_hash,
            value: opened.value(),
            settlement,
        })
    }

    async fn do_finish(&self, input: &str, operation_id: Uuid) -> Result<FinishOutcome, AuctionError> {
        let (name, label) = self.top_level(input)?;
        let view = self.view(&name, label).await?;
        check_finishable(name.as_str(), view.state, view.registry_owner)?;

        let deed = self.call("get_deed", self.ledger.get_deed(view.entry.deed)).await?;
        let winner = winner_of(name.as_str(), view.state, deed.as_ref())?;
        let settlement = settlement_price(&view.entry, self.config.min_price);

        let submitted = self.call("submit_finish", self.ledger.submit_finish(label)).await;
        let tx = self
            .recheck(&name, label, submitted, |fresh| {
                check_finishable(name.as_str(), fresh.state, fresh.registry_owner)
            })
            .await?;
        log_tx_event!(info, SUBSYSTEM, "Auction finish", name, tx,
            winner = %winner, settlement = %settlement);

        Ok(FinishOutcome {
            submission: Self::submission(operation_id, tx, &name),
            winner,
            settlement,
        })
    }

    async fn do_invalidate(&self, input: &str, operation_id: Uuid) -> Result<InvalidateOutcome, AuctionError> {
        let (name, label) = self.top_level(input)?;
        let view = self.view(&name, label).await?;
        let target = check_invalidatable(&name, view.state, &self.policy)?;

        let submitted = self
            .call("submit_invalidate", self.ledger.submit_invalidate(&target.label))
            .await;
        let tx = self
            .recheck(&name, label, submitted, |fresh| {
                check_invalidatable(&name, fresh.state, &self.policy).map(|_| ())
            })
            .await?;
        log_tx_event!(info, SUBSYSTEM, "Name invalidate", name, tx,
            previous_state = %target.previous_state, label_length = target.label_length);

        Ok(InvalidateOutcome {
            submission: Self::submission(operation_id, tx, &name),
            previous_state: target.previous_state,
            label_length: target.label_length,
        })
    }

    async fn do_transfer(&self, input: &str, new_owner: Address, operation_id: Uuid) -> Result<Submission, AuctionError> {
        let (name, label) = self.top_level(input)?;
        self.policy.validate(name.as_str())?;
        if new_owner.is_zero() {
            return Err(AuctionError::Validation("new owner is the zero address".to_string()));
        }

        let view = self.view(&name, label).await?;
        Self::require(&name, view.state, NameState::Owned)?;

        let submitted = self
            .call("submit_transfer", self.ledger.submit_transfer(label, new_owner))
            .await;
        let tx = self
            .recheck(&name, label, submitted, |fresh| {
                Self::require(&name, fresh.state, NameState::Owned)
            })
            .await?;
        log_tx_event!(info, SUBSYSTEM, "Name transfer", name, tx, new_owner = %new_owner);

        Ok(Self::submission(operation_id, tx, &name))
    }

    async fn do_set_subdomain_owner(&self, input: &str, owner: Address, operation_id: Uuid) -> Result<Submission, AuctionError> {
        let name = self.parse(input)?;
        let (subdomain, parent) = name.split_subdomain()?;

        let parent_state = self.resolve(&parent).await?;
        Self::require(&parent, parent_state, NameState::Owned)?;
        let parent_owner = self.call("get_owner", self.ledger.get_owner(parent.hash())).await?;
        if parent_owner.is_zero() {
            return Err(AuctionError::precondition(
                parent.as_str(),
                parent_state,
                "parent domain has no registry owner",
            ));
        }

        let tx = self
            .call(
                "submit_set_subdomain_owner",
                self.ledger
                    .submit_set_subdomain_owner(parent.hash(), label_hash(&subdomain), owner),
            )
            .await?;
        log_tx_event!(info, SUBSYSTEM, "Subdomain owner set", name, tx, owner = %owner);

        Ok(Self::submission(operation_id, tx, &name))
    }
}

#[async_trait]
impl<L: LedgerGateway + 'static> NameAuctionApi for NameAuctionService<L> {
    async fn state(&self, name: &str) -> Result<NameState, AuctionError> {
        let name = self.parse(name)?;
        self.resolve(&name).await
    }

    async fn is_available(&self, name: &str) -> Result<bool, AuctionError> {
        let name = self.parse(name)?;
        let state = self.resolve(&name).await?;
        let available = state == NameState::Available
            && (!self.policy.is_top_level(&name) || self.policy.is_conforming(name.as_str()));
        log_name_event!(debug, SUBSYSTEM, "Availability", name, state = %state, available = available);
        Ok(available)
    }

    async fn info(&self, input: &str) -> Result<NameReport, AuctionError> {
        let name = self.parse(input)?;
        let node = name.hash();

        let resolver = match self.call("get_resolver", self.ledger.get_resolver(node)).await {
            Ok(resolver) => Some(resolver),
            Err(AuctionError::LedgerRejected(_)) => None,
            Err(err) => return Err(err),
        };

        let (state, entry, registry_owner) = if self.policy.is_top_level(&name) {
            let view = self.view(&name, name.leftmost_label_hash()).await?;
            (view.state, Some(view.entry), view.registry_owner)
        } else {
            let owner = self.call("get_owner", self.ledger.get_owner(node)).await?;
            (resolve_subdomain_state(owner), None, owner)
        };

        let deed_owner = match &entry {
            Some(entry) if state.has_winner() => self
                .call("get_deed", self.ledger.get_deed(entry.deed))
                .await?
                .map(|deed| deed.owner),
            _ => None,
        };
        let timeline = entry
            .as_ref()
            .and_then(|e| e.timeline(self.config.reveal_period_secs));
        let length_restricted = state == NameState::Available
            && self.policy.is_top_level(&name)
            && !self.policy.is_conforming(name.as_str());

        Ok(NameReport {
            name: name.to_string(),
            name_hash: format!("0x{}", hex::encode(node)),
            state,
            entry,
            timeline,
            deed_owner,
            registry_owner: (!registry_owner.is_zero()).then_some(registry_owner),
            resolver,
            length_restricted,
        })
    }

    async fn start_auction(&self, request: BidRequest) -> Result<BidReceipt, AuctionError> {
        let operation_id = Uuid::new_v4();
        let span = subsystem_span!("start_auction", subsystem = SUBSYSTEM, operation_id = %operation_id);
        self.do_start_auction(request, operation_id).instrument(span).await
    }

    async fn place_bid(&self, request: BidRequest) -> Result<BidReceipt, AuctionError> {
        let operation_id = Uuid::new_v4();
        let span = subsystem_span!("place_bid", subsystem = SUBSYSTEM, operation_id = %operation_id);
        self.do_place_bid(request, operation_id).instrument(span).await
    }

    async fn reveal(&self, request: RevealRequest) -> Result<RevealOutcome, AuctionError> {
        let operation_id = Uuid::new_v4();
        let span = subsystem_span!("reveal", subsystem = SUBSYSTEM, operation_id = %operation_id);
        self.do_reveal(request, operation_id).instrument(span).await
    }

    async fn finish(&self, name: &str) -> Result<FinishOutcome, AuctionError> {
        let operation_id = Uuid::new_v4();
        let span = subsystem_span!("finish", subsystem = SUBSYSTEM, operation_id = %operation_id);
        self.do_finish(name, operation_id).instrument(span).await
    }

    async fn invalidate(&self, name: &str) -> Result<InvalidateOutcome, AuctionError> {
        let operation_id = Uuid::new_v4();
        let span = subsystem_span!("invalidate", subsystem = SUBSYSTEM, operation_id = %operation_id);
        self.do_invalidate(name, operation_id).instrument(span).await
    }

    async fn transfer(&self, name: &str, new_owner: Address) -> Result<Submission, AuctionError> {
        let operation_id = Uuid::new_v4();
        let span = subsystem_span!("transfer", subsystem = SUBSYSTEM, operation_id = %operation_id);
        self.do_transfer(name, new_owner, operation_id).instrument(span).await
    }

    async fn set_subdomain_owner(&self, name: &str, owner: Address) -> Result<Submission, AuctionError> {
        let operation_id = Uuid::new_v4();
        let span = subsystem_span!("set_subdomain_owner", subsystem = SUBSYSTEM, operation_id = %operation_id);
        self.do_set_subdomain_owner(name, owner, operation_id).instrument(span).await
    }
}
