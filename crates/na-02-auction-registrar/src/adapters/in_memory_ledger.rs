//! In-Memory Ledger Adapter
//!
//! Implements `LedgerGateway` with the registrar's own rules: auction windows,
//! sealed-bid bookkeeping, second-price reveal accounting, deeds and the
//! name registry.
//!
//! In production the gateway would submit signed transactions to a node.
//! Failure and latency can be injected to exercise the timeout path.

use crate::algorithms::{apply_reveal, close_deed, resolve_state, reveal_bid, seal_hash, settlement_price};
use crate::domain::{
    Address, Amount, AuctionEntry, AuctionTimeline, Bid, BidCommitment, BidSalt, Deed, Hash,
    LedgerError, LedgerStatus, LockedValue, NameState, RegistrarConfig, RevealSettlement,
    TransactionRef,
};
use crate::ports::outbound::{LedgerGateway, TimeSource};
use async_trait::async_trait;
use na_01_name_hashing::{child_node, keccak256, label_hash, normalize, ZERO_HASH};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// In-memory registration ledger.
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
    clock: Arc<dyn TimeSource>,
    config: RegistrarConfig,
    /// Namehash of the registrar suffix.
    tld_node: Hash,
    /// When set, every call fails with `Unavailable`.
    fault: RwLock<Option<String>>,
    /// Delay applied before every call.
    latency: RwLock<Duration>,
}

#[derive(Default)]
struct LedgerState {
    /// Auction entries by label hash.
    entries: HashMap<Hash, AuctionEntry>,
    /// Registry owners by node.
    owners: HashMap<Hash, Address>,
    /// Resolvers by node.
    resolvers: HashMap<Hash, Address>,
    /// Deeds by address.
    deeds: HashMap<Address, Deed>,
    /// Bids by (bidder, seal).
    bids: HashMap<(Address, Hash), Bid>,
    /// Amounts returned per address.
    refunds: HashMap<Address, Amount>,
    tx_count: u64,
}

impl LedgerState {
    fn next_tx(&mut self, operation: &str) -> TransactionRef {
        self.tx_count += 1;
        let mut data = self.tx_count.to_be_bytes().to_vec();
        data.extend_from_slice(operation.as_bytes());
        TransactionRef(keccak256(&data))
    }

    fn owner(&self, node: &Hash) -> Address {
        self.owners.get(node).copied().unwrap_or(Address::ZERO)
    }

    fn credit(&mut self, to: Address, amount: Amount) {
        if !amount.is_zero() {
            let balance = self.refunds.entry(to).or_default();
            *balance = balance.saturating_add(amount);
        }
    }

    fn release_deed(&mut self, deed: Address) {
        if let Some(deed) = self.deeds.remove(&deed) {
            self.credit(deed.owner, deed.balance);
        }
    }
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new(config: RegistrarConfig, clock: Arc<dyn TimeSource>) -> Self {
        let tld_node = child_node(&ZERO_HASH, &label_hash(&normalize(&config.tld)));
        Self {
            state: RwLock::new(LedgerState::default()),
            clock,
            config,
            tld_node,
            fault: RwLock::new(None),
            latency: RwLock::new(Duration::ZERO),
        }
    }

    /// Make every call fail (Some) or succeed again (None).
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *self.fault.write() = reason.map(str::to_string);
    }

    /// Delay every call.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.write() = latency;
    }

    /// Configure a resolver for a node.
    pub fn set_resolver(&self, node: Hash, resolver: Address) {
        self.state.write().resolvers.insert(node, resolver);
    }

    /// Set a registry owner directly.
    pub fn set_owner(&self, node: Hash, owner: Address) {
        self.state.write().owners.insert(node, owner);
    }

    /// Seed an auction entry directly.
    pub fn seed_entry(&self, label_hash: Hash, entry: AuctionEntry) {
        self.state.write().entries.insert(label_hash, entry);
    }

    /// Seed a deed directly.
    pub fn insert_deed(&self, deed: Deed) {
        self.state.write().deeds.insert(deed.address, deed);
    }

    /// Total returned to `address` so far.
    pub fn refund_balance(&self, address: Address) -> Amount {
        self.state.read().refunds.get(&address).copied().unwrap_or_default()
    }

    /// Bids still sealed.
    pub fn sealed_bid_count(&self) -> usize {
        self.state.read().bids.values().filter(|b| !b.is_revealed()).count()
    }

    /// Node of `label.<tld>`.
    pub fn node_for(&self, label_hash: &Hash) -> Hash {
        child_node(&self.tld_node, label_hash)
    }

    async fn enter(&self, operation: &str) -> Result<(), LedgerError> {
        let latency = *self.latency.read();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if let Some(reason) = self.fault.read().clone() {
            warn!("[na-02] Ledger {} failed: {}", operation, reason);
            return Err(LedgerError::Unavailable(reason));
        }
        debug!("[na-02] Ledger {}", operation);
        Ok(())
    }

    fn state_of(&self, state: &LedgerState, label_hash: &Hash) -> (NameState, AuctionEntry) {
        let entry = state.entries.get(label_hash).cloned().unwrap_or_default();
        let owner = state.owner(&self.node_for(label_hash));
        let name_state = resolve_state(self.clock.now(), &entry, owner, self.config.reveal_period_secs);
        (name_state, entry)
    }

    /// Status as the registrar reports it at `now`.
    fn observed(&self, mut entry: AuctionEntry, now: u64) -> AuctionEntry {
        if matches!(entry.status, LedgerStatus::Auction | LedgerStatus::Reveal) {
            let timeline = AuctionTimeline::new(entry.registration_date, self.config.reveal_period_secs);
            entry.status = if timeline.is_bidding(now) {
                LedgerStatus::Auction
            } else if timeline.is_revealing(now) {
                LedgerStatus::Reveal
            } else if entry.has_revealed_bid() {
                LedgerStatus::Owned
            } else {
                LedgerStatus::Open
            };
        }
        entry
    }

    fn require(state: NameState, allowed: &[NameState], what: &str) -> Result<(), LedgerError> {
        if allowed.contains(&state) {
            Ok(())
        } else {
            Err(LedgerError::Rejected(format!("{} not allowed in state {}", what, state)))
        }
    }

    fn record_bid(&self, state: &mut LedgerState, commitment: &BidCommitment) -> Result<(), LedgerError> {
        if commitment.deposit < self.config.min_price {
            return Err(LedgerError::Rejected(format!(
                "deposit {} below minimum {}",
                commitment.deposit, self.config.min_price
            )));
        }
        let key = (commitment.bidder, commitment.sealed_hash);
        if state.bids.contains_key(&key) {
            return Err(LedgerError::Rejected("sealed bid already exists".to_string()));
        }
        state.bids.insert(key, Bid::Sealed(commitment.clone()));
        Ok(())
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn get_auction_entry(&self, label_hash: Hash) -> Result<AuctionEntry, LedgerError> {
        self.enter("get_auction_entry").await?;
        let entry = self.state.read().entries.get(&label_hash).cloned().unwrap_or_default();
        Ok(self.observed(entry, self.clock.now()))
    }

    async fn get_owner(&self, node: Hash) -> Result<Address, LedgerError> {
        self.enter("get_owner").await?;
        Ok(self.state.read().owner(&node))
    }

    async fn get_resolver(&self, node: Hash) -> Result<Address, LedgerError> {
        self.enter("get_resolver").await?;
        self.state
            .read()
            .resolvers
            .get(&node)
            .copied()
            .ok_or_else(|| LedgerError::Rejected("no resolver".to_string()))
    }

    async fn get_deed(&self, deed: Address) -> Result<Option<Deed>, LedgerError> {
        self.enter("get_deed").await?;
        Ok(self.state.read().deeds.get(&deed).cloned())
    }

    async fn get_sealed_bid(
        &self,
        bidder: Address,
        sealed_hash: Hash,
    ) -> Result<Option<BidCommitment>, LedgerError> {
        self.enter("get_sealed_bid").await?;
        Ok(self
            .state
            .read()
            .bids
            .get(&(bidder, sealed_hash))
            .filter(|bid| !bid.is_revealed())
            .map(|bid| bid.commitment().clone()))
    }

    async fn submit_start_auction_and_bid(
        &self,
        label_hash: Hash,
        commitment: &BidCommitment,
    ) -> Result<TransactionRef, LedgerError> {
        self.enter("submit_start_auction_and_bid").await?;
        let now = self.clock.now();
        let mut state = self.state.write();

        let (name_state, _) = self.state_of(&state, &label_hash);
        Self::require(name_state, &[NameState::Available], "start auction")?;
        self.record_bid(&mut state, commitment)?;

        let registration_date = now + self.config.auction_length_secs;
        state.entries.insert(
            label_hash,
            AuctionEntry {
                status: LedgerStatus::Auction,
                registration_date,
                ..AuctionEntry::open()
            },
        );

        let tx = state.next_tx("start_auction_and_bid");
        info!(
            "[na-02] Auction started for {:02x}{:02x}..., registration at {}",
            label_hash[0], label_hash[1], registration_date
        );
        Ok(tx)
    }

    async fn submit_sealed_bid(&self, commitment: &BidCommitment) -> Result<TransactionRef, LedgerError> {
        self.enter("submit_sealed_bid").await?;
        let mut state = self.state.write();
        self.record_bid(&mut state, commitment)?;
        Ok(state.next_tx("sealed_bid"))
    }

    async fn submit_reveal(
        &self,
        label_hash: Hash,
        bidder: Address,
        value: Amount,
        salt: &BidSalt,
    ) -> Result<TransactionRef, LedgerError> {
        self.enter("submit_reveal").await?;
        let mut state = self.state.write();

        let (name_state, mut entry) = self.state_of(&state, &label_hash);
        Self::require(name_state, &[NameState::Revealing], "reveal")?;

        let sealed_hash = seal_hash(&label_hash, &bidder, value, &salt.digest());
        let bid = state
            .bids
            .remove(&(bidder, sealed_hash))
            .ok_or_else(|| LedgerError::Rejected("no matching sealed bid".to_string()))?;
        let deposit = bid.deposit();
        let revealed = match reveal_bid(bid.clone(), &label_hash, value, salt) {
            Ok(revealed) => revealed,
            Err(e) => {
                state.bids.insert((bidder, sealed_hash), bid);
                return Err(LedgerError::Rejected(e.to_string()));
            }
        };
        state.bids.insert((bidder, sealed_hash), revealed);

        let new_deed = Address::from_hash_tail(&keccak256(&[&label_hash[..], &bidder.as_bytes()[..]].concat()));
        let settlement = apply_reveal(&mut entry, value, deposit, new_deed, self.config.min_price);
        if let RevealSettlement::NewLeader { displaced, .. } = &settlement {
            if let Some(previous) = displaced {
                state.release_deed(*previous);
            }
            state.deeds.insert(
                new_deed,
                Deed {
                    address: new_deed,
                    owner: bidder,
                    balance: value,
                },
            );
        }
        state.credit(bidder, settlement.refund());
        entry.status = LedgerStatus::Reveal;
        state.entries.insert(label_hash, entry);

        debug!("[na-02] Reveal settled as {:?}", settlement);
        Ok(state.next_tx("reveal"))
    }

    async fn submit_finish(&self, label_hash: Hash) -> Result<TransactionRef, LedgerError> {
        self.enter("submit_finish").await?;
        let mut state = self.state.write();

        let (name_state, mut entry) = self.state_of(&state, &label_hash);
        Self::require(name_state, &[NameState::Won], "finish")?;

        let price = settlement_price(&entry, self.config.min_price);
        let deed = state
            .deeds
            .get_mut(&entry.deed)
            .ok_or_else(|| LedgerError::Rejected("winning deed missing".to_string()))?;
        let refund = close_deed(deed, price);
        let owner = deed.owner;
        state.credit(owner, refund);

        let node = self.node_for(&label_hash);
        state.owners.insert(node, owner);
        entry.status = LedgerStatus::Owned;
        state.entries.insert(label_hash, entry);

        Ok(state.next_tx("finish"))
    }

    async fn submit_invalidate(&self, label: &str) -> Result<TransactionRef, LedgerError> {
        self.enter("submit_invalidate").await?;
        let label_hash = label_hash(label);
        let mut state = self.state.write();

        let (name_state, mut entry) = self.state_of(&state, &label_hash);
        Self::require(name_state, &[NameState::Won, NameState::Owned], "invalidate")?;
        if label.chars().count() >= self.config.min_label_length {
            return Err(LedgerError::Rejected("label is long enough".to_string()));
        }

        state.release_deed(entry.deed);
        let node = self.node_for(&label_hash);
        state.owners.remove(&node);
        entry.status = LedgerStatus::Invalidated;
        entry.deed = Address::ZERO;
        entry.value = LockedValue::Minimum;
        entry.highest_bid = Amount::zero();
        state.entries.insert(label_hash, entry);

        Ok(state.next_tx("invalidate"))
    }

    async fn submit_transfer(&self, label_hash: Hash, new_owner: Address) -> Result<TransactionRef, LedgerError> {
        self.enter("submit_transfer").await?;
        if new_owner.is_zero() {
            return Err(LedgerError::Rejected("cannot transfer to the zero address".to_string()));
        }
        let mut state = self.state.write();

        let (name_state, entry) = self.state_of(&state, &label_hash);
        Self::require(name_state, &[NameState::Owned], "transfer")?;

        if let Some(deed) = state.deeds.get_mut(&entry.deed) {
            deed.owner = new_owner;
        }
        let node = self.node_for(&label_hash);
        state.owners.insert(node, new_owner);

        Ok(state.next_tx("transfer"))
    }

    async fn submit_set_subdomain_owner(
        &self,
        parent: Hash,
        subdomain_label_hash: Hash,
        owner: Address,
    ) -> Result<TransactionRef, LedgerError> {
        self.enter("submit_set_subdomain_owner").await?;
        let mut state = self.state.write();

        if state.owner(&parent).is_zero() {
            return Err(LedgerError::Rejected("parent domain has no owner".to_string()));
        }
        state.owners.insert(child_node(&parent, &subdomain_label_hash), owner);

        Ok(state.next_tx("set_subdomain_owner"))
    }
}
