//! # Name Auction Subsystem Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | na-01 Name Hashing | namehash of a 3-label name | < 10µs |
//! | na-01 Name Hashing | NFKC normalization | < 10µs |
//! | na-02 Auction Registrar | bid seal | < 5µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use na_01_name_hashing::{label_hash, name_hash, normalize};
use na_02_auction_registrar::algorithms::{seal_bid, seal_hash};
use na_02_auction_registrar::{ether, Address, BidSalt};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::Duration;

fn random_label(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

// ============================================================================
// NA-01: Name Hashing
// ============================================================================

fn bench_name_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("na-01-name-hashing");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("name_hash_three_labels", |b| {
        b.iter(|| black_box(name_hash(black_box("pay.verylongname.eth"))))
    });

    group.bench_function("normalize_fullwidth", |b| {
        b.iter(|| black_box(normalize(black_box("ＶｅｒｙＬｏｎｇ.ETH"))))
    });

    for depth in [1usize, 4, 16] {
        let name = (0..depth)
            .map(|_| random_label(12))
            .chain(std::iter::once("eth".to_string()))
            .collect::<Vec<_>>()
            .join(".");
        group.throughput(Throughput::Elements(depth as u64 + 1));
        group.bench_with_input(BenchmarkId::new("name_hash_depth", depth), &name, |b, name| {
            b.iter(|| black_box(name_hash(name)))
        });
    }

    group.finish();
}

// ============================================================================
// NA-02: Bid Sealing
// ============================================================================

fn bench_bid_sealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("na-02-auction-registrar");

    let label = label_hash("verylongname");
    let bidder = Address::new([0xAA; 20]);
    let salt = BidSalt::new("benchmark salt phrase");
    let digest = salt.digest();

    group.bench_function("seal_hash", |b| {
        b.iter(|| black_box(seal_hash(&label, &bidder, ether(1), &digest)))
    });

    group.bench_function("seal_bid_with_mask", |b| {
        b.iter(|| black_box(seal_bid(&label, bidder, ether(1), Some(ether(3)), &salt)))
    });

    group.finish();
}

criterion_group!(benches, bench_name_hashing, bench_bid_sealing);
criterion_main!(benches);
