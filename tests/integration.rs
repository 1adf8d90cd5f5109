//! Integration tests exercising the engine through its public API.
//!
//! Covers the reference scenarios for pricing, share minting and burning,
//! deadline and slippage rejection, then the atomicity and concurrency
//! guarantees of the router.

#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};

use hydra_swap::prelude::*;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const A: AssetId = AssetId::from_bytes([0xa0; 32]);
const B: AssetId = AssetId::from_bytes([0xb0; 32]);
const C: AssetId = AssetId::from_bytes([0xc0; 32]);
const LP: AccountId = AccountId::from_bytes([0x01; 32]);
const ALICE: AccountId = AccountId::from_bytes([0x02; 32]);
const BOB: AccountId = AccountId::from_bytes([0x03; 32]);

const GRANT: u128 = 1_000_000_000;
const NOW: u64 = 1_700_000_000;

type TestAmm = Amm<InMemoryLedger, ManualClock>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn amt(v: u128) -> Amount {
    Amount::new(v)
}

fn engine() -> TestAmm {
    init_tracing();
    let ledger = InMemoryLedger::new();
    for account in [LP, ALICE, BOB] {
        for asset in [A, B, C] {
            let Ok(()) = ledger.mint(asset, account, amt(GRANT)) else {
                panic!("mint");
            };
        }
    }
    let Ok(amm) = Amm::new(AmmConfig::default(), ledger, ManualClock::new(NOW)) else {
        panic!("valid config");
    };
    amm
}

fn create(amm: &TestAmm, x: AssetId, y: AssetId, rx: u128, ry: u128) -> CreatePoolReceipt {
    let Ok(receipt) = amm.create_pool(LP, x, y, amt(rx), amt(ry)) else {
        panic!("pool created");
    };
    receipt
}

fn snapshot(amm: &TestAmm, pool: PoolId) -> PoolSnapshot {
    let Ok(snap) = amm.get_pool(pool) else {
        panic!("pool exists");
    };
    snap
}

fn path(assets: &[AssetId]) -> SwapPath {
    let Ok(path) = SwapPath::new(assets.to_vec()) else {
        panic!("valid path");
    };
    path
}

/// Sum of an asset across every account the tests touch.
fn supply(amm: &TestAmm, asset: AssetId) -> u128 {
    let custody = (0..amm.pool_count())
        .map(|i| PoolId::new(u32::try_from(i).unwrap_or(u32::MAX)).custody_account());
    [LP, ALICE, BOB]
        .into_iter()
        .chain(custody)
        .map(|account| amm.ledger().balance_of(asset, account).get())
        .sum()
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_single_hop_quote_and_swap() {
    let amm = engine();
    let pool = create(&amm, A, B, 1_000, 1_000).pool_id;

    assert_eq!(
        quote_amount_out(amt(100), amt(1_000), amt(1_000), BasisPoints::new(30)),
        Ok(amt(90))
    );
    assert_eq!(amm.swap_exact_in(ALICE, pool, A, amt(100), amt(90)), Ok(amt(90)));
    let snap = snapshot(&amm, pool);
    assert_eq!((snap.reserve_x, snap.reserve_y), (amt(1_100), amt(910)));
}

#[test]
fn scenario_create_mints_geometric_mean() {
    let amm = engine();
    let receipt = create(&amm, A, B, 100, 400);
    assert_eq!(receipt.shares, Shares::new(200));
    assert_eq!(amm.shares_of(receipt.pool_id, LP), Ok(Shares::new(200)));
    assert_eq!(amm.pool_id(B, A), Ok(receipt.pool_id));
}

#[test]
fn scenario_burning_everything_drains_pool() {
    let amm = engine();
    let pool = create(&amm, A, B, 100, 400).pool_id;
    let Ok(receipt) = amm.remove_liquidity(LP, pool, Shares::new(200), amt(0), amt(0)) else {
        panic!("expected Ok");
    };
    assert_eq!((receipt.amount_x, receipt.amount_y), (amt(100), amt(400)));

    let snap = snapshot(&amm, pool);
    assert_eq!((snap.reserve_x, snap.reserve_y), (Amount::ZERO, Amount::ZERO));
    assert_eq!(snap.total_shares, Shares::ZERO);
    assert_eq!(amm.shares_of(pool, LP), Ok(Shares::ZERO));
    assert_eq!(amm.ledger().balance_of(A, LP), amt(GRANT));
    assert_eq!(amm.ledger().balance_of(B, LP), amt(GRANT));
}

#[test]
fn scenario_expired_deadline() {
    let amm = engine();
    let pool = create(&amm, A, B, 1_000, 1_000).pool_id;
    let before = snapshot(&amm, pool);

    assert_eq!(
        amm.swap_exact_tokens_for_tokens(ALICE, &path(&[A, B]), amt(100), amt(0), NOW - 1),
        Err(AmmError::DeadlineExpired {
            deadline: NOW - 1,
            now: NOW
        })
    );
    assert_eq!(snapshot(&amm, pool), before);
    assert_eq!(amm.ledger().balance_of(A, ALICE), amt(GRANT));

    // A deadline equal to the current time is still accepted.
    assert!(amm
        .swap_exact_tokens_for_tokens(ALICE, &path(&[A, B]), amt(100), amt(0), NOW)
        .is_ok());
}

#[test]
fn scenario_min_output_above_quote() {
    let amm = engine();
    let pool = create(&amm, A, B, 1_000, 1_000).pool_id;

    assert_eq!(
        amm.swap_exact_tokens_for_tokens(ALICE, &path(&[A, B]), amt(100), amt(91), NOW),
        Err(AmmError::SlippageExceeded {
            amount: 90,
            limit: 91
        })
    );
    let snap = snapshot(&amm, pool);
    assert_eq!((snap.reserve_x, snap.reserve_y), (amt(1_000), amt(1_000)));
    assert_eq!(amm.ledger().balance_of(A, ALICE), amt(GRANT));
    assert_eq!(amm.ledger().balance_of(B, ALICE), amt(GRANT));
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle_conserves_assets() {
    let amm = engine();
    let ab = create(&amm, A, B, 50_000, 80_000).pool_id;
    let bc = create(&amm, B, C, 60_000, 30_000).pool_id;

    let Ok(added) = amm.add_liquidity(ALICE, ab, amt(5_000), amt(9_000), amt(4_000), amt(0)) else {
        panic!("expected Ok");
    };
    assert_eq!((added.amount_x, added.amount_y), (amt(5_000), amt(8_000)));

    let route = path(&[A, B, C]);
    let Ok(out) = amm.swap_exact_tokens_for_tokens(BOB, &route, amt(2_500), amt(1), NOW) else {
        panic!("expected Ok");
    };
    assert!(out > Amount::ZERO);

    let back = path(&[C, B, A]);
    let Ok(paid) = amm.swap_tokens_for_exact_tokens(BOB, &back, amt(1_000), amt(10_000), NOW)
    else {
        panic!("expected Ok");
    };
    assert!(paid > Amount::ZERO);

    let Ok(_) = amm.remove_liquidity(ALICE, ab, added.shares, amt(0), amt(0)) else {
        panic!("expected Ok");
    };

    for asset in [A, B, C] {
        assert_eq!(supply(&amm, asset), 3 * GRANT);
    }
    for pool in [ab, bc] {
        let snap = snapshot(&amm, pool);
        assert_eq!(amm.ledger().balance_of(snap.pair.x(), pool.custody_account()), snap.reserve_x);
        assert_eq!(amm.ledger().balance_of(snap.pair.y(), pool.custody_account()), snap.reserve_y);
        assert!(snap.fees_x > Amount::ZERO || snap.fees_y > Amount::ZERO);
    }
}

#[test]
fn config_from_toml_limits_routes() {
    init_tracing();
    let Ok(config) = AmmConfig::from_toml_str("default_fee_bps = 5\nmax_hops = 1\n") else {
        panic!("valid config");
    };
    let ledger = InMemoryLedger::new();
    for asset in [A, B, C] {
        let Ok(()) = ledger.mint(asset, LP, amt(GRANT)) else {
            panic!("mint");
        };
    }
    let Ok(amm) = Amm::new(config, ledger, ManualClock::new(NOW)) else {
        panic!("valid config");
    };
    let pool = create(&amm, A, B, 1_000, 1_000).pool_id;
    create(&amm, B, C, 1_000, 1_000);

    assert_eq!(snapshot(&amm, pool).fee, BasisPoints::new(5));
    let Err(AmmError::InvalidPath(_)) = amm.find_pools(&path(&[A, B, C])) else {
        panic!("expected InvalidPath");
    };

    let bad = AmmConfig {
        max_hops: 0,
        ..AmmConfig::default()
    };
    let Err(AmmError::InvalidConfiguration(_)) =
        Amm::new(bad, InMemoryLedger::new(), ManualClock::new(0))
    else {
        panic!("expected InvalidConfiguration");
    };
}

// ---------------------------------------------------------------------------
// Atomicity
// ---------------------------------------------------------------------------

#[test]
fn mid_route_transfer_failure_changes_nothing() {
    let amm = engine();
    let ab = create(&amm, A, B, 10_000, 10_000).pool_id;
    let bc = create(&amm, B, C, 10_000, 10_000).pool_id;
    let before = (snapshot(&amm, ab), snapshot(&amm, bc));

    // Second transfer (pool ab -> pool bc) is refused.
    amm.ledger().freeze(bc.custody_account());
    assert_eq!(
        amm.swap_exact_tokens_for_tokens(ALICE, &path(&[A, B, C]), amt(500), amt(0), NOW),
        Err(AmmError::TransferFailed(TransferError::AccountFrozen))
    );
    amm.ledger().unfreeze(bc.custody_account());

    assert_eq!((snapshot(&amm, ab), snapshot(&amm, bc)), before);
    for asset in [A, B, C] {
        assert_eq!(amm.ledger().balance_of(asset, ALICE), amt(GRANT));
    }
    assert_eq!(amm.ledger().balance_of(A, ab.custody_account()), amt(10_000));
    assert_eq!(amm.ledger().balance_of(B, ab.custody_account()), amt(10_000));

    // The same route succeeds once the ledger accepts it.
    assert!(amm
        .swap_exact_tokens_for_tokens(ALICE, &path(&[A, B, C]), amt(500), amt(0), NOW)
        .is_ok());
}

#[test]
fn final_payout_failure_rolls_back_every_hop() {
    let amm = engine();
    let ab = create(&amm, A, B, 10_000, 10_000).pool_id;
    let bc = create(&amm, B, C, 10_000, 10_000).pool_id;

    let whale = AccountId::from_bytes([0x77; 32]);
    for (asset, value) in [(A, 1_000), (C, u128::MAX)] {
        let Ok(()) = amm.ledger().mint(asset, whale, amt(value)) else {
            panic!("mint");
        };
    }
    assert_eq!(
        amm.swap_exact_tokens_for_tokens(whale, &path(&[A, B, C]), amt(500), amt(0), NOW),
        Err(AmmError::TransferFailed(TransferError::Overflow))
    );
    assert_eq!(amm.ledger().balance_of(A, whale), amt(1_000));
    assert_eq!(amm.ledger().balance_of(B, ab.custody_account()), amt(10_000));
    assert_eq!(amm.ledger().balance_of(B, bc.custody_account()), amt(10_000));
    assert_eq!(snapshot(&amm, bc).reserve_y, amt(10_000));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn opposite_routes_run_concurrently_without_deadlock() {
    let amm = engine();
    let ab = create(&amm, A, B, 1_000_000, 1_000_000).pool_id;
    let bc = create(&amm, B, C, 1_000_000, 1_000_000).pool_id;
    let k_before = [ab, bc].map(|pool| {
        let snap = snapshot(&amm, pool);
        snap.reserve_x.get() * snap.reserve_y.get()
    });

    let forward = path(&[A, B, C]);
    let backward = path(&[C, B, A]);
    let committed = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for (trader, route) in [(ALICE, &forward), (BOB, &backward)] {
            let amm = &amm;
            let committed = &committed;
            scope.spawn(move || {
                for i in 0..200u128 {
                    match amm.swap_exact_tokens_for_tokens(trader, route, amt(100 + i), amt(1), NOW) {
                        Ok(_) => {
                            committed.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(AmmError::StaleQuote { .. }) => {}
                        Err(err) => panic!("unexpected error: {err}"),
                    }
                }
            });
        }
    });

    assert!(committed.load(Ordering::Relaxed) > 0);
    for (pool, k) in [ab, bc].into_iter().zip(k_before) {
        let snap = snapshot(&amm, pool);
        assert!(snap.reserve_x.get() * snap.reserve_y.get() >= k);
        assert_eq!(amm.shares_of(pool, LP), Ok(snap.total_shares));
        assert_eq!(amm.ledger().balance_of(snap.pair.x(), pool.custody_account()), snap.reserve_x);
        assert_eq!(amm.ledger().balance_of(snap.pair.y(), pool.custody_account()), snap.reserve_y);
    }
    for asset in [A, B, C] {
        assert_eq!(supply(&amm, asset), 3 * GRANT);
    }
}

#[test]
fn concurrent_creation_of_one_pair_succeeds_once() {
    let amm = engine();
    let outcomes: Vec<Result<CreatePoolReceipt>> = std::thread::scope(|scope| {
        let handles: Vec<_> = [(LP, A, B), (ALICE, B, A), (BOB, A, B)]
            .into_iter()
            .map(|(who, x, y)| {
                let amm = &amm;
                scope.spawn(move || amm.create_pool(who, x, y, amt(1_000), amt(1_000)))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(Err(AmmError::PoolNotFound)))
            .collect()
    });

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| **r == Err(AmmError::PoolAlreadyExists))
            .count(),
        2
    );
    assert_eq!(amm.pool_count(), 1);
    for asset in [A, B] {
        assert_eq!(supply(&amm, asset), 3 * GRANT);
    }
}
