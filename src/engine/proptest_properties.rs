//! Property-based tests using `proptest` for engine invariants.
//!
//! 1. **Constant product**: `k` never decreases across a swap, in
//!    either direction or mode.
//! 2. **Liquidity round-trip**: add then remove returns at most what was
//!    contributed.
//! 3. **Quote determinism**: `quote_amount_out` is a pure function.
//! 4. **Multi-hop composition**: a two-hop route pays exactly what two
//!    chained single-hop quotes predict.
//! 5. **Share accounting**: total shares equal the sum of balances.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{quote_amount_in, quote_amount_out, Amm};
use crate::config::AmmConfig;
use crate::domain::{AccountId, Amount, AssetId, BasisPoints, PoolId, Shares, SwapPath};
use crate::ledger::InMemoryLedger;
use crate::math::constant_product;
use crate::traits::ManualClock;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const A: AssetId = AssetId::from_bytes([1u8; 32]);
const B: AssetId = AssetId::from_bytes([2u8; 32]);
const C: AssetId = AssetId::from_bytes([3u8; 32]);
const LP: AccountId = AccountId::from_bytes([0x11; 32]);
const ALT: AccountId = AccountId::from_bytes([0x12; 32]);
const TRADER: AccountId = AccountId::from_bytes([0x22; 32]);

const FUNDING: u128 = 1 << 100;

type TestAmm = Amm<InMemoryLedger, ManualClock>;

fn engine() -> TestAmm {
    let ledger = InMemoryLedger::new();
    for account in [LP, ALT, TRADER] {
        for asset in [A, B, C] {
            let Ok(()) = ledger.mint(asset, account, Amount::new(FUNDING)) else {
                panic!("mint");
            };
        }
    }
    let Ok(amm) = Amm::new(AmmConfig::default(), ledger, ManualClock::new(0)) else {
        panic!("valid config");
    };
    amm
}

fn create(amm: &TestAmm, x: AssetId, y: AssetId, rx: u128, ry: u128, fee: u32) -> PoolId {
    let Ok(receipt) =
        amm.create_pool_with_fee(LP, x, y, Amount::new(rx), Amount::new(ry), BasisPoints::new(fee))
    else {
        panic!("pool created");
    };
    receipt.pool_id
}

fn k_of(amm: &TestAmm, pool: PoolId) -> num_bigint::BigUint {
    let Ok(snap) = amm.get_pool(pool) else {
        panic!("pool exists");
    };
    constant_product(snap.reserve_x.get(), snap.reserve_y.get())
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [1_000, 10^15].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=1_000_000_000_000_000u128
}

/// Fee rates up to the default configured maximum.
fn fee_strategy() -> impl Strategy<Value = u32> {
    0u32..=1_000u32
}

/// Trade size as a fraction (in per-mille) of the input reserve.
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=2_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Constant product
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_never_decreases_k(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        fee in fee_strategy(),
        per_mille in fraction_strategy(),
        sell_x in any::<bool>(),
    ) {
        let amm = engine();
        let pool = create(&amm, A, B, rx, ry, fee);
        let (asset_in, reserve_in) = if sell_x { (A, rx) } else { (B, ry) };
        let amount_in = (reserve_in * per_mille / 1_000).max(1);

        let k_before = k_of(&amm, pool);
        let result = amm.swap_exact_in(TRADER, pool, asset_in, Amount::new(amount_in), Amount::ZERO);
        let k_after = k_of(&amm, pool);

        prop_assert!(k_after >= k_before, "k decreased: {} < {}", k_after, k_before);
        if result.is_err() {
            prop_assert_eq!(k_after, k_before);
        }
    }

    #[test]
    fn prop_exact_out_never_decreases_k(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        fee in fee_strategy(),
        per_mille in 1u128..=900u128,
    ) {
        let amm = engine();
        let pool = create(&amm, A, B, rx, ry, fee);
        let amount_out = (ry * per_mille / 1_000).max(1);

        let k_before = k_of(&amm, pool);
        let Ok(paid) = amm.swap_exact_out(TRADER, pool, A, Amount::new(amount_out), Amount::MAX)
        else {
            return Ok(());
        };
        prop_assert!(k_of(&amm, pool) >= k_before);
        prop_assert!(paid.get() > 0);
        prop_assert_eq!(amm.ledger().balance_of(B, TRADER).get(), FUNDING + amount_out);
        prop_assert_eq!(amm.ledger().balance_of(A, TRADER).get(), FUNDING - paid.get());
    }
}

// ---------------------------------------------------------------------------
// Property 2: Liquidity round-trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_remove_never_profits(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        dx in 1u128..=1_000_000_000u128,
        dy in 1u128..=1_000_000_000u128,
    ) {
        let amm = engine();
        let pool = create(&amm, A, B, rx, ry, 30);
        let Ok(added) = amm.add_liquidity(ALT, pool, Amount::new(dx), Amount::new(dy), Amount::ZERO, Amount::ZERO)
        else {
            return Ok(());
        };
        prop_assert!(added.amount_x.get() <= dx);
        prop_assert!(added.amount_y.get() <= dy);

        let Ok(removed) = amm.remove_liquidity(ALT, pool, added.shares, Amount::ZERO, Amount::ZERO)
        else {
            return Ok(());
        };
        prop_assert!(removed.amount_x <= added.amount_x);
        prop_assert!(removed.amount_y <= added.amount_y);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Quote determinism
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_is_deterministic(
        amount in 1u128..=u128::MAX / 4,
        rin in 1u128..=u128::MAX / 4,
        rout in 1u128..=u128::MAX,
        fee in 0u32..10_000u32,
    ) {
        let args = (Amount::new(amount), Amount::new(rin), Amount::new(rout), BasisPoints::new(fee));
        let first = quote_amount_out(args.0, args.1, args.2, args.3);
        let second = quote_amount_out(args.0, args.1, args.2, args.3);
        prop_assert_eq!(&first, &second);
        if let Ok(out) = first {
            prop_assert!(out.get() < rout);
        }
    }

    #[test]
    fn prop_quote_in_is_monotonic(
        rin in reserve_strategy(),
        rout in reserve_strategy(),
        a in 1u128..=999u128,
        b in 1u128..=999u128,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let fee = BasisPoints::new(30);
        let lo_out = Amount::new((rout * lo / 1_000).max(1));
        let hi_out = Amount::new((rout * hi / 1_000).max(1));
        let (Ok(lo_in), Ok(hi_in)) = (
            quote_amount_in(lo_out, Amount::new(rin), Amount::new(rout), fee),
            quote_amount_in(hi_out, Amount::new(rin), Amount::new(rout), fee),
        ) else {
            return Ok(());
        };
        prop_assert!(lo_in <= hi_in);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Multi-hop composition
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_two_hop_matches_chained_quotes(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        r3 in reserve_strategy(),
        r4 in reserve_strategy(),
        per_mille in fraction_strategy(),
    ) {
        let amm = engine();
        create(&amm, A, B, r1, r2, 30);
        create(&amm, B, C, r3, r4, 30);
        let amount_in = Amount::new((r1 * per_mille / 1_000).max(1));
        let fee = BasisPoints::new(30);

        let Ok(path) = SwapPath::new(vec![A, B, C]) else {
            panic!("valid path");
        };
        let expected = quote_amount_out(amount_in, Amount::new(r1), Amount::new(r2), fee)
            .and_then(|mid| quote_amount_out(mid, Amount::new(r3), Amount::new(r4), fee));
        let actual = amm.swap_exact_tokens_for_tokens(TRADER, &path, amount_in, Amount::ZERO, 0);

        match (expected, actual) {
            (Ok(e), Ok(a)) => prop_assert_eq!(e, a),
            (Err(_), Err(_)) => {}
            (e, a) => prop_assert!(false, "route disagrees with quotes: {:?} vs {:?}", e, a),
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Share accounting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_total_shares_match_balances(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        ops in proptest::collection::vec((any::<bool>(), 1u128..=1_000_000u128, any::<bool>()), 1..12),
    ) {
        let amm = engine();
        let pool = create(&amm, A, B, rx, ry, 30);
        for (use_alt, size, add) in ops {
            let who = if use_alt { ALT } else { LP };
            if add {
                let _ = amm.add_liquidity(who, pool, Amount::new(size), Amount::new(size), Amount::ZERO, Amount::ZERO);
            } else {
                let Ok(held) = amm.shares_of(pool, who) else {
                    panic!("pool exists");
                };
                let burn = Shares::new(held.get().min(size));
                let _ = amm.remove_liquidity(who, pool, burn, Amount::ZERO, Amount::ZERO);
            }
        }
        let Ok(snap) = amm.get_pool(pool) else {
            panic!("pool exists");
        };
        let (Ok(lp), Ok(alt)) = (amm.shares_of(pool, LP), amm.shares_of(pool, ALT)) else {
            panic!("pool exists");
        };
        prop_assert_eq!(snap.total_shares.get(), lp.get() + alt.get());
        prop_assert_eq!(snap.reserve_x.is_zero(), snap.total_shares.is_zero());
        prop_assert_eq!(snap.reserve_y.is_zero(), snap.total_shares.is_zero());
    }
}
