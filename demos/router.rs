//! Multi-hop routing example.
//!
//! Seeds two pools, quotes a route in both modes, then executes an
//! exact-input and an exact-output trade through the router.  Set
//! `RUST_LOG=hydra_swap=debug` to see per-hop commit events.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=hydra_swap=debug cargo run --example router
//! ```

use hydra_swap::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Multi-hop Router ===\n");

    // ── 1. Assets and accounts ──────────────────────────────────────────
    let usd = AssetId::from_bytes([1u8; 32]);
    let eth = AssetId::from_bytes([2u8; 32]);
    let dot = AssetId::from_bytes([3u8; 32]);
    let lp = AccountId::from_bytes([0x11; 32]);
    let trader = AccountId::from_bytes([0x22; 32]);

    let ledger = InMemoryLedger::new();
    for asset in [usd, eth, dot] {
        ledger.mint(asset, lp, Amount::new(100_000_000))?;
    }
    ledger.mint(usd, trader, Amount::new(50_000))?;

    // ── 2. Engine and pools ─────────────────────────────────────────────
    let config = AmmConfig::from_toml_str("default_fee_bps = 30\nmax_hops = 3\n")?;
    let amm = Amm::new(config, ledger, SystemClock)?;

    let usd_eth = amm.create_pool(lp, usd, eth, Amount::new(2_000_000), Amount::new(1_000))?;
    let eth_dot = amm.create_pool(lp, eth, dot, Amount::new(1_000), Amount::new(400_000))?;
    println!("Pool {} minted {} shares", usd_eth.pool_id, usd_eth.shares);
    println!("Pool {} minted {} shares", eth_dot.pool_id, eth_dot.shares);

    // ── 3. Quote USD -> ETH -> DOT ──────────────────────────────────────
    let path = SwapPath::new(vec![usd, eth, dot])?;
    let forward = amm.get_amounts_out(&path, Amount::new(10_000))?;
    println!("\nExact-in quote for 10 000 USD:");
    for hop in forward.hops() {
        println!(
            "  {}: {} in -> {} out (fee {})",
            hop.pool_id, hop.amount_in, hop.amount_out, hop.fee
        );
    }

    let backward = amm.get_amounts_in(&path, Amount::new(1_000))?;
    println!("Exact-out quote for 1 000 DOT costs {} USD", backward.amount_in());

    // ── 4. Execute with a one-minute deadline ───────────────────────────
    let deadline = amm.clock().now() + 60;
    let received = amm.swap_exact_tokens_for_tokens(
        trader,
        &path,
        Amount::new(10_000),
        forward.amount_out(),
        deadline,
    )?;
    println!("\nSwapped 10 000 USD for {received} DOT");

    let paid = amm.swap_tokens_for_exact_tokens(
        trader,
        &path,
        Amount::new(1_000),
        Amount::new(30_000),
        deadline,
    )?;
    println!("Paid {paid} USD for 1 000 DOT");

    // ── 5. Final state ──────────────────────────────────────────────────
    for id in [usd_eth.pool_id, eth_dot.pool_id] {
        println!("{}", amm.get_pool(id)?);
    }
    println!(
        "Trader holds {} USD and {} DOT",
        amm.ledger().balance_of(usd, trader),
        amm.ledger().balance_of(dot, trader)
    );
    Ok(())
}
