mod common;

use common::*;
use soroban_sdk::Address;
use tickbook_ledger::*;
use tickbook_math::DexError;
use tickbook_tick::{MakerSide, TickLiquidityKey};

fn sell0(f: &mut Fixture, owner: &Address, tick: i32, amount: i128) -> Result<MakerOrder, DexError> {
    let (token0, token1) = (f.token0.clone(), f.token1.clone());
    place_limit_order(&mut f.store, &f.config, owner, &token0, &token1, tick, 0, amount)
}

fn ticks(f: &Fixture, side: MakerSide) -> Vec<i32> {
    list_entries(&f.store, 0, side).unwrap().iter().map(|e| e.key.tick()).collect()
}

// ============================================================
// ORDERING
// ============================================================

#[test]
fn test_entries_walk_buckets_in_price_order() {
    let mut f = setup();
    let alice = f.alice.clone();
    for tick in [300_000, -300_000, 64, 0, 63] {
        sell0(&mut f, &alice, tick, 10).unwrap();
    }
    assert_eq!(ticks(&f, MakerSide::Token0), [-300_000, 0, 63, 64, 300_000]);

    // token1 gets cheaper as the tick rises
    let (token0, token1) = (f.token0.clone(), f.token1.clone());
    for tick in [-5, 5, 200] {
        place_limit_order(&mut f.store, &f.config, &alice, &token1, &token0, tick, 0, 10).unwrap();
    }
    assert_eq!(ticks(&f, MakerSide::Token1), [200, 5, -5]);
}

#[test]
fn test_next_bucket_skips_empty_buckets() {
    let mut f = setup();
    let alice = f.alice.clone();
    let near = sell0(&mut f, &alice, -1, 10).unwrap();
    let far = sell0(&mut f, &alice, 250_000, 10).unwrap();

    let near_bucket = bucket_of(&TickLiquidityKey::Tranche(near.tranche)).unwrap();
    let far_bucket = bucket_of(&TickLiquidityKey::Tranche(far.tranche)).unwrap();
    assert!(far_bucket / 128 > near_bucket / 128);

    assert_eq!(next_bucket(&f.store, 0, MakerSide::Token0, 0).unwrap(), Some(near_bucket));
    assert_eq!(next_bucket(&f.store, 0, MakerSide::Token0, near_bucket + 1).unwrap(), Some(far_bucket));
    assert_eq!(next_bucket(&f.store, 0, MakerSide::Token0, far_bucket + 1).unwrap(), None);
    assert_eq!(read_bucket(&f.store, 0, MakerSide::Token0, far_bucket).len(), 1);
}

#[test]
fn test_emptied_side_clears_directory() {
    let mut f = setup();
    let alice = f.alice.clone();
    let a = sell0(&mut f, &alice, 10, 10).unwrap();
    let b = sell0(&mut f, &alice, 90_000, 10).unwrap();
    assert!(has_liquidity(&f.store, 0, MakerSide::Token0));

    cancel_order(&mut f.store, &alice, a.id).unwrap();
    assert!(has_liquidity(&f.store, 0, MakerSide::Token0));
    cancel_order(&mut f.store, &alice, b.id).unwrap();

    assert!(!has_liquidity(&f.store, 0, MakerSide::Token0));
    assert!(!f.store.has(&LedgerKey::Index(0, MakerSide::Token0)));
    assert_eq!(next_bucket(&f.store, 0, MakerSide::Token0, 0).unwrap(), None);
    for order in [a, b] {
        let bucket = bucket_of(&TickLiquidityKey::Tranche(order.tranche)).unwrap();
        assert!(!f.store.has(&LedgerKey::IndexBucket(0, MakerSide::Token0, bucket)));
        assert!(!f.store.has(&LedgerKey::IndexWord(0, MakerSide::Token0, bucket / 128)));
    }
}

// ============================================================
// BUCKET CAP
// ============================================================

#[test]
fn test_full_bucket_refuses_new_entries() {
    let mut f = setup();
    f.config.max_bucket_entries = 2;
    let (alice, bob) = (f.alice.clone(), f.bob.clone());
    let first = sell0(&mut f, &alice, 0, 10).unwrap();
    sell0(&mut f, &alice, 1, 10).unwrap();

    let snapshot = f.store.clone();
    let (config, token0, token1) = (f.config.clone(), f.token0.clone(), f.token1.clone());
    let result = with_staged(&mut f.store, |view| {
        place_limit_order(view, &config, &bob, &token0, &token1, 2, 0, 10)
    });
    assert_eq!(result, Err(DexError::IndexFull));
    assert_eq!(f.store.entries(), snapshot.entries());

    // joining a live tranche adds no entry
    let joined = sell0(&mut f, &bob, 0, 10).unwrap();
    assert_eq!(joined.tranche, first.tranche);

    // the next bucket has room
    sell0(&mut f, &bob, 64, 10).unwrap();

    // a pool needs room only on the sides it funds
    assert_eq!(
        deposit(&mut f.store, &f.config, &bob, &token0, &token1, 3, 0, 10, 0, 0),
        Err(DexError::IndexFull)
    );
    assert!(deposit(&mut f.store, &f.config, &bob, &token0, &token1, 3, 0, 0, 10, 0).is_ok());
}

#[test]
fn test_cancel_frees_bucket_room() {
    let mut f = setup();
    f.config.max_bucket_entries = 1;
    let alice = f.alice.clone();
    let order = sell0(&mut f, &alice, 5, 10).unwrap();
    assert_eq!(sell0(&mut f, &alice, 6, 10), Err(DexError::IndexFull));

    cancel_order(&mut f.store, &alice, order.id).unwrap();
    assert!(sell0(&mut f, &alice, 6, 10).is_ok());
}
