mod common;

use common::*;
use tickbook_ledger::*;
use tickbook_math::DexError;

#[test]
fn test_memory_store_roundtrip() {
    let mut f = setup();
    f.store.set(&LedgerKey::NextOrderId, &7u64);
    assert_eq!(f.store.get::<u64>(&LedgerKey::NextOrderId), Some(7));
    assert!(f.store.has(&LedgerKey::NextOrderId));

    f.store.remove(&LedgerKey::NextOrderId);
    assert_eq!(f.store.get::<u64>(&LedgerKey::NextOrderId), None);
    assert!(f.store.is_empty());
}

#[test]
fn test_staged_writes_hidden_until_commit() {
    let mut f = setup();
    f.store.set(&LedgerKey::NextPairId, &1u64);

    let mut staged = StagedStore::new(&mut f.store);
    staged.set(&LedgerKey::NextPairId, &2u64);
    staged.set(&LedgerKey::NextOrderId, &5u64);
    assert_eq!(staged.get::<u64>(&LedgerKey::NextPairId), Some(2));
    assert_eq!(staged.pending(), 2);
    staged.commit();

    assert_eq!(f.store.get::<u64>(&LedgerKey::NextPairId), Some(2));
    assert_eq!(f.store.get::<u64>(&LedgerKey::NextOrderId), Some(5));
}

#[test]
fn test_staged_remove_shadows_base() {
    let mut f = setup();
    f.store.set(&LedgerKey::NextPairId, &1u64);

    let mut staged = StagedStore::new(&mut f.store);
    staged.remove(&LedgerKey::NextPairId);
    assert!(!staged.has(&LedgerKey::NextPairId));

    // a later write revives the key
    staged.set(&LedgerKey::NextPairId, &3u64);
    assert_eq!(staged.get::<u64>(&LedgerKey::NextPairId), Some(3));
    staged.remove(&LedgerKey::NextPairId);
    staged.commit();

    assert!(!f.store.has(&LedgerKey::NextPairId));
}

#[test]
fn test_dropped_view_discards_writes() {
    let mut f = setup();
    let snapshot = f.store.clone();
    {
        let mut staged = StagedStore::new(&mut f.store);
        staged.set(&LedgerKey::NextOrderId, &9u64);
    }
    assert_eq!(f.store.entries(), snapshot.entries());
}

#[test]
fn test_with_staged_rolls_back_on_error() {
    let mut f = setup();
    let snapshot = f.store.clone();

    let result: Result<(), DexError> = with_staged(&mut f.store, |view| {
        view.set(&LedgerKey::NextOrderId, &1u64);
        Err(DexError::InsufficientLiquidity)
    });

    assert_eq!(result, Err(DexError::InsufficientLiquidity));
    assert_eq!(f.store.entries(), snapshot.entries());
}

#[test]
fn test_with_staged_commits_on_success() {
    let mut f = setup();
    let id = with_staged(&mut f.store, |view| next_counter(view, &LedgerKey::NextOrderId)).unwrap();
    assert_eq!(id, 0);
    assert_eq!(f.store.get::<u64>(&LedgerKey::NextOrderId), Some(1));
}

#[test]
fn test_dry_run_never_commits() {
    let mut f = setup();
    let id = dry_run(&mut f.store, |view| next_counter(view, &LedgerKey::NextOrderId)).unwrap();
    assert_eq!(id, 0);
    assert!(f.store.is_empty());
}

#[test]
fn test_pair_registry() {
    let mut f = setup();
    let (pair, created) = get_or_create_pair(&mut f.store, &f.token1, &f.token0).unwrap();
    assert!(created);
    assert_eq!(pair.id, 0);
    assert_eq!(pair.token0, f.token0);
    assert_eq!(pair.token1, f.token1);

    let (again, created) = get_or_create_pair(&mut f.store, &f.token0, &f.token1).unwrap();
    assert!(!created);
    assert_eq!(again, pair);
    assert_eq!(pair_by_id(&f.store, 0), Some(pair));
}

#[test]
fn test_pair_rejects_same_token() {
    let mut f = setup();
    let token = f.token0.clone();
    assert_eq!(
        get_or_create_pair(&mut f.store, &token, &token),
        Err(DexError::SameToken)
    );
}

#[test]
fn test_unknown_pair() {
    let f = setup();
    assert_eq!(require_pair(&f.store, &f.token0, &f.token1), Err(DexError::PairNotFound));
}

#[test]
#[should_panic(expected = "Error(Contract, #999)")]
fn test_mistyped_record_traps() {
    let mut f = setup();
    f.store.set(&LedgerKey::Pair(0), &7u64);
    let _ = f.store.get::<TradingPair>(&LedgerKey::Pair(0));
}

#[test]
#[should_panic(expected = "Error(Contract, #999)")]
fn test_mistyped_staged_write_traps() {
    let mut f = setup();
    let mut staged = StagedStore::new(&mut f.store);
    staged.set(&LedgerKey::Pair(0), &7u64);
    let _ = staged.get::<TradingPair>(&LedgerKey::Pair(0));
}
