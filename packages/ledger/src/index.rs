// Liquidity index
//
// Each (pair, maker side) is split into buckets of INDEX_BUCKET_TICKS ordered
// ticks. A bucket holds the sorted encoded keys that currently have
// maker-side liquidity. Non-empty buckets are flagged in bitmap words, and
// non-empty words in a single summary word, so the best bucket is found with
// two reads however sparse the side is.

use soroban_sdk::{Bytes, Vec};
use tickbook_math::{DexError, INDEX_BUCKETS_PER_WORD, INDEX_BUCKET_TICKS};
use tickbook_tick::{ordered_tick, MakerSide, TickLiquidityKey};

use crate::store::{LedgerKey, LedgerStore};
use crate::types::{LedgerConfig, OrderTranche, PooledLiquidity, TickEntry};

// ============================================================
// BUCKETS
// ============================================================

/// Bucket holding `key`
pub fn bucket_of(key: &TickLiquidityKey) -> Result<u32, DexError> {
    Ok(ordered_tick(key.side(), key.tick())? / INDEX_BUCKET_TICKS)
}

/// Sorted encoded keys of one bucket, best price first
pub fn read_bucket<S: LedgerStore>(
    store: &S,
    pair_id: u32,
    side: MakerSide,
    bucket: u32,
) -> Vec<Bytes> {
    store
        .get(&LedgerKey::IndexBucket(pair_id, side, bucket))
        .unwrap_or_else(|| Vec::new(store.env()))
}

fn read_bits<S: LedgerStore>(store: &S, key: &LedgerKey) -> u128 {
    store.get(key).unwrap_or(0)
}

fn write_bits<S: LedgerStore>(store: &mut S, key: &LedgerKey, bits: u128) {
    if bits == 0 {
        store.remove(key);
    } else {
        store.set(key, &bits);
    }
}

/// Flag `bucket` as live or empty, updating the summary on word transitions
fn mark_bucket<S: LedgerStore>(
    store: &mut S,
    pair_id: u32,
    side: MakerSide,
    bucket: u32,
    live: bool,
) {
    let word = bucket / INDEX_BUCKETS_PER_WORD;
    let flag = 1u128 << (bucket % INDEX_BUCKETS_PER_WORD);

    let word_key = LedgerKey::IndexWord(pair_id, side, word);
    let bits = read_bits(store, &word_key);
    let updated = if live { bits | flag } else { bits & !flag };
    if updated == bits {
        return;
    }
    write_bits(store, &word_key, updated);

    if (bits == 0) != (updated == 0) {
        let summary_key = LedgerKey::Index(pair_id, side);
        let summary = read_bits(store, &summary_key);
        let word_flag = 1u128 << word;
        let summary = if updated != 0 { summary | word_flag } else { summary & !word_flag };
        write_bits(store, &summary_key, summary);
    }
}

/// First live bucket at or after `from`
pub fn next_bucket<S: LedgerStore>(
    store: &S,
    pair_id: u32,
    side: MakerSide,
    from: u32,
) -> Result<Option<u32>, DexError> {
    let word = from / INDEX_BUCKETS_PER_WORD;
    let bits = read_bits(store, &LedgerKey::IndexWord(pair_id, side, word))
        & (u128::MAX << (from % INDEX_BUCKETS_PER_WORD));
    if bits != 0 {
        return Ok(Some(word * INDEX_BUCKETS_PER_WORD + bits.trailing_zeros()));
    }

    let summary = read_bits(store, &LedgerKey::Index(pair_id, side))
        & u128::MAX.checked_shl(word + 1).unwrap_or(0);
    if summary == 0 {
        return Ok(None);
    }

    let word = summary.trailing_zeros();
    let bits = read_bits(store, &LedgerKey::IndexWord(pair_id, side, word));
    if bits == 0 {
        return Err(DexError::InternalInvariantViolation);
    }
    Ok(Some(word * INDEX_BUCKETS_PER_WORD + bits.trailing_zeros()))
}

// ============================================================
// MEMBERSHIP
// ============================================================

/// Insert or drop `key` so that membership matches `available > 0`
pub fn sync_entry<S: LedgerStore>(
    store: &mut S,
    key: &TickLiquidityKey,
    available: i128,
) -> Result<(), DexError> {
    let encoded = key.encode(store.env())?;
    let (pair_id, side, bucket) = (key.pair_id(), key.side(), bucket_of(key)?);
    let mut entries = read_bucket(store, pair_id, side, bucket);

    match (entries.binary_search(&encoded), available > 0) {
        (Err(pos), true) => entries.insert(pos, encoded),
        (Ok(pos), false) => {
            entries.remove(pos);
        }
        _ => return Ok(()),
    }

    let bucket_key = LedgerKey::IndexBucket(pair_id, side, bucket);
    if entries.is_empty() {
        store.remove(&bucket_key);
        mark_bucket(store, pair_id, side, bucket, false);
    } else {
        store.set(&bucket_key, &entries);
        if entries.len() == 1 {
            mark_bucket(store, pair_id, side, bucket, true);
        }
    }
    Ok(())
}

/// Refuse a new entry for `key` once its bucket holds `max_bucket_entries`.
///
/// Checked where makers open liquidity. A pool regaining one side through a
/// swap re-enters its bucket unchecked, since a fill must never fail.
pub fn check_bucket_room<S: LedgerStore>(
    store: &S,
    config: &LedgerConfig,
    key: &TickLiquidityKey,
) -> Result<(), DexError> {
    let entries = read_bucket(store, key.pair_id(), key.side(), bucket_of(key)?);
    if entries.len() < config.max_bucket_entries {
        return Ok(());
    }
    match entries.binary_search(&key.encode(store.env())?) {
        Ok(_) => Ok(()),
        Err(_) => Err(DexError::IndexFull),
    }
}

/// Maker token currently offered by the record behind `key`
pub fn available<S: LedgerStore>(store: &S, key: &TickLiquidityKey) -> i128 {
    match key {
        TickLiquidityKey::Pooled(k) => store
            .get::<PooledLiquidity>(&LedgerKey::Pool(k.pool_id()))
            .map(|pool| pool.reserve(k.side))
            .unwrap_or(0),
        TickLiquidityKey::Tranche(k) => store
            .get::<OrderTranche>(&LedgerKey::Tranche(*k))
            .map(|tranche| tranche.reserves_maker)
            .unwrap_or(0),
    }
}

#[inline]
pub fn has_liquidity<S: LedgerStore>(store: &S, pair_id: u32, side: MakerSide) -> bool {
    read_bits(store, &LedgerKey::Index(pair_id, side)) != 0
}

/// Live entries of a side, best price first
pub fn list_entries<S: LedgerStore>(
    store: &S,
    pair_id: u32,
    side: MakerSide,
) -> Result<Vec<TickEntry>, DexError> {
    let mut entries = Vec::new(store.env());
    let mut from = 0;
    while let Some(bucket) = next_bucket(store, pair_id, side, from)? {
        for encoded in read_bucket(store, pair_id, side, bucket).iter() {
            let key = TickLiquidityKey::decode(&encoded)?;
            let available = available(store, &key);
            entries.push_back(TickEntry { key, available });
        }
        from = bucket + 1;
    }
    Ok(entries)
}
