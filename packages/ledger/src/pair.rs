// Pair registry

use soroban_sdk::Address;
use tickbook_math::DexError;

use crate::store::{next_counter, LedgerKey, LedgerStore};
use crate::types::TradingPair;

/// Canonical (token0, token1) order
pub fn sort_tokens(token_a: &Address, token_b: &Address) -> Result<(Address, Address), DexError> {
    if token_a == token_b {
        return Err(DexError::SameToken);
    }
    if token_a < token_b {
        Ok((token_a.clone(), token_b.clone()))
    } else {
        Ok((token_b.clone(), token_a.clone()))
    }
}

pub fn pair_by_id<S: LedgerStore>(store: &S, pair_id: u32) -> Option<TradingPair> {
    store.get(&LedgerKey::Pair(pair_id))
}

pub fn find_pair<S: LedgerStore>(
    store: &S,
    token_a: &Address,
    token_b: &Address,
) -> Result<Option<TradingPair>, DexError> {
    let (token0, token1) = sort_tokens(token_a, token_b)?;
    let id: Option<u32> = store.get(&LedgerKey::PairId(token0, token1));
    Ok(id.and_then(|id| pair_by_id(store, id)))
}

pub fn require_pair<S: LedgerStore>(
    store: &S,
    token_a: &Address,
    token_b: &Address,
) -> Result<TradingPair, DexError> {
    find_pair(store, token_a, token_b)?.ok_or(DexError::PairNotFound)
}

/// Look the pair up, registering it on first use.
/// The flag is true when the pair was created by this call.
pub fn get_or_create_pair<S: LedgerStore>(
    store: &mut S,
    token_a: &Address,
    token_b: &Address,
) -> Result<(TradingPair, bool), DexError> {
    if let Some(pair) = find_pair(store, token_a, token_b)? {
        return Ok((pair, false));
    }

    let (token0, token1) = sort_tokens(token_a, token_b)?;
    let id = next_counter(store, &LedgerKey::NextPairId)?;
    let id = u32::try_from(id).map_err(|_| DexError::Overflow)?;

    let pair = TradingPair { id, token0: token0.clone(), token1: token1.clone() };
    store.set(&LedgerKey::PairId(token0, token1), &id);
    store.set(&LedgerKey::Pair(id), &pair);

    Ok((pair, true))
}
