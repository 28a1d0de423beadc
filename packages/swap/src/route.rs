// Multi-hop routes
//
// Hops run back to back on the caller's store. Callers stage that store so
// a failing hop takes the earlier hops down with it.

use soroban_sdk::{Address, Vec};
use tickbook_ledger::{dry_run, find_pair, has_liquidity, LedgerConfig, LedgerStore};
use tickbook_math::DexError;

use crate::engine::execute_swap;
use crate::types::RouteOutcome;

/// Check the route's shape before touching any liquidity
pub fn validate_route(config: &LedgerConfig, route: &Vec<Address>) -> Result<u32, DexError> {
    if route.len() < 2 {
        return Err(DexError::InvalidRoute);
    }
    let hops = route.len() - 1;
    if hops > config.max_route_hops {
        return Err(DexError::InvalidRoute);
    }
    for i in 0..hops {
        if route.get(i) == route.get(i + 1) {
            return Err(DexError::InvalidRoute);
        }
    }
    Ok(hops)
}

/// Swap `amount_in` of `route[0]` through every hop into the last token
pub fn multi_hop_swap<S: LedgerStore>(
    store: &mut S,
    config: &LedgerConfig,
    route: &Vec<Address>,
    amount_in: i128,
    min_out: i128,
) -> Result<RouteOutcome, DexError> {
    let hop_count = validate_route(config, route)?;
    let mut hops = Vec::new(store.env());
    let mut amount = amount_in;

    for i in 0..hop_count {
        let token_in = route.get(i).ok_or(DexError::InvalidRoute)?;
        let token_out = route.get(i + 1).ok_or(DexError::InvalidRoute)?;

        let pair = find_pair(store, &token_in, &token_out)?.ok_or(DexError::RouteNotFound)?;
        let side = pair.side_offering(&token_out)?;
        if !has_liquidity(store, pair.id, side) {
            return Err(DexError::RouteNotFound);
        }

        let outcome = execute_swap(store, config, &token_in, &token_out, amount, None, true)?;
        amount = outcome.amount_out;
        hops.push_back(outcome);
    }

    if amount < min_out {
        return Err(DexError::SlippageExceeded);
    }

    Ok(RouteOutcome { amount_in, amount_out: amount, hops })
}

/// Simulate `multi_hop_swap` without keeping any of its writes
pub fn quote_multi_hop<S: LedgerStore>(
    store: &mut S,
    config: &LedgerConfig,
    route: &Vec<Address>,
    amount_in: i128,
) -> Result<RouteOutcome, DexError> {
    dry_run(store, |view| multi_hop_swap(view, config, route, amount_in, 0))
}
