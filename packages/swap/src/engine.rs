// Exact-input swap over the liquidity index
//
// The side's index is walked best price first, bucket by bucket. Each entry
// is either drained or, when the remaining input cannot drain it, partially
// consumed with the whole remainder, which ends the walk.

use soroban_sdk::{Address, Env};
use tickbook_ledger::{
    available, dry_run, fill_pool, fill_tranche, next_bucket, read_bucket, require_pair,
    LedgerConfig, LedgerStore,
};
use tickbook_math::{fee_for, try_add, try_sub, DexError, Rounding};
use tickbook_tick::{MakerSide, TickLiquidityKey};

use crate::types::{StepAmounts, SwapOutcome};

// ============================================================
// STEP MATH
// ============================================================

/// Amounts for consuming `key` with `remaining` input, `None` when the
/// input is too small to buy a single unit at this price.
pub fn compute_step(
    env: &Env,
    key: &TickLiquidityKey,
    available: i128,
    remaining: i128,
) -> Result<Option<StepAmounts>, DexError> {
    // input large enough to overflow the cap can always drain the entry
    let cap = match key.price()?.mul_amount(env, remaining, Rounding::Down) {
        Ok(cap) => cap,
        Err(DexError::Overflow) => i128::MAX,
        Err(e) => return Err(e),
    };
    if cap == 0 {
        return Ok(None);
    }

    let (gross, charged) = if cap >= available {
        let owed = key.inverse_price()?.mul_amount(env, available, Rounding::Up)?;
        (available, owed.min(remaining))
    } else {
        (cap, remaining)
    };

    // a single unit is never charged a fee, so every step delivers output
    let fee = if gross > 1 { fee_for(env, gross, key.fee())? } else { 0 };
    let net = try_sub(gross, fee)?;
    if net <= 0 {
        return Err(DexError::InternalInvariantViolation);
    }

    Ok(Some(StepAmounts { gross, charged, fee, net }))
}

/// True when `key` is priced worse than the taker's limit
fn beyond_limit(key: &TickLiquidityKey, limit_tick: Option<i32>) -> bool {
    match (limit_tick, key.side()) {
        (None, _) => false,
        // token0 gets dearer as the tick rises
        (Some(limit), MakerSide::Token0) => key.tick() > limit,
        (Some(limit), MakerSide::Token1) => key.tick() < limit,
    }
}

fn apply_step<S: LedgerStore>(
    store: &mut S,
    key: &TickLiquidityKey,
    step: &StepAmounts,
) -> Result<(), DexError> {
    match key {
        TickLiquidityKey::Pooled(k) => fill_pool(store, k, step.gross, step.charged, step.fee),
        TickLiquidityKey::Tranche(k) => fill_tranche(store, k, step.gross, step.charged, step.fee),
    }
}

// ============================================================
// SWAP
// ============================================================

/// Sell `amount_in` of `token_in` for `token_out`.
///
/// Stops when the input is spent, the index runs out, the next entry lies
/// beyond `limit_tick`, or `max_swap_ticks` entries were consumed. With
/// `require_full` any unspent input fails the swap.
pub fn execute_swap<S: LedgerStore>(
    store: &mut S,
    config: &LedgerConfig,
    token_in: &Address,
    token_out: &Address,
    amount_in: i128,
    limit_tick: Option<i32>,
    require_full: bool,
) -> Result<SwapOutcome, DexError> {
    if amount_in <= 0 {
        return Err(DexError::InvalidAmount);
    }

    let pair = require_pair(store, token_in, token_out)?;
    let side = pair.side_offering(token_out)?;
    let env = store.env().clone();

    let mut outcome = SwapOutcome { remaining: amount_in, ..SwapOutcome::default() };
    let mut from = 0;

    'walk: while let Some(bucket) = next_bucket(store, pair.id, side, from)? {
        // entries emptied mid-walk leave the stored bucket; this copy keeps the order
        let entries = read_bucket(store, pair.id, side, bucket);

        for encoded in entries.iter() {
            if outcome.remaining == 0 || outcome.ticks_crossed >= config.max_swap_ticks {
                break 'walk;
            }

            let key = TickLiquidityKey::decode(&encoded)?;
            if beyond_limit(&key, limit_tick) {
                break 'walk;
            }

            let offered = available(store, &key);
            if offered <= 0 {
                return Err(DexError::InternalInvariantViolation);
            }

            let Some(step) = compute_step(&env, &key, offered, outcome.remaining)? else {
                break 'walk;
            };
            apply_step(store, &key, &step)?;

            outcome.remaining = try_sub(outcome.remaining, step.charged)?;
            outcome.amount_out = try_add(outcome.amount_out, step.net)?;
            outcome.fees = try_add(outcome.fees, step.fee)?;
            outcome.ticks_crossed += 1;
        }
        from = bucket + 1;
    }

    if outcome.amount_out == 0 || (require_full && outcome.remaining > 0) {
        return Err(DexError::InsufficientLiquidity);
    }

    outcome.amount_in = try_sub(amount_in, outcome.remaining)?;
    Ok(outcome)
}

/// Simulate `execute_swap` without keeping any of its writes
pub fn quote_swap<S: LedgerStore>(
    store: &mut S,
    config: &LedgerConfig,
    token_in: &Address,
    token_out: &Address,
    amount_in: i128,
    limit_tick: Option<i32>,
) -> Result<SwapOutcome, DexError> {
    dry_run(store, |view| {
        execute_swap(view, config, token_in, token_out, amount_in, limit_tick, false)
    })
}
