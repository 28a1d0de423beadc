// Pooled liquidity: deposits, withdrawals and taker fills
//
// A pool sells both tokens at its tick's fixed price. Shares are minted in
// proportion to value measured in token0 units, so depositors may bring
// either token or any mix of the two. Fee income sits beside the reserves:
// it is never sold to takers and is paid out with withdrawals.

use soroban_sdk::{Address, Env, U256};
use tickbook_math::{
    mul_div, price_from_tick, try_add, try_sub, DexError, Rounding, BPS_DENOMINATOR,
};
use tickbook_tick::{MakerSide, PoolId, PooledKey, TickLiquidityKey};

use crate::index::{check_bucket_room, sync_entry};
use crate::invariants::check_pool;
use crate::pair::{get_or_create_pair, require_pair};
use crate::store::{LedgerKey, LedgerStore};
use crate::types::{DepositOutcome, LedgerConfig, PooledLiquidity};

// ============================================================
// READS
// ============================================================

pub fn read_pool<S: LedgerStore>(store: &S, pool_id: &PoolId) -> Option<PooledLiquidity> {
    store.get(&LedgerKey::Pool(*pool_id))
}

pub fn read_shares<S: LedgerStore>(store: &S, owner: &Address, pool_id: &PoolId) -> i128 {
    store
        .get(&LedgerKey::Shares(owner.clone(), *pool_id))
        .unwrap_or(0)
}

/// Pool value in token0 units at its own tick
pub fn pool_value(env: &Env, tick: i32, amount0: i128, amount1: i128) -> Result<i128, DexError> {
    let token0_per_token1 = price_from_tick(-tick)?;
    let converted = token0_per_token1.mul_amount(env, amount1, Rounding::Down)?;
    try_add(amount0, converted)
}

// ============================================================
// WRITES
// ============================================================

/// Persist a pool and keep both index entries in step with its reserves.
/// A pool whose shares reached zero is deleted.
fn write_pool<S: LedgerStore>(
    store: &mut S,
    pool_id: &PoolId,
    pool: &PooledLiquidity,
) -> Result<(), DexError> {
    check_pool(pool)?;

    let key = LedgerKey::Pool(*pool_id);
    if pool.total_shares == 0 {
        store.remove(&key);
    } else {
        store.set(&key, pool);
    }

    for side in [MakerSide::Token0, MakerSide::Token1] {
        let entry = TickLiquidityKey::Pooled(pool_id.side_key(side));
        sync_entry(store, &entry, pool.reserve(side))?;
    }
    Ok(())
}

fn write_shares<S: LedgerStore>(store: &mut S, owner: &Address, pool_id: &PoolId, shares: i128) {
    let key = LedgerKey::Shares(owner.clone(), *pool_id);
    if shares == 0 {
        store.remove(&key);
    } else {
        store.set(&key, &shares);
    }
}

/// Deviation between two compositions `a0:a1` and `r0:r1`, in basis points
fn composition_deviation_bps(env: &Env, a0: i128, a1: i128, r0: i128, r1: i128) -> Result<u32, DexError> {
    let cross1 = U256::from_u128(env, a0 as u128).mul(&U256::from_u128(env, r1 as u128));
    let cross2 = U256::from_u128(env, a1 as u128).mul(&U256::from_u128(env, r0 as u128));

    if cross1 == cross2 {
        return Ok(0);
    }
    let (larger, smaller) = if cross1 > cross2 { (cross1, cross2) } else { (cross2, cross1) };

    let bps = larger
        .sub(&smaller)
        .mul(&U256::from_u32(env, BPS_DENOMINATOR))
        .div(&larger);
    bps.to_u128()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(DexError::Overflow)
}

// ============================================================
// DEPOSIT / WITHDRAW
// ============================================================

/// Add liquidity to the pool at (`tick`, `fee`) of the pair.
///
/// `tolerance_bps` bounds how far the deposit's token mix may stray from
/// the pool's current mix. Ignored for the first deposit.
pub fn deposit<S: LedgerStore>(
    store: &mut S,
    config: &LedgerConfig,
    owner: &Address,
    token_a: &Address,
    token_b: &Address,
    tick: i32,
    fee: u32,
    amount_a: i128,
    amount_b: i128,
    tolerance_bps: u32,
) -> Result<DepositOutcome, DexError> {
    if amount_a < 0 || amount_b < 0 || (amount_a == 0 && amount_b == 0) {
        return Err(DexError::InvalidAmount);
    }
    config.check_tick(tick)?;
    config.check_fee(fee)?;

    let (pair, _) = get_or_create_pair(store, token_a, token_b)?;
    let (amount0, amount1) = if *token_a == pair.token0 {
        (amount_a, amount_b)
    } else {
        (amount_b, amount_a)
    };

    let env = store.env().clone();
    let pool_id = PoolId { pair_id: pair.id, tick, fee };
    for (side, amount) in [(MakerSide::Token0, amount0), (MakerSide::Token1, amount1)] {
        if amount > 0 {
            check_bucket_room(store, config, &TickLiquidityKey::Pooled(pool_id.side_key(side)))?;
        }
    }
    let mut pool = read_pool(store, &pool_id).unwrap_or_default();
    let value = pool_value(&env, tick, amount0, amount1)?;

    let shares = if pool.total_shares == 0 {
        value
    } else {
        let deviation =
            composition_deviation_bps(&env, amount0, amount1, pool.reserve0, pool.reserve1)?;
        if deviation > tolerance_bps {
            return Err(DexError::PriceSlippageExceeded);
        }

        let current = pool_value(
            &env,
            tick,
            try_add(pool.reserve0, pool.fees0)?,
            try_add(pool.reserve1, pool.fees1)?,
        )?;
        if current == 0 {
            return Err(DexError::InvalidAmount);
        }
        mul_div(&env, value, pool.total_shares, current, Rounding::Down)?
    };

    if shares == 0 {
        return Err(DexError::InvalidAmount);
    }

    pool.reserve0 = try_add(pool.reserve0, amount0)?;
    pool.reserve1 = try_add(pool.reserve1, amount1)?;
    pool.total_shares = try_add(pool.total_shares, shares)?;
    write_pool(store, &pool_id, &pool)?;

    let held = read_shares(store, owner, &pool_id);
    write_shares(store, owner, &pool_id, try_add(held, shares)?);

    Ok(DepositOutcome { pool_id, shares, amount0, amount1 })
}

/// Burn `shares` and pay out the matching slice of both reserves plus the
/// accrued fee income, returned as (amount0, amount1) in pair order.
pub fn withdraw<S: LedgerStore>(
    store: &mut S,
    owner: &Address,
    token_a: &Address,
    token_b: &Address,
    tick: i32,
    fee: u32,
    shares: i128,
) -> Result<(PoolId, i128, i128), DexError> {
    if shares <= 0 {
        return Err(DexError::InvalidAmount);
    }

    let pair = require_pair(store, token_a, token_b)?;
    let pool_id = PoolId { pair_id: pair.id, tick, fee };

    let held = read_shares(store, owner, &pool_id);
    if shares > held {
        return Err(DexError::InsufficientShares);
    }
    let mut pool = read_pool(store, &pool_id).ok_or(DexError::InternalInvariantViolation)?;

    let env = store.env().clone();
    let total = pool.total_shares;
    let reserve0 = mul_div(&env, pool.reserve0, shares, total, Rounding::Down)?;
    let reserve1 = mul_div(&env, pool.reserve1, shares, total, Rounding::Down)?;
    let fees0 = mul_div(&env, pool.fees0, shares, total, Rounding::Down)?;
    let fees1 = mul_div(&env, pool.fees1, shares, total, Rounding::Down)?;

    pool.reserve0 = try_sub(pool.reserve0, reserve0)?;
    pool.reserve1 = try_sub(pool.reserve1, reserve1)?;
    pool.fees0 = try_sub(pool.fees0, fees0)?;
    pool.fees1 = try_sub(pool.fees1, fees1)?;
    pool.total_shares = try_sub(total, shares)?;
    write_pool(store, &pool_id, &pool)?;

    write_shares(store, owner, &pool_id, try_sub(held, shares)?);

    Ok((pool_id, try_add(reserve0, fees0)?, try_add(reserve1, fees1)?))
}

// ============================================================
// TAKER FILLS
// ============================================================

/// Apply one swap step against a pool. `gross` maker token leaves the
/// reserve, `fee` of it moves to the pool's fee income and `charged` taker
/// token enters the other reserve.
pub fn fill_pool<S: LedgerStore>(
    store: &mut S,
    key: &PooledKey,
    gross: i128,
    charged: i128,
    fee: i128,
) -> Result<(), DexError> {
    let pool_id = key.pool_id();
    let mut pool = read_pool(store, &pool_id).ok_or(DexError::InternalInvariantViolation)?;
    if fee > gross {
        return Err(DexError::InternalInvariantViolation);
    }

    match key.side {
        MakerSide::Token0 => {
            pool.reserve0 = try_sub(pool.reserve0, gross)?;
            pool.reserve1 = try_add(pool.reserve1, charged)?;
            pool.fees0 = try_add(pool.fees0, fee)?;
        }
        MakerSide::Token1 => {
            pool.reserve1 = try_sub(pool.reserve1, gross)?;
            pool.reserve0 = try_add(pool.reserve0, charged)?;
            pool.fees1 = try_add(pool.fees1, fee)?;
        }
    }

    write_pool(store, &pool_id, &pool)
}
