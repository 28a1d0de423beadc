// Record invariants, checked before every write
//
// A failure here means the ledger itself is inconsistent. Callers must not
// treat InternalInvariantViolation as a rejected request.

use tickbook_math::DexError;

use crate::types::{MakerOrder, OrderTranche, PooledLiquidity};

fn ensure(condition: bool) -> Result<(), DexError> {
    if condition {
        Ok(())
    } else {
        Err(DexError::InternalInvariantViolation)
    }
}

pub fn check_pool(pool: &PooledLiquidity) -> Result<(), DexError> {
    ensure(pool.reserve0 >= 0 && pool.reserve1 >= 0)?;
    ensure(pool.total_shares >= 0 && pool.fees0 >= 0 && pool.fees1 >= 0)?;
    ensure((pool.total_shares == 0) == (pool.reserve0 == 0 && pool.reserve1 == 0))?;
    ensure(pool.total_shares > 0 || (pool.fees0 == 0 && pool.fees1 == 0))
}

pub fn check_tranche(tranche: &OrderTranche) -> Result<(), DexError> {
    ensure(
        tranche.deposited >= 0
            && tranche.filled >= 0
            && tranche.cancelled >= 0
            && tranche.reserves_maker >= 0
            && tranche.proceeds >= 0
            && tranche.withdrawn >= 0
            && tranche.live_shares >= 0
            && tranche.live_proceeds >= 0,
    )?;
    ensure(tranche.filled <= tranche.deposited)?;

    let accounted = tranche
        .filled
        .checked_add(tranche.cancelled)
        .and_then(|v| v.checked_add(tranche.reserves_maker))
        .ok_or(DexError::InternalInvariantViolation)?;
    ensure(accounted == tranche.deposited)?;

    ensure(tranche.withdrawn <= tranche.proceeds)?;
    ensure(tranche.live_proceeds <= tranche.proceeds)?;
    ensure(tranche.live_shares <= tranche.deposited)
}

pub fn check_order(order: &MakerOrder) -> Result<(), DexError> {
    ensure(order.amount > 0 && order.claimed >= 0 && order.settled >= 0)?;
    ensure(!order.cancelled || order.claimed <= order.settled)
}
