// Limit orders grouped into tranches
//
// Makers placing at the same (pair, side, tick, fee) before the first fill
// share one tranche. Fills only touch the tranche totals; each maker's
// entitlement is derived from those totals when it is read, so a swap costs
// the same no matter how many makers sit behind a tick.

use soroban_sdk::Address;
use tickbook_math::{mul_div, try_add, try_sub, DexError, Rounding};
use tickbook_tick::{TickLiquidityKey, TrancheKey};

use crate::fees::accrue_protocol_fee;
use crate::index::{check_bucket_room, sync_entry};
use crate::invariants::{check_order, check_tranche};
use crate::pair::get_or_create_pair;
use crate::store::{next_counter, LedgerKey, LedgerStore};
use crate::types::{LedgerConfig, MakerOrder, OrderTranche};

// ============================================================
// READS
// ============================================================

pub fn read_tranche<S: LedgerStore>(store: &S, key: &TrancheKey) -> Option<OrderTranche> {
    store.get(&LedgerKey::Tranche(*key))
}

pub fn read_order<S: LedgerStore>(store: &S, order_id: u64) -> Result<MakerOrder, DexError> {
    store
        .get(&LedgerKey::Order(order_id))
        .ok_or(DexError::OrderNotFound)
}

fn open_pointer(key: &TrancheKey) -> LedgerKey {
    LedgerKey::OpenTranche(key.pair_id, key.side, key.tick, key.fee)
}

/// Proceeds the order is entitled to over its lifetime so far
fn accrued(store: &impl LedgerStore, order: &MakerOrder, tranche: &OrderTranche) -> Result<i128, DexError> {
    if order.cancelled {
        return Ok(order.settled);
    }
    if tranche.live_shares == 0 {
        return Err(DexError::InternalInvariantViolation);
    }
    mul_div(store.env(), tranche.live_proceeds, order.amount, tranche.live_shares, Rounding::Down)
}

/// Maker token of the order still for sale
fn unfilled_share(store: &impl LedgerStore, order: &MakerOrder, tranche: &OrderTranche) -> Result<i128, DexError> {
    if order.cancelled {
        return Ok(0);
    }
    if tranche.live_shares == 0 {
        return Err(DexError::InternalInvariantViolation);
    }
    mul_div(store.env(), tranche.reserves_maker, order.amount, tranche.live_shares, Rounding::Down)
}

fn load<S: LedgerStore>(store: &S, order_id: u64) -> Result<(MakerOrder, OrderTranche), DexError> {
    let order = read_order(store, order_id)?;
    let tranche = read_tranche(store, &order.tranche).ok_or(DexError::InternalInvariantViolation)?;
    Ok((order, tranche))
}

/// Order ids are handed out in sequence, so a missing id below the
/// counter belongs to an order that was settled and retired.
fn was_issued<S: LedgerStore>(store: &S, order_id: u64) -> bool {
    order_id < store.get::<u64>(&LedgerKey::NextOrderId).unwrap_or(0)
}

/// Like `load`, but reports a retired order as `retired` instead of missing
fn load_live<S: LedgerStore>(
    store: &S,
    order_id: u64,
    retired: DexError,
) -> Result<(MakerOrder, OrderTranche), DexError> {
    match load(store, order_id) {
        Err(DexError::OrderNotFound) if was_issued(store, order_id) => Err(retired),
        other => other,
    }
}

/// Taker token the order can claim right now
pub fn claimable<S: LedgerStore>(store: &S, order_id: u64) -> Result<i128, DexError> {
    match load_live(store, order_id, DexError::NothingToClaim) {
        Ok((order, tranche)) => try_sub(accrued(store, &order, &tranche)?, order.claimed),
        Err(DexError::NothingToClaim) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Maker token the order would get back if cancelled now
pub fn unfilled<S: LedgerStore>(store: &S, order_id: u64) -> Result<i128, DexError> {
    match load_live(store, order_id, DexError::OrderFullyFilled) {
        Ok((order, tranche)) => unfilled_share(store, &order, &tranche),
        Err(DexError::OrderFullyFilled) => Ok(0),
        Err(e) => Err(e),
    }
}

// ============================================================
// WRITES
// ============================================================

fn write_tranche<S: LedgerStore>(
    store: &mut S,
    key: &TrancheKey,
    tranche: &OrderTranche,
) -> Result<(), DexError> {
    check_tranche(tranche)?;
    store.set(&LedgerKey::Tranche(*key), tranche);
    sync_entry(store, &TickLiquidityKey::Tranche(*key), tranche.reserves_maker)
}

fn write_order<S: LedgerStore>(store: &mut S, order: &MakerOrder) -> Result<(), DexError> {
    check_order(order)?;
    store.set(&LedgerKey::Order(order.id), order);
    Ok(())
}

/// Stop routing new makers into the tranche
fn seal<S: LedgerStore>(store: &mut S, key: &TrancheKey) {
    let pointer = open_pointer(key);
    if store.get::<u64>(&pointer) == Some(key.seq) {
        store.remove(&pointer);
    }
}

/// Delete a tranche nobody references any more. Whatever rounding left
/// behind goes to the protocol.
fn close_tranche<S: LedgerStore>(
    store: &mut S,
    key: &TrancheKey,
    tranche: &OrderTranche,
) -> Result<(), DexError> {
    let unclaimed = try_sub(tranche.proceeds, tranche.withdrawn)?;
    accrue_protocol_fee(store, key.pair_id, key.side.opposite(), unclaimed)?;
    accrue_protocol_fee(store, key.pair_id, key.side, tranche.reserves_maker)?;

    seal(store, key);
    store.remove(&LedgerKey::Tranche(*key));
    sync_entry(store, &TickLiquidityKey::Tranche(*key), 0)
}

/// Drop a finished order and the tranche too if it was the last one
fn retire_order<S: LedgerStore>(
    store: &mut S,
    order: &MakerOrder,
    mut tranche: OrderTranche,
) -> Result<(), DexError> {
    store.remove(&LedgerKey::Order(order.id));
    tranche.orders = tranche
        .orders
        .checked_sub(1)
        .ok_or(DexError::InternalInvariantViolation)?;

    if tranche.orders == 0 {
        check_tranche(&tranche)?;
        close_tranche(store, &order.tranche, &tranche)
    } else {
        write_tranche(store, &order.tranche, &tranche)
    }
}

// ============================================================
// MAKER OPERATIONS
// ============================================================

/// Offer `amount` of `token_in` for `token_out` at `tick`.
///
/// Joins the tick's open tranche when it has not been filled yet,
/// otherwise opens a new one, which needs room in its index bucket.
pub fn place_limit_order<S: LedgerStore>(
    store: &mut S,
    config: &LedgerConfig,
    owner: &Address,
    token_in: &Address,
    token_out: &Address,
    tick: i32,
    fee: u32,
    amount: i128,
) -> Result<MakerOrder, DexError> {
    if amount <= 0 {
        return Err(DexError::InvalidAmount);
    }
    config.check_tick(tick)?;
    config.check_fee(fee)?;

    let (pair, _) = get_or_create_pair(store, token_in, token_out)?;
    let side = pair.side_offering(token_in)?;

    let pointer = LedgerKey::OpenTranche(pair.id, side, tick, fee);
    let open = store
        .get::<u64>(&pointer)
        .map(|seq| TrancheKey { pair_id: pair.id, side, tick, fee, seq })
        .and_then(|key| read_tranche(store, &key).map(|tranche| (key, tranche)))
        .filter(|(_, tranche)| tranche.filled == 0);

    let (key, mut tranche) = match open {
        Some(found) => found,
        None => {
            let seq = next_counter(store, &LedgerKey::NextTrancheSeq)?;
            let key = TrancheKey { pair_id: pair.id, side, tick, fee, seq };
            check_bucket_room(store, config, &TickLiquidityKey::Tranche(key))?;
            store.set(&pointer, &seq);
            (key, OrderTranche::default())
        }
    };

    let order = MakerOrder {
        id: next_counter(store, &LedgerKey::NextOrderId)?,
        owner: owner.clone(),
        tranche: key,
        amount,
        tranche_deposited_at_placement: tranche.deposited,
        tranche_filled_at_placement: tranche.filled,
        settled: 0,
        claimed: 0,
        cancelled: false,
    };

    tranche.deposited = try_add(tranche.deposited, amount)?;
    tranche.reserves_maker = try_add(tranche.reserves_maker, amount)?;
    tranche.live_shares = try_add(tranche.live_shares, amount)?;
    tranche.orders = tranche.orders.checked_add(1).ok_or(DexError::Overflow)?;

    write_tranche(store, &key, &tranche)?;
    write_order(store, &order)?;

    Ok(order)
}

/// Withdraw the order's unsold remainder. Proceeds earned up to now stay
/// claimable.
pub fn cancel_order<S: LedgerStore>(
    store: &mut S,
    owner: &Address,
    order_id: u64,
) -> Result<i128, DexError> {
    let (mut order, mut tranche) = load_live(store, order_id, DexError::OrderFullyFilled)?;
    if order.owner != *owner {
        return Err(DexError::Unauthorized);
    }
    if order.cancelled {
        return Err(DexError::OrderFullyFilled);
    }

    let refund = unfilled_share(store, &order, &tranche)?;
    if refund == 0 {
        return Err(DexError::OrderFullyFilled);
    }
    let settled = accrued(store, &order, &tranche)?;

    tranche.live_proceeds = try_sub(tranche.live_proceeds, settled)?;
    tranche.live_shares = try_sub(tranche.live_shares, order.amount)?;
    tranche.cancelled = try_add(tranche.cancelled, refund)?;
    tranche.reserves_maker = try_sub(tranche.reserves_maker, refund)?;

    order.cancelled = true;
    order.settled = settled;

    if order.claimed == order.settled {
        retire_order(store, &order, tranche)?;
    } else {
        write_order(store, &order)?;
        write_tranche(store, &order.tranche, &tranche)?;
    }

    Ok(refund)
}

/// Pay out the order's filled proceeds not yet claimed
pub fn claim_filled<S: LedgerStore>(
    store: &mut S,
    owner: &Address,
    order_id: u64,
) -> Result<i128, DexError> {
    let (mut order, mut tranche) = load_live(store, order_id, DexError::NothingToClaim)?;
    if order.owner != *owner {
        return Err(DexError::Unauthorized);
    }

    let amount = try_sub(accrued(store, &order, &tranche)?, order.claimed)?;
    if amount <= 0 {
        return Err(DexError::NothingToClaim);
    }

    order.claimed = try_add(order.claimed, amount)?;
    tranche.withdrawn = try_add(tranche.withdrawn, amount)?;

    let finished = order.cancelled || unfilled_share(store, &order, &tranche)? == 0;
    if finished {
        retire_order(store, &order, tranche)?;
    } else {
        write_order(store, &order)?;
        write_tranche(store, &order.tranche, &tranche)?;
    }

    Ok(amount)
}

// ============================================================
// TAKER FILLS
// ============================================================

/// Apply one swap step against a tranche. `gross` maker token is sold,
/// `charged` taker token credited to the makers, `fee` goes to the protocol.
pub fn fill_tranche<S: LedgerStore>(
    store: &mut S,
    key: &TrancheKey,
    gross: i128,
    charged: i128,
    fee: i128,
) -> Result<(), DexError> {
    let mut tranche = read_tranche(store, key).ok_or(DexError::InternalInvariantViolation)?;

    tranche.filled = try_add(tranche.filled, gross)?;
    tranche.reserves_maker = try_sub(tranche.reserves_maker, gross)?;
    tranche.proceeds = try_add(tranche.proceeds, charged)?;
    tranche.live_proceeds = try_add(tranche.live_proceeds, charged)?;

    seal(store, key);
    accrue_protocol_fee(store, key.pair_id, key.side, fee)?;
    write_tranche(store, key, &tranche)
}
