use soroban_sdk::{Address, Env, Symbol};
use tickbook_tick::{PoolId, TrancheKey};

// ============================================================
// EVENT NAMES
// ============================================================

/// Event name constants
pub struct EventName;

impl EventName {
    pub fn initialized(env: &Env) -> Symbol {
        Symbol::new(env, "initialized")
    }

    pub fn fee_tier(env: &Env) -> Symbol {
        Symbol::new(env, "fee_tier")
    }

    pub fn pair_created(env: &Env) -> Symbol {
        Symbol::new(env, "new_pair")
    }

    pub fn deposit(env: &Env) -> Symbol {
        Symbol::new(env, "deposit")
    }

    pub fn withdraw(env: &Env) -> Symbol {
        Symbol::new(env, "withdraw")
    }

    pub fn order_placed(env: &Env) -> Symbol {
        Symbol::new(env, "place")
    }

    pub fn order_cancelled(env: &Env) -> Symbol {
        Symbol::new(env, "cancel")
    }

    pub fn claim(env: &Env) -> Symbol {
        Symbol::new(env, "claim")
    }

    pub fn swap(env: &Env) -> Symbol {
        Symbol::new(env, "swap")
    }

    pub fn multi_hop(env: &Env) -> Symbol {
        Symbol::new(env, "multi_hop")
    }

    pub fn collect_fees(env: &Env) -> Symbol {
        Symbol::new(env, "collect")
    }
}

// ============================================================
// EVENT EMITTERS
// ============================================================

/// Emit contract initialized event
pub fn emit_initialized(env: &Env, admin: &Address, min_tick: i32, max_tick: i32, tick_spacing: u32) {
    env.events().publish(
        (EventName::initialized(env),),
        (admin.clone(), min_tick, max_tick, tick_spacing),
    );
}

/// Emit fee tier toggle event
pub fn emit_fee_tier(env: &Env, fee_bps: u32, enabled: bool) {
    env.events().publish((EventName::fee_tier(env),), (fee_bps, enabled));
}

/// Emit pair registration event
pub fn emit_pair_created(env: &Env, pair_id: u32, token0: &Address, token1: &Address) {
    env.events().publish(
        (EventName::pair_created(env), pair_id),
        (token0.clone(), token1.clone()),
    );
}

/// Emit pool deposit event
pub fn emit_deposit(env: &Env, owner: &Address, pool_id: &PoolId, shares: i128, amount0: i128, amount1: i128) {
    env.events().publish(
        (EventName::deposit(env), owner.clone()),
        (*pool_id, shares, amount0, amount1),
    );
}

/// Emit pool withdrawal event
pub fn emit_withdraw(env: &Env, owner: &Address, pool_id: &PoolId, shares: i128, amount0: i128, amount1: i128) {
    env.events().publish(
        (EventName::withdraw(env), owner.clone()),
        (*pool_id, shares, amount0, amount1),
    );
}

/// Emit limit order placement event
pub fn emit_order_placed(env: &Env, owner: &Address, order_id: u64, tranche: &TrancheKey, amount: i128) {
    env.events().publish(
        (EventName::order_placed(env), owner.clone()),
        (order_id, *tranche, amount),
    );
}

/// Emit limit order cancellation event
pub fn emit_order_cancelled(env: &Env, owner: &Address, order_id: u64, refund: i128) {
    env.events().publish(
        (EventName::order_cancelled(env), owner.clone()),
        (order_id, refund),
    );
}

/// Emit filled proceeds claim event
pub fn emit_claim(env: &Env, owner: &Address, order_id: u64, amount: i128) {
    env.events().publish((EventName::claim(env), owner.clone()), (order_id, amount));
}

/// Emit swap event
pub fn emit_swap(
    env: &Env,
    sender: &Address,
    token_in: &Address,
    token_out: &Address,
    amount_in: i128,
    amount_out: i128,
    fees: i128,
) {
    env.events().publish(
        (EventName::swap(env), sender.clone()),
        (token_in.clone(), token_out.clone(), amount_in, amount_out, fees),
    );
}

/// Emit multi-hop swap event
pub fn emit_multi_hop(env: &Env, sender: &Address, hops: u32, amount_in: i128, amount_out: i128) {
    env.events().publish(
        (EventName::multi_hop(env), sender.clone()),
        (hops, amount_in, amount_out),
    );
}

/// Emit protocol fee collection event
pub fn emit_fees_collected(env: &Env, pair_id: u32, to: &Address, amount0: i128, amount1: i128) {
    env.events().publish(
        (EventName::collect_fees(env), pair_id),
        (to.clone(), amount0, amount1),
    );
}
