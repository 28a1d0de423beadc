#![no_std]

use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

// External packages
use tickbook_ledger::{self as ledger, with_staged, LedgerStore};
use tickbook_math::{price_from_tick, ExactDecimal};
use tickbook_swap as swap;
use tickbook_tick::{PoolId, TrancheKey};

// Local modules
mod error;
mod events;
mod storage;
pub mod types;

pub use error::DexError;
use error::escalate;
use events::*;
use storage::*;
use types::{
    DepositOutcome, DexConfig, LedgerConfig, MakerOrder, OrderTranche, PooledLiquidity,
    ProtocolFees, RouteOutcome, SwapOutcome, TickEntry, TradingPair,
};

#[contract]
pub struct TickbookDex;

#[contractimpl]
impl TickbookDex {
    // ========================================================
    // INITIALIZATION
    // ========================================================

    /// Initialize the ledger
    ///
    /// # Arguments
    /// * `admin` - May toggle fee tiers and collect protocol fees
    /// * `config` - Tick bounds, spacing, fee tiers and swap limits
    pub fn initialize(env: Env, admin: Address, config: LedgerConfig) -> Result<(), DexError> {
        admin.require_auth();

        if is_initialized(&env) {
            return Err(DexError::AlreadyInitialized);
        }
        config.validate()?;

        let config = DexConfig { admin, ledger: config };
        write_config(&env, &config);

        let limits = &config.ledger;
        emit_initialized(&env, &config.admin, limits.min_tick, limits.max_tick, limits.tick_spacing);
        Ok(())
    }

    /// Enable or disable a fee tier for new liquidity.
    /// Existing liquidity at a disabled tier stays tradable.
    pub fn set_fee_tier(env: Env, fee_bps: u32, enabled: bool) -> Result<(), DexError> {
        let mut config = read_config(&env)?;
        config.admin.require_auth();

        config.ledger.set_fee_tier(fee_bps, enabled)?;
        config.ledger.validate()?;
        write_config(&env, &config);

        emit_fee_tier(&env, fee_bps, enabled);
        Ok(())
    }

    // ========================================================
    // POOLED LIQUIDITY
    // ========================================================

    /// Deposit into the pool at (`tick`, `fee`) of the pair
    ///
    /// # Arguments
    /// * `owner` - Receives the minted shares and pays both amounts
    /// * `token_a` / `token_b` - Pair tokens, in any order
    /// * `amount_a` / `amount_b` - Amounts matching `token_a` / `token_b`
    /// * `tolerance_bps` - Allowed deviation from the pool's current mix
    pub fn deposit(
        env: Env,
        owner: Address,
        token_a: Address,
        token_b: Address,
        tick: i32,
        fee_bps: u32,
        amount_a: i128,
        amount_b: i128,
        tolerance_bps: u32,
    ) -> Result<DepositOutcome, DexError> {
        owner.require_auth();
        let config = read_config(&env)?;
        let mut store = ContractStore::new(&env);

        let existed = ledger::find_pair(&store, &token_a, &token_b)?.is_some();
        let outcome = escalate(
            &env,
            with_staged(&mut store, |view| {
                ledger::deposit(
                    view, &config.ledger, &owner, &token_a, &token_b, tick, fee_bps, amount_a,
                    amount_b, tolerance_bps,
                )
            }),
        )?;

        let pair = pair_of(&env, &store, outcome.pool_id.pair_id)?;
        let this = env.current_contract_address();
        transfer(&env, &pair.token0, &owner, &this, outcome.amount0);
        transfer(&env, &pair.token1, &owner, &this, outcome.amount1);

        if !existed {
            emit_pair_created(&env, pair.id, &pair.token0, &pair.token1);
        }
        emit_deposit(&env, &owner, &outcome.pool_id, outcome.shares, outcome.amount0, outcome.amount1);
        Ok(outcome)
    }

    /// Burn `shares` of the pool at (`tick`, `fee`) and pay out both reserves
    /// pro rata. Returns (amount0, amount1) in pair order.
    pub fn withdraw(
        env: Env,
        owner: Address,
        token_a: Address,
        token_b: Address,
        tick: i32,
        fee_bps: u32,
        shares: i128,
    ) -> Result<(i128, i128), DexError> {
        owner.require_auth();
        read_config(&env)?;
        let mut store = ContractStore::new(&env);

        let (pool_id, amount0, amount1) = escalate(
            &env,
            with_staged(&mut store, |view| {
                ledger::withdraw(view, &owner, &token_a, &token_b, tick, fee_bps, shares)
            }),
        )?;

        let pair = pair_of(&env, &store, pool_id.pair_id)?;
        let this = env.current_contract_address();
        transfer(&env, &pair.token0, &this, &owner, amount0);
        transfer(&env, &pair.token1, &this, &owner, amount1);

        emit_withdraw(&env, &owner, &pool_id, shares, amount0, amount1);
        Ok((amount0, amount1))
    }

    // ========================================================
    // LIMIT ORDERS
    // ========================================================

    /// Offer `amount` of `token_in` for `token_out` at `tick`
    pub fn place_limit_order(
        env: Env,
        owner: Address,
        token_in: Address,
        token_out: Address,
        tick: i32,
        fee_bps: u32,
        amount: i128,
    ) -> Result<MakerOrder, DexError> {
        owner.require_auth();
        let config = read_config(&env)?;
        let mut store = ContractStore::new(&env);

        let existed = ledger::find_pair(&store, &token_in, &token_out)?.is_some();
        let order = escalate(
            &env,
            with_staged(&mut store, |view| {
                ledger::place_limit_order(
                    view, &config.ledger, &owner, &token_in, &token_out, tick, fee_bps, amount,
                )
            }),
        )?;

        transfer(&env, &token_in, &owner, &env.current_contract_address(), amount);

        if !existed {
            let pair = pair_of(&env, &store, order.tranche.pair_id)?;
            emit_pair_created(&env, pair.id, &pair.token0, &pair.token1);
        }
        emit_order_placed(&env, &owner, order.id, &order.tranche, amount);
        Ok(order)
    }

    /// Refund the unsold part of an order
    pub fn cancel_order(env: Env, owner: Address, order_id: u64) -> Result<i128, DexError> {
        owner.require_auth();
        read_config(&env)?;
        let mut store = ContractStore::new(&env);

        let tranche = live_tranche(&store, order_id);
        let refund = escalate(
            &env,
            with_staged(&mut store, |view| ledger::cancel_order(view, &owner, order_id)),
        )?;

        let tranche = escalate(&env, tranche.ok_or(DexError::InternalInvariantViolation))?;
        let pair = pair_of(&env, &store, tranche.pair_id)?;
        transfer(&env, &pair.token(tranche.side), &env.current_contract_address(), &owner, refund);

        emit_order_cancelled(&env, &owner, order_id, refund);
        Ok(refund)
    }

    /// Pay out the proceeds an order has earned so far
    pub fn claim_filled(env: Env, owner: Address, order_id: u64) -> Result<i128, DexError> {
        owner.require_auth();
        read_config(&env)?;
        let mut store = ContractStore::new(&env);

        let tranche = live_tranche(&store, order_id);
        let amount = escalate(
            &env,
            with_staged(&mut store, |view| ledger::claim_filled(view, &owner, order_id)),
        )?;

        let tranche = escalate(&env, tranche.ok_or(DexError::InternalInvariantViolation))?;
        let pair = pair_of(&env, &store, tranche.pair_id)?;
        let proceeds_token = pair.token(tranche.side.opposite());
        transfer(&env, &proceeds_token, &env.current_contract_address(), &owner, amount);

        emit_claim(&env, &owner, order_id, amount);
        Ok(amount)
    }

    // ========================================================
    // SWAPS
    // ========================================================

    /// Swap `token_in` for `token_out`, best price first
    ///
    /// # Arguments
    /// * `amount_in` - Most input to spend
    /// * `min_out` - Fails with SlippageExceeded below this output
    /// * `limit_tick` - Stop before liquidity priced beyond this tick
    /// * `require_full` - Fail instead of leaving input unspent
    pub fn swap(
        env: Env,
        sender: Address,
        token_in: Address,
        token_out: Address,
        amount_in: i128,
        min_out: i128,
        limit_tick: Option<i32>,
        require_full: bool,
    ) -> Result<SwapOutcome, DexError> {
        sender.require_auth();
        let config = read_config(&env)?;
        let mut store = ContractStore::new(&env);

        let outcome = escalate(
            &env,
            with_staged(&mut store, |view| {
                let outcome = swap::execute_swap(
                    view, &config.ledger, &token_in, &token_out, amount_in, limit_tick, require_full,
                )?;
                if outcome.amount_out < min_out {
                    return Err(DexError::SlippageExceeded);
                }
                Ok(outcome)
            }),
        )?;

        let this = env.current_contract_address();
        transfer(&env, &token_in, &sender, &this, outcome.amount_in);
        transfer(&env, &token_out, &this, &sender, outcome.amount_out);

        emit_swap(&env, &sender, &token_in, &token_out, outcome.amount_in, outcome.amount_out, outcome.fees);
        Ok(outcome)
    }

    /// Swap along `route`, spending all of `amount_in` on every hop
    pub fn multi_hop_swap(
        env: Env,
        sender: Address,
        route: Vec<Address>,
        amount_in: i128,
        min_out: i128,
    ) -> Result<RouteOutcome, DexError> {
        sender.require_auth();
        let config = read_config(&env)?;
        let mut store = ContractStore::new(&env);

        let outcome = escalate(
            &env,
            with_staged(&mut store, |view| {
                swap::multi_hop_swap(view, &config.ledger, &route, amount_in, min_out)
            }),
        )?;

        let first = route.first().ok_or(DexError::InvalidRoute)?;
        let last = route.last().ok_or(DexError::InvalidRoute)?;
        let this = env.current_contract_address();
        transfer(&env, &first, &sender, &this, outcome.amount_in);
        transfer(&env, &last, &this, &sender, outcome.amount_out);

        emit_multi_hop(&env, &sender, outcome.hops.len(), outcome.amount_in, outcome.amount_out);
        Ok(outcome)
    }

    // ========================================================
    // PROTOCOL FEES
    // ========================================================

    /// Send the pair's accrued protocol fees to `to`
    pub fn collect_protocol_fees(
        env: Env,
        token_a: Address,
        token_b: Address,
        to: Address,
    ) -> Result<ProtocolFees, DexError> {
        let config = read_config(&env)?;
        config.admin.require_auth();
        let mut store = ContractStore::new(&env);

        let pair = ledger::require_pair(&store, &token_a, &token_b)?;
        let fees = ledger::take_protocol_fees(&mut store, pair.id);

        let this = env.current_contract_address();
        transfer(&env, &pair.token0, &this, &to, fees.token0);
        transfer(&env, &pair.token1, &this, &to, fees.token1);

        emit_fees_collected(&env, pair.id, &to, fees.token0, fees.token1);
        Ok(fees)
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn is_initialized(env: Env) -> bool {
        is_initialized(&env)
    }

    pub fn get_config(env: Env) -> Result<DexConfig, DexError> {
        read_config(&env)
    }

    pub fn get_pair(env: Env, token_a: Address, token_b: Address) -> Result<Option<TradingPair>, DexError> {
        ledger::find_pair(&ContractStore::new(&env), &token_a, &token_b)
    }

    pub fn get_pool(
        env: Env,
        token_a: Address,
        token_b: Address,
        tick: i32,
        fee_bps: u32,
    ) -> Result<Option<PooledLiquidity>, DexError> {
        let store = ContractStore::new(&env);
        let Some(pair) = ledger::find_pair(&store, &token_a, &token_b)? else {
            return Ok(None);
        };
        Ok(ledger::read_pool(&store, &PoolId { pair_id: pair.id, tick, fee: fee_bps }))
    }

    /// Pool shares held by `owner`
    pub fn get_shares(
        env: Env,
        owner: Address,
        token_a: Address,
        token_b: Address,
        tick: i32,
        fee_bps: u32,
    ) -> Result<i128, DexError> {
        let store = ContractStore::new(&env);
        let Some(pair) = ledger::find_pair(&store, &token_a, &token_b)? else {
            return Ok(0);
        };
        Ok(ledger::read_shares(&store, &owner, &PoolId { pair_id: pair.id, tick, fee: fee_bps }))
    }

    pub fn get_tranche(env: Env, key: TrancheKey) -> Option<OrderTranche> {
        ledger::read_tranche(&ContractStore::new(&env), &key)
    }

    pub fn get_order(env: Env, order_id: u64) -> Result<MakerOrder, DexError> {
        ledger::read_order(&ContractStore::new(&env), order_id)
    }

    /// Proceeds the order could claim right now
    pub fn claimable(env: Env, order_id: u64) -> Result<i128, DexError> {
        ledger::claimable(&ContractStore::new(&env), order_id)
    }

    /// Part of the order still offered for sale
    pub fn unfilled(env: Env, order_id: u64) -> Result<i128, DexError> {
        ledger::unfilled(&ContractStore::new(&env), order_id)
    }

    /// Liquidity offering `sell_token`, best price first
    pub fn list_ticks(
        env: Env,
        token_a: Address,
        token_b: Address,
        sell_token: Address,
    ) -> Result<Vec<TickEntry>, DexError> {
        let store = ContractStore::new(&env);
        let pair = ledger::require_pair(&store, &token_a, &token_b)?;
        let side = pair.side_offering(&sell_token)?;
        ledger::list_entries(&store, pair.id, side)
    }

    /// Simulate `swap` without moving tokens or touching the ledger
    pub fn estimate_swap(
        env: Env,
        token_in: Address,
        token_out: Address,
        amount_in: i128,
        limit_tick: Option<i32>,
    ) -> Result<SwapOutcome, DexError> {
        let config = read_config(&env)?;
        let mut store = ContractStore::new(&env);
        swap::quote_swap(&mut store, &config.ledger, &token_in, &token_out, amount_in, limit_tick)
    }

    /// Simulate `multi_hop_swap` without moving tokens or touching the ledger
    pub fn estimate_multi_hop(env: Env, route: Vec<Address>, amount_in: i128) -> Result<RouteOutcome, DexError> {
        let config = read_config(&env)?;
        let mut store = ContractStore::new(&env);
        swap::quote_multi_hop(&mut store, &config.ledger, &route, amount_in)
    }

    /// Token1 value of one unit of token0 at `tick`
    pub fn price_at_tick(_env: Env, tick: i32) -> Result<ExactDecimal, DexError> {
        price_from_tick(tick)
    }

    /// Largest tick whose price does not exceed `price`
    pub fn tick_for_price(_env: Env, price: ExactDecimal) -> Result<i32, DexError> {
        tickbook_math::tick_for_price(&price)
    }

    pub fn get_protocol_fees(env: Env, token_a: Address, token_b: Address) -> Result<ProtocolFees, DexError> {
        let store = ContractStore::new(&env);
        let pair = ledger::require_pair(&store, &token_a, &token_b)?;
        Ok(ledger::read_protocol_fees(&store, pair.id))
    }
}

// ============================================================
// INTERNAL HELPERS
// ============================================================

/// Move `amount` of `token` between two accounts, skipping empty transfers
fn transfer(env: &Env, token: &Address, from: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(env, token).transfer(from, to, &amount);
    }
}

/// Pair referenced by a record the ledger just wrote
fn pair_of<S: LedgerStore>(env: &Env, store: &S, pair_id: u32) -> Result<TradingPair, DexError> {
    escalate(env, ledger::pair_by_id(store, pair_id).ok_or(DexError::InternalInvariantViolation))
}

/// Tranche of an order still on the books. Missing and retired orders
/// yield None and are reported by the ledger call that follows.
fn live_tranche<S: LedgerStore>(store: &S, order_id: u64) -> Option<TrancheKey> {
    ledger::read_order(store, order_id).ok().map(|order| order.tranche)
}
