use soroban_sdk::{contracttype, Address, Env, Vec};
use tickbook_math::{
    DexError, TickBounds, DEFAULT_FEE_TIERS, DEFAULT_MAX_BUCKET_ENTRIES, DEFAULT_MAX_ROUTE_HOPS,
    DEFAULT_MAX_SWAP_TICKS, MAX_BUCKET_ENTRIES, MAX_FEE_BPS, MAX_SWAP_ITERATIONS, MAX_TICK,
    MIN_TICK,
};
use tickbook_tick::{MakerSide, PoolId, TickLiquidityKey, TrancheKey};

// ============================================================
// PAIRS
// ============================================================

/// Canonical pair of assets, `token0 < token1`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TradingPair {
    pub id: u32,
    pub token0: Address,
    pub token1: Address,
}

impl TradingPair {
    /// Token offered by liquidity on `side`
    pub fn token(&self, side: MakerSide) -> Address {
        match side {
            MakerSide::Token0 => self.token0.clone(),
            MakerSide::Token1 => self.token1.clone(),
        }
    }

    /// Side whose liquidity offers `token`
    pub fn side_offering(&self, token: &Address) -> Result<MakerSide, DexError> {
        if *token == self.token0 {
            Ok(MakerSide::Token0)
        } else if *token == self.token1 {
            Ok(MakerSide::Token1)
        } else {
            Err(DexError::InvalidToken)
        }
    }
}

// ============================================================
// LIQUIDITY RECORDS
// ============================================================

/// Constant-price pool at one tick and fee tier
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PooledLiquidity {
    pub reserve0: i128,
    pub reserve1: i128,
    pub total_shares: i128,
    /// Token0 fee income, owned by the shares but not for sale
    pub fees0: i128,
    /// Token1 fee income, owned by the shares but not for sale
    pub fees1: i128,
}

impl PooledLiquidity {
    #[inline]
    pub fn reserve(&self, side: MakerSide) -> i128 {
        match side {
            MakerSide::Token0 => self.reserve0,
            MakerSide::Token1 => self.reserve1,
        }
    }
}

/// Makers that joined a tick before its first fill
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderTranche {
    /// Maker token ever placed into the tranche
    pub deposited: i128,
    /// Maker token sold to takers (gross of fees)
    pub filled: i128,
    /// Maker token returned to cancelling makers
    pub cancelled: i128,
    /// Maker token still for sale
    pub reserves_maker: i128,
    /// Taker token received over the tranche's life
    pub proceeds: i128,
    /// Taker token paid out to makers
    pub withdrawn: i128,
    /// Sum of order amounts not yet cancelled
    pub live_shares: i128,
    /// Proceeds attributable to live shares
    pub live_proceeds: i128,
    /// Maker orders still referencing the tranche
    pub orders: u32,
}

/// Receipt handed to a maker for one placement
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MakerOrder {
    pub id: u64,
    pub owner: Address,
    pub tranche: TrancheKey,
    pub amount: i128,
    pub tranche_deposited_at_placement: i128,
    pub tranche_filled_at_placement: i128,
    /// Proceeds frozen at cancellation
    pub settled: i128,
    pub claimed: i128,
    pub cancelled: bool,
}

/// Fees and rounding dust owed to the protocol, per pair
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProtocolFees {
    pub token0: i128,
    pub token1: i128,
}

impl ProtocolFees {
    pub fn add(&mut self, side: MakerSide, amount: i128) -> Result<(), DexError> {
        match side {
            MakerSide::Token0 => self.token0 = tickbook_math::try_add(self.token0, amount)?,
            MakerSide::Token1 => self.token1 = tickbook_math::try_add(self.token1, amount)?,
        }
        Ok(())
    }
}

// ============================================================
// OPERATION RESULTS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositOutcome {
    pub pool_id: PoolId,
    pub shares: i128,
    pub amount0: i128,
    pub amount1: i128,
}

/// One live entry of a side's liquidity index
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickEntry {
    pub key: TickLiquidityKey,
    /// Maker token available at the entry's price
    pub available: i128,
}

// ============================================================
// CONFIGURATION
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    pub min_tick: i32,
    pub max_tick: i32,
    pub tick_spacing: u32,
    /// Enabled fee tiers in basis points
    pub fee_tiers: Vec<u32>,
    /// Liquidity entries a single swap may visit
    pub max_swap_ticks: u32,
    /// Hops a multi-hop route may contain
    pub max_route_hops: u32,
    /// Live entries one index bucket accepts before new ones are refused
    pub max_bucket_entries: u32,
}

impl LedgerConfig {
    pub fn with_defaults(env: &Env) -> Self {
        Self {
            min_tick: MIN_TICK,
            max_tick: MAX_TICK,
            tick_spacing: 1,
            fee_tiers: Vec::from_array(env, DEFAULT_FEE_TIERS),
            max_swap_ticks: DEFAULT_MAX_SWAP_TICKS,
            max_route_hops: DEFAULT_MAX_ROUTE_HOPS,
            max_bucket_entries: DEFAULT_MAX_BUCKET_ENTRIES,
        }
    }

    pub fn validate(&self) -> Result<(), DexError> {
        self.bounds()?;

        if self.max_swap_ticks == 0 || self.max_swap_ticks > MAX_SWAP_ITERATIONS {
            return Err(DexError::InvalidConfig);
        }
        if self.max_route_hops == 0 {
            return Err(DexError::InvalidConfig);
        }
        if self.max_bucket_entries == 0 || self.max_bucket_entries > MAX_BUCKET_ENTRIES {
            return Err(DexError::InvalidConfig);
        }

        for (i, fee) in self.fee_tiers.iter().enumerate() {
            if fee > MAX_FEE_BPS {
                return Err(DexError::InvalidConfig);
            }
            if self.fee_tiers.iter().skip(i + 1).any(|other| other == fee) {
                return Err(DexError::InvalidConfig);
            }
        }

        Ok(())
    }

    #[inline]
    pub fn bounds(&self) -> Result<TickBounds, DexError> {
        TickBounds::new(self.min_tick, self.max_tick, self.tick_spacing)
    }

    /// Tick usable for new liquidity
    pub fn check_tick(&self, tick: i32) -> Result<(), DexError> {
        self.bounds()?.check(tick)
    }

    pub fn check_fee(&self, fee: u32) -> Result<(), DexError> {
        if self.fee_tiers.contains(fee) {
            Ok(())
        } else {
            Err(DexError::InvalidFeeTier)
        }
    }

    /// Enable or disable a fee tier
    pub fn set_fee_tier(&mut self, fee: u32, enabled: bool) -> Result<(), DexError> {
        if fee > MAX_FEE_BPS {
            return Err(DexError::InvalidConfig);
        }
        match (self.fee_tiers.first_index_of(fee), enabled) {
            (None, true) => self.fee_tiers.push_back(fee),
            (Some(i), false) => {
                self.fee_tiers.remove(i);
            }
            _ => {}
        }
        Ok(())
    }
}
