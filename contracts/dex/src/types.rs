// DEX Types - Using types from packages

use soroban_sdk::{contracttype, Address};

// Re-export types from packages
pub use tickbook_ledger::{
    DepositOutcome, LedgerConfig, MakerOrder, OrderTranche, PooledLiquidity, ProtocolFees,
    TickEntry, TradingPair,
};
pub use tickbook_math::ExactDecimal;
pub use tickbook_swap::{RouteOutcome, SwapOutcome};
pub use tickbook_tick::{MakerSide, PoolId, TickLiquidityKey, TrancheKey};

// ============================================================
// CONTRACT CONFIGURATION
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DexConfig {
    /// May toggle fee tiers and collect protocol fees
    pub admin: Address,
    /// Limits threaded into every ledger operation
    pub ledger: LedgerConfig,
}
