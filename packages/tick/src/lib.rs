#![no_std]

pub mod key;
pub mod types;

pub use key::{ordered_tick, POOLED_KEY_LEN, TRANCHE_KEY_LEN};
pub use types::{LiquidityKind, MakerSide, PoolId, PooledKey, TickLiquidityKey, TrancheKey};
