// Tick Types

use soroban_sdk::contracttype;

/// Which token a liquidity entry offers to takers
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MakerSide {
    /// Offers token0, consumed by takers paying token1
    Token0 = 0,
    /// Offers token1, consumed by takers paying token0
    Token1 = 1,
}

impl MakerSide {
    /// Side consumed by a taker paying the given token
    #[inline]
    pub fn for_taker(pays_token0: bool) -> Self {
        if pays_token0 {
            MakerSide::Token1
        } else {
            MakerSide::Token0
        }
    }

    #[inline]
    pub fn opposite(&self) -> Self {
        match self {
            MakerSide::Token0 => MakerSide::Token1,
            MakerSide::Token1 => MakerSide::Token0,
        }
    }

    #[inline]
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(MakerSide::Token0),
            1 => Some(MakerSide::Token1),
            _ => None,
        }
    }
}

/// Kind discriminator written into encoded keys
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LiquidityKind {
    Pooled = 0,
    Tranche = 1,
}

impl LiquidityKind {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(LiquidityKind::Pooled),
            1 => Some(LiquidityKind::Tranche),
            _ => None,
        }
    }
}

/// Identifies one pooled-liquidity record (both sides share it)
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct PoolId {
    pub pair_id: u32,
    pub tick: i32,
    pub fee: u32,
}

impl PoolId {
    /// Index key of this pool's `side`
    #[inline]
    pub fn side_key(&self, side: MakerSide) -> PooledKey {
        PooledKey { pair_id: self.pair_id, side, tick: self.tick, fee: self.fee }
    }
}

/// Pooled liquidity seen from one maker side
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PooledKey {
    pub pair_id: u32,
    pub side: MakerSide,
    pub tick: i32,
    pub fee: u32,
}

impl PooledKey {
    #[inline]
    pub fn pool_id(&self) -> PoolId {
        PoolId { pair_id: self.pair_id, tick: self.tick, fee: self.fee }
    }
}

/// One order tranche: makers that joined a tick before its first fill
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TrancheKey {
    pub pair_id: u32,
    pub side: MakerSide,
    pub tick: i32,
    pub fee: u32,
    pub seq: u64,
}

/// Any entry of the liquidity index
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickLiquidityKey {
    Pooled(PooledKey),
    Tranche(TrancheKey),
}
