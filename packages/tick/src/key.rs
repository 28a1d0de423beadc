// SPDX-License-Identifier: MIT
// Canonical byte encoding of liquidity keys
//
// Layout (big endian):
//   pair_id u32 | side u8 | ordered_tick u32 | fee u32 | kind u8 [| seq u64]
//
// ordered_tick maps the tick so that ascending bytes are ascending price
// for token0 makers and descending price for token1 makers. Either way the
// first key of a side's index is the best price for the taker.

use soroban_sdk::{Bytes, Env};
use tickbook_math::{price_from_tick, DexError, ExactDecimal, MAX_FEE_BPS, MAX_TICK, MIN_TICK};

use crate::types::{LiquidityKind, MakerSide, PooledKey, TickLiquidityKey, TrancheKey};

/// Encoded length of a pooled key
pub const POOLED_KEY_LEN: u32 = 14;

/// Encoded length of a tranche key
pub const TRANCHE_KEY_LEN: u32 = 22;

const KIND_OFFSET: usize = 13;

/// Tick mapped into the unsigned, order-preserving key space
pub fn ordered_tick(side: MakerSide, tick: i32) -> Result<u32, DexError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(DexError::InvalidTick);
    }
    let ordered = match side {
        MakerSide::Token0 => tick - MIN_TICK,
        MakerSide::Token1 => MAX_TICK - tick,
    };
    Ok(ordered as u32)
}

fn tick_from_ordered(side: MakerSide, ordered: u32) -> Result<i32, DexError> {
    if ordered > (MAX_TICK - MIN_TICK) as u32 {
        return Err(DexError::MalformedKey);
    }
    let ordered = ordered as i32;
    Ok(match side {
        MakerSide::Token0 => ordered + MIN_TICK,
        MakerSide::Token1 => MAX_TICK - ordered,
    })
}

impl TickLiquidityKey {
    #[inline]
    pub fn pair_id(&self) -> u32 {
        match self {
            TickLiquidityKey::Pooled(k) => k.pair_id,
            TickLiquidityKey::Tranche(k) => k.pair_id,
        }
    }

    #[inline]
    pub fn side(&self) -> MakerSide {
        match self {
            TickLiquidityKey::Pooled(k) => k.side,
            TickLiquidityKey::Tranche(k) => k.side,
        }
    }

    #[inline]
    pub fn tick(&self) -> i32 {
        match self {
            TickLiquidityKey::Pooled(k) => k.tick,
            TickLiquidityKey::Tranche(k) => k.tick,
        }
    }

    #[inline]
    pub fn fee(&self) -> u32 {
        match self {
            TickLiquidityKey::Pooled(k) => k.fee,
            TickLiquidityKey::Tranche(k) => k.fee,
        }
    }

    #[inline]
    pub fn kind(&self) -> LiquidityKind {
        match self {
            TickLiquidityKey::Pooled(_) => LiquidityKind::Pooled,
            TickLiquidityKey::Tranche(_) => LiquidityKind::Tranche,
        }
    }

    /// Canonical order-preserving bytes
    pub fn encode(&self, env: &Env) -> Result<Bytes, DexError> {
        let mut buf = [0u8; TRANCHE_KEY_LEN as usize];

        buf[0..4].copy_from_slice(&self.pair_id().to_be_bytes());
        buf[4] = self.side().as_byte();
        buf[5..9].copy_from_slice(&ordered_tick(self.side(), self.tick())?.to_be_bytes());
        buf[9..13].copy_from_slice(&self.fee().to_be_bytes());
        buf[KIND_OFFSET] = self.kind() as u8;

        let len = match self {
            TickLiquidityKey::Pooled(_) => POOLED_KEY_LEN,
            TickLiquidityKey::Tranche(k) => {
                buf[14..22].copy_from_slice(&k.seq.to_be_bytes());
                TRANCHE_KEY_LEN
            }
        };

        Ok(Bytes::from_slice(env, &buf[..len as usize]))
    }

    /// Inverse of `encode`; rejects anything `encode` could not have produced
    pub fn decode(bytes: &Bytes) -> Result<Self, DexError> {
        let len = bytes.len();
        if len != POOLED_KEY_LEN && len != TRANCHE_KEY_LEN {
            return Err(DexError::MalformedKey);
        }

        let mut buf = [0u8; TRANCHE_KEY_LEN as usize];
        bytes.copy_into_slice(&mut buf[..len as usize]);

        let pair_id = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let side = MakerSide::from_byte(buf[4]).ok_or(DexError::MalformedKey)?;
        let ordered = u32::from_be_bytes([buf[5], buf[6], buf[7], buf[8]]);
        let tick = tick_from_ordered(side, ordered)?;
        let fee = u32::from_be_bytes([buf[9], buf[10], buf[11], buf[12]]);
        if fee > MAX_FEE_BPS {
            return Err(DexError::MalformedKey);
        }

        match (LiquidityKind::from_byte(buf[KIND_OFFSET]), len) {
            (Some(LiquidityKind::Pooled), POOLED_KEY_LEN) => {
                Ok(TickLiquidityKey::Pooled(PooledKey { pair_id, side, tick, fee }))
            }
            (Some(LiquidityKind::Tranche), TRANCHE_KEY_LEN) => {
                let mut seq = [0u8; 8];
                seq.copy_from_slice(&buf[14..22]);
                Ok(TickLiquidityKey::Tranche(TrancheKey {
                    pair_id,
                    side,
                    tick,
                    fee,
                    seq: u64::from_be_bytes(seq),
                }))
            }
            _ => Err(DexError::MalformedKey),
        }
    }

    /// Maker units a taker receives per unit paid
    pub fn price(&self) -> Result<ExactDecimal, DexError> {
        match self.side() {
            MakerSide::Token1 => price_from_tick(self.tick()),
            MakerSide::Token0 => price_from_tick(-self.tick()),
        }
    }

    /// Taker units owed per maker unit received
    pub fn inverse_price(&self) -> Result<ExactDecimal, DexError> {
        match self.side() {
            MakerSide::Token1 => price_from_tick(-self.tick()),
            MakerSide::Token0 => price_from_tick(self.tick()),
        }
    }
}

impl From<PooledKey> for TickLiquidityKey {
    fn from(key: PooledKey) -> Self {
        TickLiquidityKey::Pooled(key)
    }
}

impl From<TrancheKey> for TickLiquidityKey {
    fn from(key: TrancheKey) -> Self {
        TickLiquidityKey::Tranche(key)
    }
}
