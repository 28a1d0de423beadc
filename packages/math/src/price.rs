// SPDX-License-Identifier: MIT
// Tick <-> price codec

use crate::constants::{MAX_TICK, MIN_TICK, POW_TABLE_LEN};
use crate::decimal::ExactDecimal;
use crate::error::DexError;

// 1.0001^(2^k), 18 significant digits, half-to-even
const POW_UP: [ExactDecimal; POW_TABLE_LEN] = [
    ExactDecimal::from_parts(100010000000000000, -17),
    ExactDecimal::from_parts(100020001000000000, -17),
    ExactDecimal::from_parts(100040006000400010, -17),
    ExactDecimal::from_parts(100080028005600700, -17),
    ExactDecimal::from_parts(100160120056018204, -17),
    ExactDecimal::from_parts(100320496496359801, -17),
    ExactDecimal::from_parts(100642020172761392, -17),
    ExactDecimal::from_parts(101288162244545110, -17),
    ExactDecimal::from_parts(102592918108772934, -17),
    ExactDecimal::from_parts(105253068460733895, -17),
    ExactDecimal::from_parts(110782084203999361, -17),
    ExactDecimal::from_parts(122726701805820048, -17),
    ExactDecimal::from_parts(150618433361346739, -17),
    ExactDecimal::from_parts(226859124682264483, -17),
    ExactDecimal::from_parts(514650624516032222, -17),
    ExactDecimal::from_parts(264865265314741987, -16),
    ExactDecimal::from_parts(701536087702486645, -15),
    ExactDecimal::from_parts(492152882348911034, -12),
    ExactDecimal::from_parts(242214459604341066, -6),
];

// 1.0001^-(2^k), 18 significant digits, half-to-even
const POW_DOWN: [ExactDecimal; POW_TABLE_LEN] = [
    ExactDecimal::from_parts(999900009999000100, -18),
    ExactDecimal::from_parts(999800029996000500, -18),
    ExactDecimal::from_parts(999600099980003499, -18),
    ExactDecimal::from_parts(999200359880032992, -18),
    ExactDecimal::from_parts(998401359184387445, -18),
    ExactDecimal::from_parts(996805274021232232, -18),
    ExactDecimal::from_parts(993620754316543878, -18),
    ExactDecimal::from_parts(987282203408577651, -18),
    ExactDecimal::from_parts(974726149167296095, -18),
    ExactDecimal::from_parts(950091065870505958, -18),
    ExactDecimal::from_parts(902673033446954091, -18),
    ExactDecimal::from_parts(814818605312325899, -18),
    ExactDecimal::from_parts(663929359563123931, -18),
    ExactDecimal::from_parts(440802194489899903, -18),
    ExactDecimal::from_parts(194306574667111540, -18),
    ExactDecimal::from_parts(377550449588657922, -19),
    ExactDecimal::from_parts(142544341984597727, -20),
    ExactDecimal::from_parts(203188894318219502, -23),
    ExactDecimal::from_parts(412857267742605733, -29),
];

/// Convert tick to price
/// Formula: 1.0001^tick, the token1 value of one unit of token0
pub fn price_from_tick(tick: i32) -> Result<ExactDecimal, DexError> {
    if !is_valid_tick(tick) {
        return Err(DexError::InvalidTick);
    }

    if tick == 0 {
        return Ok(ExactDecimal::ONE);
    }

    let table = if tick > 0 { &POW_UP } else { &POW_DOWN };
    let abs_tick = tick.unsigned_abs();

    let mut price = ExactDecimal::ONE;
    for (bit, factor) in table.iter().enumerate() {
        if abs_tick & (1 << bit) != 0 {
            price = price.mul(factor);
        }
    }

    Ok(price)
}

/// Largest tick whose price does not exceed `price`.
/// Display helper only; nothing consensus-relevant depends on it.
pub fn tick_for_price(price: &ExactDecimal) -> Result<i32, DexError> {
    if *price < price_from_tick(MIN_TICK)? {
        return Err(DexError::InvalidTick);
    }

    let mut lo = MIN_TICK;
    let mut hi = MAX_TICK;
    while lo < hi {
        // upper mid so the loop always makes progress
        let mid = lo + (hi - lo + 1) / 2;
        if price_from_tick(mid)? <= *price {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    Ok(lo)
}

/// Check if a tick is within the hard range
#[inline]
pub fn is_valid_tick(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Configured tick bounds and spacing, threaded into every ledger call
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TickBounds {
    pub min_tick: i32,
    pub max_tick: i32,
    pub spacing: u32,
}

impl TickBounds {
    pub fn new(min_tick: i32, max_tick: i32, spacing: u32) -> Result<Self, DexError> {
        if min_tick >= max_tick || !is_valid_tick(min_tick) || !is_valid_tick(max_tick) || spacing == 0 {
            return Err(DexError::InvalidConfig);
        }
        Ok(Self { min_tick, max_tick, spacing })
    }

    #[inline]
    pub fn contains(&self, tick: i32) -> bool {
        (self.min_tick..=self.max_tick).contains(&tick)
    }

    /// Tick must be in range and aligned to the spacing
    pub fn check(&self, tick: i32) -> Result<(), DexError> {
        if !self.contains(tick) || tick.rem_euclid(self.spacing as i32) != 0 {
            return Err(DexError::InvalidTick);
        }
        Ok(())
    }

    pub fn price(&self, tick: i32) -> Result<ExactDecimal, DexError> {
        if !self.contains(tick) {
            return Err(DexError::InvalidTick);
        }
        price_from_tick(tick)
    }
}

impl Default for TickBounds {
    fn default() -> Self {
        Self { min_tick: MIN_TICK, max_tick: MAX_TICK, spacing: 1 }
    }
}
