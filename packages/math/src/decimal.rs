// SPDX-License-Identifier: MIT
// Exact decimal fixed-point numbers
//
// Every value is mantissa * 10^exponent with the mantissa normalized to
// exactly PRICE_SIG_DIGITS significant digits. Rounding is always
// half-to-even so two nodes evaluating the same expression agree bit for bit.

use core::cmp::Ordering;
use soroban_sdk::{contracttype, Env, U256};

use crate::amount::u256_to_i128;
use crate::constants::{MANTISSA_LIMIT, MANTISSA_MIN, PRICE_SIG_DIGITS};
use crate::error::DexError;

/// Rounding direction for conversions back to integer token amounts
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rounding {
    Down,
    Up,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExactDecimal {
    /// Significand, in [10^17, 10^18) unless the value is zero
    pub mantissa: u128,
    /// Power of ten applied to the mantissa
    pub exponent: i32,
}

impl ExactDecimal {
    pub const ZERO: ExactDecimal = ExactDecimal { mantissa: 0, exponent: 0 };
    pub const ONE: ExactDecimal = ExactDecimal { mantissa: MANTISSA_MIN, exponent: -17 };

    /// Build from parts that are already normalized (table constants)
    pub const fn from_parts(mantissa: u128, exponent: i32) -> Self {
        Self { mantissa, exponent }
    }

    /// Build from any integer significand, rounding to 18 digits
    pub fn new(mantissa: u128, exponent: i32) -> Self {
        normalize(mantissa, exponent, false)
    }

    pub fn from_integer(value: u128) -> Self {
        normalize(value, 0, false)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Product rounded half-to-even
    pub fn mul(&self, other: &ExactDecimal) -> ExactDecimal {
        if self.is_zero() || other.is_zero() {
            return ExactDecimal::ZERO;
        }
        // both mantissas < 10^18 so the product stays below 10^36
        normalize(
            self.mantissa * other.mantissa,
            self.exponent + other.exponent,
            false,
        )
    }

    /// Reciprocal rounded half-to-even
    pub fn recip(&self) -> Result<ExactDecimal, DexError> {
        if self.is_zero() {
            return Err(DexError::Overflow);
        }
        let numerator = 10u128.pow(37);
        let quotient = numerator / self.mantissa;
        let remainder = numerator % self.mantissa;
        Ok(normalize(quotient, -37 - self.exponent, remainder != 0))
    }

    /// amount * self, converted back to a token amount
    pub fn mul_amount(&self, env: &Env, amount: i128, rounding: Rounding) -> Result<i128, DexError> {
        if amount < 0 {
            return Err(DexError::InvalidAmount);
        }
        if amount == 0 || self.is_zero() {
            return Ok(0);
        }

        let product = U256::from_u128(env, amount as u128).mul(&U256::from_u128(env, self.mantissa));

        if self.exponent >= 0 {
            let scale = U256::from_u32(env, 10).pow(self.exponent as u32);
            return u256_to_i128(&product.mul(&scale));
        }

        let scale = U256::from_u32(env, 10).pow(self.exponent.unsigned_abs());
        let quotient = product.div(&scale);
        let remainder = product.rem_euclid(&scale);

        let quotient = if rounding == Rounding::Up && remainder != U256::from_u32(env, 0) {
            quotient.add(&U256::from_u32(env, 1))
        } else {
            quotient
        };

        u256_to_i128(&quotient)
    }
}

impl Ord for ExactDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // normalized mantissas share a digit count, so the exponent decides first
            (false, false) => self
                .exponent
                .cmp(&other.exponent)
                .then_with(|| self.mantissa.cmp(&other.mantissa)),
        }
    }
}

impl PartialOrd for ExactDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// NORMALIZATION
// ============================================================

fn count_digits(mut value: u128) -> u32 {
    let mut digits = 0;
    while value > 0 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// Drop `drop` trailing digits, rounding half-to-even.
/// `sticky` marks a non-zero remainder below the last dropped digit.
fn round_digits(value: u128, drop: u32, sticky: bool) -> u128 {
    if drop == 0 {
        return value;
    }
    let divisor = 10u128.pow(drop);
    let kept = value / divisor;
    let rem = value % divisor;
    let half = divisor / 2;

    let round_up = rem > half || (rem == half && (sticky || kept % 2 == 1));
    if round_up {
        kept + 1
    } else {
        kept
    }
}

fn normalize(mantissa: u128, exponent: i32, sticky: bool) -> ExactDecimal {
    if mantissa == 0 {
        return ExactDecimal::ZERO;
    }

    let digits = count_digits(mantissa);

    if digits <= PRICE_SIG_DIGITS {
        let shift = PRICE_SIG_DIGITS - digits;
        return ExactDecimal {
            mantissa: mantissa * 10u128.pow(shift),
            exponent: exponent - shift as i32,
        };
    }

    let drop = digits - PRICE_SIG_DIGITS;
    let mut kept = round_digits(mantissa, drop, sticky);
    let mut exponent = exponent + drop as i32;

    if kept == MANTISSA_LIMIT {
        kept = MANTISSA_MIN;
        exponent += 1;
    }

    ExactDecimal { mantissa: kept, exponent }
}
