// SPDX-License-Identifier: MIT
// Token amount arithmetic

use soroban_sdk::{Env, U256};

use crate::constants::BPS_DENOMINATOR;
use crate::decimal::Rounding;
use crate::error::DexError;

/// Narrow a U256 back into the non-negative i128 range
pub fn u256_to_i128(value: &U256) -> Result<i128, DexError> {
    value
        .to_u128()
        .filter(|v| *v <= i128::MAX as u128)
        .map(|v| v as i128)
        .ok_or(DexError::Overflow)
}

/// Safe multiply-divide using U256 to prevent overflow
/// Calculates: (a * b) / denominator
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128, rounding: Rounding) -> Result<i128, DexError> {
    if a < 0 || b < 0 {
        return Err(DexError::InvalidAmount);
    }
    if denominator <= 0 {
        return Err(DexError::Overflow);
    }

    let den = U256::from_u128(env, denominator as u128);
    let product = U256::from_u128(env, a as u128).mul(&U256::from_u128(env, b as u128));
    let quotient = product.div(&den);

    let quotient = if rounding == Rounding::Up && product.rem_euclid(&den) != U256::from_u32(env, 0) {
        quotient.add(&U256::from_u32(env, 1))
    } else {
        quotient
    };

    u256_to_i128(&quotient)
}

/// Fee charged on a gross output, rounded up in favour of the liquidity
pub fn fee_for(env: &Env, gross: i128, fee_bps: u32) -> Result<i128, DexError> {
    if fee_bps == 0 || gross == 0 {
        return Ok(0);
    }
    mul_div(env, gross, fee_bps as i128, BPS_DENOMINATOR as i128, Rounding::Up)
}

#[inline]
pub fn try_add(a: i128, b: i128) -> Result<i128, DexError> {
    a.checked_add(b).ok_or(DexError::Overflow)
}

#[inline]
pub fn try_sub(a: i128, b: i128) -> Result<i128, DexError> {
    a.checked_sub(b).ok_or(DexError::Overflow)
}
