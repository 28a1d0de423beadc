// Tickbook Math Package

#![no_std]

pub mod amount;
pub mod constants;
pub mod decimal;
pub mod error;
pub mod price;

// Re-export commonly used items from constants
pub use constants::*;

pub use amount::{fee_for, mul_div, try_add, try_sub, u256_to_i128};
pub use decimal::{ExactDecimal, Rounding};
pub use error::DexError;
pub use price::{is_valid_tick, price_from_tick, tick_for_price, TickBounds};
