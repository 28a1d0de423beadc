#![no_std]

pub mod engine;
pub mod route;
pub mod types;

pub use engine::{compute_step, execute_swap, quote_swap};
pub use route::{multi_hop_swap, quote_multi_hop, validate_route};
pub use types::{RouteOutcome, StepAmounts, SwapOutcome};
