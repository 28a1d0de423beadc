use soroban_sdk::{contracttype, Vec};

/// Result of one exact-input swap
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SwapOutcome {
    /// Input actually consumed
    pub amount_in: i128,
    /// Output delivered to the taker, net of fees
    pub amount_out: i128,
    /// Input left unconsumed
    pub remaining: i128,
    /// Fees charged on the output side
    pub fees: i128,
    /// Liquidity entries consumed
    pub ticks_crossed: u32,
}

/// Result of a multi-hop swap
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteOutcome {
    pub amount_in: i128,
    pub amount_out: i128,
    pub hops: Vec<SwapOutcome>,
}

/// Amounts for consuming a single liquidity entry
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StepAmounts {
    /// Maker token taken from the entry, fee included
    pub gross: i128,
    /// Taker token paid into the entry
    pub charged: i128,
    pub fee: i128,
    /// Maker token delivered to the taker
    pub net: i128,
}
