// Error handling module shared by every Tickbook crate
//
// - Uses contracterror derive macro for typed errors
// - Grouped by code range so callers can tell user errors from faults
// - InternalInvariantViolation is the only fatal variant

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum DexError {
    // Initialization errors (100-199)
    /// Contract has already been initialized
    AlreadyInitialized = 100,
    /// Contract has not been initialized
    NotInitialized = 101,
    /// Configuration values out of range
    InvalidConfig = 102,

    // Tick and key errors (200-299)
    /// Tick outside the configured bounds or off the tick spacing
    InvalidTick = 200,
    /// Encoded liquidity key could not be decoded
    MalformedKey = 201,
    /// Fee tier not enabled
    InvalidFeeTier = 202,
    /// The index bucket covering this tick holds its maximum entries
    IndexFull = 203,

    // Token and pair errors (300-399)
    /// Both sides of a pair are the same token
    SameToken = 300,
    /// Token is not part of the pair
    InvalidToken = 301,
    /// No pair registered for the two tokens
    PairNotFound = 302,

    // Liquidity errors (400-499)
    /// Deposit composition deviates from the pool beyond tolerance
    PriceSlippageExceeded = 400,
    /// Withdrawal exceeds the holder's share balance
    InsufficientShares = 401,
    /// Amount must be positive and mint a non-zero share count
    InvalidAmount = 402,

    // Limit order errors (500-599)
    /// Nothing left to cancel on the order
    OrderFullyFilled = 500,
    /// No filled proceeds waiting for the maker
    NothingToClaim = 501,
    /// No maker order with that id
    OrderNotFound = 502,

    // Swap errors (600-699)
    /// Not enough eligible liquidity to fill the input
    InsufficientLiquidity = 600,
    /// A hop of the route has no liquidity on the required side
    RouteNotFound = 601,
    /// Route shorter than one hop or longer than allowed
    InvalidRoute = 602,
    /// Output below the caller's minimum
    SlippageExceeded = 603,

    // Authorization errors (700-799)
    /// Caller does not own the record or is not the admin
    Unauthorized = 700,

    // Faults (900-999)
    /// Fixed-point value does not fit its target type
    Overflow = 900,
    /// Ledger record violates its invariants; never a user error
    InternalInvariantViolation = 999,
}

impl DexError {
    /// Fatal errors must stop processing instead of being reported as a failed request
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, DexError::InternalInvariantViolation)
    }
}
