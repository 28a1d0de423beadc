// Constants module for the Tickbook ledger
//
// Grouped by functionality. Values that governance may tune live in
// the ledger configuration instead; these are the hard limits that keep
// every fixed-point intermediate representable.

// ============================================================
// TICK CONSTANTS
// ============================================================

/// Minimum tick any key or price may carry
/// Price at MIN_TICK ≈ 4.25e-18
pub const MIN_TICK: i32 = -400_000;

/// Maximum tick any key or price may carry
/// Price at MAX_TICK ≈ 2.35e+17
pub const MAX_TICK: i32 = 400_000;

/// Number of entries in the power tables (2^18 < MAX_TICK < 2^19)
pub const POW_TABLE_LEN: usize = 19;

// ============================================================
// DECIMAL CONSTANTS
// ============================================================

/// Significant digits carried by every ExactDecimal
pub const PRICE_SIG_DIGITS: u32 = 18;

/// Smallest normalized mantissa (10^17)
pub const MANTISSA_MIN: u128 = 100_000_000_000_000_000;

/// Exclusive upper bound of a normalized mantissa (10^18)
pub const MANTISSA_LIMIT: u128 = 1_000_000_000_000_000_000;

// ============================================================
// FEE CONSTANTS
// ============================================================

/// Basis point denominator (100% = 10000 bps)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Largest fee tier the configuration accepts (10%)
pub const MAX_FEE_BPS: u32 = 1_000;

/// Fee tiers enabled when no explicit list is configured
pub const DEFAULT_FEE_TIERS: [u32; 5] = [0, 1, 5, 30, 100];

// ============================================================
// SWAP CONSTANTS
// ============================================================

/// Default bound on liquidity entries visited by a single swap
pub const DEFAULT_MAX_SWAP_TICKS: u32 = 256;

/// Hard ceiling for the configurable swap bound
pub const MAX_SWAP_ITERATIONS: u32 = 1024;

/// Default maximum hops in a multi-hop route
pub const DEFAULT_MAX_ROUTE_HOPS: u32 = 4;

// ============================================================
// INDEX CONSTANTS
// ============================================================

/// Ordered ticks covered by one index bucket
pub const INDEX_BUCKET_TICKS: u32 = 64;

/// Buckets tracked by one bitmap word
pub const INDEX_BUCKETS_PER_WORD: u32 = 128;

/// Default bound on live entries opened in one index bucket
pub const DEFAULT_MAX_BUCKET_ENTRIES: u32 = 128;

/// Hard ceiling for the configurable bucket bound
pub const MAX_BUCKET_ENTRIES: u32 = 1024;

// every bitmap word must fit in the single summary word
const _: () = assert!(
    ((MAX_TICK - MIN_TICK) as u32 / INDEX_BUCKET_TICKS / INDEX_BUCKETS_PER_WORD) < 128
);

