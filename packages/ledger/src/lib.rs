#![no_std]

pub mod fees;
pub mod index;
pub mod invariants;
pub mod pair;
pub mod pool;
pub mod store;
pub mod tranche;
pub mod types;

pub use fees::{accrue_protocol_fee, read_protocol_fees, take_protocol_fees};
pub use index::{
    available, bucket_of, check_bucket_room, has_liquidity, list_entries, next_bucket, read_bucket,
    sync_entry,
};
pub use pair::{find_pair, get_or_create_pair, pair_by_id, require_pair, sort_tokens};
pub use pool::{deposit, fill_pool, pool_value, read_pool, read_shares, withdraw};
pub use store::{dry_run, next_counter, with_staged, LedgerKey, LedgerStore, MemoryStore, StagedStore};
pub use tranche::{
    cancel_order, claim_filled, claimable, fill_tranche, place_limit_order, read_order,
    read_tranche, unfilled,
};
pub use types::{
    DepositOutcome, LedgerConfig, MakerOrder, OrderTranche, PooledLiquidity, ProtocolFees,
    TickEntry, TradingPair,
};
