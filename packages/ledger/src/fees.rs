// Protocol fee accounting

use tickbook_math::DexError;
use tickbook_tick::MakerSide;

use crate::store::{LedgerKey, LedgerStore};
use crate::types::ProtocolFees;

pub fn read_protocol_fees<S: LedgerStore>(store: &S, pair_id: u32) -> ProtocolFees {
    store.get(&LedgerKey::ProtocolFees(pair_id)).unwrap_or_default()
}

/// Credit `amount` of the token offered on `side` to the protocol
pub fn accrue_protocol_fee<S: LedgerStore>(
    store: &mut S,
    pair_id: u32,
    side: MakerSide,
    amount: i128,
) -> Result<(), DexError> {
    if amount < 0 {
        return Err(DexError::InternalInvariantViolation);
    }
    if amount == 0 {
        return Ok(());
    }
    let mut fees = read_protocol_fees(store, pair_id);
    fees.add(side, amount)?;
    store.set(&LedgerKey::ProtocolFees(pair_id), &fees);
    Ok(())
}

/// Zero the pair's protocol fees and return what was owed
pub fn take_protocol_fees<S: LedgerStore>(store: &mut S, pair_id: u32) -> ProtocolFees {
    let fees = read_protocol_fees(store, pair_id);
    store.remove(&LedgerKey::ProtocolFees(pair_id));
    fees
}
