// Error handling for the DEX contract
//
// - Every crate shares one contracterror enum, re-exported here
// - User errors are returned from entry points and abort the invocation
// - Invariant violations trap instead so they can never be swallowed

use soroban_sdk::{log, panic_with_error, Env};

pub use tickbook_math::DexError;

/// Pass user errors through; trap on fatal ones
pub fn escalate<T>(env: &Env, result: Result<T, DexError>) -> Result<T, DexError> {
    match result {
        Err(err) if err.is_fatal() => {
            log!(env, "ledger invariant violated", err as u32);
            panic_with_error!(env, err)
        }
        other => other,
    }
}
