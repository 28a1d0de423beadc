#![allow(dead_code)]

use soroban_sdk::{testutils::Address as _, Address, Env};
use tickbook_ledger::{LedgerConfig, MemoryStore};

pub struct Fixture {
    pub env: Env,
    pub store: MemoryStore,
    pub config: LedgerConfig,
    /// Sorted so that token0 < token1
    pub token0: Address,
    pub token1: Address,
    pub alice: Address,
    pub bob: Address,
}

pub fn setup() -> Fixture {
    let env = Env::default();
    let a = Address::generate(&env);
    let b = Address::generate(&env);
    let (token0, token1) = if a < b { (a, b) } else { (b, a) };

    Fixture {
        store: MemoryStore::new(&env),
        config: LedgerConfig::with_defaults(&env),
        token0,
        token1,
        alice: Address::generate(&env),
        bob: Address::generate(&env),
        env,
    }
}
