#![allow(dead_code)]

use soroban_sdk::{testutils::Address as _, Address, Env};
use tickbook_ledger::{deposit, place_limit_order, LedgerConfig, MakerOrder, MemoryStore};

pub struct Fixture {
    pub env: Env,
    pub store: MemoryStore,
    pub config: LedgerConfig,
    /// Sorted so that x < y < z
    pub x: Address,
    pub y: Address,
    pub z: Address,
    pub maker: Address,
}

pub fn setup() -> Fixture {
    let env = Env::default();
    let mut tokens = [
        Address::generate(&env),
        Address::generate(&env),
        Address::generate(&env),
    ];
    tokens.sort();
    let [x, y, z] = tokens;

    Fixture {
        store: MemoryStore::new(&env),
        config: LedgerConfig::with_defaults(&env),
        x,
        y,
        z,
        maker: Address::generate(&env),
        env,
    }
}

impl Fixture {
    /// Pool on the (a, b) pair; amounts follow the argument order
    pub fn pool(&mut self, a: &Address, b: &Address, tick: i32, fee: u32, amount_a: i128, amount_b: i128) {
        deposit(
            &mut self.store,
            &self.config,
            &self.maker,
            a,
            b,
            tick,
            fee,
            amount_a,
            amount_b,
            10_000,
        )
        .unwrap();
    }

    /// Limit order selling `amount` of `sell` for `buy`
    pub fn order(&mut self, sell: &Address, buy: &Address, tick: i32, fee: u32, amount: i128) -> MakerOrder {
        place_limit_order(&mut self.store, &self.config, &self.maker, sell, buy, tick, fee, amount)
            .unwrap()
    }
}
