// SPDX-License-Identifier: MIT
// Storage module for the Tickbook DEX
//
// Configuration lives in instance storage. Ledger records live in
// persistent storage behind `ContractStore`, which the ledger packages
// see only through the `LedgerStore` trait.

use soroban_sdk::{contracttype, Env, IntoVal, TryFromVal, Val};
use tickbook_ledger::{LedgerKey, LedgerStore};
use tickbook_math::DexError;

use crate::types::DexConfig;

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
pub enum DataKey {
    /// Admin and ledger configuration
    Config,
}

// ============================================================
// STORAGE CONFIGURATION
// ============================================================

/// Storage TTL constants (in ledgers)
pub mod storage_ttl {
    /// Default TTL for persistent storage (about 1 year at 5s per ledger)
    pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 6_307_200;
    /// Bump amount when extending TTL
    pub const PERSISTENT_BUMP_AMOUNT: u32 = 6_307_200;
    /// Instance entries are bumped on every configuration read
    pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 518_400;
    pub const INSTANCE_BUMP_AMOUNT: u32 = 3_110_400;
}

fn extend_persistent_ttl(env: &Env, key: &LedgerKey) {
    env.storage().persistent().extend_ttl(
        key,
        storage_ttl::PERSISTENT_LIFETIME_THRESHOLD,
        storage_ttl::PERSISTENT_BUMP_AMOUNT,
    );
}

fn extend_instance_ttl(env: &Env) {
    env.storage().instance().extend_ttl(
        storage_ttl::INSTANCE_LIFETIME_THRESHOLD,
        storage_ttl::INSTANCE_BUMP_AMOUNT,
    );
}

// ============================================================
// CONFIG STORAGE
// ============================================================

#[inline]
pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn write_config(env: &Env, config: &DexConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

pub fn read_config(env: &Env) -> Result<DexConfig, DexError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(DexError::NotInitialized)?;
    extend_instance_ttl(env);
    Ok(config)
}

// ============================================================
// LEDGER STORAGE
// ============================================================

/// Persistent contract storage as a ledger store
pub struct ContractStore {
    env: Env,
}

impl ContractStore {
    pub fn new(env: &Env) -> Self {
        Self { env: env.clone() }
    }
}

impl LedgerStore for ContractStore {
    fn env(&self) -> &Env {
        &self.env
    }

    fn get<V: TryFromVal<Env, Val>>(&self, key: &LedgerKey) -> Option<V> {
        let value = self.env.storage().persistent().get(key);
        if value.is_some() {
            extend_persistent_ttl(&self.env, key);
        }
        value
    }

    fn set<V: IntoVal<Env, Val>>(&mut self, key: &LedgerKey, value: &V) {
        self.env.storage().persistent().set(key, value);
        extend_persistent_ttl(&self.env, key);
    }

    fn remove(&mut self, key: &LedgerKey) {
        self.env.storage().persistent().remove(key);
    }

    fn has(&self, key: &LedgerKey) -> bool {
        self.env.storage().persistent().has(key)
    }
}
