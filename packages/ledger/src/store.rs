// Storage seam for the ledger
//
// Packages never touch contract storage directly. Every operation is
// written against `LedgerStore`; the contract supplies a persistent-storage
// implementation and tests use `MemoryStore`. `StagedStore` buffers writes
// over any store so an operation either commits all of its mutations or
// none of them.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, IntoVal, Map, TryFromVal, Val};
use tickbook_math::DexError;
use tickbook_tick::{MakerSide, PoolId, TrancheKey};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerKey {
    /// Next pair id to hand out
    NextPairId,
    /// Pair id by (token0, token1), tokens sorted
    PairId(Address, Address),
    /// Pair by id
    Pair(u32),
    /// Pooled liquidity record
    Pool(PoolId),
    /// Shares held by an owner in a pool
    Shares(Address, PoolId),
    /// Bitmap of non-empty index words, by (pair id, maker side)
    Index(u32, MakerSide),
    /// Bitmap of non-empty buckets, by (pair id, maker side, word)
    IndexWord(u32, MakerSide, u32),
    /// Sorted encoded keys with liquidity, by (pair id, maker side, bucket)
    IndexBucket(u32, MakerSide, u32),
    /// Order tranche record
    Tranche(TrancheKey),
    /// Seq of the tranche still accepting makers at (pair, side, tick, fee)
    OpenTranche(u32, MakerSide, i32, u32),
    /// Next tranche seq to hand out
    NextTrancheSeq,
    /// Maker order by id
    Order(u64),
    /// Next maker order id to hand out
    NextOrderId,
    /// Protocol fees by pair id
    ProtocolFees(u32),
}

// ============================================================
// STORE TRAIT
// ============================================================

pub trait LedgerStore {
    fn env(&self) -> &Env;

    fn get<V: TryFromVal<Env, Val>>(&self, key: &LedgerKey) -> Option<V>;

    fn set<V: IntoVal<Env, Val>>(&mut self, key: &LedgerKey, value: &V);

    fn remove(&mut self, key: &LedgerKey);

    fn has(&self, key: &LedgerKey) -> bool {
        self.get::<Val>(key).is_some()
    }
}

/// A stored value of the wrong type is corruption, never absence
fn decode<V: TryFromVal<Env, Val>>(env: &Env, raw: &Val) -> V {
    V::try_from_val(env, raw)
        .unwrap_or_else(|_| panic_with_error!(env, DexError::InternalInvariantViolation))
}

/// Read a counter, store its successor and return the read value
pub fn next_counter<S: LedgerStore>(store: &mut S, key: &LedgerKey) -> Result<u64, DexError> {
    let current: u64 = store.get(key).unwrap_or(0);
    let next = current.checked_add(1).ok_or(DexError::Overflow)?;
    store.set(key, &next);
    Ok(current)
}

// ============================================================
// IN-MEMORY STORE
// ============================================================

/// Host-map backed store; cloning it takes a snapshot
#[derive(Clone)]
pub struct MemoryStore {
    env: Env,
    entries: Map<LedgerKey, Val>,
}

impl MemoryStore {
    pub fn new(env: &Env) -> Self {
        Self { env: env.clone(), entries: Map::new(env) }
    }

    pub fn entries(&self) -> &Map<LedgerKey, Val> {
        &self.entries
    }

    pub fn len(&self) -> u32 {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LedgerStore for MemoryStore {
    fn env(&self) -> &Env {
        &self.env
    }

    fn get<V: TryFromVal<Env, Val>>(&self, key: &LedgerKey) -> Option<V> {
        let raw = self.entries.get(key.clone())?;
        Some(decode(&self.env, &raw))
    }

    fn set<V: IntoVal<Env, Val>>(&mut self, key: &LedgerKey, value: &V) {
        let raw: Val = value.into_val(&self.env);
        self.entries.set(key.clone(), raw);
    }

    fn remove(&mut self, key: &LedgerKey) {
        self.entries.remove(key.clone());
    }
}

// ============================================================
// STAGED VIEW
// ============================================================

/// Write overlay over another store. Dropping it discards every write.
pub struct StagedStore<'a, S: LedgerStore> {
    base: &'a mut S,
    writes: Map<LedgerKey, Val>,
    deletes: Map<LedgerKey, bool>,
}

impl<'a, S: LedgerStore> StagedStore<'a, S> {
    pub fn new(base: &'a mut S) -> Self {
        let env = base.env().clone();
        Self { base, writes: Map::new(&env), deletes: Map::new(&env) }
    }

    /// Number of keys touched so far
    pub fn pending(&self) -> u32 {
        self.writes.len() + self.deletes.len()
    }

    /// Flush buffered writes into the underlying store
    pub fn commit(self) {
        let Self { base, writes, deletes } = self;
        for (key, value) in writes.iter() {
            base.set(&key, &value);
        }
        for key in deletes.keys() {
            base.remove(&key);
        }
    }
}

impl<S: LedgerStore> LedgerStore for StagedStore<'_, S> {
    fn env(&self) -> &Env {
        self.base.env()
    }

    fn get<V: TryFromVal<Env, Val>>(&self, key: &LedgerKey) -> Option<V> {
        if let Some(raw) = self.writes.get(key.clone()) {
            return Some(decode(self.env(), &raw));
        }
        if self.deletes.contains_key(key.clone()) {
            return None;
        }
        self.base.get(key)
    }

    fn set<V: IntoVal<Env, Val>>(&mut self, key: &LedgerKey, value: &V) {
        let raw: Val = value.into_val(self.base.env());
        self.deletes.remove(key.clone());
        self.writes.set(key.clone(), raw);
    }

    fn remove(&mut self, key: &LedgerKey) {
        self.writes.remove(key.clone());
        self.deletes.set(key.clone(), true);
    }
}

/// Run `op` on a staged view and commit only if it succeeds
pub fn with_staged<S, T, F>(store: &mut S, op: F) -> Result<T, DexError>
where
    S: LedgerStore,
    F: FnOnce(&mut StagedStore<'_, S>) -> Result<T, DexError>,
{
    let mut staged = StagedStore::new(store);
    let result = op(&mut staged)?;
    staged.commit();
    Ok(result)
}

/// Run `op` on a staged view and always discard its writes
pub fn dry_run<S, T, F>(store: &mut S, op: F) -> Result<T, DexError>
where
    S: LedgerStore,
    F: FnOnce(&mut StagedStore<'_, S>) -> Result<T, DexError>,
{
    let mut staged = StagedStore::new(store);
    op(&mut staged)
}
