#![allow(dead_code)]

use soroban_sdk::{testutils::Address as _, token, Address, Env};
use tickbook_dex::{types::LedgerConfig, TickbookDex, TickbookDexClient};

// Test constants
pub const INITIAL_BALANCE: i128 = 1_000_000;

pub struct Setup<'a> {
    pub client: TickbookDexClient<'a>,
    pub admin: Address,
    /// Sorted so that token0 < token1 < token2
    pub token0: Address,
    pub token1: Address,
    pub token2: Address,
    pub alice: Address,
    pub bob: Address,
}

/// Register an uninitialized DEX
pub fn register_dex(env: &Env) -> TickbookDexClient<'_> {
    let contract_id = env.register(TickbookDex, ());
    TickbookDexClient::new(env, &contract_id)
}

/// Initialized DEX with default limits and funded traders
pub fn setup_dex(env: &Env) -> Setup<'_> {
    env.mock_all_auths();

    let admin = Address::generate(env);
    let client = register_dex(env);
    client.initialize(&admin, &LedgerConfig::with_defaults(env));

    let mut tokens = [
        create_token(env, &admin),
        create_token(env, &admin),
        create_token(env, &admin),
    ];
    tokens.sort();
    let [token0, token1, token2] = tokens;

    let alice = Address::generate(env);
    let bob = Address::generate(env);
    for token in [&token0, &token1, &token2] {
        mint_tokens(env, token, &alice, INITIAL_BALANCE);
        mint_tokens(env, token, &bob, INITIAL_BALANCE);
    }

    Setup { client, admin, token0, token1, token2, alice, bob }
}

/// Create a test token
pub fn create_token(env: &Env, admin: &Address) -> Address {
    let token_id = env.register_stellar_asset_contract_v2(admin.clone());
    token_id.address()
}

/// Mint tokens to an address
pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    use soroban_sdk::token::StellarAssetClient;
    let client = StellarAssetClient::new(env, token);
    client.mint(to, &amount);
}

/// Token balance of an address
pub fn balance(env: &Env, token: &Address, of: &Address) -> i128 {
    token::Client::new(env, token).balance(of)
}
