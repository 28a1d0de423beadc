mod common;

use common::*;
use soroban_sdk::{vec, Env};
use tickbook_dex::DexError;

fn seed_route(s: &Setup) {
    s.client.deposit(&s.alice, &s.token0, &s.token1, &0, &0, &1000, &1000, &0);
    s.client.deposit(&s.alice, &s.token1, &s.token2, &0, &0, &1000, &1000, &0);
}

#[test]
fn test_two_hop_swap_moves_only_endpoints() {
    let env = Env::default();
    let s = setup_dex(&env);
    seed_route(&s);

    let route = vec![&env, s.token0.clone(), s.token1.clone(), s.token2.clone()];
    let out = s.client.multi_hop_swap(&s.bob, &route, &100, &100);
    assert_eq!(out.amount_in, 100);
    assert_eq!(out.amount_out, 100);
    assert_eq!(out.hops.len(), 2);

    assert_eq!(balance(&env, &s.token0, &s.bob), INITIAL_BALANCE - 100);
    assert_eq!(balance(&env, &s.token1, &s.bob), INITIAL_BALANCE);
    assert_eq!(balance(&env, &s.token2, &s.bob), INITIAL_BALANCE + 100);

    let mid = s.client.get_pool(&s.token1, &s.token2, &0, &0).unwrap();
    assert_eq!((mid.reserve0, mid.reserve1), (1100, 900));
}

#[test]
fn test_route_slippage_rolls_back() {
    let env = Env::default();
    let s = setup_dex(&env);
    seed_route(&s);

    let route = vec![&env, s.token0.clone(), s.token1.clone(), s.token2.clone()];
    assert_eq!(
        s.client.try_multi_hop_swap(&s.bob, &route, &100, &101),
        Err(Ok(DexError::SlippageExceeded))
    );

    let first = s.client.get_pool(&s.token0, &s.token1, &0, &0).unwrap();
    assert_eq!((first.reserve0, first.reserve1), (1000, 1000));
    assert_eq!(balance(&env, &s.token0, &s.bob), INITIAL_BALANCE);
}

#[test]
fn test_missing_hop() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.deposit(&s.alice, &s.token0, &s.token1, &0, &0, &1000, &1000, &0);

    let route = vec![&env, s.token0.clone(), s.token1.clone(), s.token2.clone()];
    assert_eq!(
        s.client.try_multi_hop_swap(&s.bob, &route, &100, &0),
        Err(Ok(DexError::RouteNotFound))
    );
    assert_eq!(
        s.client.try_estimate_multi_hop(&route, &100),
        Err(Ok(DexError::RouteNotFound))
    );
}

#[test]
fn test_route_shape() {
    let env = Env::default();
    let s = setup_dex(&env);
    seed_route(&s);

    let single = vec![&env, s.token0.clone()];
    assert_eq!(
        s.client.try_multi_hop_swap(&s.bob, &single, &100, &0),
        Err(Ok(DexError::InvalidRoute))
    );

    let stutter = vec![&env, s.token0.clone(), s.token0.clone(), s.token1.clone()];
    assert_eq!(
        s.client.try_multi_hop_swap(&s.bob, &stutter, &100, &0),
        Err(Ok(DexError::InvalidRoute))
    );
}

#[test]
fn test_thin_hop_fails_route() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.deposit(&s.alice, &s.token0, &s.token1, &0, &0, &1000, &1000, &0);
    s.client.deposit(&s.alice, &s.token1, &s.token2, &0, &0, &10, &10, &0);

    let route = vec![&env, s.token0.clone(), s.token1.clone(), s.token2.clone()];
    assert_eq!(
        s.client.try_multi_hop_swap(&s.bob, &route, &100, &0),
        Err(Ok(DexError::InsufficientLiquidity))
    );
    let first = s.client.get_pool(&s.token0, &s.token1, &0, &0).unwrap();
    assert_eq!((first.reserve0, first.reserve1), (1000, 1000));
}

#[test]
fn test_estimate_matches_route() {
    let env = Env::default();
    let s = setup_dex(&env);
    seed_route(&s);
    s.client.place_limit_order(&s.alice, &s.token2, &s.token1, &0, &0, &50);

    let route = vec![&env, s.token0.clone(), s.token1.clone(), s.token2.clone()];
    let quoted = s.client.estimate_multi_hop(&route, &300);
    assert_eq!(balance(&env, &s.token0, &s.bob), INITIAL_BALANCE);

    let executed = s.client.multi_hop_swap(&s.bob, &route, &300, &0);
    assert_eq!(quoted, executed);
}
