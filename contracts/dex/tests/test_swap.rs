mod common;

use common::*;
use soroban_sdk::Env;
use tickbook_dex::DexError;

#[test]
fn test_swap_against_pool() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.deposit(&s.alice, &s.token0, &s.token1, &0, &30, &1000, &1000, &0);

    let out = s.client.swap(&s.bob, &s.token0, &s.token1, &100, &99, &None, &true);
    assert_eq!(out.amount_in, 100);
    assert_eq!(out.amount_out, 99);
    assert_eq!(out.fees, 1);
    assert_eq!(out.ticks_crossed, 1);

    assert_eq!(balance(&env, &s.token0, &s.bob), INITIAL_BALANCE - 100);
    assert_eq!(balance(&env, &s.token1, &s.bob), INITIAL_BALANCE + 99);

    let pool = s.client.get_pool(&s.token0, &s.token1, &0, &30).unwrap();
    assert_eq!((pool.reserve0, pool.reserve1), (1100, 900));
    assert_eq!((pool.fees0, pool.fees1), (0, 1));
}

#[test]
fn test_min_out_rejects_swap() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.deposit(&s.alice, &s.token0, &s.token1, &0, &30, &1000, &1000, &0);

    assert_eq!(
        s.client.try_swap(&s.bob, &s.token0, &s.token1, &100, &100, &None, &true),
        Err(Ok(DexError::SlippageExceeded))
    );
    assert_eq!(balance(&env, &s.token0, &s.bob), INITIAL_BALANCE);
    let pool = s.client.get_pool(&s.token0, &s.token1, &0, &30).unwrap();
    assert_eq!((pool.reserve0, pool.reserve1), (1000, 1000));
}

#[test]
fn test_best_price_first_across_ticks() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.place_limit_order(&s.alice, &s.token0, &s.token1, &10, &0, &300);
    s.client.place_limit_order(&s.alice, &s.token0, &s.token1, &5, &0, &300);

    let out = s.client.swap(&s.bob, &s.token1, &s.token0, &500, &0, &None, &true);
    assert_eq!(out.ticks_crossed, 2);
    assert_eq!(out.amount_out, 498);
    assert_eq!(out.remaining, 0);

    let left = s.client.list_ticks(&s.token0, &s.token1, &s.token0);
    assert_eq!(left.len(), 1);
    assert_eq!(left.get(0).unwrap().available, 102);
}

#[test]
fn test_limit_tick_stops_walk() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.place_limit_order(&s.alice, &s.token0, &s.token1, &10, &0, &300);
    s.client.place_limit_order(&s.alice, &s.token0, &s.token1, &5, &0, &300);

    let out = s.client.swap(&s.bob, &s.token1, &s.token0, &500, &0, &Some(7), &false);
    assert_eq!(out.amount_out, 300);
    assert_eq!(out.remaining, 199);
    assert_eq!(out.amount_in, 301);
    assert_eq!(balance(&env, &s.token1, &s.bob), INITIAL_BALANCE - 301);

    assert_eq!(
        s.client.try_swap(&s.bob, &s.token1, &s.token0, &500, &0, &Some(7), &true),
        Err(Ok(DexError::InsufficientLiquidity))
    );
}

#[test]
fn test_swap_failures() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.deposit(&s.alice, &s.token0, &s.token1, &0, &0, &1000, &0, &0);

    assert_eq!(
        s.client.try_swap(&s.bob, &s.token0, &s.token1, &0, &0, &None, &false),
        Err(Ok(DexError::InvalidAmount))
    );
    assert_eq!(
        s.client.try_swap(&s.bob, &s.token0, &s.token2, &10, &0, &None, &false),
        Err(Ok(DexError::PairNotFound))
    );
    // only token0 is on offer
    assert_eq!(
        s.client.try_swap(&s.bob, &s.token0, &s.token1, &10, &0, &None, &false),
        Err(Ok(DexError::InsufficientLiquidity))
    );
    assert_eq!(
        s.client.try_swap(&s.bob, &s.token1, &s.token0, &5_000, &0, &None, &true),
        Err(Ok(DexError::InsufficientLiquidity))
    );
    assert_eq!(balance(&env, &s.token1, &s.bob), INITIAL_BALANCE);
}

#[test]
fn test_estimate_matches_swap() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.deposit(&s.alice, &s.token0, &s.token1, &-20, &5, &400, &400, &0);
    s.client.place_limit_order(&s.alice, &s.token1, &s.token0, &-10, &0, &300);
    let before = s.client.list_ticks(&s.token0, &s.token1, &s.token1);

    let quoted = s.client.estimate_swap(&s.token0, &s.token1, &650, &None);
    assert_eq!(s.client.list_ticks(&s.token0, &s.token1, &s.token1), before);
    assert_eq!(balance(&env, &s.token0, &s.bob), INITIAL_BALANCE);

    let executed = s.client.swap(&s.bob, &s.token0, &s.token1, &650, &0, &None, &false);
    assert_eq!(quoted, executed);
}

#[test]
fn test_fee_tier_pool_drains_completely() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.deposit(&s.alice, &s.token0, &s.token1, &0, &30, &0, &1000, &0);

    let out = s.client.swap(&s.bob, &s.token0, &s.token1, &2000, &0, &None, &false);
    assert_eq!((out.amount_in, out.amount_out, out.fees), (1000, 997, 3));
    assert!(s.client.list_ticks(&s.token0, &s.token1, &s.token1).is_empty());
    assert_eq!(
        s.client.try_swap(&s.bob, &s.token0, &s.token1, &100, &0, &None, &false),
        Err(Ok(DexError::InsufficientLiquidity))
    );

    // the fee stays with the providers and the contract ends empty
    let (amount0, amount1) = s.client.withdraw(&s.alice, &s.token0, &s.token1, &0, &30, &1000);
    assert_eq!((amount0, amount1), (1000, 3));
    assert_eq!(balance(&env, &s.token0, &s.client.address), 0);
    assert_eq!(balance(&env, &s.token1, &s.client.address), 0);
}

#[test]
fn test_drained_pool_serves_reverse_direction() {
    let env = Env::default();
    let s = setup_dex(&env);
    s.client.deposit(&s.alice, &s.token0, &s.token1, &0, &0, &100, &0, &0);

    s.client.swap(&s.bob, &s.token1, &s.token0, &100, &0, &None, &true);
    assert!(s.client.list_ticks(&s.token0, &s.token1, &s.token0).is_empty());

    let back = s.client.swap(&s.bob, &s.token0, &s.token1, &40, &40, &None, &true);
    assert_eq!(back.amount_out, 40);
    let pool = s.client.get_pool(&s.token0, &s.token1, &0, &0).unwrap();
    assert_eq!((pool.reserve0, pool.reserve1), (40, 60));
}
