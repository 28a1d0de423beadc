use soroban_sdk::Env;
use tickbook_math::*;

// ============================================================
// EXACT DECIMAL TESTS
// ============================================================

#[test]
fn test_one_is_normalized() {
    assert_eq!(ExactDecimal::ONE, ExactDecimal::from_integer(1));
    assert_eq!(ExactDecimal::ONE, ExactDecimal::new(1000, -3));
}

#[test]
fn test_mul_by_one_is_identity() {
    let p = price_from_tick(1234).unwrap();
    assert_eq!(p.mul(&ExactDecimal::ONE), p);
    assert_eq!(ExactDecimal::ONE.mul(&p), p);
}

#[test]
fn test_mul_by_zero() {
    let p = price_from_tick(-77).unwrap();
    assert!(p.mul(&ExactDecimal::ZERO).is_zero());
}

#[test]
fn test_recip_of_integer() {
    let four = ExactDecimal::from_integer(4);
    assert_eq!(four.recip().unwrap(), ExactDecimal::new(25, -2));
}

#[test]
fn test_recip_of_zero_fails() {
    assert_eq!(ExactDecimal::ZERO.recip(), Err(DexError::Overflow));
}

#[test]
fn test_ordering() {
    let half = ExactDecimal::new(5, -1);
    let two = ExactDecimal::from_integer(2);
    let ten = ExactDecimal::from_integer(10);
    assert!(ExactDecimal::ZERO < half);
    assert!(half < ExactDecimal::ONE);
    assert!(ExactDecimal::ONE < two);
    assert!(two < ten);
}

// ============================================================
// AMOUNT CONVERSION TESTS
// ============================================================

#[test]
fn test_mul_amount_rounding() {
    let env = Env::default();
    // 1.0001 * 500 = 500.05
    let p = price_from_tick(1).unwrap();
    assert_eq!(p.mul_amount(&env, 500, Rounding::Down).unwrap(), 500);
    assert_eq!(p.mul_amount(&env, 500, Rounding::Up).unwrap(), 501);
}

#[test]
fn test_mul_amount_exact_has_no_ceiling_bump() {
    let env = Env::default();
    let half = ExactDecimal::new(5, -1);
    assert_eq!(half.mul_amount(&env, 1000, Rounding::Down).unwrap(), 500);
    assert_eq!(half.mul_amount(&env, 1000, Rounding::Up).unwrap(), 500);
}

#[test]
fn test_mul_amount_positive_exponent() {
    let env = Env::default();
    let big = ExactDecimal::from_integer(1_000_000_000_000_000_000);
    assert_eq!(big.exponent, 1);
    assert_eq!(big.mul_amount(&env, 3, Rounding::Down).unwrap(), 3_000_000_000_000_000_000);
}

#[test]
fn test_mul_amount_rejects_negative() {
    let env = Env::default();
    assert_eq!(
        ExactDecimal::ONE.mul_amount(&env, -1, Rounding::Down),
        Err(DexError::InvalidAmount)
    );
}

#[test]
fn test_mul_amount_overflow() {
    let env = Env::default();
    let p = price_from_tick(MAX_TICK).unwrap();
    assert_eq!(p.mul_amount(&env, i128::MAX, Rounding::Down), Err(DexError::Overflow));
}

#[test]
fn test_mul_div_rounding() {
    let env = Env::default();
    assert_eq!(mul_div(&env, 10, 10, 3, Rounding::Down).unwrap(), 33);
    assert_eq!(mul_div(&env, 10, 10, 3, Rounding::Up).unwrap(), 34);
    assert_eq!(mul_div(&env, 9, 10, 3, Rounding::Up).unwrap(), 30);
}

#[test]
fn test_mul_div_large_intermediate() {
    let env = Env::default();
    let a = i128::MAX / 2;
    assert_eq!(mul_div(&env, a, 4, 4, Rounding::Down).unwrap(), a);
}

#[test]
fn test_mul_div_zero_denominator() {
    let env = Env::default();
    assert_eq!(mul_div(&env, 1, 1, 0, Rounding::Down), Err(DexError::Overflow));
}

#[test]
fn test_fee_rounds_up() {
    let env = Env::default();
    assert_eq!(fee_for(&env, 1000, 30).unwrap(), 3);
    assert_eq!(fee_for(&env, 1001, 30).unwrap(), 4);
    assert_eq!(fee_for(&env, 1, 1).unwrap(), 1);
    assert_eq!(fee_for(&env, 1000, 0).unwrap(), 0);
}

#[test]
fn test_checked_helpers() {
    assert_eq!(try_add(1, 2), Ok(3));
    assert_eq!(try_add(i128::MAX, 1), Err(DexError::Overflow));
    assert_eq!(try_sub(i128::MIN, 1), Err(DexError::Overflow));
}
