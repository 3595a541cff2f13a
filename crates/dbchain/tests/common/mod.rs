//! Reference arithmetic shared by the integration tests.

#![allow(dead_code)]

use dbchain::{Chain, FixedBigInt, Sign};
use num_bigint::{BigInt, BigUint};

/// Converts through the hex rendering.
pub fn to_biguint(n: &FixedBigInt) -> BigUint {
    BigUint::parse_bytes(format!("{n:x}").as_bytes(), 16).expect("LowerHex emits hex digits")
}

/// Signed sum of the chain's terms.
pub fn evaluate(chain: &Chain) -> BigInt {
    chain.iter().fold(BigInt::from(0u8), |acc, term| {
        let magnitude =
            BigInt::from(2u8).pow(term.exp2 as u32) * BigInt::from(3u8).pow(term.exp3 as u32);
        match term.sign {
            Sign::Plus => acc + magnitude,
            Sign::Minus => acc - magnitude,
        }
    })
}

/// Terms come out most significant first with non-increasing exponents
/// and no repeated coordinates.
pub fn assert_chain_order(chain: &Chain) {
    for pair in chain.terms().windows(2) {
        let (hi, lo) = (pair[0], pair[1]);
        assert!(
            hi.exp2 >= lo.exp2 && hi.exp3 >= lo.exp3,
            "terms out of order: {hi:?} before {lo:?}"
        );
        assert!(
            (hi.exp2, hi.exp3) != (lo.exp2, lo.exp3),
            "repeated term coordinates: {hi:?}"
        );
    }
}

/// Whether `v` is a signed sum of at most `budget` chain terms.
///
/// The least significant term `±2^i·3^j` of a chain divides every other
/// term, so `2^i·3^j` divides `v` and the rest is a chain for
/// `v / 2^i·3^j ∓ 1` scaled back up.
fn reachable(v: i64, budget: u32) -> bool {
    if v == 0 {
        return true;
    }
    if budget == 0 {
        return false;
    }
    let mut p2 = 1i64;
    while v % p2 == 0 {
        let mut d = p2;
        while v % d == 0 {
            let u = v / d;
            if reachable(u - 1, budget - 1) || reachable(u + 1, budget - 1) {
                return true;
            }
            d *= 3;
        }
        p2 *= 2;
    }
    false
}

/// Minimum chain weight of `v` by iterative deepening.
pub fn brute_force_weight(v: u64) -> u32 {
    let v = i64::try_from(v).expect("small test values");
    (0..).find(|&k| reachable(v, k)).unwrap_or(u32::MAX)
}
