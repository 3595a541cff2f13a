//! Tests for fixed-capacity integers.

use super::{FixedBigInt, Radix};
use crate::error::BigIntError;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_zero() {
    let z = FixedBigInt::zero(64);
    assert!(z.is_zero());
    assert_eq!(z.highest_set_index(), None);
    assert_eq!(z.bit_len(), 0);
    assert_eq!(z.capacity(), 64);
    assert_eq!(format!("{z:x}"), "0");
}

#[test]
fn test_from_u128() {
    let n = FixedBigInt::from_u128(0b1011, 8).unwrap();
    assert!(n.test(0));
    assert!(n.test(1));
    assert!(!n.test(2));
    assert!(n.test(3));
    assert_eq!(n.highest_set_index(), Some(3));
    assert!(!n.is_zero());
}

#[test]
fn test_from_u128_capacity() {
    assert!(FixedBigInt::from_u128(255, 8).is_ok());
    assert_eq!(
        FixedBigInt::from_u128(256, 8),
        Err(BigIntError::CapacityExceeded {
            index: 8,
            capacity: 8
        })
    );
}

#[test]
fn test_test_past_capacity() {
    let n = FixedBigInt::from_u128(u128::MAX, 128).unwrap();
    assert!(n.test(127));
    assert!(!n.test(128));
    assert!(!n.test(10_000));
}

#[test]
fn test_set_updates_highest() {
    let mut n = FixedBigInt::zero(130);
    n.set(70).unwrap();
    assert_eq!(n.highest_set_index(), Some(70));
    n.set(3).unwrap();
    assert_eq!(n.highest_set_index(), Some(70));
    n.set(129).unwrap();
    assert_eq!(n.highest_set_index(), Some(129));
    assert!(n.set(130).is_err());
    assert_eq!(n.highest_set_index(), Some(129));
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_hex() {
    let n = FixedBigInt::parse("1f", Radix::Hexadecimal, 16).unwrap();
    assert_eq!(n, FixedBigInt::from_u128(31, 16).unwrap());

    let upper = FixedBigInt::parse("DEADbeef", Radix::Hexadecimal, 32).unwrap();
    assert_eq!(upper, FixedBigInt::from_u128(0xdead_beef, 32).unwrap());
}

#[test]
fn test_parse_hex_leading_zeros() {
    // Leading zero nibbles do not count against the capacity.
    let n = FixedBigInt::parse("000000ff", Radix::Hexadecimal, 8).unwrap();
    assert_eq!(n.bit_len(), 8);
}

#[test]
fn test_parse_decimal() {
    let n = FixedBigInt::parse("23", Radix::Decimal, 16).unwrap();
    assert_eq!(n, FixedBigInt::from_u128(23, 16).unwrap());

    let big = FixedBigInt::parse("340282366920938463463374607431768211455", Radix::Decimal, 128)
        .unwrap();
    assert_eq!(big, FixedBigInt::from_u128(u128::MAX, 128).unwrap());
}

#[test]
fn test_parse_zero() {
    for text in ["0", "000"] {
        assert!(FixedBigInt::parse(text, Radix::Decimal, 8).unwrap().is_zero());
        assert!(FixedBigInt::parse(text, Radix::Hexadecimal, 8).unwrap().is_zero());
    }
}

#[test]
fn test_parse_empty() {
    assert_eq!(
        FixedBigInt::parse("", Radix::Decimal, 8),
        Err(BigIntError::Empty)
    );
}

#[test]
fn test_parse_invalid_digit() {
    assert_eq!(
        FixedBigInt::parse("12a4", Radix::Decimal, 32),
        Err(BigIntError::InvalidDigit {
            character: 'a',
            position: 2,
            radix: Radix::Decimal
        })
    );
    assert_eq!(
        FixedBigInt::parse("ffg", Radix::Hexadecimal, 32),
        Err(BigIntError::InvalidDigit {
            character: 'g',
            position: 2,
            radix: Radix::Hexadecimal
        })
    );
    assert!(FixedBigInt::parse("-5", Radix::Decimal, 32).is_err());
    assert!(FixedBigInt::parse("0x10", Radix::Hexadecimal, 32).is_err());
}

#[test]
fn test_parse_capacity() {
    assert!(FixedBigInt::parse("255", Radix::Decimal, 8).is_ok());
    assert_eq!(
        FixedBigInt::parse("256", Radix::Decimal, 8),
        Err(BigIntError::CapacityExceeded {
            index: 8,
            capacity: 8
        })
    );
    assert!(FixedBigInt::parse("100", Radix::Hexadecimal, 8).is_err());
}

#[test]
fn test_parse_radixes_agree() {
    for v in [1u128, 2, 3, 23, 242, 1000, 4095, 65_537, u64::MAX as u128] {
        let dec = FixedBigInt::parse(&v.to_string(), Radix::Decimal, 80).unwrap();
        let hex = FixedBigInt::parse(&format!("{v:x}"), Radix::Hexadecimal, 80).unwrap();
        assert_eq!(dec, hex, "value {v}");
    }
}

// ============================================================================
// Division by 3
// ============================================================================

#[test]
fn test_divide_by_3_small() {
    for v in 0u128..2000 {
        let n = FixedBigInt::from_u128(v, 16).unwrap();
        let expected = FixedBigInt::from_u128(v / 3, 16).unwrap();
        assert_eq!(n.divide_by_3(), expected, "{v} / 3");
    }
}

#[test]
fn test_divide_by_3_wide() {
    let v = u128::MAX - 12_345;
    let n = FixedBigInt::from_u128(v, 132).unwrap();
    assert_eq!(n.divide_by_3(), FixedBigInt::from_u128(v / 3, 132).unwrap());
}

#[test]
fn test_divide_by_3_to_zero() {
    let mut n = FixedBigInt::from_u128(3u128.pow(20) + 7, 64).unwrap();
    let mut levels = 0;
    while !n.is_zero() {
        n = n.divide_by_3();
        levels += 1;
    }
    assert_eq!(levels, 21);
}

#[test]
fn test_div3_into_reuses_buffer() {
    let n = FixedBigInt::from_u128(1_000_000, 64).unwrap();
    let mut dest = FixedBigInt::from_u128(u64::MAX as u128, 64).unwrap();
    n.div3_into(&mut dest);
    assert_eq!(dest, FixedBigInt::from_u128(333_333, 64).unwrap());

    // A mismatched buffer adopts the source capacity.
    let mut small = FixedBigInt::zero(4);
    n.div3_into(&mut small);
    assert_eq!(small.capacity(), 64);
    assert_eq!(small, FixedBigInt::from_u128(333_333, 64).unwrap());
}

// ============================================================================
// Formatting
// ============================================================================

#[test]
fn test_lower_hex() {
    let n = FixedBigInt::from_u128(0x1_0abc, 40).unwrap();
    assert_eq!(format!("{n:x}"), "10abc");
    assert_eq!(
        format!("{n:?}"),
        "FixedBigInt(0x10abc, capacity = 40)"
    );
}
