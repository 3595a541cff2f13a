//! End-to-end scenarios through the public API.

mod common;

use common::{assert_chain_order, evaluate, to_biguint};
use dbchain::{
    optimal_chain, BigIntError, ChainEngine, ChainError, ChainParams, FixedBigInt, Pruning,
    Radix, Sign, Term, MAX_SUPPORTED_BITS,
};
use num_bigint::BigInt;

/// A 512-bit scalar.
const SCALAR_512: &str = "b518b0217e7f9c3701b8d6bc3d8757c8b961d1b2acb3355ca833c9d5d538b0e0\
                          113d44f37feedf5a3cd5617fc979cd1375f60e4c7006b079b67a73b2ea660ab5";

const SCALAR_512_DECIMAL: &str = "948479004444202047879260333045940859363966390167820372156680354\
                                  358469068289324512269477806363593563655718474413401246568252045\
                                  4025356558240664628285016757";

#[test]
fn test_zero_is_empty_chain() {
    let mut engine = ChainEngine::new(ChainParams::default()).unwrap();
    let n = engine.parse("0", Radix::Decimal).unwrap();
    let terminal = engine.optimize(&n).unwrap();
    assert_eq!(terminal.weight, 0);
    let chain = engine.chain(&n).unwrap();
    assert!(chain.is_empty());
    assert_eq!(chain.to_string(), "0");
}

#[test]
fn test_one() {
    let chain = optimal_chain(&FixedBigInt::from_u128(1, 8).unwrap()).unwrap();
    assert_eq!(chain.terms(), &[Term::new(Sign::Plus, 0, 0)]);
    assert_eq!(chain.to_string(), "2^(0)*3^(0)");
}

#[test]
fn test_twenty_three() {
    let mut engine = ChainEngine::new(ChainParams::default()).unwrap();
    let n = engine.parse("23", Radix::Decimal).unwrap();
    let chain = engine.chain(&n).unwrap();
    assert_eq!(chain.weight(), 2);
    assert_eq!(chain.to_string(), "2^(3)*3^(1) - 2^(0)*3^(0)");
    assert_eq!((chain.doublings(), chain.triplings()), (3, 1));
}

#[test]
fn test_one_below_power_of_three() {
    let mut engine = ChainEngine::new(ChainParams::default()).unwrap();
    let n = engine.parse("f2", Radix::Hexadecimal).unwrap();
    let chain = engine.chain(&n).unwrap();
    assert_eq!(chain.to_string(), "2^(0)*3^(5) - 2^(0)*3^(0)");
}

#[test]
fn test_one_below_power_of_two() {
    let mut engine = ChainEngine::new(ChainParams::new(128)).unwrap();
    let n = engine.parse("ffffffffffffffff", Radix::Hexadecimal).unwrap();
    let chain = engine.chain(&n).unwrap();
    assert_eq!(
        chain.terms(),
        &[Term::new(Sign::Plus, 64, 0), Term::new(Sign::Minus, 0, 0)]
    );
}

#[test]
fn test_512_bit_scalar() {
    for pruning in [Pruning::Exhaustive, Pruning::Dominated] {
        let mut engine = ChainEngine::new(ChainParams::new(512).with_pruning(pruning)).unwrap();
        let n = engine.parse(SCALAR_512, Radix::Hexadecimal).unwrap();
        assert_eq!(n.bit_len(), 512);

        let terminal = engine.optimize(&n).unwrap();
        assert_eq!(terminal.weight, 96, "{pruning:?}");

        let chain = engine.chain(&n).unwrap();
        assert_eq!(chain.weight(), 96);
        assert_eq!(evaluate(&chain), BigInt::from(to_biguint(&n)));
        assert_chain_order(&chain);
    }
}

#[test]
fn test_512_bit_scalar_decimal() {
    let engine = ChainEngine::new(ChainParams::new(512)).unwrap();
    let hex = engine.parse(SCALAR_512, Radix::Hexadecimal).unwrap();
    let dec = engine.parse(SCALAR_512_DECIMAL, Radix::Decimal).unwrap();
    assert_eq!(hex, dec);
}

#[test]
fn test_input_wider_than_engine() {
    let mut engine = ChainEngine::new(ChainParams::new(256)).unwrap();
    let n = FixedBigInt::parse(SCALAR_512, Radix::Hexadecimal, 600).unwrap();
    assert_eq!(
        engine.chain(&n),
        Err(ChainError::CapacityExceeded {
            bits: 512,
            max_bits: 256
        })
    );
}

#[test]
fn test_engine_wider_than_supported() {
    let err = ChainEngine::new(ChainParams::new(200_000)).unwrap_err();
    assert_eq!(
        err,
        ChainError::UnsupportedWidth {
            max_bits: 200_000,
            limit: MAX_SUPPORTED_BITS
        }
    );
    assert_eq!(
        err.to_string(),
        "engine width of 200000 bits exceeds the supported 8192"
    );
}

#[test]
fn test_text_wider_than_engine() {
    let engine = ChainEngine::new(ChainParams::new(256)).unwrap();
    assert!(matches!(
        engine.parse(SCALAR_512, Radix::Hexadecimal),
        Err(ChainError::BigInt(BigIntError::CapacityExceeded { capacity: 260, .. }))
    ));
}

#[test]
fn test_error_messages() {
    let engine = ChainEngine::new(ChainParams::default()).unwrap();
    let err = engine.parse("12a4", Radix::Decimal).unwrap_err();
    assert_eq!(err.to_string(), "invalid decimal digit 'a' at position 2");
    let err = engine.parse("", Radix::Hexadecimal).unwrap_err();
    assert_eq!(err.to_string(), "empty integer literal");
}
