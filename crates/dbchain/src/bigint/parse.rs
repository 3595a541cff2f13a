//! Text construction for [`FixedBigInt`].

use core::fmt;

use super::FixedBigInt;
use crate::error::BigIntError;

/// Radix of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    /// Base 10.
    Decimal,
    /// Base 16, case-insensitive, no prefix.
    Hexadecimal,
}

impl Radix {
    /// Numeric base of this radix.
    #[inline]
    #[must_use]
    pub const fn base(self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal => f.write_str("decimal"),
            Self::Hexadecimal => f.write_str("hexadecimal"),
        }
    }
}

/// Validates `text` and returns its digit values, most significant first.
fn digits(text: &str, radix: Radix) -> Result<Vec<u8>, BigIntError> {
    if text.is_empty() {
        return Err(BigIntError::Empty);
    }
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            character
                .to_digit(radix.base())
                .map(|d| d as u8)
                .ok_or(BigIntError::InvalidDigit {
                    character,
                    position,
                    radix,
                })
        })
        .collect()
}

/// Each hex digit contributes four bits, the last digit being bits 0..4.
pub(super) fn from_hex(text: &str, capacity: usize) -> Result<FixedBigInt, BigIntError> {
    let digits = digits(text, Radix::Hexadecimal)?;
    let mut n = FixedBigInt::zero(capacity);
    for (nibble, &digit) in digits.iter().rev().enumerate() {
        for k in 0..4 {
            if (digit >> k) & 1 == 1 {
                n.set(nibble * 4 + k)?;
            }
        }
    }
    Ok(n)
}

/// Repeated halving of the decimal digit string.
///
/// Each pass divides the digit string by 2 in place, most significant
/// digit first; the final carry is the next output bit. Passes continue
/// until every digit is zero.
pub(super) fn from_decimal(text: &str, capacity: usize) -> Result<FixedBigInt, BigIntError> {
    let mut digits = digits(text, Radix::Decimal)?;
    let mut n = FixedBigInt::zero(capacity);
    let mut index = 0;
    while let Some(start) = digits.iter().position(|&d| d != 0) {
        let mut carry = 0u8;
        for digit in &mut digits[start..] {
            let x = carry * 10 + *digit;
            *digit = x / 2;
            carry = x % 2;
        }
        if carry == 1 {
            n.set(index)?;
        }
        index += 1;
    }
    Ok(n)
}
