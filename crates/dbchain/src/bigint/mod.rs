//! Fixed-capacity non-negative integers.
//!
//! A [`FixedBigInt`] is a bitset of `capacity` bits packed into `u64`
//! limbs, bit 0 being the least significant. It supports exactly what the
//! chain engine needs: bit tests, the index of the highest set bit,
//! construction from decimal or hexadecimal text, and floor division by 3.
//!
//! # Division by 3
//!
//! [`FixedBigInt::divide_by_3`] is long division in base 2 with a base-3
//! remainder. Bits are scanned from the most significant down with a
//! carry `c ∈ {0, 1, 2}`:
//!
//! ```text
//! x = 2c + bit
//! x >= 3  →  quotient bit 1, c = x - 3
//! x <  3  →  quotient bit 0, c = x
//! ```
//!
//! # Example
//!
//! ```
//! use dbchain::{FixedBigInt, Radix};
//!
//! let n = FixedBigInt::parse("242", Radix::Decimal, 64).unwrap();
//! let q = n.divide_by_3();
//! assert_eq!(format!("{q:x}"), "50"); // 80
//! assert_eq!(q.highest_set_index(), Some(6));
//! ```

mod parse;

#[cfg(test)]
mod tests;

pub use parse::Radix;

use core::fmt;

use crate::constants::{limbs_for, LIMB_BITS};
use crate::error::BigIntError;

/// A non-negative integer with a fixed bit capacity.
///
/// The capacity is chosen at construction and never changes. Values are
/// treated as immutable snapshots by the chain engine: each level's value
/// is produced by [`div3_into`](Self::div3_into) into a separate buffer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FixedBigInt {
    limbs: Box<[u64]>,
    capacity: usize,
    /// Index of the most significant set bit; `None` iff the value is zero.
    highest: Option<usize>,
}

impl FixedBigInt {
    /// Creates the value zero with room for `capacity` bits.
    #[must_use]
    pub fn zero(capacity: usize) -> Self {
        Self {
            limbs: vec![0; limbs_for(capacity)].into_boxed_slice(),
            capacity,
            highest: None,
        }
    }

    /// Creates an integer from a `u128`.
    ///
    /// # Errors
    ///
    /// Returns [`BigIntError::CapacityExceeded`] if `value` needs more than
    /// `capacity` bits.
    ///
    /// # Example
    ///
    /// ```
    /// use dbchain::FixedBigInt;
    ///
    /// let n = FixedBigInt::from_u128(23, 8).unwrap();
    /// assert_eq!(n.bit_len(), 5);
    /// assert!(FixedBigInt::from_u128(256, 8).is_err());
    /// ```
    pub fn from_u128(value: u128, capacity: usize) -> Result<Self, BigIntError> {
        let mut n = Self::zero(capacity);
        let mut rest = value;
        let mut index = 0;
        while rest != 0 {
            if rest & 1 == 1 {
                n.set(index)?;
            }
            rest >>= 1;
            index += 1;
        }
        Ok(n)
    }

    /// Parses `text` in the given radix into an integer of `capacity` bits.
    ///
    /// Hexadecimal text is decoded nibble by nibble, least significant
    /// nibble last in the string. Decimal text is converted by repeated
    /// halving of the digit string. Leading zeros are accepted in both.
    ///
    /// # Errors
    ///
    /// - [`BigIntError::Empty`] if `text` has no characters.
    /// - [`BigIntError::InvalidDigit`] for a character outside the radix.
    /// - [`BigIntError::CapacityExceeded`] if the value needs more than
    ///   `capacity` bits.
    pub fn parse(text: &str, radix: Radix, capacity: usize) -> Result<Self, BigIntError> {
        match radix {
            Radix::Decimal => parse::from_decimal(text, capacity),
            Radix::Hexadecimal => parse::from_hex(text, capacity),
        }
    }

    /// Capacity in bits.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// True iff no bit is set.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.highest.is_none()
    }

    /// Index of the most significant set bit, `None` for zero.
    #[inline]
    #[must_use]
    pub const fn highest_set_index(&self) -> Option<usize> {
        self.highest
    }

    /// Number of significant bits (0 for zero).
    #[inline]
    #[must_use]
    pub const fn bit_len(&self) -> usize {
        match self.highest {
            Some(index) => index + 1,
            None => 0,
        }
    }

    /// Value of bit `index`; false for any index at or past the capacity.
    #[inline]
    #[must_use]
    pub fn test(&self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        (self.limbs[index / LIMB_BITS] >> (index % LIMB_BITS)) & 1 == 1
    }

    /// Sets bit `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BigIntError::CapacityExceeded`] if `index` is not below
    /// the capacity; the value is left unchanged.
    pub fn set(&mut self, index: usize) -> Result<(), BigIntError> {
        if index >= self.capacity {
            return Err(BigIntError::CapacityExceeded {
                index,
                capacity: self.capacity,
            });
        }
        self.put(index);
        Ok(())
    }

    /// Floor division by 3, returned as a fresh integer of the same
    /// capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use dbchain::FixedBigInt;
    ///
    /// let n = FixedBigInt::from_u128(1000, 16).unwrap();
    /// assert_eq!(n.divide_by_3(), FixedBigInt::from_u128(333, 16).unwrap());
    /// ```
    #[must_use]
    pub fn divide_by_3(&self) -> Self {
        let mut quotient = Self::zero(self.capacity);
        self.div3_into(&mut quotient);
        quotient
    }

    /// Floor division by 3 into a caller-owned buffer.
    ///
    /// `dest` takes this integer's capacity; its storage is only
    /// reallocated when the capacities differ.
    pub fn div3_into(&self, dest: &mut Self) {
        if dest.limbs.len() != self.limbs.len() {
            dest.limbs = vec![0; self.limbs.len()].into_boxed_slice();
        } else {
            dest.limbs.fill(0);
        }
        dest.capacity = self.capacity;
        dest.highest = None;

        let mut carry = 0u8;
        for index in (0..self.bit_len()).rev() {
            let x = 2 * carry + u8::from(self.test(index));
            if x >= 3 {
                dest.put(index);
                carry = x - 3;
            } else {
                carry = x;
            }
        }
    }

    /// Sets a bit known to be below the capacity.
    #[inline]
    fn put(&mut self, index: usize) {
        debug_assert!(index < self.capacity);
        self.limbs[index / LIMB_BITS] |= 1 << (index % LIMB_BITS);
        if self.highest.map_or(true, |h| index > h) {
            self.highest = Some(index);
        }
    }
}

impl fmt::LowerHex for FixedBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(highest) = self.highest else {
            return f.write_str("0");
        };
        for nibble in (0..=highest / 4).rev() {
            let digit = (0..4).fold(0u32, |acc, k| {
                acc | (u32::from(self.test(nibble * 4 + k)) << k)
            });
            // A nibble is always below 16.
            let c = char::from_digit(digit, 16).unwrap_or('?');
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FixedBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBigInt(0x{self:x}, capacity = {})", self.capacity)
    }
}
