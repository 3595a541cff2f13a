//! Capacity constants shared by the integer and the chain tables.

/// Default maximum input width in bits.
///
/// Matches a 256-bit scalar field, the common case for elliptic-curve
/// scalar multiplication.
pub const DEFAULT_MAX_BITS: usize = 256;

/// Widest engine that may be built, in bits.
///
/// The trace table is quadratic in the width: at this limit it holds
/// about 64 MiB.
pub const MAX_SUPPORTED_BITS: usize = 8192;

/// Extra columns reserved past the input width.
///
/// The level loop reads bit `size + 1` and writes the terminal columns
/// `size + 1` and `size + 2`; the overflow level writes `size + 1` of the
/// last non-zero level. Four columns cover all of them.
pub const SLACK_BITS: usize = 4;

/// Bits per storage limb of a [`FixedBigInt`](crate::FixedBigInt).
pub const LIMB_BITS: usize = u64::BITS as usize;

/// Number of limbs needed to hold `bits` bits.
#[inline]
pub const fn limbs_for(bits: usize) -> usize {
    bits.div_ceil(LIMB_BITS)
}
