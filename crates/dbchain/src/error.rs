//! Error types for integer construction and chain computation.

use thiserror::Error;

use crate::bigint::Radix;
use crate::chain::Parity;

/// Errors raised while building a [`FixedBigInt`](crate::FixedBigInt).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BigIntError {
    /// The input text contained no digits.
    #[error("empty integer literal")]
    Empty,

    /// A character is not a digit of the selected radix.
    #[error("invalid {radix} digit '{character}' at position {position}")]
    InvalidDigit {
        /// The offending character.
        character: char,
        /// Character offset in the input text.
        position: usize,
        /// Radix the text was parsed in.
        radix: Radix,
    },

    /// A set bit would land at or beyond the fixed capacity.
    #[error("bit {index} does not fit in a {capacity}-bit integer")]
    CapacityExceeded {
        /// Index of the bit that did not fit.
        index: usize,
        /// Capacity of the integer in bits.
        capacity: usize,
    },
}

/// Errors raised by [`ChainEngine`](crate::ChainEngine) and
/// [`ChainDecoder`](crate::ChainDecoder).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The input could not be turned into an integer.
    #[error(transparent)]
    BigInt(#[from] BigIntError),

    /// The input is wider than the engine was sized for.
    #[error("input is {bits} bits wide but the engine supports at most {max_bits}")]
    CapacityExceeded {
        /// Bit length of the input.
        bits: usize,
        /// Configured maximum bit length.
        max_bits: usize,
    },

    /// The engine would need tables wider than the supported limit.
    #[error("engine width of {max_bits} bits exceeds the supported {limit}")]
    UnsupportedWidth {
        /// Requested maximum bit length.
        max_bits: usize,
        /// Largest supported maximum bit length.
        limit: usize,
    },

    /// Backtracking reached a state the trace has no move for.
    ///
    /// The walk left the table or hit a cell not written by the latest
    /// run. Only reachable when a terminal that was not produced by the
    /// engine run backing the trace is decoded.
    #[error("trace has no predecessor for {parity} state at position {position}, level {level}")]
    UnreachableState {
        /// Parity of the state being decoded.
        parity: Parity,
        /// Bit position of the state.
        position: usize,
        /// Level of the state.
        level: usize,
    },
}

/// Result alias for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
