//! dbchain - Minimum-Weight Double-Base Chains
//!
//! A double-base chain writes a non-negative integer `n` as a signed sum of
//! terms `±2^i·3^j` whose exponents never decrease. Scalar multiplication
//! driven by such a chain costs one point addition per term plus cheap
//! doublings and triplings, so the fewer terms the better.
//!
//! This crate finds a chain with the fewest terms by dynamic programming
//! over the implicit graph of chain prefixes.
//!
//! # Pipeline
//!
//! ```text
//! text ──► FixedBigInt ──► ChainEngine ──► Terminal ──► ChainDecoder ──► Chain
//!                               │                           ▲
//!                               └──────── TraceTable ───────┘
//! ```
//!
//! | Component | Role |
//! |-----------|------|
//! | [`FixedBigInt`] | Fixed-capacity bitset integer: bit tests, parse, `÷3` |
//! | [`ChainEngine`] | Two-parity weight recurrence, one level per `÷3` |
//! | [`TraceTable`] | Packed provenance, 4 bits per parity per cell |
//! | [`ChainDecoder`] | Walks the trace back to the origin, yielding terms |
//!
//! # Capacity
//!
//! Every table is allocated once from [`ChainParams::max_bits`] plus
//! [`SLACK_BITS`]. Inputs wider than `max_bits` are rejected with
//! [`ChainError::CapacityExceeded`] instead of being truncated, and engines
//! wider than [`MAX_SUPPORTED_BITS`] with [`ChainError::UnsupportedWidth`].
//!
//! # Example
//!
//! ```
//! use dbchain::{ChainEngine, ChainParams, Radix};
//!
//! let mut engine = ChainEngine::new(ChainParams::default()).unwrap();
//! let n = engine.parse("23", Radix::Decimal).unwrap();
//! let chain = engine.chain(&n).unwrap();
//!
//! assert_eq!(chain.weight(), 2);
//! assert_eq!(chain.to_string(), "2^(3)*3^(1) - 2^(0)*3^(0)");
//! ```
//!
//! # Logging
//!
//! The engine emits `tracing` events at `debug` (per run and per level)
//! and `trace` (each improvement of the best answer). No subscriber is
//! installed here.

#![deny(missing_docs)]

// Capacity constants
pub mod constants;

// Error taxonomy
pub mod error;

// Fixed-capacity integers and division by 3
pub mod bigint;

// Weight recurrence, trace table and decoder
pub mod chain;

pub use bigint::{FixedBigInt, Radix};
pub use chain::{
    optimal_chain, Axis, Chain, ChainDecoder, ChainEngine, ChainParams, Effect, Move, Parity,
    Pruning, Sign, Term, Terminal, TraceTable, Weight, UNREACHED,
};
pub use constants::{DEFAULT_MAX_BITS, MAX_SUPPORTED_BITS, SLACK_BITS};
pub use error::{BigIntError, ChainError, Result};

/// Prelude module for convenient imports.
///
/// ```
/// use dbchain::prelude::*;
///
/// let chain = optimal_chain(&FixedBigInt::from_u128(5, 8).unwrap()).unwrap();
/// assert_eq!(chain.weight(), 2);
/// ```
pub mod prelude {
    pub use crate::bigint::{FixedBigInt, Radix};
    pub use crate::chain::{
        optimal_chain, Chain, ChainDecoder, ChainEngine, ChainParams, Pruning, Sign, Term,
        Terminal,
    };
    pub use crate::error::{BigIntError, ChainError};
}
