//! Double-base chains and the dynamic program that finds the shortest one.
//!
//! A double-base chain writes `n` as a signed sum of terms `±2^i·3^j`
//! whose exponents are non-decreasing in both `i` and `j`. Each term costs
//! one point addition in a scalar multiplication; the doublings and
//! triplings in between are cheap. The engine minimises the number of
//! terms (the *weight*).
//!
//! # Pipeline
//!
//! ```text
//! FixedBigInt ──► ChainEngine::optimize ──► Terminal (weight, i, j)
//!                        │
//!                        └─ fills TraceTable ──► ChainDecoder ──► Chain
//! ```
//!
//! # State space
//!
//! Level `j` holds `a = floor(n / 3^j)`. At `(i, j)` the engine tracks two
//! weights: the shortest chain for `n mod 2^i·3^j` (*positive* parity) and
//! for `(n mod 2^i·3^j) - 2^i·3^j` (*negative* parity). A horizontal step
//! `i → i+1` consumes bit `i` of `a`; a vertical step `j → j+1` consumes
//! the next base-3 digit. Once `i` passes the bit length of `a`, the
//! positive state at `(i, j)` is a chain for `n` itself.
//!
//! # Example
//!
//! ```
//! use dbchain::{ChainEngine, ChainParams, FixedBigInt, Sign, Term};
//!
//! let mut engine = ChainEngine::new(ChainParams::new(64)).unwrap();
//! let n = FixedBigInt::from_u128(23, 64).unwrap();
//! let chain = engine.chain(&n).unwrap();
//!
//! // 23 = 2^3·3 - 1
//! assert_eq!(chain.weight(), 2);
//! assert_eq!(
//!     chain.terms(),
//!     &[Term::new(Sign::Plus, 3, 1), Term::new(Sign::Minus, 0, 0)]
//! );
//! assert_eq!(chain.to_string(), "2^(3)*3^(1) - 2^(0)*3^(0)");
//! ```

mod decoder;
mod engine;
mod trace;

pub use decoder::ChainDecoder;
pub use engine::{ChainEngine, ChainParams, Pruning, Terminal, Weight, UNREACHED};
pub use trace::{Axis, Effect, Move, TraceTable};

use core::fmt;

use crate::bigint::FixedBigInt;
use crate::error::Result;

/// Sign of a chain term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Sign {
    /// The term is added.
    Plus,
    /// The term is subtracted.
    Minus,
}

impl Sign {
    /// `'+'` or `'-'`.
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

/// Parity of a DP state.
///
/// A positive state holds a chain for `n mod 2^i·3^j`; a negative state
/// holds a chain for that residue minus `2^i·3^j`, i.e. one that still
/// owes a compensating term at a more significant position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    /// Chain matches the residue exactly.
    Positive,
    /// Chain undershoots the residue by `2^i·3^j`.
    Negative,
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => f.write_str("positive"),
            Self::Negative => f.write_str("negative"),
        }
    }
}

/// One signed term `±2^exp2·3^exp3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Term {
    /// Whether the term is added or subtracted.
    pub sign: Sign,
    /// Exponent of 2.
    pub exp2: usize,
    /// Exponent of 3.
    pub exp3: usize,
}

impl Term {
    /// Creates a term.
    #[inline]
    #[must_use]
    pub const fn new(sign: Sign, exp2: usize, exp3: usize) -> Self {
        Self { sign, exp2, exp3 }
    }
}

/// Formats the unsigned magnitude, `2^(i)*3^(j)`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "2^({})*3^({})", self.exp2, self.exp3)
    }
}

/// A decoded double-base chain.
///
/// Terms are kept in decode order: the most significant term first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Chain {
    terms: Vec<Term>,
}

impl Chain {
    /// Number of terms, in the unit of [`Terminal::weight`].
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Weight {
        Weight::try_from(self.terms.len()).unwrap_or(UNREACHED)
    }

    /// True for the empty chain (the representation of zero).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The terms, most significant first.
    #[inline]
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Largest exponent of 2: the doublings a scalar multiplication
    /// driven by this chain performs.
    #[must_use]
    pub fn doublings(&self) -> usize {
        self.terms.iter().map(|t| t.exp2).max().unwrap_or(0)
    }

    /// Largest exponent of 3: the triplings.
    #[must_use]
    pub fn triplings(&self) -> usize {
        self.terms.iter().map(|t| t.exp3).max().unwrap_or(0)
    }

    /// Iterates over the terms.
    pub fn iter(&self) -> core::slice::Iter<'_, Term> {
        self.terms.iter()
    }
}

impl From<Vec<Term>> for Chain {
    fn from(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}

impl FromIterator<Term> for Chain {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Chain {
    type Item = Term;
    type IntoIter = std::vec::IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Term;
    type IntoIter = core::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Renders `2^(i)*3^(j) - 2^(k)*3^(l) + ...`; the empty chain is `0`.
impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (k, term) in self.terms.iter().enumerate() {
            match (k, term.sign) {
                (0, Sign::Plus) => {}
                (0, Sign::Minus) => f.write_str("-")?,
                (_, sign) => write!(f, " {} ", sign.symbol())?,
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// Computes a minimum-weight chain for `n` with a one-off engine sized to
/// `n`'s bit length.
///
/// # Errors
///
/// Returns [`ChainError::UnsupportedWidth`](crate::ChainError::UnsupportedWidth)
/// if `n` is wider than [`MAX_SUPPORTED_BITS`](crate::constants::MAX_SUPPORTED_BITS).
pub fn optimal_chain(n: &FixedBigInt) -> Result<Chain> {
    ChainEngine::new(ChainParams::new(n.bit_len()))?.chain(n)
}
