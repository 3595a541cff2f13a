//! Backtracking from the terminal cell to the origin.

use core::iter::FusedIterator;

use super::trace::{Axis, TraceTable};
use super::{Parity, Term, Terminal};
use crate::error::ChainError;

/// One-shot iterator over the terms of the chain ending at a terminal.
///
/// Starting from the positive state of the terminal cell, each step reads
/// the cell's move, walks to the predecessor (`j - 1` for a vertical move,
/// `i - 1` for a horizontal one) and switches to the predecessor's parity.
/// A move that placed a term yields `±2^i·3^j` at the predecessor's
/// coordinates. Iteration ends after `weight` terms, so the terms come out
/// most significant first. A state the trace has no move for, outside the
/// table or not written by the run that produced the terminal, ends the
/// iteration with [`ChainError::UnreachableState`].
///
/// # Example
///
/// ```
/// use dbchain::{ChainDecoder, ChainEngine, ChainParams, FixedBigInt, Sign};
///
/// let mut engine = ChainEngine::new(ChainParams::new(16)).unwrap();
/// let terminal = engine.optimize(&FixedBigInt::from_u128(7, 16).unwrap()).unwrap();
///
/// let mut decoder = ChainDecoder::new(engine.trace(), terminal);
/// assert_eq!(decoder.remaining(), 2);
/// let lead = decoder.next().unwrap().unwrap();
/// assert_eq!((lead.sign, lead.exp2, lead.exp3), (Sign::Plus, 3, 0));
/// assert_eq!(decoder.remaining(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ChainDecoder<'a> {
    trace: &'a TraceTable,
    position: usize,
    level: usize,
    parity: Parity,
    remaining: u32,
}

impl<'a> ChainDecoder<'a> {
    /// Starts decoding at `terminal`.
    #[must_use]
    pub fn new(trace: &'a TraceTable, terminal: Terminal) -> Self {
        Self {
            trace,
            position: terminal.position,
            level: terminal.level,
            parity: Parity::Positive,
            remaining: terminal.weight,
        }
    }

    /// Terms not yet produced.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    fn unreachable(&mut self) -> ChainError {
        let err = ChainError::UnreachableState {
            parity: self.parity,
            position: self.position,
            level: self.level,
        };
        self.remaining = 0;
        err
    }
}

impl Iterator for ChainDecoder<'_> {
    type Item = Result<Term, ChainError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let Some(mv) = self.trace.get(self.level, self.position, self.parity) else {
                return Some(Err(self.unreachable()));
            };
            let predecessor = match mv.axis {
                Axis::Vertical => self.level.checked_sub(1).map(|j| (self.position, j)),
                Axis::Horizontal => self.position.checked_sub(1).map(|i| (i, self.level)),
            };
            let Some((position, level)) = predecessor else {
                return Some(Err(self.unreachable()));
            };
            self.position = position;
            self.level = level;
            self.parity = mv.from;
            if let Some(sign) = mv.effect.sign() {
                self.remaining -= 1;
                return Some(Ok(Term::new(sign, self.position, self.level)));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}

impl FusedIterator for ChainDecoder<'_> {}
