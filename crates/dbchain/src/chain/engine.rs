//! The level-by-level weight recurrence.
//!
//! # Transitions
//!
//! Horizontal steps read bit `i` of the level value `a`:
//!
//! | bit | from | effect | into     |
//! |-----|------|--------|----------|
//! | 1   | N    | keep   | N[i+1]   |
//! | 1   | P    | +1     | P[i+1]   |
//! | 1   | P    | -1     | N[i+1]   |
//! | 0   | P    | keep   | P[i+1]   |
//! | 0   | N    | -1     | N[i+1]   |
//! | 0   | N    | +1     | P[i+1]   |
//!
//! Vertical steps into level `j+1` depend on the base-3 digit
//! `k = floor(a / 2^i) - 3·floor(b / 2^i)` with `b = floor(a / 3)`:
//! `k = 1` iff `a[i] ≠ b[i]`; otherwise `k = 2` iff
//! `a[i] ⊕ a[i+1] ⊕ b[i+1]`.
//!
//! | k | offered                              |
//! |---|--------------------------------------|
//! | 1 | P' = P + 1 (plus), N' = N + 1 (minus) |
//! | 2 | N' = N (keep), N' = P + 1 (minus)    |
//! | 0 | P' = P (keep), P' = N + 1 (plus)     |
//!
//! Every relaxation is a strict improvement: ties keep the first writer.

use core::mem;

use tracing::{debug, trace};

use super::decoder::ChainDecoder;
use super::trace::{Effect, Move, TraceTable};
use super::{Chain, Parity};
use crate::bigint::{FixedBigInt, Radix};
use crate::constants::{DEFAULT_MAX_BITS, MAX_SUPPORTED_BITS, SLACK_BITS};
use crate::error::{ChainError, Result};

/// Number of terms in a (partial) chain.
pub type Weight = u32;

/// Weight of a state no chain reaches.
///
/// Relaxation adds with saturation, so this value never wins a
/// comparison.
pub const UNREACHED: Weight = Weight::MAX;

/// How aggressively dominated states are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pruning {
    /// Process every position of every level, plus the overflow level.
    Exhaustive,
    /// Skip positions whose positive and negative weights both already
    /// reach the best answer, and stop once a whole level is skipped.
    #[default]
    Dominated,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainParams {
    /// Widest input the engine accepts, in bits.
    pub max_bits: usize,
    /// Dominated-state strategy.
    pub pruning: Pruning,
}

impl ChainParams {
    /// Parameters for inputs of up to `max_bits` bits, default pruning.
    #[must_use]
    pub const fn new(max_bits: usize) -> Self {
        Self {
            max_bits,
            pruning: Pruning::Dominated,
        }
    }

    /// Replaces the pruning strategy.
    #[must_use]
    pub const fn with_pruning(self, pruning: Pruning) -> Self {
        Self { pruning, ..self }
    }

    /// Width of every table row and integer buffer.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.max_bits + SLACK_BITS
    }
}

impl Default for ChainParams {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BITS)
    }
}

/// The best answer: its weight and the trace cell to decode it from.
///
/// The terminal state is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Terminal {
    /// Minimum number of terms.
    pub weight: Weight,
    /// Bit position `i` of the terminal cell.
    pub position: usize,
    /// Level `j` of the terminal cell.
    pub level: usize,
}

impl Terminal {
    /// The empty chain at the origin, the answer for zero.
    pub const ORIGIN: Self = Self {
        weight: 0,
        position: 0,
        level: 0,
    };

    const NONE: Self = Self {
        weight: UNREACHED,
        position: 0,
        level: 0,
    };

    /// Keeps the candidate at `(position, level)` if it is strictly better.
    #[inline]
    fn offer(&mut self, weight: Weight, position: usize, level: usize) {
        if weight < self.weight {
            trace!(weight, position, level, "shorter chain");
            *self = Self {
                weight,
                position,
                level,
            };
        }
    }
}

/// Positive and negative weights of one level.
#[derive(Debug, Clone)]
struct Row {
    positive: Box<[Weight]>,
    negative: Box<[Weight]>,
}

impl Row {
    fn new(width: usize) -> Self {
        Self {
            positive: vec![UNREACHED; width].into_boxed_slice(),
            negative: vec![UNREACHED; width].into_boxed_slice(),
        }
    }

    fn reset(&mut self, upto: usize) {
        let end = upto.min(self.positive.len());
        self.positive[..end].fill(UNREACHED);
        self.negative[..end].fill(UNREACHED);
    }

    #[inline]
    fn weights(&self, position: usize) -> (Weight, Weight) {
        (self.positive[position], self.negative[position])
    }

    #[inline]
    fn slot(&mut self, parity: Parity, position: usize) -> &mut Weight {
        match parity {
            Parity::Positive => &mut self.positive[position],
            Parity::Negative => &mut self.negative[position],
        }
    }
}

/// Strict-improvement relaxation of the `target` state of `row` at
/// `position`; on success the move is recorded at `(level, position)`.
#[inline]
fn relax(
    row: &mut Row,
    trace: &mut TraceTable,
    (level, position): (usize, usize),
    target: Parity,
    candidate: Weight,
    mv: Move,
) {
    let slot = row.slot(target, position);
    if candidate < *slot {
        #[cfg(test)]
        write_log::push(*slot, candidate);
        *slot = candidate;
        let stored = trace.record(level, position, target, mv);
        debug_assert!(stored, "trace cell ({level}, {position}) outside the table");
    }
}

/// Every weight overwrite of the current thread, as `(old, new)`.
#[cfg(test)]
mod write_log {
    use core::cell::RefCell;

    use super::Weight;

    thread_local! {
        static WRITES: RefCell<Vec<(Weight, Weight)>> = const { RefCell::new(Vec::new()) };
    }

    pub(super) fn push(old: Weight, new: Weight) {
        WRITES.with(|w| w.borrow_mut().push((old, new)));
    }

    pub(super) fn take() -> Vec<(Weight, Weight)> {
        WRITES.with(|w| w.take())
    }
}

/// Horizontal steps out of `(position, level)` into `position + 1`.
#[inline]
fn horizontal(row: &mut Row, trace: &mut TraceTable, level: usize, position: usize, bit: bool) {
    use Effect::{Add, Keep, Subtract};
    use Parity::{Negative, Positive};

    let (p, n) = row.weights(position);
    let (p1, n1) = (p.saturating_add(1), n.saturating_add(1));
    let at = (level, position + 1);
    if bit {
        relax(row, trace, at, Negative, n, Move::horizontal(Negative, Keep));
        relax(row, trace, at, Positive, p1, Move::horizontal(Positive, Add));
        relax(row, trace, at, Negative, p1, Move::horizontal(Positive, Subtract));
    } else {
        relax(row, trace, at, Positive, p, Move::horizontal(Positive, Keep));
        relax(row, trace, at, Negative, n1, Move::horizontal(Negative, Subtract));
        relax(row, trace, at, Positive, n1, Move::horizontal(Negative, Add));
    }
}

/// Vertical steps out of `(position, level)` into `(position, level + 1)`.
#[inline]
fn vertical(
    (p, n): (Weight, Weight),
    next: &mut Row,
    trace: &mut TraceTable,
    (level, position): (usize, usize),
    a: &FixedBigInt,
    b: &FixedBigInt,
) {
    use Effect::{Add, Keep, Subtract};
    use Parity::{Negative, Positive};

    let (p1, n1) = (p.saturating_add(1), n.saturating_add(1));
    let at = (level + 1, position);
    let a_i = a.test(position);
    if a_i != b.test(position) {
        relax(next, trace, at, Positive, p1, Move::vertical(Positive, Add));
        relax(next, trace, at, Negative, n1, Move::vertical(Negative, Subtract));
    } else if a_i ^ a.test(position + 1) ^ b.test(position + 1) {
        relax(next, trace, at, Negative, n, Move::vertical(Negative, Keep));
        relax(next, trace, at, Negative, p1, Move::vertical(Positive, Subtract));
    } else {
        relax(next, trace, at, Positive, p, Move::vertical(Positive, Keep));
        relax(next, trace, at, Positive, n1, Move::vertical(Negative, Add));
    }
}

/// Minimum-weight double-base chain engine.
///
/// Owns the two rolling weight rows and the trace table, all sized once
/// from [`ChainParams::capacity`]. The engine can be reused: each
/// [`optimize`](Self::optimize) call reinitialises the weight rows and
/// wipes the trace cells of the previous run.
///
/// # Example
///
/// ```
/// use dbchain::{ChainEngine, ChainParams, Pruning, Radix};
///
/// let params = ChainParams::new(128).with_pruning(Pruning::Exhaustive);
/// let mut engine = ChainEngine::new(params).unwrap();
/// let n = engine.parse("18446744073709551615", Radix::Decimal).unwrap();
///
/// // 2^64 - 1
/// let chain = engine.chain(&n).unwrap();
/// assert_eq!(chain.weight(), 2);
/// assert_eq!(chain.doublings(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct ChainEngine {
    params: ChainParams,
    cur: Row,
    next: Row,
    trace: TraceTable,
}

impl ChainEngine {
    /// Allocates the tables for `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnsupportedWidth`] if `max_bits` exceeds
    /// [`MAX_SUPPORTED_BITS`].
    pub fn new(params: ChainParams) -> Result<Self> {
        let unsupported = ChainError::UnsupportedWidth {
            max_bits: params.max_bits,
            limit: MAX_SUPPORTED_BITS,
        };
        if params.max_bits > MAX_SUPPORTED_BITS {
            return Err(unsupported);
        }
        let capacity = params.capacity();
        let trace = TraceTable::new(capacity, capacity).ok_or(unsupported)?;
        Ok(Self {
            params,
            cur: Row::new(capacity),
            next: Row::new(capacity),
            trace,
        })
    }

    /// The engine's configuration.
    #[inline]
    #[must_use]
    pub const fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Trace of the last [`optimize`](Self::optimize) run.
    #[inline]
    #[must_use]
    pub const fn trace(&self) -> &TraceTable {
        &self.trace
    }

    /// Parses an input at this engine's capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::BigInt`] for malformed or oversized text.
    pub fn parse(&self, text: &str, radix: Radix) -> Result<FixedBigInt> {
        Ok(FixedBigInt::parse(text, radix, self.params.capacity())?)
    }

    /// Runs the DP for `n` and returns the best terminal cell.
    ///
    /// The trace table is filled as a side effect; decode it with
    /// [`ChainDecoder`] before the next run.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::CapacityExceeded`] if `n` is wider than
    /// `max_bits`.
    pub fn optimize(&mut self, n: &FixedBigInt) -> Result<Terminal> {
        let bits = n.bit_len();
        if bits > self.params.max_bits {
            return Err(ChainError::CapacityExceeded {
                bits,
                max_bits: self.params.max_bits,
            });
        }
        debug!(
            bits,
            capacity = self.params.capacity(),
            pruning = ?self.params.pruning,
            "optimizing double-base chain"
        );

        let capacity = self.params.capacity();
        self.cur.reset(capacity);
        self.next.reset(capacity);
        self.trace.clear();
        if n.is_zero() {
            return Ok(Terminal::ORIGIN);
        }
        self.cur.positive[0] = 0;

        let mut best = Terminal::NONE;
        let mut a = n.clone();
        let mut b = FixedBigInt::zero(a.capacity());
        let mut level = 0;
        let mut last_size = 0;

        while !a.is_zero() {
            a.div3_into(&mut b);
            let size = a.bit_len();
            let skipped = self.step_level(&a, &b, level, size, best.weight);

            for position in [size + 1, size + 2] {
                best.offer(self.cur.positive[position], position, level);
            }
            let next_size = b.bit_len();
            for position in [next_size + 1, next_size + 2] {
                best.offer(self.next.positive[position], position, level + 1);
            }
            debug!(level, size, skipped, best = best.weight, "level done");

            if self.params.pruning == Pruning::Dominated && skipped > size {
                debug!(level, "every state dominated, stopping early");
                return Ok(best);
            }

            last_size = size;
            mem::swap(&mut self.cur, &mut self.next);
            mem::swap(&mut a, &mut b);
            level += 1;
        }

        self.overflow_level(level, last_size, &mut best);
        Ok(best)
    }

    /// Processes positions `0..=size` of one level. Returns how many
    /// positions were skipped as dominated.
    fn step_level(
        &mut self,
        a: &FixedBigInt,
        b: &FixedBigInt,
        level: usize,
        size: usize,
        best: Weight,
    ) -> usize {
        let Self {
            params,
            cur,
            next,
            trace,
        } = self;
        next.reset(size + 3);

        let mut skipped = 0;
        for position in 0..=size {
            let weights = cur.weights(position);
            if params.pruning == Pruning::Dominated && weights.0 >= best && weights.1 >= best {
                skipped += 1;
                continue;
            }
            horizontal(cur, trace, level, position, a.test(position));
            vertical(weights, next, trace, (level, position), a, b);
        }
        skipped
    }

    /// The level whose value is zero.
    ///
    /// Every remaining bit is 0, so only horizontal steps apply, and every
    /// positive state here already represents `n`: this is where chains
    /// whose leading term exceeds `n` (such as `3^5 - 1`) terminate.
    fn overflow_level(&mut self, level: usize, last_size: usize, best: &mut Terminal) {
        debug!(level, positions = last_size + 1, "overflow level");
        let Self {
            params,
            cur,
            trace,
            ..
        } = self;
        for position in 0..=last_size {
            let (p, n) = cur.weights(position);
            if params.pruning == Pruning::Dominated && p >= best.weight && n >= best.weight {
                continue;
            }
            horizontal(cur, trace, level, position, false);
        }
        for position in 0..=last_size + 1 {
            best.offer(cur.positive[position], position, level);
        }
    }

    /// Runs the DP and decodes the optimal chain.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::CapacityExceeded`] if `n` is wider than
    /// `max_bits`.
    pub fn chain(&mut self, n: &FixedBigInt) -> Result<Chain> {
        let terminal = self.optimize(n)?;
        ChainDecoder::new(&self.trace, terminal).collect()
    }
}
