//! Provenance of every DP state, packed two moves per byte.
//!
//! Each cell of the table holds one byte for a `(level, position)` pair.
//! The low nibble is the move that produced the cell's negative state, the
//! high nibble the move that produced its positive state:
//!
//! ```text
//!  bit 3    bit 2       bits 1..0
//! ┌──────┬───────────┬──────────────────────────┐
//! │ axis │ from      │ effect                   │
//! │ 0 = H│ 0 = pos.  │ 00 none, 01 plus, 11 minus│
//! │ 1 = V│ 1 = neg.  │                          │
//! └──────┴───────────┴──────────────────────────┘
//! ```
//!
//! For example `(V, -, -1)`, a vertical step from a negative state that
//! subtracts a term, is `0b1111`. Effect `10` is never produced by a move:
//! the code `0b0010` marks a state no run has written.

use super::{Parity, Sign};

/// Direction of the step that reached a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// `i → i+1` within a level (a doubling).
    Horizontal,
    /// `j → j+1` at the same position (a tripling).
    Vertical,
}

/// What the step did to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// No term placed.
    Keep,
    /// `+2^i·3^j` placed at the predecessor's coordinates.
    Add,
    /// `-2^i·3^j` placed at the predecessor's coordinates.
    Subtract,
}

impl Effect {
    /// Sign of the placed term, if any.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> Option<Sign> {
        match self {
            Self::Keep => None,
            Self::Add => Some(Sign::Plus),
            Self::Subtract => Some(Sign::Minus),
        }
    }
}

/// A transition into a DP state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Step direction.
    pub axis: Axis,
    /// Parity of the predecessor state.
    pub from: Parity,
    /// Term placed by the step.
    pub effect: Effect,
}

impl Move {
    const VERTICAL: u8 = 0b1000;
    const FROM_NEGATIVE: u8 = 0b0100;
    const ADD: u8 = 0b0001;
    const SUBTRACT: u8 = 0b0011;

    /// Creates a horizontal move.
    #[inline]
    #[must_use]
    pub const fn horizontal(from: Parity, effect: Effect) -> Self {
        Self {
            axis: Axis::Horizontal,
            from,
            effect,
        }
    }

    /// Creates a vertical move.
    #[inline]
    #[must_use]
    pub const fn vertical(from: Parity, effect: Effect) -> Self {
        Self {
            axis: Axis::Vertical,
            from,
            effect,
        }
    }

    /// Packs the move into its 4-bit code.
    #[must_use]
    pub const fn encode(self) -> u8 {
        let axis = match self.axis {
            Axis::Horizontal => 0,
            Axis::Vertical => Self::VERTICAL,
        };
        let from = match self.from {
            Parity::Positive => 0,
            Parity::Negative => Self::FROM_NEGATIVE,
        };
        let effect = match self.effect {
            Effect::Keep => 0,
            Effect::Add => Self::ADD,
            Effect::Subtract => Self::SUBTRACT,
        };
        axis | from | effect
    }

    /// Unpacks a 4-bit code; `None` for the unwritten effect `10`. Bits
    /// above the nibble are ignored.
    #[must_use]
    pub const fn decode(code: u8) -> Option<Self> {
        let axis = if code & Self::VERTICAL != 0 {
            Axis::Vertical
        } else {
            Axis::Horizontal
        };
        let from = if code & Self::FROM_NEGATIVE != 0 {
            Parity::Negative
        } else {
            Parity::Positive
        };
        let effect = match code & Self::SUBTRACT {
            0 => Effect::Keep,
            Self::ADD => Effect::Add,
            Self::SUBTRACT => Effect::Subtract,
            _ => return None,
        };
        Some(Self { axis, from, effect })
    }
}

/// Both nibbles unwritten.
const UNWRITTEN: u8 = 0x22;

/// Nibble offset of a parity inside a trace byte.
#[inline]
const fn shift(parity: Parity) -> u32 {
    match parity {
        Parity::Negative => 0,
        Parity::Positive => 4,
    }
}

/// Level × position table of packed moves.
///
/// Allocated once for the engine's capacity. The table remembers the
/// extent of the cells written since the last [`clear`](Self::clear), so
/// each run only wipes what the previous one touched.
#[derive(Debug, Clone)]
pub struct TraceTable {
    levels: usize,
    positions: usize,
    cells: Box<[u8]>,
    used_levels: usize,
    used_positions: usize,
}

impl TraceTable {
    /// Creates a table with every state unwritten, or `None` if the cell
    /// count overflows `usize`.
    #[must_use]
    pub fn new(levels: usize, positions: usize) -> Option<Self> {
        let len = levels.checked_mul(positions)?;
        Some(Self {
            levels,
            positions,
            cells: vec![UNWRITTEN; len].into_boxed_slice(),
            used_levels: 0,
            used_positions: 0,
        })
    }

    /// Number of levels (rows).
    #[inline]
    #[must_use]
    pub const fn levels(&self) -> usize {
        self.levels
    }

    /// Number of positions (columns).
    #[inline]
    #[must_use]
    pub const fn positions(&self) -> usize {
        self.positions
    }

    #[inline]
    fn index(&self, level: usize, position: usize) -> Option<usize> {
        (level < self.levels && position < self.positions).then(|| level * self.positions + position)
    }

    /// Stores `mv` as the provenance of the `target` state at
    /// `(level, position)`, leaving the other parity's nibble intact.
    ///
    /// Returns false, storing nothing, for out-of-range coordinates.
    #[inline]
    pub fn record(&mut self, level: usize, position: usize, target: Parity, mv: Move) -> bool {
        let Some(index) = self.index(level, position) else {
            return false;
        };
        let s = shift(target);
        let cell = &mut self.cells[index];
        *cell = (*cell & !(0x0F << s)) | (mv.encode() << s);
        self.used_levels = self.used_levels.max(level + 1);
        self.used_positions = self.used_positions.max(position + 1);
        true
    }

    /// Provenance of the `parity` state at `(level, position)`, or `None`
    /// outside the table or for a state not written since the last clear.
    #[inline]
    #[must_use]
    pub fn get(&self, level: usize, position: usize, parity: Parity) -> Option<Move> {
        self.index(level, position)
            .and_then(|index| Move::decode(self.cells[index] >> shift(parity)))
    }

    /// Marks every cell written since the last clear as unwritten.
    pub fn clear(&mut self) {
        for level in 0..self.used_levels {
            let start = level * self.positions;
            self.cells[start..start + self.used_positions].fill(UNWRITTEN);
        }
        self.used_levels = 0;
        self.used_positions = 0;
    }

    /// Raw packed byte at `(level, position)`.
    #[inline]
    #[must_use]
    pub fn raw(&self, level: usize, position: usize) -> Option<u8> {
        self.index(level, position).map(|index| self.cells[index])
    }
}
