//! Swap legality checks.

use crate::grid::{Grid, Position};
use std::fmt;

/// Why a swap request was turned down. None of these mutate the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapRejection {
    /// A resolution is in progress.
    Busy,
    OutOfBounds,
    NotAdjacent,
    EmptyCell,
    /// A tile is mid-animation or on its way out.
    TileUnavailable,
    /// Legal swap that would not form a match.
    NoMatch,
}

impl SwapRejection {
    /// The one rejection that is player feedback rather than illegal input.
    pub fn is_no_match(self) -> bool {
        self == Self::NoMatch
    }
}

impl fmt::Display for SwapRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Busy => "board is busy",
            Self::OutOfBounds => "position out of bounds",
            Self::NotAdjacent => "positions are not adjacent",
            Self::EmptyCell => "cell is empty",
            Self::TileUnavailable => "tile cannot be moved right now",
            Self::NoMatch => "swap would not create a match",
        };
        f.write_str(msg)
    }
}

/// Structural swap checks, in the order they are reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapValidator;

impl SwapValidator {
    pub fn check(grid: &Grid, a: Position, b: Position, busy: bool) -> Result<(), SwapRejection> {
        if busy {
            return Err(SwapRejection::Busy);
        }
        if !grid.is_valid(a) || !grid.is_valid(b) {
            return Err(SwapRejection::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return Err(SwapRejection::NotAdjacent);
        }
        let (Some(first), Some(second)) = (grid.get(a), grid.get(b)) else {
            return Err(SwapRejection::EmptyCell);
        };
        if !first.can_interact() || !second.can_interact() {
            return Err(SwapRejection::TileUnavailable);
        }
        Ok(())
    }

    pub fn can_swap(grid: &Grid, a: Position, b: Position, busy: bool) -> bool {
        Self::check(grid, a, b, busy).is_ok()
    }
}
