//! Column compaction toward the bottom row.

use crate::error::BoardError;
use crate::grid::{Grid, Position};
use crate::tile::{TileId, TileState};

/// A tile that changed slot during compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    pub id: TileId,
    pub from: Position,
    pub to: Position,
}

impl TileMove {
    /// Rows travelled; compaction only ever moves tiles down.
    pub fn distance(&self) -> u32 {
        self.from.manhattan(self.to)
    }
}

/// Collapses every column toward `y = 0`, keeping the relative order of tiles.
///
/// Single pass per column with a write cursor: each occupied slot is moved to
/// the cursor and the cursor advances. Moved tiles enter [`TileState::Falling`];
/// only those are reported. Running it on a compacted grid returns nothing.
pub fn compact(grid: &mut Grid) -> Result<Vec<TileMove>, BoardError> {
    let mut moves = Vec::new();
    for x in 0..grid.width() as i32 {
        let mut write = 0;
        for y in 0..grid.height() as i32 {
            let from = Position::new(x, y);
            let Some(id) = grid.get(from).map(|t| t.id()) else {
                continue;
            };
            if y != write {
                moves.push(fall(grid, id, from, Position::new(x, write))?);
            }
            write += 1;
        }
    }
    Ok(moves)
}

/// Moves one tile into an empty slot below it and marks it `Falling`.
fn fall(grid: &mut Grid, id: TileId, from: Position, to: Position) -> Result<TileMove, BoardError> {
    if !grid.move_tile(from, to) {
        return Err(BoardError::BlockedFall { id, from, to });
    }
    if let Some(tile) = grid.get_mut(to) {
        tile.set_state(TileState::Falling)?;
    }
    Ok(TileMove { id, from, to })
}
