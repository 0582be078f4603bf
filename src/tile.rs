//! Tiles: colour, grid position and lifecycle state.

use crate::error::BoardError;
use crate::grid::Position;
use std::fmt;

/// Colour index used for matching. Distinct ids never match each other.
pub type ColorId = u8;

/// Identity of a tile instance, stable for as long as the tile is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a tile.
///
/// ```text
/// Idle -> Selected -> Swapping -> Idle
/// Idle | Selected -> Falling -> Idle
/// Idle | Selected | Swapping -> Destroying -> Destroyed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileState {
    #[default]
    Idle,
    Selected,
    Swapping,
    Falling,
    Destroying,
    Destroyed,
}

impl TileState {
    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        use TileState::{Destroyed, Destroying, Falling, Idle, Selected, Swapping};
        matches!(
            (self, next),
            (Idle, Selected)
                | (Selected, Idle)
                | (Idle | Selected, Swapping)
                | (Swapping, Idle)
                | (Idle | Selected, Falling)
                | (Falling, Idle)
                | (Idle | Selected | Swapping, Destroying)
                | (Destroying, Destroyed)
        )
    }
}

/// One playable piece on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    color: ColorId,
    position: Position,
    state: TileState,
}

impl Tile {
    pub fn new(id: TileId, color: ColorId, position: Position) -> Self {
        Self {
            id,
            color,
            position,
            state: TileState::Idle,
        }
    }

    #[inline]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[inline]
    pub fn color(&self) -> ColorId {
        self.color
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn state(&self) -> TileState {
        self.state
    }

    /// Only the grid moves tiles; it keeps this in sync with the slot.
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Moves the tile along its lifecycle. Re-entering the current state is a no-op.
    pub fn set_state(&mut self, next: TileState) -> Result<(), BoardError> {
        if self.state == next {
            return Ok(());
        }
        if !self.state.can_transition_to(next) {
            return Err(BoardError::IllegalTransition {
                id: self.id,
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Re-initialises a recycled tile for reuse by a pool.
    pub fn reset(&mut self, color: ColorId, position: Position) {
        self.color = color;
        self.position = position;
        self.state = TileState::Idle;
    }

    /// Idle or selected tiles can be picked or targeted by a swap.
    pub fn can_interact(&self) -> bool {
        matches!(self.state, TileState::Idle | TileState::Selected)
    }

    /// Tiles on their way out no longer take part in matches.
    pub fn is_matchable(&self) -> bool {
        !matches!(self.state, TileState::Destroying | TileState::Destroyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> Tile {
        Tile::new(TileId(1), 2, Position::new(0, 0))
    }

    #[test]
    fn test_normal_swap_path() {
        let mut t = tile();
        t.set_state(TileState::Selected).unwrap();
        t.set_state(TileState::Swapping).unwrap();
        assert!(!t.can_interact());
        assert!(t.is_matchable());
        t.set_state(TileState::Idle).unwrap();
        assert!(t.can_interact());
    }

    #[test]
    fn test_destroyed_is_terminal() {
        let mut t = tile();
        t.set_state(TileState::Destroying).unwrap();
        assert!(!t.is_matchable());
        t.set_state(TileState::Destroyed).unwrap();
        let err = t.set_state(TileState::Idle).unwrap_err();
        assert_eq!(
            err,
            BoardError::IllegalTransition {
                id: TileId(1),
                from: TileState::Destroyed,
                to: TileState::Idle,
            }
        );
    }

    #[test]
    fn test_falling_cannot_be_destroyed_directly() {
        let mut t = tile();
        t.set_state(TileState::Falling).unwrap();
        assert!(t.set_state(TileState::Destroying).is_err());
        assert!(t.set_state(TileState::Swapping).is_err());
        assert_eq!(t.state(), TileState::Falling);
    }

    #[test]
    fn test_same_state_is_noop() {
        let mut t = tile();
        assert!(t.set_state(TileState::Idle).is_ok());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut t = tile();
        t.set_state(TileState::Destroying).unwrap();
        t.set_state(TileState::Destroyed).unwrap();
        t.reset(4, Position::new(3, 1));
        assert_eq!(t.state(), TileState::Idle);
        assert_eq!(t.color(), 4);
        assert_eq!(t.position(), Position::new(3, 1));
        assert_eq!(t.id(), TileId(1));
    }
}
