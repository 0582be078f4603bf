//! Tile creation and recycling.

use crate::grid::Position;
use crate::tile::{ColorId, Tile, TileId};
use tracing::trace;

/// Source of tile instances. The board never constructs tiles directly.
pub trait TileFactory {
    /// A ready-to-place tile in the `Idle` state.
    fn create(&mut self, color: ColorId, position: Position) -> Tile;

    /// Hands back a tile that has left the board.
    fn recycle(&mut self, tile: Tile);
}

/// Bounded free-list of tiles. Recycled tiles keep their id and are reset
/// through [`Tile::reset`] before reuse.
#[derive(Debug, Clone)]
pub struct TilePool {
    free: Vec<Tile>,
    max_size: usize,
    next_id: u32,
}

impl TilePool {
    pub const DEFAULT_INITIAL_SIZE: usize = 10;
    pub const DEFAULT_MAX_SIZE: usize = 50;

    /// Prewarms `initial_size` tiles; at most `max_size` are kept on return.
    pub fn new(initial_size: usize, max_size: usize) -> Self {
        Self::starting_at(initial_size, max_size, TileId(0))
    }

    /// Like [`new`](Self::new), handing out ids from `first_id` upward so they
    /// do not collide with tiles already on a board.
    pub fn starting_at(initial_size: usize, max_size: usize, first_id: TileId) -> Self {
        let mut pool = Self {
            free: Vec::with_capacity(initial_size.min(max_size)),
            max_size,
            next_id: first_id.0,
        };
        for _ in 0..initial_size.min(max_size) {
            let tile = pool.fresh(0, Position::default());
            pool.free.push(tile);
        }
        pool
    }

    fn fresh(&mut self, color: ColorId, position: Position) -> Tile {
        let id = TileId(self.next_id);
        self.next_id += 1;
        Tile::new(id, color, position)
    }

    /// Tiles currently waiting for reuse.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Total tiles ever allocated.
    pub fn allocated(&self) -> u32 {
        self.next_id
    }

    pub fn clear(&mut self) {
        self.free.clear();
    }
}

impl Default for TilePool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_SIZE, Self::DEFAULT_MAX_SIZE)
    }
}

impl TileFactory for TilePool {
    fn create(&mut self, color: ColorId, position: Position) -> Tile {
        match self.free.pop() {
            Some(mut tile) => {
                tile.reset(color, position);
                tile
            }
            None => self.fresh(color, position),
        }
    }

    fn recycle(&mut self, tile: Tile) {
        if self.free.len() >= self.max_size {
            trace!(id = %tile.id(), "pool full, dropping tile");
            return;
        }
        self.free.push(tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileState;

    #[test]
    fn test_prewarm_and_reuse() {
        let mut pool = TilePool::new(2, 4);
        assert_eq!(pool.available(), 2);
        let a = pool.create(1, Position::new(0, 0));
        let b = pool.create(2, Position::new(1, 0));
        let c = pool.create(3, Position::new(2, 0));
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.allocated(), 3);
        assert_ne!(a.id(), b.id());
        assert_ne!(b.id(), c.id());
    }

    #[test]
    fn test_recycled_tile_is_reset() {
        let mut pool = TilePool::new(0, 4);
        let mut tile = pool.create(1, Position::new(3, 3));
        let id = tile.id();
        tile.set_state(TileState::Destroying).unwrap();
        tile.set_state(TileState::Destroyed).unwrap();
        pool.recycle(tile);

        let reused = pool.create(4, Position::new(0, 1));
        assert_eq!(reused.id(), id);
        assert_eq!(reused.state(), TileState::Idle);
        assert_eq!(reused.color(), 4);
        assert_eq!(reused.position(), Position::new(0, 1));
    }

    #[test]
    fn test_pool_is_bounded() {
        let mut pool = TilePool::new(0, 1);
        let a = pool.create(0, Position::default());
        let b = pool.create(0, Position::default());
        pool.recycle(a);
        pool.recycle(b);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_clear_drops_free_tiles_but_keeps_ids_unique() {
        let mut pool = TilePool::new(3, 5);
        pool.clear();
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.create(0, Position::default()).id(), TileId(3));
    }

    #[test]
    fn test_ids_start_at_offset() {
        let mut pool = TilePool::starting_at(1, 4, TileId(40));
        assert_eq!(pool.create(0, Position::default()).id(), TileId(40));
        assert_eq!(pool.create(0, Position::default()).id(), TileId(41));
    }
}
