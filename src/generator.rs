//! Board generation and refill with a neighbour-exclusion colour policy.
//!
//! The policy only looks at the two cells to the left and the two cells
//! below, which are the ones already settled in generation order. It is not
//! a no-match guarantee for arbitrary boards: with fewer than three colours,
//! or after refill into columns whose lower slots are still empty, a new tile
//! can complete a run.

use crate::factory::TileFactory;
use crate::grid::{Grid, Position};
use crate::tile::{ColorId, TileId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Picks colours and registers new tiles on the grid.
#[derive(Debug, Clone)]
pub struct TileGenerator {
    rng: ChaCha8Rng,
    colors_count: ColorId,
}

impl TileGenerator {
    /// `colors_count` must be at least 1; [`BoardConfig::validate`](crate::config::BoardConfig::validate) enforces this.
    pub fn new(colors_count: ColorId, seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            colors_count: colors_count.max(1),
        }
    }

    pub fn colors_count(&self) -> ColorId {
        self.colors_count
    }

    /// Colour for `(x, y)` that does not extend a pair of equal left or bottom neighbours.
    /// Falls back to any colour when every colour is excluded.
    pub fn color_avoiding_match(&mut self, grid: &Grid, x: i32, y: i32) -> ColorId {
        let excluded = excluded_colors(grid, Position::new(x, y));
        let mut candidates: Vec<ColorId> = (0..self.colors_count)
            .filter(|c| !excluded.contains(&Some(*c)))
            .collect();
        if candidates.is_empty() {
            candidates = (0..self.colors_count).collect();
        }
        candidates[self.rng.random_range(0..candidates.len())]
    }

    /// Obtains a tile from `factory` and registers it at `(x, y)` straight away,
    /// so exclusion checks for later cells see it.
    pub fn create_tile(
        &mut self,
        grid: &mut Grid,
        factory: &mut dyn TileFactory,
        x: i32,
        y: i32,
        color: ColorId,
    ) -> TileId {
        let pos = Position::new(x, y);
        let tile = factory.create(color, pos);
        let id = tile.id();
        if let Some(previous) = grid.place(pos, tile) {
            factory.recycle(previous);
        }
        id
    }

    /// Fills every empty cell, column by column from the bottom up.
    /// Returns the filled positions in creation order.
    pub fn generate_full_board(
        &mut self,
        grid: &mut Grid,
        factory: &mut dyn TileFactory,
    ) -> Vec<Position> {
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        let mut created = Vec::with_capacity(grid.width() * grid.height());
        for x in 0..width {
            for y in 0..height {
                if self.fill(grid, factory, x, y) {
                    created.push(Position::new(x, y));
                }
            }
        }
        debug!(tiles = created.len(), "generated board");
        created
    }

    /// Fills the holes left after gravity, scanning each column from the top down.
    pub fn refill_empty_cells(
        &mut self,
        grid: &mut Grid,
        factory: &mut dyn TileFactory,
    ) -> Vec<Position> {
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        let mut created = Vec::new();
        for x in 0..width {
            for y in (0..height).rev() {
                if self.fill(grid, factory, x, y) {
                    created.push(Position::new(x, y));
                }
            }
        }
        debug!(tiles = created.len(), "refilled board");
        created
    }

    fn fill(&mut self, grid: &mut Grid, factory: &mut dyn TileFactory, x: i32, y: i32) -> bool {
        if !grid.is_empty(Position::new(x, y)) {
            return false;
        }
        let color = self.color_avoiding_match(grid, x, y);
        self.create_tile(grid, factory, x, y, color);
        true
    }
}

/// Colour shared by the two left neighbours and by the two bottom neighbours, if any.
fn excluded_colors(grid: &Grid, pos: Position) -> [Option<ColorId>; 2] {
    let pair = |d1: Position, d2: Position| {
        let first = grid.get(d1).map(|t| t.color())?;
        let second = grid.get(d2).map(|t| t.color())?;
        (first == second).then_some(first)
    };
    [
        pair(pos.offset(-1, 0), pos.offset(-2, 0)),
        pair(pos.offset(0, -1), pos.offset(0, -2)),
    ]
}
