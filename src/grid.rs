//! Grid coordinate model and tile storage.
//!
//! `y = 0` is the bottom row; gravity settles tiles toward it.

use crate::tile::{ColorId, Tile, TileId};
use std::fmt;

/// Integer grid coordinate. May lie outside the board; see [`Grid::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbours only; diagonals are not adjacent.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// True iff `a` and `b` are exactly one orthogonal step apart.
pub fn are_adjacent(a: Position, b: Position) -> bool {
    a.is_adjacent(b)
}

/// Cardinal directions. `Up` points away from the settle edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, 1),
            Self::Down => (0, -1),
        }
    }
}

/// A slot on the board: empty or holding exactly one tile.
pub type Cell = Option<Tile>;

/// Fixed-size board. Each live tile is owned by exactly one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// cells[y * width + x]; row 0 is the bottom.
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Builds a grid from colours listed row by row, bottom row first.
    /// Tile ids are assigned in the same order starting at 0; `None` leaves a slot empty.
    ///
    /// Entries beyond `width * height` are ignored.
    pub fn from_colors(
        width: usize,
        height: usize,
        colors: impl IntoIterator<Item = Option<ColorId>>,
    ) -> Self {
        let mut grid = Self::new(width, height);
        let mut next_id = 0;
        for (i, color) in colors.into_iter().take(width * height).enumerate() {
            if let Some(color) = color {
                let pos = Position::new((i % width) as i32, (i / width) as i32);
                grid.cells[i] = Some(Tile::new(TileId(next_id), color, pos));
                next_id += 1;
            }
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_valid(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        self.is_valid(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    /// The tile at `pos`, or `None` when the slot is empty or out of bounds.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).and_then(|i| self.cells[i].as_mut())
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.is_valid(pos) && self.get(pos).is_none()
    }

    /// Colour used for matching: `None` for empty, unmatchable or out-of-bounds cells.
    #[inline]
    pub fn color_at(&self, pos: Position) -> Option<ColorId> {
        self.get(pos)
            .filter(|tile| tile.is_matchable())
            .map(Tile::color)
    }

    /// Removes and returns the tile at `pos`, leaving the slot empty.
    pub fn take(&mut self, pos: Position) -> Option<Tile> {
        self.index(pos).and_then(|i| self.cells[i].take())
    }

    /// Stores `tile` at `pos`, updating its tracked position.
    ///
    /// Returns the previous occupant. If `pos` is out of bounds nothing is
    /// stored and the tile is handed straight back.
    pub fn place(&mut self, pos: Position, mut tile: Tile) -> Option<Tile> {
        let Some(i) = self.index(pos) else {
            return Some(tile);
        };
        tile.set_position(pos);
        self.cells[i].replace(tile)
    }

    /// Exchanges two slots and both tiles' tracked positions in one step.
    /// Returns `false` (and changes nothing) if either position is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return false;
        };
        self.cells.swap(ia, ib);
        if let Some(tile) = self.cells[ia].as_mut() {
            tile.set_position(a);
        }
        if let Some(tile) = self.cells[ib].as_mut() {
            tile.set_position(b);
        }
        true
    }

    /// Moves the tile at `from` into the empty slot `to`. Returns `false` if
    /// `from` is empty, `to` is occupied, or either is out of bounds.
    pub fn move_tile(&mut self, from: Position, to: Position) -> bool {
        if from == to || !self.is_empty(to) {
            return false;
        }
        match self.take(from) {
            Some(tile) => self.place(to, tile).is_none(),
            None => false,
        }
    }

    /// Neighbour of `pos` in `dir`, if it lies on the board.
    pub fn neighbour(&self, pos: Position, dir: Direction) -> Option<Position> {
        let next = pos.step(dir);
        self.is_valid(next).then_some(next)
    }

    /// Every coordinate on the board, column by column from the bottom up.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    /// Occupied slots in storage order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten()
    }

    /// Tiles of column `x` from the bottom up, `None` for empty slots.
    /// Empty if `x` is off the board.
    pub fn column(&self, x: usize) -> Vec<Option<&Tile>> {
        if x >= self.width {
            return Vec::new();
        }
        (0..self.height as i32)
            .map(|y| self.get(Position::new(x as i32, y)))
            .collect()
    }

    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.is_empty(p)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Colours of every slot, bottom row first. Handy for snapshots in tests and logs.
    pub fn colors(&self) -> Vec<Option<ColorId>> {
        self.cells.iter().map(|c| c.as_ref().map(Tile::color)).collect()
    }
}

/// Letters `A..` per colour, `.` for empty; top row first.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let glyph = match &self.cells[y * self.width + x] {
                    Some(tile) if tile.color() < 26 => char::from(b'A' + tile.color()),
                    Some(_) => '?',
                    None => '.',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_bounds() {
        let grid = Grid::new(3, 2);
        assert!(grid.is_valid(Position::new(0, 0)));
        assert!(grid.is_valid(Position::new(2, 1)));
        assert!(!grid.is_valid(Position::new(3, 0)));
        assert!(!grid.is_valid(Position::new(0, 2)));
        assert!(!grid.is_valid(Position::new(-1, 0)));
        assert!(!grid.is_valid(Position::new(0, -1)));
    }

    #[test]
    fn test_adjacency_is_orthogonal() {
        let p = Position::new(2, 2);
        assert!(are_adjacent(p, Position::new(3, 2)));
        assert!(are_adjacent(p, Position::new(2, 1)));
        assert!(!are_adjacent(p, Position::new(3, 3)));
        assert!(!are_adjacent(p, p));
        assert!(!are_adjacent(p, Position::new(4, 2)));
    }

    #[test]
    fn test_swap_keeps_positions_in_sync() {
        let mut grid = Grid::from_colors(2, 1, [Some(0), Some(1)]);
        assert!(grid.swap(Position::new(0, 0), Position::new(1, 0)));
        let left = grid.get(Position::new(0, 0)).unwrap();
        assert_eq!(left.color(), 1);
        assert_eq!(left.position(), Position::new(0, 0));
        let right = grid.get(Position::new(1, 0)).unwrap();
        assert_eq!(right.color(), 0);
        assert_eq!(right.position(), Position::new(1, 0));
    }

    #[test]
    fn test_swap_out_of_bounds_changes_nothing() {
        let mut grid = Grid::from_colors(2, 1, [Some(0), Some(1)]);
        let before = grid.clone();
        assert!(!grid.swap(Position::new(0, 0), Position::new(2, 0)));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_move_tile_transfers_ownership() {
        let mut grid = Grid::from_colors(1, 2, [None, Some(3)]);
        assert!(grid.move_tile(Position::new(0, 1), Position::new(0, 0)));
        assert!(grid.is_empty(Position::new(0, 1)));
        assert_eq!(grid.get(Position::new(0, 0)).unwrap().position(), Position::new(0, 0));
        assert!(!grid.move_tile(Position::new(0, 1), Position::new(0, 0)));
    }

    #[test]
    fn test_place_out_of_bounds_hands_tile_back() {
        let mut grid = Grid::new(1, 1);
        let tile = Tile::new(TileId(7), 0, Position::new(5, 5));
        let back = grid.place(Position::new(5, 5), tile).unwrap();
        assert_eq!(back.id(), TileId(7));
        assert!(grid.is_empty(Position::new(0, 0)));
    }

    #[test]
    fn test_corner_and_centre_neighbour_counts() {
        let grid = Grid::new(3, 3);
        let count = |pos| {
            Direction::ALL
                .iter()
                .filter_map(|&dir| grid.neighbour(pos, dir))
                .count()
        };
        assert_eq!(count(Position::new(0, 0)), 2);
        assert_eq!(count(Position::new(1, 0)), 3);
        assert_eq!(count(Position::new(1, 1)), 4);
    }

    #[test]
    fn test_neighbour_clips_at_edges() {
        let grid = Grid::new(2, 2);
        let origin = Position::new(0, 0);
        assert_eq!(grid.neighbour(origin, Direction::Left), None);
        assert_eq!(grid.neighbour(origin, Direction::Down), None);
        assert_eq!(grid.neighbour(origin, Direction::Up), Some(Position::new(0, 1)));
        assert_eq!(grid.neighbour(origin, Direction::Right), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_column_off_the_board_is_empty() {
        let grid = Grid::from_colors(2, 2, [Some(0), Some(1), Some(2), None]);
        assert!(grid.column(2).is_empty());
        assert!(grid.column(usize::MAX).is_empty());
        let colors: Vec<_> = grid.column(1).into_iter().map(|t| t.map(Tile::color)).collect();
        assert_eq!(colors, vec![Some(1), None]);
    }

    #[test]
    fn test_display_top_row_first() {
        let grid = Grid::from_colors(2, 2, [Some(0), Some(1), None, Some(2)]);
        assert_eq!(grid.to_string(), ".C\nAB\n");
    }
}
