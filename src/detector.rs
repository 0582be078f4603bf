//! Match detection: full-board scans, localised checks and hypothetical swaps.

use crate::grid::{Direction, Grid, Position};
use crate::tile::ColorId;
use std::collections::BTreeSet;

/// Shortest run of equal colours that counts as a match.
pub const MIN_RUN: usize = 3;

/// Positions taking part in at least one matched run.
///
/// Overlapping runs (an L or T shape) are merged by set union, so a cell at
/// an intersection is counted once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    positions: BTreeSet<Position>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pos: Position) {
        self.positions.insert(pos);
    }

    pub fn merge(&mut self, other: Self) {
        self.positions.extend(other.positions);
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }

    #[inline]
    pub fn match_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn has_match(&self) -> bool {
        self.positions.len() >= MIN_RUN
    }
}

impl FromIterator<Position> for MatchResult {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Finds matched runs on a grid snapshot. All methods are pure.
pub trait MatchDetector {
    /// Every row and column run of [`MIN_RUN`] or more equal, matchable colours.
    fn find_matches(&self, grid: &Grid) -> MatchResult;

    /// Runs through `pos` only, horizontally and vertically.
    fn find_matches_at(&self, grid: &Grid, pos: Position) -> MatchResult;

    /// Whether swapping the contents of `a` and `b` would form a run through either cell.
    /// The grid is not modified.
    fn would_create_match(&self, grid: &Grid, a: Position, b: Position) -> bool;
}

/// Run-length scanner over rows and columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineMatchDetector;

impl LineMatchDetector {
    pub const fn new() -> Self {
        Self
    }
}

impl MatchDetector for LineMatchDetector {
    fn find_matches(&self, grid: &Grid) -> MatchResult {
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        let mut result = MatchResult::new();
        for y in 0..height {
            scan_line(width, |i| Position::new(i, y), grid, &mut result);
        }
        for x in 0..width {
            scan_line(height, |i| Position::new(x, i), grid, &mut result);
        }
        result
    }

    fn find_matches_at(&self, grid: &Grid, pos: Position) -> MatchResult {
        matches_through(pos, |p| grid.color_at(p))
    }

    fn would_create_match(&self, grid: &Grid, a: Position, b: Position) -> bool {
        let swapped = |p: Position| {
            if p == a {
                grid.color_at(b)
            } else if p == b {
                grid.color_at(a)
            } else {
                grid.color_at(p)
            }
        };
        matches_through(a, swapped).has_match() || matches_through(b, swapped).has_match()
    }
}

/// Run-length scan of one line. The extra step at `i == len` flushes the last run.
fn scan_line(len: i32, at: impl Fn(i32) -> Position, grid: &Grid, out: &mut MatchResult) {
    let mut current: Option<ColorId> = None;
    let mut start = 0;
    let mut run = 0usize;
    for i in 0..=len {
        let color = if i < len { grid.color_at(at(i)) } else { None };
        if color.is_some() && color == current {
            run += 1;
            continue;
        }
        if run >= MIN_RUN {
            for j in start..start + run as i32 {
                out.add(at(j));
            }
        }
        current = color;
        start = i;
        run = usize::from(color.is_some());
    }
}

/// Same-colour runs crossing `pos`, read through `color_at`.
fn matches_through(pos: Position, color_at: impl Fn(Position) -> Option<ColorId>) -> MatchResult {
    let mut result = MatchResult::new();
    let Some(color) = color_at(pos) else {
        return result;
    };
    for axis in [
        [Direction::Left, Direction::Right],
        [Direction::Down, Direction::Up],
    ] {
        let mut run = Vec::new();
        for dir in axis {
            let mut p = pos.step(dir);
            while color_at(p) == Some(color) {
                run.push(p);
                p = p.step(dir);
            }
        }
        if run.len() + 1 >= MIN_RUN {
            result.add(pos);
            result.positions.extend(run);
        }
    }
    result
}
