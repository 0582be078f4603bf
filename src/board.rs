//! Board: swap execution and the combo resolution loop.
//!
//! Resolution runs as a sequence of phases. Each phase mutates the grid,
//! emits the events the presentation layer animates, and then waits: the
//! caller reports that the batch of animations finished by calling
//! [`Board::finish_phase`]. [`Board::resolve`] drives every remaining phase
//! at once for headless use.
//!
//! ```text
//! Idle --try_swap--> Swapping --+--> Destroying --> Falling --> Spawning --+
//!  ^                            |                                         |
//!  +------ no match ------------+<----------------------------------------+
//! ```

use crate::config::{BoardConfig, Config, ScoreConfig};
use crate::detector::{LineMatchDetector, MatchDetector, MatchResult};
use crate::error::{BoardError, ConfigError};
use crate::events::{AudioFeedback, BoardEvent, Observers, SubscriptionId};
use crate::factory::{TileFactory, TilePool};
use crate::generator::TileGenerator;
use crate::gravity;
use crate::grid::{Direction, Grid, Position};
use crate::score::{ScoreChange, ScoreSystem};
use crate::tile::{Tile, TileId, TileState};
use crate::validator::{SwapRejection, SwapValidator};
use std::fmt;
use tracing::{debug, error, info, instrument, warn};

/// Where the board is in a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Stable; swaps are accepted.
    #[default]
    Idle,
    /// Two tiles are animating into each other's slots.
    Swapping,
    /// Matched tiles are playing their destruction.
    Destroying,
    /// Survivors are falling into the gaps.
    Falling,
    /// New tiles are appearing at the top.
    Spawning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The grid was swapped and a resolution has started.
    Accepted,
    Rejected(SwapRejection),
}

impl SwapOutcome {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// Result of a tap on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Selected(Position),
    /// A second tile was picked and a swap was attempted.
    Swap(SwapOutcome),
    Rejected(SwapRejection),
}

/// Totals for the most recent resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    pub combo_level: u32,
    pub points: u32,
}

/// Builder with explicit collaborators. Anything not supplied gets a default.
pub struct BoardBuilder {
    config: Config,
    seed: Option<u64>,
    detector: Option<Box<dyn MatchDetector>>,
    factory: Option<Box<dyn TileFactory>>,
    audio: Option<Box<dyn AudioFeedback>>,
}

impl BoardBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            seed: None,
            detector: None,
            factory: None,
            audio: None,
        }
    }

    pub fn board_config(mut self, board: BoardConfig) -> Self {
        self.config.board = board;
        self
    }

    pub fn score_config(mut self, score: ScoreConfig) -> Self {
        self.config.score = score;
        self
    }

    /// Seed for colour generation. Without one a random seed is drawn.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn detector(mut self, detector: impl MatchDetector + 'static) -> Self {
        self.detector = Some(Box::new(detector));
        self
    }

    pub fn factory(mut self, factory: impl TileFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    pub fn audio(mut self, audio: impl AudioFeedback + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    /// An empty board of the configured size; call [`Board::initialize`] to fill it.
    pub fn build(self) -> Result<Board, ConfigError> {
        let grid = Grid::new(self.config.board.width, self.config.board.height);
        self.build_with_grid(grid)
    }

    /// A board around an existing grid. The grid's dimensions replace the configured ones.
    pub fn build_with_grid(mut self, grid: Grid) -> Result<Board, ConfigError> {
        self.config.board.width = grid.width();
        self.config.board.height = grid.height();
        self.config.validate()?;

        let seed = self.seed.unwrap_or_else(rand::random);
        let first_id = grid
            .tiles()
            .map(|t| TileId(t.id().0 + 1))
            .max()
            .unwrap_or(TileId(0));
        if self.audio.is_none() {
            warn!("no audio feedback attached; combo and error cues are dropped");
        }
        debug!(
            width = grid.width(),
            height = grid.height(),
            colors = self.config.board.colors_count,
            seed,
            "board built"
        );
        Ok(Board {
            generator: TileGenerator::new(self.config.board.colors_count, seed),
            score: ScoreSystem::from_config(&self.config.score),
            config: self.config.board,
            grid,
            detector: self
                .detector
                .unwrap_or_else(|| Box::new(LineMatchDetector::new())),
            factory: self.factory.unwrap_or_else(|| {
                Box::new(TilePool::starting_at(
                    TilePool::DEFAULT_INITIAL_SIZE,
                    TilePool::DEFAULT_MAX_SIZE,
                    first_id,
                ))
            }),
            audio: self.audio,
            observers: Observers::new(),
            phase: Phase::Idle,
            resolution: Resolution::default(),
            pending: None,
            swapped: None,
            selected: None,
        })
    }
}

pub struct Board {
    config: BoardConfig,
    grid: Grid,
    detector: Box<dyn MatchDetector>,
    generator: TileGenerator,
    factory: Box<dyn TileFactory>,
    score: ScoreSystem,
    audio: Option<Box<dyn AudioFeedback>>,
    observers: Observers,
    phase: Phase,
    resolution: Resolution,
    /// Matches being destroyed in the current `Destroying` phase.
    pending: Option<MatchResult>,
    swapped: Option<(Position, Position)>,
    selected: Option<Position>,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("grid", &self.grid)
            .field("score", &self.score)
            .field("phase", &self.phase)
            .field("resolution", &self.resolution)
            .field("selected", &self.selected)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl Board {
    pub fn builder(config: Config) -> BoardBuilder {
        BoardBuilder::new(config)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.grid.get(pos)
    }

    pub fn score(&self) -> u32 {
        self.score.current()
    }

    pub fn score_system(&self) -> &ScoreSystem {
        &self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a resolution is running. Swaps are rejected meanwhile.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Combo level reached so far by the current (or last) resolution.
    pub fn combo_level(&self) -> u32 {
        self.resolution.combo_level
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&BoardEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&mut self, event: BoardEvent) {
        self.observers.emit(&event);
    }

    /// Fills the board and settles it. Points from matches the generator
    /// could not avoid are counted like any other combo.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) -> Result<Resolution, BoardError> {
        if self.is_busy() {
            return Err(BoardError::Busy);
        }
        let created = self
            .generator
            .generate_full_board(&mut self.grid, self.factory.as_mut());
        let tiles = created
            .into_iter()
            .filter_map(|pos| self.grid.get(pos).map(|t| (t.id(), pos, t.color())))
            .collect();
        self.emit(BoardEvent::TilesSpawned {
            tiles,
            duration: self.config.spawn_duration,
        });
        self.resolution = Resolution::default();
        self.phase = Phase::Spawning;
        let resolution = self.resolve()?;
        self.emit(BoardEvent::BoardReady);
        info!(score = self.score(), "board ready");
        Ok(resolution)
    }

    pub fn can_swap(&self, a: Position, b: Position) -> bool {
        SwapValidator::can_swap(&self.grid, a, b, self.is_busy())
    }

    /// Validates and performs a swap, starting a resolution on success.
    ///
    /// Illegal or busy requests and swaps that would form no match come back
    /// as [`SwapOutcome::Rejected`] with the grid untouched. An accepted swap
    /// leaves the board in [`Phase::Swapping`] until [`finish_phase`](Self::finish_phase).
    #[instrument(skip(self))]
    pub fn try_swap(&mut self, a: Position, b: Position) -> Result<SwapOutcome, BoardError> {
        if let Err(reason) = SwapValidator::check(&self.grid, a, b, self.is_busy()) {
            return Ok(self.reject(a, b, reason));
        }
        if !self.detector.would_create_match(&self.grid, a, b) {
            if let Some(audio) = self.audio.as_mut() {
                audio.error();
            }
            return Ok(self.reject(a, b, SwapRejection::NoMatch));
        }

        if let Some(selected) = self.selected {
            self.deselect(selected)?;
        }
        self.grid.swap(a, b);
        for pos in [a, b] {
            if let Some(tile) = self.grid.get_mut(pos) {
                tile.set_state(TileState::Swapping)?;
            }
        }
        self.swapped = Some((a, b));
        self.resolution = Resolution::default();
        self.phase = Phase::Swapping;
        debug!(%a, %b, "swap accepted");
        self.emit(BoardEvent::TilesSwapped {
            a,
            b,
            duration: self.config.swap_duration,
        });
        Ok(SwapOutcome::Accepted)
    }

    fn reject(&mut self, a: Position, b: Position, reason: SwapRejection) -> SwapOutcome {
        debug!(%a, %b, %reason, "swap rejected");
        self.emit(BoardEvent::SwapRejected { a, b, reason });
        SwapOutcome::Rejected(reason)
    }

    /// Picks a tile. Picking a second, different tile attempts a swap between the two.
    #[instrument(skip(self))]
    pub fn select(&mut self, pos: Position) -> Result<Selection, BoardError> {
        if self.is_busy() {
            return Ok(Selection::Rejected(SwapRejection::Busy));
        }
        if !self.grid.is_valid(pos) {
            return Ok(Selection::Rejected(SwapRejection::OutOfBounds));
        }
        let Some(tile) = self.grid.get(pos) else {
            return Ok(Selection::Rejected(SwapRejection::EmptyCell));
        };
        if !tile.can_interact() {
            return Ok(Selection::Rejected(SwapRejection::TileUnavailable));
        }

        match self.selected {
            Some(first) if first == pos => Ok(Selection::Selected(pos)),
            Some(first) => {
                self.deselect(first)?;
                self.try_swap(first, pos).map(Selection::Swap)
            }
            None => {
                if let Some(tile) = self.grid.get_mut(pos) {
                    tile.set_state(TileState::Selected)?;
                }
                self.selected = Some(pos);
                self.emit(BoardEvent::TileSelected { pos });
                Ok(Selection::Selected(pos))
            }
        }
    }

    /// Clears the selection at `pos`. Returns `false` if `pos` was not selected.
    pub fn deselect(&mut self, pos: Position) -> Result<bool, BoardError> {
        if self.selected != Some(pos) {
            return Ok(false);
        }
        self.selected = None;
        if let Some(tile) = self.grid.get_mut(pos) {
            if tile.state() == TileState::Selected {
                tile.set_state(TileState::Idle)?;
            }
        }
        self.emit(BoardEvent::TileDeselected { pos });
        Ok(true)
    }

    /// Signals that every animation of the current phase has completed and
    /// runs the next phase. Returns the phase the board is now in.
    ///
    /// An invariant violation aborts the resolution: the board returns to
    /// [`Phase::Idle`] and the error is passed on.
    pub fn finish_phase(&mut self) -> Result<Phase, BoardError> {
        match self.advance() {
            Ok(phase) => Ok(phase),
            Err(err) => {
                error!(%err, phase = ?self.phase, "resolution aborted");
                self.phase = Phase::Idle;
                self.pending = None;
                self.swapped = None;
                Err(err)
            }
        }
    }

    /// Runs the remaining phases back to back.
    pub fn resolve(&mut self) -> Result<Resolution, BoardError> {
        while self.is_busy() {
            self.finish_phase()?;
        }
        Ok(self.resolution)
    }

    fn advance(&mut self) -> Result<Phase, BoardError> {
        match self.phase {
            Phase::Idle => return Err(BoardError::NotProcessing),
            Phase::Swapping => {
                if let Some((a, b)) = self.swapped.take() {
                    for pos in [a, b] {
                        if let Some(tile) = self.grid.get_mut(pos) {
                            tile.set_state(TileState::Idle)?;
                        }
                    }
                }
                self.detect_pass()?;
            }
            Phase::Destroying => {
                self.remove_matched()?;
                let moves = gravity::compact(&mut self.grid)?;
                debug!(moved = moves.len(), "tiles falling");
                self.phase = Phase::Falling;
                self.emit(BoardEvent::TilesFell {
                    moves,
                    duration: self.config.fall_duration,
                });
            }
            Phase::Falling => {
                for tile in self.grid.tiles_mut() {
                    if tile.state() == TileState::Falling {
                        tile.set_state(TileState::Idle)?;
                    }
                }
                let created = self
                    .generator
                    .refill_empty_cells(&mut self.grid, self.factory.as_mut());
                let tiles = created
                    .into_iter()
                    .filter_map(|pos| self.grid.get(pos).map(|t| (t.id(), pos, t.color())))
                    .collect();
                self.phase = Phase::Spawning;
                self.emit(BoardEvent::TilesSpawned {
                    tiles,
                    duration: self.config.spawn_duration,
                });
            }
            Phase::Spawning => self.detect_pass()?,
        }
        Ok(self.phase)
    }

    /// One detector pass: either ends the resolution or starts destroying matches.
    fn detect_pass(&mut self) -> Result<(), BoardError> {
        let matches = self.detector.find_matches(&self.grid);
        if !matches.has_match() {
            self.check_integrity()?;
            self.phase = Phase::Idle;
            let Resolution {
                combo_level,
                points,
            } = self.resolution;
            info!(combo_level, points, total = self.score(), "board settled");
            self.emit(BoardEvent::ResolutionFinished {
                combo_level,
                points,
            });
            return Ok(());
        }

        if self.resolution.combo_level >= self.config.max_combo_passes {
            return Err(BoardError::ComboLimitExceeded {
                passes: self.resolution.combo_level,
            });
        }
        self.resolution.combo_level += 1;
        let level = self.resolution.combo_level;
        debug!(level, tiles = matches.match_count(), "matches found");

        if let Some(audio) = self.audio.as_mut() {
            audio.combo(level);
        }
        if let Some(change) = self.score.add_match(matches.match_count(), level) {
            if let ScoreChange::Added { points, .. } = change {
                self.resolution.points = self.resolution.points.saturating_add(points);
            }
            self.emit(BoardEvent::ScoreChanged(change));
        }
        self.emit(BoardEvent::MatchesFound {
            matches: matches.clone(),
            combo_level: level,
        });

        let mut doomed = Vec::with_capacity(matches.match_count());
        for pos in matches.positions() {
            if let Some(tile) = self.grid.get_mut(pos) {
                tile.set_state(TileState::Destroying)?;
                doomed.push((tile.id(), pos));
            }
        }
        self.pending = Some(matches);
        self.phase = Phase::Destroying;
        self.emit(BoardEvent::TilesDestroying { tiles: doomed });
        Ok(())
    }

    fn remove_matched(&mut self) -> Result<(), BoardError> {
        let matches = self.pending.take().unwrap_or_default();
        for pos in matches.positions() {
            if let Some(mut tile) = self.grid.take(pos) {
                tile.set_state(TileState::Destroyed)?;
                self.factory.recycle(tile);
            }
        }
        Ok(())
    }

    /// Verifies that every tile's tracked position agrees with the slot holding it.
    pub fn check_integrity(&self) -> Result<(), BoardError> {
        for slot in self.grid.positions() {
            if let Some(tile) = self.grid.get(slot) {
                if tile.position() != slot {
                    return Err(BoardError::PositionMismatch {
                        id: tile.id(),
                        slot,
                        tracked: tile.position(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Every legal swap that would form a match, each pair listed once.
    pub fn find_valid_swaps(&self) -> Vec<(Position, Position)> {
        if self.is_busy() {
            return Vec::new();
        }
        let mut swaps = Vec::new();
        for a in self.grid.positions() {
            for dir in [Direction::Right, Direction::Up] {
                let Some(b) = self.grid.neighbour(a, dir) else {
                    continue;
                };
                if SwapValidator::can_swap(&self.grid, a, b, false)
                    && self.detector.would_create_match(&self.grid, a, b)
                {
                    swaps.push((a, b));
                }
            }
        }
        swaps
    }

    pub fn has_valid_moves(&self) -> bool {
        !self.find_valid_swaps().is_empty()
    }

    pub fn reset_score(&mut self) {
        let change = self.score.reset();
        self.emit(BoardEvent::ScoreChanged(change));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::ColorId;
    use std::cell::RefCell;
    use std::rc::Rc;

    const A: Option<ColorId> = Some(0);
    const B: Option<ColorId> = Some(1);
    const C: Option<ColorId> = Some(2);
    const D: Option<ColorId> = Some(3);

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Row 0 becomes A,A,A when (2,0) and (2,1) swap.
    #[rustfmt::skip]
    fn almost_grid() -> Grid {
        Grid::from_colors(3, 3, [
            A, A, B,
            C, D, A,
            D, C, D,
        ])
    }

    fn board(grid: Grid) -> Board {
        Board::builder(Config::default())
            .seed(9)
            .build_with_grid(grid)
            .unwrap()
    }

    fn record(board: &mut Board) -> Rc<RefCell<Vec<BoardEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        board.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn test_accepted_swap_walks_every_phase() {
        let mut board = board(almost_grid());
        assert_eq!(board.try_swap(p(2, 0), p(2, 1)).unwrap(), SwapOutcome::Accepted);
        assert_eq!(board.phase(), Phase::Swapping);
        assert_eq!(board.tile_at(p(2, 0)).unwrap().state(), TileState::Swapping);

        assert_eq!(board.finish_phase().unwrap(), Phase::Destroying);
        assert_eq!(board.combo_level(), 1);
        assert_eq!(board.tile_at(p(0, 0)).unwrap().state(), TileState::Destroying);

        assert_eq!(board.finish_phase().unwrap(), Phase::Falling);
        assert!(board.grid().is_empty(p(0, 2)));
        assert_eq!(board.tile_at(p(0, 0)).unwrap().state(), TileState::Falling);

        assert_eq!(board.finish_phase().unwrap(), Phase::Spawning);
        assert!(board.grid().is_full());

        board.resolve().unwrap();
        assert_eq!(board.phase(), Phase::Idle);
        assert!(board.score() >= 30);
        assert!(board.grid().tiles().all(|t| t.state() == TileState::Idle));
    }

    #[test]
    fn test_busy_board_rejects_swaps() {
        let mut board = board(almost_grid());
        board.try_swap(p(2, 0), p(2, 1)).unwrap();
        let snapshot = board.grid().clone();
        assert_eq!(
            board.try_swap(p(0, 1), p(1, 1)).unwrap(),
            SwapOutcome::Rejected(SwapRejection::Busy)
        );
        assert_eq!(board.grid(), &snapshot);
        assert_eq!(board.select(p(0, 1)).unwrap(), Selection::Rejected(SwapRejection::Busy));
    }

    #[test]
    fn test_no_match_swap_is_rejected_and_cued() {
        #[derive(Default)]
        struct Cues(Rc<RefCell<Vec<&'static str>>>);
        impl AudioFeedback for Cues {
            fn combo(&mut self, _: u32) {
                self.0.borrow_mut().push("combo");
            }
            fn error(&mut self) {
                self.0.borrow_mut().push("error");
            }
        }
        let cues = Cues::default();
        let heard = Rc::clone(&cues.0);
        let mut board = Board::builder(Config::default())
            .audio(cues)
            .build_with_grid(almost_grid())
            .unwrap();
        let before = board.grid().clone();
        let outcome = board.try_swap(p(0, 1), p(1, 1)).unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::NoMatch));
        assert_eq!(board.grid(), &before);
        assert!(!board.is_busy());
        assert_eq!(*heard.borrow(), vec!["error"]);

        board.try_swap(p(2, 0), p(2, 1)).unwrap();
        board.resolve().unwrap();
        assert_eq!(heard.borrow()[1], "combo");
    }

    #[test]
    fn test_event_order_for_one_pass() {
        let mut board = board(almost_grid());
        let log = record(&mut board);
        board.try_swap(p(2, 0), p(2, 1)).unwrap();
        board.finish_phase().unwrap();
        let events = log.borrow();
        assert!(matches!(events[0], BoardEvent::TilesSwapped { .. }));
        assert!(matches!(
            events[1],
            BoardEvent::ScoreChanged(ScoreChange::Added { points: 30, total: 30 })
        ));
        assert!(matches!(events[2], BoardEvent::MatchesFound { combo_level: 1, .. }));
        assert!(matches!(events[3], BoardEvent::TilesDestroying { ref tiles } if tiles.len() == 3));
    }

    #[test]
    fn test_finish_phase_when_idle_is_an_error() {
        let mut board = board(almost_grid());
        assert_eq!(board.finish_phase(), Err(BoardError::NotProcessing));
    }

    #[test]
    fn test_single_colour_never_settles() {
        let config = Config {
            board: BoardConfig {
                width: 4,
                height: 4,
                colors_count: 1,
                max_combo_passes: 5,
                ..BoardConfig::default()
            },
            ..Config::default()
        };
        let mut board = Board::builder(config).seed(1).build().unwrap();
        let err = board.initialize().unwrap_err();
        assert_eq!(err, BoardError::ComboLimitExceeded { passes: 5 });
        assert!(!board.is_busy());
    }

    #[test]
    fn test_direct_swap_clears_pending_selection() {
        let mut board = board(almost_grid());
        board.select(p(0, 1)).unwrap();
        let log = record(&mut board);
        assert!(board.try_swap(p(2, 0), p(2, 1)).unwrap().is_accepted());
        assert_eq!(board.selected(), None);
        assert_eq!(board.tile_at(p(0, 1)).unwrap().state(), TileState::Idle);
        {
            let events = log.borrow();
            assert_eq!(events[0], BoardEvent::TileDeselected { pos: p(0, 1) });
            assert!(matches!(events[1], BoardEvent::TilesSwapped { .. }));
        }
        board.resolve().unwrap();
        assert!(board.grid().tiles().all(|t| t.state() != TileState::Selected));
    }

    #[test]
    fn test_select_then_swap() {
        let mut board = board(almost_grid());
        assert_eq!(board.select(p(2, 0)).unwrap(), Selection::Selected(p(2, 0)));
        assert_eq!(board.tile_at(p(2, 0)).unwrap().state(), TileState::Selected);
        assert_eq!(
            board.select(p(2, 1)).unwrap(),
            Selection::Swap(SwapOutcome::Accepted)
        );
        assert_eq!(board.selected(), None);
        board.resolve().unwrap();
        assert!(board.score() > 0);
    }

    #[test]
    fn test_deselect() {
        let mut board = board(almost_grid());
        board.select(p(1, 1)).unwrap();
        assert!(!board.deselect(p(0, 0)).unwrap());
        assert!(board.deselect(p(1, 1)).unwrap());
        assert_eq!(board.tile_at(p(1, 1)).unwrap().state(), TileState::Idle);
        assert_eq!(board.selected(), None);
    }

    #[test]
    fn test_find_valid_swaps() {
        let board = board(almost_grid());
        let swaps = board.find_valid_swaps();
        assert!(swaps.contains(&(p(2, 0), p(2, 1))));
        for (a, b) in swaps {
            assert!(board.can_swap(a, b));
        }
    }

    #[test]
    fn test_has_valid_moves() {
        assert!(board(almost_grid()).has_valid_moves());
        let stuck = board(Grid::from_colors(3, 1, [A, B, C]));
        assert!(!stuck.has_valid_moves());
        assert!(stuck.find_valid_swaps().is_empty());
    }

    #[test]
    fn test_empty_config_is_fatal() {
        let err = Board::builder(Config::default()).build_with_grid(Grid::new(0, 3));
        assert!(matches!(err, Err(ConfigError::EmptyBoard { .. })));
    }

    #[test]
    fn test_reset_score() {
        let mut board = board(almost_grid());
        board.try_swap(p(2, 0), p(2, 1)).unwrap();
        board.resolve().unwrap();
        let log = record(&mut board);
        board.reset_score();
        assert_eq!(board.score(), 0);
        assert_eq!(*log.borrow(), vec![BoardEvent::ScoreChanged(ScoreChange::Reset)]);
    }

    #[test]
    fn test_refilled_ids_do_not_collide() {
        let mut board = board(almost_grid());
        board.try_swap(p(2, 0), p(2, 1)).unwrap();
        board.resolve().unwrap();
        let mut ids: Vec<_> = board.grid().tiles().map(Tile::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 9);
    }
}
