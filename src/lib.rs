//! Deterministic match-3 board engine.
//!
//! A [`Board`] owns a rectangular [`Grid`] of coloured tiles. Swapping two
//! adjacent tiles that lines up three or more of one colour starts a
//! resolution: matched tiles are destroyed, survivors fall, the holes are
//! refilled, and the loop repeats while new matches appear. Each repeat is a
//! combo level and raises the score multiplier.
//!
//! The engine never animates anything itself. It emits [`BoardEvent`]s and
//! waits at each phase until the caller reports the animations finished via
//! [`Board::finish_phase`], or runs straight through with [`Board::resolve`].
//!
//! ```
//! use match3_engine::{Board, Config};
//!
//! let mut board = Board::builder(Config::default()).seed(7).build()?;
//! board.initialize()?;
//! if let Some(&(a, b)) = board.find_valid_swaps().first() {
//!     board.try_swap(a, b)?;
//!     board.resolve()?;
//! }
//! assert!(!board.is_busy());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod board;
pub mod config;
pub mod detector;
pub mod error;
pub mod events;
pub mod factory;
pub mod generator;
pub mod gravity;
pub mod grid;
pub mod score;
pub mod tile;
pub mod validator;

pub use board::{Board, BoardBuilder, Phase, Resolution, Selection, SwapOutcome};
pub use config::{BoardConfig, Config, ScoreConfig};
pub use detector::{LineMatchDetector, MatchDetector, MatchResult};
pub use error::{BoardError, ConfigError};
pub use events::{AudioFeedback, BoardEvent, SubscriptionId};
pub use factory::{TileFactory, TilePool};
pub use grid::{Direction, Grid, Position};
pub use score::{ScoreChange, ScoreSystem};
pub use tile::{ColorId, Tile, TileId, TileState};
pub use validator::SwapRejection;
