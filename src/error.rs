//! Error types for configuration loading and board simulation.

use crate::grid::Position;
use crate::tile::{TileId, TileState};
use thiserror::Error;

/// Configuration could not be read or describes an unusable board.
///
/// All variants are fatal at construction time: a board is never built from
/// a configuration that failed [`BoardConfig::validate`](crate::config::BoardConfig::validate).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[error("colour count must be at least 1")]
    NoColors,
    #[error("max combo passes must be at least 1")]
    NoComboPasses,
    #[error("combo multiplier ladder must not be empty")]
    EmptyMultiplierLadder,
    #[error("combo multiplier {0} is not a finite non-negative number")]
    InvalidMultiplier(f32),
}

/// Internal invariant violations raised while the board simulation runs.
///
/// These indicate a bug rather than bad user input. User-facing swap
/// rejections are reported as [`SwapRejection`](crate::validator::SwapRejection) instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("combo resolution did not settle after {passes} passes")]
    ComboLimitExceeded { passes: u32 },
    #[error("slot {slot} holds tile {id} which believes it is at {tracked}")]
    PositionMismatch {
        id: TileId,
        slot: Position,
        tracked: Position,
    },
    #[error("tile {id} cannot go from {from:?} to {to:?}")]
    IllegalTransition {
        id: TileId,
        from: TileState,
        to: TileState,
    },
    #[error("tile {id} could not fall from {from} to {to}")]
    BlockedFall {
        id: TileId,
        from: Position,
        to: Position,
    },
    #[error("no resolution phase is in progress")]
    NotProcessing,
    #[error("board is busy resolving")]
    Busy,
}
