//! Board and score configuration, optionally loaded from a `section[key]="value"` file.
//!
//! ```text
//! # comments and blank lines are skipped
//! board[width]="8"
//! board[height]="8"
//! board[colors]="5"
//! board[sprites]="ruby,topaz,emerald,sapphire,amethyst"
//! board[swap_duration]="0.2"
//! score[combo_multipliers]="1.0,1.5,2.0"
//! ```

use crate::error::ConfigError;
use crate::score::DEFAULT_COMBO_MULTIPLIERS;
use crate::tile::ColorId;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Static description of a board, fixed for the board's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    /// Size of one cell in presentation units. Not used by the simulation.
    pub cell_size: f32,
    pub colors_count: ColorId,
    /// Sprite names per colour; colours wrap around when there are fewer sprites than colours.
    pub tile_sprites: Vec<String>,
    pub swap_duration: Duration,
    pub fall_duration: Duration,
    pub spawn_duration: Duration,
    /// Resolution passes allowed before a combo is treated as runaway.
    pub max_combo_passes: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            cell_size: 64.0,
            colors_count: 5,
            tile_sprites: Vec::new(),
            swap_duration: Duration::from_millis(200),
            fall_duration: Duration::from_millis(300),
            spawn_duration: Duration::from_millis(10),
            max_combo_passes: 64,
        }
    }
}

impl BoardConfig {
    /// Rejects boards that cannot be simulated. Failure here is fatal at construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.colors_count == 0 {
            return Err(ConfigError::NoColors);
        }
        if self.max_combo_passes == 0 {
            return Err(ConfigError::NoComboPasses);
        }
        Ok(())
    }

    pub fn sprite_for(&self, color: ColorId) -> Option<&str> {
        if self.tile_sprites.is_empty() {
            return None;
        }
        Some(&self.tile_sprites[color as usize % self.tile_sprites.len()])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    pub base_points_per_tile: u32,
    pub bonus_points_per_extra_tile: u32,
    pub combo_multipliers: Vec<f32>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            base_points_per_tile: 10,
            bonus_points_per_extra_tile: 5,
            combo_multipliers: DEFAULT_COMBO_MULTIPLIERS.to_vec(),
        }
    }
}

impl ScoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combo_multipliers.is_empty() {
            return Err(ConfigError::EmptyMultiplierLadder);
        }
        if let Some(&bad) = self
            .combo_multipliers
            .iter()
            .find(|m| !m.is_finite() || **m < 0.0)
        {
            return Err(ConfigError::InvalidMultiplier(bad));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub board: BoardConfig,
    pub score: ScoreConfig,
}

impl Config {
    /// Load from a config file. Falls back to defaults if `path` is None or the file is missing.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) if p.exists() => p,
            Some(p) => {
                warn!(path = %p.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            None => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(path)?;
        let config = Self::from_map(&parse_config_file(&s))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parses config text; see the module docs for the format.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Self::from_map(&parse_config_file(s))
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (key, value) in map {
            let board = &mut config.board;
            let score = &mut config.score;
            match key.as_str() {
                "board.width" => board.width = parse_value(key, value)?,
                "board.height" => board.height = parse_value(key, value)?,
                "board.cell_size" => board.cell_size = parse_value(key, value)?,
                "board.colors" => board.colors_count = parse_value(key, value)?,
                "board.sprites" => {
                    board.tile_sprites = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect();
                }
                "board.swap_duration" => board.swap_duration = parse_seconds(key, value)?,
                "board.fall_duration" => board.fall_duration = parse_seconds(key, value)?,
                "board.spawn_duration" => board.spawn_duration = parse_seconds(key, value)?,
                "board.max_combo_passes" => board.max_combo_passes = parse_value(key, value)?,
                "score.base_points" => score.base_points_per_tile = parse_value(key, value)?,
                "score.bonus_points" => {
                    score.bonus_points_per_extra_tile = parse_value(key, value)?;
                }
                "score.combo_multipliers" => {
                    score.combo_multipliers = value
                        .split(',')
                        .map(|v| parse_value(key, v.trim()))
                        .collect::<Result<_, _>>()?;
                }
                _ => warn!(key = key.as_str(), "unknown config key ignored"),
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        self.score.validate()
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_seconds(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = parse_value(key, value)?;
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parse `section[key]="value"` lines into a `section.key -> value` map.
fn parse_config_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(open) = line.find('[') else {
            continue;
        };
        let section = line[..open].trim();
        let rest = &line[open + 1..];
        if let Some(end) = rest.find(']') {
            let key = rest[..end].trim();
            let rest = rest[end + 1..].trim();
            if let Some(value) = rest.strip_prefix('=') {
                let value = value.trim().trim_matches('"').trim_matches('\'').trim();
                if !section.is_empty() && !key.is_empty() && !value.is_empty() {
                    map.insert(format!("{section}.{key}"), value.to_string());
                }
            }
        }
    }
    map
}
