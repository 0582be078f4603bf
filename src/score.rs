//! Score policy: points per tile, bonus for long runs, combo multipliers.

use crate::config::ScoreConfig;

/// Multipliers for combo levels 1, 2, 3, ...; levels past the end use the last entry.
pub const DEFAULT_COMBO_MULTIPLIERS: [f32; 9] = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

/// What happened to the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChange {
    Added { points: u32, total: u32 },
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSystem {
    current: u32,
    base_points_per_tile: u32,
    bonus_points_per_extra_tile: u32,
    combo_multipliers: Vec<f32>,
}

impl ScoreSystem {
    /// Uses [`DEFAULT_COMBO_MULTIPLIERS`].
    pub fn new(base_points_per_tile: u32, bonus_points_per_extra_tile: u32) -> Self {
        Self::with_multipliers(
            base_points_per_tile,
            bonus_points_per_extra_tile,
            DEFAULT_COMBO_MULTIPLIERS.to_vec(),
        )
    }

    /// An empty ladder falls back to the default one.
    pub fn with_multipliers(
        base_points_per_tile: u32,
        bonus_points_per_extra_tile: u32,
        combo_multipliers: Vec<f32>,
    ) -> Self {
        let combo_multipliers = if combo_multipliers.is_empty() {
            DEFAULT_COMBO_MULTIPLIERS.to_vec()
        } else {
            combo_multipliers
        };
        Self {
            current: 0,
            base_points_per_tile,
            bonus_points_per_extra_tile,
            combo_multipliers,
        }
    }

    pub fn from_config(config: &ScoreConfig) -> Self {
        Self::with_multipliers(
            config.base_points_per_tile,
            config.bonus_points_per_extra_tile,
            config.combo_multipliers.clone(),
        )
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Multiplier for a combo level; level 0 is treated as level 1.
    pub fn multiplier(&self, combo_level: u32) -> f32 {
        let index = (combo_level.max(1) as usize - 1).min(self.combo_multipliers.len() - 1);
        self.combo_multipliers[index]
    }

    /// Points for clearing `match_count` tiles at `combo_level`. Fewer than three tiles score nothing.
    pub fn calculate_score(&self, match_count: usize, combo_level: u32) -> u32 {
        if match_count < 3 {
            return 0;
        }
        let count = match_count as u32;
        let base = self.base_points_per_tile.saturating_mul(count);
        let bonus = self.bonus_points_per_extra_tile.saturating_mul(count - 3);
        let total = base.saturating_add(bonus) as f32 * self.multiplier(combo_level);
        total.round_ties_even() as u32
    }

    /// Adds the points for one resolution pass.
    pub fn add_match(&mut self, match_count: usize, combo_level: u32) -> Option<ScoreChange> {
        self.add_score(self.calculate_score(match_count, combo_level))
    }

    /// Score only grows; zero is ignored.
    pub fn add_score(&mut self, points: u32) -> Option<ScoreChange> {
        if points == 0 {
            return None;
        }
        self.current = self.current.saturating_add(points);
        Some(ScoreChange::Added {
            points,
            total: self.current,
        })
    }

    pub fn reset(&mut self) -> ScoreChange {
        self.current = 0;
        ScoreChange::Reset
    }
}

impl Default for ScoreSystem {
    fn default() -> Self {
        Self::new(10, 5)
    }
}
