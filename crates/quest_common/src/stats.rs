//! User stats store.
//!
//! Holds the live player's points and cached level. The level is rewritten in
//! the same `&mut self` call that changes total points, so it always equals
//! `level_table.level_for(total_points)`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::progression::{LevelProgress, LevelTable};

/// Points and level for the live player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGameStats {
    pub name: String,
    pub level: u32,
    pub total_points: u64,
    pub weekly_points: u64,
}

/// Owner of the live player's `UserGameStats`
#[derive(Debug, Clone)]
pub struct UserStatsStore {
    stats: UserGameStats,
    table: LevelTable,
}

impl UserStatsStore {
    /// Fresh player at 0 points
    pub fn new(name: impl Into<String>, table: LevelTable) -> Self {
        let level = table.level_for(0);
        Self {
            stats: UserGameStats {
                name: name.into(),
                level,
                total_points: 0,
                weekly_points: 0,
            },
            table,
        }
    }

    pub fn stats(&self) -> &UserGameStats {
        &self.stats
    }

    /// Owned copy for readers outside the engine
    pub fn snapshot(&self) -> UserGameStats {
        self.stats.clone()
    }

    pub fn level_table(&self) -> &LevelTable {
        &self.table
    }

    /// Progress recomputed from total points
    pub fn level_progress(&self) -> LevelProgress {
        self.table.progress(self.stats.total_points)
    }

    /// Add `delta` to total and weekly points and refresh the cached level
    pub fn add_points(&mut self, delta: u64) {
        let previous_level = self.stats.level;

        self.stats.total_points = self.stats.total_points.saturating_add(delta);
        self.stats.weekly_points = self.stats.weekly_points.saturating_add(delta);
        self.stats.level = self.table.level_for(self.stats.total_points);

        if self.stats.level > previous_level {
            info!(
                player = %self.stats.name,
                from = previous_level,
                to = self.stats.level,
                total_points = self.stats.total_points,
                "level up"
            );
        }
    }
}
