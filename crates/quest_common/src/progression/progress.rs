//! Progress calculator.
//!
//! Pure function from total points to level and in-band progress. The band
//! above the final threshold is unbounded, represented as `None`.

use serde::{Deserialize, Serialize};

use crate::progression::levels::LevelTable;

/// Level and progress derived from total points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current level (1-based)
    pub level: u32,
    /// Points earned past the current level's threshold
    pub progress_in_level: u64,
    /// Width of the current level band (None at max level)
    pub points_to_next_level: Option<u64>,
    /// Percent through the current band (0.0 - 100.0)
    pub progress_percent: f64,
    /// Same as `points_to_next_level`, kept for the progress bar label
    pub points_required_for_next_level: Option<u64>,
    /// Threshold of the current level
    pub points_for_current_level: u64,
}

impl LevelProgress {
    /// True when no higher level is defined
    pub fn is_max_level(&self) -> bool {
        self.points_to_next_level.is_none()
    }

    /// Total points at which the next level starts
    pub fn next_level_threshold(&self) -> Option<u64> {
        self.points_required_for_next_level
            .map(|width| self.points_for_current_level + width)
    }

    /// Points still missing before the next level
    pub fn points_remaining(&self) -> Option<u64> {
        self.points_to_next_level
            .map(|width| width.saturating_sub(self.progress_in_level))
    }

    /// Percent rounded for display (0 - 100)
    pub fn rounded_percent(&self) -> u8 {
        self.progress_percent.round().clamp(0.0, 100.0) as u8
    }
}

/// Compute level progress for `total_points`
pub fn compute_progress(table: &LevelTable, total_points: u64) -> LevelProgress {
    let thresholds = table.thresholds();

    let mut level = 1u32;
    let mut points_for_current_level = 0u64;
    let mut points_for_next_level = thresholds.get(1).copied();

    for (index, &threshold) in thresholds.iter().enumerate() {
        if total_points < threshold {
            break;
        }
        level = index as u32 + 1;
        points_for_current_level = threshold;
        points_for_next_level = thresholds.get(index + 1).copied();
    }

    let progress_in_level = total_points - points_for_current_level;
    let points_to_next_level = points_for_next_level.map(|next| next - points_for_current_level);

    let progress_percent = match points_to_next_level {
        None | Some(0) => 100.0,
        Some(width) => (progress_in_level as f64 / width as f64 * 100.0).clamp(0.0, 100.0),
    };

    LevelProgress {
        level,
        progress_in_level,
        points_to_next_level,
        progress_percent,
        points_required_for_next_level: points_to_next_level,
        points_for_current_level,
    }
}
