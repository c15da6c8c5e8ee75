//! Level table: cumulative point thresholds delimiting levels.
//!
//! Index `i` holds the minimum total points for level `i + 1`:
//! - Level 1: 0 points
//! - Level 2: 1,000 points
//! - Level 5: 7,000 points
//! - Level 10: 32,000 points (final level)

use serde::{Deserialize, Serialize};

use crate::error::QuestError;
use crate::progression::progress::{compute_progress, LevelProgress};

/// Default thresholds for levels 1-10
pub const DEFAULT_THRESHOLDS: &[u64] = &[
    0, 1_000, 2_500, 4_500, 7_000, 10_000, 14_000, 19_000, 25_000, 32_000,
];

/// Validated, strictly increasing threshold table starting at 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct LevelTable {
    thresholds: Vec<u64>,
}

impl LevelTable {
    /// Build a table, rejecting empty, non-zero-based or non-increasing input
    pub fn new(thresholds: Vec<u64>) -> Result<Self, QuestError> {
        let first = *thresholds.first().ok_or(QuestError::EmptyLevelTable)?;
        if first != 0 {
            return Err(QuestError::FirstThresholdNotZero(first));
        }

        for (index, pair) in thresholds.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(QuestError::NonIncreasingThreshold {
                    index: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }

        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }

    /// Highest level the table defines
    pub fn max_level(&self) -> u32 {
        self.thresholds.len() as u32
    }

    /// Points needed to reach `level`, or None if the table does not define it
    pub fn threshold_for(&self, level: u32) -> Option<u64> {
        let index = level.checked_sub(1)? as usize;
        self.thresholds.get(index).copied()
    }

    /// Level reached with `total_points`
    pub fn level_for(&self, total_points: u64) -> u32 {
        self.progress(total_points).level
    }

    /// Full progress breakdown for `total_points`
    pub fn progress(&self, total_points: u64) -> LevelProgress {
        compute_progress(self, total_points)
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

impl TryFrom<Vec<u64>> for LevelTable {
    type Error = QuestError;

    fn try_from(thresholds: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(thresholds)
    }
}

impl From<LevelTable> for Vec<u64> {
    fn from(table: LevelTable) -> Self {
        table.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = LevelTable::new(DEFAULT_THRESHOLDS.to_vec()).unwrap();
        assert_eq!(table, LevelTable::default());
        assert_eq!(table.max_level(), 10);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            LevelTable::new(vec![]),
            Err(QuestError::EmptyLevelTable)
        ));
    }

    #[test]
    fn test_rejects_nonzero_start() {
        assert!(matches!(
            LevelTable::new(vec![10, 100]),
            Err(QuestError::FirstThresholdNotZero(10))
        ));
    }

    #[test]
    fn test_rejects_non_increasing() {
        let err = LevelTable::new(vec![0, 1000, 1000, 2500]).unwrap_err();
        match err {
            QuestError::NonIncreasingThreshold {
                index,
                previous,
                value,
            } => {
                assert_eq!(index, 2);
                assert_eq!(previous, 1000);
                assert_eq!(value, 1000);
            }
            other => panic!("unexpected error: {}", other),
        }

        assert!(LevelTable::new(vec![0, 500, 300]).is_err());
    }

    #[test]
    fn test_single_entry_table() {
        let table = LevelTable::new(vec![0]).unwrap();
        assert_eq!(table.max_level(), 1);
        assert_eq!(table.level_for(0), 1);
        assert_eq!(table.level_for(u64::MAX), 1);
    }

    #[test]
    fn test_threshold_for() {
        let table = LevelTable::default();
        assert_eq!(table.threshold_for(0), None);
        assert_eq!(table.threshold_for(1), Some(0));
        assert_eq!(table.threshold_for(2), Some(1_000));
        assert_eq!(table.threshold_for(10), Some(32_000));
        assert_eq!(table.threshold_for(11), None);
    }

    #[test]
    fn test_serde_validates() {
        let table: LevelTable = serde_json::from_str("[0, 100, 250]").unwrap();
        assert_eq!(table.thresholds(), &[0, 100, 250]);

        let bad: Result<LevelTable, _> = serde_json::from_str("[0, 100, 50]");
        assert!(bad.is_err());
    }
}
