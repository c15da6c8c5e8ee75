//! Leaderboard composer.
//!
//! Merges the live player into a static roster and ranks everyone from
//! scratch on every call. Order is points descending, then name ascending,
//! so equal scores always rank the same way.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::QuestError;
use crate::stats::UserGameStats;

/// Badge shown next to the live player
pub const LIVE_USER_BADGE: &str = "🌟";

/// One ranked row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based rank, rewritten by every composition
    #[serde(default)]
    pub rank: u32,
    pub name: String,
    pub points: u64,
    pub level: u32,
    pub badge: String,
}

impl LeaderboardEntry {
    pub fn new(name: &str, points: u64, level: u32, badge: &str) -> Self {
        Self {
            rank: 0,
            name: name.to_string(),
            points,
            level,
            badge: badge.to_string(),
        }
    }
}

/// Static roster of other players, with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRoster {
    entries: Vec<LeaderboardEntry>,
}

impl StaticRoster {
    pub fn new(entries: Vec<LeaderboardEntry>) -> Result<Self, QuestError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(QuestError::DuplicateRosterName(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }
}

/// Built-in roster
pub fn default_roster() -> Vec<LeaderboardEntry> {
    vec![
        LeaderboardEntry { rank: 1, ..LeaderboardEntry::new("Ahmad Rahman", 5200, 8, "🏆") },
        LeaderboardEntry { rank: 2, ..LeaderboardEntry::new("Siti Nurhaliza", 4800, 7, "🥈") },
        LeaderboardEntry { rank: 3, ..LeaderboardEntry::new("Budi Santoso", 4500, 7, "🥉") },
        LeaderboardEntry { rank: 4, ..LeaderboardEntry::new("Dewi Lestari", 4200, 6, "⭐") },
        LeaderboardEntry { rank: 5, ..LeaderboardEntry::new("Rudi Hermawan", 4000, 6, "⭐") },
        LeaderboardEntry { rank: 15, ..LeaderboardEntry::new("Rina Wijaya", 2200, 5, "⭐") },
        LeaderboardEntry { rank: 20, ..LeaderboardEntry::new("Hendra Wijaya", 1800, 4, "✨") },
    ]
}

fn ranking_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name))
}

/// Compose with the default live badge
pub fn compose(roster: &[LeaderboardEntry], live: &UserGameStats) -> Vec<LeaderboardEntry> {
    compose_with_badge(roster, live, LIVE_USER_BADGE)
}

/// Rank `roster` plus the live player. A roster entry with the live player's
/// name is replaced by the live entry.
pub fn compose_with_badge(
    roster: &[LeaderboardEntry],
    live: &UserGameStats,
    badge: &str,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = roster
        .iter()
        .filter(|entry| entry.name != live.name)
        .cloned()
        .collect();

    entries.push(LeaderboardEntry::new(
        &live.name,
        live.total_points,
        live.level,
        badge,
    ));

    entries.sort_by(ranking_order);
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }
    entries
}

/// Composed ranking with lookup helpers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn compose(roster: &[LeaderboardEntry], live: &UserGameStats, badge: &str) -> Self {
        Self {
            entries: compose_with_badge(roster, live, badge),
        }
    }

    /// Rank of `name`, 0 when not on the board
    pub fn rank_of(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.rank)
            .unwrap_or(0)
    }

    pub fn top(&self, limit: usize) -> &[LeaderboardEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
