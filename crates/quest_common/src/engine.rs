//! Gamification engine.
//!
//! Owns the stats store, quest ledger, roster and award history for one
//! session. It is constructed once at startup and handed to whoever needs it;
//! there is no global instance. All mutation goes through `&mut self`, so a
//! completion (check, mark, award, level refresh) is a single step.
//!
//! `SharedEngine` puts the whole engine behind one mutex for hosts that call
//! in from several threads.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::QuestError;
use crate::leaderboard::{Leaderboard, LeaderboardEntry, StaticRoster};
use crate::progression::{LevelProgress, LevelTable};
use crate::quests::{GameKind, Quest, QuestLedger};
use crate::rewards::{complete_quest, Award, AwardOutcome, AwardRecord, GameReport};
use crate::stats::{UserGameStats, UserStatsStore};

/// Everything the presentation layer reads after an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub stats: UserGameStats,
    pub progress: LevelProgress,
    pub quests: Vec<Quest>,
    pub leaderboard: Leaderboard,
    /// Live player's rank, 0 if absent
    pub rank: u32,
}

#[derive(Debug, Clone)]
pub struct GamificationEngine {
    stats: UserStatsStore,
    ledger: QuestLedger,
    roster: StaticRoster,
    live_badge: String,
    history: Vec<AwardRecord>,
}

impl GamificationEngine {
    /// Build from a config, validating every table first
    pub fn from_config(config: &EngineConfig) -> Result<Self, QuestError> {
        let tables = config.build_tables()?;
        info!(
            player = %config.player.name,
            levels = tables.levels.max_level(),
            quests = tables.ledger.len(),
            roster = tables.roster.entries().len(),
            "gamification engine ready"
        );
        Ok(Self {
            stats: UserStatsStore::new(config.player.name.clone(), tables.levels),
            ledger: tables.ledger,
            roster: tables.roster,
            live_badge: config.player.badge.clone(),
            history: Vec::new(),
        })
    }

    pub fn new(
        player: &str,
        levels: LevelTable,
        ledger: QuestLedger,
        roster: StaticRoster,
        live_badge: &str,
    ) -> Self {
        Self {
            stats: UserStatsStore::new(player, levels),
            ledger,
            roster,
            live_badge: live_badge.to_string(),
            history: Vec::new(),
        }
    }

    /// Read-only copy of the live player's stats
    pub fn user_stats(&self) -> UserGameStats {
        self.stats.snapshot()
    }

    pub fn level_progress(&self) -> LevelProgress {
        self.stats.level_progress()
    }

    pub fn level_table(&self) -> &LevelTable {
        self.stats.level_table()
    }

    /// Award points directly, outside any quest
    pub fn add_points(&mut self, delta: u64) {
        self.stats.add_points(delta);
    }

    /// Complete a quest with the score its mini-game reported
    pub fn complete_quest(&mut self, quest_id: &str, raw_score: i64, kind: GameKind) -> Award {
        let (award, record) =
            complete_quest(&mut self.ledger, &mut self.stats, quest_id, raw_score, kind);
        if let Some(record) = record {
            self.history.push(record);
        }
        award
    }

    pub fn report(&mut self, report: &GameReport) -> Award {
        self.complete_quest(&report.quest_id, report.score, report.kind)
    }

    /// Finish the quiz quest bound to `tier`. Unknown tiers award nothing.
    pub fn complete_quiz_tier(&mut self, tier: u8, correct_answers: i64) -> Award {
        let Some(quest_id) = self.ledger.quiz_quest_for_tier(tier).map(|q| q.id.clone()) else {
            debug!(tier, "no quiz quest for tier, nothing awarded");
            let level = self.stats.stats().level;
            return Award::no_op(&format!("quiz-tier-{}", tier), AwardOutcome::UnknownQuest, level);
        };
        self.complete_quest(&quest_id, correct_answers, GameKind::ScoredQuiz)
    }

    pub fn quests(&self) -> &[Quest] {
        self.ledger.quests()
    }

    pub fn quest(&self, quest_id: &str) -> Option<&Quest> {
        self.ledger.get(quest_id)
    }

    pub fn history(&self) -> &[AwardRecord] {
        &self.history
    }

    pub fn roster(&self) -> &[LeaderboardEntry] {
        self.roster.entries()
    }

    /// Rank the live player against `roster`
    pub fn leaderboard(&self, roster: &[LeaderboardEntry]) -> Leaderboard {
        Leaderboard::compose(roster, self.stats.stats(), &self.live_badge)
    }

    /// Rank the live player against the configured roster
    pub fn configured_leaderboard(&self) -> Leaderboard {
        self.leaderboard(self.roster.entries())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let leaderboard = self.configured_leaderboard();
        let rank = leaderboard.rank_of(&self.stats.stats().name);
        EngineSnapshot {
            stats: self.user_stats(),
            progress: self.level_progress(),
            quests: self.ledger.quests().to_vec(),
            leaderboard,
            rank,
        }
    }
}

/// Thread-safe handle: one lock covers stats, ledger and history together
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<GamificationEngine>>,
}

impl SharedEngine {
    pub fn new(engine: GamificationEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // Every critical section runs to completion, so a poisoned lock still
    // guards consistent state.
    fn lock(&self) -> MutexGuard<'_, GamificationEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut GamificationEngine) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn user_stats(&self) -> UserGameStats {
        self.lock().user_stats()
    }

    pub fn level_progress(&self) -> LevelProgress {
        self.lock().level_progress()
    }

    pub fn add_points(&self, delta: u64) {
        self.lock().add_points(delta)
    }

    pub fn complete_quest(&self, quest_id: &str, raw_score: i64, kind: GameKind) -> Award {
        self.lock().complete_quest(quest_id, raw_score, kind)
    }

    pub fn report(&self, report: &GameReport) -> Award {
        self.lock().report(report)
    }

    pub fn leaderboard(&self, roster: &[LeaderboardEntry]) -> Leaderboard {
        self.lock().leaderboard(roster)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GamificationEngine {
        GamificationEngine::from_config(&EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_fresh_engine() {
        let e = engine();
        let stats = e.user_stats();
        assert_eq!(stats.level, 1);
        assert_eq!(stats.total_points, 0);
        assert_eq!(e.level_progress().progress_percent, 0.0);
        assert!(e.history().is_empty());
    }

    #[test]
    fn test_history_only_records_awards() {
        let mut e = engine();
        e.complete_quest("4", 50, GameKind::Memory);
        e.complete_quest("4", 50, GameKind::Memory);
        e.complete_quest("nope", 50, GameKind::Memory);
        assert_eq!(e.history().len(), 1);
        assert_eq!(e.history()[0].points, 150);
    }

    #[test]
    fn test_complete_quiz_tier() {
        let mut e = engine();
        let award = e.complete_quiz_tier(2, 4);
        assert_eq!(award.quest_id, "6");
        assert_eq!(award.points, 120);

        let none = e.complete_quiz_tier(8, 4);
        assert_eq!(none.points, 0);
        assert!(!none.is_awarded());
    }

    #[test]
    fn test_unknown_quiz_tier_names_the_tier() {
        let mut e = engine();
        let award = e.complete_quiz_tier(8, 4);
        assert_eq!(award.outcome, AwardOutcome::UnknownQuest);
        assert_eq!(award.quest_id, "quiz-tier-8");
        assert_eq!(award.level_before, award.level_after);
        assert!(e.history().is_empty());
        assert_eq!(e.user_stats().total_points, 0);
    }

    #[test]
    fn test_snapshot_consistent() {
        let mut e = engine();
        e.add_points(4_300);
        let snap = e.snapshot();
        assert_eq!(snap.stats.total_points, 4_300);
        assert_eq!(snap.progress.level, snap.stats.level);
        assert_eq!(snap.rank, 4);
        assert_eq!(snap.leaderboard.len(), 8);
        assert_eq!(snap.quests.len(), 5);
    }

    #[test]
    fn test_shared_engine_awards_once_across_threads() {
        let shared = SharedEngine::new(engine());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let s = shared.clone();
                std::thread::spawn(move || s.complete_quest("5", 0, GameKind::Wheel).points)
            })
            .collect();

        let total: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 120);
        assert_eq!(shared.user_stats().total_points, 120);
    }
}
