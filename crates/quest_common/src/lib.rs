//! Gamification progression engine for the heritage companion app.
//!
//! Converts mini-game results into points, points into levels, and the live
//! player's standing into a ranked leaderboard.

pub mod config;
pub mod engine;
pub mod error;
pub mod leaderboard;
pub mod progression;
pub mod quests;
pub mod rewards;
pub mod stats;

pub use config::{EngineConfig, QuestConfig, QuizTierConfig};
pub use engine::{EngineSnapshot, GamificationEngine, SharedEngine};
pub use error::QuestError;
pub use leaderboard::{compose, Leaderboard, LeaderboardEntry, StaticRoster, LIVE_USER_BADGE};
pub use progression::{compute_progress, LevelProgress, LevelTable};
pub use quests::{GameKind, GameLaunch, Quest, QuestGame, QuestLedger, QuizTier};
pub use rewards::{Award, AwardOutcome, AwardRecord, GameReport};
pub use stats::{UserGameStats, UserStatsStore};
