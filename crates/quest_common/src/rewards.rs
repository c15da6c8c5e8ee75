//! Reward resolver.
//!
//! Turns a finished mini-game into points. The reported game kind picks the
//! rule: a quiz pays `correct answers x points per question` for the quest's
//! tier, every other kind pays the flat catalog reward and ignores the score.
//!
//! Completion is idempotent: unknown or already completed quests award 0 and
//! change nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::quests::{GameKind, Quest, QuestLedger};
use crate::stats::UserStatsStore;

/// Score reported by a mini-game when a playthrough ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub quest_id: String,
    pub kind: GameKind,
    /// Correct answers for quizzes, game-defined otherwise. Must be >= 0.
    pub score: i64,
}

impl GameReport {
    pub fn new(quest_id: &str, kind: GameKind, score: i64) -> Self {
        Self {
            quest_id: quest_id.to_string(),
            kind,
            score,
        }
    }
}

/// Why an award did or did not pay out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardOutcome {
    Awarded,
    UnknownQuest,
    AlreadyCompleted,
}

/// Result of a completion attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub quest_id: String,
    pub outcome: AwardOutcome,
    pub points: u64,
    pub level_before: u32,
    pub level_after: u32,
}

impl Award {
    pub(crate) fn no_op(quest_id: &str, outcome: AwardOutcome, level: u32) -> Self {
        Self {
            quest_id: quest_id.to_string(),
            outcome,
            points: 0,
            level_before: level,
            level_after: level,
        }
    }

    pub fn is_awarded(&self) -> bool {
        self.outcome == AwardOutcome::Awarded
    }

    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

/// Entry in the session's award history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardRecord {
    pub quest_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<GameKind>,
    pub raw_score: u64,
    pub points: u64,
    pub total_points: u64,
    pub level: u32,
    pub timestamp: DateTime<Utc>,
}

impl AwardRecord {
    /// Format as log line
    pub fn format_log(&self) -> String {
        let kind = self
            .kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| "none".to_string());
        format!(
            "QUEST_AWARD quest={} kind={} score={} points=+{} total={} level={}",
            self.quest_id, kind, self.raw_score, self.points, self.total_points, self.level
        )
    }
}

/// Clamp a reported score to zero, flagging negatives as a caller error
pub fn sanitize_score(quest_id: &str, raw_score: i64) -> u64 {
    if raw_score < 0 {
        warn!(
            quest = quest_id,
            score = raw_score,
            "mini-game reported a negative score, clamping to 0"
        );
        0
    } else {
        raw_score as u64
    }
}

/// Points a quest pays for `score` when played as `kind`.
///
/// A quiz played on a quest with no tier pays 0.
pub fn resolve_points(quest: &Quest, kind: GameKind, score: u64) -> u64 {
    match kind {
        GameKind::ScoredQuiz => match quest.quiz_tier() {
            Some(tier) => score.saturating_mul(tier.points_per_question),
            None => {
                warn!(quest = %quest.id, "quiz result for a quest with no quiz tier, awarding 0");
                0
            }
        },
        GameKind::Memory | GameKind::Wheel => quest.reward,
    }
}

/// Complete `quest_id`: check, resolve, mark and award in one step.
///
/// The reported kind decides the reward rule. A report whose kind disagrees
/// with the catalog is logged and still resolved with the reported kind.
pub fn complete_quest(
    ledger: &mut QuestLedger,
    stats: &mut UserStatsStore,
    quest_id: &str,
    raw_score: i64,
    reported_kind: GameKind,
) -> (Award, Option<AwardRecord>) {
    let level_before = stats.stats().level;

    let Some(quest) = ledger.get(quest_id) else {
        debug!(quest = quest_id, "completion for unknown quest ignored");
        return (Award::no_op(quest_id, AwardOutcome::UnknownQuest, level_before), None);
    };

    if quest.completed {
        debug!(quest = quest_id, "quest already completed, no points awarded");
        return (
            Award::no_op(quest_id, AwardOutcome::AlreadyCompleted, level_before),
            None,
        );
    }

    let catalog_kind = quest.kind();
    if catalog_kind.is_some_and(|kind| kind != reported_kind) {
        warn!(
            quest = quest_id,
            reported = %reported_kind,
            catalog = ?catalog_kind,
            "reported game kind does not match catalog"
        );
    }

    let score = sanitize_score(quest_id, raw_score);
    let points = resolve_points(quest, reported_kind, score);

    ledger.mark_completed(quest_id);
    stats.add_points(points);

    let after = stats.stats();
    let record = AwardRecord {
        quest_id: quest_id.to_string(),
        kind: Some(reported_kind),
        raw_score: score,
        points,
        total_points: after.total_points,
        level: after.level,
        timestamp: Utc::now(),
    };
    info!("{}", record.format_log());

    let award = Award {
        quest_id: quest_id.to_string(),
        outcome: AwardOutcome::Awarded,
        points,
        level_before,
        level_after: after.level,
    };
    (award, Some(record))
}
