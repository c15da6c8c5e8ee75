//! Error types for the progression engine.
//!
//! Only construction and configuration can fail. Gameplay paths (completing
//! quests, adding points, composing the leaderboard) are total and report
//! their outcome through return values instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestError {
    #[error("Level table is empty")]
    EmptyLevelTable,

    #[error("Level table must start at 0 points, found {0}")]
    FirstThresholdNotZero(u64),

    #[error("Level threshold #{index} ({value}) must be greater than the previous threshold ({previous})")]
    NonIncreasingThreshold {
        index: usize,
        previous: u64,
        value: u64,
    },

    #[error("Quest id must not be empty")]
    EmptyQuestId,

    #[error("Duplicate quest id: {0}")]
    DuplicateQuest(String),

    #[error("Quiz quest {0} has no quiz tier")]
    MissingQuizTier(String),

    #[error("Quest {quest_id} references undefined quiz tier {tier}")]
    UnknownQuizTier { quest_id: String, tier: u8 },

    #[error("Quiz tier {0} is defined more than once")]
    DuplicateQuizTier(u8),

    #[error("Quiz tier {0} must award at least one point per question")]
    ZeroQuizTier(u8),

    #[error("Duplicate roster name: {0}")]
    DuplicateRosterName(String),

    #[error("Player name must not be empty")]
    EmptyPlayerName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuestError {
    /// Stable numeric code, grouped by concern.
    pub fn code(&self) -> i32 {
        match self {
            QuestError::EmptyLevelTable => 100,
            QuestError::FirstThresholdNotZero(_) => 101,
            QuestError::NonIncreasingThreshold { .. } => 102,
            QuestError::EmptyQuestId => 200,
            QuestError::DuplicateQuest(_) => 201,
            QuestError::MissingQuizTier(_) => 202,
            QuestError::UnknownQuizTier { .. } => 203,
            QuestError::DuplicateQuizTier(_) => 204,
            QuestError::ZeroQuizTier(_) => 205,
            QuestError::DuplicateRosterName(_) => 300,
            QuestError::EmptyPlayerName => 301,
            QuestError::Io(_) => 900,
            QuestError::ConfigParse(_) => 901,
            QuestError::ConfigSerialize(_) => 902,
            QuestError::Json(_) => 903,
        }
    }

    /// True for errors caused by an invalid table or catalog rather than I/O.
    pub fn is_misconfiguration(&self) -> bool {
        self.code() < 900
    }
}
