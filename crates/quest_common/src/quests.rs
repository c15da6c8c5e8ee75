//! Quest catalog and completion ledger.
//!
//! Quests are created once per session from the configured catalog. The
//! ledger is the only place completion state lives, and a quest can flip to
//! completed exactly once.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::config::{QuestConfig, QuizTierConfig};
use crate::error::QuestError;

/// Kind of mini-game a quest is played through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// Quiz scored by correct answers
    ScoredQuiz,
    /// Memory card game, flat reward
    Memory,
    /// Spin-the-wheel, flat reward
    Wheel,
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScoredQuiz => write!(f, "quiz"),
            Self::Memory => write!(f, "memory"),
            Self::Wheel => write!(f, "wheel"),
        }
    }
}

/// Quiz difficulty tier with its per-question value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTier {
    pub tier: u8,
    pub points_per_question: u64,
}

/// Default tiers: 20 / 30 / 40 points per correct answer
pub const DEFAULT_QUIZ_TIERS: &[QuizTier] = &[
    QuizTier { tier: 1, points_per_question: 20 },
    QuizTier { tier: 2, points_per_question: 30 },
    QuizTier { tier: 3, points_per_question: 40 },
];

/// Validated tier lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizTierTable {
    tiers: BTreeMap<u8, u64>,
}

impl QuizTierTable {
    pub fn new(configs: &[QuizTierConfig]) -> Result<Self, QuestError> {
        let mut tiers = BTreeMap::new();
        for config in configs {
            if config.points_per_question == 0 {
                return Err(QuestError::ZeroQuizTier(config.tier));
            }
            if tiers.insert(config.tier, config.points_per_question).is_some() {
                return Err(QuestError::DuplicateQuizTier(config.tier));
            }
        }
        Ok(Self { tiers })
    }

    pub fn get(&self, tier: u8) -> Option<QuizTier> {
        self.tiers.get(&tier).map(|&points_per_question| QuizTier {
            tier,
            points_per_question,
        })
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for QuizTierTable {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_QUIZ_TIERS
                .iter()
                .map(|t| (t.tier, t.points_per_question))
                .collect(),
        }
    }
}

/// Game attached to a quest. Quiz quests carry their resolved tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestGame {
    ScoredQuiz { tier: QuizTier },
    Memory,
    Wheel,
}

impl QuestGame {
    pub fn kind(&self) -> GameKind {
        match self {
            Self::ScoredQuiz { .. } => GameKind::ScoredQuiz,
            Self::Memory => GameKind::Memory,
            Self::Wheel => GameKind::Wheel,
        }
    }
}

/// What the presentation layer should start when a quest is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLaunch {
    Quiz { tier: u8 },
    Memory,
    Wheel,
}

/// A single completable activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Flat catalog reward shown to the player
    pub reward: u64,
    pub icon: String,
    pub color: String,
    /// Displayed progress (0 or 100)
    pub progress: u8,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<QuestGame>,
}

impl Quest {
    fn from_config(config: &QuestConfig, tiers: &QuizTierTable) -> Result<Self, QuestError> {
        if config.id.trim().is_empty() {
            return Err(QuestError::EmptyQuestId);
        }

        let game = match config.game {
            None => None,
            Some(GameKind::Memory) => Some(QuestGame::Memory),
            Some(GameKind::Wheel) => Some(QuestGame::Wheel),
            Some(GameKind::ScoredQuiz) => {
                let tier_id = config
                    .quiz_tier
                    .ok_or_else(|| QuestError::MissingQuizTier(config.id.clone()))?;
                let tier = tiers.get(tier_id).ok_or_else(|| QuestError::UnknownQuizTier {
                    quest_id: config.id.clone(),
                    tier: tier_id,
                })?;
                Some(QuestGame::ScoredQuiz { tier })
            }
        };

        Ok(Self {
            id: config.id.clone(),
            title: config.title.clone(),
            description: config.description.clone(),
            reward: config.reward,
            icon: config.icon.clone(),
            color: config.color.clone(),
            progress: 0,
            completed: false,
            game,
        })
    }

    pub fn kind(&self) -> Option<GameKind> {
        self.game.map(|g| g.kind())
    }

    /// Quiz tier if this is a quiz quest
    pub fn quiz_tier(&self) -> Option<QuizTier> {
        match self.game {
            Some(QuestGame::ScoredQuiz { tier }) => Some(tier),
            _ => None,
        }
    }

    /// Mini-game to start for this quest, None if the quest has no game
    pub fn launch(&self) -> Option<GameLaunch> {
        self.game.map(|game| match game {
            QuestGame::ScoredQuiz { tier } => GameLaunch::Quiz { tier: tier.tier },
            QuestGame::Memory => GameLaunch::Memory,
            QuestGame::Wheel => GameLaunch::Wheel,
        })
    }
}

/// Completion state for every quest in the session catalog
#[derive(Debug, Clone)]
pub struct QuestLedger {
    quests: Vec<Quest>,
    index: HashMap<String, usize>,
}

impl QuestLedger {
    /// Build the ledger, failing on duplicate ids or unresolved quiz tiers
    pub fn from_catalog(
        catalog: &[QuestConfig],
        tiers: &QuizTierTable,
    ) -> Result<Self, QuestError> {
        let mut quests = Vec::with_capacity(catalog.len());
        let mut index = HashMap::with_capacity(catalog.len());

        for config in catalog {
            let quest = Quest::from_config(config, tiers)?;
            if index.insert(quest.id.clone(), quests.len()).is_some() {
                return Err(QuestError::DuplicateQuest(quest.id));
            }
            quests.push(quest);
        }

        Ok(Self { quests, index })
    }

    /// Quests in catalog order
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn get(&self, quest_id: &str) -> Option<&Quest> {
        self.index.get(quest_id).map(|&i| &self.quests[i])
    }

    pub fn is_completed(&self, quest_id: &str) -> bool {
        self.get(quest_id).map(|q| q.completed).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.quests.iter().filter(|q| q.completed).count()
    }

    /// Quiz quest played at `tier` (a finished quiz reports its tier, not its quest)
    pub fn quiz_quest_for_tier(&self, tier: u8) -> Option<&Quest> {
        self.quests
            .iter()
            .find(|q| q.quiz_tier().map(|t| t.tier) == Some(tier))
    }

    /// Flip a quest to completed. Returns false if unknown or already done.
    pub(crate) fn mark_completed(&mut self, quest_id: &str) -> bool {
        let Some(&i) = self.index.get(quest_id) else {
            return false;
        };
        let quest = &mut self.quests[i];
        if quest.completed {
            return false;
        }
        quest.completed = true;
        quest.progress = 100;
        true
    }
}
