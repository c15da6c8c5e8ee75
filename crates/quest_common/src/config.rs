//! Engine Configuration
//!
//! Level table, quiz tiers, quest catalog, roster and player identity.
//! Config file: ~/.config/heritage-quest/config.toml or /etc/heritage-quest/config.toml
//!
//! Every section falls back to the built-in defaults, so a file only needs the
//! parts it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::QuestError;
use crate::leaderboard::{default_roster, LeaderboardEntry, StaticRoster, LIVE_USER_BADGE};
use crate::progression::{LevelTable, DEFAULT_THRESHOLDS};
use crate::quests::{GameKind, QuestLedger, QuizTierTable, DEFAULT_QUIZ_TIERS};

/// Directory name under the config roots
pub const CONFIG_DIR_NAME: &str = "heritage-quest";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Live player settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    /// Badge used for the live player's leaderboard row
    pub badge: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Mardhiyah Auliya Rahman Lubis".to_string(),
            badge: LIVE_USER_BADGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelsConfig {
    pub thresholds: Vec<u64>,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTierConfig {
    pub tier: u8,
    pub points_per_question: u64,
}

/// Catalog entry for one quest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub reward: u64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<GameKind>,
    /// Required when `game = "scored_quiz"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_tier: Option<u8>,
}

impl QuestConfig {
    #[allow(clippy::too_many_arguments)]
    fn builtin(
        id: &str,
        title: &str,
        description: &str,
        reward: u64,
        icon: &str,
        color: &str,
        game: GameKind,
        quiz_tier: Option<u8>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            reward,
            icon: icon.to_string(),
            color: color.to_string(),
            game: Some(game),
            quiz_tier,
        }
    }
}

/// Built-in quest catalog, in display order
pub fn default_quests() -> Vec<QuestConfig> {
    vec![
        QuestConfig::builtin(
            "3",
            "Quiz Heritage - Level 1",
            "Answer questions about Bandung's cultural heritage (basic)",
            200,
            "brain",
            "#FFE66D",
            GameKind::ScoredQuiz,
            Some(1),
        ),
        QuestConfig::builtin(
            "6",
            "Quiz Heritage - Level 2",
            "Continue the quiz at intermediate level",
            300,
            "brain",
            "#FFC107",
            GameKind::ScoredQuiz,
            Some(2),
        ),
        QuestConfig::builtin(
            "7",
            "Quiz Heritage - Level 3",
            "Challenge yourself at the advanced level",
            400,
            "brain",
            "#FF9800",
            GameKind::ScoredQuiz,
            Some(3),
        ),
        QuestConfig::builtin(
            "4",
            "Memory Card Game",
            "Play the memory game and earn points",
            150,
            "list",
            "#A8E6CF",
            GameKind::Memory,
            None,
        ),
        QuestConfig::builtin(
            "5",
            "Spin the Wheel",
            "Spin the wheel and win bonus points",
            120,
            "circle-notch",
            "#95E1D3",
            GameKind::Wheel,
            None,
        ),
    ]
}

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub player: PlayerConfig,
    pub levels: LevelsConfig,
    pub quiz_tiers: Vec<QuizTierConfig>,
    pub quests: Vec<QuestConfig>,
    pub roster: Vec<LeaderboardEntry>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            levels: LevelsConfig::default(),
            quiz_tiers: DEFAULT_QUIZ_TIERS
                .iter()
                .map(|t| QuizTierConfig {
                    tier: t.tier,
                    points_per_question: t.points_per_question,
                })
                .collect(),
            quests: default_quests(),
            roster: default_roster(),
        }
    }
}

/// Tables built from a validated config
#[derive(Debug, Clone)]
pub struct EngineTables {
    pub levels: LevelTable,
    pub ledger: QuestLedger,
    pub roster: StaticRoster,
}

impl EngineConfig {
    /// Get user config path: ~/.config/heritage-quest/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Get system config path: /etc/heritage-quest/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. User config
    /// 3. System config
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, QuestError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load_from(&system_path);
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Read and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, QuestError> {
        debug!(path = %path.display(), "loading config");
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML
    pub fn from_toml_str(contents: &str) -> Result<Self, QuestError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, QuestError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), QuestError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Build every table, failing on the first invalid one
    pub fn build_tables(&self) -> Result<EngineTables, QuestError> {
        if self.player.name.trim().is_empty() {
            return Err(QuestError::EmptyPlayerName);
        }
        let levels = LevelTable::new(self.levels.thresholds.clone())?;
        let tiers = QuizTierTable::new(&self.quiz_tiers)?;
        let ledger = QuestLedger::from_catalog(&self.quests, &tiers)?;
        let roster = StaticRoster::new(self.roster.clone())?;
        Ok(EngineTables {
            levels,
            ledger,
            roster,
        })
    }

    pub fn validate(&self) -> Result<(), QuestError> {
        self.build_tables().map(|_| ())
    }
}
