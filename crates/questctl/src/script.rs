//! Replay scripts: a JSON array of game reports, applied in order.

use anyhow::{Context, Result};
use quest_common::{Award, GameReport, GamificationEngine};
use std::path::Path;

pub fn parse_script(contents: &str) -> Result<Vec<GameReport>> {
    serde_json::from_str(contents).context("replay script must be a JSON array of game reports")
}

pub fn load_script(path: &Path) -> Result<Vec<GameReport>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read replay script {}", path.display()))?;
    parse_script(&contents)
}

/// Apply every report and collect the awards
pub fn replay(engine: &mut GamificationEngine, reports: &[GameReport]) -> Vec<Award> {
    reports.iter().map(|r| engine.report(r)).collect()
}
