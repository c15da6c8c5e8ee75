//! Text rendering for questctl output.
//!
//! Functions here return plain strings; color is applied by the caller.

use quest_common::{Award, AwardOutcome, Leaderboard, LevelProgress, Quest, UserGameStats};

const PROGRESS_FULL: &str = "█";
const PROGRESS_EMPTY: &str = "░";

/// Horizontal rule
pub const HR: &str = "────────────────────────────────────────────";

/// Bar for a 0-100 percent
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!(
        "[{}{}]",
        PROGRESS_FULL.repeat(filled),
        PROGRESS_EMPTY.repeat(empty)
    )
}

/// "Level 2 -> 3" style header with bar and points line
pub fn format_progress(stats: &UserGameStats, progress: &LevelProgress) -> String {
    let mut out = String::new();
    if progress.is_max_level() {
        out.push_str(&format!("Level {} (max)\n", progress.level));
    } else {
        out.push_str(&format!("Level {} -> {}\n", progress.level, progress.level + 1));
    }
    out.push_str(&format!(
        "{} {}%\n",
        progress_bar(progress.progress_percent, 30),
        progress.rounded_percent()
    ));
    match progress.next_level_threshold() {
        Some(target) => {
            out.push_str(&format!("{} / {} points required", stats.total_points, target))
        }
        None => out.push_str(&format!(
            "{} points, final level reached",
            stats.total_points
        )),
    }
    out
}

/// Stats header: level, points, weekly points, rank
pub fn format_stats(stats: &UserGameStats, rank: u32) -> String {
    let rank = if rank == 0 {
        "-".to_string()
    } else {
        format!("#{}", rank)
    };
    format!(
        "{}\n  level {}  |  {} points  |  {} this week  |  rank {}",
        stats.name, stats.level, stats.total_points, stats.weekly_points, rank
    )
}

/// One line per quest
pub fn format_quests(quests: &[Quest]) -> String {
    quests
        .iter()
        .map(|q| {
            let mark = if q.completed { "[x]" } else { "[ ]" };
            let game = match (q.kind(), q.quiz_tier()) {
                (_, Some(tier)) => {
                    format!("quiz tier {} ({}/question)", tier.tier, tier.points_per_question)
                }
                (Some(kind), None) => kind.to_string(),
                (None, None) => "-".to_string(),
            };
            format!(
                "{} {:<4} {:<28} +{:<5} {:>3}%  {}",
                mark, q.id, q.title, q.reward, q.progress, game
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ranked table, live player marked with '>'
pub fn format_leaderboard(board: &Leaderboard, live_name: &str) -> String {
    board
        .entries
        .iter()
        .map(|e| {
            let marker = if e.name == live_name { ">" } else { " " };
            format!(
                "{}{:>3}. {} {:<30} L{:<3} {:>7}",
                marker, e.rank, e.badge, e.name, e.level, e.points
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Single award line
pub fn format_award(award: &Award) -> String {
    match award.outcome {
        AwardOutcome::Awarded if award.leveled_up() => format!(
            "quest {}: +{} points, level up {} -> {}",
            award.quest_id, award.points, award.level_before, award.level_after
        ),
        AwardOutcome::Awarded => format!("quest {}: +{} points", award.quest_id, award.points),
        AwardOutcome::AlreadyCompleted => {
            format!("quest {}: already completed, no points", award.quest_id)
        }
        AwardOutcome::UnknownQuest => format!("quest {}: unknown quest, ignored", award.quest_id),
    }
}
