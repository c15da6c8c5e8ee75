//! Replay scripts and rendered output.

use quest_common::{EngineConfig, GamificationEngine};
use questctl::display::{format_leaderboard, format_quests};
use questctl::script::{load_script, parse_script, replay};
use std::io::Write;

fn engine() -> GamificationEngine {
    GamificationEngine::from_config(&EngineConfig::default()).unwrap()
}

#[test]
fn test_load_and_replay_script() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"quest_id": "3", "kind": "scored_quiz", "score": 8}},
            {{"quest_id": "3", "kind": "scored_quiz", "score": 8}},
            {{"quest_id": "4", "kind": "memory", "score": 40}}
        ]"#
    )
    .unwrap();

    let reports = load_script(file.path()).unwrap();
    assert_eq!(reports.len(), 3);

    let mut e = engine();
    let awards = replay(&mut e, &reports);
    let points: Vec<u64> = awards.iter().map(|a| a.points).collect();
    assert_eq!(points, vec![160, 0, 150]);
    assert_eq!(e.user_stats().total_points, 310);
}

#[test]
fn test_bad_script_is_an_error() {
    assert!(parse_script(r#"{"quest_id": "3"}"#).is_err());
    assert!(parse_script(r#"[{"quest_id": "3", "kind": "darts", "score": 1}]"#).is_err());
    assert!(load_script(std::path::Path::new("/nonexistent/script.json")).is_err());
}

#[test]
fn test_quest_listing_marks_completion() {
    let mut e = engine();
    let reports = parse_script(r#"[{"quest_id": "5", "kind": "wheel", "score": 75}]"#).unwrap();
    replay(&mut e, &reports);

    let text = format_quests(e.quests());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines.iter().filter(|l| l.starts_with("[x]")).count(), 1);
    assert!(text.contains("quiz tier 3 (40/question)"));
    assert!(text.contains("wheel"));
}

#[test]
fn test_leaderboard_listing_marks_live_player() {
    let mut e = engine();
    e.add_points(4_900);
    let name = e.user_stats().name;
    let text = format_leaderboard(&e.configured_leaderboard(), &name);

    let live: Vec<&str> = text.lines().filter(|l| l.starts_with('>')).collect();
    assert_eq!(live.len(), 1);
    assert!(live[0].contains("  2."));
    assert!(live[0].contains(&name));
}
