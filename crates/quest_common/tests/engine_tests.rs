//! End-to-end tests: mini-game reports through to the leaderboard.

use quest_common::{
    compose, AwardOutcome, EngineConfig, GameKind, GameReport, GamificationEngine,
    LeaderboardEntry, SharedEngine, UserGameStats,
};

fn engine() -> GamificationEngine {
    GamificationEngine::from_config(&EngineConfig::default()).unwrap()
}

#[test]
fn test_quiz_then_repeat() {
    let mut e = engine();
    let first = e.report(&GameReport::new("3", GameKind::ScoredQuiz, 7));
    assert_eq!(first.points, 140);

    let second = e.report(&GameReport::new("3", GameKind::ScoredQuiz, 7));
    assert_eq!(second.points, 0);
    assert_eq!(second.outcome, AwardOutcome::AlreadyCompleted);
    assert_eq!(e.user_stats().total_points, 140);
}

#[test]
fn test_flat_reward_any_score() {
    for score in [0, 1, 50, 75, 10_000] {
        let mut e = engine();
        let award = e.complete_quest("4", score, GameKind::Memory);
        assert_eq!(award.points, 150, "score {} should not matter", score);
    }
}

#[test]
fn test_completion_marks_quest() {
    let mut e = engine();
    assert_eq!(e.quest("5").unwrap().progress, 0);
    e.complete_quest("5", 75, GameKind::Wheel);

    let quest = e.quest("5").unwrap();
    assert!(quest.completed);
    assert_eq!(quest.progress, 100);
    assert_eq!(e.user_stats().total_points, 120);
}

#[test]
fn test_full_session() {
    let mut e = engine();
    e.complete_quest("3", 10, GameKind::ScoredQuiz); // 200
    e.complete_quest("6", 10, GameKind::ScoredQuiz); // 300
    e.complete_quest("7", 10, GameKind::ScoredQuiz); // 400
    let memory = e.complete_quest("4", 50, GameKind::Memory); // 150
    let wheel = e.complete_quest("5", 75, GameKind::Wheel); // 120

    let stats = e.user_stats();
    assert_eq!(stats.total_points, 1_170);
    assert_eq!(stats.weekly_points, 1_170);
    assert_eq!(stats.level, 2);
    assert!(memory.leveled_up());
    assert!(!wheel.leveled_up());
    assert_eq!(e.history().len(), 5);
    assert!(e.quests().iter().all(|q| q.completed));

    let progress = e.level_progress();
    assert_eq!(progress.progress_in_level, 170);
    assert_eq!(progress.next_level_threshold(), Some(2_500));
}

#[test]
fn test_stats_level_never_drifts() {
    let mut e = engine();
    for delta in [0, 1, 999, 1_500, 2_000, 30_000] {
        e.add_points(delta);
        let stats = e.user_stats();
        assert_eq!(stats.level, e.level_table().level_for(stats.total_points));
        assert_eq!(stats.level, e.level_progress().level);
    }
}

#[test]
fn test_spec_leaderboard_scenario() {
    let roster = vec![
        LeaderboardEntry::new("A", 5000, 5, "🏆"),
        LeaderboardEntry::new("B", 3000, 3, "⭐"),
    ];
    let live = UserGameStats {
        name: "Me".to_string(),
        level: 4,
        total_points: 4000,
        weekly_points: 4000,
    };

    let board = compose(&roster, &live);
    let got: Vec<_> = board.iter().map(|e| (e.name.clone(), e.rank, e.points)).collect();
    assert_eq!(
        got,
        vec![
            ("A".to_string(), 1, 5000),
            ("Me".to_string(), 2, 4000),
            ("B".to_string(), 3, 3000),
        ]
    );
}

#[test]
fn test_leaderboard_tracks_live_points() {
    let mut e = engine();
    let name = e.user_stats().name;
    assert_eq!(e.configured_leaderboard().rank_of(&name), 8);

    e.add_points(4_900);
    let board = e.configured_leaderboard();
    assert_eq!(board.rank_of(&name), 2);
    assert_eq!(board.entries[1].level, 4);
}

#[test]
fn test_external_roster_argument() {
    let e = engine();
    let board = e.leaderboard(&[LeaderboardEntry::new("Only", 10, 1, "⭐")]);
    assert_eq!(board.len(), 2);
    assert_eq!(board.entries[0].name, "Only");
}

#[test]
fn test_snapshot_serializes() {
    let mut e = engine();
    e.complete_quest("4", 1, GameKind::Memory);
    let json = serde_json::to_value(e.snapshot()).unwrap();
    assert_eq!(json["stats"]["total_points"], 150);
    assert_eq!(json["quests"][3]["completed"], true);
    assert_eq!(json["quests"][0]["game"]["kind"], "scored_quiz");
    assert!(json["progress"]["points_to_next_level"].is_number());
}

#[test]
fn test_game_report_from_json() {
    let reports: Vec<GameReport> = serde_json::from_str(
        r#"[
            {"quest_id": "3", "kind": "scored_quiz", "score": 7},
            {"quest_id": "5", "kind": "wheel", "score": 75}
        ]"#,
    )
    .unwrap();

    let mut e = engine();
    let total: u64 = reports.iter().map(|r| e.report(r).points).sum();
    assert_eq!(total, 260);
}

#[test]
fn test_shared_engine_concurrent_reports() {
    let shared = SharedEngine::new(engine());
    let handles: Vec<_> = ["3", "6", "7", "4", "5", "3", "6", "7", "4", "5"]
        .into_iter()
        .map(|id| {
            let s = shared.clone();
            std::thread::spawn(move || {
                let kind = s.with(|e| e.quest(id).and_then(|q| q.kind())).unwrap();
                s.complete_quest(id, 1, kind).points
            })
        })
        .collect();

    let awarded: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    // 20 + 30 + 40 + 150 + 120
    assert_eq!(awarded, 360);
    assert_eq!(shared.user_stats().total_points, 360);
    assert_eq!(shared.snapshot().quests.iter().filter(|q| q.completed).count(), 5);
}
