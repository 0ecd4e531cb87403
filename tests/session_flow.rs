use std::fs;
use std::time::{Duration, Instant};

use quickmath::generator::SeededRandom;
use quickmath::session::{GameEvent, GameSession, GameStatus, GameSummary};
use quickmath::store::json_store::JsonStore;
use quickmath::store::kv::{HIGH_SCORE_KEY, LEADERBOARD_KEY};
use quickmath::store::leaderboard::LeaderboardStore;
use quickmath::store::{KeyValueStore, MemoryStore};
use tempfile::TempDir;

fn json_session(dir: &TempDir, seed: u64) -> GameSession<SeededRandom> {
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    GameSession::new(
        SeededRandom::from_seed(seed),
        Box::new(store),
        LeaderboardStore::default(),
    )
}

fn answer_correctly(session: &mut GameSession<SeededRandom>, now: Instant) -> Vec<GameEvent> {
    let answer = session.current_question().unwrap().correct_answer;
    session.submit_answer(&answer.to_string(), now)
}

/// Start a game, answer `correct` questions right away, then let the clock run out.
fn play_game(session: &mut GameSession<SeededRandom>, correct: usize, t0: Instant) -> GameSummary {
    session.start(t0);
    for _ in 0..correct {
        answer_correctly(session, t0);
    }
    // Generous enough to outlast any bonus time banked above.
    let events = session.advance_clock(t0 + Duration::from_secs(600));
    match events.last() {
        Some(GameEvent::GameOver(summary)) => summary.clone(),
        other => panic!("expected game over, got {other:?}"),
    }
}

#[test]
fn scores_survive_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let t0 = Instant::now();

    let mut first = json_session(&dir, 1);
    let summary = play_game(&mut first, 3, t0);
    assert_eq!(summary.final_score, 35);
    assert!(summary.new_high_score);
    assert_eq!(summary.leaderboard, vec![35]);
    drop(first);

    let second = json_session(&dir, 2);
    assert_eq!(second.high_score(), 35);
    assert_eq!(second.leaderboard(), vec![35]);
}

#[test]
fn leaderboard_keeps_best_three_across_games() {
    let dir = TempDir::new().unwrap();
    let mut t = Instant::now();
    let mut session = json_session(&dir, 7);

    // 1, 2, 4 and 3 correct answers score 10, 20, 50 and 35.
    for correct in [1, 2, 4, 3] {
        play_game(&mut session, correct, t);
        t += Duration::from_secs(1000);
    }

    assert_eq!(session.leaderboard(), vec![50, 35, 20]);
    assert_eq!(session.high_score(), 50);

    let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert_eq!(reopened.get_int(HIGH_SCORE_KEY, 0).unwrap(), 50);
    assert_eq!(
        reopened.get_ordered_ints(LEADERBOARD_KEY, &[]).unwrap(),
        vec![50, 35, 20]
    );
}

#[test]
fn lower_score_is_not_a_new_high_score() {
    let dir = TempDir::new().unwrap();
    let t0 = Instant::now();
    let mut session = json_session(&dir, 3);

    let best = play_game(&mut session, 2, t0);
    assert!(best.new_high_score);

    let worse = play_game(&mut session, 1, t0 + Duration::from_secs(1000));
    assert!(!worse.new_high_score);
    assert_eq!(worse.final_score, 10);
    assert_eq!(worse.high_score, 20);
    assert_eq!(worse.leaderboard, vec![20, 10]);
    assert_eq!(worse.leaderboard_rank(), Some(2));
}

#[test]
fn abandoned_game_leaves_no_trace() {
    let dir = TempDir::new().unwrap();
    let t0 = Instant::now();
    let mut session = json_session(&dir, 4);

    session.start(t0);
    answer_correctly(&mut session, t0);
    answer_correctly(&mut session, t0);
    session.abandon();
    assert_eq!(session.status(), GameStatus::Idle);

    // A finish that was already due must not resurrect the abandoned run.
    assert!(session.advance_clock(t0 + Duration::from_secs(60)).is_empty());
    assert!(session.leaderboard().is_empty());
    assert_eq!(session.high_score(), 0);
    assert!(!dir.path().join("scores.json").exists());
}

#[test]
fn corrupt_scores_file_starts_fresh() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("scores.json"), "{ not json").unwrap();
    let t0 = Instant::now();

    let mut session = json_session(&dir, 5);
    assert_eq!(session.high_score(), 0);
    assert!(session.leaderboard().is_empty());

    let summary = play_game(&mut session, 1, t0);
    assert_eq!(summary.leaderboard, vec![10]);

    let reopened = json_session(&dir, 6);
    assert_eq!(reopened.high_score(), 10);
}

#[test]
fn same_seed_asks_same_questions() {
    let t0 = Instant::now();
    let questions = |seed| {
        let mut session = GameSession::new(
            SeededRandom::from_seed(seed),
            Box::new(MemoryStore::new()),
            LeaderboardStore::default(),
        );
        session.start(t0);
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(*session.current_question().unwrap());
            answer_correctly(&mut session, t0);
        }
        seen
    };

    assert_eq!(questions(99), questions(99));
}

#[test]
fn bonus_time_extends_the_game() {
    let t0 = Instant::now();
    let mut session = GameSession::new(
        SeededRandom::from_seed(11),
        Box::new(MemoryStore::new()),
        LeaderboardStore::default(),
    );
    session.start(t0);

    // Five quick answers: level 2 at the fourth (score 50), bonus at the fifth.
    let t1 = t0 + Duration::from_secs(5);
    for _ in 0..4 {
        answer_correctly(&mut session, t1);
    }
    assert_eq!(session.difficulty_level(), 2);
    let events = answer_correctly(&mut session, t1);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::BonusAwarded { bonus_ms: 20_000 }))
    );
    assert_eq!(session.time_left_ms(), 45_000);

    // Still running past the level-2 limit thanks to the bonus.
    session.advance_clock(t1 + Duration::from_secs(30));
    assert_eq!(session.status(), GameStatus::Running);
    session.advance_clock(t1 + Duration::from_secs(45));
    assert_eq!(session.status(), GameStatus::Over);
}

#[test]
fn late_answer_records_the_score_it_had_at_the_deadline() {
    let dir = TempDir::new().unwrap();
    let t0 = Instant::now();
    let mut session = json_session(&dir, 8);
    session.start(t0);
    answer_correctly(&mut session, t0);

    // Nobody polled the clock before this answer came in.
    let events = answer_correctly(&mut session, t0 + Duration::from_secs(31));
    assert_eq!(session.status(), GameStatus::Over);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::ScoreChanged(_))));
    match events.last() {
        Some(GameEvent::GameOver(summary)) => assert_eq!(summary.final_score, 10),
        other => panic!("expected game over, got {other:?}"),
    }

    let reopened = json_session(&dir, 9);
    assert_eq!(reopened.leaderboard(), vec![10]);
}
