//! Quiz session state machine.
//!
//! ```text
//! Idle -> Running -> Over -> Running -> ...
//!           |          |
//!           +-> Idle <-+      (abandon)
//! ```
//!
//! Every operation is a synchronous transition returning the [`GameEvent`]s it
//! produced. Calls that are invalid for the current status are ignored and
//! return no events; they come from benign event-ordering races, not bugs.

use std::time::Instant;

use chrono::Utc;
use log::{debug, info};

use crate::engine::countdown::{CountdownTimer, TimerEvent, TimerEventKind};
use crate::engine::difficulty::{self, INITIAL_DIFFICULTY, INITIAL_TIME_LIMIT_MS};
use crate::engine::scoring::{self, ScoreState};
use crate::generator::question::{self, Question};
use crate::generator::random::RandomSource;
use crate::session::event::GameEvent;
use crate::session::result::GameSummary;
use crate::store::kv::KeyValueStore;
use crate::store::leaderboard::{self, LeaderboardStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Running,
    Over,
}

/// Parse a typed answer. Anything that is not an integer never matches.
pub fn parse_answer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub struct GameSession<R: RandomSource> {
    rng: R,
    store: Box<dyn KeyValueStore>,
    leaderboard: LeaderboardStore,
    timer: CountdownTimer,
    status: GameStatus,
    score: u32,
    combo_count: u32,
    consecutive_correct: u32,
    difficulty_level: u32,
    time_limit_ms: u64,
    time_left_ms: u64,
    current_question: Option<Question>,
    correct_answers: u32,
    incorrect_answers: u32,
    high_score: u32,
    last_summary: Option<GameSummary>,
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(rng: R, store: Box<dyn KeyValueStore>, leaderboard: LeaderboardStore) -> Self {
        let high_score = leaderboard::load_high_score(store.as_ref());
        Self {
            rng,
            store,
            leaderboard,
            timer: CountdownTimer::new(),
            status: GameStatus::Idle,
            score: 0,
            combo_count: 0,
            consecutive_correct: 0,
            difficulty_level: INITIAL_DIFFICULTY,
            time_limit_ms: INITIAL_TIME_LIMIT_MS,
            time_left_ms: INITIAL_TIME_LIMIT_MS,
            current_question: None,
            correct_answers: 0,
            incorrect_answers: 0,
            high_score,
            last_summary: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn consecutive_correct(&self) -> u32 {
        self.consecutive_correct
    }

    pub fn difficulty_level(&self) -> u32 {
        self.difficulty_level
    }

    pub fn time_limit_ms(&self) -> u64 {
        self.time_limit_ms
    }

    /// Remaining time as of the last tick or adjustment.
    pub fn time_left_ms(&self) -> u64 {
        self.time_left_ms
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn leaderboard(&self) -> Vec<u32> {
        self.leaderboard.entries(self.store.as_ref())
    }

    pub fn last_summary(&self) -> Option<&GameSummary> {
        self.last_summary.as_ref()
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn score_state(&self) -> ScoreState {
        ScoreState {
            score: self.score,
            combo_count: self.combo_count,
            consecutive_correct: self.consecutive_correct,
            time_left_ms: self.time_left_ms,
        }
    }

    fn apply_score_state(&mut self, state: ScoreState) {
        self.score = state.score;
        self.combo_count = state.combo_count;
        self.consecutive_correct = state.consecutive_correct;
        self.time_left_ms = state.time_left_ms;
    }

    fn time_event(&self) -> GameEvent {
        GameEvent::TimeChanged {
            seconds_remaining: self.time_left_ms / 1000,
        }
    }

    fn next_question(&mut self) -> GameEvent {
        let q = question::generate(&mut self.rng, self.difficulty_level);
        self.current_question = Some(q);
        GameEvent::QuestionChanged(q)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh session from Idle or Over.
    pub fn start(&mut self, now: Instant) -> Vec<GameEvent> {
        if self.status == GameStatus::Running {
            debug!("start ignored: session already running");
            return Vec::new();
        }

        self.score = 0;
        self.combo_count = 0;
        self.consecutive_correct = 0;
        self.difficulty_level = INITIAL_DIFFICULTY;
        self.time_limit_ms = INITIAL_TIME_LIMIT_MS;
        self.time_left_ms = self.time_limit_ms;
        self.correct_answers = 0;
        self.incorrect_answers = 0;
        self.last_summary = None;

        let question = self.next_question();
        self.timer.restart(self.time_limit_ms, now);
        self.status = GameStatus::Running;
        info!("session started with {}ms on the clock", self.time_limit_ms);

        vec![GameEvent::ScoreChanged(0), self.time_event(), question]
    }

    pub fn submit_answer(&mut self, raw: &str, now: Instant) -> Vec<GameEvent> {
        if self.status != GameStatus::Running {
            debug!("answer ignored: session is {:?}", self.status);
            return Vec::new();
        }
        // Ticks and a finish that fell due before this answer land first; an
        // answer arriving after the deadline is not scored.
        let mut events = self.advance_clock(now);
        if self.status != GameStatus::Running {
            debug!("answer arrived after the deadline");
            return events;
        }
        let Some(current) = self.current_question else {
            return events;
        };

        if parse_answer(raw) == Some(current.correct_answer) {
            events.extend(self.on_correct(now));
        } else {
            events.extend(self.on_incorrect());
        }
        events
    }

    fn on_correct(&mut self, now: Instant) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.correct_answers += 1;
        self.time_left_ms = self.timer.remaining_ms(now);

        let (state, scored) = scoring::on_correct(self.score_state());
        self.apply_score_state(state);
        events.push(GameEvent::ScoreChanged(self.score));

        if scoring::bonus_awarded(&scored) {
            self.timer.restart(self.time_left_ms, now);
            events.push(GameEvent::BonusAwarded {
                bonus_ms: scoring::BONUS_TIME_MS,
            });
            events.push(self.time_event());
        }

        let adv = difficulty::maybe_advance(self.score, self.difficulty_level, self.time_limit_ms);
        if adv.advanced {
            self.difficulty_level = adv.difficulty_level;
            self.time_limit_ms = adv.time_limit_ms;
            // The clock resets to the new limit; banked time is not carried over.
            self.time_left_ms = self.time_limit_ms;
            self.timer.restart(self.time_limit_ms, now);
            info!(
                "difficulty advanced to {} at score {} ({}ms limit)",
                self.difficulty_level, self.score, self.time_limit_ms
            );
            events.push(GameEvent::DifficultyAdvanced {
                level: self.difficulty_level,
                time_limit_ms: self.time_limit_ms,
            });
            events.push(self.time_event());
        }

        events.push(self.next_question());
        events
    }

    fn on_incorrect(&mut self) -> Vec<GameEvent> {
        self.incorrect_answers += 1;
        let (state, _) = scoring::on_incorrect(self.score_state());
        self.apply_score_state(state);
        vec![GameEvent::IncorrectAnswer]
    }

    /// Timer events that became due by `now`, not yet applied.
    pub fn poll_timer(&mut self, now: Instant) -> Vec<TimerEvent> {
        self.timer.poll(now)
    }

    /// Apply one timer event. Events from a canceled or superseded run, and
    /// any event arriving while not Running, are dropped.
    pub fn handle_timer_event(&mut self, event: TimerEvent) -> Vec<GameEvent> {
        if !self.timer.is_current(&event) {
            debug!("dropping stale timer event {event:?}");
            return Vec::new();
        }
        if self.status != GameStatus::Running {
            debug!("dropping timer event while {:?}", self.status);
            return Vec::new();
        }

        match event.kind {
            TimerEventKind::Tick { remaining_ms } => {
                self.time_left_ms = remaining_ms;
                vec![self.time_event()]
            }
            TimerEventKind::Finish => self.finish(),
        }
    }

    /// Poll the timer and apply everything that became due.
    pub fn advance_clock(&mut self, now: Instant) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for timer_event in self.poll_timer(now) {
            events.extend(self.handle_timer_event(timer_event));
        }
        events
    }

    fn finish(&mut self) -> Vec<GameEvent> {
        self.status = GameStatus::Over;
        self.timer.cancel();
        self.time_left_ms = 0;

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
            leaderboard::save_high_score(self.store.as_mut(), self.high_score);
        }
        let board = self.leaderboard.record(self.store.as_mut(), self.score);

        info!(
            "game over: score {} (high {}), level {}",
            self.score, self.high_score, self.difficulty_level
        );

        let summary = GameSummary {
            final_score: self.score,
            high_score: self.high_score,
            new_high_score,
            leaderboard: board,
            difficulty_level: self.difficulty_level,
            correct_answers: self.correct_answers,
            incorrect_answers: self.incorrect_answers,
            finished_at: Utc::now(),
        };
        self.last_summary = Some(summary.clone());

        vec![self.time_event(), GameEvent::GameOver(summary)]
    }

    /// Leave Running or Over for Idle without recording anything.
    pub fn abandon(&mut self) {
        if self.status == GameStatus::Idle {
            return;
        }
        if self.status == GameStatus::Running {
            info!("session abandoned at score {}", self.score);
        }
        self.timer.cancel();
        self.status = GameStatus::Idle;
        self.current_question = None;
    }
}
