use std::time::{Duration, Instant};

use quickmath::config::Config;
use quickmath::engine::scoring::BONUS_TIME_MS;
use quickmath::generator::{Question, SeededRandom};
use quickmath::session::{
    GameEvent, GameObserver, GameSession, GameStatus, GameSummary, dispatch,
};
use quickmath::store::KeyValueStore;
use quickmath::store::leaderboard::LeaderboardStore;

use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::components::quiz_area::{Feedback, FeedbackKind};
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

/// How long a bonus, level-up or wrong-answer message stays on screen.
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Quiz,
    GameOver,
    HighScores,
}

/// What the quiz screen shows. Kept in sync with the session purely through
/// [`GameObserver`] callbacks.
#[derive(Debug, Default)]
pub struct QuizView {
    pub score: u32,
    pub seconds_remaining: u64,
    pub level: u32,
    pub time_limit_ms: u64,
    pub question: Option<Question>,
    pub feedback: Option<Feedback>,
    feedback_until: Option<Instant>,
    finished: bool,
    /// Event-application time, used to stamp feedback expiry.
    now: Option<Instant>,
}

impl QuizView {
    fn show_feedback(&mut self, kind: FeedbackKind, text: String) {
        self.feedback = Some(Feedback { kind, text });
        self.feedback_until = self.now.map(|now| now + FEEDBACK_DURATION);
    }

    fn expire_feedback(&mut self, now: Instant) {
        if self.feedback_until.is_some_and(|until| now >= until) {
            self.feedback = None;
            self.feedback_until = None;
        }
    }
}

impl GameObserver for QuizView {
    fn on_question_changed(&mut self, question: &Question) {
        self.question = Some(*question);
    }

    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn on_time_changed(&mut self, seconds_remaining: u64) {
        self.seconds_remaining = seconds_remaining;
    }

    fn on_bonus_awarded(&mut self) {
        self.show_feedback(
            FeedbackKind::Bonus,
            format!("Bonus Time! +{} seconds", BONUS_TIME_MS / 1000),
        );
    }

    fn on_incorrect_answer(&mut self) {
        self.show_feedback(FeedbackKind::Incorrect, "Incorrect! Try again.".to_string());
    }

    fn on_difficulty_advanced(&mut self, level: u32, time_limit_ms: u64) {
        self.level = level;
        self.time_limit_ms = time_limit_ms;
        self.show_feedback(
            FeedbackKind::LevelUp,
            format!("Level {level}! Clock reset to {}s", time_limit_ms / 1000),
        );
    }

    fn on_game_over(&mut self, _summary: &GameSummary) {
        self.finished = true;
        self.question = None;
    }
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub session: GameSession<SeededRandom>,
    pub view: QuizView,
    /// Leaderboard snapshot for rendering, refreshed on screen changes.
    pub high_scores: Vec<u32>,
    pub input: LineInput,
    /// Set while the "leave this game?" prompt is up.
    pub confirm_abandon: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: Box<dyn KeyValueStore>, rng: SeededRandom) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            log::warn!(
                "theme {:?} not found (bundled: {}), using default",
                config.theme,
                Theme::available_themes().join(", ")
            );
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(theme));
        let menu = Menu::new(&config.player_name, theme);
        let session = GameSession::new(
            rng,
            store,
            LeaderboardStore::new(config.leaderboard_size),
        );

        Self {
            screen: AppScreen::Menu,
            config,
            theme,
            menu,
            session,
            view: QuizView::default(),
            high_scores: Vec::new(),
            input: LineInput::default(),
            confirm_abandon: false,
            should_quit: false,
        }
    }

    fn apply(&mut self, events: &[GameEvent], now: Instant) {
        self.view.now = Some(now);
        dispatch(events, &mut self.view);
        if self.view.finished {
            self.view.finished = false;
            self.view.feedback = None;
            self.input.clear();
            self.confirm_abandon = false;
            self.high_scores = self.session.leaderboard();
            self.screen = AppScreen::GameOver;
        }
    }

    pub fn start_quiz(&mut self, now: Instant) {
        // Play again from the results screen goes through Over, which start accepts.
        if self.session.status() == GameStatus::Running {
            self.session.abandon();
        }
        self.input.clear();
        self.confirm_abandon = false;
        let events = self.session.start(now);
        self.view = QuizView {
            level: self.session.difficulty_level(),
            time_limit_ms: self.session.time_limit_ms(),
            ..QuizView::default()
        };
        self.apply(&events, now);
        self.high_scores = self.session.leaderboard();
        self.screen = AppScreen::Quiz;
    }

    pub fn submit_answer(&mut self, now: Instant) {
        let events = self.session.submit_answer(self.input.value(), now);
        self.input.clear();
        self.apply(&events, now);
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.screen != AppScreen::Quiz {
            return;
        }
        let events = self.session.advance_clock(now);
        self.apply(&events, now);
        self.view.expire_feedback(now);
    }

    /// Bring the clock up to `now` before handling a key. Returns false when
    /// that moved to another screen, in which case the key belongs to the old
    /// one and is dropped.
    pub fn catch_up(&mut self, now: Instant) -> bool {
        let screen = self.screen;
        self.on_tick(now);
        self.screen == screen
    }

    /// Esc from the quiz: ask first when configured to, else leave at once.
    pub fn request_leave_quiz(&mut self) {
        if self.config.confirm_abandon && self.session.status() == GameStatus::Running {
            self.confirm_abandon = true;
        } else {
            self.leave_quiz();
        }
    }

    pub fn leave_quiz(&mut self) {
        self.session.abandon();
        self.confirm_abandon = false;
        self.input.clear();
        self.view = QuizView::default();
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_menu(&mut self) {
        if self.session.status() != GameStatus::Idle {
            self.session.abandon();
        }
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_high_scores(&mut self) {
        self.high_scores = self.session.leaderboard();
        self.screen = AppScreen::HighScores;
    }

    pub fn run_menu_action(&mut self, action: MenuAction, now: Instant) {
        match action {
            MenuAction::StartQuiz => self.start_quiz(now),
            MenuAction::HighScores => self.go_to_high_scores(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    pub fn handle_answer_key(&mut self, key: crossterm::event::KeyEvent, now: Instant) {
        match self.input.handle(key) {
            InputResult::Continue => {}
            InputResult::Submit => self.submit_answer(now),
            InputResult::Cancel => self.request_leave_quiz(),
        }
    }
}
