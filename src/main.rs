mod app;
mod event;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use tracing::Level;

use quickmath::config::Config;
use quickmath::generator::SeededRandom;
use quickmath::store::json_store::JsonStore;
use quickmath::store::{KeyValueStore, MemoryStore};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use ui::components::dashboard::Dashboard;
use ui::components::leaderboard::LeaderboardPanel;
use ui::components::quiz_area::QuizArea;
use ui::components::time_bar::TimeBar;
use ui::layout::AppLayout;

const LOG_FILE: &str = "quickmath.log";

#[derive(Parser)]
#[command(name = "quickmath", version, about = "Timed arithmetic quiz for the terminal")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Player name shown on the menu")]
    name: Option<String>,

    #[arg(long, help = "Number of scores kept on the leaderboard")]
    leaderboard_size: Option<usize>,

    #[arg(long, help = "Keep scores in memory only")]
    ephemeral: bool,

    #[arg(long, help = "Seed for reproducible questions")]
    seed: Option<u64>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "More log output (repeatable)")]
    verbose: u8,

    #[arg(short, long, conflicts_with = "verbose", help = "Only log errors")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet)?;

    let mut config = Config::load_or_init().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {e}");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(name) = cli.name {
        config.player_name = name;
    }
    if let Some(size) = cli.leaderboard_size {
        config.leaderboard_size = size;
    }
    config.validate();

    let store = open_store(cli.ephemeral);
    let rng = match cli.seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    };
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut app = App::new(config, store, rng);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("exited with error: {err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let dir = JsonStore::default_dir();
    fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    // The terminal belongs to the UI, so everything goes to the file.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))
}

fn open_store(ephemeral: bool) -> Box<dyn KeyValueStore> {
    if ephemeral {
        tracing::info!("ephemeral mode: scores stay in memory");
        return Box::new(MemoryStore::new());
    }
    match JsonStore::new() {
        Ok(store) => {
            tracing::info!("scores stored in {}", store.base_dir().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("data directory unavailable, scores will not persist: {e}");
            Box::new(MemoryStore::new())
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => {
                // Idle ticks stall while keys keep arriving.
                let now = Instant::now();
                let quit = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                if app.catch_up(now) || quit {
                    handle_key(app, key, now);
                }
            }
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key, now),
        AppScreen::Quiz => handle_quiz_key(app, key, now),
        AppScreen::GameOver => handle_game_over_key(app, key, now),
        AppScreen::HighScores => handle_high_scores_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.run_menu_action(app.menu.selected_action(), now),
        KeyCode::Char(ch) => {
            if let Some(action) = app.menu.action_for_key(ch) {
                app.run_menu_action(action, now);
            }
        }
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Confirmation dialog takes priority
    if app.confirm_abandon {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.leave_quiz(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.confirm_abandon = false;
            }
            _ => {}
        }
        return;
    }
    app.handle_answer_key(key, now);
}

fn handle_game_over_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.start_quiz(now),
        KeyCode::Char('h') => app.go_to_high_scores(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_high_scores_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
        app.go_to_menu();
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::GameOver => render_game_over(frame, app),
        AppScreen::HighScores => render_high_scores(frame, app),
    }
}

fn header_line<'a>(app: &App, info: String) -> Paragraph<'a> {
    let colors = &app.theme.colors;
    Paragraph::new(Line::from(vec![
        Span::styled(
            " quickmath ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()))
}

fn footer_line<'a>(app: &App, hints: &'a str) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(app.theme.colors.muted()),
    )))
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let info = format!(" High score {} ", app.session.high_score());
    frame.render_widget(header_line(app, info), layout[0]);

    let menu_area = ui::layout::centered_rect(50, 70, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    frame.render_widget(
        footer_line(app, " [1] Start  [h] High Scores  [q] Quit "),
        layout[2],
    );
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let app_layout = AppLayout::new(area);
    let view = &app.view;

    let info = format!(
        " {} | Score {} | Level {} | Best {} ",
        app.config.player_name,
        view.score,
        view.level,
        app.session.high_score()
    );
    frame.render_widget(header_line(app, info), app_layout.header);

    let time_bar = TimeBar::new(
        view.seconds_remaining * 1000,
        view.time_limit_ms,
        app.theme,
    );
    frame.render_widget(time_bar, app_layout.time_bar);

    let quiz = QuizArea::new(
        view.question.as_ref(),
        &app.input,
        view.feedback.as_ref(),
        app.theme,
    );
    frame.render_widget(quiz, app_layout.main);

    if let Some(sidebar) = app_layout.sidebar {
        let panel = LeaderboardPanel::new(app.session.high_score(), &app.high_scores, app.theme);
        frame.render_widget(panel, sidebar);
    }

    frame.render_widget(
        footer_line(app, " [Enter] Submit  [Esc] Back to menu "),
        app_layout.footer,
    );

    if app.confirm_abandon {
        render_confirm_abandon(frame, app);
    }
}

fn render_confirm_abandon(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let popup = ui::layout::centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Leave game? ")
        .border_style(Style::default().fg(colors.warning()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "This game will not be scored.",
            Style::default().fg(colors.fg()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[y] Leave   [n] Keep playing",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_game_over(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(summary) = app.session.last_summary() {
        let centered = ui::layout::centered_rect(60, 70, area);
        frame.render_widget(Dashboard::new(summary, app.theme), centered);
    }
}

fn render_high_scores(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let info = format!(" Top {} ", app.config.leaderboard_size);
    frame.render_widget(header_line(app, info), layout[0]);

    let centered = ui::layout::centered_rect(40, 60, layout[1]);
    let panel = LeaderboardPanel::new(app.session.high_score(), &app.high_scores, app.theme);
    frame.render_widget(panel, centered);

    frame.render_widget(footer_line(app, " [q/Esc] Back "), layout[2]);
}
