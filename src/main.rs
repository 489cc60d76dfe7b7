//! DROPRIS - a classic falling-block puzzle for the terminal

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dropris::{
    Difficulty, Game, HighScoreStore, JsonFileStore, MemoryStore,
    input::{Command, InputHandler},
    menu::{Menu, MenuAction},
    settings::Settings,
    ui,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Pause between the final lock and the game over popup
const GAME_OVER_DELAY: Duration = Duration::from_millis(500);

type Store = Box<dyn HighScoreStore>;

/// Application state
enum AppState {
    Menu { menu: Menu, store: Store },
    /// `over_since` is set on the frame the game ends
    Playing { game: Game<Store>, over_since: Option<Instant> },
}

/// Screen change requested by a key press
enum Transition {
    Start(Difficulty),
    Restart,
    ToMenu,
    Quit,
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Logs go to a file, the terminal belongs to the UI
    let log_dir = std::env::temp_dir().join("dropris");
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dropris=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "DROPRIS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let mut settings = Settings::load();

    let store: Store = match JsonFileStore::in_data_dir() {
        Ok(store) => {
            tracing::info!("High scores at {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("{}; high scores will not persist", e);
            Box::new(MemoryStore::new())
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut settings, store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Remember the last difficulty
    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if result.is_ok() {
        println!("\nThanks for playing DROPRIS!");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &mut Settings,
    store: Store,
) -> io::Result<()> {
    let input = InputHandler::from_settings(settings);
    let high_scores = store.load();
    let mut state = AppState::Menu {
        menu: Menu::new(settings.gameplay.difficulty, high_scores),
        store,
    };
    let mut last_frame = Instant::now();

    loop {
        // Render
        terminal.draw(|frame| match &state {
            AppState::Menu { menu, .. } => ui::render_menu(frame, menu),
            AppState::Playing { game, over_since } => {
                let show_game_over = over_since.is_some_and(|t| t.elapsed() >= GAME_OVER_DELAY);
                ui::render_game(frame, game, show_game_over);
            }
        })?;

        // Handle input
        let mut transition = None;
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    transition = handle_key(&mut state, &input, key);
                }
            }
        }

        // Gravity
        let now = Instant::now();
        let elapsed = now.duration_since(last_frame);
        last_frame = now;
        if let AppState::Playing { game, over_since } = &mut state {
            game.tick(elapsed);
            if game.is_game_over() && over_since.is_none() {
                *over_since = Some(now);
            }
        }

        match transition {
            Some(Transition::Quit) => return Ok(()),
            Some(transition) => state = apply_transition(state, transition, settings),
            None => {}
        }
    }
}

fn handle_key(state: &mut AppState, input: &InputHandler, key: KeyEvent) -> Option<Transition> {
    match state {
        AppState::Menu { menu, .. } => match key.code {
            KeyCode::Up => {
                menu.move_up();
                None
            }
            KeyCode::Down => {
                menu.move_down();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match menu.select()? {
                MenuAction::StartGame(difficulty) => Some(Transition::Start(difficulty)),
                MenuAction::Quit => Some(Transition::Quit),
            },
            KeyCode::Char('q') | KeyCode::Esc => Some(Transition::Quit),
            _ => None,
        },
        AppState::Playing { game, over_since } => {
            if let Some(since) = over_since {
                // Swallow keys still pressed from the last drop
                if since.elapsed() < GAME_OVER_DELAY {
                    return None;
                }
                return match key.code {
                    KeyCode::Enter | KeyCode::Char('r') => Some(Transition::Restart),
                    KeyCode::Esc | KeyCode::Char('m') => Some(Transition::ToMenu),
                    KeyCode::Char('q') => Some(Transition::Quit),
                    _ => None,
                };
            }

            match input.key_down(key)? {
                Command::Game(action) => {
                    game.process_action(action);
                    None
                }
                Command::Back => Some(Transition::ToMenu),
                Command::Quit => Some(Transition::Quit),
            }
        }
    }
}

fn apply_transition(state: AppState, transition: Transition, settings: &mut Settings) -> AppState {
    match (state, transition) {
        (AppState::Menu { store, .. }, Transition::Start(difficulty)) => {
            settings.gameplay.difficulty = difficulty;
            AppState::Playing {
                game: Game::new(difficulty, store),
                over_since: None,
            }
        }
        (AppState::Playing { game, .. }, Transition::Restart) => AppState::Playing {
            game: game.restart(),
            over_since: None,
        },
        (AppState::Playing { game, .. }, Transition::ToMenu) => {
            let difficulty = game.difficulty();
            let store = game.into_store();
            let high_scores = store.load();
            AppState::Menu {
                menu: Menu::new(difficulty, high_scores),
                store,
            }
        }
        (state, _) => state,
    }
}
