//! GRIDFALL - a falling-block puzzle for the terminal

mod board;
mod game;
mod input;
mod piece;
mod score;
mod settings;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Game, GameConfig, GameEvent};
use input::{InputEvent, InputHandler};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// How long the game-over banner stays on screen
const GAME_OVER_BANNER: Duration = Duration::from_secs(2);

fn main() -> io::Result<()> {
    // Session ID distinguishes concurrent instances' log files
    let session_id: u32 = rand::random();

    let log_dir = std::env::temp_dir().join("gridfall");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = format!("{:08x}.log", session_id);

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gridfall=debug".parse().unwrap()),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "GRIDFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Write the default file on first launch so there is something to edit
    if !Settings::exists() {
        if let Err(e) = settings.save() {
            tracing::warn!("could not write default settings: {}", e);
        }
    }

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Ok(final_score) = &result {
        println!("Thanks for playing GRIDFALL!");
        println!("Last score: {}", final_score);
    }

    result.map(|_| ())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<u64> {
    let config = GameConfig {
        normal_drop: Duration::from_millis(settings.timing.normal_drop_ms),
        soft_drop: Duration::from_millis(settings.timing.soft_drop_ms),
        ..GameConfig::default()
    };
    let mut game = Game::new(config);
    let mut input = InputHandler::from_settings(settings);

    let start = Instant::now();
    let mut last_final_score: u64 = 0;
    let mut banner_until: Option<(u64, Instant)> = None;

    loop {
        // Render
        let banner = banner_until.and_then(|(score, until)| {
            (Instant::now() < until).then_some(score)
        });
        terminal.draw(|frame| ui::render_game(frame, &game, settings, banner))?;

        // Handle input
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Release => input.key_up(key),
                    KeyEventKind::Press | KeyEventKind::Repeat => match input.key_down(key) {
                        Some(InputEvent::Quit) => return Ok(last_final_score),
                        Some(InputEvent::Game(action)) => {
                            game.process_action(action);
                        }
                        None => {}
                    },
                }
            }
        }

        // The soft-drop control maps press/release to the interval toggle
        game.set_soft_drop(input.soft_drop_held());

        // Advance the core with a monotonic timestamp
        for event in game.on_tick(start.elapsed()) {
            match event {
                GameEvent::LinesCleared { count, points } => {
                    tracing::info!("cleared {} line(s) for {} points", count, points);
                }
                GameEvent::GameOver { final_score } => {
                    tracing::info!("game over, final score {}", final_score);
                    last_final_score = final_score;
                    banner_until = Some((final_score, Instant::now() + GAME_OVER_BANNER));
                }
            }
        }
    }
}
