//! E60TRIS - terminal front-end
//!
//! Thin wrapper around the engine: captures keys, paces gravity, draws
//! snapshots.

mod input;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use e60tris::settings::Settings;
use e60tris::{Engine, Intent, Phase};
use input::KeyBindings;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the e60tris temp directory, creating it if needed
fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("e60tris");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "e60tris=debug".parse::<tracing_subscriber::filter::Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "E60TRIS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    // Load settings
    let settings = Settings::load();
    let seed = settings.gameplay.seed.unwrap_or_else(rand::random);
    let mut engine = Engine::with_config(seed, settings.gameplay.gravity());

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &mut engine, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Write settings back so the file exists for editing
    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if result.is_ok() {
        let score = engine.score();
        println!("\nThanks for playing E60TRIS!");
        println!("Final Score: {}", score.points);
        println!("Level: {} | Lines: {}", score.level, score.lines);
    }
    tracing::info!("Shutting down, score={}", engine.score().points);

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &mut Engine,
    settings: &Settings,
) -> io::Result<()> {
    let bindings = KeyBindings::from_settings(settings);
    let mut last_fall = Instant::now();

    loop {
        let snapshot = engine.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot, settings))?;

        // Handle input
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    if let Some(intent) = bindings.intent_for(key) {
                        let before = engine.phase();
                        engine.apply_intent(intent);
                        if restarts_fall_timer(intent, before, engine.phase()) {
                            last_fall = Instant::now();
                        }
                    }
                }
            }
        }

        if engine.should_quit() {
            return Ok(());
        }

        // Gravity
        if engine.phase() == Phase::Falling && last_fall.elapsed() >= engine.fall_duration() {
            engine.apply_gravity_tick();
            last_fall = Instant::now();
        }
    }
}

/// Paused time and time left over from the previous game never count
/// toward the next gravity step
fn restarts_fall_timer(intent: Intent, before: Phase, after: Phase) -> bool {
    intent == Intent::Reset || (before != Phase::Falling && after == Phase::Falling)
}
