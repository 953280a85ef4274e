//! Terminal snake runner (default binary).
//!
//! Menu, campaign and free play on top of the deterministic core. Rendering
//! goes through the framebuffer renderer; logs go to a file because the
//! terminal is in raw mode while the game runs.

use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tui_snake::core::{
    free_play, Campaign, CampaignProgress, Level, LevelState, Session, SessionConfig, Settings,
};
use tui_snake::input::{handle_key_event, should_quit};
use tui_snake::term::{
    GameView, MenuCursor, MenuItem, PlayMode, ScreenView, TerminalRenderer, Viewport,
};
use tui_snake::types::{Command, Direction};

fn main() -> Result<()> {
    init_tracing();

    let settings = Settings::from_env().context("load settings")?;
    info!(levels = settings.levels.len(), frame_rate = settings.frame_rate, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!(error = %err, "exited with error");
    }
    result
}

/// Log to `SNAKE_LOG` (default `tui-snake.log`); no logging if it cannot be opened.
fn init_tracing() {
    let path = env::var("SNAKE_LOG").unwrap_or_else(|_| "tui-snake.log".to_string());
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
}

enum Run {
    Campaign(Campaign),
    Free,
}

struct Play {
    session: Session,
    run: Run,
}

impl Play {
    fn mode(&self) -> PlayMode {
        match &self.run {
            Run::Campaign(campaign) => PlayMode::Campaign {
                number: campaign.level_number(),
                count: campaign.level_count(),
            },
            Run::Free => PlayMode::Free,
        }
    }
}

enum Screen {
    Menu(MenuCursor),
    Playing(Play),
    Message { title: String, lines: Vec<String> },
}

/// What the main loop should do after handling a key
enum Flow {
    Continue,
    Quit,
}

fn run(term: &mut TerminalRenderer, settings: &Settings) -> Result<()> {
    let game_view = GameView::default();
    let screen_view = ScreenView;
    let mut screen = Screen::Menu(MenuCursor::default());

    let frame = Duration::from_secs(1) / settings.frame_rate.max(1);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let fb = term.frame();
        match &screen {
            Screen::Menu(cursor) => screen_view.render_menu_into(*cursor, viewport, fb),
            Screen::Playing(play) => {
                game_view.render_into(&play.session, play.mode(), viewport, fb)
            }
            Screen::Message { title, lines } => {
                screen_view.render_message_into(title, lines, viewport, fb)
            }
        }
        term.present()?;

        // Input with timeout until next tick.
        let timeout = frame.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        let (next, flow) = handle_command(screen, command, settings);
                        screen = next;
                        if let Flow::Quit = flow {
                            return Ok(());
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= frame {
            last_tick = Instant::now();
            if let Screen::Playing(play) = &mut screen {
                play.session.tick().context("advance game")?;
            }
        }
    }
}

fn handle_command(screen: Screen, command: Command, settings: &Settings) -> (Screen, Flow) {
    match screen {
        Screen::Menu(mut cursor) => match command {
            Command::Steer(Direction::Up) => {
                cursor.up();
                (Screen::Menu(cursor), Flow::Continue)
            }
            Command::Steer(Direction::Down) => {
                cursor.down();
                (Screen::Menu(cursor), Flow::Continue)
            }
            Command::Confirm => match cursor.selected() {
                MenuItem::Campaign => (start_campaign(settings), Flow::Continue),
                MenuItem::FreePlay => (start_free_play(settings), Flow::Continue),
                MenuItem::Quit => (Screen::Menu(cursor), Flow::Quit),
            },
            Command::Back => (Screen::Menu(cursor), Flow::Quit),
            _ => (Screen::Menu(cursor), Flow::Continue),
        },
        Screen::Playing(mut play) => match command {
            Command::Steer(direction) => {
                play.session.push_direction(direction);
                (Screen::Playing(play), Flow::Continue)
            }
            Command::Pause => {
                if play.session.state() == LevelState::Playing {
                    play.session.toggle_pause();
                }
                (Screen::Playing(play), Flow::Continue)
            }
            Command::Confirm if play.session.state() != LevelState::Playing => {
                (finish_level(play, settings), Flow::Continue)
            }
            Command::Back => (Screen::Menu(MenuCursor::default()), Flow::Continue),
            Command::Confirm => (Screen::Playing(play), Flow::Continue),
        },
        Screen::Message { title, lines } => match command {
            Command::Confirm | Command::Back => {
                (Screen::Menu(MenuCursor::default()), Flow::Continue)
            }
            _ => (Screen::Message { title, lines }, Flow::Continue),
        },
    }
}

fn start_campaign(settings: &Settings) -> Screen {
    let campaign = Campaign::from_settings(settings);
    match campaign.load_current(settings) {
        Ok(Some(level)) => play_screen(level, Run::Campaign(campaign), settings),
        Ok(None) => message("NO LEVELS", vec!["No levels are configured".to_string()]),
        Err(err) => load_failed(err),
    }
}

fn start_free_play(settings: &Settings) -> Screen {
    match free_play(settings) {
        Ok(level) => play_screen(level, Run::Free, settings),
        Err(err) => load_failed(err),
    }
}

fn play_screen(level: Level, run: Run, settings: &Settings) -> Screen {
    let specials = match settings.special_foods() {
        Ok(specials) => specials,
        Err(err) => {
            warn!(error = %err, "special foods disabled");
            Vec::new()
        }
    };
    let session = Session::new(level, SessionConfig::from_settings(settings), specials);
    Screen::Playing(Play { session, run })
}

/// Leave a level that has ended: next level, or the result screen.
fn finish_level(play: Play, settings: &Settings) -> Screen {
    let level = play.session.into_level();
    match play.run {
        Run::Free => message(
            if level.is_won() { "FIELD FILLED" } else { "GAME OVER" },
            vec![format!("Score {}", level.score())],
        ),
        Run::Campaign(mut campaign) => match campaign.finish(&level) {
            CampaignProgress::Next { .. } => match campaign.load_current(settings) {
                Ok(Some(next)) => play_screen(next, Run::Campaign(campaign), settings),
                Ok(None) => message("YOU WIN", Vec::new()),
                Err(err) => load_failed(err),
            },
            CampaignProgress::Won { health } => message(
                "YOU WIN",
                vec![
                    format!("All {} levels cleared", campaign.level_count()),
                    format!("Health left {health}"),
                ],
            ),
            CampaignProgress::Lost => message(
                "GAME OVER",
                vec![format!("Reached level {}", campaign.level_number())],
            ),
            CampaignProgress::InProgress => message("GAME OVER", Vec::new()),
        },
    }
}

fn load_failed(err: tui_snake::core::Error) -> Screen {
    error!(error = %err, "level load failed");
    message("LOAD FAILED", vec![err.to_string()])
}

fn message(title: &str, lines: Vec<String>) -> Screen {
    Screen::Message {
        title: title.to_string(),
        lines,
    }
}
