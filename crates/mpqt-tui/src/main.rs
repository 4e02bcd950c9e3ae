//! MPQt: a terminal browser for flat-listing archives built with ratatui.
//!
//! This binary initialises the terminal, opens every archive named on the
//! command line in its own tab, runs the main event loop and restores the
//! terminal on exit or panic.

mod app;
mod icons;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mpqt_core::config::keymap::Keymap;
use mpqt_core::config::settings::Config;
use mpqt_core::CoreError;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{config_path, App};
use crate::input::{handle_key, InputAction, InputState};
use crate::render::render;

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Loads a config file, falling back to defaults when it does not exist.
fn load_or_default<T: Default>(
    path: &Path,
    load: impl FnOnce(&Path) -> mpqt_core::CoreResult<T>,
) -> anyhow::Result<T> {
    match load(path) {
        Ok(value) => Ok(value),
        Err(CoreError::NotFound(_)) => Ok(T::default()),
        Err(e) => Err(anyhow::anyhow!("{}: {e}", path.display())),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing (logs to file to avoid terminal interference)
    let log_path = std::env::temp_dir().join("mpqt.log");
    tracing_subscriber::fmt()
        .with_writer(move || {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        })
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = load_or_default(&config_path("config.toml"), Config::load)?;
    let keymap = load_or_default(&config_path("keymap.toml"), Keymap::load)?;
    let archives: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, config, keymap, &archives);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    keymap: Keymap,
    archives: &[PathBuf],
) -> anyhow::Result<()> {
    let mut app = archives
        .iter()
        .fold(App::new(config, keymap), |app, path| app.open_path(path));
    let mut input_state = InputState::new();
    tracing::info!(archives = archives.len(), "mpqt started");

    loop {
        terminal.draw(|f| render(f, &app))?;

        if app.should_quit() {
            break;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let (action, new_input_state) = handle_key(key, app.mode(), &input_state, app.keymap());
        input_state = new_input_state;
        app = dispatch(app, action);
    }

    Ok(())
}

/// Applies one input action to the app.
fn dispatch(app: App, action: InputAction) -> App {
    match action {
        InputAction::Command(cmd) => app.with_clear_status().handle_command(cmd),
        InputAction::EnterMode(mode) => app.with_mode(mode),
        InputAction::Quit => app.with_quit(),
        InputAction::CursorTop => app.with_cursor_top(),
        InputAction::CursorBottom => app.with_cursor_bottom(),
        InputAction::ToggleMark => app.with_toggled_mark(),
        InputAction::Extract => app.extract_selection(),
        InputAction::StartSearch => app.start_search(),
        InputAction::SearchChar(c) => app.search_push_char(c),
        InputAction::SearchBackspace => app.search_pop_char(),
        InputAction::SearchConfirm => app.search_confirm(),
        InputAction::SearchCancel => app.search_cancel(),
        InputAction::StartLocation => app.start_location(),
        InputAction::LocationChar(c) => app.location_push_char(c),
        InputAction::LocationBackspace => app.location_pop_char(),
        InputAction::LocationConfirm => app.with_clear_status().location_confirm(),
        InputAction::SortCycle => app.with_next_sort(),
        InputAction::SortBy(key) => app.with_sort_key(key),
        InputAction::ToggleDirection => app.with_toggled_direction(),
        InputAction::TabNext => app.with_next_tab(),
        InputAction::TabPrev => app.with_prev_tab(),
        InputAction::TabClose => app.with_close_tab(),
        InputAction::None => app,
    }
}
