//! ASTER TUI — four-view terminal interface.
//!
//! Views:
//! 1. Dashboard — global metric tiles and the coin table
//! 2. Detail — price context, DCA simulator, on-demand analysis verdict
//! 3. Portfolio — tracked holdings and the portfolio audit
//! 4. Bot — the simulated trading terminal

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use aster_core::market::POLL_INTERVAL;
use aster_core::rng::SeedHierarchy;
use aster_core::store::JsonStore;

use crate::app::AppState;
use crate::worker::WorkerCommand;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let data_dir = PathBuf::from("data");
    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aster")
        .join("state.json");

    // Load persisted view state
    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    // The master seed keys every stochastic stream in the session.
    let seeds = SeedHierarchy::new(0xA57E2);

    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx, seeds.clone());

    // Build app state
    let store = JsonStore::new(&data_dir);
    let mut app = AppState::new(cmd_tx.clone(), resp_rx, store, seeds);
    persistence::apply(&mut app, persisted);

    // First market refresh
    app.request_refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save view state before exit
    let persisted = persistence::extract(&app);
    let _ = persistence::save(&state_path, &persisted);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        app.drain_worker();

        // 3. Advance the bot session and toast lifetimes
        app.tick();

        // 4. Periodic market refresh
        let refresh_due = app
            .last_refresh
            .map(|at| at.elapsed() >= POLL_INTERVAL)
            .unwrap_or(false);
        if refresh_due {
            app.request_refresh();
        }

        // 5. Input, with a timeout that keeps the bot ticking
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == crossterm::event::KeyEventKind::Press {
                    input::handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
