mod app;
mod event;
mod render;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;

use crate::store::TaskStore;
use crate::watch;
use app::App;
use event::KeyAction;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run(store_path: &Path, store: TaskStore) -> Result<()> {
    let mut app = App::new(store);

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, store_path);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store_path: &Path,
) -> Result<()> {
    // Cross-session signal: reload when another process writes the file
    let (_watcher, rx) = watch::watch_store(store_path)?;

    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if ct_event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = ct_event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let KeyAction::Quit = event::handle_key(app, key) {
                        return Ok(());
                    }
                }
            }
        }

        // Check for file changes (non-blocking). Our own writes land here
        // too; reloading a snapshot we just wrote is a no-op.
        if watch::wait_for_change(&rx, Duration::ZERO) {
            watch::drain_events(&rx);
            app.reload();
        }
    }
}
