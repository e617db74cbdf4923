//! Terminal user interface (TUI) for slate.
//!
//! Provides the full-screen view over the task store: an entry field for new
//! tasks, the selectable task list, and the modal dialogs that gate
//! destructive operations.
//!
//! ## Entry points
//!
//! - [`run`] — terminal setup, event loop, teardown.
//! - [`list::TaskListView`] — the view itself, fully drivable in tests.

pub mod confirm;
pub mod list;
pub mod update_dialog;

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use list::TaskListView;
use ratatui::DefaultTerminal;
use slate_core::TaskStore;
use std::io::stdout;
use std::time::Duration;

/// How long to wait for input before redrawing. Keeps transient status-bar
/// messages expiring on time even when the user is idle.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the TUI over `store` until the user quits.
pub fn run(store: TaskStore) -> Result<()> {
    let mut terminal = ratatui::init();
    let _ = execute!(stdout(), EnableMouseCapture);

    let mut view = TaskListView::new(store);
    let result = event_loop(&mut terminal, &mut view);

    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, view: &mut TaskListView) -> Result<()> {
    while !view.should_quit() {
        terminal.draw(|frame| view.render(frame, frame.area()))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => view.handle_key(key),
                Event::Mouse(mouse) => view.handle_mouse(mouse),
                _ => {}
            }
        }
    }
    Ok(())
}
