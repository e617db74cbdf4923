//! TUI list view for slate.
//!
//! Full-screen layout: a New Task entry field on top, the task list below,
//! and a one-line status bar at the bottom. The list is re-projected from
//! the store on every frame; the view never holds its own copy of the tasks.
//!
//! Key bindings: a/i focus the entry field, j/k navigate, u update,
//! space/x mark complete, d delete, C clear all, ? help, q quit.

use super::confirm::{ConfirmAction, ConfirmDialog};
use super::update_dialog::{DialogAction, UpdateDialog};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};
use slate_core::{Status, StoreError, Task, TaskStore};
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which part of the view owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    /// Keys navigate the list and trigger actions.
    #[default]
    List,
    /// Keys edit the new-task entry field.
    Entry,
    /// Update modal is open.
    Update,
    /// A yes/no confirmation overlay is open.
    Confirm,
    /// Help overlay is open.
    Help,
}

/// The destructive operation a confirmation overlay is gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GatedOp {
    Delete(usize),
    ClearAll,
}

/// Full-screen view over the task store.
pub struct TaskListView {
    /// The task store; the view holds the only handle.
    store: TaskStore,
    /// New-task entry buffer.
    entry: String,
    /// Cursor position in `entry`, in chars.
    entry_cursor: usize,
    /// Table navigation state (selected row index == store index).
    table_state: TableState,
    /// Current input mode.
    input_mode: InputMode,
    /// Update modal and the index it edits, when open.
    update_dialog: Option<(UpdateDialog, usize)>,
    /// Confirmation overlay and the operation it gates, when open.
    confirm: Option<(ConfirmDialog, GatedOp)>,
    /// Transient status message and when it was set.
    status_msg: Option<(String, Instant)>,
    /// Whether to quit.
    should_quit: bool,
    /// Geometry used for mouse interactions.
    entry_area: Rect,
    /// Geometry used for mouse interactions.
    list_area: Rect,
}

impl TaskListView {
    /// Create a view over `store`, selecting the first task if any.
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        let mut view = Self {
            store,
            entry: String::new(),
            entry_cursor: 0,
            table_state: TableState::default(),
            input_mode: InputMode::default(),
            update_dialog: None,
            confirm: None,
            status_msg: None,
            should_quit: false,
            entry_area: Rect::default(),
            list_area: Rect::default(),
        };
        if !view.store.is_empty() {
            view.table_state.select(Some(0));
        }
        if view.store.recovered() {
            view.set_status(
                "Task file was unreadable — starting with an empty list".to_string(),
            );
        }
        view
    }

    /// The store index of the selected row, if any.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.table_state
            .selected()
            .filter(|&index| index < self.store.len())
    }

    /// Returns true if the view has been asked to quit (e.g. 'q' key).
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The current transient status message, if one is showing.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_msg.as_ref().map(|(msg, _)| msg.as_str())
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_msg = Some((msg, Instant::now()));
    }

    // -----------------------------------------------------------------------
    // Input handling
    // -----------------------------------------------------------------------

    /// Feed a key event to whichever mode owns the keyboard.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::List => self.handle_list_key(key),
            InputMode::Entry => self.handle_entry_key(key),
            InputMode::Update => self.handle_update_key(key),
            InputMode::Confirm => self.handle_confirm_key(key),
            InputMode::Help => self.handle_help_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Quit
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('q') => self.should_quit = true,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.select_last(),

            // Focus the entry field.
            KeyCode::Char('a' | 'i') => self.input_mode = InputMode::Entry,

            // Update the selected task.
            KeyCode::Char('u' | 'e') => self.open_update_dialog(),

            // Mark the selected task complete.
            KeyCode::Char(' ' | 'x') => self.mark_selected_complete(),

            // Delete the selected task (confirmation gated).
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),

            // Clear all tasks (confirmation gated).
            KeyCode::Char('C') => self.request_clear_all(),

            // Help overlay.
            KeyCode::Char('?') => self.input_mode = InputMode::Help,

            _ => {}
        }
    }

    fn handle_entry_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::List,
            KeyCode::Enter => self.add_from_entry(),
            KeyCode::Tab => self.input_mode = InputMode::List,
            _ => edit_single_line(&mut self.entry, &mut self.entry_cursor, key),
        }
    }

    fn handle_update_key(&mut self, key: KeyEvent) {
        let Some((dialog, index)) = self.update_dialog.as_mut() else {
            self.input_mode = InputMode::List;
            return;
        };
        let index = *index;

        match dialog.handle_key(key) {
            None => {}
            Some(DialogAction::Cancel) => {
                self.update_dialog = None;
                self.input_mode = InputMode::List;
            }
            Some(DialogAction::Submit(text)) => {
                self.update_dialog = None;
                self.input_mode = InputMode::List;
                match self.store.update(index, &text) {
                    Ok(()) => self.set_status(format!("Updated task — {}", saved_note())),
                    Err(err) => self.warn_store(&err),
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Some((dialog, op)) = self.confirm.as_ref() else {
            self.input_mode = InputMode::List;
            return;
        };

        match dialog.handle_key(key) {
            None => {}
            Some(ConfirmAction::Cancel) => {
                self.confirm = None;
                self.input_mode = InputMode::List;
            }
            Some(ConfirmAction::Confirm) => {
                let op = *op;
                self.confirm = None;
                self.input_mode = InputMode::List;
                self.run_gated(op);
            }
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q' | '?')) {
            self.input_mode = InputMode::List;
        }
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    fn add_from_entry(&mut self) {
        match self.store.add(&self.entry) {
            Ok(index) => {
                self.entry.clear();
                self.entry_cursor = 0;
                self.table_state.select(Some(index));
                self.set_status(format!("Added task — {}", saved_note()));
            }
            Err(err) => self.warn_store(&err),
        }
    }

    fn open_update_dialog(&mut self) {
        let Some(index) = self.require_selection() else {
            return;
        };
        let Some(task) = self.store.get(index) else {
            return;
        };
        self.update_dialog = Some((UpdateDialog::new(&task.description), index));
        self.input_mode = InputMode::Update;
    }

    fn mark_selected_complete(&mut self) {
        let Some(index) = self.require_selection() else {
            return;
        };
        match self.store.mark_complete(index) {
            Ok(()) => {
                let description = self
                    .store
                    .get(index)
                    .map(|task| task.description.clone())
                    .unwrap_or_default();
                self.set_status(format!("Completed '{description}' — {}", saved_note()));
            }
            Err(err) => self.warn_store(&err),
        }
    }

    fn request_delete(&mut self) {
        let Some(index) = self.require_selection() else {
            return;
        };
        let description = self
            .store
            .get(index)
            .map(|task| task.description.clone())
            .unwrap_or_default();
        self.confirm = Some((
            ConfirmDialog::new("Confirm Delete", format!("Delete task '{description}'?")),
            GatedOp::Delete(index),
        ));
        self.input_mode = InputMode::Confirm;
    }

    fn request_clear_all(&mut self) {
        if self.store.is_empty() {
            self.set_status("Nothing to clear".to_string());
            return;
        }
        self.confirm = Some((
            ConfirmDialog::new("Clear All", "Are you sure you want to delete all tasks?"),
            GatedOp::ClearAll,
        ));
        self.input_mode = InputMode::Confirm;
    }

    fn run_gated(&mut self, op: GatedOp) {
        match op {
            GatedOp::Delete(index) => match self.store.delete(index) {
                Ok(task) => {
                    self.clamp_selection();
                    self.set_status(format!("Deleted '{}' — {}", task.description, saved_note()));
                }
                Err(err) => self.warn_store(&err),
            },
            GatedOp::ClearAll => match self.store.clear_all() {
                Ok(removed) => {
                    self.table_state.select(None);
                    self.set_status(format!("Cleared {removed} tasks — {}", saved_note()));
                }
                Err(err) => self.warn_store(&err),
            },
        }
    }

    /// Selected index, or a status-bar warning when nothing is selected.
    fn require_selection(&mut self) -> Option<usize> {
        let selected = self.selected_index();
        if selected.is_none() {
            self.set_status("Select a task first".to_string());
        }
        selected
    }

    fn warn_store(&mut self, err: &StoreError) {
        tracing::warn!(code = %err.code(), "store operation failed: {err}");
        let notice = match err.code().hint() {
            Some(hint) => format!("{}: {err} — {hint}", err.code()),
            None => format!("{}: {err}", err.code()),
        };
        self.set_status(notice);
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    fn select_next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let next = self
            .table_state
            .selected()
            .map_or(0, |i| (i + 1).min(len - 1));
        self.table_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let prev = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    fn select_first(&mut self) {
        if !self.store.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.table_state.select(None);
        } else if let Some(selected) = self.table_state.selected() {
            if selected >= len {
                self.table_state.select(Some(len - 1));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mouse
    // -----------------------------------------------------------------------

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(self.input_mode, InputMode::List | InputMode::Entry) {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let x = mouse.column;
                let y = mouse.row;

                if self.entry_area.contains((x, y).into()) {
                    self.input_mode = InputMode::Entry;
                } else if self.list_area.contains((x, y).into()) {
                    self.input_mode = InputMode::List;
                    let row = y.saturating_sub(self.list_area.y.saturating_add(1)) as usize;
                    if row < self.store.len() {
                        self.table_state.select(Some(row));
                    }
                }
            }
            MouseEventKind::ScrollDown => self.select_next(),
            MouseEventKind::ScrollUp => self.select_prev(),
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Render the view into `area` within the given frame.
    pub fn render(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        render_into(frame, self, area);
    }
}

// ---------------------------------------------------------------------------
// Single-line editing helpers
// ---------------------------------------------------------------------------

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

fn insert_char_at(s: &mut String, char_idx: usize, c: char) {
    let at = byte_index(s, char_idx);
    s.insert(at, c);
}

fn remove_char_at(s: &mut String, char_idx: usize) {
    let at = byte_index(s, char_idx);
    if at < s.len() {
        s.remove(at);
    }
}

fn edit_single_line(text: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Left => *cursor = cursor.saturating_sub(1),
        KeyCode::Right => *cursor = (*cursor + 1).min(char_len(text)),
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = char_len(text),
        KeyCode::Backspace => {
            if *cursor > 0 {
                let remove_idx = *cursor - 1;
                remove_char_at(text, remove_idx);
                *cursor = remove_idx;
            }
        }
        KeyCode::Delete => {
            remove_char_at(text, *cursor);
        }
        KeyCode::Char(c) => {
            insert_char_at(text, *cursor, c);
            *cursor += 1;
        }
        _ => {}
    }
}

/// Render `text` with a visible cursor at `cursor` (a char offset).
fn with_cursor(text: &str, cursor: usize) -> String {
    let mut out = String::with_capacity(text.len() + 3);
    for (i, c) in text.chars().enumerate() {
        if i == cursor {
            out.push('▏');
        }
        out.push(c);
    }
    if cursor >= char_len(text) {
        out.push('▏');
    }
    out
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// The exact display projection of one task; [`build_row`] must flatten to
/// this. Kept as the reference the tests hold the rendering to.
#[cfg(test)]
fn task_line(task: &Task) -> String {
    format!("{}   →   [{}]", task.description, task.status)
}

/// Color for a status value.
const fn status_color(status: Status) -> Color {
    match status {
        Status::Pending => Color::Cyan,
        Status::Completed => Color::Green,
    }
}

/// Truncate a string to at most `max_chars`, appending '…' if truncated.
fn truncate(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_chars {
        s.to_string()
    } else if max_chars == 0 {
        String::new()
    } else {
        let truncated: String = chars[..max_chars.saturating_sub(1)].iter().collect();
        format!("{truncated}…")
    }
}

/// Build one table `Row` projecting a task as `<description>   →   [<status>]`.
fn build_row(task: &Task, width: u16) -> Row<'static> {
    let arrow = "   →   ";
    let status_tag = format!("[{}]", task.status);
    let budget = (width as usize).saturating_sub(char_len(arrow) + char_len(&status_tag));
    let description = truncate(&task.description, budget);

    let description_style = if task.is_completed() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    let cell = Cell::from(Line::from(vec![
        Span::styled(description, description_style),
        Span::styled(arrow, Style::default().fg(Color::DarkGray)),
        Span::styled(status_tag, Style::default().fg(status_color(task.status))),
    ]));
    Row::new([cell])
}

fn render_into(frame: &mut ratatui::Frame<'_>, app: &mut TaskListView, area: Rect) {
    // Layout: entry field + list + status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    app.entry_area = chunks[0];
    app.list_area = chunks[1];
    let status_area = chunks[2];

    // -----------------------------------------------------------------------
    // Entry field
    // -----------------------------------------------------------------------
    let entry_focused = app.input_mode == InputMode::Entry;
    let entry_border = if entry_focused {
        Color::Green
    } else {
        Color::DarkGray
    };
    let entry_text = if entry_focused {
        with_cursor(&app.entry, app.entry_cursor)
    } else {
        app.entry.clone()
    };
    frame.render_widget(
        Paragraph::new(entry_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(entry_border))
                .title(" New Task ")
                .title_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
        ),
        app.entry_area,
    );

    // -----------------------------------------------------------------------
    // Task list
    // -----------------------------------------------------------------------
    let body_width = app.list_area.width.saturating_sub(4).max(10);
    let rows: Vec<Row<'static>> = app
        .store
        .tasks()
        .iter()
        .map(|task| build_row(task, body_width))
        .collect();

    let pending = app
        .store
        .tasks()
        .iter()
        .filter(|task| !task.is_completed())
        .count();
    let block_title = format!(" slate — {} tasks ({pending} pending) ", app.store.len());

    let list_border_style = if entry_focused {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green)
    };

    let table = Table::new(rows, [Constraint::Min(10)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(list_border_style)
                .title(block_title)
                .title_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(" ");

    frame.render_stateful_widget(table, app.list_area, &mut app.table_state);

    // -----------------------------------------------------------------------
    // Status bar
    // -----------------------------------------------------------------------
    let status_text = build_status_bar(app);
    frame.render_widget(
        Paragraph::new(status_text).alignment(Alignment::Left),
        status_area,
    );

    // -----------------------------------------------------------------------
    // Overlays
    // -----------------------------------------------------------------------
    if let Some((dialog, _)) = app.update_dialog.as_ref() {
        dialog.render(frame, area);
    }
    if let Some((dialog, _)) = app.confirm.as_ref() {
        dialog.render(frame, area);
    }
    if app.input_mode == InputMode::Help {
        render_help_overlay(frame, area);
    }
}

/// Build the status bar line: a recent transient message, or key hints.
fn build_status_bar(app: &TaskListView) -> Line<'static> {
    if let Some((ref msg, at)) = app.status_msg {
        if at.elapsed() < Duration::from_secs(3) {
            return Line::from(vec![Span::styled(
                msg.clone(),
                Style::default().fg(Color::Cyan),
            )]);
        }
    }

    let key_style = Style::default().fg(Color::Cyan);
    let dim_style = Style::default().fg(Color::DarkGray);
    let hints: &[(&str, &str)] = match app.input_mode {
        InputMode::Entry => &[("ENTER", "add task"), ("ESC", "back to list")],
        InputMode::Update => &[("ENTER", "save"), ("ESC", "cancel")],
        InputMode::Confirm => &[("y", "confirm"), ("n", "cancel")],
        InputMode::Help => &[("ESC", "close help")],
        InputMode::List => &[
            ("a", "add"),
            ("u", "update"),
            ("space", "complete"),
            ("d", "delete"),
            ("C", "clear all"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans: Vec<Span<'static>> = Vec::with_capacity(hints.len() * 2);
    for (key, desc) in hints {
        spans.push(Span::styled((*key).to_string(), key_style));
        spans.push(Span::styled(format!(" {desc}  "), dim_style));
    }
    Line::from(spans)
}

fn help_hotkeys() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("a/i", "list", "focus the entry field"),
        ("j/k", "list", "move selection"),
        ("g/G", "list", "first/last task"),
        ("u/e", "list", "update selected task"),
        ("space/x", "list", "mark selected task complete"),
        ("d", "list", "delete selected task"),
        ("C", "list", "clear all tasks"),
        ("?", "list", "open help overlay"),
        ("q", "list", "quit"),
        ("Enter", "entry", "add the typed task"),
        ("Esc", "entry", "back to the list"),
        ("Enter", "update", "save replacement text"),
        ("Esc", "update", "cancel update"),
        ("y/Enter", "confirm", "perform the operation"),
        ("n/Esc", "confirm", "keep everything as is"),
    ]
}

fn render_help_overlay(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let popup_w = area.width.saturating_sub(8).min(64);
    let popup_h = area.height.saturating_sub(4).min(20);
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + area.height.saturating_sub(popup_h) / 2;
    let popup = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Green))
        .title(" Hotkeys ")
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines: Vec<Line<'static>> = help_hotkeys()
        .into_iter()
        .map(|(keys, ctx, desc)| {
            Line::from(vec![
                Span::styled(format!("{keys:<10}"), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{ctx:<9}"), Style::default().fg(Color::DarkGray)),
                Span::raw(desc),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn saved_note() -> String {
    format!("saved {}", Local::now().format("%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use std::fs;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn view_with(descriptions: &[&str]) -> (tempfile::TempDir, TaskListView) {
        let dir = tempdir().expect("tempdir");
        let mut store = TaskStore::open(dir.path().join("tasks.json"));
        for description in descriptions {
            store.add(description).expect("seed task");
        }
        (dir, TaskListView::new(store))
    }

    fn type_str(view: &mut TaskListView, text: &str) {
        for c in text.chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn persisted(view: &TaskListView) -> Vec<Task> {
        let raw = fs::read_to_string(view.store.path()).expect("read task file");
        serde_json::from_str(&raw).expect("parse task file")
    }

    // -- projection ---------------------------------------------------------

    #[test]
    fn task_line_matches_the_display_contract() {
        let task = Task::new("Buy milk");
        assert_eq!(task_line(&task), "Buy milk   →   [Pending]");

        let mut done = Task::new("Walk dog");
        done.status = Status::Completed;
        assert_eq!(task_line(&done), "Walk dog   →   [Completed]");
    }

    #[test]
    fn rendered_rows_use_the_display_contract() {
        let (_dir, mut view) = view_with(&["Buy milk"]);
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .expect("draw");

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("Buy milk   →   [Pending]"));
        assert!(rendered.contains("slate — 1 tasks (1 pending)"));
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn with_cursor_marks_the_edit_point() {
        assert_eq!(with_cursor("ab", 0), "▏ab");
        assert_eq!(with_cursor("ab", 1), "a▏b");
        assert_eq!(with_cursor("ab", 2), "ab▏");
    }

    // -- selection ----------------------------------------------------------

    #[test]
    fn new_view_selects_the_first_task() {
        let (_dir, view) = view_with(&["one", "two"]);
        assert_eq!(view.selected_index(), Some(0));
    }

    #[test]
    fn new_view_over_empty_store_selects_nothing() {
        let (_dir, view) = view_with(&[]);
        assert_eq!(view.selected_index(), None);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let (_dir, mut view) = view_with(&["one", "two"]);

        view.handle_key(key(KeyCode::Char('k')));
        assert_eq!(view.selected_index(), Some(0));

        view.handle_key(key(KeyCode::Char('j')));
        view.handle_key(key(KeyCode::Char('j')));
        view.handle_key(key(KeyCode::Char('j')));
        assert_eq!(view.selected_index(), Some(1));

        view.handle_key(key(KeyCode::Char('g')));
        assert_eq!(view.selected_index(), Some(0));
        view.handle_key(key(KeyCode::Char('G')));
        assert_eq!(view.selected_index(), Some(1));
    }

    // -- add ----------------------------------------------------------------

    #[test]
    fn typing_in_entry_and_enter_adds_a_task() {
        let (_dir, mut view) = view_with(&[]);

        view.handle_key(key(KeyCode::Char('a')));
        type_str(&mut view, "Buy milk");
        view.handle_key(key(KeyCode::Enter));

        assert_eq!(view.store.len(), 1);
        assert_eq!(view.store.get(0).unwrap().description, "Buy milk");
        assert_eq!(view.store.get(0).unwrap().status, Status::Pending);
        // Entry box clears and the new row is selected.
        assert!(view.entry.is_empty());
        assert_eq!(view.selected_index(), Some(0));
        // Mutation hit the disk.
        assert_eq!(persisted(&view), view.store.tasks());
        assert!(view.status_message().unwrap().starts_with("Added task"));
    }

    #[test]
    fn adding_empty_entry_warns_and_changes_nothing() {
        let (_dir, mut view) = view_with(&[]);

        view.handle_key(key(KeyCode::Char('a')));
        view.handle_key(key(KeyCode::Enter));

        assert!(view.store.is_empty());
        assert!(view.status_message().unwrap().contains("E2001"));
    }

    #[test]
    fn adding_whitespace_entry_warns_and_changes_nothing() {
        let (_dir, mut view) = view_with(&[]);

        view.handle_key(key(KeyCode::Char('i')));
        type_str(&mut view, "   ");
        view.handle_key(key(KeyCode::Enter));

        assert!(view.store.is_empty());
        assert!(view.status_message().unwrap().contains("E2001"));
    }

    #[test]
    fn entry_keeps_focus_after_add_for_rapid_entry() {
        let (_dir, mut view) = view_with(&[]);

        view.handle_key(key(KeyCode::Char('a')));
        type_str(&mut view, "one");
        view.handle_key(key(KeyCode::Enter));
        type_str(&mut view, "two");
        view.handle_key(key(KeyCode::Enter));

        assert_eq!(view.input_mode, InputMode::Entry);
        assert_eq!(view.store.len(), 2);
        assert_eq!(view.store.get(1).unwrap().description, "two");
    }

    #[test]
    fn entry_editing_supports_cursor_movement() {
        let (_dir, mut view) = view_with(&[]);

        view.handle_key(key(KeyCode::Char('a')));
        type_str(&mut view, "bc");
        view.handle_key(key(KeyCode::Home));
        type_str(&mut view, "a");
        view.handle_key(key(KeyCode::End));
        type_str(&mut view, "d");
        view.handle_key(key(KeyCode::Enter));

        assert_eq!(view.store.get(0).unwrap().description, "abcd");
    }

    #[test]
    fn esc_leaves_entry_mode_without_adding() {
        let (_dir, mut view) = view_with(&[]);

        view.handle_key(key(KeyCode::Char('a')));
        type_str(&mut view, "draft");
        view.handle_key(key(KeyCode::Esc));

        assert!(view.store.is_empty());
        assert_eq!(view.input_mode, InputMode::List);
        // The draft survives for the next visit to the entry field.
        assert_eq!(view.entry, "draft");
    }

    // -- mark complete ------------------------------------------------------

    #[test]
    fn space_completes_only_the_selected_task() {
        let (_dir, mut view) = view_with(&["one", "two", "three"]);

        view.handle_key(key(KeyCode::Char('j')));
        view.handle_key(key(KeyCode::Char(' ')));

        assert_eq!(view.store.get(0).unwrap().status, Status::Pending);
        assert_eq!(view.store.get(1).unwrap().status, Status::Completed);
        assert_eq!(view.store.get(2).unwrap().status, Status::Pending);
        assert_eq!(persisted(&view), view.store.tasks());
    }

    #[test]
    fn operations_without_a_selection_warn_and_change_nothing() {
        let (_dir, mut view) = view_with(&[]);

        for code in [KeyCode::Char(' '), KeyCode::Char('u'), KeyCode::Char('d')] {
            view.handle_key(key(code));
            assert_eq!(view.status_message(), Some("Select a task first"));
            assert_eq!(view.input_mode, InputMode::List);
            view.status_msg = None;
        }
        assert!(view.store.is_empty());
    }

    // -- update -------------------------------------------------------------

    #[test]
    fn update_dialog_opens_prefilled_with_current_description() {
        let (_dir, mut view) = view_with(&["Buy milk"]);

        view.handle_key(key(KeyCode::Char('u')));

        assert_eq!(view.input_mode, InputMode::Update);
        let (dialog, index) = view.update_dialog.as_ref().unwrap();
        assert_eq!(dialog.text(), "Buy milk");
        assert_eq!(*index, 0);
    }

    #[test]
    fn update_submit_replaces_the_description() {
        let (_dir, mut view) = view_with(&["Buy milk"]);

        view.handle_key(key(KeyCode::Char('u')));
        type_str(&mut view, " and eggs");
        view.handle_key(key(KeyCode::Enter));

        assert_eq!(view.store.get(0).unwrap().description, "Buy milk and eggs");
        assert_eq!(view.input_mode, InputMode::List);
        assert!(view.update_dialog.is_none());
        assert_eq!(persisted(&view), view.store.tasks());
    }

    #[test]
    fn update_esc_cancels_without_changes() {
        let (_dir, mut view) = view_with(&["Buy milk"]);

        view.handle_key(key(KeyCode::Char('u')));
        type_str(&mut view, "XXX");
        view.handle_key(key(KeyCode::Esc));

        assert_eq!(view.store.get(0).unwrap().description, "Buy milk");
        assert!(view.update_dialog.is_none());
    }

    #[test]
    fn update_submit_of_emptied_text_warns_and_keeps_the_task() {
        let (_dir, mut view) = view_with(&["ab"]);

        view.handle_key(key(KeyCode::Char('u')));
        view.handle_key(key(KeyCode::Backspace));
        view.handle_key(key(KeyCode::Backspace));
        view.handle_key(key(KeyCode::Enter));

        assert_eq!(view.store.get(0).unwrap().description, "ab");
        assert!(view.status_message().unwrap().contains("E2001"));
    }

    // -- delete -------------------------------------------------------------

    #[test]
    fn delete_is_gated_behind_a_confirmation_naming_the_task() {
        let (_dir, mut view) = view_with(&["one", "two"]);

        view.handle_key(key(KeyCode::Char('j')));
        view.handle_key(key(KeyCode::Char('d')));

        assert_eq!(view.input_mode, InputMode::Confirm);
        let (dialog, op) = view.confirm.as_ref().unwrap();
        assert!(dialog.prompt().contains("two"));
        assert_eq!(*op, GatedOp::Delete(1));
        // Nothing removed until confirmed.
        assert_eq!(view.store.len(), 2);
    }

    #[test]
    fn confirming_delete_removes_and_shifts() {
        let (_dir, mut view) = view_with(&["one", "two", "three"]);

        view.handle_key(key(KeyCode::Char('j')));
        view.handle_key(key(KeyCode::Char('d')));
        view.handle_key(key(KeyCode::Char('y')));

        assert_eq!(view.store.len(), 2);
        assert_eq!(view.store.get(0).unwrap().description, "one");
        assert_eq!(view.store.get(1).unwrap().description, "three");
        assert_eq!(view.selected_index(), Some(1));
        assert_eq!(persisted(&view), view.store.tasks());
        assert!(view.status_message().unwrap().contains("two"));
    }

    #[test]
    fn declining_delete_keeps_the_task() {
        let (_dir, mut view) = view_with(&["one"]);

        view.handle_key(key(KeyCode::Char('d')));
        view.handle_key(key(KeyCode::Char('n')));

        assert_eq!(view.store.len(), 1);
        assert_eq!(view.input_mode, InputMode::List);
        assert!(view.confirm.is_none());
    }

    #[test]
    fn deleting_the_last_task_clears_the_selection() {
        let (_dir, mut view) = view_with(&["only"]);

        view.handle_key(key(KeyCode::Char('d')));
        view.handle_key(key(KeyCode::Enter));

        assert!(view.store.is_empty());
        assert_eq!(view.selected_index(), None);
    }

    #[test]
    fn deleting_the_tail_clamps_selection_to_the_new_last_row() {
        let (_dir, mut view) = view_with(&["one", "two"]);

        view.handle_key(key(KeyCode::Char('G')));
        view.handle_key(key(KeyCode::Char('d')));
        view.handle_key(key(KeyCode::Char('y')));

        assert_eq!(view.selected_index(), Some(0));
    }

    // -- clear all ----------------------------------------------------------

    #[test]
    fn clear_all_is_gated_and_empties_the_store() {
        let (_dir, mut view) = view_with(&["one", "two"]);

        view.handle_key(key(KeyCode::Char('C')));
        assert_eq!(view.input_mode, InputMode::Confirm);
        assert_eq!(view.store.len(), 2);

        view.handle_key(key(KeyCode::Char('y')));
        assert!(view.store.is_empty());
        assert_eq!(view.selected_index(), None);
        assert!(persisted(&view).is_empty());
        assert!(view.status_message().unwrap().contains("Cleared 2 tasks"));
    }

    #[test]
    fn declining_clear_all_keeps_everything() {
        let (_dir, mut view) = view_with(&["one", "two"]);

        view.handle_key(key(KeyCode::Char('C')));
        view.handle_key(key(KeyCode::Esc));

        assert_eq!(view.store.len(), 2);
    }

    #[test]
    fn clear_all_on_empty_store_skips_the_dialog() {
        let (_dir, mut view) = view_with(&[]);

        view.handle_key(key(KeyCode::Char('C')));

        assert_eq!(view.input_mode, InputMode::List);
        assert_eq!(view.status_message(), Some("Nothing to clear"));
    }

    // -- lifecycle ----------------------------------------------------------

    #[test]
    fn q_quits_from_list_mode() {
        let (_dir, mut view) = view_with(&[]);
        assert!(!view.should_quit());
        view.handle_key(key(KeyCode::Char('q')));
        assert!(view.should_quit());
    }

    #[test]
    fn help_overlay_opens_and_closes() {
        let (_dir, mut view) = view_with(&[]);

        view.handle_key(key(KeyCode::Char('?')));
        assert_eq!(view.input_mode, InputMode::Help);
        view.handle_key(key(KeyCode::Esc));
        assert_eq!(view.input_mode, InputMode::List);
    }

    #[test]
    fn recovered_store_shows_a_startup_notice() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "not json at all").unwrap();

        let view = TaskListView::new(TaskStore::open(&path));

        assert!(view.status_message().unwrap().contains("unreadable"));
    }

    // -- mouse --------------------------------------------------------------

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn scroll_wheel_moves_the_selection() {
        let (_dir, mut view) = view_with(&["one", "two"]);

        view.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0));
        assert_eq!(view.selected_index(), Some(1));
        view.handle_mouse(mouse(MouseEventKind::ScrollUp, 0, 0));
        assert_eq!(view.selected_index(), Some(0));
    }

    #[test]
    fn clicking_a_row_selects_it() {
        let (_dir, mut view) = view_with(&["one", "two", "three"]);

        // Render once so the view knows its geometry.
        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .expect("draw");

        let y = view.list_area.y + 1 + 2; // border + third row
        view.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, y));
        assert_eq!(view.selected_index(), Some(2));
    }

    #[test]
    fn clicking_the_entry_field_focuses_it() {
        let (_dir, mut view) = view_with(&["one"]);

        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .expect("draw");

        let y = view.entry_area.y + 1;
        view.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, y));
        assert_eq!(view.input_mode, InputMode::Entry);
    }
}
