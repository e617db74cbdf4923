//! Yes/no confirmation overlay gating destructive operations.
//!
//! Delete and Clear All never run directly: the view opens this overlay and
//! only performs the operation once the user answers yes.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// What the caller should do once the dialog resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// The user confirmed; perform the gated operation.
    Confirm,
    /// The user declined; close the overlay and change nothing.
    Cancel,
}

/// Centered yes/no overlay with a title and a prompt.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    title: String,
    prompt: String,
}

impl ConfirmDialog {
    #[must_use]
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
        }
    }

    /// Feed a key event to the dialog.
    ///
    /// `y`/Enter confirm, `n`/Esc cancel; anything else keeps the overlay
    /// open so a stray keypress can't trigger a destructive operation.
    #[must_use]
    pub fn handle_key(&self, key: KeyEvent) -> Option<ConfirmAction> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(ConfirmAction::Confirm),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(ConfirmAction::Cancel),
            _ => None,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Render the dialog as a centered overlay on top of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog_w: u16 = 56.min(area.width.saturating_sub(4));
        let dialog_h: u16 = 6.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(dialog_w) / 2;
        let y = area.y + area.height.saturating_sub(dialog_h) / 2;
        let dialog_area = Rect::new(x, y, dialog_w, dialog_h);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        if inner.height > 1 {
            let prompt_area = Rect {
                height: inner.height - 1,
                ..inner
            };
            frame.render_widget(
                Paragraph::new(self.prompt.as_str()).wrap(Wrap { trim: false }),
                prompt_area,
            );
        }

        let hint_area = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: 1,
            ..inner
        };
        let hints = Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::raw(" confirm  "),
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::raw(" cancel"),
        ]);
        frame.render_widget(Paragraph::new(hints), hint_area);
    }
}
