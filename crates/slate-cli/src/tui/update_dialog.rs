//! Update-task overlay.
//!
//! When the user presses `u` on a selected task, this overlay appears
//! pre-filled with the task's current description:
//!
//! - Press **Enter** to submit the replacement text
//! - Press **Esc** to cancel

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// The action the dialog wants the caller to take.
pub enum DialogAction {
    /// Replace the task's description with this text.
    Submit(String),
    /// The user cancelled; close the dialog.
    Cancel,
}

/// Overlay dialog for editing a task's description.
pub struct UpdateDialog {
    /// Replacement text the user is editing.
    text: String,
}

impl UpdateDialog {
    /// Open a dialog pre-filled with the current description.
    #[must_use]
    pub fn new(current: &str) -> Self {
        Self {
            text: current.to_string(),
        }
    }

    /// Feed a key event to the dialog.
    ///
    /// Returns `Some(DialogAction)` when the dialog is complete (caller
    /// should close the overlay), or `None` while the user is still typing.
    /// Validation of the submitted text belongs to the store, not here.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DialogAction> {
        match key.code {
            KeyCode::Esc => Some(DialogAction::Cancel),
            KeyCode::Enter => Some(DialogAction::Submit(self.text.clone())),
            KeyCode::Backspace => {
                self.text.pop();
                None
            }
            KeyCode::Char(c) => {
                self.text.push(c);
                None
            }
            _ => None,
        }
    }

    /// Render the dialog as a centered overlay on top of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog_w: u16 = 64.min(area.width.saturating_sub(4));
        let dialog_h: u16 = 6.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(dialog_w) / 2;
        let y = area.y + area.height.saturating_sub(dialog_h) / 2;
        let dialog_area = Rect::new(x, y, dialog_w, dialog_h);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Update Task ")
            .title_style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let input_area = Rect {
            height: inner.height.saturating_sub(1).max(3).min(inner.height),
            ..inner
        };
        let text_display = format!("{}_", self.text);
        frame.render_widget(
            Paragraph::new(text_display.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Description ")
                    .border_style(Style::default().fg(Color::Yellow)),
            ),
            input_area,
        );

        if inner.height > 3 {
            let hint_area = Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            };
            let hints = Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Yellow)),
                Span::raw(" save  "),
                Span::styled("Esc", Style::default().fg(Color::Yellow)),
                Span::raw(" cancel"),
            ]);
            frame.render_widget(Paragraph::new(hints), hint_area);
        }
    }

    /// The current replacement text (for external read-back).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_opens_prefilled() {
        let dialog = UpdateDialog::new("Buy milk");
        assert_eq!(dialog.text(), "Buy milk");
    }

    #[test]
    fn dialog_accepts_typed_characters() {
        let mut dialog = UpdateDialog::new("");
        dialog.handle_key(KeyEvent::from(KeyCode::Char('h')));
        dialog.handle_key(KeyEvent::from(KeyCode::Char('i')));
        assert_eq!(dialog.text(), "hi");
    }

    #[test]
    fn dialog_backspace_removes_char() {
        let mut dialog = UpdateDialog::new("ab");
        dialog.handle_key(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(dialog.text(), "a");
    }

    #[test]
    fn dialog_esc_cancels() {
        let mut dialog = UpdateDialog::new("Buy milk");
        dialog.handle_key(KeyEvent::from(KeyCode::Char('x')));

        let action = dialog.handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(matches!(action, Some(DialogAction::Cancel)));
    }

    #[test]
    fn dialog_enter_submits_edited_text() {
        let mut dialog = UpdateDialog::new("Buy milk");
        dialog.handle_key(KeyEvent::from(KeyCode::Backspace));
        dialog.handle_key(KeyEvent::from(KeyCode::Backspace));
        dialog.handle_key(KeyEvent::from(KeyCode::Backspace));
        dialog.handle_key(KeyEvent::from(KeyCode::Backspace));
        dialog.handle_key(KeyEvent::from(KeyCode::Char('o')));
        dialog.handle_key(KeyEvent::from(KeyCode::Char('a')));
        dialog.handle_key(KeyEvent::from(KeyCode::Char('t')));
        dialog.handle_key(KeyEvent::from(KeyCode::Char('s')));

        let action = dialog.handle_key(KeyEvent::from(KeyCode::Enter));
        match action {
            Some(DialogAction::Submit(text)) => assert_eq!(text, "Buy oats"),
            _ => panic!("expected Submit action"),
        }
    }

    #[test]
    fn dialog_submits_even_when_emptied() {
        // The store rejects empty descriptions; the dialog stays dumb.
        let mut dialog = UpdateDialog::new("a");
        dialog.handle_key(KeyEvent::from(KeyCode::Backspace));

        let action = dialog.handle_key(KeyEvent::from(KeyCode::Enter));
        match action {
            Some(DialogAction::Submit(text)) => assert_eq!(text, ""),
            _ => panic!("expected Submit action"),
        }
    }
}
