//! Delete confirmation dialog component
//!
//! Names the record so the operator confirms the right one.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Delete confirmation dialog for a single record
#[derive(Default)]
pub struct DeleteDialog {
    pub record_id: String,
    pub record_name: String,
}

impl DeleteDialog {
    pub fn set_target(&mut self, id: &str, name: &str) {
        self.record_id = id.to_string();
        self.record_name = name.to_string();
    }
}

impl Component for DeleteDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(Action::ConfirmDelete(self.record_id.clone()))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        // max before min: on narrow terminals the terminal width wins
        let width = (self.record_name.len() as u16 + 24)
            .max(44)
            .min(area.width.saturating_sub(4));
        let popup_area = centered_popup(area, width, 7);

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("Delete the record of "),
                Span::styled(
                    self.record_name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("?"),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y/Enter ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Delete  "),
                Span::styled(
                    " n/Esc ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Keep"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Delete record ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_confirm_and_cancel_keys() {
        let mut dialog = DeleteDialog::default();
        dialog.set_target("id-1", "Ana Lima");

        let y = KeyEvent::new(KeyCode::Char('y'), crossterm::event::KeyModifiers::NONE);
        assert_eq!(
            dialog.handle_key_event(y).unwrap(),
            Some(Action::ConfirmDelete("id-1".to_string()))
        );

        let esc = KeyEvent::new(KeyCode::Esc, crossterm::event::KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(esc).unwrap(), Some(Action::CloseModal));
    }

    #[test]
    fn test_draw_fits_a_narrow_terminal() {
        let backend = TestBackend::new(40, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut dialog = DeleteDialog::default();
        dialog.set_target("id-1", "Some Fairly Long Record Name");

        terminal
            .draw(|frame| dialog.draw(frame, frame.area()).unwrap())
            .unwrap();
    }
}
