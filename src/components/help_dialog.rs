//! Help dialog showing all keyboard shortcuts

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

/// Keyboard shortcut reference
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

const SHORTCUTS: &[(&str, &str)] = &[
    ("Tab", "Switch between dashboard and records"),
    ("j / ↓, k / ↑", "Move row selection"),
    ("h / ←, l / →", "Previous / next page"),
    ("+", "Cycle rows per page (5, 10, 20, 50)"),
    ("/", "Search name, tax id, code, contacts"),
    ("Esc (in search)", "Leave search mode"),
    ("Ctrl+U (in search)", "Clear the search text"),
    ("s", "Filter by status"),
    ("n", "Sort by name (again to reverse)"),
    ("d", "Sort by registration date (again to reverse)"),
    ("a", "Add a new record"),
    ("e / Enter", "Edit the selected record"),
    ("x", "Delete the selected record"),
    ("c", "Export filtered records as CSV"),
    ("w", "Export filtered records as report (.doc)"),
    ("R", "Reload records from the store"),
    ("?", "This help"),
    ("q", "Quit"),
];

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ModalUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalDown => {
                if self.scroll_offset + 1 < SHORTCUTS.len() {
                    self.scroll_offset += 1;
                }
            }
            Action::ModalUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = (SHORTCUTS.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_popup(area, 62, height);

        frame.render_widget(Clear, popup_area);

        let key_width = SHORTCUTS
            .iter()
            .map(|(key, _)| key.len())
            .max()
            .unwrap_or(0);

        let lines: Vec<Line> = SHORTCUTS
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:key_width$} ", key),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::raw(*description),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard shortcuts ")
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
