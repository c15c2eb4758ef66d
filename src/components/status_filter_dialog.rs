//! Status filter dialog component
//!
//! Picks "All" or exactly one of the seven known statuses.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{Status, StatusFilter};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Status filter picker
pub struct StatusFilterDialog {
    /// Index 0 is "All", the rest map to `Status::known()`
    pub selected_index: usize,
    pub list_state: ListState,
    /// Active filter at the time the dialog opened
    current: StatusFilter,
}

impl Default for StatusFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusFilterDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
            current: StatusFilter::All,
        }
    }

    /// Position the cursor on the currently active filter
    pub fn open_with(&mut self, current: &StatusFilter) {
        self.current = current.clone();
        self.selected_index = match current {
            StatusFilter::All => 0,
            StatusFilter::Only(status) => Status::known()
                .iter()
                .position(|s| s == status)
                .map(|i| i + 1)
                .unwrap_or(0),
        };
        self.list_state.select(Some(self.selected_index));
    }

    pub fn get_selected_filter(&self) -> StatusFilter {
        if self.selected_index == 0 {
            StatusFilter::All
        } else {
            Status::known()
                .get(self.selected_index - 1)
                .map(|s| StatusFilter::Only(s.clone()))
                .unwrap_or(StatusFilter::All)
        }
    }

    fn select_next(&mut self) {
        if self.selected_index < Status::known().len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for StatusFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('s') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SetStatusFilter(self.get_selected_filter())),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = (Status::known().len() as u16 + 5).min(area.height.saturating_sub(2));
        let popup_area = centered_popup(area, 36, height);

        frame.render_widget(Clear, popup_area);

        let mut items: Vec<ListItem> = Vec::new();
        let all_marker = if self.current == StatusFilter::All {
            "● "
        } else {
            "  "
        };
        items.push(ListItem::new(Line::from(vec![
            Span::raw(all_marker),
            Span::styled("All statuses", Style::default().fg(Color::White)),
        ])));

        for status in Status::known() {
            let active = self.current == StatusFilter::Only(status.clone());
            let marker = if active { "● " } else { "  " };
            items.push(ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    status.as_str().to_string(),
                    Style::default().fg(status.color()),
                ),
            ])));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Filter by status ")
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, popup_area, &mut self.list_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_with_positions_cursor_on_active_filter() {
        let mut dialog = StatusFilterDialog::new();
        dialog.open_with(&StatusFilter::Only(Status::Rejected));
        // Rejected is the fifth known status, plus the "All" row
        assert_eq!(dialog.selected_index, 5);
        assert_eq!(
            dialog.get_selected_filter(),
            StatusFilter::Only(Status::Rejected)
        );
    }

    #[test]
    fn test_index_zero_means_all() {
        let mut dialog = StatusFilterDialog::new();
        dialog.open_with(&StatusFilter::All);
        assert_eq!(dialog.selected_index, 0);
        assert_eq!(dialog.get_selected_filter(), StatusFilter::All);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut dialog = StatusFilterDialog::new();
        for _ in 0..20 {
            dialog.select_next();
        }
        assert_eq!(dialog.selected_index, Status::known().len());
        for _ in 0..20 {
            dialog.select_prev();
        }
        assert_eq!(dialog.selected_index, 0);
    }
}
