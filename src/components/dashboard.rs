//! Dashboard view
//!
//! Summary cards, the per-status distribution and the recent activity
//! feed. The app recomputes the aggregates after every collection change
//! and pushes them in with `set_data`.

use crate::component::Component;
use crate::model::Status;
use anyhow::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::HashMap;

/// One row of the recent activity feed
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub initial: String,
    pub full_name: String,
    pub display_date: String,
    pub status: Status,
}

/// Dashboard with aggregate counts over the whole collection
#[derive(Default)]
pub struct DashboardView {
    counts: HashMap<Status, usize>,
    total: usize,
    recent: Vec<ActivityEntry>,
}

impl DashboardView {
    pub fn set_data(
        &mut self,
        counts: HashMap<Status, usize>,
        total: usize,
        recent: Vec<ActivityEntry>,
    ) {
        self.counts = counts;
        self.total = total;
        self.recent = recent;
    }

    fn count(&self, status: &Status) -> usize {
        self.counts.get(status).copied().unwrap_or(0)
    }

    fn draw_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        value: usize,
        color: Color,
    ) {
        let lines = vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                title.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(paragraph, area);
    }

    fn draw_distribution(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        let max = self
            .counts
            .values()
            .copied()
            .max()
            .unwrap_or(0)
            .max(1);
        let bar_width = area.width.saturating_sub(28) as usize;

        // Known statuses in their fixed order, then any leftover buckets
        let mut shown: Vec<Status> = Vec::new();
        for status in Status::known() {
            if self.count(&status) > 0 {
                shown.push(status);
            }
        }
        let mut extras: Vec<&Status> = self
            .counts
            .keys()
            .filter(|s| !shown.contains(s))
            .collect();
        extras.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        if self.counts.is_empty() {
            lines.push(Line::from(Span::styled(
                "No records yet",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for status in shown.iter().chain(extras.into_iter()) {
            let count = self.count(status);
            let filled = if bar_width > 0 {
                (count * bar_width).div_ceil(max)
            } else {
                0
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<14}", status.as_str()),
                    Style::default().fg(status.color()),
                ),
                Span::styled(
                    "█".repeat(filled.min(bar_width)),
                    Style::default().fg(status.color()),
                ),
                Span::styled(
                    format!(" {count}"),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status distribution ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }

    fn draw_recent(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        if self.recent.is_empty() {
            lines.push(Line::from(Span::styled(
                "Nothing registered yet",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for entry in &self.recent {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", entry.initial),
                    Style::default()
                        .fg(Color::Black)
                        .bg(entry.status.color())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:<28}", entry.full_name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<12}", entry.display_date),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    entry.status.as_str().to_string(),
                    Style::default().fg(entry.status.color()),
                ),
            ]));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recent registrations ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }
}

impl Component for DashboardView {
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
            ])
            .split(area);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(rows[0]);

        self.draw_card(
            frame,
            cards[0],
            "Under review",
            self.count(&Status::UnderReview),
            Status::UnderReview.color(),
        );
        self.draw_card(
            frame,
            cards[1],
            "Authorized",
            self.count(&Status::Authorized),
            Status::Authorized.color(),
        );
        self.draw_card(
            frame,
            cards[2],
            "Pending",
            self.count(&Status::Pending),
            Status::Pending.color(),
        );
        self.draw_card(frame, cards[3], "Total", self.total, Color::Cyan);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        self.draw_distribution(frame, body[0]);
        self.draw_recent(frame, body[1]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_default_to_zero() {
        let view = DashboardView::default();
        assert_eq!(view.count(&Status::Pending), 0);
    }

    #[test]
    fn test_set_data_replaces_everything() {
        let mut view = DashboardView::default();
        let mut counts = HashMap::new();
        counts.insert(Status::Authorized, 3);
        view.set_data(
            counts,
            3,
            vec![ActivityEntry {
                initial: "A".to_string(),
                full_name: "Ana".to_string(),
                display_date: "01/01/2024".to_string(),
                status: Status::Authorized,
            }],
        );
        assert_eq!(view.count(&Status::Authorized), 3);
        assert_eq!(view.total, 3);
        assert_eq!(view.recent.len(), 1);
    }
}
