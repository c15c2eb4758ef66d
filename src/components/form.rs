//! Record form dialog
//!
//! Modal add/edit form. The tax id field applies the `###.###.###-##`
//! display mask as the operator types, the registration code accepts at
//! most 9 digits, and submission validates the required fields before the
//! draft is handed to the store.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{Record, Status};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use regex::Regex;
use std::sync::LazyLock;

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    FullName,
    TaxId,
    RegistrationCode,
    RegistrationDate,
    ContactInfo,
    Notes,
    Status,
}

const FIELDS: [Field; 7] = [
    Field::FullName,
    Field::TaxId,
    Field::RegistrationCode,
    Field::RegistrationDate,
    Field::ContactInfo,
    Field::Notes,
    Field::Status,
];

impl Field {
    fn label(&self) -> &str {
        match self {
            Field::FullName => "Full name *",
            Field::TaxId => "Tax id",
            Field::RegistrationCode => "Registration code",
            Field::RegistrationDate => "Registration date *",
            Field::ContactInfo => "Contacts *",
            Field::Notes => "Notes",
            Field::Status => "Status",
        }
    }
}

/// Apply the progressive `###.###.###-##` mask to whatever was typed
fn format_tax_id(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(11).collect();
    let mut out = String::with_capacity(14);
    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Regex for a fully masked tax id
static TAX_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").unwrap());

fn is_valid_tax_id(value: &str) -> bool {
    TAX_ID_REGEX.is_match(value)
}

/// Add/edit record form
pub struct RecordFormDialog {
    /// Draft being edited; `id` is None for a brand-new record
    pub draft: Record,
    focus: usize,
    /// Validation message shown under the fields
    pub error: Option<String>,
}

impl Default for RecordFormDialog {
    fn default() -> Self {
        Self {
            draft: Record::draft(chrono::Local::now().date_naive()),
            focus: 0,
            error: None,
        }
    }
}

impl RecordFormDialog {
    /// Open for a new record dated today
    pub fn open_add(&mut self) {
        self.draft = Record::draft(chrono::Local::now().date_naive());
        self.focus = 0;
        self.error = None;
    }

    /// Open pre-filled with an existing record
    pub fn open_edit(&mut self, record: &Record) {
        self.draft = record.clone();
        self.focus = 0;
        self.error = None;
    }

    pub fn is_edit(&self) -> bool {
        self.draft.id.is_some()
    }

    fn focused_field(&self) -> Field {
        FIELDS[self.focus]
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FIELDS.len();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
    }

    fn field_value(&self, field: Field) -> String {
        match field {
            Field::FullName => self.draft.full_name.clone(),
            Field::TaxId => self.draft.tax_id.clone(),
            Field::RegistrationCode => self.draft.registration_code.clone(),
            Field::RegistrationDate => self.draft.registration_date.clone(),
            Field::ContactInfo => self.draft.contact_info.clone(),
            Field::Notes => self.draft.notes.clone(),
            Field::Status => self.draft.status.as_str().to_string(),
        }
    }

    fn input_char(&mut self, c: char) {
        match self.focused_field() {
            Field::FullName => self.draft.full_name.push(c),
            Field::TaxId => {
                if c.is_ascii_digit() {
                    let raw = format!("{}{}", self.draft.tax_id, c);
                    self.draft.tax_id = format_tax_id(&raw);
                }
            }
            Field::RegistrationCode => {
                if c.is_ascii_digit() && self.draft.registration_code.len() < 9 {
                    self.draft.registration_code.push(c);
                }
            }
            Field::RegistrationDate => {
                if (c.is_ascii_digit() || c == '-') && self.draft.registration_date.len() < 10 {
                    self.draft.registration_date.push(c);
                }
            }
            Field::ContactInfo => self.draft.contact_info.push(c),
            Field::Notes => self.draft.notes.push(c),
            Field::Status => {}
        }
        self.error = None;
    }

    fn backspace(&mut self) {
        match self.focused_field() {
            Field::FullName => {
                self.draft.full_name.pop();
            }
            Field::TaxId => {
                let digits: String = self
                    .draft
                    .tax_id
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();
                let trimmed = &digits[..digits.len().saturating_sub(1)];
                self.draft.tax_id = format_tax_id(trimmed);
            }
            Field::RegistrationCode => {
                self.draft.registration_code.pop();
            }
            Field::RegistrationDate => {
                self.draft.registration_date.pop();
            }
            Field::ContactInfo => {
                self.draft.contact_info.pop();
            }
            Field::Notes => {
                self.draft.notes.pop();
            }
            Field::Status => {}
        }
        self.error = None;
    }

    fn cycle_status(&mut self, forward: bool) {
        let known = Status::known();
        let idx = known
            .iter()
            .position(|s| *s == self.draft.status)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % known.len()
        } else {
            (idx + known.len() - 1) % known.len()
        };
        self.draft.status = known[next].clone();
    }

    /// Check the draft; returns the message instead of submitting when
    /// something is off
    pub fn validate(&self) -> Option<String> {
        if self.draft.full_name.trim().is_empty() {
            return Some("Full name is required".to_string());
        }
        if self.draft.contact_info.trim().is_empty() {
            return Some("Contact info is required".to_string());
        }
        if NaiveDate::parse_from_str(&self.draft.registration_date, "%Y-%m-%d").is_err() {
            return Some("Registration date must be YYYY-MM-DD".to_string());
        }
        if !self.draft.tax_id.is_empty() && !is_valid_tax_id(&self.draft.tax_id) {
            return Some("Tax id must match 000.000.000-00".to_string());
        }
        None
    }

    fn submit(&mut self) -> Option<Action> {
        match self.validate() {
            Some(message) => {
                self.error = Some(message);
                None
            }
            None => {
                self.draft.full_name = self.draft.full_name.trim().to_string();
                self.draft.contact_info = self.draft.contact_info.trim().to_string();
                Some(Action::SubmitForm)
            }
        }
    }
}

impl Component for RecordFormDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                None
            }
            KeyCode::Left if self.focused_field() == Field::Status => {
                self.cycle_status(false);
                None
            }
            KeyCode::Right if self.focused_field() == Field::Status => {
                self.cycle_status(true);
                None
            }
            KeyCode::Backspace => {
                self.backspace();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input_char(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = (FIELDS.len() as u16 * 2 + 6).min(area.height.saturating_sub(2));
        let popup_area = centered_popup(area, 58, height);

        frame.render_widget(Clear, popup_area);

        let mut lines: Vec<Line> = Vec::new();
        for (i, field) in FIELDS.iter().enumerate() {
            let focused = i == self.focus;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(Span::styled(field.label().to_string(), label_style)));

            let value = self.field_value(*field);
            let mut spans = vec![Span::styled(
                if value.is_empty() && !focused {
                    "—".to_string()
                } else {
                    value
                },
                if focused {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                },
            )];
            if focused {
                if *field == Field::Status {
                    spans.push(Span::styled(
                        "  ◂ ▸",
                        Style::default().fg(Color::DarkGray),
                    ));
                } else {
                    spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
                }
            }
            lines.push(Line::from(spans));
        }

        if let Some(ref error) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        let title = if self.is_edit() {
            " Edit record "
        } else {
            " New record "
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_id_mask_applies_progressively() {
        assert_eq!(format_tax_id("123"), "123");
        assert_eq!(format_tax_id("1234"), "123.4");
        assert_eq!(format_tax_id("1234567"), "123.456.7");
        assert_eq!(format_tax_id("12345678901"), "123.456.789-01");
        // Extra digits are dropped
        assert_eq!(format_tax_id("123456789019999"), "123.456.789-01");
    }

    #[test]
    fn test_tax_id_validation() {
        assert!(is_valid_tax_id("123.456.789-01"));
        assert!(!is_valid_tax_id("123.456.789"));
        assert!(!is_valid_tax_id("12345678901"));
    }

    #[test]
    fn test_registration_code_caps_at_nine_digits() {
        let mut form = RecordFormDialog::default();
        form.open_add();
        form.focus = FIELDS
            .iter()
            .position(|f| *f == Field::RegistrationCode)
            .unwrap();
        for c in "12345678901234".chars() {
            form.input_char(c);
        }
        assert_eq!(form.draft.registration_code, "123456789");

        form.input_char('x');
        assert_eq!(form.draft.registration_code, "123456789");
    }

    #[test]
    fn test_validate_requires_name_contact_and_parsable_date() {
        let mut form = RecordFormDialog::default();
        form.open_add();
        assert!(form.validate().is_some());

        form.draft.full_name = "Ana".to_string();
        assert!(form.validate().is_some());

        form.draft.contact_info = "ana@email.com".to_string();
        assert!(form.validate().is_none());

        form.draft.registration_date = "01/02/2024".to_string();
        assert!(form.validate().is_some());
    }

    #[test]
    fn test_validate_accepts_empty_but_not_partial_tax_id() {
        let mut form = RecordFormDialog::default();
        form.open_add();
        form.draft.full_name = "Ana".to_string();
        form.draft.contact_info = "ana@email.com".to_string();

        form.draft.tax_id = String::new();
        assert!(form.validate().is_none());

        form.draft.tax_id = "123.456".to_string();
        assert!(form.validate().is_some());
    }

    #[test]
    fn test_status_cycles_through_known_values() {
        let mut form = RecordFormDialog::default();
        form.open_add();
        assert_eq!(form.draft.status, Status::Pending);
        form.cycle_status(true);
        assert_eq!(form.draft.status, Status::Authorized);
        form.cycle_status(false);
        form.cycle_status(false);
        assert_eq!(form.draft.status, Status::TaxFlagged);
    }

    #[test]
    fn test_edit_keeps_id_and_submit_trims() {
        let mut form = RecordFormDialog::default();
        let record = crate::model::seed_records().remove(0);
        form.open_edit(&record);
        assert!(form.is_edit());

        form.draft.full_name = "  Renamed  ".to_string();
        let action = form.submit();
        assert_eq!(action, Some(Action::SubmitForm));
        assert_eq!(form.draft.full_name, "Renamed");
        assert_eq!(form.draft.id, record.id);
    }
}
