//! Person record and status classification

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Review status of a record
///
/// The seven named values form a closed set whose exact string
/// representations appear verbatim in filters, CSV columns, report cells,
/// and badges. Anything else read from a store is carried through unchanged
/// as `Other` so that a foreign value never breaks the engine or the export
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Pending,
    Authorized,
    Released,
    /// "IH" - awaiting human inspection
    UnderReview,
    Rejected,
    Blocked,
    /// "RFB" - flagged by the tax authority
    TaxFlagged,
    /// Unrecognized stored value, kept as its own bucket
    Other(String),
}

impl Status {
    /// The seven known statuses, in filter/selector order
    pub fn known() -> [Status; 7] {
        [
            Status::Pending,
            Status::Authorized,
            Status::Released,
            Status::UnderReview,
            Status::Rejected,
            Status::Blocked,
            Status::TaxFlagged,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Pending => "Pending",
            Status::Authorized => "Authorized",
            Status::Released => "Released",
            Status::UnderReview => "UnderReview",
            Status::Rejected => "Rejected",
            Status::Blocked => "Blocked",
            Status::TaxFlagged => "TaxFlagged",
            Status::Other(s) => s,
        }
    }

    /// Badge color for list and dashboard rendering
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Status::Authorized => Color::Green,
            Status::Released => Color::Blue,
            Status::UnderReview => Color::Yellow,
            Status::Pending => Color::Indexed(99),
            Status::Rejected => Color::Red,
            Status::Blocked => Color::DarkGray,
            Status::TaxFlagged => Color::Magenta,
            Status::Other(_) => Color::Gray,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Pending" => Status::Pending,
            "Authorized" => Status::Authorized,
            "Released" => Status::Released,
            "UnderReview" => Status::UnderReview,
            "Rejected" => Status::Rejected,
            "Blocked" => Status::Blocked,
            "TaxFlagged" => Status::TaxFlagged,
            _ => Status::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.as_str().to_string()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person record
///
/// `id` is `None` only for a draft that has not been persisted yet; the
/// store assigns the canonical id on insert. The engine never mutates a
/// record, it only reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: Option<String>,
    pub full_name: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub registration_code: String,
    /// ISO date string, `YYYY-MM-DD`
    #[serde(default)]
    pub registration_date: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_status")]
    pub status: Status,
}

fn default_status() -> Status {
    Status::Pending
}

impl Record {
    /// Blank draft for the add form, dated today
    pub fn draft(today: NaiveDate) -> Self {
        Self {
            id: None,
            full_name: String::new(),
            tax_id: String::new(),
            registration_code: String::new(),
            registration_date: today.format("%Y-%m-%d").to_string(),
            contact_info: String::new(),
            notes: String::new(),
            status: Status::Pending,
        }
    }

    /// Sort/activity key: epoch seconds of the registration date at
    /// midnight UTC. Unparsable dates get 0 so sorting stays total.
    pub fn date_key(&self) -> i64 {
        NaiveDate::parse_from_str(&self.registration_date, "%Y-%m-%d")
            .map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp())
            .unwrap_or(0)
    }

    /// Registration date in the fixed DD/MM/YYYY display convention,
    /// falling back to the raw string when it does not parse
    pub fn display_date(&self) -> String {
        NaiveDate::parse_from_str(&self.registration_date, "%Y-%m-%d")
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| self.registration_date.clone())
    }

    /// Uppercased initial for the avatar cell
    pub fn initial(&self) -> String {
        self.full_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Seed records written on first run when no store file exists yet
pub fn seed_records() -> Vec<Record> {
    let seed = |id: &str,
                full_name: &str,
                tax_id: &str,
                registration_code: &str,
                registration_date: &str,
                contact_info: &str,
                notes: &str,
                status: Status| Record {
        id: Some(id.to_string()),
        full_name: full_name.to_string(),
        tax_id: tax_id.to_string(),
        registration_code: registration_code.to_string(),
        registration_date: registration_date.to_string(),
        contact_info: contact_info.to_string(),
        notes: notes.to_string(),
        status,
    };

    vec![
        seed(
            "seed-1",
            "Ricardo Oliveira",
            "123.456.789-00",
            "202400001",
            "2024-01-15",
            "ricardo@email.com, (11) 98888-7777",
            "Registro inicial para teste de sistema.",
            Status::Authorized,
        ),
        seed(
            "seed-2",
            "Fernanda Souza",
            "234.567.890-11",
            "202400002",
            "2024-02-10",
            "fernanda.s@email.com",
            "Aguardando documentação complementar.",
            Status::UnderReview,
        ),
        seed(
            "seed-3",
            "Carlos Eduardo",
            "345.678.901-22",
            "202400003",
            "2024-03-05",
            "(21) 97777-6666",
            "Problemas técnicos no envio do código.",
            Status::Pending,
        ),
        seed(
            "seed-4",
            "Beatriz Santos",
            "456.789.012-33",
            "202400004",
            "2024-03-12",
            "beatriz.adm@empresa.com",
            "Acesso liberado para área restrita.",
            Status::Released,
        ),
        seed(
            "seed-5",
            "Marcos Vinicius",
            "567.890.123-44",
            "202400005",
            "2024-03-20",
            "marcos@email.com",
            "Restrição detectada na consulta fiscal.",
            Status::TaxFlagged,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in Status::known() {
            let s: String = status.clone().into();
            assert_eq!(Status::from(s), status);
        }
    }

    #[test]
    fn test_unknown_status_becomes_own_bucket() {
        let status = Status::from("Archived".to_string());
        assert_eq!(status, Status::Other("Archived".to_string()));
        assert_eq!(status.as_str(), "Archived");
    }

    #[test]
    fn test_date_key_parses_iso_dates() {
        let mut record = seed_records().remove(0);
        record.registration_date = "2024-01-15".to_string();
        // 2024-01-15T00:00:00Z
        assert_eq!(record.date_key(), 1_705_276_800);
    }

    #[test]
    fn test_date_key_falls_back_to_zero() {
        let mut record = seed_records().remove(0);
        record.registration_date = "not-a-date".to_string();
        assert_eq!(record.date_key(), 0);
    }

    #[test]
    fn test_display_date_uses_fixed_locale() {
        let mut record = seed_records().remove(0);
        record.registration_date = "2024-03-05".to_string();
        assert_eq!(record.display_date(), "05/03/2024");

        record.registration_date = "garbage".to_string();
        assert_eq!(record.display_date(), "garbage");
    }

    #[test]
    fn test_status_survives_serde_with_unknown_value() {
        let json = r#"{"full_name":"X","status":"Limbo"}"#;
        let record: Record = serde_json::from_str(json).expect("deserialize");
        assert_eq!(record.status, Status::Other("Limbo".to_string()));
        assert!(record.id.is_none());
    }
}
