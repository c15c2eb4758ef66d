//! CSV export
//!
//! Six fixed columns, every field quoted. Embedded double quotes are
//! escaped by doubling so any field value survives a round-trip.

use crate::model::Record;
use anyhow::{anyhow, Result};
use csv::{QuoteStyle, WriterBuilder};

pub const CSV_FILE_NAME: &str = "relatorio-gestao.csv";
pub const CSV_MIME_TYPE: &str = "text/csv";

const HEADER: [&str; 6] = [
    "Name",
    "TaxId",
    "RegistrationCode",
    "Date",
    "Status",
    "ContactInfo",
];

/// Serialize the given records as a UTF-8 CSV document
pub fn export_csv(records: &[&Record]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([
            record.full_name.as_str(),
            record.tax_id.as_str(),
            record.registration_code.as_str(),
            record.registration_date.as_str(),
            record.status.as_str(),
            record.contact_info.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("failed to flush CSV buffer: {e}"))
}
