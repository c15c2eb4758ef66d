//! Rich-text report export
//!
//! Emits a styled HTML document with a word-processor-compatible MIME type
//! and a `.doc` extension so it opens as a rich document. Every
//! interpolated field value is HTML-escaped.

use crate::model::Record;
use chrono::{DateTime, Local};

pub const REPORT_MIME_TYPE: &str = "application/msword";

/// Timestamp-qualified download name, e.g. `relatorio-gestao-1717251045123.doc`
pub fn report_file_name(now: DateTime<Local>) -> String {
    format!("relatorio-gestao-{}.doc", now.timestamp_millis())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize the given records as a UTF-8 HTML report document
pub fn export_report(records: &[&Record], generated_at: DateTime<Local>) -> Vec<u8> {
    let date_str = generated_at.format("%d/%m/%Y").to_string();

    let mut html = String::new();
    html.push_str(
        "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
         xmlns:w='urn:schemas-microsoft-com:office:word' \
         xmlns='http://www.w3.org/TR/REC-html40'>\n",
    );
    html.push_str("<head>\n<meta charset='utf-8'>\n");
    html.push_str("<title>Relatório de Gestão</title>\n");
    html.push_str("<style>\n");
    html.push_str("body { font-family: 'Arial', sans-serif; }\n");
    html.push_str(".header { text-align: center; margin-bottom: 20px; }\n");
    html.push_str(
        ".title { font-size: 24pt; font-weight: bold; color: #1e40af; margin-bottom: 5px; }\n",
    );
    html.push_str(".subtitle { font-size: 12pt; color: #64748b; }\n");
    html.push_str("table { width: 100%; border-collapse: collapse; margin-top: 20px; }\n");
    html.push_str(
        "th { background-color: #2563eb; color: #ffffff; padding: 12px; text-align: left; \
         font-size: 10pt; text-transform: uppercase; }\n",
    );
    html.push_str(
        "td { border: 1px solid #e2e8f0; padding: 10px; font-size: 9pt; \
         vertical-align: middle; }\n",
    );
    html.push_str(
        ".footer { margin-top: 30px; font-size: 8pt; color: #94a3b8; text-align: right; }\n",
    );
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<div class=\"header\">\n");
    html.push_str("<div class=\"title\">Relatório de Gestão de Pessoas</div>\n");
    html.push_str(&format!(
        "<div class=\"subtitle\">Gerado em {} - Gestão TUI</div>\n",
        date_str
    ));
    html.push_str("</div>\n");

    html.push_str("<table>\n<thead>\n<tr>\n");
    for column in [
        "Name",
        "TaxId",
        "RegistrationCode",
        "Date",
        "Status",
        "ContactInfo",
    ] {
        html.push_str(&format!("<th>{}</th>\n", column));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in records {
        html.push_str("<tr>\n");
        html.push_str(&format!(
            "<td style=\"font-weight: bold;\">{}</td>\n",
            escape(&record.full_name)
        ));
        html.push_str(&format!("<td>{}</td>\n", escape(&record.tax_id)));
        html.push_str(&format!(
            "<td style=\"color: #2563eb;\">{}</td>\n",
            escape(&record.registration_code)
        ));
        html.push_str(&format!("<td>{}</td>\n", escape(&record.display_date())));
        html.push_str(&format!("<td>{}</td>\n", escape(record.status.as_str())));
        html.push_str(&format!("<td>{}</td>\n", escape(&record.contact_info)));
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html.push_str(
        "<div class=\"footer\">Este documento foi gerado automaticamente pelo Gestão TUI.</div>\n",
    );
    html.push_str("</body>\n</html>\n");

    html.into_bytes()
}
