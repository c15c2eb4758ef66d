//! Export serializers
//!
//! Both exporters are pure functions over the filtered-and-sorted,
//! non-paginated record sequence: an export always covers every matching
//! record, never just the visible page.

pub mod csv;
pub mod report;

pub use csv::{export_csv, CSV_FILE_NAME, CSV_MIME_TYPE};
pub use report::{export_report, report_file_name, REPORT_MIME_TYPE};
