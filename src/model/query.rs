//! Query engine - text search, status filter, and ordering
//!
//! `query` is a pure function of the collection and the parameters; the
//! surrounding `QueryState` owns the mutable UI-side knobs and enforces the
//! "page resets to 1 on any filter/sort/page-size change" rule.

use super::record::{Record, Status};
use std::cmp::Ordering;

/// Sortable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    FullName,
    RegistrationDate,
}

impl SortField {
    pub fn label(&self) -> &str {
        match self {
            SortField::FullName => "Name",
            SortField::RegistrationDate => "Date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn arrow(&self) -> &str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// Status filter: everything, or exactly one status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn label(&self) -> &str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    fn matches(&self, record: &Record) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => record.status == *status,
        }
    }
}

/// Immutable query parameters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParams {
    pub search_text: String,
    pub status_filter: StatusFilter,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

/// Search matches when the trimmed, lowercased term appears in any of the
/// four searchable fields. An empty term matches everything.
fn matches_search(record: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    record.full_name.to_lowercase().contains(term)
        || record.tax_id.to_lowercase().contains(term)
        || record.registration_code.to_lowercase().contains(term)
        || record.contact_info.to_lowercase().contains(term)
}

fn compare(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::FullName => a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()),
        SortField::RegistrationDate => a.date_key().cmp(&b.date_key()),
    }
}

/// Filter and sort the collection
///
/// The sort is stable, and descending order reverses the comparison rather
/// than the result, so records with equal keys keep their input order under
/// both directions.
pub fn query<'a>(records: &'a [Record], params: &QueryParams) -> Vec<&'a Record> {
    let term = params.search_text.trim().to_lowercase();

    let mut result: Vec<&Record> = records
        .iter()
        .filter(|r| matches_search(r, &term) && params.status_filter.matches(r))
        .collect();

    result.sort_by(|a, b| {
        let ordering = compare(a, b, params.sort_field);
        match params.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    result
}

/// Page sizes offered by the table footer
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

/// Mutable query state owned by the records view
///
/// Page number is derived state: every setter that changes what the filtered
/// set looks like re-anchors to page 1. Only explicit page navigation and
/// record-collection refreshes leave it alone.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub params: QueryParams,
    pub page_size: usize,
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            params: QueryParams::default(),
            page_size: 10,
            page: 1,
        }
    }
}

impl QueryState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.params.search_text.push(c);
        self.page = 1;
    }

    pub fn pop_search_char(&mut self) {
        self.params.search_text.pop();
        self.page = 1;
    }

    pub fn clear_search(&mut self) {
        if !self.params.search_text.is_empty() {
            self.params.search_text.clear();
            self.page = 1;
        }
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        if self.params.status_filter != filter {
            self.params.status_filter = filter;
            self.page = 1;
        }
    }

    /// Selecting the active field flips the order; selecting the other
    /// field switches to it ascending. Mirrors a header-click toggle.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.params.sort_field == field {
            self.params.sort_order = match self.params.sort_order {
                SortOrder::Asc => SortOrder::Desc,
                SortOrder::Desc => SortOrder::Asc,
            };
        } else {
            self.params.sort_field = field;
            self.params.sort_order = SortOrder::Asc;
        }
        self.page = 1;
    }

    pub fn cycle_page_size(&mut self) {
        let idx = PAGE_SIZES
            .iter()
            .position(|&s| s == self.page_size)
            .unwrap_or(0);
        self.page_size = PAGE_SIZES[(idx + 1) % PAGE_SIZES.len()];
        self.page = 1;
    }

    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }
}
