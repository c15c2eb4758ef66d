//! Pagination over the filtered-and-sorted set
//!
//! Pages are 1-indexed fixed-size slices. The paginator is a total
//! function: out-of-range pages yield empty slices, never errors.

use super::record::Record;

/// One page of results plus the arithmetic the footer needs
#[derive(Debug)]
pub struct Page<'a> {
    pub items: Vec<&'a Record>,
    pub total_pages: usize,
    /// Requested page clamped to >= 1. When `total_pages` is 0 the caller's
    /// value is kept for display and navigation is disabled.
    pub page: usize,
}

impl Page<'_> {
    pub fn has_prev(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.page < self.total_pages
    }
}

/// Slice `records` into the requested page
pub fn paginate<'a>(records: &[&'a Record], page_size: usize, page: usize) -> Page<'a> {
    let page = page.max(1);

    if page_size == 0 || records.is_empty() {
        return Page {
            items: Vec::new(),
            total_pages: 0,
            page,
        };
    }

    let total_pages = records.len().div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size).min(records.len());
    let end = page.saturating_mul(page_size).min(records.len());

    Page {
        items: records[start..end].to_vec(),
        total_pages,
        page,
    }
}
