//! Listing navigation: filters, current page and the page-number strip.

use pis_core::types::DbId;

use crate::api::{Category, ProductQuery};

/// Rows per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Numbered entries shown before the strip collapses into ellipses.
const MAX_PAGES_SHOWN: i64 = 5;

/// Page, page size and filters for the product listing.
///
/// Any filter change returns to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    page: i64,
    page_size: i64,
    search: String,
    category_ids: Vec<DbId>,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListingState {
    pub fn new(page_size: i64) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            category_ids: Vec::new(),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category_ids(&self) -> &[DbId] {
        &self.category_ids
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Select `id` if it is not selected, otherwise deselect it.
    pub fn toggle_category(&mut self, id: DbId) {
        match self.category_ids.iter().position(|c| *c == id) {
            Some(index) => {
                self.category_ids.remove(index);
            }
            None => self.category_ids.push(id),
        }
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.category_ids.clear();
        self.page = 1;
    }

    pub fn has_filters(&self) -> bool {
        !self.search.trim().is_empty() || !self.category_ids.is_empty()
    }

    /// Move to `page`, clamped to `1..=total_pages`.
    pub fn go_to_page(&mut self, page: i64, total_pages: i64) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    /// Adjust after a successful delete. `rows_on_page` is the row count
    /// shown before the delete; removing the only row of a later page steps
    /// back one page. Returns whether the page changed.
    pub fn after_delete(&mut self, rows_on_page: usize) -> bool {
        if rows_on_page == 1 && self.page > 1 {
            self.page -= 1;
            return true;
        }
        false
    }

    /// The request for the current view.
    pub fn query(&self) -> ProductQuery {
        ProductQuery {
            page: self.page,
            limit: self.page_size,
            search: self.search.clone(),
            category_ids: self.category_ids.clone(),
        }
    }
}

/// One entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(i64),
    Ellipsis,
}

/// Page numbers to offer around `current`.
///
/// Short listings show every page. Longer ones always show the first and
/// last page and a window of up to three pages near `current`, with an
/// [`PageItem::Ellipsis`] standing in for each gap. Nothing is shown for a
/// single page.
pub fn page_numbers(current: i64, total_pages: i64) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }
    if total_pages <= MAX_PAGES_SHOWN {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut start = (current - 1).max(2);
    let mut end = (current + 1).min(total_pages - 1);
    if current <= 3 {
        start = 2;
        end = 4.min(total_pages - 1);
    }
    if current >= total_pages - 2 {
        start = (total_pages - 3).max(2);
        end = total_pages - 1;
    }

    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total_pages - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total_pages));
    items
}

/// Map a product's category names back to ids. Unknown names are dropped.
pub fn category_ids_for_names(names: &[String], categories: &[Category]) -> Vec<DbId> {
    names
        .iter()
        .filter_map(|name| categories.iter().find(|c| &c.name == name).map(|c| c.id))
        .collect()
}
