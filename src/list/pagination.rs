//! Client-side pagination over an in-memory collection.
//!
//! Pages are 1-based. The page count is never below 1, so an empty
//! collection still has one (empty) page.

use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
}

impl Pagination {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page).max(1)
    }

    /// `[(page-1)*size, page*size)` intersected with the collection
    pub fn range(&self, count: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.per_page).min(count);
        let end = (self.page * self.per_page).min(count);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, count: usize) -> bool {
        self.page < self.total_pages(count)
    }

    /// Advance one page; false (and no change) on the last page
    pub fn next(&mut self, count: usize) -> bool {
        if self.has_next(count) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; false (and no change) on the first page
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`; out-of-range targets are ignored
    pub fn go_to(&mut self, page: usize, count: usize) -> bool {
        if page >= 1 && page <= self.total_pages(count) {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// After a delete: if the current page is now empty and not the first,
    /// step back exactly one page
    pub fn clamp_after_shrink(&mut self, count: usize) -> bool {
        if self.page > 1 && self.range(count).is_empty() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// After a reload: keep the page inside `[1, total_pages]`
    pub fn clamp(&mut self, count: usize) {
        self.page = self.page.clamp(1, self.total_pages(count));
    }

    /// "Showing 26 to 50 of 60 entries"
    pub fn range_label(&self, count: usize) -> String {
        if count == 0 {
            return "No entries".to_string();
        }
        let range = self.range(count);
        format!(
            "Showing {} to {} of {} entries",
            range.start + 1,
            range.end,
            count
        )
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(25)
    }
}
