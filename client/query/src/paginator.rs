use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Fixed-size client-side pages over a sequence of `len` items.
///
/// Moves past either end are ignored, so the index stays on a valid page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self, len: usize) -> bool {
        (self.page + 1) * self.page_size < len
    }

    pub fn next(&mut self, len: usize) -> bool {
        if !self.has_next(len) {
            return false;
        }

        self.page += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }

        self.page -= 1;
        true
    }

    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if page != 0 && page >= self.page_count(len) {
            return false;
        }

        self.page = page;
        true
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn bounds(&self, len: usize) -> Range<usize> {
        let start = (self.page * self.page_size).min(len);
        let end = (start + self.page_size).min(len);

        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.bounds(items.len())]
    }
}
