//! Page-number pagination helpers.
//!
//! Listings are split into fixed-size pages addressed by a 1-based `?page=N`
//! query parameter. The repository reports the total match count alongside
//! each page so the presentation layer can offer previous/next links.

pub const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Builds a request, clamping the page to at least 1 and the page size
    /// into `1..=100`.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page(),
            per_page: request.per_page(),
            total_items,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn total_pages(&self) -> u32 {
        if self.total_items == 0 {
            return 1;
        }
        let per_page = u64::from(self.per_page);
        let pages = self.total_items.div_ceil(per_page);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_results(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.total_pages()).then(|| self.page + 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_clamps_inputs() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page(), 1);
        assert_eq!(request.per_page(), 1);

        let request = PageRequest::new(3, 1000);
        assert_eq!(request.per_page(), MAX_PER_PAGE);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(2, 10).offset(), 10);
        assert_eq!(PageRequest::new(5, 7).offset(), 28);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![0u8; 10], PageRequest::new(1, 10), 11);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.next_page(), Some(2));
        assert_eq!(page.prev_page(), None);
    }

    #[test]
    fn empty_result_is_a_single_page() {
        let page: Page<u8> = Page::empty(PageRequest::first(10));
        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.next_page(), None);
        assert!(!page.has_results());
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::new(vec![0u8; 1], PageRequest::new(2, 10), 11);
        assert_eq!(page.prev_page(), Some(1));
        assert_eq!(page.next_page(), None);
    }
}
