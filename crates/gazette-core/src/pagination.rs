//! Page-number pagination with silent fallback.
//!
//! Listing views never fail on a bad `page` parameter: a value that is not
//! an integer falls back to the first page, and an integer outside the
//! valid range falls back to the last page. An empty result set still
//! yields one valid (empty) page.

use serde::Serialize;

/// A `page` query parameter as received from the request, before range
/// checking against the actual number of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParam {
    /// No parameter given; resolves to the first page.
    Default,
    /// An integer, possibly out of range.
    Number(i64),
    /// Present but not an integer; resolves to the first page.
    Invalid,
}

impl PageParam {
    /// Parse the raw query value. `None` means the parameter was absent.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => PageParam::Default,
            Some(value) => match value.trim().parse::<i64>() {
                Ok(number) => PageParam::Number(number),
                Err(_) => PageParam::Invalid,
            },
        }
    }
}

/// Computes page counts and clamps requested page numbers for a fixed
/// page size over `total` items.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    total: u64,
    per_page: u64,
}

impl Pager {
    pub fn new(total: u64, per_page: u64) -> Self {
        Self {
            total,
            per_page: per_page.max(1),
        }
    }

    /// Number of pages; at least 1 so an empty collection has a valid
    /// (empty) first page.
    pub fn num_pages(&self) -> u64 {
        if self.total == 0 {
            1
        } else {
            self.total.div_ceil(self.per_page)
        }
    }

    /// Resolve a requested page to a valid 1-based page number. Invalid
    /// input resolves to page 1; out-of-range numbers (including zero and
    /// negatives) resolve to the last page.
    pub fn resolve(&self, requested: PageParam) -> u64 {
        let last = self.num_pages();
        match requested {
            PageParam::Default | PageParam::Invalid => 1,
            PageParam::Number(n) if n < 1 => last,
            PageParam::Number(n) if n as u64 > last => last,
            PageParam::Number(n) => n as u64,
        }
    }
}

/// One page of results together with its position in the full listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    /// A single empty page, used when the backing collection is empty.
    pub fn empty(per_page: u64) -> Self {
        Self {
            items: Vec::new(),
            number: 1,
            num_pages: 1,
            total: 0,
            per_page,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn previous_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn next_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    /// Map the page items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_param_parses_integers_and_garbage() {
        assert_eq!(PageParam::parse(None), PageParam::Default);
        assert_eq!(PageParam::parse(Some("2")), PageParam::Number(2));
        assert_eq!(PageParam::parse(Some(" 7 ")), PageParam::Number(7));
        assert_eq!(PageParam::parse(Some("-3")), PageParam::Number(-3));
        assert_eq!(PageParam::parse(Some("abc")), PageParam::Invalid);
        assert_eq!(PageParam::parse(Some("1.5")), PageParam::Invalid);
        assert_eq!(PageParam::parse(Some("")), PageParam::Invalid);
    }

    #[test]
    fn num_pages_rounds_up_and_never_hits_zero() {
        assert_eq!(Pager::new(0, 3).num_pages(), 1);
        assert_eq!(Pager::new(1, 3).num_pages(), 1);
        assert_eq!(Pager::new(3, 3).num_pages(), 1);
        assert_eq!(Pager::new(4, 3).num_pages(), 2);
        assert_eq!(Pager::new(10, 3).num_pages(), 4);
    }

    #[test]
    fn invalid_page_falls_back_to_first() {
        let pager = Pager::new(10, 3);
        assert_eq!(pager.resolve(PageParam::Invalid), 1);
        assert_eq!(pager.resolve(PageParam::Default), 1);
    }

    #[test]
    fn out_of_range_page_falls_back_to_last() {
        let pager = Pager::new(10, 3);
        assert_eq!(pager.resolve(PageParam::Number(99)), 4);
        assert_eq!(pager.resolve(PageParam::Number(0)), 4);
        assert_eq!(pager.resolve(PageParam::Number(-1)), 4);
    }

    #[test]
    fn in_range_page_is_kept() {
        let pager = Pager::new(10, 3);
        assert_eq!(pager.resolve(PageParam::Number(1)), 1);
        assert_eq!(pager.resolve(PageParam::Number(4)), 4);
    }

    #[test]
    fn empty_collection_resolves_to_a_single_empty_page() {
        let pager = Pager::new(0, 3);
        assert_eq!(pager.resolve(PageParam::Number(5)), 1);
        assert_eq!(pager.resolve(PageParam::Invalid), 1);

        let page: Page<u8> = Page::empty(3);
        assert!(!page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.next_number(), None);
    }

    #[test]
    fn page_navigation_helpers() {
        let page = Page {
            items: vec![1, 2, 3],
            number: 2,
            num_pages: 4,
            total: 10,
            per_page: 3,
        };
        assert!(page.has_previous());
        assert!(page.has_next());
        assert_eq!(page.previous_number(), Some(1));
        assert_eq!(page.next_number(), Some(3));

        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!(mapped.number, 2);
    }
}
