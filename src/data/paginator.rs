use std::fmt;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Fixed-size page window over the working set
///
/// `page` is 1-based and always within `[1, max(total_pages, 1)]`.
/// Navigation past either end is a silent no-op.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    page: usize,
    page_size: usize,
}

/// 1-based inclusive bounds of the visible page, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl fmt::Display for RecordRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{} of {}", self.start, self.end, self.total)
    }
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Paginator<T> {
    /// A page size of zero is treated as one
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the working set and go back to the first page
    pub fn set_working_set(&mut self, items: Vec<T>) {
        self.items = items;
        self.page = 1;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn working_set(&self) -> &[T] {
        &self.items
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages()
    }

    /// Advance one page; returns whether the page changed
    pub fn next(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; returns whether the page changed
    pub fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn visible_page(&self) -> &[T] {
        let (start, end) = self.bounds();
        &self.items[start..end]
    }

    pub fn record_range(&self) -> RecordRange {
        let total = self.items.len();
        if total == 0 {
            return RecordRange {
                start: 0,
                end: 0,
                total,
            };
        }

        let (start, end) = self.bounds();
        RecordRange {
            start: start + 1,
            end,
            total,
        }
    }

    // Half-open offsets into `items`, clipped to its length
    fn bounds(&self) -> (usize, usize) {
        let len = self.items.len();
        let start = ((self.page - 1) * self.page_size).min(len);
        let end = (self.page * self.page_size).min(len);
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(n: usize, page_size: usize) -> Paginator<usize> {
        let mut p = Paginator::new(page_size);
        p.set_working_set((1..=n).collect());
        p
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for page_size in 1..=7 {
            for n in 0..=30 {
                let p = paginator(n, page_size);
                assert_eq!(p.total_pages(), (n + page_size - 1) / page_size);
            }
        }
        assert_eq!(paginator(0, 20).total_pages(), 0);
    }

    #[test]
    fn test_zero_page_size_clamped() {
        let p = paginator(3, 0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.total_pages(), 3);
    }

    #[test]
    fn test_fifty_seven_records_walkthrough() {
        let mut p = paginator(57, 20);
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.visible_page(), &(1..=20).collect::<Vec<_>>()[..]);
        assert_eq!(p.record_range().to_string(), "1–20 of 57");

        assert!(p.next());
        assert_eq!(p.visible_page().first(), Some(&21));
        assert_eq!(p.visible_page().last(), Some(&40));
        assert_eq!(p.record_range().to_string(), "21–40 of 57");

        assert!(p.next());
        assert_eq!(p.visible_page().len(), 17);
        assert_eq!(p.record_range().to_string(), "41–57 of 57");

        assert!(!p.next());
        assert_eq!(p.page(), 3);
    }

    #[test]
    fn test_previous_saturates_at_first_page() {
        let mut p = paginator(5, 2);
        assert!(!p.previous());
        assert_eq!(p.page(), 1);
        p.next();
        assert!(!p.is_last_page());
        assert!(p.previous());
        assert!(p.is_first_page());
    }

    #[test]
    fn test_empty_working_set() {
        let mut p = paginator(0, 20);
        assert!(p.visible_page().is_empty());
        assert!(!p.next());
        assert!(!p.previous());
        assert_eq!(p.page(), 1);
        assert!(p.is_first_page() && p.is_last_page());
        assert_eq!(p.record_range().to_string(), "0–0 of 0");
    }

    #[test]
    fn test_set_working_set_resets_page() {
        let mut p = paginator(50, 10);
        p.next();
        p.next();
        assert_eq!(p.page(), 3);

        p.set_working_set(vec![1, 2, 3]);
        assert_eq!(p.page(), 1);
        assert_eq!(p.visible_page(), &[1, 2, 3]);
    }

    #[test]
    fn test_page_stays_in_bounds_for_any_walk() {
        let mut p = paginator(23, 5);
        let steps = [true, true, false, true, true, true, true, true, false, false, false, false, false, false];
        for forward in steps {
            if forward {
                p.next();
            } else {
                p.previous();
            }
            assert!(p.page() >= 1 && p.page() <= p.total_pages());
        }
    }
}
