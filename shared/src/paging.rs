//! Pagination windows for list views
//!
//! List pages show a fixed-size block of page links at once. For a
//! zero-based `current` page the block runs from
//! `floor(current / block) * block + 1` to `min(start + block - 1, total)`
//! in one-based page numbers.

use serde::{Deserialize, Serialize};

/// The block of page links around the current page (one-based numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
    /// Always 1
    pub first: u32,
    /// Total page count
    pub last: u32,
    /// Last page of the previous block
    pub prev: Option<u32>,
    /// First page of the next block
    pub next: Option<u32>,
}

impl PageWindow {
    /// No pages to render (`total == 0`)
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Page numbers to render as links
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// Compute the link block for zero-based page `current`.
///
/// `current` is not clamped; callers clamp it to `[0, total)` first. A block
/// size of 0 is treated as 1.
pub fn window_for(current: u32, total: u32, block: u32) -> PageWindow {
    let block = block.max(1);
    let start = (current / block) * block + 1;
    let end = start.saturating_add(block - 1).min(total);
    PageWindow {
        start,
        end,
        first: 1,
        last: total,
        prev: (start > 1).then(|| start - 1),
        next: (end < total).then(|| end + 1),
    }
}

/// Number of pages needed for `total_items` at `size` per page
pub fn total_pages(total_items: i64, size: u32) -> u32 {
    if total_items <= 0 || size == 0 {
        return 0;
    }
    let size = i64::from(size);
    u32::try_from((total_items + size - 1) / size).unwrap_or(u32::MAX)
}

/// Clamp a zero-based page index into `[0, total)`
pub fn clamp_page(current: u32, total: u32) -> u32 {
    current.min(total.saturating_sub(1))
}

/// One page of a list plus its link block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based index of this page
    pub page: u32,
    pub size: u32,
    pub total_items: i64,
    pub total_pages: u32,
    pub window: PageWindow,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, size: u32, total_items: i64, block: u32) -> Self {
        let total_pages = total_pages(total_items, size);
        Self {
            items,
            page,
            size,
            total_items,
            total_pages,
            window: window_for(page, total_pages, block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(w: PageWindow) -> (u32, u32) {
        (w.start, w.end)
    }

    #[test]
    fn test_window_blocks() {
        assert_eq!(bounds(window_for(0, 12, 5)), (1, 5));
        assert_eq!(bounds(window_for(4, 12, 5)), (1, 5));
        assert_eq!(bounds(window_for(5, 12, 5)), (6, 10));
        assert_eq!(bounds(window_for(7, 12, 5)), (6, 10));
        assert_eq!(bounds(window_for(11, 12, 5)), (11, 12));
    }

    #[test]
    fn test_window_navigation() {
        let w = window_for(7, 12, 5);
        assert_eq!(w.prev, Some(5));
        assert_eq!(w.next, Some(11));
        assert_eq!(w.first, 1);
        assert_eq!(w.last, 12);

        let w = window_for(0, 12, 5);
        assert_eq!(w.prev, None);
        assert_eq!(w.next, Some(6));

        let w = window_for(11, 12, 5);
        assert_eq!(w.prev, Some(10));
        assert_eq!(w.next, None);
        assert_eq!(w.pages().collect::<Vec<_>>(), vec![11, 12]);
    }

    #[test]
    fn test_no_pages() {
        let w = window_for(0, 0, 10);
        assert!(w.is_empty());
        assert_eq!(w.pages().count(), 0);
        assert_eq!(w.next, None);
        assert_eq!(w.prev, None);
    }

    #[test]
    fn test_single_block_exact_fit() {
        let w = window_for(3, 10, 10);
        assert_eq!(bounds(w), (1, 10));
        assert_eq!(w.next, None);
        assert!(!w.is_empty());
    }

    #[test]
    fn test_zero_block_size() {
        assert_eq!(bounds(window_for(2, 5, 0)), (3, 3));
    }

    #[test]
    fn test_total_pages_and_clamp() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(56, 5), 12);

        assert_eq!(clamp_page(20, 12), 11);
        assert_eq!(clamp_page(3, 12), 3);
        assert_eq!(clamp_page(3, 0), 0);
    }

    #[test]
    fn test_page_new() {
        let page = Page::new(vec!["a", "b"], 1, 5, 12, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(bounds(page.window), (1, 3));
        assert_eq!(page.window.prev, None);
        assert_eq!(page.window.next, None);
    }
}
