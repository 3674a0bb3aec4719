use std::num::NonZeroUsize;

/// The page-sized slice of an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow<T> {
    pub items: Vec<T>,
    /// 1-based page this window was cut for.
    pub page: usize,
    pub total_pages: usize,
    /// Length of the full sequence the window was cut from.
    pub total_items: usize,
    /// Index of `items[0]` in the full sequence.
    pub offset: usize,
}

impl<T> PageWindow<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `max(1, ceil(count / page_size))`: an empty sequence is still one page.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get()).max(1)
}

/// Cuts page `page_number` (1-based) out of `items`.
///
/// Pages past the end yield an empty window; callers that want a consistent
/// pager should clamp first (see [`Pagination::clamp`]). Page 0 is read as
/// page 1.
pub fn page<T: Clone>(items: &[T], page_number: usize, page_size: NonZeroUsize) -> PageWindow<T> {
    let size = page_size.get();
    let page_number = page_number.max(1);
    let start = (page_number - 1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());

    PageWindow {
        items: items[start..end].to_vec(),
        page: page_number,
        total_pages: total_pages(items.len(), page_size),
        total_items: items.len(),
        offset: start,
    }
}

/// Pager state: current page, fixed page size, derived total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: NonZeroUsize,
    total_pages: usize,
}

impl Pagination {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_pages: 1,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Recomputes the total for `visible_count` items and pulls the current
    /// page back into range if the total shrank below it.
    pub fn set_total(&mut self, visible_count: usize) {
        self.total_pages = total_pages(visible_count, self.page_size);
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// No-op at the last page. Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if self.current_page < self.total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// No-op at page 1. Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page`, clamped to `[1, total_pages]`.
    pub fn goto(&mut self, page: usize) {
        self.current_page = page;
        self.clamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn empty_sequence_is_one_page() {
        let window = page::<u32>(&[], 1, size(9));
        assert_eq!(window.total_pages, 1);
        assert!(window.items.is_empty());
        assert!(!window.has_prev());
        assert!(!window.has_next());
    }

    #[test]
    fn page_size_one_three_items() {
        let items = ["a", "b", "c"];
        let window = page(&items, 2, size(1));
        assert_eq!(window.total_pages, 3);
        assert_eq!(window.items, vec!["b"]);
        assert_eq!(window.offset, 1);
    }

    #[test]
    fn last_page_is_clamped_to_length() {
        let items: Vec<u32> = (1..=10).collect();
        let window = page(&items, 4, size(3));
        assert_eq!(window.total_pages, 4);
        assert_eq!(window.items, vec![10]);
    }

    #[test]
    fn page_past_end_is_empty() {
        let items = [1, 2, 3];
        let window = page(&items, 5, size(2));
        assert!(window.items.is_empty());
        assert_eq!(window.total_pages, 2);
    }

    #[test]
    fn pages_partition_the_sequence() {
        for count in 0..40usize {
            for page_size in 1..12usize {
                let items: Vec<usize> = (0..count).collect();
                let ps = size(page_size);
                let pages = total_pages(count, ps);
                assert_eq!(pages, count.div_ceil(page_size).max(1));

                let rebuilt: Vec<usize> = (1..=pages)
                    .flat_map(|p| page(&items, p, ps).items)
                    .collect();
                assert_eq!(rebuilt, items, "count={count} page_size={page_size}");
            }
        }
    }

    #[test]
    fn navigation_stops_at_bounds() {
        let mut pager = Pagination::new(size(2));
        pager.set_total(5);
        assert_eq!(pager.total_pages(), 3);

        assert!(!pager.prev());
        assert_eq!(pager.current_page(), 1);

        assert!(pager.next());
        assert!(pager.next());
        assert!(!pager.next());
        assert_eq!(pager.current_page(), 3);
    }

    #[test]
    fn shrinking_total_clamps_current_page() {
        let mut pager = Pagination::new(size(2));
        pager.set_total(10);
        pager.goto(5);
        assert_eq!(pager.current_page(), 5);

        pager.set_total(3);
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn goto_clamps_both_ends() {
        let mut pager = Pagination::new(size(2));
        pager.set_total(4);
        pager.goto(0);
        assert_eq!(pager.current_page(), 1);
        pager.goto(99);
        assert_eq!(pager.current_page(), 2);
    }
}
