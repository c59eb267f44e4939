use std::ops::Range;

const MAX_VISIBLE_PAGES: usize = 7;

/// Window calculator for fixed-size pages over a filtered list. It tracks
/// only counts, never the items themselves, so the caller can re-slice any
/// list of the same length.
#[derive(Clone, Debug)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
    total_items: usize,
}

/// The set of page numbers exposed as direct-jump controls, plus whether a
/// leading "1 ..." or trailing "... last" affordance should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<usize>,
    pub leading_jump: bool,
    pub trailing_jump: bool,
}

/// Backing numbers for a "Showing X - Y of Z" line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageMetadata {
    pub showing_start: usize,
    pub showing_end: usize,
    pub total_items: usize,
}

impl Paginator {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Paginator {
            page_size: page_size.max(1),
            current_page: 1,
            total_items,
        }
    }

    /// Resets to page 1 whenever the item count changes, so a narrowed
    /// filter can never leave the view on a page past the end. A pure
    /// reorder (same count) keeps the current page.
    pub fn set_items(&mut self, total_items: usize) {
        if total_items != self.total_items {
            self.current_page = 1;
        }
        self.total_items = total_items;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// An empty list behaves as a single empty page, never zero pages.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Out-of-range targets leave the state unchanged.
    pub fn go_to_page(&mut self, page: usize) {
        if page < 1 || page > self.total_pages() {
            return;
        }
        self.current_page = page;
    }

    pub fn next_page(&mut self) {
        if !self.is_last_page() {
            self.go_to_page(self.current_page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if !self.is_first_page() {
            self.go_to_page(self.current_page - 1);
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_pages()
    }

    /// Half-open index range of the current page, clipped to the list.
    pub fn slice_bounds(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.page_size;
        let start = start.min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.slice_bounds()]
    }

    /// A window of at most 7 page numbers centered on the current page,
    /// pinned to the edges so the button row keeps a constant width.
    pub fn page_window(&self) -> PageWindow {
        let total_pages = self.total_pages();
        let pages = if total_pages <= MAX_VISIBLE_PAGES {
            (1..=total_pages).collect()
        } else if self.current_page <= 4 {
            (1..=MAX_VISIBLE_PAGES).collect()
        } else if self.current_page >= total_pages - 3 {
            (total_pages - MAX_VISIBLE_PAGES + 1..=total_pages).collect()
        } else {
            (self.current_page - 3..=self.current_page + 3).collect()
        };
        PageWindow {
            pages,
            leading_jump: self.current_page > 4 && total_pages > MAX_VISIBLE_PAGES,
            trailing_jump: total_pages > MAX_VISIBLE_PAGES
                && self.current_page < total_pages - 3,
        }
    }

    pub fn metadata(&self) -> PageMetadata {
        let bounds = self.slice_bounds();
        let showing_start = if bounds.is_empty() { 0 } else { bounds.start + 1 };
        PageMetadata {
            showing_start,
            showing_end: bounds.end,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_is_full_size_except_possibly_the_last_page() {
        let mut p = Paginator::new(151, 24);
        assert_eq!(p.total_pages(), 7);
        for page in 1..=6 {
            p.go_to_page(page);
            assert_eq!(p.slice_bounds().len(), 24);
        }
        p.go_to_page(7);
        assert_eq!(p.slice_bounds(), 144..151);
        assert!(p.is_last_page());
    }

    #[test]
    fn empty_list_is_one_empty_page() {
        let p = Paginator::new(0, 24);
        assert_eq!(p.total_pages(), 1);
        assert!(p.is_first_page());
        assert!(p.is_last_page());
        assert_eq!(p.slice_bounds(), 0..0);
        assert_eq!(
            p.metadata(),
            PageMetadata {
                showing_start: 0,
                showing_end: 0,
                total_items: 0
            }
        );
    }

    #[test]
    fn out_of_range_jumps_are_noops() {
        let mut p = Paginator::new(151, 24);
        p.go_to_page(3);
        p.go_to_page(0);
        assert_eq!(p.current_page(), 3);
        p.go_to_page(8);
        assert_eq!(p.current_page(), 3);
    }

    #[test]
    fn count_change_resets_to_page_one() {
        let mut p = Paginator::new(151, 24);
        p.go_to_page(5);
        p.set_items(30);
        assert_eq!(p.current_page(), 1);
        // same count again, e.g. a reorder: page sticks
        p.go_to_page(2);
        p.set_items(30);
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn window_shows_all_pages_when_few() {
        let p = Paginator::new(151, 24);
        let window = p.page_window();
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(!window.leading_jump);
        assert!(!window.trailing_jump);
    }

    #[test]
    fn window_pins_to_the_left_edge() {
        let mut p = Paginator::new(480, 24); // 20 pages
        p.go_to_page(3);
        let window = p.page_window();
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(!window.leading_jump);
        assert!(window.trailing_jump);
    }

    #[test]
    fn window_centers_in_the_middle() {
        let mut p = Paginator::new(480, 24);
        p.go_to_page(10);
        let window = p.page_window();
        assert_eq!(window.pages, vec![7, 8, 9, 10, 11, 12, 13]);
        assert!(window.leading_jump);
        assert!(window.trailing_jump);
    }

    #[test]
    fn window_pins_to_the_right_edge() {
        let mut p = Paginator::new(480, 24);
        p.go_to_page(19);
        let window = p.page_window();
        assert_eq!(window.pages, vec![14, 15, 16, 17, 18, 19, 20]);
        assert!(window.leading_jump);
        assert!(!window.trailing_jump);
    }

    #[test]
    fn next_and_prev_respect_the_edges() {
        let mut p = Paginator::new(48, 24);
        p.prev_page();
        assert_eq!(p.current_page(), 1);
        p.next_page();
        assert_eq!(p.current_page(), 2);
        p.next_page();
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn metadata_on_a_full_middle_page() {
        let mut p = Paginator::new(151, 24);
        p.go_to_page(2);
        assert_eq!(
            p.metadata(),
            PageMetadata {
                showing_start: 25,
                showing_end: 48,
                total_items: 151
            }
        );
    }
}
