//! Multi-page dialog container

/// Which way the last page change went. Lets callers pick a transition
/// style without the container knowing about animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Forward,
    Backward,
}

/// Tracks the current page of a multi-step dialog
#[derive(Debug, Clone)]
pub struct PagedDialog {
    page: usize,
    page_count: usize,
    last_direction: PageDirection,
}

impl PagedDialog {
    pub fn new(page_count: usize) -> Self {
        Self {
            page: 0,
            page_count: page_count.max(1),
            last_direction: PageDirection::Forward,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn last_direction(&self) -> PageDirection {
        self.last_direction
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        self.page + 1 == self.page_count
    }

    /// Advance one page. No-op on the last page.
    pub fn next(&mut self) {
        if !self.is_last() {
            self.page += 1;
            self.last_direction = PageDirection::Forward;
        }
    }

    /// Go back one page. No-op on the first page.
    pub fn back(&mut self) {
        if !self.is_first() {
            self.page -= 1;
            self.last_direction = PageDirection::Backward;
        }
    }

    pub fn reset(&mut self) {
        self.page = 0;
        self.last_direction = PageDirection::Forward;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_bounds() {
        let mut dialog = PagedDialog::new(2);
        assert!(dialog.is_first());

        dialog.back();
        assert_eq!(dialog.page(), 0);

        dialog.next();
        assert!(dialog.is_last());
        assert_eq!(dialog.last_direction(), PageDirection::Forward);

        dialog.next();
        assert_eq!(dialog.page(), 1);

        dialog.back();
        assert!(dialog.is_first());
        assert_eq!(dialog.last_direction(), PageDirection::Backward);
    }

    #[test]
    fn test_reset() {
        let mut dialog = PagedDialog::new(3);
        dialog.next();
        dialog.next();
        dialog.reset();
        assert_eq!(dialog.page(), 0);
    }
}
