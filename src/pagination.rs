//! Page-number pagination for the listing endpoints.
//!
//! Page numbers are 1-based. A request for a page that is not a number
//! gets the first page, and a request for a page outside `1..=num_pages`
//! gets the last one, so infinite scroll never runs into an error.

/// Number of beers on each page of a beer listing.
pub const PAGE_SIZE: i64 = 50;

/// Number of rows on each page of a curation listing.
pub const ADMIN_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paginator {
    count: i64,
    per_page: i64,
}

impl Paginator {
    pub fn new(count: i64, per_page: i64) -> Paginator {
        Paginator {
            count: count.max(0),
            per_page: per_page.max(1),
        }
    }

    /// An empty result still has one (empty) page.
    pub fn num_pages(&self) -> i64 {
        if self.count == 0 {
            1
        } else {
            (self.count + self.per_page - 1) / self.per_page
        }
    }

    /// Resolve the raw `page` query parameter to a page of this result.
    pub fn page(&self, raw: Option<&str>) -> PageWindow {
        let num_pages = self.num_pages();
        let number = match raw.map(str::trim).and_then(|p| p.parse::<i64>().ok()) {
            None => 1,
            Some(n) if n < 1 || n > num_pages => num_pages,
            Some(n) => n,
        };

        PageWindow {
            number,
            num_pages,
            count: self.count,
            per_page: self.per_page,
        }
    }
}

/// A resolved page that has not been loaded yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageWindow {
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    per_page: i64,
}

impl PageWindow {
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// Attach the rows loaded for this window.
    pub fn with_items<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            has_next: self.number < self.num_pages,
            has_previous: self.number > 1,
            next_page_number: if self.number < self.num_pages {
                Some(self.number + 1)
            } else {
                None
            },
            previous_page_number: if self.number > 1 {
                Some(self.number - 1)
            } else {
                None
            },
            items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<i64>,
    pub previous_page_number: Option<i64>,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnOnce(Vec<T>) -> Vec<U>,
    {
        Page {
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            has_next: self.has_next,
            has_previous: self.has_previous,
            next_page_number: self.next_page_number,
            previous_page_number: self.previous_page_number,
            items: f(self.items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_a_single_page() {
        let paginator = Paginator::new(0, PAGE_SIZE);
        assert_eq!(paginator.num_pages(), 1);

        let window = paginator.page(Some("3"));
        assert_eq!(window.number, 1);
        assert_eq!(window.offset(), 0);

        let page = window.with_items(Vec::<i32>::new());
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(Paginator::new(50, PAGE_SIZE).num_pages(), 1);
        assert_eq!(Paginator::new(51, PAGE_SIZE).num_pages(), 2);
        assert_eq!(Paginator::new(150, PAGE_SIZE).num_pages(), 3);
    }

    #[test]
    fn missing_or_garbage_page_is_the_first_page() {
        let paginator = Paginator::new(120, PAGE_SIZE);
        assert_eq!(paginator.page(None).number, 1);
        assert_eq!(paginator.page(Some("")).number, 1);
        assert_eq!(paginator.page(Some("two")).number, 1);
    }

    #[test]
    fn out_of_range_page_is_the_last_page() {
        let paginator = Paginator::new(120, PAGE_SIZE);
        assert_eq!(paginator.page(Some("0")).number, 3);
        assert_eq!(paginator.page(Some("-4")).number, 3);
        assert_eq!(paginator.page(Some("99")).number, 3);
    }

    #[test]
    fn window_offsets_and_neighbours() {
        let window = Paginator::new(120, PAGE_SIZE).page(Some("2"));
        assert_eq!(window.offset(), 50);
        assert_eq!(window.limit(), 50);

        let page = window.with_items(vec!["a", "b"]);
        assert_eq!(page.next_page_number, Some(3));
        assert_eq!(page.previous_page_number, Some(1));
        assert!(page.has_next && page.has_previous);

        let last = Paginator::new(120, PAGE_SIZE)
            .page(Some("3"))
            .with_items(vec![()]);
        assert_eq!(last.next_page_number, None);
        assert!(!last.has_next);
    }

    #[test]
    fn map_keeps_the_page_metadata() {
        let page = Paginator::new(3, 2)
            .page(Some("2"))
            .with_items(vec![1, 2])
            .map(|items| items.into_iter().map(|n| n * 10).collect());

        assert_eq!(page.number, 2);
        assert_eq!(page.items, vec![10, 20]);
    }
}
