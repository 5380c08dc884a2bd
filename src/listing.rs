//! List Helpers
//!
//! Search, sort and pagination shared by the table pages.

use std::cmp::Ordering;

/// Case-insensitive substring match over any of the fields; blank query matches all
pub fn matches_query<'a>(fields: impl IntoIterator<Item = &'a str>, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields.into_iter().any(|f| f.to_lowercase().contains(&query))
}

/// Stock below the threshold counts as low
pub fn is_low_stock(quantity: i64, threshold: i64) -> bool {
    quantity < threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

/// Total order for floats, NaN last
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Case-insensitive text order
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// One page of a list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into range
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T: Clone> Page<T> {
    pub fn paginate(items: &[T], page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * per_page;
        let end = (start + per_page).min(total_items);

        Self { items: items[start..end].to_vec(), page, total_pages, total_items }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_query() {
        assert!(matches_query(["Cement Bag", "Building"], "cement"));
        assert!(matches_query(["Cement Bag"], "  "));
        assert!(!matches_query(["Cement Bag", "Building"], "paint"));
        assert!(!matches_query(std::iter::empty::<&str>(), "x"));
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(is_low_stock(9, 10));
        assert!(!is_low_stock(10, 10));
        assert!(is_low_stock(-1, 10));
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=23).collect();

        let first = Page::paginate(&items, 1, 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = Page::paginate(&items, 99, 10);
        assert_eq!(last.page, 3);
        assert_eq!(last.items, vec![21, 22, 23]);
        assert!(!last.has_next());
    }

    #[test]
    fn test_paginate_empty() {
        let page = Page::<u32>::paginate(&[], 0, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_sort_helpers() {
        assert_eq!(SortOrder::Desc.apply(cmp_f64(1.0, 2.0)), Ordering::Greater);
        assert_eq!(cmp_f64(f64::NAN, 1.0), Ordering::Greater);
        assert_eq!(cmp_text("apple", "Banana"), Ordering::Less);
        assert_eq!(SortOrder::Asc.toggle(), SortOrder::Desc);
    }
}
