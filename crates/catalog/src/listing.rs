//! Paged product listing contract.

use serde::{Deserialize, Serialize};

use bazaar_core::UserId;

use crate::filter::CatalogFilter;
use crate::product::Product;

/// Fixed number of products per listing page.
pub const PAGE_SIZE: u32 = 12;

/// One listing request: which page, constrained how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page ordinal. Values below 1 are treated as 1.
    pub page: u32,
    pub category: Option<String>,
    /// Restrict to one brand's products (brand dashboard).
    pub brand_id: Option<UserId>,
}

impl ListQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            category: None,
            brand_id: None,
        }
    }

    /// Query for `page` under a listing filter (`All` drops the constraint).
    pub fn for_filter(filter: &CatalogFilter, page: u32) -> Self {
        Self {
            page,
            category: filter.constraint().map(str::to_string),
            brand_id: None,
        }
    }

    pub fn with_brand(mut self, brand_id: UserId) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    /// Zero-based row offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * PAGE_SIZE as usize
    }

    /// Inclusive row range `(first, last)`, as range-based backends expect it.
    pub fn range(&self) -> (usize, usize) {
        let first = self.offset();
        (first, first + PAGE_SIZE as usize - 1)
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = match &self.category {
            Some(c) => product.category.as_deref() == Some(c.as_str()),
            None => true,
        };
        let brand_ok = match self.brand_id {
            Some(b) => product.brand_id == b,
            None => true,
        };
        category_ok && brand_ok
    }
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub has_more: bool,
}

impl ProductPage {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
        }
    }

    /// Build a page from the rows returned at `offset` and the backend's exact
    /// total count. A missing count means "no further pages".
    pub fn from_counted(items: Vec<Product>, offset: usize, total: Option<usize>) -> Self {
        let has_more = total.is_some_and(|total| has_more(offset, items.len(), total));
        Self { items, has_more }
    }
}

/// Whether rows exist past `offset + returned`.
pub fn has_more(offset: usize, returned: usize, total: usize) -> bool {
    offset + returned < total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_page_starts_at_zero() {
        let q = ListQuery::page(1);
        assert_eq!(q.offset(), 0);
        assert_eq!(q.range(), (0, 11));
    }

    #[test]
    fn page_zero_is_clamped_to_first_page() {
        assert_eq!(ListQuery::page(0).offset(), 0);
    }

    #[test]
    fn all_filter_drops_category_constraint() {
        let q = ListQuery::for_filter(&CatalogFilter::All, 2);
        assert_eq!(q.category, None);
        assert_eq!(q.offset(), 12);

        let q = ListQuery::for_filter(&CatalogFilter::category("Bags"), 1);
        assert_eq!(q.category.as_deref(), Some("Bags"));
    }

    #[test]
    fn counted_page_reports_more_when_rows_remain() {
        let page = ProductPage::from_counted(Vec::new(), 0, Some(17));
        assert!(page.has_more);
        assert!(!has_more(12, 5, 17));
    }

    #[test]
    fn missing_count_means_no_more() {
        let page = ProductPage::from_counted(Vec::new(), 0, None);
        assert!(!page.has_more);
    }

    proptest! {
        #[test]
        fn consecutive_pages_tile_without_gaps(page in 1u32..10_000) {
            let this = ListQuery::page(page).range();
            let next = ListQuery::page(page + 1).range();
            prop_assert_eq!(this.1 + 1, next.0);
            prop_assert_eq!(this.1 - this.0 + 1, PAGE_SIZE as usize);
        }

        #[test]
        fn last_page_never_has_more(total in 0usize..500) {
            let pages = total.div_ceil(PAGE_SIZE as usize).max(1);
            let q = ListQuery::page(pages as u32);
            let returned = total.saturating_sub(q.offset()).min(PAGE_SIZE as usize);
            prop_assert!(!has_more(q.offset(), returned, total));
        }
    }
}
