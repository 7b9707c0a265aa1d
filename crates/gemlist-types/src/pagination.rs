use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 500;

/// Page being asked for (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Result<Self> {
        if page == 0 {
            return Err(Error::InvalidPage("pages start at 1".to_string()));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::InvalidPage(format!(
                "page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, page_size
            )));
        }
        Ok(Self { page, page_size })
    }

    /// First page with the given size, the size clamped into the accepted range
    pub fn first(page_size: u64) -> Self {
        Self {
            page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn with_page(self, page: u64) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata of a listing result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Build metadata, deriving `total_pages = ceil(total / page_size)`
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = if page_size > 0 {
            total.div_ceil(page_size)
        } else {
            0
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(request.page(), request.page_size(), 0)
    }

    /// Clamp a page number into `[1, max(total_pages, 1)]`
    pub fn clamp_page(&self, page: u64) -> u64 {
        page.clamp(1, self.total_pages.max(1))
    }

    /// Same metadata with `page` moved into range
    pub fn clamped(self) -> Self {
        Self {
            page: self.clamp_page(self.page),
            ..self
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One page of listing results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> ListingPage<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::empty(request),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListingPage<U> {
        ListingPage {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 20, 1).total_pages, 1);
        assert_eq!(Pagination::new(1, 20, 20).total_pages, 1);
        assert_eq!(Pagination::new(1, 20, 21).total_pages, 2);
        assert_eq!(Pagination::new(1, 0, 21).total_pages, 0);
    }

    #[test]
    fn test_total_pages_law_over_grid() {
        for total in 0..200u64 {
            for size in 1..30u64 {
                let p = Pagination::new(1, size, total);
                assert_eq!(p.total_pages, (total as f64 / size as f64).ceil() as u64);
            }
        }
    }

    #[test]
    fn test_clamp_page() {
        let p = Pagination::new(7, 20, 45);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.clamped().page, 3);
        assert_eq!(Pagination::new(4, 20, 0).clamped().page, 1);
        assert_eq!(p.clamp_page(0), 1);
    }

    #[test]
    fn test_page_request_validation() {
        assert!(PageRequest::new(0, 20).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, MAX_PAGE_SIZE + 1).is_err());
        assert_eq!(PageRequest::first(0).page_size(), 1);
        assert_eq!(PageRequest::default().with_page(0).page(), 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(1, 20, 1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 1, "pageSize": 20, "total": 1, "totalPages": 1})
        );
    }
}
