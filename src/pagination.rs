//! This modules defines the common functionality for paging data.

use serde::Serialize;

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of records per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a client may request.
    pub max_page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
            max_pages: 5,
        }
    }
}

/// A validated request for one page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The one-based page number.
    pub page: u64,
    /// The number of records per page.
    pub per_page: u64,
}

impl PageRequest {
    /// The number of records to skip before this page starts.
    pub fn offset(self) -> u64 {
        (self.page - 1) * self.per_page
    }
}

/// The pagination details sent alongside a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    /// The one-based page number.
    pub page: u64,
    /// The number of records per page.
    pub per_page: u64,
    /// The number of records matching the query across all pages.
    pub total_count: u64,
}

impl PaginationConfig {
    /// Apply defaults to the requested page and page size and check their bounds.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if `page` is zero or too large to
    /// address, or if `per_page` is zero or larger than
    /// [PaginationConfig::max_page_size].
    pub fn page_request(
        &self,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<PageRequest, Error> {
        let page = page.unwrap_or(self.default_page);
        let per_page = per_page.unwrap_or(self.default_page_size);

        if page == 0 {
            return Err(Error::InvalidPagination(
                "page must be 1 or greater".to_owned(),
            ));
        }

        if per_page == 0 || per_page > self.max_page_size {
            return Err(Error::InvalidPagination(format!(
                "perPage must be between 1 and {}",
                self.max_page_size
            )));
        }

        // SQLite takes signed 64-bit offsets.
        let addressable = (page - 1)
            .checked_mul(per_page)
            .is_some_and(|offset| i64::try_from(offset).is_ok());

        if !addressable {
            return Err(Error::InvalidPagination(format!("page {page} is too large")));
        }

        Ok(PageRequest { page, per_page })
    }
}

/// The number of pages needed to show `total_count` records.
pub fn page_count(total_count: u64, per_page: u64) -> u64 {
    total_count.div_ceil(per_page)
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        // Past the end, go back to the last page instead of another empty one.
        let back_page = (curr_page - 1).min(page_count.max(1));
        indicators.insert(0, PaginationIndicator::BackButton(back_page));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

#[cfg(test)]
mod page_request_tests {
    use crate::{
        Error,
        pagination::{PageRequest, PaginationConfig, page_count},
    };

    #[test]
    fn applies_defaults() {
        let config = PaginationConfig::default();

        let got = config.page_request(None, None).unwrap();

        assert_eq!(
            got,
            PageRequest {
                page: 1,
                per_page: 10
            }
        );
        assert_eq!(got.offset(), 0);
    }

    #[test]
    fn computes_offset() {
        let got = PaginationConfig::default()
            .page_request(Some(3), Some(20))
            .unwrap();

        assert_eq!(got.offset(), 40);
    }

    #[test]
    fn rejects_page_zero() {
        let got = PaginationConfig::default().page_request(Some(0), None);

        assert!(matches!(got, Err(Error::InvalidPagination(_))));
    }

    #[test]
    fn rejects_out_of_bounds_page_size() {
        let config = PaginationConfig::default();

        assert!(matches!(
            config.page_request(None, Some(0)),
            Err(Error::InvalidPagination(_))
        ));
        assert!(matches!(
            config.page_request(None, Some(config.max_page_size + 1)),
            Err(Error::InvalidPagination(_))
        ));
        assert!(config.page_request(None, Some(config.max_page_size)).is_ok());
    }

    #[test]
    fn rejects_unaddressable_page() {
        let got = PaginationConfig::default().page_request(Some(u64::MAX), Some(100));

        assert!(matches!(got, Err(Error::InvalidPagination(_))));
    }

    #[test]
    fn counts_partial_pages() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }
}

#[cfg(test)]
mod indicator_tests {
    use crate::pagination::{PaginationIndicator, create_pagination_indicators};

    #[test]
    fn shows_all_pages() {
        let want = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::NextButton(2),
        ];

        let got = create_pagination_indicators(1, 3, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_nothing_for_a_single_page() {
        let got = create_pagination_indicators(1, 1, 5);

        assert_eq!([PaginationIndicator::CurrPage(1)], got.as_slice());
    }

    #[test]
    fn shows_both_buttons_and_trailing_ellipsis() {
        let want = [
            PaginationIndicator::BackButton(2),
            PaginationIndicator::Page(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::CurrPage(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(4),
        ];

        let got = create_pagination_indicators(3, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_right() {
        let want = [
            PaginationIndicator::BackButton(9),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Page(8),
            PaginationIndicator::Page(9),
            PaginationIndicator::CurrPage(10),
        ];

        let got = create_pagination_indicators(10, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn back_button_past_the_end_goes_to_last_page() {
        let want = [
            PaginationIndicator::BackButton(1),
            PaginationIndicator::Page(1),
        ];

        let got = create_pagination_indicators(50, 1, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn back_button_past_the_end_of_many_pages() {
        let got = create_pagination_indicators(50, 10, 5);

        assert_eq!(got.first(), Some(&PaginationIndicator::BackButton(10)));
        assert!(!got.contains(&PaginationIndicator::NextButton(51)));
    }

    #[test]
    fn shows_page_subset_in_center() {
        let want = [
            PaginationIndicator::BackButton(4),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::CurrPage(5),
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(6),
        ];

        let got = create_pagination_indicators(5, 10, 5);

        assert_eq!(want, got.as_slice());
    }
}
