//! Page-number pagination over a [`Repository`].

use serde::Serialize;

use crate::db::{Repository, SortOrder};
use crate::{QaboardError, Result};

/// Number of page links shown on each side of the current page.
pub const PAGE_LINK_WINDOW: i64 = 5;

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub number: i64,
    /// Page size used for this query.
    pub per_page: i64,
    /// Total number of items across all pages.
    pub total: i64,
}

impl<T> Page<T> {
    /// Number of pages. An empty result still has one (empty) page.
    pub fn num_pages(&self) -> i64 {
        num_pages(self.total, self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<i64> {
        self.has_next().then_some(self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<i64> {
        self.has_previous().then_some(self.number - 1)
    }

    /// 1-based position of the first item on this page across the whole
    /// listing, or 0 when the page is empty.
    ///
    /// Used to number rows in newest-first listings as
    /// `total - start_index - row + 1`.
    pub fn start_index(&self) -> i64 {
        if self.items.is_empty() {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// Page numbers to link to around the current page.
    pub fn page_range(&self) -> Vec<i64> {
        let first = (self.number - PAGE_LINK_WINDOW).max(1);
        let last = (self.number + PAGE_LINK_WINDOW).min(self.num_pages());
        (first..=last).collect()
    }

    /// Convert the items while keeping the page position.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

fn num_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        1
    } else {
        (total + per_page - 1) / per_page
    }
}

/// Parse a `page` query value.
///
/// A missing or empty value means the first page. Anything that is not an
/// integer is treated as a page that does not exist.
pub fn parse_page_number(raw: Option<&str>) -> Result<i64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| QaboardError::not_found("page")),
    }
}

/// Splits a repository's contents into fixed-size pages.
pub struct Paginator<'r, R: Repository> {
    repo: &'r R,
    per_page: i64,
    order: SortOrder,
}

impl<'r, R: Repository> Paginator<'r, R> {
    /// Create a paginator returning `per_page` items per page, newest first.
    pub fn new(repo: &'r R, per_page: i64) -> Self {
        Self {
            repo,
            per_page: per_page.max(1),
            order: SortOrder::NewestFirst,
        }
    }

    /// Use a different ordering.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Fetch page `number` (1-based).
    ///
    /// Page 1 always exists. Any other page outside `1..=num_pages` is
    /// reported as not found.
    pub async fn page(&self, number: i64) -> Result<Page<R::Entity>> {
        let total = self.repo.count().await?;
        if number < 1 || number > num_pages(total, self.per_page) {
            return Err(QaboardError::not_found("page"));
        }

        let offset = (number - 1) * self.per_page;
        let items = self
            .repo
            .find_page(offset, self.per_page, self.order)
            .await?;

        Ok(Page {
            items,
            number,
            per_page: self.per_page,
            total,
        })
    }
}
