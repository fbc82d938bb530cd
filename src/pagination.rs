//! Pagination

use serde::{Deserialize, Serialize};

/// A 1-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a request. A zero page or limit is raised to 1.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Requested page number, starting at 1.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of documents on the page.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of documents before the first one on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// One page of documents and what is known about the rest of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Documents on this page.
    pub docs: Vec<T>,

    /// Number of documents matching the query across all pages.
    pub total_docs: u64,

    /// Number of pages the matching documents span.
    pub total_pages: u64,

    /// This page's number.
    pub page: u32,

    /// Whether a later page exists.
    pub has_next_page: bool,

    /// Whether an earlier page exists.
    pub has_prev_page: bool,
}

impl<T> Page<T> {
    /// Build a page from its documents and the total number of matching documents.
    pub fn new(docs: Vec<T>, total_docs: u64, request: PageRequest) -> Self {
        let total_pages = total_docs.div_ceil(u64::from(request.limit()));

        Self {
            docs,
            total_docs,
            total_pages,
            page: request.page(),
            has_next_page: u64::from(request.page()) < total_pages,
            has_prev_page: request.page() > 1,
        }
    }

    /// Cut the requested page out of a complete, ordered listing.
    pub fn paginate<I>(listing: I, request: PageRequest) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let listing = listing.into_iter();
        let total_docs = listing.len() as u64;

        let docs = listing
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.limit()).unwrap_or(usize::MAX))
            .collect();

        Self::new(docs, total_docs, request)
    }

    /// The cursor of the next page, while one exists.
    pub fn next_cursor(&self) -> Option<u32> {
        self.has_next_page.then(|| self.page.saturating_add(1))
    }

    /// Transform the documents, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            docs: self.docs.into_iter().map(f).collect(),
            total_docs: self.total_docs,
            total_pages: self.total_pages,
            page: self.page,
            has_next_page: self.has_next_page,
            has_prev_page: self.has_prev_page,
        }
    }
}
