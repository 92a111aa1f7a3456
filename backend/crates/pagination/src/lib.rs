//! Offset pagination primitives shared by Standup listings.
//!
//! A [`PageRequest`] describes which slice of an ordered collection a caller
//! wants; a [`Page`] carries that slice together with the metadata templates
//! need to render navigation. Page numbers are 1-based and clamped here so
//! adapters never have to re-validate them.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(2, 20);
//! let page = Page::new(vec!["a", "b"], 42, request);
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.has_next());
//! assert!(page.has_prev());
//! ```

use url::form_urlencoded;

/// Items per page used when callers do not ask for a specific size.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Upper bound on the page size accepted from configuration.
pub const MAX_PER_PAGE: u32 = 100;

/// Query-string key carrying the 1-based page number.
pub const PAGE_PARAM: &str = "page";

/// A validated request for one page of an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Build a request, clamping `page` to at least 1 and `per_page` to
    /// `1..=MAX_PER_PAGE`.
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        let page = if page == 0 { 1 } else { page };
        let per_page = if per_page == 0 {
            1
        } else if per_page > MAX_PER_PAGE {
            MAX_PER_PAGE
        } else {
            per_page
        };
        Self { page, per_page }
    }

    /// Request the first page with the given size.
    #[must_use]
    pub const fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    /// Parse a raw `page` query value.
    ///
    /// Missing, blank, non-numeric, negative or zero values fall back to the
    /// first page rather than failing the request.
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// assert_eq!(PageRequest::from_query(Some("3"), 20).page(), 3);
    /// assert_eq!(PageRequest::from_query(Some("abc"), 20).page(), 1);
    /// assert_eq!(PageRequest::from_query(None, 20).page(), 1);
    /// ```
    #[must_use]
    pub fn from_query(raw: Option<&str>, per_page: u32) -> Self {
        let page = raw
            .map(str::trim)
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(1);
        Self::new(page, per_page)
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1).saturating_mul(self.per_page as u64)
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PER_PAGE)
    }
}

/// One page of items plus the metadata needed to render navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    /// Wrap an already-sliced set of items with the total item count.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// An empty first page.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Slice an in-memory, already ordered collection.
    ///
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let all: Vec<u32> = (1..=45).collect();
    /// let page = Page::from_slice(&all, PageRequest::new(3, 20));
    /// assert_eq!(page.items(), &[41, 42, 43, 44, 45]);
    /// assert!(!page.has_next());
    /// ```
    #[must_use]
    pub fn from_slice(all: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = all.iter().skip(skip).take(take).cloned().collect();
        let total = u64::try_from(all.len()).unwrap_or(u64::MAX);
        Self::new(items, total, request)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// `true` when this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Current 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.request.page()
    }

    /// Total number of pages; an empty collection still has one page.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.request.per_page()));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// `true` when a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page() < self.total_pages()
    }

    /// `true` when an earlier page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page() > 1
    }

    /// Number of the next page, if any.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page().saturating_add(1))
    }

    /// Number of the previous page, if any.
    #[must_use]
    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev().then(|| self.page().saturating_sub(1))
    }

    /// Transform every item while keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}

/// Rewrite a query string so it points at `page`, keeping every other pair.
///
/// ```
/// use pagination::page_query;
///
/// assert_eq!(page_query("day=2024-01-05&page=1", 2), "day=2024-01-05&page=2");
/// assert_eq!(page_query("", 3), "page=3");
/// ```
#[must_use]
pub fn page_query(query: &str, page: u32) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key != PAGE_PARAM {
            serializer.append_pair(&key, &value);
        }
    }
    serializer.append_pair(PAGE_PARAM, &page.to_string());
    serializer.finish()
}
