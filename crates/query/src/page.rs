//! Page requests, page windows, and page results.

use crate::sort::SortSpec;
use alloc::vec::Vec;
use finderdb_core::{Error, Result};

/// A request for one page of results: zero-based page index, page size, and
/// an optional sort.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
    sort: SortSpec,
}

impl PageRequest {
    /// Creates an unsorted page request.
    ///
    /// The page index is zero-based; the size must be greater than zero.
    pub fn new(page: usize, size: usize) -> Result<Self> {
        Self::sorted(page, size, SortSpec::unsorted())
    }

    /// Creates a sorted page request.
    pub fn sorted(page: usize, size: usize, sort: SortSpec) -> Result<Self> {
        if size == 0 {
            return Err(Error::invalid_page_request(
                "page size must be greater than 0",
            ));
        }
        Ok(Self { page, size, sort })
    }

    /// Returns the zero-based page index.
    #[inline]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the sort spec.
    #[inline]
    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Returns the offset of the first element of this page.
    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

/// Computes the zero-based window `[start, end)` of a page over `total`
/// elements.
///
/// A page past the end yields an empty window, not an error.
pub fn page_window(total: usize, page: usize, size: usize) -> (usize, usize) {
    let start = page.saturating_mul(size).min(total);
    let end = start.saturating_add(size).min(total);
    (start, end)
}

/// One page of results plus paging metadata.
#[derive(Clone, Debug)]
pub struct Page<T> {
    content: Vec<T>,
    request: PageRequest,
    total_elements: usize,
}

impl<T> Page<T> {
    /// Creates a page from its content, the originating request, and the
    /// total number of matching elements.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: usize) -> Self {
        Self {
            content,
            request,
            total_elements,
        }
    }

    /// Returns the page content.
    #[inline]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consumes the page, returning its content.
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Returns the zero-based page index.
    pub fn page_number(&self) -> usize {
        self.request.page()
    }

    /// Returns the requested page size.
    pub fn size(&self) -> usize {
        self.request.size()
    }

    /// Returns the sort the page was produced under.
    pub fn sort(&self) -> &SortSpec {
        self.request.sort()
    }

    /// Returns the total number of matching elements across all pages.
    #[inline]
    pub fn total_elements(&self) -> usize {
        self.total_elements
    }

    /// Returns the total number of pages.
    pub fn total_pages(&self) -> usize {
        self.total_elements.div_ceil(self.request.size())
    }

    /// Returns the number of elements on this page.
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    /// Returns true if this page has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns true if this is the first page.
    pub fn is_first(&self) -> bool {
        self.request.page() == 0
    }

    /// Returns true if this is the last page.
    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Returns true if a further page exists.
    pub fn has_next(&self) -> bool {
        self.request.page() + 1 < self.total_pages()
    }

    /// Iterates over the page content.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.content.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
