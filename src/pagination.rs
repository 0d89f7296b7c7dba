//! Pagination of list endpoints.
//!
//! GitHub signals that more results exist with a `Link: <...>; rel="next"`
//! response header. Only the presence of that relation matters: the next
//! request is derived from the original descriptor with the page number
//! incremented, not from the advertised URL.

use crate::response::Response;

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Metadata of the response that carried this page.
    pub response: Response,
    /// The items on this page.
    pub items: Vec<T>,
    /// Page number (1-indexed). The first request may omit the parameter,
    /// in which case the server's first page is reported as 1.
    pub page: u32,
    /// Page size requested, if any.
    pub per_page: Option<u32>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(response: Response, items: Vec<T>, params: PaginationParams) -> Self {
        Self {
            response,
            items,
            page: params.page.unwrap_or(1),
            per_page: params.per_page,
        }
    }

    /// Whether the server advertised a following page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.response.has_next_page()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            response: self.response,
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Split into response metadata and items.
    pub fn into_parts(self) -> (Response, Vec<T>) {
        (self.response, self.items)
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// `page` / `per_page` query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Number of items per page.
    pub per_page: Option<u32>,
}

impl PaginationParams {
    #[must_use]
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self { page, per_page }
    }

    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// The parameters for the following page. An absent page counts as 1.
    ///
    /// `None` past `u32::MAX`: there is no page number left to request.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let page = self.page.unwrap_or(1).checked_add(1)?;
        Some(Self {
            page: Some(page),
            per_page: self.per_page,
        })
    }
}

/// The parameters of the page after the one fetched with `params`, or
/// `None` if `response` is the last page or the page counter is exhausted.
#[must_use]
pub fn next_page(params: PaginationParams, response: &Response) -> Option<PaginationParams> {
    if !response.has_next_page() {
        return None;
    }
    let next = params.next();
    if next.is_none() {
        tracing::warn!(page = ?params.page, "page counter exhausted; ignoring next link");
    }
    next
}
